// ── Account-scoped upstream queries ──
//
// The "current" and "paginated history" request pattern shared by the
// reservation and loan services: gate on the resolved account, expand the
// endpoint template with the account id, send the PAIA extension headers,
// and hand back the decoded response.

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use patron_api::{Method, RequestClient, RequestOptions, replace_placeholders};

use crate::account::AccountService;
use crate::arguments::{Arguments, int_argument};
use crate::error::CoreError;

/// Page size used when the settings do not provide a usable one.
pub const DEFAULT_ITEMS_PER_PAGE: i64 = 25;

/// Argument key carrying the 1-based history page.
pub const PAGE_ARGUMENT: &str = "page";

/// Pagination block returned alongside history results.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Paginator {
    /// Total number of records as reported by the upstream.
    pub count_items: Value,
    pub current_page: i64,
    pub items_per_page: i64,
}

/// Requested page, defaulting to the first one.
pub fn page_from_arguments(arguments: &Arguments) -> i64 {
    int_argument(arguments, PAGE_ARGUMENT).unwrap_or(1)
}

/// Zero-based record offset for a 1-based page.
///
/// Pages below 1 yield a negative offset, which is sent upstream as-is.
pub fn offset(page: i64, items_per_page: i64) -> i64 {
    page.saturating_mul(items_per_page)
        .saturating_sub(items_per_page)
}

/// Headers sent with every current/history request.
pub fn standard_options() -> RequestOptions {
    RequestOptions::new()
        .header("X-SLUB-Standard", "paia_ext")
        .header("X-SLUB-pretty", "1")
        .header("X-SLUB-sort", "DESC")
}

/// Standard headers plus the page window.
pub fn history_options(items_per_page: i64, offset: i64) -> RequestOptions {
    standard_options()
        .header("X-SLUB-count", items_per_page)
        .header("X-SLUB-offset", offset)
}

/// Copy `key` out of an upstream response, `null` when absent.
pub fn response_field(response: Option<&Value>, key: &str) -> Value {
    response
        .and_then(|r| r.get(key))
        .cloned()
        .unwrap_or(Value::Null)
}

/// Shared state of an account-scoped query service.
#[derive(Debug, Clone)]
pub(crate) struct AccountQuery<A> {
    accounts: A,
    client: RequestClient,
    items_per_page: i64,
}

impl<A: AccountService> AccountQuery<A> {
    pub(crate) fn new(accounts: A, client: RequestClient, items_per_page: i64) -> Self {
        Self {
            accounts,
            client,
            items_per_page,
        }
    }

    pub(crate) fn items_per_page(&self) -> i64 {
        self.items_per_page
    }

    /// Resolve the caller, returning the account id only when authenticated.
    pub(crate) async fn authenticated_account(
        &self,
        arguments: &Arguments,
    ) -> Result<Option<i64>, CoreError> {
        let account = self.accounts.account_by_arguments(arguments).await?;
        let id = account.authenticated_id();
        if id.is_none() {
            debug!(id = account.id, "caller is not authenticated, skipping upstream");
        }
        Ok(id)
    }

    /// GET the current records for an account.
    pub(crate) async fn request_current(
        &self,
        template: &str,
        account_id: i64,
    ) -> Result<Option<Value>, CoreError> {
        let uri = replace_placeholders(&[account_id], template);
        let response = self
            .client
            .process(&uri, Method::GET, &standard_options())
            .await?;
        Ok(response)
    }

    /// GET one page of history for an account.
    pub(crate) async fn request_history(
        &self,
        template: &str,
        account_id: i64,
        page: i64,
    ) -> Result<Option<Value>, CoreError> {
        let uri = replace_placeholders(&[account_id], template);
        let offset = offset(page, self.items_per_page);
        debug!(account_id, page, offset, "requesting history page");

        let response = self
            .client
            .process(
                &uri,
                Method::GET,
                &history_options(self.items_per_page, offset),
            )
            .await?;
        Ok(response)
    }

    /// Build the paginator for a history response.
    pub(crate) fn paginator(&self, response: Option<&Value>, page: i64) -> Paginator {
        Paginator {
            count_items: response_field(response, "count"),
            current_page: page,
            items_per_page: self.items_per_page,
        }
    }
}
