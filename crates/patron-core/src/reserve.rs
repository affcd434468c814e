// ── Reservations ──
//
// Current reservations and the paginated reservation history of the
// calling patron.

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use patron_api::RequestClient;

use crate::account::AccountService;
use crate::arguments::Arguments;
use crate::config::ApiConfiguration;
use crate::error::CoreError;
use crate::query::{AccountQuery, Paginator, page_from_arguments, response_field};

/// Current reservations: the upstream `reserve` field, untouched.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReserveCurrent {
    pub reserve_current: Value,
}

/// One page of reservation history.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReserveHistory {
    pub paginator: Paginator,
    pub reserve_history: Value,
}

/// Reservation queries for the calling patron.
///
/// Both operations answer `Ok(None)` for callers that do not resolve to an
/// authenticated account, without contacting the upstream.
#[derive(Debug, Clone)]
pub struct ReserveService<A> {
    api: ApiConfiguration,
    query: AccountQuery<A>,
}

impl<A: AccountService> ReserveService<A> {
    pub fn new(
        api: ApiConfiguration,
        accounts: A,
        client: RequestClient,
        items_per_page: i64,
    ) -> Self {
        Self {
            api,
            query: AccountQuery::new(accounts, client, items_per_page),
        }
    }

    pub fn items_per_page(&self) -> i64 {
        self.query.items_per_page()
    }

    /// Current reservations of the caller.
    pub async fn get_current(
        &self,
        arguments: &Arguments,
    ) -> Result<Option<ReserveCurrent>, CoreError> {
        let Some(account_id) = self.query.authenticated_account(arguments).await? else {
            return Ok(None);
        };

        debug!(account_id, "fetching current reservations");
        let processed = self
            .query
            .request_current(self.api.reserve_current_uri(), account_id)
            .await?;

        Ok(Some(ReserveCurrent {
            reserve_current: response_field(processed.as_ref(), "reserve"),
        }))
    }

    /// One page of the caller's reservation history.
    ///
    /// The page comes from the `page` argument (default 1).
    pub async fn get_history(
        &self,
        arguments: &Arguments,
    ) -> Result<Option<ReserveHistory>, CoreError> {
        let page = page_from_arguments(arguments);
        let Some(account_id) = self.query.authenticated_account(arguments).await? else {
            return Ok(None);
        };

        let processed = self
            .query
            .request_history(self.api.reserve_history_uri(), account_id, page)
            .await?;

        Ok(Some(ReserveHistory {
            paginator: self.query.paginator(processed.as_ref(), page),
            reserve_history: response_field(processed.as_ref(), "history"),
        }))
    }
}
