// ── Loans ──
//
// Current loans and the paginated loan history of the calling patron.
// Same request pattern as reservations, against the loan endpoints.

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use patron_api::RequestClient;

use crate::account::AccountService;
use crate::arguments::Arguments;
use crate::config::ApiConfiguration;
use crate::error::CoreError;
use crate::query::{AccountQuery, Paginator, page_from_arguments, response_field};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanCurrent {
    pub loan_current: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanHistory {
    pub paginator: Paginator,
    pub loan_history: Value,
}

/// Loan queries for the calling patron.
#[derive(Debug, Clone)]
pub struct LoanService<A> {
    api: ApiConfiguration,
    query: AccountQuery<A>,
}

impl<A: AccountService> LoanService<A> {
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

    pub async fn get_current(
        &self,
        arguments: &Arguments,
    ) -> Result<Option<LoanCurrent>, CoreError> {
        let Some(account_id) = self.query.authenticated_account(arguments).await? else {
            return Ok(None);
        };

        debug!(account_id, "fetching current loans");
        let processed = self
            .query
            .request_current(self.api.loan_current_uri(), account_id)
            .await?;

        Ok(Some(LoanCurrent {
            loan_current: response_field(processed.as_ref(), "loan"),
        }))
    }

    pub async fn get_history(
        &self,
        arguments: &Arguments,
    ) -> Result<Option<LoanHistory>, CoreError> {
        let page = page_from_arguments(arguments);
        let Some(account_id) = self.query.authenticated_account(arguments).await? else {
            return Ok(None);
        };

        let processed = self
            .query
            .request_history(self.api.loan_history_uri(), account_id, page)
            .await?;

        Ok(Some(LoanHistory {
            paginator: self.query.paginator(processed.as_ref(), page),
            loan_history: response_field(processed.as_ref(), "history"),
        }))
    }
}
