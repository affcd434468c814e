// ── Account resolution ──
//
// Every service starts by turning caller arguments into an account. Only
// an authenticated account (positive id, structured account data) unlocks
// upstream calls; anything else makes the service answer with nothing.

use std::future::Future;

use serde_json::Value;
use tracing::debug;

use patron_api::{Method, RequestClient, RequestOptions, replace_placeholders};

use crate::arguments::{Arguments, int_argument};
use crate::config::ApiConfiguration;
use crate::error::CoreError;

/// Argument key carrying the account identifier.
pub const USER_ARGUMENT: &str = "user";

/// The outcome of resolving caller arguments to an account.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedAccount {
    /// Account identifier; zero or negative means unauthenticated.
    pub id: i64,
    /// Raw account data as returned by the upstream.
    pub data: Value,
}

impl ResolvedAccount {
    pub fn new(id: i64, data: Value) -> Self {
        Self { id, data }
    }

    /// An account that gates every downstream call.
    pub fn anonymous() -> Self {
        Self {
            id: 0,
            data: Value::Null,
        }
    }

    /// A positive id with structured (object or list) account data.
    pub fn is_authenticated(&self) -> bool {
        self.id > 0 && (self.data.is_object() || self.data.is_array())
    }

    /// The account id, if the account is authenticated.
    pub fn authenticated_id(&self) -> Option<i64> {
        self.is_authenticated().then_some(self.id)
    }
}

/// Resolves caller arguments into an account.
pub trait AccountService {
    fn account_by_arguments(
        &self,
        arguments: &Arguments,
    ) -> impl Future<Output = Result<ResolvedAccount, CoreError>> + Send;
}

/// Resolves accounts by fetching the patron record from the upstream.
///
/// Reads the account id from the `user` argument and loads the patron via
/// the `user` URI template. Ids that are zero, negative, or missing are
/// answered locally without an upstream call.
#[derive(Debug, Clone)]
pub struct UpstreamAccountService {
    api: ApiConfiguration,
    client: RequestClient,
}

impl UpstreamAccountService {
    pub fn new(api: ApiConfiguration, client: RequestClient) -> Self {
        Self { api, client }
    }
}

impl AccountService for UpstreamAccountService {
    async fn account_by_arguments(
        &self,
        arguments: &Arguments,
    ) -> Result<ResolvedAccount, CoreError> {
        let id = int_argument(arguments, USER_ARGUMENT).unwrap_or(0);
        if id <= 0 {
            debug!(id, "no account id in arguments");
            return Ok(ResolvedAccount::anonymous());
        }

        let uri = replace_placeholders(&[id], self.api.user_uri());
        let options = RequestOptions::new()
            .header("X-SLUB-Standard", "paia_ext")
            .header("X-SLUB-pretty", "1");

        let data = self
            .client
            .process(&uri, Method::GET, &options)
            .await?
            .unwrap_or(Value::Null);

        debug!(id, found = data.is_object(), "resolved account");
        Ok(ResolvedAccount::new(id, data))
    }
}
