// Shared fixtures for patron-core integration tests.
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};

use serde_json::{Value, json};
use wiremock::MockServer;

use patron_core::{
    AccountService, ApiConfiguration, Arguments, CoreError, DashboardUser, MemoryUserRepository,
    RequestClient, ResolvedAccount, UserRepository,
};

/// Account service answering with a fixed account and counting lookups.
pub struct StaticAccounts {
    account: ResolvedAccount,
    pub lookups: AtomicUsize,
}

impl StaticAccounts {
    pub fn authenticated(id: i64) -> Self {
        Self::with(ResolvedAccount::new(id, json!({ "name": "Patron", "status": 0 })))
    }

    pub fn with(account: ResolvedAccount) -> Self {
        Self {
            account,
            lookups: AtomicUsize::new(0),
        }
    }
}

impl AccountService for StaticAccounts {
    async fn account_by_arguments(
        &self,
        _arguments: &Arguments,
    ) -> Result<ResolvedAccount, CoreError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        Ok(self.account.clone())
    }
}

/// Memory repository that counts writes.
#[derive(Default)]
pub struct CountingRepository {
    inner: MemoryUserRepository,
    pub creates: AtomicUsize,
    pub saves: AtomicUsize,
}

impl CountingRepository {
    pub fn creates(&self) -> usize {
        self.creates.load(Ordering::SeqCst)
    }

    pub fn saves(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

impl UserRepository for CountingRepository {
    fn find_by_account_id(&self, account_id: i64) -> Result<Option<DashboardUser>, CoreError> {
        self.inner.find_by_account_id(account_id)
    }

    fn create(&self, account_id: i64) -> Result<DashboardUser, CoreError> {
        self.creates.fetch_add(1, Ordering::SeqCst);
        self.inner.create(account_id)
    }

    fn save(&self, user: &DashboardUser) -> Result<(), CoreError> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        self.inner.save(user)
    }
}

/// API configuration pointing every endpoint at the mock server.
pub fn api_for(server: &MockServer) -> ApiConfiguration {
    let base = format!("{}/paia/core", server.uri());
    let mut api = ApiConfiguration::default();
    api.set_login_uri(format!("{}/paia/auth/login", server.uri()));
    api.set_user_uri(format!("{base}/{{id}}"));
    api.set_password_update_uri(format!("{base}/{{id}}/change"));
    api.set_pin_update_uri(format!("{base}/{{id}}/pin"));
    api.set_loan_current_uri(format!("{base}/{{id}}/items"));
    api.set_loan_history_uri(format!("{base}/{{id}}/items/history"));
    api.set_reserve_current_uri(format!("{base}/{{id}}/reserve"));
    api.set_reserve_history_uri(format!("{base}/{{id}}/reserve/history"));
    api
}

pub fn client() -> RequestClient {
    RequestClient::with_client(reqwest::Client::new())
}

pub fn args(value: Value) -> Arguments {
    match value {
        Value::Object(map) => map,
        _ => Arguments::new(),
    }
}
