// ── Dashboard settings ──
//
// Looks up (or lazily creates) the dashboard record of the calling patron
// and applies widget updates from a submitted payload.

use serde_json::Value;
use tracing::{debug, info};

use crate::account::AccountService;
use crate::arguments::Arguments;
use crate::error::CoreError;
use crate::model::DashboardUser;
use crate::repository::UserRepository;
use crate::sanitize::{WidgetSanitization, WidgetSanitizer};

/// Payload key holding the submitted widget list.
pub const WIDGETS_KEY: &str = "widgets";

#[derive(Debug)]
pub struct DashboardService<A, R, S = WidgetSanitization> {
    accounts: A,
    repository: R,
    sanitizer: S,
}

impl<A, R, S> DashboardService<A, R, S>
where
    A: AccountService,
    R: UserRepository,
    S: WidgetSanitizer,
{
    pub fn new(accounts: A, repository: R, sanitizer: S) -> Self {
        Self {
            accounts,
            repository,
            sanitizer,
        }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// The dashboard record of the caller, created on first access.
    ///
    /// Returns `Ok(None)` when the caller is not authenticated.
    pub async fn get_user(
        &self,
        arguments: &Arguments,
    ) -> Result<Option<DashboardUser>, CoreError> {
        let account = self.accounts.account_by_arguments(arguments).await?;
        let Some(account_id) = account.authenticated_id() else {
            debug!(id = account.id, "caller is not authenticated, no dashboard user");
            return Ok(None);
        };

        self.find_user(account_id).map(Some)
    }

    /// Apply the widget list from `payload`, if it has one.
    ///
    /// When `payload.widgets` is a list (a JSON array, or an object whose
    /// values are taken in order), it is sanitized, comma-joined, stored on
    /// the user, and persisted. Anything else leaves the user and the storage
    /// untouched.
    pub fn update_user(
        &self,
        mut user: DashboardUser,
        payload: &Value,
    ) -> Result<DashboardUser, CoreError> {
        let widgets: Vec<Value> = match payload.get(WIDGETS_KEY) {
            Some(Value::Array(items)) => items.clone(),
            Some(Value::Object(entries)) => entries.values().cloned().collect(),
            _ => {
                debug!(account_id = user.account_id(), "payload has no widget list");
                return Ok(user);
            }
        };

        let dashboard_widgets = self.sanitizer.sanitize(&widgets).join(",");
        user.set_dashboard_widgets(dashboard_widgets);
        self.repository.save(&user)?;

        info!(
            account_id = user.account_id(),
            widgets = user.dashboard_widgets(),
            "updated dashboard widgets"
        );
        Ok(user)
    }

    fn find_user(&self, account_id: i64) -> Result<DashboardUser, CoreError> {
        if let Some(user) = self.repository.find_by_account_id(account_id)? {
            return Ok(user);
        }

        let user = self.repository.create(account_id)?;
        info!(account_id, "created dashboard user");
        Ok(user)
    }
}
