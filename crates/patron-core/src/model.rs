// ── Domain model ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Dashboard settings of one patron.
///
/// The account id is fixed at creation. Widgets are stored as one
/// comma-joined, ordered list that is always replaced as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardUser {
    account_id: i64,
    #[serde(default)]
    dashboard_widgets: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl DashboardUser {
    pub fn new(account_id: i64) -> Self {
        let now = Utc::now();
        Self {
            account_id,
            dashboard_widgets: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn account_id(&self) -> i64 {
        self.account_id
    }

    pub fn dashboard_widgets(&self) -> &str {
        &self.dashboard_widgets
    }

    /// Replace the stored widget list.
    pub fn set_dashboard_widgets(&mut self, widgets: impl Into<String>) {
        self.dashboard_widgets = widgets.into();
        self.updated_at = Utc::now();
    }

    /// The stored widgets in order.
    pub fn widgets(&self) -> Vec<&str> {
        self.dashboard_widgets
            .split(',')
            .filter(|w| !w.is_empty())
            .collect()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
