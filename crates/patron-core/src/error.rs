// ── Core error types ──
//
// Errors surfaced by the account services. An unauthenticated caller is
// not an error (services return `None`); what ends up here is an upstream
// failure or a storage failure, both passed through untouched.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Upstream ─────────────────────────────────────────────────────
    #[error("Upstream request failed: {0}")]
    Upstream(#[from] patron_api::Error),

    // ── Storage ──────────────────────────────────────────────────────
    #[error("Dashboard user for account {account_id} not found")]
    UserNotFound { account_id: i64 },

    #[error("Dashboard user for account {account_id} already exists")]
    UserExists { account_id: i64 },

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Storage IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Storage {
            message: err.to_string(),
        }
    }
}
