//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text and process exit codes.

use miette::Diagnostic;
use thiserror::Error;

use patron_config::ConfigError;
use patron_core::CoreError;

pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONFIG: i32 = 5;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the account backend")]
    #[diagnostic(
        code(patron::connection_failed),
        help("Check the api.path settings and that the backend is reachable.")
    )]
    ConnectionFailed {
        #[source]
        source: patron_api::Error,
    },

    // ── Upstream ─────────────────────────────────────────────────────
    #[error("Account backend rejected the request (HTTP {status})")]
    #[diagnostic(
        code(patron::auth_failed),
        help("The backend refused access for this account or client.")
    )]
    AuthFailed { status: u16 },

    #[error("Account backend has no such resource (HTTP 404)")]
    #[diagnostic(
        code(patron::not_found),
        help("Verify the --user value and the api.path templates.")
    )]
    NotFound,

    #[error("Account backend request failed")]
    #[diagnostic(code(patron::upstream))]
    Upstream {
        #[source]
        source: patron_api::Error,
    },

    // ── Storage ──────────────────────────────────────────────────────
    #[error("Dashboard storage failed")]
    #[diagnostic(
        code(patron::storage),
        help("Check dashboard.storage in the settings file and its permissions.")
    )]
    Storage {
        #[source]
        source: CoreError,
    },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Could not load settings from {path}")]
    #[diagnostic(
        code(patron::config),
        help(
            "Every api.path key (login, user, passwordUpdate, pinUpdate, loanCurrent,\n\
             loanHistory, reserveCurrent, reserveHistory) must be set.\n\
             Expected at: {path}"
        )
    )]
    Config {
        path: String,
        #[source]
        source: ConfigError,
    },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(patron::validation))]
    Validation { field: String, reason: String },

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON payload: {0}")]
    #[diagnostic(code(patron::json), help("Check the JSON payload and try again."))]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } => exit_code::AUTH,
            Self::NotFound => exit_code::NOT_FOUND,
            Self::Config { .. } => exit_code::CONFIG,
            Self::Validation { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Upstream(source) => Self::from(source),
            other => Self::Storage { source: other },
        }
    }
}

impl From<patron_api::Error> for CliError {
    fn from(err: patron_api::Error) -> Self {
        if err.is_unreachable() {
            return Self::ConnectionFailed { source: err };
        }
        if err.is_not_found() {
            return Self::NotFound;
        }
        match err.status() {
            Some(status @ (401 | 403)) => Self::AuthFailed { status },
            _ => Self::Upstream { source: err },
        }
    }
}
