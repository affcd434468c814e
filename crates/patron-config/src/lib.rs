//! Settings for the patron account tools.
//!
//! A TOML file (plus `PATRON_*` environment overrides) provides the
//! upstream URI templates, paging, HTTP, and dashboard settings. This crate
//! turns them into the values `patron_core` services are constructed with;
//! core itself never reads settings.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use patron_core::arguments::coerce_int;
use patron_core::{
    ApiConfiguration, DEFAULT_ITEMS_PER_PAGE, TlsMode, TransportConfig, WidgetSanitization,
};

/// Prefix for environment overrides, e.g. `PATRON_GENERAL__ITEMSPERPAGE=50`.
pub const ENV_PREFIX: &str = "PATRON_";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level settings document.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Upstream API endpoints. Required, with every key present.
    pub api: ApiSettings,

    #[serde(default)]
    pub general: GeneralSettings,

    #[serde(default)]
    pub http: HttpSettings,

    #[serde(default)]
    pub dashboard: DashboardSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiSettings {
    pub path: ApiPathSettings,
}

/// The `api.path` table: one URI template per upstream endpoint.
///
/// Aliases accept the lowercased keys produced by environment overrides.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiPathSettings {
    pub login: String,
    pub user: String,
    #[serde(rename = "passwordUpdate", alias = "passwordupdate")]
    pub password_update: String,
    #[serde(rename = "pinUpdate", alias = "pinupdate")]
    pub pin_update: String,
    #[serde(rename = "loanCurrent", alias = "loancurrent")]
    pub loan_current: String,
    #[serde(rename = "loanHistory", alias = "loanhistory")]
    pub loan_history: String,
    #[serde(rename = "reserveCurrent", alias = "reservecurrent")]
    pub reserve_current: String,
    #[serde(rename = "reserveHistory", alias = "reservehistory")]
    pub reserve_history: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeneralSettings {
    /// Raw page size; see [`Settings::items_per_page`].
    #[serde(rename = "itemsPerPage", alias = "itemsperpage", default)]
    pub items_per_page: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HttpSettings {
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Additional CA certificate (PEM) to trust.
    pub ca_cert: Option<PathBuf>,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
            ca_cert: None,
        }
    }
}

fn default_timeout() -> u64 {
    30
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DashboardSettings {
    /// Allow-list of widget identifiers. Unset accepts any identifier.
    pub widgets: Option<Vec<String>>,

    /// Location of the dashboard user store.
    pub storage: Option<PathBuf>,
}

impl From<&ApiPathSettings> for ApiConfiguration {
    fn from(path: &ApiPathSettings) -> Self {
        let mut api = ApiConfiguration::default();
        api.set_login_uri(path.login.as_str());
        api.set_user_uri(path.user.as_str());
        api.set_password_update_uri(path.password_update.as_str());
        api.set_pin_update_uri(path.pin_update.as_str());
        api.set_loan_current_uri(path.loan_current.as_str());
        api.set_loan_history_uri(path.loan_history.as_str());
        api.set_reserve_current_uri(path.reserve_current.as_str());
        api.set_reserve_history_uri(path.reserve_history.as_str());
        api
    }
}

impl Settings {
    /// Upstream URI templates.
    pub fn api_configuration(&self) -> ApiConfiguration {
        ApiConfiguration::from(&self.api.path)
    }

    /// Page size for history queries.
    ///
    /// Falls back to 25 when unset, non-numeric, or not positive.
    pub fn items_per_page(&self) -> i64 {
        self.general
            .items_per_page
            .as_ref()
            .map(coerce_int)
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_ITEMS_PER_PAGE)
    }

    pub fn transport(&self) -> TransportConfig {
        let tls = match self.http.ca_cert {
            Some(ref path) => TlsMode::CustomCa(path.clone()),
            None => TlsMode::System,
        };
        TransportConfig {
            tls,
            timeout: Duration::from_secs(self.http.timeout),
        }
    }

    /// Widget sanitizer honoring the configured allow-list.
    pub fn widget_sanitizer(&self) -> WidgetSanitization {
        match self.dashboard.widgets {
            Some(ref allowed) => WidgetSanitization::with_allowed(allowed.iter().cloned()),
            None => WidgetSanitization::new(),
        }
    }

    /// Dashboard store location: configured, or the platform data dir.
    pub fn storage_path(&self) -> PathBuf {
        self.dashboard
            .storage
            .clone()
            .unwrap_or_else(default_storage_path)
    }
}

// ── Paths ───────────────────────────────────────────────────────────

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("de", "slub", "patron")
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("patron");
    p
}

/// Resolve the settings file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    project_dirs().map_or_else(
        || dirs_fallback().join("patron.toml"),
        |dirs| dirs.config_dir().join("patron.toml"),
    )
}

fn default_storage_path() -> PathBuf {
    project_dirs().map_or_else(
        || dirs_fallback().join("dashboard.json"),
        |dirs| dirs.data_dir().join("dashboard.json"),
    )
}

// ── Loading ─────────────────────────────────────────────────────────

/// The provider stack: settings file, then environment overrides.
pub fn figment(path: &Path) -> Figment {
    Figment::new()
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
}

/// Load settings from `path`, or the default location.
///
/// Fails when any `api.path` key is missing.
pub fn load_settings(path: Option<&Path>) -> Result<Settings, ConfigError> {
    let path = path.map_or_else(config_path, Path::to_path_buf);
    let settings: Settings = figment(&path).extract()?;
    validate(&settings)?;
    Ok(settings)
}

fn validate(settings: &Settings) -> Result<(), ConfigError> {
    if settings.http.timeout == 0 {
        return Err(ConfigError::Validation {
            field: "http.timeout".into(),
            reason: "must be at least one second".into(),
        });
    }
    Ok(())
}

/// Parse settings from a TOML string (no environment overrides).
pub fn settings_from_str(toml: &str) -> Result<Settings, ConfigError> {
    let settings: Settings = Figment::new().merge(Toml::string(toml)).extract()?;
    validate(&settings)?;
    Ok(settings)
}
