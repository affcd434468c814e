//! Settings inspection commands.

use std::path::PathBuf;

use serde::Serialize;
use serde_json::Map;

use patron_config::{DashboardSettings, HttpSettings, Settings};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

/// The settings file in effect: `--config` / `PATRON_CONFIG`, else the default.
pub fn settings_path(global: &GlobalOpts) -> PathBuf {
    global
        .config
        .clone()
        .unwrap_or_else(patron_config::config_path)
}

/// Load settings, attaching the path to any failure.
pub fn load(global: &GlobalOpts) -> Result<Settings, CliError> {
    let path = settings_path(global);
    patron_config::load_settings(Some(&path)).map_err(|source| CliError::Config {
        path: path.display().to_string(),
        source,
    })
}

/// Settings as the services will see them: expanded API templates and the
/// effective page size.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ResolvedSettings<'a> {
    api: Map<String, serde_json::Value>,
    items_per_page: i64,
    http: &'a HttpSettings,
    dashboard: &'a DashboardSettings,
}

impl<'a> ResolvedSettings<'a> {
    fn new(settings: &'a Settings) -> Self {
        let api = settings
            .api_configuration()
            .entries()
            .into_iter()
            .map(|(key, uri)| (key.to_owned(), uri.into()))
            .collect();

        Self {
            api,
            items_per_page: settings.items_per_page(),
            http: &settings.http,
            dashboard: &settings.dashboard,
        }
    }
}

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Show => {
            let settings = load(global)?;
            let out = output::render(&global.output, &ResolvedSettings::new(&settings))?;
            output::print_output(&out, global.quiet);
        }

        ConfigCommand::Path => {
            output::print_output(&settings_path(global).display().to_string(), global.quiet);
        }
    }
    Ok(())
}
