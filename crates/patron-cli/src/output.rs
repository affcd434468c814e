//! Output formatting: JSON and YAML.
//!
//! Upstream records are opaque, so everything renders through serde.

use std::io::{self, Write};

use serde::Serialize;
use serde_json::{Map, Value};

use crate::cli::OutputFormat;
use crate::error::CliError;

/// Render a serializable value in the chosen format.
pub fn render<T: Serialize + ?Sized>(format: &OutputFormat, data: &T) -> Result<String, CliError> {
    let rendered = match format {
        OutputFormat::Json => serde_json::to_string_pretty(data)?,
        OutputFormat::JsonCompact => serde_json::to_string(data)?,
        OutputFormat::Yaml => serde_yaml::to_string(data).map_err(|e| CliError::Validation {
            field: "output".into(),
            reason: format!("cannot render YAML: {e}"),
        })?,
    };
    Ok(rendered)
}

/// Render a service result; an absent result renders as an empty object.
pub fn render_optional<T: Serialize>(
    format: &OutputFormat,
    data: Option<&T>,
) -> Result<String, CliError> {
    match data {
        Some(data) => render(format, data),
        None => render(format, &Value::Object(Map::new())),
    }
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{}", output.trim_end());
}
