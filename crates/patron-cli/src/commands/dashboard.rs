//! Dashboard command handlers.

use std::io::Read;
use std::path::Path;

use serde_json::{Value, json};
use tracing::debug;

use crate::cli::{DashboardArgs, DashboardCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::{Context, arguments};

pub async fn handle(
    ctx: &Context,
    args: DashboardArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let service = ctx.dashboard_service()?;

    let out = match args.command {
        DashboardCommand::Show { account } => {
            let user = service.get_user(&arguments(&account.user, None)).await?;
            output::render_optional(&global.output, user.as_ref())?
        }

        DashboardCommand::Update {
            account,
            widgets,
            payload,
        } => {
            let payload = match payload {
                Some(path) => read_payload(&path)?,
                None if widgets.is_empty() => json!({}),
                None => json!({ "widgets": widgets }),
            };

            match service.get_user(&arguments(&account.user, None)).await? {
                Some(user) => {
                    let user = service.update_user(user, &payload)?;
                    output::render(&global.output, &user)?
                }
                None => {
                    debug!("no dashboard user for this account, nothing to update");
                    output::render_optional::<Value>(&global.output, None)?
                }
            }
        }
    };

    output::print_output(&out, global.quiet);
    Ok(())
}

/// Read a JSON payload from a file, or stdin for `-`.
fn read_payload(path: &Path) -> Result<Value, CliError> {
    let content = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(path)?
    };
    Ok(serde_json::from_str(&content)?)
}
