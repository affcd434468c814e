//! Loan command handlers.

use crate::cli::{GlobalOpts, QueryArgs, QueryCommand};
use crate::error::CliError;
use crate::output;

use super::{Context, arguments};

pub async fn handle(ctx: &Context, args: QueryArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let service = ctx.loan_service();

    let out = match args.command {
        QueryCommand::Current { account } => {
            let result = service.get_current(&arguments(&account.user, None)).await?;
            output::render_optional(&global.output, result.as_ref())?
        }

        QueryCommand::History { account, page } => {
            let result = service
                .get_history(&arguments(&account.user, page.as_deref()))
                .await?;
            output::render_optional(&global.output, result.as_ref())?
        }
    };

    output::print_output(&out, global.quiet);
    Ok(())
}
