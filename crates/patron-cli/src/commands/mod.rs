//! Command dispatch: composes the services from settings and routes
//! CLI args to them.

pub mod config_cmd;
pub mod dashboard;
pub mod loan;
pub mod reserve;

use std::time::Duration;

use serde_json::Value;

use patron_config::Settings;
use patron_core::{
    ApiConfiguration, Arguments, DashboardService, FileUserRepository, LoanService, RequestClient,
    ReserveService, UpstreamAccountService, WidgetSanitization,
};

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dashboard service backed by the on-disk user store.
pub type Dashboard =
    DashboardService<UpstreamAccountService, FileUserRepository, WidgetSanitization>;

/// Services wired from one settings document.
pub struct Context {
    settings: Settings,
    api: ApiConfiguration,
    client: RequestClient,
}

impl Context {
    pub fn new(settings: Settings, global: &GlobalOpts) -> Result<Self, CliError> {
        let mut transport = settings.transport();
        if let Some(secs) = global.timeout {
            transport = transport.with_timeout(Duration::from_secs(secs));
        }
        let client = RequestClient::new(&transport)?;
        let api = settings.api_configuration();

        Ok(Self {
            settings,
            api,
            client,
        })
    }

    fn accounts(&self) -> UpstreamAccountService {
        UpstreamAccountService::new(self.api.clone(), self.client.clone())
    }

    pub fn reserve_service(&self) -> ReserveService<UpstreamAccountService> {
        ReserveService::new(
            self.api.clone(),
            self.accounts(),
            self.client.clone(),
            self.settings.items_per_page(),
        )
    }

    pub fn loan_service(&self) -> LoanService<UpstreamAccountService> {
        LoanService::new(
            self.api.clone(),
            self.accounts(),
            self.client.clone(),
            self.settings.items_per_page(),
        )
    }

    pub fn dashboard_service(&self) -> Result<Dashboard, CliError> {
        let repository = FileUserRepository::open(self.settings.storage_path())?;
        Ok(DashboardService::new(
            self.accounts(),
            repository,
            self.settings.widget_sanitizer(),
        ))
    }
}

/// Build the opaque service arguments from CLI values.
pub fn arguments(user: &str, page: Option<&str>) -> Arguments {
    let mut args = Arguments::new();
    args.insert("user".into(), Value::String(user.to_owned()));
    if let Some(page) = page {
        args.insert("page".into(), Value::String(page.to_owned()));
    }
    args
}

/// Dispatch a backend-bound command to the appropriate handler.
pub async fn dispatch(cmd: Command, ctx: &Context, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Reserve(args) => reserve::handle(ctx, args, global).await,
        Command::Loan(args) => loan::handle(ctx, args, global).await,
        Command::Dashboard(args) => dashboard::handle(ctx, args, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => Ok(()),
    }
}
