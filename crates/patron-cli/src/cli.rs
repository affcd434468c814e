//! Clap derive structures for the `patron` CLI.
//!
//! Defines the command tree, global flags, and shared argument groups.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// patron -- library account access from the command line
#[derive(Debug, Parser)]
#[command(
    name = "patron",
    version,
    about = "Query a library patron account: loans, reservations, and dashboard",
    long_about = "Reads loans and reservations of a library patron from a PAIA-style\n\
        account backend and manages the patron's dashboard widgets.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Settings file (defaults to the platform config dir)
    #[arg(long, env = "PATRON_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'o', default_value = "json", global = true)]
    pub output: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Request timeout in seconds (overrides settings)
    #[arg(long, global = true)]
    pub timeout: Option<u64>,
}

// ── Output Enum ──────────────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Current reservations and reservation history
    #[command(alias = "reservations", alias = "r")]
    Reserve(QueryArgs),

    /// Current loans and loan history
    #[command(alias = "loans", alias = "l")]
    Loan(QueryArgs),

    /// Show or update the patron's dashboard widgets
    #[command(alias = "dash")]
    Dashboard(DashboardArgs),

    /// Inspect the settings file
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Shared argument groups ───────────────────────────────────────────

#[derive(Debug, Args)]
pub struct AccountArgs {
    /// Account identifier of the patron
    #[arg(long, short = 'u')]
    pub user: String,
}

// ── Reserve / Loan ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct QueryArgs {
    #[command(subcommand)]
    pub command: QueryCommand,
}

#[derive(Debug, Subcommand)]
pub enum QueryCommand {
    /// Items currently held
    Current {
        #[command(flatten)]
        account: AccountArgs,
    },

    /// One page of the history
    History {
        #[command(flatten)]
        account: AccountArgs,

        /// Page number, starting at 1
        #[arg(long, short = 'p', allow_hyphen_values = true)]
        page: Option<String>,
    },
}

// ── Dashboard ────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct DashboardArgs {
    #[command(subcommand)]
    pub command: DashboardCommand,
}

#[derive(Debug, Subcommand)]
pub enum DashboardCommand {
    /// Show the dashboard record (created on first access)
    Show {
        #[command(flatten)]
        account: AccountArgs,
    },

    /// Replace the widget list
    Update {
        #[command(flatten)]
        account: AccountArgs,

        /// Widget identifier, in display order (repeatable)
        #[arg(long = "widget", short = 'w')]
        widgets: Vec<String>,

        /// JSON payload file with a `widgets` array ("-" for stdin)
        #[arg(long, conflicts_with = "widgets")]
        payload: Option<PathBuf>,
    },
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the resolved settings
    Show,

    /// Print the settings file path
    Path,
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
