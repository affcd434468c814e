// patron-core: Account-scoped services between the upstream API and consumers.

pub mod account;
pub mod arguments;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod loan;
pub mod model;
pub mod query;
pub mod repository;
pub mod reserve;
pub mod sanitize;

// ── Primary re-exports ──────────────────────────────────────────────
pub use account::{AccountService, ResolvedAccount, UpstreamAccountService};
pub use arguments::Arguments;
pub use config::ApiConfiguration;
pub use dashboard::DashboardService;
pub use error::CoreError;
pub use loan::{LoanCurrent, LoanHistory, LoanService};
pub use model::DashboardUser;
pub use query::{DEFAULT_ITEMS_PER_PAGE, Paginator};
pub use repository::{FileUserRepository, MemoryUserRepository, UserRepository};
pub use reserve::{ReserveCurrent, ReserveHistory, ReserveService};
pub use sanitize::{WidgetSanitization, WidgetSanitizer};

pub use patron_api::{RequestClient, TlsMode, TransportConfig};
