// patron-api: Async HTTP transport for the library account backend

pub mod client;
pub mod error;
pub mod transport;
pub mod uri;

pub use client::{RequestClient, RequestOptions};
pub use error::Error;
pub use reqwest::Method;
pub use transport::{TlsMode, TransportConfig};
pub use uri::replace_placeholders;
