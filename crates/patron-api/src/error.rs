use thiserror::Error;

/// Top-level error type for the `patron-api` crate.
///
/// Covers every failure mode of a single upstream call: building the
/// client, parsing the expanded URI, the HTTP exchange itself, and decoding
/// the body. `patron-core` passes these through as `CoreError::Upstream`.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The expanded URI template is not a valid absolute URL.
    #[error("Invalid URL '{uri}': {source}")]
    InvalidUrl {
        uri: String,
        #[source]
        source: url::ParseError,
    },

    /// TLS setup or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Upstream ────────────────────────────────────────────────────
    /// The upstream answered with a non-success status.
    #[error("Upstream returned HTTP {status}")]
    Status { status: u16, body: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if the request never got an answer (refused, timed out).
    pub fn is_unreachable(&self) -> bool {
        matches!(self, Self::Transport(e) if e.is_connect() || e.is_timeout())
    }

    /// Returns `true` if the upstream reported the resource as missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status: 404, .. })
    }

    /// HTTP status of the failed exchange, if one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
