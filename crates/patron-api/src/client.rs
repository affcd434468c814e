// Upstream request client
//
// Wraps `reqwest::Client` with the calling convention every service in the
// workspace uses: an already-expanded URI, a method, and per-call headers.
// Successful JSON bodies come back as `serde_json::Value`; the caller picks
// out the fields it needs.

use reqwest::Method;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

/// Per-call request options: ordered header pairs and an optional JSON body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOptions {
    pub headers: Vec<(String, String)>,
    pub json: Option<Value>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a header. Values are stringified, so counts and offsets can
    /// be passed directly.
    pub fn header(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.headers.push((name.into(), value.to_string()));
        self
    }

    /// Attach a JSON request body.
    pub fn json(mut self, body: Value) -> Self {
        self.json = Some(body);
        self
    }

    /// Look up a header value by name (case-insensitive).
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// HTTP client for the library account backend.
///
/// Cheap to clone; the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct RequestClient {
    http: reqwest::Client,
}

impl RequestClient {
    /// Create a client from a `TransportConfig`.
    pub fn new(transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self { http })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client) -> Self {
        Self { http }
    }

    /// Send one request and decode the response body.
    ///
    /// Returns `Ok(None)` when the upstream answered successfully but the
    /// body is empty or not a JSON object/array. Transport failures,
    /// non-success statuses, and non-JSON bodies are errors.
    pub async fn process(
        &self,
        uri: &str,
        method: Method,
        options: &RequestOptions,
    ) -> Result<Option<Value>, Error> {
        let url = Url::parse(uri).map_err(|source| Error::InvalidUrl {
            uri: uri.to_owned(),
            source,
        })?;

        debug!("{} {}", method, url);

        let mut request = self.http.request(method, url);
        for (name, value) in &options.headers {
            request = request.header(name.as_str(), value.as_str());
        }
        if let Some(ref body) = options.json {
            request = request.json(body);
        }

        let resp = request.send().await.map_err(Error::Transport)?;
        let status = resp.status();
        let body = resp.text().await.map_err(Error::Transport)?;

        if !status.is_success() {
            debug!(status = status.as_u16(), "upstream rejected request");
            return Err(Error::Status {
                status: status.as_u16(),
                body,
            });
        }

        decode_body(body)
    }
}

/// Decode a success body into a structured value, if it is one.
fn decode_body(body: String) -> Result<Option<Value>, Error> {
    if body.trim().is_empty() {
        return Ok(None);
    }

    let value: Value = serde_json::from_str(&body).map_err(|e| Error::Deserialization {
        message: e.to_string(),
        body: body.clone(),
    })?;

    match value {
        Value::Object(_) | Value::Array(_) => Ok(Some(value)),
        _ => Ok(None),
    }
}
