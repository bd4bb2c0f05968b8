//! Raw HTTP seam shared by the session store and the gateway.
//!
//! ARCHITECTURE
//! ============
//! `Transport` knows nothing about sessions: it sends one request and hands
//! back the status plus the parsed body. The session store uses it directly
//! for login/validate/logout so a failing validation can never recurse into
//! the gateway's 401 handling. `HttpTransport` is the `reqwest` backed
//! implementation; tests substitute a scripted one.
//!
//! ERROR HANDLING
//! ==============
//! Only "no response" is an error here. Any status code, including 401 and
//! 5xx, is a successful transport round-trip. Bodies that are not JSON are
//! kept as a JSON string rather than failing the call.

use std::fmt;

use async_trait::async_trait;
pub use reqwest::Method;
use serde_json::Value;

use crate::config::GatewayConfig;
use crate::error::ErrorKind;

// =============================================================================
// ERROR
// =============================================================================

/// Failure to obtain any response from the backend.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// The configured request or connect timeout elapsed.
    #[error("request to {path} timed out")]
    Timeout { path: String },

    /// The backend could not be reached.
    #[error("connection failed: {0}")]
    Connect(String),

    /// The request failed mid-flight (reset, malformed response, ...).
    #[error("request failed: {0}")]
    Request(String),

    /// The HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    ClientBuild(String),
}

impl TransportError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::NetworkError
    }

    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

/// One outbound call, fully resolved at dispatch time.
#[derive(Clone)]
pub struct WireRequest {
    pub method: Method,
    /// Backend-relative path, e.g. `/api/clients`.
    pub path: String,
    /// Bearer token to send as `Authorization`, if any.
    pub bearer: Option<String>,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl WireRequest {
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self { method, path: path.into(), bearer: None, query: Vec::new(), body: None }
    }

    #[must_use]
    pub fn with_bearer(mut self, token: impl Into<String>) -> Self {
        self.bearer = Some(token.into());
        self
    }

    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    #[must_use]
    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }
}

// Tokens never reach logs, even at debug level.
impl fmt::Debug for WireRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WireRequest")
            .field("method", &self.method)
            .field("path", &self.path)
            .field("bearer", &self.bearer.as_ref().map(|_| "<redacted>"))
            .field("query", &self.query)
            .field("body", &self.body.is_some())
            .finish()
    }
}

/// Status plus parsed body of a completed round-trip.
#[derive(Debug, Clone, PartialEq)]
pub struct WireResponse {
    pub status: u16,
    pub body: Value,
}

impl WireResponse {
    #[must_use]
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        self.status == 401
    }

    /// Backend-provided human message (`message` or `error` field), if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        body_message(&self.body)
    }
}

pub(crate) fn body_message(body: &Value) -> Option<&str> {
    match body {
        Value::Object(map) => map
            .get("message")
            .or_else(|| map.get("error"))
            .and_then(Value::as_str),
        Value::String(text) if !text.is_empty() => Some(text),
        _ => None,
    }
}

// =============================================================================
// TRANSPORT
// =============================================================================

#[async_trait]
pub trait Transport: Send + Sync {
    /// Send one request and return whatever the backend answered.
    async fn send(&self, request: WireRequest) -> Result<WireResponse, TransportError>;
}

/// `reqwest` transport bound to one backend base URL.
pub struct HttpTransport {
    http: reqwest::Client,
    config: GatewayConfig,
}

impl HttpTransport {
    /// Build an HTTP client with the configured timeouts.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying client cannot be constructed.
    pub fn new(config: GatewayConfig) -> Result<Self, TransportError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|e| TransportError::ClientBuild(e.to_string()))?;
        Ok(Self { http, config })
    }

    #[must_use]
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: WireRequest) -> Result<WireResponse, TransportError> {
        let url = self.config.url(&request.path);
        tracing::debug!(method = %request.method, path = %request.path, authed = request.bearer.is_some(), "dispatch");

        let mut builder = self.http.request(request.method.clone(), &url);
        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token);
        }
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| classify(&request.path, &e))?;
        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| classify(&request.path, &e))?;

        tracing::debug!(path = %request.path, status, "response");
        Ok(WireResponse { status, body: parse_body(&text) })
    }
}

fn classify(path: &str, error: &reqwest::Error) -> TransportError {
    if error.is_timeout() {
        TransportError::Timeout { path: path.to_owned() }
    } else if error.is_connect() {
        TransportError::Connect(error.to_string())
    } else {
        TransportError::Request(error.to_string())
    }
}

pub(crate) fn parse_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_owned()))
}

#[cfg(test)]
#[path = "transport_test.rs"]
mod tests;
