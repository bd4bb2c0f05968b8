//! Authenticated request gateway.
//!
//! ARCHITECTURE
//! ============
//! Every protected backend call goes through `Gateway::dispatch`, which:
//! 1. reads the credential from the session store at dispatch time,
//! 2. attaches it as a bearer header and tags the call with its identity,
//! 3. on 401, asks the store to invalidate that identity and resolves with
//!    `GatewayError::AuthExpired`.
//!
//! There is no retry and no token refresh. Non-2xx responses other than 401
//! come back as ordinary `ApiResponse` values from `request`; the typed
//! resource handles (`clients()`, `widgets()`, ...) turn them into
//! `GatewayError::Business` so callers get one tagged result per endpoint.

pub mod catalog;
pub mod clients;
pub mod compliance;
pub mod invites;
pub mod types;

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info};

use crate::error::ErrorKind;
use crate::session::SessionStore;
use crate::transport::{Method, Transport, TransportError, WireRequest, body_message};
pub use catalog::{Widgets, Workflows};
pub use clients::Clients;
pub use compliance::Compliance;
pub use invites::Invites;
pub use types::Health;

pub const HEALTH_PATH: &str = "/api/health";

// =============================================================================
// ERROR
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    /// The backend rejected the credential the call was sent under.
    #[error("session expired; sign in again")]
    AuthExpired,

    /// No response was received.
    #[error(transparent)]
    Network(#[from] TransportError),

    /// A non-2xx response carrying a domain rejection.
    #[error("request rejected ({status}): {message}")]
    Business { status: u16, message: String },

    /// A local precondition failed; nothing was sent.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The request body could not be serialized.
    #[error("request body encode failed: {0}")]
    Encode(String),

    /// A success body did not have the expected shape.
    #[error("response decode failed: {0}")]
    Decode(String),
}

impl GatewayError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::AuthExpired => ErrorKind::AuthExpired,
            Self::Network(_) => ErrorKind::NetworkError,
            Self::Business { .. } | Self::Decode(_) => ErrorKind::BusinessError,
            Self::InvalidArgument(_) | Self::Encode(_) => ErrorKind::InvalidArgument,
        }
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Business { status: 404, .. })
    }
}

// =============================================================================
// RESPONSE
// =============================================================================

/// Exactly what the backend returned: status plus parsed body.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Backend message for a rejection, falling back to the status code.
    #[must_use]
    pub fn message(&self) -> String {
        body_message(&self.body).map_or_else(|| format!("HTTP {}", self.status), str::to_owned)
    }

    /// Decode the body regardless of status.
    ///
    /// # Errors
    ///
    /// Returns `Decode` if the body does not match `T`.
    pub fn json<T: DeserializeOwned>(self) -> Result<T, GatewayError> {
        serde_json::from_value(self.body).map_err(|e| GatewayError::Decode(e.to_string()))
    }

    /// Decode a 2xx body, or turn a non-2xx response into `Business`.
    ///
    /// # Errors
    ///
    /// Returns `Business` for non-2xx statuses and `Decode` for bodies that
    /// do not match `T`.
    pub fn into_result<T: DeserializeOwned>(self) -> Result<T, GatewayError> {
        self.ensure_success()?.json()
    }

    /// Like `into_result`, discarding the body.
    ///
    /// # Errors
    ///
    /// Returns `Business` for non-2xx statuses.
    pub fn into_unit(self) -> Result<(), GatewayError> {
        self.ensure_success().map(|_| ())
    }

    fn ensure_success(self) -> Result<Self, GatewayError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(GatewayError::Business { status: self.status, message: self.message() })
        }
    }
}

// =============================================================================
// GATEWAY
// =============================================================================

/// Sole path to protected backend resources. Cheap to clone.
#[derive(Clone)]
pub struct Gateway {
    session: SessionStore,
    transport: Arc<dyn Transport>,
}

impl Gateway {
    /// Build a gateway over the session store's transport.
    #[must_use]
    pub fn new(session: SessionStore) -> Self {
        let transport = session.transport();
        Self { session, transport }
    }

    #[must_use]
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Generic call: `endpoint` is backend-relative, `body` is serialized as
    /// JSON when present.
    ///
    /// # Errors
    ///
    /// `AuthExpired` on 401, `Network` when no response arrived,
    /// `InvalidArgument`/`Encode` for local failures. Other statuses are
    /// returned as `Ok`.
    pub async fn request<B>(&self, method: Method, endpoint: &str, body: Option<&B>) -> Result<ApiResponse, GatewayError>
    where
        B: Serialize + ?Sized,
    {
        let mut request = WireRequest::new(method, checked_endpoint(endpoint)?);
        if let Some(body) = body {
            let value = serde_json::to_value(body).map_err(|e| GatewayError::Encode(e.to_string()))?;
            request = request.with_body(value);
        }
        self.dispatch(request).await
    }

    /// `GET /api/health`.
    ///
    /// # Errors
    ///
    /// See [`Gateway::request`]; non-2xx becomes `Business`.
    pub async fn health(&self) -> Result<Health, GatewayError> {
        self.dispatch(WireRequest::new(Method::GET, HEALTH_PATH))
            .await?
            .into_result()
    }

    #[must_use]
    pub fn clients(&self) -> Clients<'_> {
        Clients::new(self)
    }

    #[must_use]
    pub fn widgets(&self) -> Widgets<'_> {
        Widgets::new(self)
    }

    #[must_use]
    pub fn workflows(&self) -> Workflows<'_> {
        Workflows::new(self)
    }

    #[must_use]
    pub fn compliance(&self) -> Compliance<'_> {
        Compliance::new(self)
    }

    #[must_use]
    pub fn invites(&self) -> Invites<'_> {
        Invites::new(self)
    }

    pub(crate) async fn dispatch(&self, request: WireRequest) -> Result<ApiResponse, GatewayError> {
        let dispatched_under = self.session.dispatch_credential();
        let request = match &dispatched_under {
            Some((token, _)) => request.with_bearer(token.clone()),
            None => request,
        };
        let path = request.path.clone();

        let response = self.transport.send(request).await?;

        if response.is_unauthorized() {
            if let Some((_, tag)) = dispatched_under {
                if self.session.invalidate(tag) {
                    info!(%path, "credential rejected; session ended");
                } else {
                    debug!(%path, "401 for a superseded credential");
                }
            }
            return Err(GatewayError::AuthExpired);
        }

        Ok(ApiResponse { status: response.status, body: response.body })
    }
}

fn checked_endpoint(endpoint: &str) -> Result<&str, GatewayError> {
    if !endpoint.starts_with('/') {
        return Err(GatewayError::InvalidArgument(format!(
            "endpoint must be a backend-relative path: {endpoint:?}"
        )));
    }
    Ok(endpoint)
}

/// Identifier used as a path segment: non-empty, free of separators, and
/// not a dot segment that URL normalization would collapse.
pub(crate) fn require_id<'a>(what: &str, id: &'a str) -> Result<&'a str, GatewayError> {
    let id = id.trim();
    if id.is_empty() {
        return Err(GatewayError::InvalidArgument(format!("{what} id is required")));
    }
    if id == "." || id == ".." {
        return Err(GatewayError::InvalidArgument(format!("{what} id is a dot segment: {id:?}")));
    }
    if id.contains(['/', '?', '#']) {
        return Err(GatewayError::InvalidArgument(format!("{what} id contains a reserved character: {id:?}")));
    }
    Ok(id)
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
