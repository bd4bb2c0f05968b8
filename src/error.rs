//! Error taxonomy shared by the session store and the gateway.
//!
//! DESIGN
//! ======
//! Each concrete error type (`SessionError`, `GatewayError`, ...) maps onto
//! one `ErrorKind`, so UI boundaries can branch on the category without
//! matching every variant.

use serde::{Deserialize, Serialize};

/// Category of a failed session or gateway operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Bad credentials, or a persisted token the backend no longer accepts.
    ValidationFailure,
    /// A credential that was valid at dispatch was rejected by the backend.
    AuthExpired,
    /// No response was received: connect failure, reset, or timeout.
    NetworkError,
    /// A well-formed non-2xx response carrying a domain rejection.
    BusinessError,
    /// A local precondition failed; nothing was sent.
    InvalidArgument,
}

impl ErrorKind {
    /// Stable machine-readable code.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::ValidationFailure => "E_VALIDATION_FAILURE",
            Self::AuthExpired => "E_AUTH_EXPIRED",
            Self::NetworkError => "E_NETWORK",
            Self::BusinessError => "E_BUSINESS",
            Self::InvalidArgument => "E_INVALID_ARGUMENT",
        }
    }

    /// Whether repeating the same call later could plausibly succeed.
    #[must_use]
    pub fn retryable(self) -> bool {
        matches!(self, Self::NetworkError)
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
