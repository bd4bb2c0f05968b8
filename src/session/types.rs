//! Session data model: identity, credential, phase, and login failures.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ErrorKind;
use crate::transport::TransportError;

/// Decoded identity returned by the backend with a token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub role: String,
}

/// Identity of one installed credential. Every successful login or
/// validation mints a fresh tag, so a response can be matched to the
/// credential it was sent under even when the token text repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CredentialTag(pub(crate) u64);

/// Bearer token plus the identity it was issued for.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    token: String,
    user: Option<User>,
    tag: CredentialTag,
}

impl Credential {
    pub(crate) fn new(token: String, user: Option<User>, tag: CredentialTag) -> Self {
        Self { token, user, tag }
    }

    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    #[must_use]
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    #[must_use]
    pub fn tag(&self) -> CredentialTag {
        self.tag
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("token", &"<redacted>")
            .field("user", &self.user)
            .field("tag", &self.tag)
            .finish()
    }
}

/// Authentication phase observed by UI boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    /// Before the first `initialize()` resolves.
    Unknown,
    /// A validation round-trip for a persisted token is in flight.
    Validating,
    Authenticated,
    Unauthenticated,
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Unknown => "unknown",
            Self::Validating => "validating",
            Self::Authenticated => "authenticated",
            Self::Unauthenticated => "unauthenticated",
        };
        f.write_str(s)
    }
}

/// Internal state. The credential lives inside the `Authenticated` variant,
/// so "credential present iff authenticated" holds by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SessionState {
    Unknown,
    Validating,
    Authenticated(Credential),
    Unauthenticated,
}

impl SessionState {
    pub(crate) fn phase(&self) -> SessionPhase {
        match self {
            Self::Unknown => SessionPhase::Unknown,
            Self::Validating => SessionPhase::Validating,
            Self::Authenticated(_) => SessionPhase::Authenticated,
            Self::Unauthenticated => SessionPhase::Unauthenticated,
        }
    }

    pub(crate) fn credential(&self) -> Option<&Credential> {
        match self {
            Self::Authenticated(credential) => Some(credential),
            _ => None,
        }
    }
}

pub(crate) const NETWORK_ERROR_MESSAGE: &str = "Network error";
pub(crate) const LOGIN_FAILED_MESSAGE: &str = "Login failed";
pub(crate) const SESSION_REJECTED_MESSAGE: &str = "Session is no longer valid";

/// Failure reported as data by `login()` and `initialize()`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct SessionError {
    pub kind: ErrorKind,
    pub message: String,
}

impl SessionError {
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self { kind: ErrorKind::ValidationFailure, message: message.into() }
    }

    #[must_use]
    pub fn network() -> Self {
        Self { kind: ErrorKind::NetworkError, message: NETWORK_ERROR_MESSAGE.to_owned() }
    }

    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }
}

impl From<TransportError> for SessionError {
    fn from(_: TransportError) -> Self {
        Self::network()
    }
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
