//! Session store: the single owner of the bearer credential and the
//! authentication phase.
//!
//! ARCHITECTURE
//! ============
//! `SessionStore` is a cheap `Clone` handle around shared state. Pages, the
//! gateway and the CLI all hold a handle to the same instance; nothing else
//! writes the credential. Phase changes are published on a `watch` channel
//! so UI boundaries can react (e.g. navigate to a login surface) without
//! the store knowing about navigation.
//!
//! CONCURRENCY
//! ===========
//! - `initialize`, `login` and `logout` serialize on an async transition
//!   gate, so a validation round-trip can never race a user login.
//! - `invalidate` does not take the gate. It is tag-checked instead: it only
//!   tears down the session when the rejected request was sent under the
//!   credential that is still current. N concurrent 401s therefore produce
//!   exactly one transition and one storage clear.
//! - The state mutex is synchronous and never held across an `.await`.

pub mod observer;
pub mod storage;
pub mod types;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::Deserialize;
use serde_json::{Value, json};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::transport::{Method, Transport, WireRequest, WireResponse};
pub use observer::PhaseObserver;
pub use storage::{CredentialStorage, FileStorage, MemoryStorage, StorageError};
pub use types::{Credential, CredentialTag, SessionError, SessionPhase, User};
use types::{LOGIN_FAILED_MESSAGE, SESSION_REJECTED_MESSAGE, SessionState};

pub const LOGIN_PATH: &str = "/api/auth/login";
pub const LOGOUT_PATH: &str = "/api/auth/logout";
pub const VALIDATE_PATH: &str = "/api/auth/validate";

struct Inner {
    state: SessionState,
    next_tag: u64,
}

struct Shared {
    transport: Arc<dyn Transport>,
    storage: Arc<dyn CredentialStorage>,
    inner: Mutex<Inner>,
    phase_tx: watch::Sender<SessionPhase>,
    gate: tokio::sync::Mutex<()>,
}

/// Shared handle to the session. Clones refer to the same session.
#[derive(Clone)]
pub struct SessionStore {
    shared: Arc<Shared>,
}

impl SessionStore {
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>, storage: Arc<dyn CredentialStorage>) -> Self {
        let (phase_tx, _) = watch::channel(SessionPhase::Unknown);
        Self {
            shared: Arc::new(Shared {
                transport,
                storage,
                inner: Mutex::new(Inner { state: SessionState::Unknown, next_tag: 1 }),
                phase_tx,
                gate: tokio::sync::Mutex::new(()),
            }),
        }
    }

    // =========================================================================
    // READ ACCESS
    // =========================================================================

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.lock().state.phase()
    }

    #[must_use]
    pub fn credential(&self) -> Option<Credential> {
        self.lock().state.credential().cloned()
    }

    #[must_use]
    pub fn user(&self) -> Option<User> {
        self.lock()
            .state
            .credential()
            .and_then(|c| c.user().cloned())
    }

    /// Receive every phase change. The receiver starts at the current phase.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionPhase> {
        self.shared.phase_tx.subscribe()
    }

    /// Observer that fires once per authenticated -> unauthenticated edge.
    #[must_use]
    pub fn observe(&self) -> PhaseObserver {
        PhaseObserver::new(self.subscribe())
    }

    pub(crate) fn transport(&self) -> Arc<dyn Transport> {
        Arc::clone(&self.shared.transport)
    }

    /// Token and tag to attach to a request being dispatched right now.
    pub(crate) fn dispatch_credential(&self) -> Option<(String, CredentialTag)> {
        self.lock()
            .state
            .credential()
            .map(|c| (c.token().to_owned(), c.tag()))
    }

    // =========================================================================
    // TRANSITIONS
    // =========================================================================

    /// Restore a persisted credential, validating it with the backend.
    ///
    /// Resolves immediately with the current phase once the store has left
    /// `Unknown`; a second caller arriving during validation waits on the
    /// gate and observes the first attempt's outcome.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationFailure` when the backend rejects the persisted
    /// token and a `NetworkError` when validation could not complete. In both
    /// cases the persisted token is cleared and the phase is `Unauthenticated`.
    pub async fn initialize(&self) -> Result<SessionPhase, SessionError> {
        let _gate = self.shared.gate.lock().await;

        let phase = self.phase();
        if phase != SessionPhase::Unknown {
            return Ok(phase);
        }

        let token = match self.shared.storage.load() {
            Ok(Some(token)) => token,
            Ok(None) => {
                self.transition(SessionState::Unauthenticated);
                return Ok(SessionPhase::Unauthenticated);
            }
            Err(e) => {
                warn!(error = %e, "persisted credential unreadable; discarding");
                self.clear_persisted();
                self.transition(SessionState::Unauthenticated);
                return Ok(SessionPhase::Unauthenticated);
            }
        };

        self.transition(SessionState::Validating);
        let validating = ValidatingGuard { store: self };

        let request = WireRequest::new(Method::POST, VALIDATE_PATH)
            .with_bearer(token.clone())
            .with_body(json!({ "token": token }));
        let outcome = self.shared.transport.send(request).await;
        validating.disarm();

        match outcome {
            Ok(response) if response.is_success() => {
                let user = parse_validated_user(&response.body);
                self.install(token, user);
                Ok(SessionPhase::Authenticated)
            }
            Ok(response) => {
                info!(status = response.status, "persisted credential rejected");
                self.clear_persisted();
                self.transition(SessionState::Unauthenticated);
                Err(SessionError::validation(response.message().unwrap_or(SESSION_REJECTED_MESSAGE)))
            }
            Err(e) => {
                warn!(error = %e, "credential validation failed");
                self.clear_persisted();
                self.transition(SessionState::Unauthenticated);
                Err(e.into())
            }
        }
    }

    /// Exchange `identifier`/`secret` for a credential.
    ///
    /// Calling this while already authenticated keeps the live session and
    /// returns its credential.
    ///
    /// # Errors
    ///
    /// Failures are data, not faults: a `ValidationFailure` carrying the
    /// backend message (or "Login failed"), or a `NetworkError` with the
    /// generic "Network error" message. The phase is `Unauthenticated`
    /// afterwards.
    pub async fn login(&self, identifier: &str, secret: &str) -> Result<Credential, SessionError> {
        let _gate = self.shared.gate.lock().await;

        if let Some(existing) = self.credential() {
            debug!("login while authenticated; keeping current session");
            return Ok(existing);
        }

        if identifier.trim().is_empty() || secret.is_empty() {
            self.transition(SessionState::Unauthenticated);
            return Err(SessionError::validation("Email and password are required"));
        }

        let request = WireRequest::new(Method::POST, LOGIN_PATH)
            .with_body(json!({ "email": identifier.trim(), "password": secret }));

        let result = match self.shared.transport.send(request).await {
            Ok(response) => parse_login(&response),
            Err(e) => {
                warn!(error = %e, "login request failed");
                Err(e.into())
            }
        };

        match result {
            Ok(LoginGrant { token, user }) => {
                if let Err(e) = self.shared.storage.save(&token) {
                    warn!(error = %e, "failed to persist credential");
                }
                Ok(self.install(token, user))
            }
            Err(e) => {
                self.transition(SessionState::Unauthenticated);
                Err(e)
            }
        }
    }

    /// End the session. Local teardown always happens; the backend is told
    /// afterwards on a best-effort basis and its answer is ignored.
    pub async fn logout(&self) {
        // The gate covers local teardown only; the notification below runs
        // without it so queued transitions are not held up by the backend.
        let previous = {
            let _gate = self.shared.gate.lock().await;
            let mut inner = self.lock();
            if inner.state.phase() == SessionPhase::Unauthenticated {
                return;
            }
            let previous = inner.state.credential().cloned();
            self.clear_persisted();
            self.apply(&mut inner, SessionState::Unauthenticated);
            previous
        };

        let Some(credential) = previous else {
            return;
        };
        info!("logged out");

        let request = WireRequest::new(Method::POST, LOGOUT_PATH).with_bearer(credential.token());
        match self.shared.transport.send(request).await {
            Ok(response) if !response.is_success() => {
                debug!(status = response.status, "backend logout not acknowledged");
            }
            Ok(_) => {}
            Err(e) => debug!(error = %e, "backend logout notification failed"),
        }
    }

    /// Tear down the session after a request sent under `tag` got a 401.
    ///
    /// Returns `true` when this call performed the transition. A stale tag
    /// (the session has since been replaced or already torn down) is a no-op.
    pub fn invalidate(&self, tag: CredentialTag) -> bool {
        let mut inner = self.lock();
        let current = inner.state.credential().map(Credential::tag);
        if current != Some(tag) {
            debug!(?tag, ?current, "stale invalidation ignored");
            return false;
        }
        self.clear_persisted();
        self.apply(&mut inner, SessionState::Unauthenticated);
        info!("session invalidated by backend rejection");
        true
    }

    // =========================================================================
    // HELPERS
    // =========================================================================

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.shared
            .inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn install(&self, token: String, user: Option<User>) -> Credential {
        let mut inner = self.lock();
        let tag = CredentialTag(inner.next_tag);
        inner.next_tag += 1;
        let credential = types::Credential::new(token, user, tag);
        self.apply(&mut inner, SessionState::Authenticated(credential.clone()));
        credential
    }

    fn transition(&self, next: SessionState) {
        let mut inner = self.lock();
        self.apply(&mut inner, next);
    }

    fn apply(&self, inner: &mut Inner, next: SessionState) {
        let phase = next.phase();
        inner.state = next;
        let changed = self.shared.phase_tx.send_if_modified(|current| {
            if *current == phase {
                false
            } else {
                *current = phase;
                true
            }
        });
        if changed {
            info!(%phase, "session phase changed");
        }
    }

    fn clear_persisted(&self) {
        if let Err(e) = self.shared.storage.clear() {
            warn!(error = %e, "failed to clear persisted credential");
        }
    }
}

/// Resets `Validating` back to `Unknown` if `initialize()` is dropped
/// mid-flight, so a later call can retry instead of seeing a stuck phase.
struct ValidatingGuard<'a> {
    store: &'a SessionStore,
}

impl ValidatingGuard<'_> {
    fn disarm(self) {
        std::mem::forget(self);
    }
}

impl Drop for ValidatingGuard<'_> {
    fn drop(&mut self) {
        let mut inner = self.store.lock();
        if inner.state.phase() == SessionPhase::Validating {
            self.store.apply(&mut inner, SessionState::Unknown);
        }
    }
}

// =============================================================================
// RESPONSE PARSING
// =============================================================================

struct LoginGrant {
    token: String,
    user: Option<User>,
}

#[derive(Deserialize)]
struct LoginBody {
    #[serde(default)]
    success: Option<bool>,
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    user: Option<User>,
}

fn parse_login(response: &WireResponse) -> Result<LoginGrant, SessionError> {
    if !response.is_success() {
        return Err(SessionError::validation(response.message().unwrap_or(LOGIN_FAILED_MESSAGE)));
    }
    let Ok(body) = serde_json::from_value::<LoginBody>(response.body.clone()) else {
        return Err(SessionError::validation(LOGIN_FAILED_MESSAGE));
    };
    match body {
        LoginBody { success: Some(false), .. } => {
            Err(SessionError::validation(response.message().unwrap_or(LOGIN_FAILED_MESSAGE)))
        }
        LoginBody { token: Some(token), user, .. } if !token.is_empty() => Ok(LoginGrant { token, user }),
        _ => Err(SessionError::validation(LOGIN_FAILED_MESSAGE)),
    }
}

/// Validation answers `{user}`; some backends answer with the bare user.
fn parse_validated_user(body: &Value) -> Option<User> {
    let candidate = body.get("user").unwrap_or(body);
    match serde_json::from_value::<User>(candidate.clone()) {
        Ok(user) => Some(user),
        Err(_) => None,
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
