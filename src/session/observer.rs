//! Sign-out detection for UI boundaries.
//!
//! A page or CLI holds one `PhaseObserver` and treats its sign-out edge as
//! the single trigger for sending the operator back to a login surface,
//! instead of reacting to individual failed calls.

use tokio::sync::watch;

use super::SessionPhase;

pub struct PhaseObserver {
    rx: watch::Receiver<SessionPhase>,
    last: SessionPhase,
}

impl PhaseObserver {
    pub(crate) fn new(mut rx: watch::Receiver<SessionPhase>) -> Self {
        let last = *rx.borrow_and_update();
        Self { rx, last }
    }

    /// Last phase this observer has seen.
    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.last
    }

    /// Non-blocking check: `true` exactly once for each observed transition
    /// from `Authenticated` to `Unauthenticated`.
    pub fn signed_out(&mut self) -> bool {
        if !matches!(self.rx.has_changed(), Ok(true)) {
            return false;
        }
        let next = *self.rx.borrow_and_update();
        self.advance(next)
    }

    /// Wait for the next sign-out edge. Returns `false` if the session store
    /// was dropped first.
    pub async fn next_sign_out(&mut self) -> bool {
        loop {
            if self.rx.changed().await.is_err() {
                return false;
            }
            let next = *self.rx.borrow_and_update();
            if self.advance(next) {
                return true;
            }
        }
    }

    fn advance(&mut self, next: SessionPhase) -> bool {
        let edge = self.last == SessionPhase::Authenticated && next == SessionPhase::Unauthenticated;
        self.last = next;
        edge
    }
}

#[cfg(test)]
#[path = "observer_test.rs"]
mod tests;
