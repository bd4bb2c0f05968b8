//! Session and authenticated-request pipeline for the AutomationScout admin
//! dashboard.
//!
//! SYSTEM CONTEXT
//! ==============
//! `session` owns the bearer credential and the authentication phase.
//! `gateway` is the only path to protected backend resources: it injects the
//! current credential at dispatch time and turns a 401 into a phase change.
//! `transport` is the raw HTTP seam both of them sit on. Pages, CLIs and other
//! UI boundaries observe the session phase and decide where to navigate.

pub mod config;
pub mod error;
pub mod gateway;
pub mod session;
pub mod transport;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use config::GatewayConfig;
pub use error::ErrorKind;
pub use gateway::{ApiResponse, Gateway, GatewayError};
pub use session::{Credential, SessionError, SessionPhase, SessionStore, User};
pub use transport::{HttpTransport, Transport, TransportError};
