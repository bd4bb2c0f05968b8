//! In-memory demo backend for the Automation Scout admin API.
//!
//! Serves the same routes as the production backend with a single demo
//! account and two seeded clients. Used for local development and as the
//! target of the client library's end-to-end tests.

pub mod error;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::app;
pub use state::AppState;

use tokio::net::TcpListener;

/// Serve `state` on an already-bound listener until the task is dropped.
///
/// # Errors
///
/// Returns the I/O error that stopped the accept loop.
pub async fn serve(listener: TcpListener, state: AppState) -> std::io::Result<()> {
    axum::serve(listener, app(state)).await
}
