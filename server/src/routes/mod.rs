//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Binds the demo admin API under `/api`. Every route except login, validate
//! and health requires a live bearer token (see `auth::AuthUser`). Wrong
//! methods fall through to Axum's 405.

pub mod auth;
pub mod catalog;
pub mod clients;
pub mod compliance;
pub mod invites;

use axum::Router;
use axum::response::Json;
use axum::routing::{get, post};
use serde_json::{Value, json};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::{AppState, SERVICE_NAME, rfc3339_now};

/// Full application router.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/validate", post(auth::validate))
        .route("/api/auth/me", get(auth::me))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/clients", get(clients::list_clients).post(clients::create_client))
        .route(
            "/api/clients/{id}",
            get(clients::get_client)
                .put(clients::update_client)
                .delete(clients::delete_client),
        )
        .route("/api/widgets", get(catalog::list_widgets))
        .route("/api/widgets/{id}", get(catalog::get_widget))
        .route("/api/workflows", get(catalog::list_workflows))
        .route("/api/workflows/{id}", get(catalog::get_workflow))
        .route("/api/compliance/dashboard", get(compliance::dashboard))
        .route("/api/compliance/audit-logs", get(compliance::audit_logs))
        .route("/api/compliance/reports", get(compliance::reports))
        .route("/api/invites/installation", post(invites::send_installation))
        .route("/api/health", get(health))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// `GET /api/health`
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": SERVICE_NAME,
        "timestamp": rfc3339_now(),
    }))
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
