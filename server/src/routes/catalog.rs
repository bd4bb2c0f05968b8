//! Widget and workflow catalog routes. Both are read-only views over the
//! client records.

use axum::extract::{Path, State};
use axum::response::Json;

use crate::error::ApiError;
use crate::routes::auth::AuthUser;
use crate::state::{AppState, WidgetRecord, WorkflowRecord};

/// `GET /api/widgets`
pub async fn list_widgets(State(state): State<AppState>, _auth: AuthUser) -> Json<Vec<WidgetRecord>> {
    let clients = state.clients.read().await;
    Json(clients.values().flat_map(|c| c.widgets.iter().cloned()).collect())
}

/// `GET /api/widgets/{id}`
pub async fn get_widget(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<WidgetRecord>, ApiError> {
    let clients = state.clients.read().await;
    clients
        .values()
        .flat_map(|c| c.widgets.iter())
        .find(|w| w.id == id)
        .cloned()
        .map(Json)
        .ok_or(ApiError::NotFound("Widget"))
}

/// `GET /api/workflows`
pub async fn list_workflows(State(state): State<AppState>, _auth: AuthUser) -> Json<Vec<WorkflowRecord>> {
    let clients = state.clients.read().await;
    Json(clients.values().flat_map(|c| c.workflows.iter().cloned()).collect())
}

/// `GET /api/workflows/{id}`
pub async fn get_workflow(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<WorkflowRecord>, ApiError> {
    let clients = state.clients.read().await;
    clients
        .values()
        .flat_map(|c| c.workflows.iter())
        .find(|w| w.id == id)
        .cloned()
        .map(Json)
        .ok_or(ApiError::NotFound("Workflow"))
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
