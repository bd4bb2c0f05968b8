//! Client account routes.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::Deserialize;

use crate::error::ApiError;
use crate::routes::auth::AuthUser;
use crate::state::{AppState, ClientRecord, ClientSummary, today};

const DEFAULT_PACKAGE: &str = "Standard";

/// Mutable client fields. Absent fields are left unchanged on update.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub status: Option<String>,
    pub plan: Option<String>,
    pub package: Option<String>,
    pub contact_name: Option<String>,
    pub contact_email: Option<String>,
    pub notes: Option<String>,
}

/// `GET /api/clients`
pub async fn list_clients(State(state): State<AppState>, _auth: AuthUser) -> Json<Vec<ClientSummary>> {
    let clients = state.clients.read().await;
    Json(clients.values().map(ClientRecord::summary).collect())
}

/// `GET /api/clients/{id}`
pub async fn get_client(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ClientRecord>, ApiError> {
    let clients = state.clients.read().await;
    clients
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or(ApiError::NotFound("Client"))
}

/// `POST /api/clients`: create a client with no widgets or workflows and a
/// fresh tenant token for its installer package.
pub async fn create_client(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(input): Json<ClientInput>,
) -> Result<(StatusCode, Json<ClientRecord>), ApiError> {
    let name = non_blank(input.name).ok_or_else(|| ApiError::BadRequest("Client name is required".into()))?;
    let date = today();
    let stamp = state.next_stamp();
    let contact_email = non_blank(input.contact_email);
    let record = ClientRecord {
        id: format!("client_{stamp}"),
        name,
        email: non_blank(input.email)
            .or_else(|| contact_email.clone())
            .unwrap_or_default(),
        status: non_blank(input.status).unwrap_or_else(|| "active".into()),
        plan: non_blank(input.plan).unwrap_or_else(|| "starter".into()),
        package: non_blank(input.package).unwrap_or_else(|| DEFAULT_PACKAGE.into()),
        contact_name: non_blank(input.contact_name),
        contact_email,
        notes: non_blank(input.notes),
        tenant_token: format!("tnt_{stamp:x}"),
        connected_since: date.clone(),
        last_activity: date,
        widgets: Vec::new(),
        workflows: Vec::new(),
        api_calls: 0,
        data_processed: "0 MB".into(),
        automation_hours: 0.0,
    };
    state.clients.write().await.insert(record.id.clone(), record.clone());
    state.record("client.create", Some(&record.id)).await;
    tracing::info!(client_id = %record.id, "client created");
    Ok((StatusCode::CREATED, Json(record)))
}

/// `PUT /api/clients/{id}`: apply the present fields.
pub async fn update_client(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<String>,
    Json(input): Json<ClientInput>,
) -> Result<Json<ClientRecord>, ApiError> {
    let updated = {
        let mut clients = state.clients.write().await;
        let record = clients.get_mut(&id).ok_or(ApiError::NotFound("Client"))?;
        if let Some(name) = input.name {
            if name.trim().is_empty() {
                return Err(ApiError::BadRequest("Client name cannot be blank".into()));
            }
            record.name = name;
        }
        if let Some(email) = input.email {
            record.email = email;
        }
        if let Some(status) = non_blank(input.status) {
            record.status = status;
        }
        if let Some(plan) = non_blank(input.plan) {
            record.plan = plan;
        }
        if let Some(package) = non_blank(input.package) {
            record.package = package;
        }
        if input.contact_name.is_some() {
            record.contact_name = non_blank(input.contact_name);
        }
        if input.contact_email.is_some() {
            record.contact_email = non_blank(input.contact_email);
        }
        if input.notes.is_some() {
            record.notes = non_blank(input.notes);
        }
        record.last_activity = today();
        record.clone()
    };

    state.record("client.update", Some(&id)).await;
    Ok(Json(updated))
}

/// `DELETE /api/clients/{id}`
pub async fn delete_client(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let removed = state.clients.write().await.remove(&id);
    if removed.is_none() {
        return Err(ApiError::NotFound("Client"));
    }
    state.record("client.delete", Some(&id)).await;
    tracing::info!(client_id = %id, "client deleted");
    Ok(StatusCode::NO_CONTENT)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
#[path = "clients_test.rs"]
mod tests;
