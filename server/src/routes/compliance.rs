//! Compliance dashboard, audit log and report routes.

use axum::extract::{Query, State};
use axum::response::Json;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::routes::auth::AuthUser;
use crate::state::{AppState, rfc3339_now};

pub const DEFAULT_PAGE_SIZE: usize = 20;
pub const MAX_PAGE_SIZE: usize = 100;

#[derive(Debug, Default, Deserialize)]
pub struct AuditQuery {
    pub page: Option<usize>,
    pub limit: Option<usize>,
    pub client_id: Option<String>,
    pub action: Option<String>,
}

/// `GET /api/compliance/dashboard`
pub async fn dashboard(State(state): State<AppState>, _auth: AuthUser) -> Json<Value> {
    let clients = state.clients.read().await;
    let active = clients.values().filter(|c| c.status == "active").count();
    let widgets: usize = clients.values().map(|c| c.widgets.len()).sum();
    let workflows: usize = clients.values().map(|c| c.workflows.len()).sum();
    let audit_events = state.audit.read().await.len();

    Json(json!({
        "totalClients": clients.len(),
        "activeClients": active,
        "totalWidgets": widgets,
        "totalWorkflows": workflows,
        "auditEvents": audit_events,
        "generatedAt": rfc3339_now(),
    }))
}

/// `GET /api/compliance/audit-logs`: newest first, filtered then paged.
pub async fn audit_logs(State(state): State<AppState>, _auth: AuthUser, Query(query): Query<AuditQuery>) -> Json<Value> {
    let page = query.page.unwrap_or(1).max(1);
    let limit = query.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);

    let audit = state.audit.read().await;
    let matching: Vec<_> = audit
        .iter()
        .rev()
        .filter(|e| query.client_id.as_ref().is_none_or(|id| e.client_id.as_ref() == Some(id)))
        .filter(|e| query.action.as_ref().is_none_or(|a| &e.action == a))
        .collect();
    let logs: Vec<_> = matching
        .iter()
        .skip((page - 1).saturating_mul(limit))
        .take(limit)
        .collect();

    Json(json!({
        "logs": logs,
        "page": page,
        "limit": limit,
        "total": matching.len(),
    }))
}

/// `GET /api/compliance/reports`
pub async fn reports(State(state): State<AppState>, _auth: AuthUser) -> Json<Value> {
    let clients = state.clients.read().await;
    let reports: Vec<Value> = clients
        .values()
        .map(|c| {
            json!({
                "id": format!("report_{}", c.id),
                "clientId": c.id,
                "name": format!("{} data processing summary", c.name),
                "apiCalls": c.api_calls,
                "dataProcessed": c.data_processed,
                "automationHours": c.automation_hours,
                "status": "ready",
            })
        })
        .collect();

    Json(json!({ "reports": reports, "generatedAt": rfc3339_now() }))
}

#[cfg(test)]
#[path = "compliance_test.rs"]
mod tests;
