//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. All
//! data lives in memory: the set of live bearer tokens, the client records
//! (each owning its widgets and workflows) and an append-only audit log.
//! Nothing survives a restart, so tokens issued by a previous process are
//! rejected.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tokio::sync::RwLock;

pub const DEMO_EMAIL: &str = "dbgillilan@gmail.com";
pub const DEMO_PASSWORD: &str = "live_business_password";
pub const TOKEN_PREFIX: &str = "demo_token_";
pub const SERVICE_NAME: &str = "AutomationScout Demo API";

// =============================================================================
// RECORDS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemoUser {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: String,
}

impl DemoUser {
    #[must_use]
    pub fn scout_master() -> Self {
        Self {
            id: "user_scout_master_001".into(),
            email: DEMO_EMAIL.into(),
            name: "David Gillilan".into(),
            role: "scout_master".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetRecord {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowRecord {
    pub id: String,
    pub name: String,
    pub triggers: u32,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
}

/// Full client record as returned by `GET /api/clients/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientRecord {
    pub id: String,
    pub name: String,
    pub email: String,
    pub status: String,
    pub plan: String,
    /// Installation package tier (`Standard`, `Professional`, `Enterprise`).
    pub package: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Opaque token naming the client's installer package.
    pub tenant_token: String,
    pub connected_since: String,
    pub last_activity: String,
    pub widgets: Vec<WidgetRecord>,
    pub workflows: Vec<WorkflowRecord>,
    pub api_calls: u64,
    pub data_processed: String,
    pub automation_hours: f64,
}

/// List view: widget and workflow collections collapse to counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientSummary {
    pub id: String,
    pub name: String,
    pub email: String,
    pub status: String,
    pub plan: String,
    pub package: String,
    pub connected_since: String,
    pub last_activity: String,
    pub widgets: usize,
    pub workflows: usize,
}

impl ClientRecord {
    #[must_use]
    pub fn summary(&self) -> ClientSummary {
        ClientSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            status: self.status.clone(),
            plan: self.plan.clone(),
            package: self.package.clone(),
            connected_since: self.connected_since.clone(),
            last_activity: self.last_activity.clone(),
            widgets: self.widgets.len(),
            workflows: self.workflows.len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditEntry {
    pub id: String,
    pub timestamp: String,
    pub action: String,
    pub actor: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
}

/// Installation invite accepted for delivery. The demo backend keeps them
/// instead of sending mail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InviteRecord {
    pub id: String,
    pub client_id: String,
    pub email: String,
    pub name: String,
    pub company: String,
    pub download_link: String,
    pub sent_at: String,
}

// =============================================================================
// APP STATE
// =============================================================================

/// Shared application state. Clone is required by Axum; every field is
/// Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<RwLock<HashSet<String>>>,
    pub clients: Arc<RwLock<BTreeMap<String, ClientRecord>>>,
    pub audit: Arc<RwLock<Vec<AuditEntry>>>,
    pub invites: Arc<RwLock<Vec<InviteRecord>>>,
    last_stamp: Arc<AtomicU64>,
}

impl AppState {
    /// State seeded with the two demo clients.
    #[must_use]
    pub fn new() -> Self {
        let clients = seed_clients()
            .into_iter()
            .map(|c| (c.id.clone(), c))
            .collect();
        Self {
            sessions: Arc::new(RwLock::new(HashSet::new())),
            clients: Arc::new(RwLock::new(clients)),
            audit: Arc::new(RwLock::new(Vec::new())),
            invites: Arc::new(RwLock::new(Vec::new())),
            last_stamp: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Millisecond stamp that never repeats within this process: the wall
    /// clock, bumped past the previous stamp when two calls share a tick.
    pub fn next_stamp(&self) -> u64 {
        let now = now_ms();
        let previous = match self
            .last_stamp
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| Some(now.max(last + 1)))
        {
            Ok(previous) | Err(previous) => previous,
        };
        now.max(previous + 1)
    }

    /// Mint and register a bearer token.
    pub async fn issue_token(&self) -> String {
        let token = format!("{TOKEN_PREFIX}{}", self.next_stamp());
        self.sessions.write().await.insert(token.clone());
        token
    }

    pub async fn is_live(&self, token: &str) -> bool {
        self.sessions.read().await.contains(token)
    }

    /// Returns whether the token was live.
    pub async fn revoke(&self, token: &str) -> bool {
        self.sessions.write().await.remove(token)
    }

    pub async fn record(&self, action: &str, client_id: Option<&str>) {
        let mut audit = self.audit.write().await;
        let entry = AuditEntry {
            id: format!("audit_{}", audit.len() + 1),
            timestamp: rfc3339_now(),
            action: action.to_owned(),
            actor: DEMO_EMAIL.to_owned(),
            client_id: client_id.map(str::to_owned),
        };
        audit.push(entry);
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// CLOCK
// =============================================================================

fn now_ms() -> u64 {
    let millis = OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;
    u64::try_from(millis).unwrap_or(0)
}

#[must_use]
pub fn rfc3339_now() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_default()
}

/// Calendar date in `YYYY-MM-DD` form.
#[must_use]
pub fn today() -> String {
    OffsetDateTime::now_utc().date().to_string()
}

// =============================================================================
// SEED DATA
// =============================================================================

fn widget(id: &str, name: &str, kind: &str, client_id: &str) -> WidgetRecord {
    WidgetRecord {
        id: id.into(),
        name: name.into(),
        kind: kind.into(),
        status: "active".into(),
        client_id: Some(client_id.into()),
    }
}

fn workflow(id: &str, name: &str, triggers: u32, client_id: &str) -> WorkflowRecord {
    WorkflowRecord {
        id: id.into(),
        name: name.into(),
        triggers,
        status: "active".into(),
        client_id: Some(client_id.into()),
    }
}

fn seed_clients() -> Vec<ClientRecord> {
    vec![
        ClientRecord {
            id: "client_001".into(),
            name: "TechCorp Solutions".into(),
            email: "admin@techcorp.com".into(),
            status: "active".into(),
            plan: "enterprise".into(),
            package: "Enterprise".into(),
            contact_name: Some("Dana Whitfield".into()),
            contact_email: Some("dana@techcorp.com".into()),
            notes: None,
            tenant_token: "tnt_techcorp_4f9a1c".into(),
            connected_since: "2024-01-15".into(),
            last_activity: "2025-10-27".into(),
            widgets: vec![
                widget("w1", "Sales Dashboard", "analytics", "client_001"),
                widget("w2", "Inventory Tracker", "data", "client_001"),
            ],
            workflows: vec![
                workflow("wf1", "Lead Processing", 5, "client_001"),
                workflow("wf2", "Order Fulfillment", 12, "client_001"),
            ],
            api_calls: 15_847,
            data_processed: "2.3 GB".into(),
            automation_hours: 47.2,
        },
        ClientRecord {
            id: "client_002".into(),
            name: "StartupXYZ".into(),
            email: "founder@startupxyz.com".into(),
            status: "active".into(),
            plan: "professional".into(),
            package: "Professional".into(),
            contact_name: None,
            contact_email: Some("founder@startupxyz.com".into()),
            notes: Some("Pilot account".into()),
            tenant_token: "tnt_startupxyz_b27e05".into(),
            connected_since: "2024-03-22".into(),
            last_activity: "2025-10-26".into(),
            widgets: vec![widget("w3", "Customer Portal", "interface", "client_002")],
            workflows: vec![workflow("wf3", "User Onboarding", 8, "client_002")],
            api_calls: 5_234,
            data_processed: "890 MB".into(),
            automation_hours: 12.5,
        },
    ]
}

#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
