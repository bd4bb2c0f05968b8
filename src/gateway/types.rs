//! Backend resource DTOs.
//!
//! DESIGN
//! ======
//! Field names follow the backend's camelCase JSON. Anything the dashboard
//! can live without is defaulted so a sparse record still decodes.

use serde::{Deserialize, Serialize};

/// One row of `GET /api/clients`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientSummary {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: String,
    /// Lifecycle status (e.g. `"active"`).
    #[serde(default)]
    pub status: String,
    /// Subscription plan (e.g. `"enterprise"`).
    #[serde(default)]
    pub plan: String,
    /// Installation package tier (e.g. `"Standard"`).
    #[serde(default)]
    pub package: Option<String>,
    /// `YYYY-MM-DD` date the client was onboarded.
    #[serde(default)]
    pub connected_since: Option<String>,
    #[serde(default)]
    pub last_activity: Option<String>,
    /// Number of installed widgets.
    #[serde(default)]
    pub widgets: u32,
    /// Number of configured workflows.
    #[serde(default)]
    pub workflows: u32,
}

/// Full record from `GET /api/clients/{id}`, including usage metrics.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientDetail {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub plan: String,
    #[serde(default)]
    pub package: Option<String>,
    #[serde(default)]
    pub contact_name: Option<String>,
    #[serde(default)]
    pub contact_email: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    /// Names the client's installer package; see [`InviteRequest::for_client`].
    #[serde(default)]
    pub tenant_token: Option<String>,
    #[serde(default)]
    pub connected_since: Option<String>,
    #[serde(default)]
    pub last_activity: Option<String>,
    #[serde(default)]
    pub widgets: Vec<Widget>,
    #[serde(default)]
    pub workflows: Vec<Workflow>,
    #[serde(default)]
    pub api_calls: u64,
    /// Human-formatted volume, e.g. `"2.3 GB"`.
    #[serde(default)]
    pub data_processed: Option<String>,
    #[serde(default)]
    pub automation_hours: f64,
}

/// Writable client fields for create/update. Unset fields are omitted.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl ClientFields {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        [
            &self.name,
            &self.email,
            &self.status,
            &self.plan,
            &self.package,
            &self.contact_name,
            &self.contact_email,
            &self.notes,
        ]
        .iter()
        .all(|field| field.is_none())
    }
}

// =============================================================================
// INVITES
// =============================================================================

/// Where installer packages are published, keyed by tenant token.
pub const INSTALL_PACKAGES_URL: &str = "https://install.automationscout.com/packages";

/// Greeting name used when a client has no contact name on file.
pub const DEFAULT_INVITEE_NAME: &str = "Valued Client";

/// Body of `POST /api/invites/installation`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InviteRequest {
    pub email: String,
    pub name: String,
    pub company: String,
    pub download_link: String,
    pub client_id: String,
}

impl InviteRequest {
    /// Invite addressed to the client's contact, falling back to the account
    /// email. `None` when there is no address or no tenant token to link to.
    #[must_use]
    pub fn for_client(client: &ClientDetail) -> Option<Self> {
        let email = client
            .contact_email
            .as_deref()
            .filter(|e| !e.trim().is_empty())
            .or_else(|| Some(client.email.as_str()).filter(|e| !e.trim().is_empty()))?;
        let tenant_token = client.tenant_token.as_deref().filter(|t| !t.trim().is_empty())?;
        let name = client
            .contact_name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(DEFAULT_INVITEE_NAME);
        Some(Self {
            email: email.trim().to_owned(),
            name: name.to_owned(),
            company: client.name.clone(),
            download_link: download_link(tenant_token),
            client_id: client.id.clone(),
        })
    }
}

#[must_use]
pub fn download_link(tenant_token: &str) -> String {
    format!("{INSTALL_PACKAGES_URL}/{tenant_token}")
}

/// Backend acknowledgement of a queued invite.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InviteReceipt {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub invite_id: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Widget {
    pub id: String,
    pub name: String,
    /// Widget category (`"analytics"`, `"data"`, `"interface"`, ...).
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workflow {
    pub id: String,
    pub name: String,
    /// Number of triggers wired to this workflow.
    #[serde(default)]
    pub triggers: u32,
    #[serde(default)]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
}

/// Query parameters for `GET /api/compliance/audit-logs`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuditLogQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub client_id: Option<String>,
    pub action: Option<String>,
}

impl AuditLogQuery {
    /// Wire query pairs, skipping unset filters.
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(page) = self.page {
            pairs.push(("page".to_owned(), page.to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit".to_owned(), limit.to_string()));
        }
        if let Some(client_id) = &self.client_id {
            pairs.push(("client_id".to_owned(), client_id.clone()));
        }
        if let Some(action) = &self.action {
            pairs.push(("action".to_owned(), action.clone()));
        }
        pairs
    }
}

/// Liveness answer from `GET /api/health`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    pub status: String,
    /// RFC 3339 timestamp from the backend clock.
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
