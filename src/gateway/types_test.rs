use super::*;
use serde_json::json;

// =============================================================================
// ClientSummary / ClientDetail
// =============================================================================

#[test]
fn client_summary_from_backend_json() {
    let summary: ClientSummary = serde_json::from_value(json!({
        "id": "client_001",
        "name": "TechCorp Solutions",
        "email": "admin@techcorp.com",
        "status": "active",
        "plan": "enterprise",
        "connectedSince": "2024-01-15",
        "lastActivity": "2025-10-27",
        "widgets": 12,
        "workflows": 8
    }))
    .unwrap();
    assert_eq!(summary.name, "TechCorp Solutions");
    assert_eq!(summary.connected_since.as_deref(), Some("2024-01-15"));
    assert_eq!(summary.widgets, 12);
}

#[test]
fn client_summary_sparse_record() {
    let summary: ClientSummary =
        serde_json::from_value(json!({ "id": "client_9", "name": "Fresh" })).unwrap();
    assert_eq!(summary.widgets, 0);
    assert!(summary.plan.is_empty());
    assert!(summary.last_activity.is_none());
}

#[test]
fn client_detail_nested_collections() {
    let detail: ClientDetail = serde_json::from_value(json!({
        "id": "client_002",
        "name": "StartupXYZ",
        "widgets": [{ "id": "w3", "name": "Customer Portal", "type": "interface", "status": "active" }],
        "workflows": [{ "id": "wf3", "name": "User Onboarding", "triggers": 8, "status": "active" }],
        "apiCalls": 5234,
        "dataProcessed": "890 MB",
        "automationHours": 12.5
    }))
    .unwrap();
    assert_eq!(detail.widgets[0].kind, "interface");
    assert_eq!(detail.workflows[0].triggers, 8);
    assert_eq!(detail.api_calls, 5234);
    assert!((detail.automation_hours - 12.5).abs() < f64::EPSILON);
}

// =============================================================================
// ClientFields
// =============================================================================

#[test]
fn client_fields_omit_unset() {
    let fields = ClientFields { name: Some("Acme".into()), ..ClientFields::default() };
    assert_eq!(serde_json::to_value(&fields).unwrap(), json!({ "name": "Acme" }));
}

#[test]
fn client_fields_is_empty() {
    assert!(ClientFields::default().is_empty());
    assert!(!ClientFields { plan: Some("starter".into()), ..ClientFields::default() }.is_empty());
    assert!(!ClientFields { notes: Some("call first".into()), ..ClientFields::default() }.is_empty());
}

#[test]
fn client_fields_contact_keys_are_camel_case() {
    let fields = ClientFields {
        contact_name: Some("Riley".into()),
        contact_email: Some("riley@acme.test".into()),
        ..ClientFields::default()
    };
    assert_eq!(
        serde_json::to_value(&fields).unwrap(),
        json!({ "contactName": "Riley", "contactEmail": "riley@acme.test" })
    );
}

// =============================================================================
// InviteRequest
// =============================================================================

fn invitable(contact_name: Option<&str>, contact_email: Option<&str>) -> ClientDetail {
    serde_json::from_value(json!({
        "id": "client_001",
        "name": "TechCorp Solutions",
        "email": "admin@techcorp.com",
        "contactName": contact_name,
        "contactEmail": contact_email,
        "tenantToken": "tnt_techcorp_4f9a1c"
    }))
    .unwrap()
}

#[test]
fn invite_targets_contact_and_links_package() {
    let invite = InviteRequest::for_client(&invitable(Some("Dana"), Some("dana@techcorp.com"))).unwrap();
    assert_eq!(invite.email, "dana@techcorp.com");
    assert_eq!(invite.name, "Dana");
    assert_eq!(invite.company, "TechCorp Solutions");
    assert_eq!(invite.download_link, "https://install.automationscout.com/packages/tnt_techcorp_4f9a1c");

    let json = serde_json::to_value(&invite).unwrap();
    assert_eq!(json["downloadLink"], invite.download_link);
    assert_eq!(json["clientId"], "client_001");
}

#[test]
fn invite_falls_back_to_account_email_and_generic_name() {
    let invite = InviteRequest::for_client(&invitable(None, Some(" "))).unwrap();
    assert_eq!(invite.email, "admin@techcorp.com");
    assert_eq!(invite.name, DEFAULT_INVITEE_NAME);
}

#[test]
fn invite_needs_tenant_token_and_address() {
    let mut client = invitable(None, None);
    client.tenant_token = None;
    assert!(InviteRequest::for_client(&client).is_none());

    let mut client = invitable(None, None);
    client.email.clear();
    assert!(InviteRequest::for_client(&client).is_none());
}

// =============================================================================
// Widget
// =============================================================================

#[test]
fn widget_type_field_renamed() {
    let widget = Widget {
        id: "w1".into(),
        name: "Sales Dashboard".into(),
        kind: "analytics".into(),
        status: "active".into(),
        client_id: Some("client_001".into()),
    };
    let json = serde_json::to_value(&widget).unwrap();
    assert_eq!(json["type"], "analytics");
    assert_eq!(json["clientId"], "client_001");
    assert!(json.get("kind").is_none());
}

// =============================================================================
// AuditLogQuery
// =============================================================================

#[test]
fn audit_log_query_empty() {
    assert!(AuditLogQuery::default().to_pairs().is_empty());
}

#[test]
fn audit_log_query_pairs_in_order() {
    let query = AuditLogQuery {
        page: Some(2),
        limit: Some(50),
        client_id: Some("client_001".into()),
        action: Some("login".into()),
    };
    let pairs = query.to_pairs();
    let keys: Vec<&str> = pairs.iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(keys, ["page", "limit", "client_id", "action"]);
    assert_eq!(pairs[1].1, "50");
}

// =============================================================================
// Health
// =============================================================================

#[test]
fn health_without_service() {
    let health: Health =
        serde_json::from_value(json!({ "status": "healthy", "timestamp": "2025-10-27T00:00:00Z" })).unwrap();
    assert_eq!(health.status, "healthy");
    assert!(health.service.is_none());
}
