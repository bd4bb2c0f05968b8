use super::*;
use crate::state::DemoUser;

fn auth() -> AuthUser {
    AuthUser { user: DemoUser::scout_master(), token: "demo_token_test".into() }
}

async fn seeded_audit() -> AppState {
    let state = AppState::new();
    state.record("login", None).await;
    for _ in 0..3 {
        state.record("client.update", Some("client_001")).await;
    }
    state.record("client.delete", Some("client_002")).await;
    state
}

#[tokio::test]
async fn dashboard_totals_seed_data() {
    let Json(body) = dashboard(State(AppState::new()), auth()).await;
    assert_eq!(body["totalClients"], 2);
    assert_eq!(body["activeClients"], 2);
    assert_eq!(body["totalWidgets"], 3);
    assert_eq!(body["totalWorkflows"], 3);
}

#[tokio::test]
async fn audit_logs_are_newest_first() {
    let state = seeded_audit().await;
    let Json(body) = audit_logs(State(state), auth(), Query(AuditQuery::default())).await;
    assert_eq!(body["total"], 5);
    assert_eq!(body["logs"][0]["action"], "client.delete");
    assert_eq!(body["page"], 1);
    assert_eq!(body["limit"], DEFAULT_PAGE_SIZE);
}

#[tokio::test]
async fn audit_logs_filter_and_page() {
    let state = seeded_audit().await;
    let query = AuditQuery {
        page: Some(2),
        limit: Some(2),
        client_id: Some("client_001".into()),
        action: None,
    };
    let Json(body) = audit_logs(State(state), auth(), Query(query)).await;
    assert_eq!(body["total"], 3);
    assert_eq!(body["logs"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn audit_logs_clamp_paging() {
    let state = seeded_audit().await;
    let query = AuditQuery { page: Some(0), limit: Some(10_000), ..AuditQuery::default() };
    let Json(body) = audit_logs(State(state), auth(), Query(query)).await;
    assert_eq!(body["page"], 1);
    assert_eq!(body["limit"], MAX_PAGE_SIZE);
}

#[tokio::test]
async fn audit_logs_filter_by_action() {
    let state = seeded_audit().await;
    let query = AuditQuery { action: Some("login".into()), ..AuditQuery::default() };
    let Json(body) = audit_logs(State(state), auth(), Query(query)).await;
    assert_eq!(body["total"], 1);
}

#[tokio::test]
async fn reports_cover_each_client() {
    let Json(body) = reports(State(AppState::new()), auth()).await;
    let reports = body["reports"].as_array().unwrap();
    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0]["clientId"], "client_001");
}
