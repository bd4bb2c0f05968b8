use super::*;
use crate::state::DemoUser;

fn auth() -> AuthUser {
    AuthUser { user: DemoUser::scout_master(), token: "demo_token_test".into() }
}

fn invite_for(client_id: &str) -> InviteInput {
    InviteInput {
        email: "dana@techcorp.com".into(),
        name: "Dana Whitfield".into(),
        company: "TechCorp Solutions".into(),
        download_link: "https://install.automationscout.com/packages/tnt_techcorp_4f9a1c".into(),
        client_id: client_id.into(),
    }
}

#[tokio::test]
async fn invite_is_accepted_and_audited() {
    let state = AppState::new();
    let (status, Json(accepted)) = send_installation(State(state.clone()), auth(), Json(invite_for("client_001")))
        .await
        .unwrap();

    assert_eq!(status, StatusCode::ACCEPTED);
    assert!(accepted.success);
    assert_eq!(accepted.message, "Installation invite sent to dana@techcorp.com");

    let invites = state.invites.read().await;
    assert_eq!(invites.len(), 1);
    assert_eq!(invites[0].id, accepted.invite_id);
    assert_eq!(invites[0].company, "TechCorp Solutions");

    let audit = state.audit.read().await;
    assert_eq!(audit[0].action, "invite.installation");
    assert_eq!(audit[0].client_id.as_deref(), Some("client_001"));
}

#[tokio::test]
async fn invite_for_unknown_client_is_not_found() {
    let state = AppState::new();
    let err = send_installation(State(state.clone()), auth(), Json(invite_for("client_999")))
        .await
        .err();
    assert_eq!(err, Some(ApiError::NotFound("Client")));
    assert!(state.invites.read().await.is_empty());
}

#[tokio::test]
async fn invite_requires_email_and_link() {
    let state = AppState::new();
    let no_email = InviteInput { email: " ".into(), ..invite_for("client_001") };
    let no_link = InviteInput { download_link: String::new(), ..invite_for("client_001") };

    for input in [no_email, no_link] {
        let err = send_installation(State(state.clone()), auth(), Json(input)).await.err();
        assert!(matches!(err, Some(ApiError::BadRequest(_))));
    }
    assert!(state.audit.read().await.is_empty());
}
