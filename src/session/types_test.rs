use super::*;
use serde_json::json;

fn demo_user() -> User {
    User {
        id: "user_scout_master_001".into(),
        name: "David Gillilan".into(),
        email: Some("dbgillilan@gmail.com".into()),
        role: "scout_master".into(),
    }
}

// =============================================================================
// User
// =============================================================================

#[test]
fn user_deserializes_demo_shape() {
    let user: User = serde_json::from_value(json!({
        "id": "user_scout_master_001",
        "email": "dbgillilan@gmail.com",
        "name": "David Gillilan",
        "role": "scout_master"
    }))
    .unwrap();
    assert_eq!(user, demo_user());
}

#[test]
fn user_tolerates_missing_optional_fields() {
    let user: User = serde_json::from_value(json!({ "id": "u1" })).unwrap();
    assert_eq!(user.id, "u1");
    assert!(user.name.is_empty());
    assert!(user.email.is_none());
}

#[test]
fn user_requires_id() {
    assert!(serde_json::from_value::<User>(json!({ "name": "nobody" })).is_err());
}

// =============================================================================
// Credential
// =============================================================================

#[test]
fn credential_debug_redacts_token() {
    let credential = Credential::new("demo_token_1".into(), Some(demo_user()), CredentialTag(1));
    let debug = format!("{credential:?}");
    assert!(!debug.contains("demo_token_1"));
    assert!(debug.contains("scout_master"));
}

#[test]
fn credential_accessors() {
    let credential = Credential::new("t".into(), None, CredentialTag(7));
    assert_eq!(credential.token(), "t");
    assert!(credential.user().is_none());
    assert_eq!(credential.tag(), CredentialTag(7));
}

// =============================================================================
// SessionState
// =============================================================================

#[test]
fn only_authenticated_state_carries_credential() {
    let credential = Credential::new("t".into(), None, CredentialTag(1));
    let states = [
        SessionState::Unknown,
        SessionState::Validating,
        SessionState::Authenticated(credential),
        SessionState::Unauthenticated,
    ];
    for state in &states {
        assert_eq!(
            state.credential().is_some(),
            state.phase() == SessionPhase::Authenticated,
            "{state:?}"
        );
    }
}

#[test]
fn phase_display() {
    assert_eq!(SessionPhase::Unauthenticated.to_string(), "unauthenticated");
    assert_eq!(SessionPhase::Validating.to_string(), "validating");
}

// =============================================================================
// SessionError
// =============================================================================

#[test]
fn transport_errors_become_generic_network_failure() {
    let err = SessionError::from(TransportError::Connect("refused".into()));
    assert_eq!(err.kind(), ErrorKind::NetworkError);
    assert_eq!(err.to_string(), "Network error");
}

#[test]
fn validation_error_keeps_backend_message() {
    let err = SessionError::validation("Invalid credentials");
    assert_eq!(err.kind(), ErrorKind::ValidationFailure);
    assert_eq!(err.to_string(), "Invalid credentials");
}
