use super::*;
use serde_json::json;

// =============================================================================
// parse_body
// =============================================================================

#[test]
fn parse_body_empty_is_null() {
    assert_eq!(parse_body(""), Value::Null);
    assert_eq!(parse_body("  \n"), Value::Null);
}

#[test]
fn parse_body_json_object() {
    assert_eq!(parse_body(r#"{"status":"healthy"}"#), json!({ "status": "healthy" }));
}

#[test]
fn parse_body_non_json_kept_as_string() {
    assert_eq!(parse_body("Bad Gateway"), Value::String("Bad Gateway".into()));
}

// =============================================================================
// WireResponse
// =============================================================================

#[test]
fn success_range() {
    assert!(WireResponse::new(200, Value::Null).is_success());
    assert!(WireResponse::new(204, Value::Null).is_success());
    assert!(!WireResponse::new(199, Value::Null).is_success());
    assert!(!WireResponse::new(404, Value::Null).is_success());
}

#[test]
fn unauthorized_is_only_401() {
    assert!(WireResponse::new(401, Value::Null).is_unauthorized());
    assert!(!WireResponse::new(403, Value::Null).is_unauthorized());
}

#[test]
fn message_prefers_message_field() {
    let resp = WireResponse::new(401, json!({ "message": "Invalid credentials", "error": "other" }));
    assert_eq!(resp.message(), Some("Invalid credentials"));
}

#[test]
fn message_falls_back_to_error_field() {
    let resp = WireResponse::new(405, json!({ "error": "Method not allowed" }));
    assert_eq!(resp.message(), Some("Method not allowed"));
}

#[test]
fn message_from_plain_text_body() {
    let resp = WireResponse::new(502, Value::String("upstream down".into()));
    assert_eq!(resp.message(), Some("upstream down"));
}

#[test]
fn message_absent() {
    assert_eq!(WireResponse::new(500, Value::Null).message(), None);
    assert_eq!(WireResponse::new(500, json!({ "message": 3 })).message(), None);
}

// =============================================================================
// WireRequest
// =============================================================================

#[test]
fn debug_redacts_bearer() {
    let req = WireRequest::new(Method::GET, "/api/clients").with_bearer("demo_token_123");
    let debug = format!("{req:?}");
    assert!(!debug.contains("demo_token_123"));
    assert!(debug.contains("<redacted>"));
}

#[test]
fn builders_fill_fields() {
    let req = WireRequest::new(Method::POST, "/api/clients")
        .with_body(json!({ "name": "Acme" }))
        .with_query(vec![("page".into(), "2".into())]);
    assert_eq!(req.method, Method::POST);
    assert_eq!(req.body, Some(json!({ "name": "Acme" })));
    assert_eq!(req.query, vec![("page".to_owned(), "2".to_owned())]);
    assert!(req.bearer.is_none());
}

// =============================================================================
// HttpTransport
// =============================================================================

#[tokio::test]
async fn unreachable_backend_is_transport_error() {
    // Port 9 (discard) is almost never listening locally.
    let config = GatewayConfig::new("http://127.0.0.1:9").unwrap();
    let transport = HttpTransport::new(config).unwrap();
    let err = transport
        .send(WireRequest::new(Method::GET, "/api/health"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NetworkError);
}

#[tokio::test]
async fn silent_backend_times_out() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    // Accept and hold the connection without ever answering.
    let _server = tokio::spawn(async move {
        let (_socket, _) = listener.accept().await.unwrap();
        tokio::time::sleep(std::time::Duration::from_secs(5)).await;
    });

    let config = GatewayConfig::new(&format!("http://{addr}"))
        .unwrap()
        .with_request_timeout(std::time::Duration::from_millis(100));
    let transport = HttpTransport::new(config).unwrap();
    let err = transport
        .send(WireRequest::new(Method::GET, "/api/health"))
        .await
        .unwrap_err();
    assert!(err.is_timeout(), "expected timeout, got {err:?}");
    assert_eq!(err.kind(), ErrorKind::NetworkError);
}
