//! Contract tests for `RpcClient` against a mock backend.
//!
//! Every method lives under `/api/method/restaurant_audit.api.<module>.<name>`
//! and answers `{"message": {"success": .., ...}}`.

use serde_json::{json, Value};
use services::rpc::{Endpoint, RpcClient, RpcConfig};
use services::{ErrorKind, RpcError};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const DASHBOARD_PATH: &str = "/api/method/restaurant_audit.api.audit_api.get_user_dashboard";

fn client(server: &MockServer) -> RpcClient {
    let config = RpcConfig::parse(&server.uri())
        .unwrap()
        .with_timeout_secs(5);
    RpcClient::new(config).unwrap()
}

#[tokio::test]
async fn posts_json_and_unwraps_the_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(
            "/api/method/restaurant_audit.api.audit_api.get_audit_progress",
        ))
        .and(body_json(json!({"restaurant_id": "REST-1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": {"success": true, "has_progress": false}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let reply: Value = client(&server)
        .invoke(
            Endpoint::GET_AUDIT_PROGRESS,
            &json!({"restaurant_id": "REST-1"}),
        )
        .await
        .unwrap();
    assert_eq!(reply["has_progress"], false);
}

#[tokio::test]
async fn session_cookie_is_sent_when_configured() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(DASHBOARD_PATH))
        .and(header("cookie", "sid=abc123"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"message": {"success": 1}})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let config = RpcConfig::parse(&server.uri())
        .unwrap()
        .with_session_id("abc123");
    let rpc = RpcClient::new(config).unwrap();
    let _: Value = rpc.call(Endpoint::GET_USER_DASHBOARD).await.unwrap();
}

#[tokio::test]
async fn unsuccessful_envelope_is_an_application_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(DASHBOARD_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": {"success": false, "message": "No employee record"}
        })))
        .mount(&server)
        .await;

    let err = client(&server)
        .call::<Value>(Endpoint::GET_USER_DASHBOARD)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Application);
    assert_eq!(err.user_message(), "No employee record");
}

#[tokio::test]
async fn missing_success_flag_is_an_application_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(DASHBOARD_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "ok"})))
        .mount(&server)
        .await;

    let err = client(&server)
        .call::<Value>(Endpoint::GET_USER_DASHBOARD)
        .await
        .unwrap_err();
    assert!(matches!(err, RpcError::Application { .. }));
}

#[tokio::test]
async fn server_error_status_is_a_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(DASHBOARD_PATH))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = client(&server)
        .call::<Value>(Endpoint::GET_USER_DASHBOARD)
        .await
        .unwrap_err();
    assert!(matches!(err, RpcError::HttpStatus(status) if status.as_u16() == 500));
    assert_eq!(err.kind(), ErrorKind::Transport);
}

#[tokio::test]
async fn non_json_body_is_a_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(DASHBOARD_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
        .mount(&server)
        .await;

    let err = client(&server)
        .call::<Value>(Endpoint::GET_USER_DASHBOARD)
        .await
        .unwrap_err();
    assert!(matches!(err, RpcError::Decode(_)));
    assert_eq!(err.kind(), ErrorKind::Transport);
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    let rpc = RpcClient::new(
        RpcConfig::parse("http://127.0.0.1:9")
            .unwrap()
            .with_timeout_secs(1),
    )
    .unwrap();
    let err = rpc
        .call::<Value>(Endpoint::GET_USER_DASHBOARD)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
}
