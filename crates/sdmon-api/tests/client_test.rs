#![allow(clippy::unwrap_used)]
// Integration tests for `Client` using wiremock: login exchange, lazy
// authentication, expired-session retry, and envelope unwrapping.

use pretty_assertions::assert_eq;
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use sdmon_api::{AuthStatus, Client, Error, TransportConfig};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, Client) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let secret: secrecy::SecretString = "1".to_string().into();
    let client = Client::new(base_url, "admin", secret, &TransportConfig::default()).unwrap();
    (server, client)
}

fn login_ok() -> ResponseTemplate {
    ResponseTemplate::new(200)
        .insert_header("set-cookie", "JSESSIONID=ABCDEF0123456789ABCDEF0123456789; Path=/")
        .set_body_string("")
}

fn envelope(data: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "data": data }))
}

// ── Authentication tests ────────────────────────────────────────────

#[tokio::test]
async fn login_success_stores_truncated_session() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/j_security_check"))
        .and(body_string_contains("j_username=admin"))
        .respond_with(login_ok())
        .mount(&server)
        .await;

    let outcome = client.login(None, None).await;

    assert_eq!(outcome.status, AuthStatus::Success);
    assert_eq!(outcome.session_id.as_deref(), Some("ABCDEF0123456789ABCD..."));

    let status = client.session_status();
    assert!(status.authenticated);
    assert_eq!(status.username, "admin");
    assert_eq!(status.session_id.as_deref(), Some("ABCDEF0123456789ABCD..."));
}

#[tokio::test]
async fn login_without_session_cookie_is_logical_failure() {
    let (server, client) = setup().await;

    // HTTP 200 but no JSESSIONID: the controller bounced us back to the
    // login page.
    Mock::given(method("POST"))
        .and(path("/j_security_check"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
        .mount(&server)
        .await;

    let outcome = client.login(None, None).await;

    assert_eq!(outcome.status, AuthStatus::Error);
    assert!(outcome.message.contains("no session ID received"));
    assert!(!client.session_status().authenticated);
}

#[tokio::test]
async fn login_http_failure_reports_status_code() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/j_security_check"))
        .respond_with(ResponseTemplate::new(403).set_body_string("Forbidden"))
        .mount(&server)
        .await;

    let outcome = client.login(None, None).await;

    assert_eq!(outcome.status, AuthStatus::Error);
    assert!(outcome.message.contains("403"));
}

#[tokio::test]
async fn failed_explicit_login_preserves_existing_session() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/j_security_check"))
        .and(body_string_contains("j_username=admin"))
        .respond_with(login_ok())
        .mount(&server)
        .await;

    // A bad login returns 200 with no cookie.
    Mock::given(method("POST"))
        .and(path("/j_security_check"))
        .and(body_string_contains("j_username=intruder"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    assert!(client.login(None, None).await.is_success());

    let secret: secrecy::SecretString = "wrong".to_string().into();
    let outcome = client.login(Some("intruder"), Some(&secret)).await;
    assert_eq!(outcome.status, AuthStatus::Error);

    // The good session is still usable.
    assert!(client.session_status().authenticated);
}

// ── Pipeline tests ──────────────────────────────────────────────────

#[tokio::test]
async fn fetch_authenticates_lazily_exactly_once() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/j_security_check"))
        .respond_with(login_ok())
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/dataservice/device"))
        .respond_with(envelope(json!([{ "deviceId": "200.0.1.1" }])))
        .expect(2)
        .mount(&server)
        .await;

    let data = client.fetch("/dataservice/device").await.unwrap();
    assert_eq!(data[0]["deviceId"], "200.0.1.1");

    // Second fetch reuses the session -- the login expectation stays at one.
    client.fetch("/dataservice/device").await.unwrap();
}

#[tokio::test]
async fn failed_lazy_auth_skips_the_get() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/j_security_check"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/dataservice/device"))
        .respond_with(envelope(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let err = client.fetch("/dataservice/device").await.unwrap_err();
    match err {
        Error::AuthenticationRequired { outcome } => {
            assert_eq!(outcome.status, AuthStatus::Error);
        }
        other => panic!("expected AuthenticationRequired, got: {other:?}"),
    }
}

#[tokio::test]
async fn expired_session_triggers_one_reauth_and_one_retry() {
    let (server, client) = setup().await;

    // Lazy login + one re-authentication, nothing more.
    Mock::given(method("POST"))
        .and(path("/j_security_check"))
        .respond_with(login_ok())
        .expect(2)
        .mount(&server)
        .await;

    // First GET comes back 401, the retried GET succeeds.
    Mock::given(method("GET"))
        .and(path("/dataservice/device"))
        .respond_with(ResponseTemplate::new(401))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/dataservice/device"))
        .respond_with(envelope(json!([{ "hostname": "vedge-1" }])))
        .expect(1)
        .mount(&server)
        .await;

    let data = client.fetch("/dataservice/device").await.unwrap();
    assert_eq!(data[0]["hostname"], "vedge-1");
}

#[tokio::test]
async fn persistent_401_is_not_retried_in_a_loop() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/j_security_check"))
        .respond_with(login_ok())
        .expect(2)
        .mount(&server)
        .await;

    // Every GET is a 401 with a non-JSON body: exactly one retry happens,
    // then the pipeline gives up with an envelope error.
    Mock::given(method("GET"))
        .and(path("/dataservice/device"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
        .expect(2)
        .mount(&server)
        .await;

    let err = client.fetch("/dataservice/device").await.unwrap_err();
    match err {
        Error::Envelope { message, status, .. } => {
            assert_eq!(message, "Response is not in JSON format");
            assert_eq!(status, 401);
        }
        other => panic!("expected Envelope error, got: {other:?}"),
    }
}

#[tokio::test]
async fn failed_reauth_reports_reauthentication_error() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/j_security_check"))
        .respond_with(login_ok())
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/j_security_check"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/dataservice/device"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = client.fetch("/dataservice/device").await.unwrap_err();
    assert!(matches!(err, Error::Reauthentication { .. }));

    // The token from the first login is preserved.
    assert!(client.session_status().authenticated);
}

// ── Envelope tests ──────────────────────────────────────────────────

#[tokio::test]
async fn non_json_body_is_an_envelope_error() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/j_security_check"))
        .respond_with(login_ok())
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/dataservice/device"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let err = client.fetch("/dataservice/device").await.unwrap_err();
    match err {
        Error::Envelope { message, body, status } => {
            assert_eq!(message, "Response is not in JSON format");
            assert!(body.contains("not json"));
            assert_eq!(status, 200);
        }
        other => panic!("expected Envelope error, got: {other:?}"),
    }
}

#[tokio::test]
async fn missing_data_key_is_an_envelope_error() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/j_security_check"))
        .respond_with(login_ok())
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/dataservice/device"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "header": {} })))
        .mount(&server)
        .await;

    let err = client.fetch("/dataservice/device").await.unwrap_err();
    match err {
        Error::Envelope { message, .. } => {
            assert_eq!(message, "Key 'data' not found in response");
        }
        other => panic!("expected Envelope error, got: {other:?}"),
    }
}

// ── Typed endpoint tests ────────────────────────────────────────────

#[tokio::test]
async fn list_devices_parses_controller_fields() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/j_security_check"))
        .respond_with(login_ok())
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/dataservice/device"))
        .respond_with(envelope(json!([{
            "deviceId": "200.0.1.1",
            "hostname": "vedge-1",
            "status": "normal",
            "reachability": "reachable",
            "deviceType": "vedge",
            "version": "20.6.3",
            "site-id": "100",
            "system-ip": "200.0.1.1"
        }])))
        .mount(&server)
        .await;

    let devices = client.list_devices().await.unwrap();

    assert_eq!(devices.len(), 1);
    assert_eq!(devices[0].device_id.as_deref(), Some("200.0.1.1"));
    assert_eq!(devices[0].hostname, "vedge-1");
    assert_eq!(devices[0].device_type, "vedge");
    assert_eq!(devices[0].site_id.as_deref(), Some("100"));
    assert!(devices[0].is_reachable());
}

#[tokio::test]
async fn bfd_sessions_are_device_scoped() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/j_security_check"))
        .respond_with(login_ok())
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/dataservice/device/bfd/sessions"))
        .and(query_param("deviceId", "200.0.4.4"))
        .respond_with(envelope(json!([{
            "sessionId": 7,
            "state": "up",
            "localAddress": "10.0.0.1",
            "remoteAddress": "10.0.0.2",
            "interface": "ge0/0"
        }])))
        .mount(&server)
        .await;

    let sessions = client.bfd_sessions("200.0.4.4").await.unwrap();

    assert_eq!(sessions.len(), 1);
    assert!(sessions[0].is_up());
    assert_eq!(sessions[0].local_address.as_deref(), Some("10.0.0.1"));
}

#[tokio::test]
async fn non_list_data_payload_is_a_deserialization_error() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/j_security_check"))
        .respond_with(login_ok())
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/dataservice/device"))
        .respond_with(envelope(json!({ "unexpected": "object" })))
        .mount(&server)
        .await;

    let err = client.list_devices().await.unwrap_err();
    assert!(matches!(err, Error::Deserialization { .. }));
}
