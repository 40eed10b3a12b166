#![allow(clippy::unwrap_used)]
// Integration tests for `ServiceClient` using wiremock.

use serde_json::json;
use url::Url;
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use doorctl_api::{Error, ServiceClient, TransportConfig};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, ServiceClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client = ServiceClient::with_client(reqwest::Client::new(), base_url);
    (server, client)
}

fn secret(s: &str) -> secrecy::SecretString {
    s.to_string().into()
}

// ── Authentication tests ────────────────────────────────────────────

#[tokio::test]
async fn test_login_posts_credentials_as_form() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/"))
        .and(body_string_contains("Email=me%40example.com"))
        .and(body_string_contains("Password=hunter2"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>welcome</html>"))
        .expect(1)
        .mount(&server)
        .await;

    client
        .login("me@example.com", &secret("hunter2"))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_login_failure_is_generic() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad password"))
        .mount(&server)
        .await;

    let result = client.login("me@example.com", &secret("wrong")).await;

    match result {
        Err(Error::Authentication { ref message }) => assert_eq!(message, "Login failed"),
        other => panic!("expected Authentication error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_session_cookie_is_replayed() {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client = ServiceClient::new(base_url, &TransportConfig::default()).unwrap();

    Mock::given(method("POST"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200).insert_header("set-cookie", "SESSION=abc123; Path=/"),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/MyQDevices/GetAllDevices"))
        .and(header("cookie", "SESSION=abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    client.login("me@example.com", &secret("pw")).await.unwrap();
    let devices = client.list_devices("en-US", "LiftMaster").await.unwrap();
    assert!(devices.is_empty());
}

// ── Gateway tests ───────────────────────────────────────────────────

#[tokio::test]
async fn test_list_places() {
    let (server, client) = setup().await;

    let envelope = json!({
        "Placeslist": [
            { "GatewayId": 1, "Name": "Garage", "ConnectServerId": "cs-1",
              "DeviceList": "10", "IsDetonator": false },
            { "GatewayId": 2, "Name": "Shed", "ConnectServerId": "cs-2",
              "DeviceList": "", "IsDetonator": true }
        ]
    });

    Mock::given(method("GET"))
        .and(path("/Gateway/GetAllGateways"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&envelope))
        .mount(&server)
        .await;

    let places = client.list_places().await.unwrap();

    assert_eq!(places.len(), 2);
    assert_eq!(places[0].gateway_id, 1);
    assert_eq!(places[0].name.as_deref(), Some("Garage"));
    assert_eq!(places[1].connect_server_id.as_deref(), Some("cs-2"));
    assert!(places[1].is_detonator);
}

#[tokio::test]
async fn test_list_places_sends_cache_buster() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/Gateway/GetAllGateways"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "Placeslist": [] })))
        .mount(&server)
        .await;

    client.list_places().await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let millis: i64 = requests[0]
        .url
        .query_pairs()
        .find(|(k, _)| k == "_")
        .map(|(_, v)| v.parse().unwrap())
        .expect("cache-busting parameter missing");
    assert!(millis > 1_000_000_000_000, "expected milliseconds, got {millis}");
}

// ── Device tests ────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_devices() {
    let (server, client) = setup().await;

    let body = json!([{
        "GatewayId": 1,
        "ErrorStatus": "",
        "ErrorMessage": "",
        "LastUpdatedDateTime": "2015-03-01T12:30:00Z",
        "MyQDeviceId": 10,
        "Statesince": 1_425_213_000,
        "Name": "Main",
        "State": "2",
        "Error": false,
        "MonitorOnly": false,
        "LowBattery": true,
        "SensorError": false,
        "OpenError": false,
        "CloseError": false,
        "DisableControl": false,
        "StateName": "Closed",
        "DeviceTypeId": 2
    }]);

    Mock::given(method("GET"))
        .and(path("/api/MyQDevices/GetAllDevices"))
        .and(query_param("culture", "en-US"))
        .and(query_param("brandName", "LiftMaster"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let devices = client.list_devices("en-US", "LiftMaster").await.unwrap();

    assert_eq!(devices.len(), 1);
    let d = &devices[0];
    assert_eq!(d.device_id, 10);
    assert_eq!(d.name.as_deref(), Some("Main"));
    assert_eq!(d.state_name.as_deref(), Some("Closed"));
    assert_eq!(d.low_battery, Some(true));
    assert_eq!(d.device_type_id, Some(2));
    assert_eq!(d.last_updated.unwrap().timestamp(), 1_425_213_000);
}

#[tokio::test]
async fn test_set_desired_door_state() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/Device/TriggerStateChange"))
        .and(body_string_contains("myQDeviceId=10"))
        .and(body_string_contains("attributename=desireddoorstate"))
        .and(body_string_contains("attributevalue=1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "errormessage": "" })))
        .expect(1)
        .mount(&server)
        .await;

    client.set_desired_door_state(10, 1).await.unwrap();
}

#[tokio::test]
async fn test_set_desired_door_state_remote_error() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/Device/TriggerStateChange"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "errormessage": "Device is offline" })),
        )
        .mount(&server)
        .await;

    let result = client.set_desired_door_state(10, 0).await;

    match result {
        Err(Error::RemoteCommand { ref message }) => assert_eq!(message, "Device is offline"),
        other => panic!("expected RemoteCommand error, got: {other:?}"),
    }
}

// ── Error tests ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_non_success_status() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let result = client.list_places().await;

    match result {
        Err(Error::Status {
            status, ref reason, ..
        }) => {
            assert_eq!(status, 503);
            assert_eq!(reason, "Service Unavailable");
        }
        other => panic!("expected Status error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_json() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/MyQDevices/GetAllDevices"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
        .mount(&server)
        .await;

    let result = client.list_devices("en-US", "LiftMaster").await;

    match result {
        Err(Error::Deserialization { ref body, .. }) => assert!(body.contains("login")),
        other => panic!("expected Deserialization error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_command_reply() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/Device/TriggerStateChange"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let result = client.set_desired_door_state(10, 1).await;

    match result {
        Err(Error::Deserialization { ref body, .. }) => assert!(body.contains("oops")),
        other => panic!("expected Deserialization error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_unreadable_body() {
    let (server, client) = setup().await;

    // Claims gzip but isn't, so decoding the body fails after a 200.
    Mock::given(method("POST"))
        .and(path("/Device/TriggerStateChange"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-encoding", "gzip")
                .set_body_string("not gzip"),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/Gateway/GetAllGateways"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-encoding", "gzip")
                .set_body_string("not gzip"),
        )
        .mount(&server)
        .await;

    let post = client.set_desired_door_state(10, 1).await;
    assert!(matches!(post, Err(Error::BodyRead(_))), "got: {post:?}");

    let get = client.list_places().await;
    assert!(matches!(get, Err(Error::BodyRead(_))), "got: {get:?}");
}

#[tokio::test]
async fn test_non_string_timestamp_does_not_fail_listing() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/MyQDevices/GetAllDevices"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "MyQDeviceId": 10, "Name": "Main", "LastUpdatedDateTime": 1_425_213_000 }
        ])))
        .mount(&server)
        .await;

    let devices = client.list_devices("en-US", "LiftMaster").await.unwrap();
    assert_eq!(devices.len(), 1);
    assert!(devices[0].last_updated.is_none());
}

#[tokio::test]
async fn test_connect_failure() {
    // Nothing listens on port 1.
    let client = ServiceClient::with_client(
        reqwest::Client::new(),
        Url::parse("http://127.0.0.1:1/").unwrap(),
    );

    let result = client.list_places().await;

    assert!(
        matches!(result, Err(Error::Connect(_))),
        "expected Connect error, got: {result:?}"
    );
}
