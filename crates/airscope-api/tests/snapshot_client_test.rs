// Integration tests for `SnapshotClient` using wiremock.

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use airscope_api::types::WireKind;
use airscope_api::{Error, SnapshotClient};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, SnapshotClient) {
    let server = MockServer::start().await;
    let client = SnapshotClient::from_reqwest(&server.uri(), reqwest::Client::new()).unwrap();
    (server, client)
}

// ── Happy-path tests ────────────────────────────────────────────────

#[tokio::test]
async fn test_fetch_devices() {
    let (server, client) = setup().await;

    let body = json!({
        "devices": [
            {
                "type": "wifi",
                "name": "Home",
                "mac": "AA:BB:CC:DD:EE:FF",
                "vendor": "Acme Networks",
                "signal_dbm": -45,
                "history": [-52, -48, -45],
                "last_seen": 1700000000.0,
                "last_seen_iso": "2023-11-14T22:13:20+00:00"
            },
            {
                "type": "ble",
                "name": "Tag",
                "mac": "12:34:56:78:9A:BC",
                "signal_dbm": -82,
                "history": [-82],
                "last_seen": 1700000001.0
            }
        ],
        "server_time": 1700000002.0
    });

    Mock::given(method("GET"))
        .and(path("/api/devices"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let snapshot = client.fetch_devices().await.unwrap();

    assert_eq!(snapshot.devices.len(), 2);
    assert_eq!(snapshot.devices[0].kind, WireKind::Wifi);
    assert_eq!(snapshot.devices[0].name.as_deref(), Some("Home"));
    assert_eq!(snapshot.devices[0].signal_dbm, Some(-45));
    assert_eq!(snapshot.devices[1].kind, WireKind::Ble);
    assert_eq!(snapshot.devices[1].vendor, None);
    assert_eq!(snapshot.server_time, Some(1_700_000_002.0));
}

#[tokio::test]
async fn test_missing_devices_field_is_empty() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/devices"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "server_time": 1.0 })))
        .mount(&server)
        .await;

    let snapshot = client.fetch_devices().await.unwrap();
    assert!(snapshot.devices.is_empty());
}

// ── Error-path tests ────────────────────────────────────────────────

#[tokio::test]
async fn test_server_error_is_endpoint_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/devices"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = client.fetch_devices().await.unwrap_err();
    match err {
        Error::Endpoint { status } => assert_eq!(status, 500),
        other => panic!("expected Endpoint error, got {other:?}"),
    }
    assert!(err.is_transient());
}

#[tokio::test]
async fn test_malformed_body_keeps_raw_payload() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/devices"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = client.fetch_devices().await.unwrap_err();
    match err {
        Error::Deserialization { body, .. } => assert_eq!(body, "not json"),
        other => panic!("expected Deserialization error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_connection_refused_is_transient() {
    // Port 1 is essentially guaranteed to refuse connections.
    let client =
        SnapshotClient::from_reqwest("http://127.0.0.1:1", reqwest::Client::new()).unwrap();
    let err = client.fetch_devices().await.unwrap_err();
    assert!(err.is_transient());
}
