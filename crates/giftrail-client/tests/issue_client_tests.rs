//! Contract tests for the provider issue client against wiremock servers:
//! request construction (headers, body, single attempt), success
//! passthrough, and failure mapping, without a live provider.

use std::time::Duration;

use giftrail_client::{ProviderClient, ProviderConfig, ProviderError};
use giftrail_core::{canonical_amount, FaceValue, ProviderRequest};
use giftrail_signing::SigningTimestamp;
use rust_decimal::Decimal;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn provider_request() -> ProviderRequest {
    ProviderRequest {
        client_request_id: "req-1".to_string(),
        choices: vec!["brand-x".to_string()],
        face_value: FaceValue {
            amount: canonical_amount(Decimal::from(10)).expect("canonical amount"),
            currency: "USD".to_string(),
        },
        delivery_method: "url".to_string(),
        fulfilment_by: "partner".to_string(),
        sector: "marketplace".to_string(),
        fulfilment_parameters: None,
    }
}

fn client_for(server: &MockServer) -> ProviderClient {
    ProviderClient::new(ProviderConfig::new(server.uri(), "test-api-key")).expect("client build")
}

#[tokio::test]
async fn issue_sends_signed_request_and_returns_body_verbatim() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/digital/issue"))
        .and(header("API-Key", "test-api-key"))
        .and(header("Signature", "deadbeef"))
        .and(header("Timestamp", "1700000000000"))
        .and(header("Accept", "application/json"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(json!({
            "client_request_id": "req-1",
            "choices": ["brand-x"],
            "face_value": {"amount": 10, "currency": "USD"},
            "delivery_method": "url",
            "fulfilment_by": "partner",
            "sector": "marketplace"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "data": {"url": "https://cards.example.com/redeem/abc123"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let timestamp = SigningTimestamp::from_millis_string("1700000000000");
    let body = client
        .issue("deadbeef", &timestamp, &provider_request())
        .await
        .expect("issue succeeds");

    assert_eq!(body["status"], "success");
    assert_eq!(
        body["data"]["url"],
        "https://cards.example.com/redeem/abc123"
    );
}

#[tokio::test]
async fn issue_omits_fulfilment_parameters_key_when_absent() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/digital/issue"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let timestamp = SigningTimestamp::from_millis_string("1700000000000");
    client
        .issue("sig", &timestamp, &provider_request())
        .await
        .expect("issue succeeds");

    let received = server.received_requests().await.expect("recorded requests");
    let body: serde_json::Value =
        serde_json::from_slice(&received[0].body).expect("request body is JSON");
    assert!(body.get("fulfilment_parameters").is_none());
}

#[tokio::test]
async fn issue_makes_exactly_one_attempt_on_server_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/digital/issue"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let timestamp = SigningTimestamp::from_millis_string("1700000000000");
    let result = client.issue("sig", &timestamp, &provider_request()).await;

    match result {
        Err(ProviderError::Rejected { status, detail }) => {
            assert_eq!(status, 500);
            assert_eq!(detail, json!("boom"));
        }
        other => panic!("expected Rejected, got {other:?}"),
    }
}

#[tokio::test]
async fn issue_carries_json_error_body_through() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/digital/issue"))
        .respond_with(ResponseTemplate::new(402).set_body_json(json!({
            "error_code": "INSUFFICIENT_FUNDS",
            "message": "top up required"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let timestamp = SigningTimestamp::from_millis_string("1700000000000");
    let result = client.issue("sig", &timestamp, &provider_request()).await;

    match result {
        Err(ProviderError::Rejected { status, detail }) => {
            assert_eq!(status, 402);
            assert_eq!(detail["error_code"], "INSUFFICIENT_FUNDS");
        }
        other => panic!("expected Rejected, got {other:?}"),
    }
}

#[tokio::test]
async fn issue_times_out_as_typed_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/digital/issue"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"ok": true}))
                .set_delay(Duration::from_millis(1500)),
        )
        .mount(&server)
        .await;

    let mut config = ProviderConfig::new(server.uri(), "test-api-key");
    config.timeout_secs = 1;
    let client = ProviderClient::new(config).expect("client build");
    let timestamp = SigningTimestamp::from_millis_string("1700000000000");
    let result = client.issue("sig", &timestamp, &provider_request()).await;

    match result {
        Err(ProviderError::Timeout { elapsed_ms }) => assert_eq!(elapsed_ms, 1000),
        other => panic!("expected Timeout, got {other:?}"),
    }
}

#[tokio::test]
async fn issue_maps_connection_failure_to_transport_error() {
    // Guaranteed-closed port: connection refused without a server.
    let client = ProviderClient::new(ProviderConfig::new("http://127.0.0.1:1", "test-api-key"))
        .expect("client build");
    let timestamp = SigningTimestamp::from_millis_string("1700000000000");
    let result = client.issue("sig", &timestamp, &provider_request()).await;

    match result {
        Err(ProviderError::Transport { endpoint, .. }) => {
            assert_eq!(endpoint, "http://127.0.0.1:1/digital/issue");
        }
        other => panic!("expected Transport, got {other:?}"),
    }
}
