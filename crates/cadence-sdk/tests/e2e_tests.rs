//! End-to-end tests for the Cadence SDK over real HTTP
//!
//! Each test starts a local wiremock server standing in for the API.

use cadence_domain::{Category, CloneId, WeightMatrix};
use cadence_sdk::{CadenceClient, ClientConfig, HttpTransport, QueryKey, SdkError, Transport};
use serde_json::{json, Value};
use std::time::Duration;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn id(s: &str) -> CloneId {
    CloneId::new(s).unwrap()
}

fn merged_clone() -> Value {
    json!({
        "id": "m1",
        "name": "Blend A",
        "description": null,
        "tags": [],
        "type": "merged",
        "is_demo": false,
        "is_hidden": false,
        "avatar_path": null,
        "confidence_score": 0,
        "sample_count": 0,
        "created_at": "2026-01-01T00:00:00Z",
        "updated_at": "2026-01-01T00:00:00Z"
    })
}

#[tokio::test]
async fn test_http_404_becomes_absent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/clones/c1/dna"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "prominence_scores": {"tone": 80, "vocabulary": 20}
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/clones/c2/dna"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(json!({"detail": "DNA not found", "code": "DNA_NOT_FOUND"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = CadenceClient::new(&server.uri()).unwrap();
    let results = client.fetch_profiles(&[id("c1"), id("c2")]).await;

    let profile = results[0].1.profile().unwrap();
    assert_eq!(profile.weight(Category::Tone).value(), 80);
    assert_eq!(profile.weight(Category::Vocabulary).value(), 20);
    assert!(results[1].1.is_absent());
}

#[tokio::test]
async fn test_http_error_body_surfaces() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/clones/c1/dna"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_json(json!({"detail": "database down", "code": "INTERNAL_ERROR"})),
        )
        .mount(&server)
        .await;

    let client = CadenceClient::new(&server.uri()).unwrap();
    let outcome = client.fetch_profile(&id("c1")).await;

    match outcome.error() {
        Some(SdkError::Api { status, code, detail }) => {
            assert_eq!(*status, 500);
            assert_eq!(code, "INTERNAL_ERROR");
            assert_eq!(detail, "database down");
        }
        other => panic!("Unexpected outcome: {:?}", other),
    }
}

#[tokio::test]
async fn test_http_non_json_error_defaults() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/clones"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let transport = HttpTransport::new(&ClientConfig::new(server.uri())).unwrap();
    let err = transport.get("/api/clones").await.unwrap_err();

    assert_eq!(
        err.to_string(),
        "API error (HTTP 502, UNKNOWN_ERROR): Request failed"
    );
}

#[tokio::test]
async fn test_http_no_content_is_null() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/ping"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let transport = HttpTransport::new(&ClientConfig::new(server.uri())).unwrap();
    let body = transport.post("/api/ping", &json!({})).await.unwrap();

    assert_eq!(body, Value::Null);
}

#[tokio::test]
async fn test_http_timeout_is_configurable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/clones"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"items": [], "total": 0}))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let config = ClientConfig::new(server.uri()).with_timeout(Duration::from_millis(50));
    let client = CadenceClient::from_config(config).unwrap();

    assert!(matches!(client.list_clones().await, Err(SdkError::Timeout)));
}

#[tokio::test]
async fn test_http_merge_round_trip() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/clones/merge"))
        .and(body_partial_json(json!({
            "name": "Blend A",
            "source_clones": [{"clone_id": "c1", "weights": {"tone": 80}}]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(merged_clone()))
        .expect(1)
        .mount(&server)
        .await;

    let client = CadenceClient::new(&server.uri()).unwrap();
    let mut matrix = WeightMatrix::new();
    matrix.add_source(id("c1"), None);
    matrix.set_weight(&id("c1"), Category::Tone, 80.0).unwrap();

    let created = client.merge("Blend A", &matrix).await.unwrap();

    assert_eq!(created.name, "Blend A");
    assert_eq!(client.cache().invalidation_count(&QueryKey::ClonesList), 1);
}

#[tokio::test]
async fn test_http_connection_refused() {
    // Nothing listens on port 9 (discard) in the test environment
    let config = ClientConfig::new("http://127.0.0.1:9").with_timeout(Duration::from_secs(2));
    let client = CadenceClient::from_config(config).unwrap();

    let outcome = client.fetch_profile(&id("c1")).await;

    match outcome.error() {
        Some(SdkError::ConnectionError(_)) | Some(SdkError::Timeout) | Some(SdkError::TransportError(_)) => {}
        other => panic!("Unexpected outcome: {:?}", other),
    }
}
