use super::*;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::hashing::reference_cache_key;

fn embedder(server: &MockServer) -> HttpEmbedder {
    HttpEmbedder::new(
        HttpEmbedderConfig::new(server.uri())
            .with_model("test-model")
            .with_dimension(3),
    )
    .expect("config is valid")
}

#[tokio::test]
async fn test_embed_success() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/embeddings"))
        .and(body_json(json!({"model": "test-model", "input": "cells divide"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "object": "list",
            "data": [{"object": "embedding", "index": 0, "embedding": [0.1, 0.2, 0.3]}],
            "model": "test-model"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let vector = embedder(&server).embed("cells divide").await.unwrap();
    assert_eq!(vector, vec![0.1, 0.2, 0.3]);
}

#[tokio::test]
async fn test_embed_sends_bearer_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/embeddings"))
        .and(header("authorization", "Bearer sk-test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"index": 0, "embedding": [1.0, 0.0, 0.0]}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let embedder = HttpEmbedder::new(
        HttpEmbedderConfig::new(server.uri())
            .with_api_key("sk-test")
            .with_dimension(3),
    )
    .unwrap();
    assert!(embedder.embed("x").await.is_ok());
}

#[tokio::test]
async fn test_embed_client_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/embeddings"))
        .respond_with(ResponseTemplate::new(401).set_body_string("unauthorized"))
        .mount(&server)
        .await;

    let err = embedder(&server).embed("x").await.unwrap_err();
    assert_eq!(
        err,
        EmbeddingError::Http {
            status: 401,
            body: "unauthorized".to_string()
        }
    );
}

#[tokio::test]
async fn test_embed_server_error_is_unavailable() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/embeddings"))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .mount(&server)
        .await;

    let err = embedder(&server).embed("x").await.unwrap_err();
    assert!(matches!(err, EmbeddingError::ProviderUnavailable { .. }));
}

#[tokio::test]
async fn test_embed_empty_data() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/embeddings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .mount(&server)
        .await;

    let err = embedder(&server).embed("x").await.unwrap_err();
    assert!(matches!(err, EmbeddingError::InvalidVector { .. }));
}

#[tokio::test]
async fn test_embed_malformed_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/embeddings"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = embedder(&server).embed("x").await.unwrap_err();
    assert!(matches!(err, EmbeddingError::Request { .. }));
}

#[tokio::test]
async fn test_unreachable_endpoint_is_unavailable() {
    let embedder = HttpEmbedder::new(HttpEmbedderConfig::new("http://127.0.0.1:1")).unwrap();
    let err = embedder.embed("x").await.unwrap_err();
    assert!(matches!(err, EmbeddingError::ProviderUnavailable { .. }));
}

#[test]
fn test_provider_metadata() {
    let embedder = HttpEmbedder::new(
        HttpEmbedderConfig::new("http://localhost:8000/")
            .with_model("bge-small")
            .with_dimension(384),
    )
    .unwrap();

    assert_eq!(embedder.name(), "http");
    assert_eq!(
        embedder.version(),
        "bge-small@http://localhost:8000/v1/embeddings"
    );
    assert_eq!(embedder.dimension(), 384);
    assert_eq!(
        embedder.config().endpoint(),
        "http://localhost:8000/v1/embeddings"
    );
}

#[test]
fn test_blank_url_rejected() {
    assert!(matches!(
        HttpEmbedder::new(HttpEmbedderConfig::new("  ")),
        Err(EmbeddingError::InvalidConfig { .. })
    ));
}

#[test]
fn test_debug_redacts_api_key() {
    let config = HttpEmbedderConfig::new("http://localhost").with_api_key("sk-secret");
    let rendered = format!("{config:?}");
    assert!(!rendered.contains("sk-secret"));
    assert!(rendered.contains("<redacted>"));
}

#[test]
fn test_version_distinguishes_endpoints_serving_same_model() {
    let a = HttpEmbedder::new(HttpEmbedderConfig::new("http://gpu-a:8000").with_model("bge-small"))
        .unwrap();
    let b = HttpEmbedder::new(HttpEmbedderConfig::new("http://gpu-b:8000").with_model("bge-small"))
        .unwrap();

    assert_ne!(a.version(), b.version());
    assert_ne!(
        reference_cache_key("bio-1", a.version(), "cell division"),
        reference_cache_key("bio-1", b.version(), "cell division")
    );
}
