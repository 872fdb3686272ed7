//! Tests for the HTTP client module

use super::*;
use crate::collection::IteratorOptions;
use crate::error::{Error, Result};
use crate::object::Object;
use crate::transport::{AsyncTransport, Transport};
use crate::types::StringMap;
use futures::TryStreamExt;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> HttpClient {
    let config = HttpClientConfig::builder()
        .base_url(format!("{}/api/v3", server.uri()))
        .api_key("test-key")
        .build();
    HttpClient::with_config(config).unwrap()
}

fn comments(range: std::ops::Range<usize>) -> Vec<serde_json::Value> {
    range
        .map(|n| json!({"type": "comment", "id": format!("c{n}"), "attributes": {"n": n}}))
        .collect()
}

async fn mount_two_pages(server: &MockServer, second_page_hits: u64) {
    Mock::given(method("GET"))
        .and(path("/api/v3/comments"))
        .and(query_param("limit", "3"))
        .and(query_param_is_missing("cursor"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": comments(0..3),
            "meta": {"cursor": "Y3Vyc29y-3"}
        })))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v3/comments"))
        .and(query_param("limit", "3"))
        .and(query_param("cursor", "Y3Vyc29y-3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": comments(3..5),
            "meta": {}
        })))
        .expect(second_page_hits)
        .mount(server)
        .await;
}

#[test]
fn test_http_client_config_default() {
    let config = HttpClientConfig::default();
    assert_eq!(config.timeout, Duration::from_secs(30));
    assert!(config.base_url.is_none());
    assert!(config.api_key.is_none());
    assert!(config.user_agent.starts_with("paged-collection/"));
}

#[test]
fn test_http_client_config_builder() {
    let config = HttpClientConfig::builder()
        .base_url("https://api.example.com")
        .timeout(Duration::from_secs(60))
        .api_key("secret")
        .header("X-Custom", "value")
        .user_agent("test-agent/1.0")
        .build();

    assert_eq!(config.base_url, Some("https://api.example.com".to_string()));
    assert_eq!(config.timeout, Duration::from_secs(60));
    assert_eq!(config.api_key, Some("secret".to_string()));
    assert_eq!(
        config.default_headers.get("X-Custom"),
        Some(&"value".to_string())
    );
    assert_eq!(config.user_agent, "test-agent/1.0");
}

#[tokio::test]
async fn test_fetch_json_async() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v3/files"))
        .and(header(API_KEY_HEADER, "test-key"))
        .and(query_param("filter", "size:10kb+"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let mut params = StringMap::new();
    params.insert("filter".to_string(), "size:10kb+".to_string());

    let body = client.fetch_json_async("/files", &params).await.unwrap();
    assert_eq!(body, json!({"data": []}));
}

#[tokio::test]
async fn test_fetch_json_absolute_url() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/elsewhere"))
        .and(header("X-Custom", "value"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .base_url("https://unused.example.com")
        .header("X-Custom", "value")
        .build();
    let client = HttpClient::with_config(config).unwrap();

    let body = client
        .fetch_json_async(&format!("{}/elsewhere", mock_server.uri()), &StringMap::new())
        .await
        .unwrap();
    assert_eq!(body["ok"], true);
}

#[tokio::test]
async fn test_fetch_json_status_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v3/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not found"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client
        .fetch_json_async("/missing", &StringMap::new())
        .await
        .unwrap_err();

    assert!(err.is_transport());
    match err {
        Error::HttpStatus { status, body } => {
            assert_eq!(status, 404);
            assert_eq!(body, "Not found");
        }
        other => panic!("Expected HttpStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn test_fetch_json_invalid_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v3/html"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client
        .fetch_json_async("/html", &StringMap::new())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Http(_)));
}

#[tokio::test]
async fn test_iterator_stream_over_http() {
    let mock_server = MockServer::start().await;
    mount_two_pages(&mock_server, 1).await;

    let client = client_for(&mock_server);
    let mut it = client
        .iterator("/comments", IteratorOptions::new().batch_size(3))
        .unwrap();

    let items: Vec<Object> = it.stream().try_collect().await.unwrap();
    let ids: Vec<&str> = items.iter().map(|o| o.id.as_str()).collect();

    assert_eq!(ids, vec!["c0", "c1", "c2", "c3", "c4"]);
    assert_eq!(it.cursor(), Some("Y3Vyc29y-3-2".to_string()));
}

#[test]
fn test_iterator_blocking_over_http() {
    // The mock server runs on its own thread; requests are made from this one
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let mock_server = runtime.block_on(MockServer::start());
    runtime.block_on(mount_two_pages(&mock_server, 2));

    let client = client_for(&mock_server);
    let mut it = client
        .iterator("/comments", IteratorOptions::new().batch_size(3))
        .unwrap();

    let items: Vec<Object> = it.by_ref().collect::<Result<_>>().unwrap();
    assert_eq!(items.len(), 5);
    assert_eq!(items[4].get("n"), Some(&json!(4)));
    assert_eq!(it.cursor(), Some("Y3Vyc29y-3-2".to_string()));

    // Resume inside the second page, whose cursor contains a dash
    let mut resumed = client
        .iterator(
            "/comments",
            IteratorOptions::new()
                .batch_size(3)
                .cursor("Y3Vyc29y-3-1"),
        )
        .unwrap();
    let body = resumed.next().unwrap().unwrap();
    assert_eq!(body.id, "c4");
}

#[test]
fn test_blocking_client_created_lazily() {
    let client = HttpClient::new().unwrap();
    let debug_str = format!("{client:?}");
    assert!(debug_str.contains("HttpClient"));
    assert!(debug_str.contains("has_blocking_client: false"));
}

#[test]
fn test_blocking_status_error() {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let mock_server = runtime.block_on(MockServer::start());
    runtime.block_on(
        Mock::given(method("GET"))
            .and(path("/api/v3/private"))
            .respond_with(ResponseTemplate::new(401).set_body_string("Wrong API key"))
            .mount(&mock_server),
    );

    let client = client_for(&mock_server);
    let err = client.fetch_json("/private", &StringMap::new()).unwrap_err();
    assert!(matches!(err, Error::HttpStatus { status: 401, .. }));
}
