//! Tests for the HTTP client module

use super::*;
use crate::error::Error;
use crate::types::Method;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

fn client_for(server: &MockServer) -> HttpClient {
    let config = HttpClientConfig::builder().base_url(server.uri()).build();
    HttpClient::with_config(config).unwrap()
}

// ============================================================================
// Config
// ============================================================================

#[test]
fn test_http_client_config_default() {
    let config = HttpClientConfig::default();
    assert_eq!(config.timeout, Duration::from_secs(30));
    assert!(config.base_url.is_none());
    assert!(config.default_headers.is_empty());
    assert!(config.user_agent.starts_with("authed-api/"));
}

#[test]
fn test_http_client_config_builder() {
    let config = HttpClientConfig::builder()
        .base_url("https://api.example.com")
        .timeout(Duration::from_secs(60))
        .header("X-Custom", "value")
        .user_agent("test-agent/1.0")
        .build();

    assert_eq!(config.base_url, Some("https://api.example.com".to_string()));
    assert_eq!(config.timeout, Duration::from_secs(60));
    assert_eq!(
        config.default_headers.get("X-Custom"),
        Some(&"value".to_string())
    );
    assert_eq!(config.user_agent, "test-agent/1.0");
}

#[test]
fn test_http_client_config_from_settings() {
    let mut settings = crate::settings::Settings::new("https://judge.example.com", "s");
    settings.timeout_secs = 12;
    let config = HttpClientConfig::from_settings(&settings);
    assert_eq!(config.base_url.as_deref(), Some("https://judge.example.com"));
    assert_eq!(config.timeout, Duration::from_secs(12));
}

#[test]
fn test_build_url() {
    let client = HttpClient::with_config(
        HttpClientConfig::builder()
            .base_url("https://api.example.com/")
            .build(),
    )
    .unwrap();

    assert_eq!(
        client.build_url("/api/v2/problems").unwrap().as_str(),
        "https://api.example.com/api/v2/problems"
    );
    assert_eq!(
        client.build_url("api/token/").unwrap().as_str(),
        "https://api.example.com/api/token/"
    );
    assert_eq!(
        client.build_url("https://other.example.com/x").unwrap().as_str(),
        "https://other.example.com/x"
    );
}

#[test]
fn test_build_url_without_base() {
    let client = HttpClient::with_config(HttpClientConfig::default()).unwrap();
    assert!(matches!(
        client.build_url("/relative/path"),
        Err(Error::InvalidUrl(_))
    ));
}

// ============================================================================
// Request descriptor
// ============================================================================

#[test]
fn test_api_request_builder() {
    let request = ApiRequest::get("/api/v2/problems")
        .header("Content-Type", "application/json")
        .query("page", "2");

    assert_eq!(request.method, Method::GET);
    assert_eq!(request.target, "/api/v2/problems");
    assert_eq!(request.headers["Content-Type"], "application/json");
    assert_eq!(request.params["page"], "2");
    assert_eq!(request.body, json!({}));

    let request = ApiRequest::put("/p", json!({"name": "x"}));
    assert_eq!(request.method, Method::PUT);
    assert_eq!(request.body["name"], "x");
}

#[test]
fn test_api_request_parse_rejects_unknown_method() {
    assert_eq!(ApiRequest::parse("/p", "delete").unwrap().method, Method::DELETE);
    assert!(matches!(
        ApiRequest::parse("/p", "PATCH"),
        Err(Error::UnsupportedMethod { .. })
    ));
}

#[test]
fn test_set_bearer_replaces_and_removes() {
    let mut request = ApiRequest::get("/p").header("authorization", "Token legacy");

    request.set_bearer(Some("abc"));
    assert_eq!(request.authorization(), Some("Bearer abc"));
    assert_eq!(request.headers.len(), 1);

    request.set_bearer(Some("def"));
    assert_eq!(request.authorization(), Some("Bearer def"));

    request.set_bearer(None);
    assert!(request.authorization().is_none());
    assert!(request.headers.is_empty());
}

// ============================================================================
// Sending
// ============================================================================

#[tokio::test]
async fn test_send_get_with_headers_and_query() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/problems"))
        .and(header("Authorization", "Bearer token-1"))
        .and(query_param("page", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"count": 1})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let mut request = ApiRequest::get("/api/v2/problems").query("page", "3");
    request.set_bearer(Some("token-1"));

    let response = client.send(&request).await.unwrap().decode().unwrap();
    assert!(response.is_success());
    assert_eq!(response.body["count"], 1);
}

#[tokio::test]
async fn test_send_put_carries_json_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/api/v2/problem/p1"))
        .and(body_json(json!({"name": "Renamed"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let request = ApiRequest::put("/api/v2/problem/p1", json!({"name": "Renamed"}));

    let response = client.send(&request).await.unwrap().decode().unwrap();
    assert_eq!(response.body["ok"], true);
}

#[tokio::test]
async fn test_send_get_and_delete_have_no_body() {
    let mock_server = MockServer::start().await;

    Mock::given(|req: &Request| req.body.is_empty())
        .respond_with(ResponseTemplate::new(204))
        .expect(2)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let get = ApiRequest::get("/x").json(json!({"ignored": true}));
    let delete = ApiRequest::delete("/x").json(json!({"ignored": true}));

    let response = client.send(&get).await.unwrap().decode().unwrap();
    assert_eq!(response.body, serde_json::Value::Null);
    let response = client.send(&delete).await.unwrap().decode().unwrap();
    assert_eq!(response.status.as_u16(), 204);
}

#[tokio::test]
async fn test_send_returns_error_statuses_as_responses() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "Not found."})))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let raw = client.send(&ApiRequest::get("/api/missing")).await.unwrap();
    let response = raw.decode().unwrap();

    assert_eq!(response.status.as_u16(), 404);
    let err = response.error_for_status().unwrap_err();
    assert!(matches!(err, Error::HttpStatus { status: 404, .. }));
}

#[tokio::test]
async fn test_send_non_json_body_is_decode_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_string("<html>oops</html>"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let raw = client.send(&ApiRequest::get("/boom")).await.unwrap();
    assert_eq!(raw.status.as_u16(), 500);
    assert_eq!(raw.text, "<html>oops</html>");

    let err = raw.decode().unwrap_err();
    assert!(matches!(err, Error::Decode { status: 500, .. }));
}

#[tokio::test]
async fn test_send_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({}))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .base_url(mock_server.uri())
        .timeout(Duration::from_millis(50))
        .build();
    let client = HttpClient::with_config(config).unwrap();

    let err = client.send(&ApiRequest::get("/slow")).await.unwrap_err();
    assert!(matches!(err, Error::Timeout { timeout_ms: 50 }));
}

#[tokio::test]
async fn test_default_headers_applied() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(header("X-Client", "tests"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .base_url(mock_server.uri())
        .header("X-Client", "tests")
        .build();
    let client = HttpClient::with_config(config).unwrap();

    client.send(&ApiRequest::get("/x")).await.unwrap();
}

#[tokio::test]
async fn test_post_json_raw() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/token/"))
        .and(body_json(json!({"a": 1})))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let response = client.post_json("/api/token/", &json!({"a": 1})).await.unwrap();
    assert_eq!(response.status().as_u16(), 201);
}
