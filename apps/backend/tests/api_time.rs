//! Time and health endpoint tests.

mod common;

use axum::http::StatusCode;
use chrono::{DateTime, Utc};

use common::TestContext;
use vocab_backend::models::TimeResponse;

/// The time endpoint returns an ISO-8601 timestamp.
#[tokio::test]
async fn test_time_returns_iso_timestamp() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let before = Utc::now();
    let response = server.get("/api/time").await;
    response.assert_status_ok();

    let body: TimeResponse = response.json();
    let time = DateTime::parse_from_rfc3339(&body.time).expect("time should be RFC 3339");
    assert!(body.time.ends_with('Z'));
    assert!(time.timestamp() >= before.timestamp() - 1);
}

/// The time body carries only the `time` field.
#[tokio::test]
async fn test_time_body_shape() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let body: serde_json::Value = server.get("/api/time").await.json();
    let object = body.as_object().expect("body should be an object");
    assert_eq!(object.len(), 1);
    assert!(object["time"].is_string());
}

/// Unknown API routes return a JSON 404.
#[tokio::test]
async fn test_unknown_api_route() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server.get("/api/progress").await;
    response.assert_status(StatusCode::NOT_FOUND);

    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "not_found");
    assert_eq!(body["message"], "Not found: /api/progress");
}

/// Health check responds with OK.
#[tokio::test]
async fn test_health() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server.get("/health").await;
    response.assert_status_ok();
    response.assert_text("OK");
}
