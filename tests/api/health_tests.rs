//! Health Check API Tests

use axum::http::StatusCode;
use serde_json::json;

use crate::common::{body_json, body_text, TestApp};

/// Liveness never depends on the database
#[tokio::test]
async fn test_liveness_probe() {
    let app = TestApp::new();

    let response = app.get("/health/live").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({"status": "alive"}));
}

/// `/health` reports an unreachable database
#[tokio::test]
async fn test_health_reports_database_down() {
    let app = TestApp::new();

    let response = app.get("/health").await;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(
        body_json(response).await,
        json!({"up": false, "result": {"database": "Not accessible"}})
    );
}

/// Readiness fails when the database is down even though the queue is fine
#[tokio::test]
async fn test_readiness_probe() {
    let app = TestApp::new();

    let response = app.get("/health/ready").await;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = body_json(response).await;
    assert_eq!(body["status"], "unhealthy");
    assert_eq!(body["checks"]["queue"]["status"], "healthy");
    assert_eq!(body["checks"]["database"]["status"], "unhealthy");
}

/// Metrics are exposed in Prometheus text format
#[tokio::test]
async fn test_metrics_endpoint() {
    let app = TestApp::new();
    app.get("/health/live").await;

    let response = app.get("/metrics").await;

    assert_eq!(response.status(), StatusCode::OK);
    let text = body_text(response).await;
    assert!(text.contains("service_rating_http_requests_total"));
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let app = TestApp::new();

    let response = app.get("/api/v1/nothing-here").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
