//! Hook API Tests

use axum::http::StatusCode;
use serde_json::json;

use crate::common::{body_json, TestApp};

#[tokio::test]
async fn test_create_hook_requires_url_target() {
    let app = TestApp::new();

    let response = app
        .post_json(
            "/api/v1/hooks",
            &json!({"target": "not a url", "event": "invite.added"}),
        )
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["message"],
        "target: Target must be a valid URL"
    );
}

#[tokio::test]
async fn test_create_hook_rejects_unknown_event() {
    let app = TestApp::new();

    let response = app
        .post_json(
            "/api/v1/hooks",
            &json!({"target": "https://example.com/hook", "event": "invite.exploded"}),
        )
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let message = body_json(response).await["message"].as_str().unwrap().to_string();
    assert!(message.starts_with("event: unknown event `invite.exploded`"));
    assert!(message.contains("rating.deleted"));
}

#[tokio::test]
async fn test_get_hook_rejects_non_numeric_id() {
    let app = TestApp::new();

    let response = app.get("/api/v1/hooks/abc").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["message"], "Invalid hook ID");
}
