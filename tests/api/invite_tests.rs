//! Invite and Rating API Tests
//!
//! Request validation runs before any database access, so these run
//! without PostgreSQL.

use axum::http::StatusCode;
use serde_json::json;

use crate::common::{body_json, TestApp};

#[tokio::test]
async fn test_create_invite_rejects_long_identity() {
    let app = TestApp::new();

    let response = app
        .post_json(
            "/api/v1/invites",
            &json!({"identity": "x".repeat(37), "invite": {"to_addr": "+27123"}}),
        )
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["code"], 10007);
    assert_eq!(body["message"], "identity: Identity must be 1-36 characters");
    assert!(app.queue.is_empty());
}

#[tokio::test]
async fn test_get_invite_rejects_malformed_id() {
    let app = TestApp::new();

    let response = app.get("/api/v1/invites/not-a-uuid").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["message"], "Invalid invite ID");
}

#[tokio::test]
async fn test_create_rating_rejects_long_answer() {
    let app = TestApp::new();

    let response = app
        .post_json(
            "/api/v1/ratings",
            &json!({
                "identity": "8a1c",
                "invite": "6f1c2d9e-8a5b-4c3d-9e7f-1a2b3c4d5e6f",
                "question_id": 1,
                "question_text": "How was the service?",
                "answer_text": "a".repeat(256),
                "answer_value": "good"
            }),
        )
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["message"],
        "answer_text: Answer text must be at most 255 characters"
    );
}

#[tokio::test]
async fn test_get_rating_rejects_malformed_id() {
    let app = TestApp::new();

    let response = app.get("/api/v1/ratings/42").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["message"], "Invalid rating ID");
}
