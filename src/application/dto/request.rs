//! Request DTOs
//!
//! Data structures for API request bodies and query strings.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{Map, Value};
use uuid::Uuid;
use validator::Validate;

use crate::application::services::{
    HookInputDto, InviteInputDto, InvitePatchDto, RatingInputDto, RatingPatchDto,
};

/// Create or replace invite request
#[derive(Debug, Deserialize, Validate)]
pub struct InviteRequest {
    #[validate(length(min = 1, max = 36, message = "Identity must be 1-36 characters"))]
    pub identity: String,

    /// Recipient and content overrides (`to_addr`, `content`)
    #[serde(default)]
    pub invite: Map<String, Value>,

    #[validate(range(min = 1, message = "Version must be positive"))]
    pub version: Option<i32>,

    pub invited: Option<bool>,
    pub completed: Option<bool>,
    pub expired: Option<bool>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl From<InviteRequest> for InviteInputDto {
    fn from(body: InviteRequest) -> Self {
        Self {
            identity: body.identity,
            invite: body.invite,
            version: body.version,
            invited: body.invited,
            completed: body.completed,
            expired: body.expired,
            expires_at: body.expires_at,
        }
    }
}

/// Partial invite update request
#[derive(Debug, Default, Deserialize, Validate)]
pub struct InvitePatchRequest {
    #[validate(length(min = 1, max = 36, message = "Identity must be 1-36 characters"))]
    pub identity: Option<String>,

    pub invite: Option<Map<String, Value>>,

    #[validate(range(min = 1, message = "Version must be positive"))]
    pub version: Option<i32>,

    pub invited: Option<bool>,
    pub completed: Option<bool>,
    pub expired: Option<bool>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl From<InvitePatchRequest> for InvitePatchDto {
    fn from(body: InvitePatchRequest) -> Self {
        Self {
            identity: body.identity,
            invite: body.invite,
            version: body.version,
            invited: body.invited,
            completed: body.completed,
            expired: body.expired,
            expires_at: body.expires_at,
        }
    }
}

/// Create or replace rating request
#[derive(Debug, Deserialize, Validate)]
pub struct RatingRequest {
    #[validate(length(min = 1, max = 36, message = "Identity must be 1-36 characters"))]
    pub identity: String,

    pub invite: Uuid,

    #[validate(range(min = 1, message = "Version must be positive"))]
    pub version: Option<i32>,

    pub question_id: i32,

    #[validate(length(max = 255, message = "Question text must be at most 255 characters"))]
    pub question_text: String,

    #[validate(length(max = 255, message = "Answer text must be at most 255 characters"))]
    pub answer_text: String,

    #[validate(length(max = 255, message = "Answer value must be at most 255 characters"))]
    pub answer_value: String,
}

impl From<RatingRequest> for RatingInputDto {
    fn from(body: RatingRequest) -> Self {
        Self {
            identity: body.identity,
            invite: body.invite,
            version: body.version,
            question_id: body.question_id,
            question_text: body.question_text,
            answer_text: body.answer_text,
            answer_value: body.answer_value,
        }
    }
}

/// Partial rating update request
#[derive(Debug, Default, Deserialize, Validate)]
pub struct RatingPatchRequest {
    #[validate(length(min = 1, max = 36, message = "Identity must be 1-36 characters"))]
    pub identity: Option<String>,

    pub invite: Option<Uuid>,

    #[validate(range(min = 1, message = "Version must be positive"))]
    pub version: Option<i32>,

    pub question_id: Option<i32>,

    #[validate(length(max = 255, message = "Question text must be at most 255 characters"))]
    pub question_text: Option<String>,

    #[validate(length(max = 255, message = "Answer text must be at most 255 characters"))]
    pub answer_text: Option<String>,

    #[validate(length(max = 255, message = "Answer value must be at most 255 characters"))]
    pub answer_value: Option<String>,
}

impl From<RatingPatchRequest> for RatingPatchDto {
    fn from(body: RatingPatchRequest) -> Self {
        Self {
            identity: body.identity,
            invite: body.invite,
            version: body.version,
            question_id: body.question_id,
            question_text: body.question_text,
            answer_text: body.answer_text,
            answer_value: body.answer_value,
        }
    }
}

/// Register or replace hook request
#[derive(Debug, Deserialize, Validate)]
pub struct HookRequest {
    /// Owning user
    pub user_id: Option<i64>,

    #[validate(
        url(message = "Target must be a valid URL"),
        length(max = 255, message = "Target must be at most 255 characters")
    )]
    pub target: String,

    /// One of the `invite.*` / `rating.*` event names
    #[validate(length(min = 1, message = "Event is required"))]
    pub event: String,
}

impl From<HookRequest> for HookInputDto {
    fn from(body: HookRequest) -> Self {
        Self {
            user_id: body.user_id,
            target: body.target,
            event: body.event,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_invite_request_defaults_data() {
        let body: InviteRequest = serde_json::from_value(json!({"identity": "8a1c"})).unwrap();
        assert!(body.invite.is_empty());
        assert!(body.validate().is_ok());
    }

    #[test]
    fn test_identity_length_is_checked() {
        let body: InviteRequest =
            serde_json::from_value(json!({"identity": "x".repeat(37)})).unwrap();
        assert!(body.validate().is_err());
    }

    #[test]
    fn test_hook_target_must_be_url() {
        let body: HookRequest = serde_json::from_value(json!({
            "target": "not a url",
            "event": "invite.added"
        }))
        .unwrap();
        assert!(body.validate().is_err());

        let body: HookRequest = serde_json::from_value(json!({
            "target": "https://example.com/hook",
            "event": "invite.added"
        }))
        .unwrap();
        assert!(body.validate().is_ok());
    }
}
