//! Rating entity and repository trait.
//!
//! Maps to the `ratings` table in the database schema.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::{HookInstance, RecordId};
use crate::shared::error::AppError;

/// One answer given by an identity in response to an invite.
///
/// Maps to the `ratings` table:
/// - id: UUID PRIMARY KEY
/// - identity: VARCHAR(36) NOT NULL
/// - invite_id: UUID NOT NULL REFERENCES invites(id)
/// - version: INTEGER NOT NULL DEFAULT 1
/// - question_id: INTEGER NOT NULL
/// - question_text / answer_text / answer_value: VARCHAR(255) NOT NULL
/// - created_at: TIMESTAMPTZ NOT NULL DEFAULT NOW()
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub id: Uuid,
    pub identity: String,
    /// Invite this rating answers
    pub invite: Uuid,
    pub version: i32,
    pub question_id: i32,
    pub question_text: String,
    pub answer_text: String,
    pub answer_value: String,
    pub created_at: DateTime<Utc>,
}

impl HookInstance for Rating {
    fn record_id(&self) -> RecordId {
        RecordId::Uuid(self.id)
    }
}

/// Field filters for listing ratings.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RatingFilter {
    pub identity: Option<String>,
    pub invite: Option<Uuid>,
    pub version: Option<i32>,
    pub question_id: Option<i32>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Repository trait for Rating data access operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RatingRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Rating>, AppError>;

    /// List ratings matching the filter, newest first.
    async fn list(&self, filter: &RatingFilter) -> Result<Vec<Rating>, AppError>;

    async fn create(&self, rating: &Rating) -> Result<Rating, AppError>;

    async fn update(&self, rating: &Rating) -> Result<Rating, AppError>;

    async fn delete(&self, id: Uuid) -> Result<(), AppError>;
}
