//! Webhook subscription entity and repository trait.
//!
//! Maps to the `hooks` table in the database schema.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::HookEvent;
use crate::shared::error::AppError;

/// A registered webhook: POST to `target` whenever `event` fires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hook {
    pub id: i64,

    /// Owning user (None when registered without one)
    pub user_id: Option<i64>,

    /// URL receiving the delivery
    pub target: String,

    pub event: HookEvent,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for registering or replacing a hook.
#[derive(Debug, Clone, PartialEq)]
pub struct NewHook {
    pub user_id: Option<i64>,
    pub target: String,
    pub event: HookEvent,
}

/// Repository trait for Hook data access operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HookRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<Hook>, AppError>;

    /// All hooks, oldest first.
    async fn list(&self) -> Result<Vec<Hook>, AppError>;

    /// Hooks subscribed to `event`.
    async fn find_by_event(&self, event: HookEvent) -> Result<Vec<Hook>, AppError>;

    async fn create(&self, hook: &NewHook) -> Result<Hook, AppError>;

    async fn update(&self, id: i64, hook: &NewHook) -> Result<Hook, AppError>;

    async fn delete(&self, id: i64) -> Result<(), AppError>;
}
