//! Rating Invite entity and repository trait.
//!
//! Maps to the `invites` table in the database schema.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::domain::value_objects::{HookInstance, RecordId};
use crate::shared::error::AppError;

/// Key in [`Invite::invite`] holding the recipient address.
pub const TO_ADDR_KEY: &str = "to_addr";

/// Key in [`Invite::invite`] holding a message body override.
pub const CONTENT_KEY: &str = "content";

/// An invitation for an identity to rate a service.
///
/// Maps to the `invites` table:
/// - id: UUID PRIMARY KEY
/// - identity: VARCHAR(36) NOT NULL
/// - version: INTEGER NOT NULL DEFAULT 1
/// - invited / completed / expired: BOOLEAN NOT NULL DEFAULT FALSE
/// - invite: JSONB NOT NULL (recipient and content overrides)
/// - expires_at: TIMESTAMPTZ NULL
/// - created_at / updated_at: TIMESTAMPTZ NOT NULL DEFAULT NOW()
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invite {
    pub id: Uuid,

    /// Identity being invited
    pub identity: String,

    /// Schema version of the `invite` data
    pub version: i32,

    /// Whether the invite message has gone out
    pub invited: bool,

    /// Whether the identity has completed the rating
    pub completed: bool,

    /// Whether the invite has lapsed
    pub expired: bool,

    /// Free-form invite data; `to_addr` and `content` are recognized
    pub invite: Map<String, Value>,

    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Invite {
    /// Create a new, not yet sent invite.
    pub fn new(identity: impl Into<String>, invite: Map<String, Value>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            identity: identity.into(),
            version: 1,
            invited: false,
            completed: false,
            expired: false,
            invite,
            expires_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Raw recipient override, if any.
    pub fn to_addr(&self) -> Option<&Value> {
        self.invite.get(TO_ADDR_KEY)
    }

    /// Raw content override, if any.
    pub fn content(&self) -> Option<&Value> {
        self.invite.get(CONTENT_KEY)
    }

    /// Whether the invite message should be sent once the record is stored.
    pub fn needs_sending(&self) -> bool {
        !self.invited
    }
}

impl HookInstance for Invite {
    fn record_id(&self) -> RecordId {
        RecordId::Uuid(self.id)
    }
}

/// Field filters for listing invites. `None` fields are not filtered on.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct InviteFilter {
    pub identity: Option<String>,
    pub version: Option<i32>,
    pub invited: Option<bool>,
    pub completed: Option<bool>,
    pub expired: Option<bool>,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Repository trait for Invite data access operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InviteRepository: Send + Sync {
    /// Find an invite by id.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Invite>, AppError>;

    /// List invites matching the filter, newest first.
    async fn list(&self, filter: &InviteFilter) -> Result<Vec<Invite>, AppError>;

    /// Insert a new invite.
    async fn create(&self, invite: &Invite) -> Result<Invite, AppError>;

    /// Persist every mutable field of an existing invite.
    async fn update(&self, invite: &Invite) -> Result<Invite, AppError>;

    /// Delete an invite by id. Returns an error if it does not exist.
    async fn delete(&self, id: Uuid) -> Result<(), AppError>;
}
