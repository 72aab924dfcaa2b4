//! Identifier of a record that triggered a hook.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Primary key of a hook-triggering record.
///
/// Serializes as a bare JSON number or string, so a delivery job carries
/// `"instance_id": 42` or `"instance_id": "6f1c..."`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Int(i64),
    Uuid(Uuid),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Int(id) => write!(f, "{}", id),
            RecordId::Uuid(id) => write!(f, "{}", id),
        }
    }
}

impl From<i64> for RecordId {
    fn from(id: i64) -> Self {
        RecordId::Int(id)
    }
}

impl From<Uuid> for RecordId {
    fn from(id: Uuid) -> Self {
        RecordId::Uuid(id)
    }
}

/// A record that can be referenced from a webhook delivery.
pub trait HookInstance {
    fn record_id(&self) -> RecordId;
}

impl HookInstance for RecordId {
    fn record_id(&self) -> RecordId {
        *self
    }
}
