//! Model events hooks can subscribe to.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A model lifecycle event, named `<model>.<action>` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HookEvent {
    #[serde(rename = "invite.added")]
    InviteAdded,
    #[serde(rename = "invite.changed")]
    InviteChanged,
    #[serde(rename = "invite.deleted")]
    InviteDeleted,
    #[serde(rename = "rating.added")]
    RatingAdded,
    #[serde(rename = "rating.changed")]
    RatingChanged,
    #[serde(rename = "rating.deleted")]
    RatingDeleted,
}

impl HookEvent {
    pub const ALL: [HookEvent; 6] = [
        HookEvent::InviteAdded,
        HookEvent::InviteChanged,
        HookEvent::InviteDeleted,
        HookEvent::RatingAdded,
        HookEvent::RatingChanged,
        HookEvent::RatingDeleted,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HookEvent::InviteAdded => "invite.added",
            HookEvent::InviteChanged => "invite.changed",
            HookEvent::InviteDeleted => "invite.deleted",
            HookEvent::RatingAdded => "rating.added",
            HookEvent::RatingChanged => "rating.changed",
            HookEvent::RatingDeleted => "rating.deleted",
        }
    }
}

impl fmt::Display for HookEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for event names outside [`HookEvent::ALL`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown hook event: {0}")]
pub struct UnknownHookEvent(pub String);

impl FromStr for HookEvent {
    type Err = UnknownHookEvent;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HookEvent::ALL
            .into_iter()
            .find(|event| event.as_str() == s)
            .ok_or_else(|| UnknownHookEvent(s.to_string()))
    }
}
