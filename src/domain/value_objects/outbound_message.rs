//! Outbound message request sent to the message sender.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Body of a "create outbound message" call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundMessage {
    pub to_addr: String,
    pub content: String,
    /// Always empty for now
    pub metadata: Map<String, Value>,
}

impl OutboundMessage {
    pub fn new(to_addr: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            to_addr: to_addr.into(),
            content: content.into(),
            metadata: Map::new(),
        }
    }
}

/// Identifier the message sender assigns to a created outbound message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageId {
    Text(String),
    Number(i64),
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageId::Text(id) => f.write_str(id),
            MessageId::Number(id) => write!(f, "{}", id),
        }
    }
}

/// Response to a "create outbound message" call. Only `id` is required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutboundCreated {
    pub id: MessageId,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
