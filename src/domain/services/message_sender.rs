//! Message sender port.

use async_trait::async_trait;

use crate::domain::value_objects::{OutboundCreated, OutboundMessage};

/// Failure talking to the message sender API.
#[derive(Debug, thiserror::Error)]
pub enum MessageSenderError {
    #[error("Message sender request failed: {0}")]
    Transport(String),

    #[error("Message sender returned {status}: {body}")]
    Api { status: u16, body: String },
}

/// External API that turns an [`OutboundMessage`] into a queued message.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageSender: Send + Sync {
    /// Create an outbound message. Errors are never retried here.
    async fn create_outbound(
        &self,
        payload: &OutboundMessage,
    ) -> Result<OutboundCreated, MessageSenderError>;
}
