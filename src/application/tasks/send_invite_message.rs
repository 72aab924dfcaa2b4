//! `send_invite_message` task.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use super::TaskError;
use crate::domain::{
    Invite, InviteRepository, MessageId, MessageSender, OutboundCreated, OutboundMessage,
    CONTENT_KEY, TO_ADDR_KEY,
};

/// Looks up an invite, compiles its message and hands it to the sender.
pub struct SendInviteMessage {
    invite_repo: Arc<dyn InviteRepository>,
    sender: Arc<dyn MessageSender>,
    invite_text: String,
}

impl SendInviteMessage {
    pub const NAME: &'static str = "send_invite_message";

    pub fn new(
        invite_repo: Arc<dyn InviteRepository>,
        sender: Arc<dyn MessageSender>,
        invite_text: impl Into<String>,
    ) -> Self {
        Self {
            invite_repo,
            sender,
            invite_text: invite_text.into(),
        }
    }

    /// Build the outbound payload using the configured default text.
    pub fn compile_msg_payload(&self, invite: &Invite) -> Result<OutboundMessage, TaskError> {
        compile_msg_payload(invite, &self.invite_text)
    }

    pub async fn send_message(
        &self,
        payload: &OutboundMessage,
    ) -> Result<OutboundCreated, TaskError> {
        info!("Creating outbound message request");
        let created = self.sender.create_outbound(payload).await?;
        debug!(response = ?created, "Message sender response");
        info!("Created outbound message request");
        Ok(created)
    }

    /// Send the invite message for `invite_id`. Every call sends a new message.
    #[instrument(skip(self))]
    pub async fn run(&self, invite_id: Uuid) -> Result<String, TaskError> {
        info!("Looking up the invite");
        let invite = self
            .invite_repo
            .find_by_id(invite_id)
            .await
            .map_err(|e| TaskError::Repository(e.to_string()))?
            .ok_or(TaskError::InviteNotFound(invite_id))?;

        let payload = self.compile_msg_payload(&invite)?;
        let created = self.send_message(&payload).await?;
        Ok(confirmation(&created.id))
    }
}

/// Turn an invite into an outbound message.
///
/// `to_addr` is required. `content` falls back to `default_text`.
pub fn compile_msg_payload(
    invite: &Invite,
    default_text: &str,
) -> Result<OutboundMessage, TaskError> {
    info!(invite_id = %invite.id, "Compiling the outbound message payload");

    let to_addr = match invite.to_addr() {
        Some(value) => string_field(invite.id, TO_ADDR_KEY, value)?,
        None => return Err(TaskError::MissingRecipient(invite.id)),
    };

    let content = match invite.content() {
        Some(value) => string_field(invite.id, CONTENT_KEY, value)?,
        None => default_text.to_string(),
    };

    let payload = OutboundMessage::new(to_addr, content);
    info!(invite_id = %invite.id, "Compiled the outbound message payload");
    Ok(payload)
}

fn string_field(invite_id: Uuid, field: &'static str, value: &Value) -> Result<String, TaskError> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or(TaskError::InvalidField { invite_id, field })
}

/// Result string reported for a sent invite.
pub fn confirmation(id: &MessageId) -> String {
    format!("Message queued for send. ID: <{}>", id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MessageSenderError, MockInviteRepository, MockMessageSender};
    use crate::shared::error::AppError;
    use mockall::predicate::eq;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Map};

    const DEFAULT_TEXT: &str = "Please rate the service you received";

    fn invite_with(data: Value) -> Invite {
        Invite::new("8a1c", data.as_object().cloned().unwrap_or_default())
    }

    fn created(id: &str) -> OutboundCreated {
        OutboundCreated {
            id: MessageId::Text(id.to_string()),
            extra: Map::new(),
        }
    }

    #[test]
    fn test_to_addr_is_copied_exactly() {
        let invite = invite_with(json!({"to_addr": "+27 12 345 6789"}));
        let payload = compile_msg_payload(&invite, DEFAULT_TEXT).unwrap();
        assert_eq!(payload.to_addr, "+27 12 345 6789");
    }

    #[test]
    fn test_missing_content_uses_default_text() {
        let invite = invite_with(json!({"to_addr": "+27123"}));
        let payload = compile_msg_payload(&invite, DEFAULT_TEXT).unwrap();
        assert_eq!(payload.content, DEFAULT_TEXT);
    }

    #[test]
    fn test_content_override_is_copied() {
        let invite = invite_with(json!({"to_addr": "+27123", "content": "How did we do?"}));
        let payload = compile_msg_payload(&invite, DEFAULT_TEXT).unwrap();
        assert_eq!(payload.content, "How did we do?");
    }

    #[test]
    fn test_metadata_is_always_empty() {
        let invite = invite_with(json!({
            "to_addr": "+27123",
            "content": "hi",
            "metadata": {"ignored": true}
        }));
        let payload = compile_msg_payload(&invite, DEFAULT_TEXT).unwrap();
        assert!(payload.metadata.is_empty());
    }

    #[test]
    fn test_missing_recipient_is_an_error() {
        let invite = invite_with(json!({"content": "hi"}));
        let err = compile_msg_payload(&invite, DEFAULT_TEXT).unwrap_err();
        assert!(matches!(err, TaskError::MissingRecipient(id) if id == invite.id));
    }

    #[test]
    fn test_non_string_recipient_is_rejected() {
        let invite = invite_with(json!({"to_addr": 27123}));
        let err = compile_msg_payload(&invite, DEFAULT_TEXT).unwrap_err();
        assert!(matches!(err, TaskError::InvalidField { field: "to_addr", .. }));
    }

    #[test]
    fn test_confirmation_format() {
        assert_eq!(
            confirmation(&MessageId::Text("abc123".into())),
            "Message queued for send. ID: <abc123>"
        );
        assert_eq!(
            confirmation(&MessageId::Number(17)),
            "Message queued for send. ID: <17>"
        );
    }

    #[tokio::test]
    async fn test_run_returns_confirmation() {
        let invite = invite_with(json!({"to_addr": "+27123"}));
        let invite_id = invite.id;

        let mut repo = MockInviteRepository::new();
        repo.expect_find_by_id()
            .with(eq(invite_id))
            .times(1)
            .returning(move |_| Ok(Some(invite.clone())));

        let mut sender = MockMessageSender::new();
        sender
            .expect_create_outbound()
            .withf(|payload| {
                payload.to_addr == "+27123"
                    && payload.content == DEFAULT_TEXT
                    && payload.metadata.is_empty()
            })
            .times(1)
            .returning(|_| Ok(created("abc123")));

        let task = SendInviteMessage::new(Arc::new(repo), Arc::new(sender), DEFAULT_TEXT);
        let result = task.run(invite_id).await.unwrap();
        assert_eq!(result, "Message queued for send. ID: <abc123>");
    }

    #[tokio::test]
    async fn test_unknown_invite_skips_dispatch() {
        let mut repo = MockInviteRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));

        let mut sender = MockMessageSender::new();
        sender.expect_create_outbound().times(0);

        let task = SendInviteMessage::new(Arc::new(repo), Arc::new(sender), DEFAULT_TEXT);
        let invite_id = Uuid::new_v4();
        let err = task.run(invite_id).await.unwrap_err();
        assert!(matches!(err, TaskError::InviteNotFound(id) if id == invite_id));
    }

    #[tokio::test]
    async fn test_repository_failure_is_reported() {
        let mut repo = MockInviteRepository::new();
        repo.expect_find_by_id()
            .returning(|_| Err(AppError::Internal("connection reset".into())));

        let mut sender = MockMessageSender::new();
        sender.expect_create_outbound().times(0);

        let task = SendInviteMessage::new(Arc::new(repo), Arc::new(sender), DEFAULT_TEXT);
        let err = task.run(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, TaskError::Repository(_)));
    }

    #[tokio::test]
    async fn test_sender_errors_propagate() {
        let invite = invite_with(json!({"to_addr": "+27123"}));
        let invite_id = invite.id;

        let mut repo = MockInviteRepository::new();
        repo.expect_find_by_id()
            .returning(move |_| Ok(Some(invite.clone())));

        let mut sender = MockMessageSender::new();
        sender.expect_create_outbound().times(1).returning(|_| {
            Err(MessageSenderError::Api {
                status: 503,
                body: "unavailable".into(),
            })
        });

        let task = SendInviteMessage::new(Arc::new(repo), Arc::new(sender), DEFAULT_TEXT);
        let err = task.run(invite_id).await.unwrap_err();
        assert!(matches!(
            err,
            TaskError::MessageSender(MessageSenderError::Api { status: 503, .. })
        ));
    }
}
