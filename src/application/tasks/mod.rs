//! Background Tasks
//!
//! Jobs executed by the worker pool, and the envelope they travel in.
//!
//! ## Tasks
//!
//! - **send_invite_message**: Compile an invite's outbound message and hand it
//!   to the message sender
//! - **deliver_hook**: POST a hook payload to its target
//!
//! Every task runs once. Nothing here retries, deduplicates or records
//! progress: re-running `send_invite_message` for an invite sends the
//! message again.

mod deliver_hook;
mod send_invite_message;

pub use deliver_hook::{deliver_hook_wrapper, DeliverHook, DeliverHookJob};
pub use send_invite_message::{compile_msg_payload, confirmation, SendInviteMessage};

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    HookDeliverer, HookDeliveryError, InviteRepository, MessageSender, MessageSenderError,
};
use crate::infrastructure::queue::QueueError;

/// A unit of background work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "task", content = "kwargs", rename_all = "snake_case")]
pub enum Job {
    SendInviteMessage { invite_id: Uuid },
    DeliverHook(DeliverHookJob),
}

impl Job {
    /// Task name used in logs and metrics.
    pub fn name(&self) -> &'static str {
        match self {
            Job::SendInviteMessage { .. } => SendInviteMessage::NAME,
            Job::DeliverHook(_) => DeliverHook::NAME,
        }
    }
}

/// Envelope stored on the broker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueuedJob {
    pub id: Uuid,
    pub enqueued_at: DateTime<Utc>,
    pub job: Job,
}

impl QueuedJob {
    pub fn new(job: Job) -> Self {
        Self {
            id: Uuid::new_v4(),
            enqueued_at: Utc::now(),
            job,
        }
    }
}

/// Task failures. All of them end the job; none are retried.
#[derive(Debug, thiserror::Error)]
pub enum TaskError {
    #[error("Invite {0} not found")]
    InviteNotFound(Uuid),

    #[error("Invite {0} has no recipient address (to_addr)")]
    MissingRecipient(Uuid),

    #[error("Invite {invite_id} field `{field}` must be a string")]
    InvalidField { invite_id: Uuid, field: &'static str },

    #[error(transparent)]
    MessageSender(#[from] MessageSenderError),

    #[error(transparent)]
    HookDelivery(#[from] HookDeliveryError),

    #[error("Repository error: {0}")]
    Repository(String),

    #[error(transparent)]
    Queue(#[from] QueueError),
}

/// Routes each [`Job`] to its task.
pub struct JobExecutor {
    send_invite: SendInviteMessage,
    deliver_hook: DeliverHook,
}

impl JobExecutor {
    pub fn new(
        invite_repo: Arc<dyn InviteRepository>,
        sender: Arc<dyn MessageSender>,
        deliverer: Arc<dyn HookDeliverer>,
        invite_text: impl Into<String>,
    ) -> Self {
        Self {
            send_invite: SendInviteMessage::new(invite_repo, sender, invite_text),
            deliver_hook: DeliverHook::new(deliverer),
        }
    }

    /// Run a job to completion, returning its human-readable result.
    pub async fn execute(&self, job: &Job) -> Result<String, TaskError> {
        match job {
            Job::SendInviteMessage { invite_id } => self.send_invite.run(*invite_id).await,
            Job::DeliverHook(job) => self.deliver_hook.run(job).await,
        }
    }
}
