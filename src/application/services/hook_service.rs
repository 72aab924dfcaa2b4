//! Hook Service
//!
//! Webhook subscription management and event fan-out.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::application::tasks::deliver_hook_wrapper;
use crate::domain::{Hook, HookEvent, HookInstance, HookRepository, NewHook, RecordId};
use crate::infrastructure::queue::JobQueue;
use crate::shared::error::AppError;

/// Hook service trait
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HookService: Send + Sync {
    /// List all registered hooks
    async fn list_hooks(&self) -> Result<Vec<Hook>, HookError>;

    /// Get hook by ID
    async fn get_hook(&self, hook_id: i64) -> Result<Hook, HookError>;

    /// Register a hook
    async fn create_hook(&self, request: HookInputDto) -> Result<Hook, HookError>;

    /// Replace a hook's target and event
    async fn update_hook(&self, hook_id: i64, request: HookInputDto) -> Result<Hook, HookError>;

    /// Delete a hook
    async fn delete_hook(&self, hook_id: i64) -> Result<(), HookError>;

    /// Schedule one delivery per hook subscribed to `event`.
    ///
    /// `data` is the serialized record; returns how many deliveries were queued.
    /// Every hook is attempted even when an earlier push fails, and any
    /// failure is reported once the loop is done.
    async fn fire_event(
        &self,
        event: HookEvent,
        instance_id: RecordId,
        data: Value,
    ) -> Result<usize, HookError>;
}

/// Create/replace hook request
#[derive(Debug, Clone, PartialEq)]
pub struct HookInputDto {
    pub user_id: Option<i64>,
    pub target: String,
    pub event: String,
}

/// Hook service errors
#[derive(Debug, thiserror::Error)]
pub enum HookError {
    #[error("Hook not found")]
    NotFound,

    #[error("Unknown event: {0}")]
    InvalidEvent(String),

    #[error("Failed to schedule hook delivery: {0}")]
    Queue(String),

    #[error(transparent)]
    Repository(#[from] AppError),
}

/// Body POSTed to a hook target.
pub fn hook_payload(hook: &Hook, data: Value) -> Value {
    json!({
        "hook": {
            "id": hook.id,
            "event": hook.event,
            "target": hook.target,
        },
        "data": data,
    })
}

/// Fire `event` for `record`.
///
/// Failures are logged and swallowed; the change that triggered the event
/// has already been stored.
pub async fn fire_model_event<T>(hooks: &dyn HookService, event: HookEvent, record: &T)
where
    T: HookInstance + Serialize + Sync,
{
    let instance_id = record.record_id();
    let data = match serde_json::to_value(record) {
        Ok(data) => data,
        Err(e) => {
            warn!(
                event = %event,
                instance_id = %instance_id,
                error = %e,
                "Failed to serialize hook data"
            );
            return;
        }
    };

    if let Err(e) = hooks.fire_event(event, instance_id, data).await {
        warn!(event = %event, instance_id = %instance_id, error = %e, "Failed to fire event");
    }
}

/// HookService implementation
pub struct HookServiceImpl<H>
where
    H: HookRepository,
{
    hook_repo: Arc<H>,
    queue: Arc<dyn JobQueue>,
}

impl<H> HookServiceImpl<H>
where
    H: HookRepository,
{
    pub fn new(hook_repo: Arc<H>, queue: Arc<dyn JobQueue>) -> Self {
        Self { hook_repo, queue }
    }

    fn new_hook(request: HookInputDto) -> Result<NewHook, HookError> {
        let event = request
            .event
            .parse::<HookEvent>()
            .map_err(|_| HookError::InvalidEvent(request.event.clone()))?;

        Ok(NewHook {
            user_id: request.user_id,
            target: request.target,
            event,
        })
    }
}

#[async_trait]
impl<H> HookService for HookServiceImpl<H>
where
    H: HookRepository + 'static,
{
    async fn list_hooks(&self) -> Result<Vec<Hook>, HookError> {
        Ok(self.hook_repo.list().await?)
    }

    async fn get_hook(&self, hook_id: i64) -> Result<Hook, HookError> {
        self.hook_repo
            .find_by_id(hook_id)
            .await?
            .ok_or(HookError::NotFound)
    }

    async fn create_hook(&self, request: HookInputDto) -> Result<Hook, HookError> {
        let new_hook = Self::new_hook(request)?;
        let hook = self.hook_repo.create(&new_hook).await?;
        info!(hook_id = hook.id, event = %hook.event, "Hook registered");
        Ok(hook)
    }

    async fn update_hook(&self, hook_id: i64, request: HookInputDto) -> Result<Hook, HookError> {
        let new_hook = Self::new_hook(request)?;
        self.hook_repo
            .update(hook_id, &new_hook)
            .await
            .map_err(|e| match e {
                AppError::NotFound(_) => HookError::NotFound,
                e => HookError::Repository(e),
            })
    }

    async fn delete_hook(&self, hook_id: i64) -> Result<(), HookError> {
        self.hook_repo.delete(hook_id).await.map_err(|e| match e {
            AppError::NotFound(_) => HookError::NotFound,
            e => HookError::Repository(e),
        })
    }

    async fn fire_event(
        &self,
        event: HookEvent,
        instance_id: RecordId,
        data: Value,
    ) -> Result<usize, HookError> {
        let hooks = self.hook_repo.find_by_event(event).await?;

        // Each delivery is its own job; one broker error must not drop the rest.
        let mut failed = 0;
        for hook in &hooks {
            let payload = hook_payload(hook, data.clone());
            let queued = deliver_hook_wrapper(
                self.queue.as_ref(),
                &hook.target,
                payload,
                Some(&instance_id),
                hook,
            )
            .await;

            if let Err(e) = queued {
                warn!(hook_id = hook.id, error = %e, "Failed to schedule hook delivery");
                failed += 1;
            }
        }

        let queued = hooks.len() - failed;
        if !hooks.is_empty() {
            info!(
                event = %event,
                instance_id = %instance_id,
                deliveries = queued,
                failed,
                "Event fired"
            );
        }

        if failed > 0 {
            return Err(HookError::Queue(format!(
                "{} of {} deliveries could not be queued",
                failed,
                hooks.len()
            )));
        }

        Ok(queued)
    }
}
