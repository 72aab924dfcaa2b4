//! `deliver_hook` task and the glue that schedules it.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, instrument};
use uuid::Uuid;

use super::{Job, TaskError};
use crate::domain::{Hook, HookDeliverer, HookInstance, RecordId};
use crate::infrastructure::queue::{JobQueue, QueueError};

/// Everything one webhook delivery needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliverHookJob {
    pub target: String,
    pub payload: Value,
    /// Key of the record that fired the event, if any
    pub instance_id: Option<RecordId>,
    pub hook_id: i64,
}

/// POSTs a payload to a hook target exactly once.
pub struct DeliverHook {
    deliverer: Arc<dyn HookDeliverer>,
}

impl DeliverHook {
    pub const NAME: &'static str = "deliver_hook";

    pub fn new(deliverer: Arc<dyn HookDeliverer>) -> Self {
        Self { deliverer }
    }

    /// The response status is not inspected; only transport errors fail the job.
    #[instrument(skip(self, job), fields(hook_id = job.hook_id, target = %job.target))]
    pub async fn run(&self, job: &DeliverHookJob) -> Result<String, TaskError> {
        self.deliverer.post(&job.target, &job.payload).await?;
        Ok(format!("Hook {} delivered to {}", job.hook_id, job.target))
    }
}

/// Schedule delivery of `payload` to `target` on behalf of `hook`.
pub async fn deliver_hook_wrapper<T>(
    queue: &dyn JobQueue,
    target: &str,
    payload: Value,
    instance: Option<&T>,
    hook: &Hook,
) -> Result<Uuid, QueueError>
where
    T: HookInstance + ?Sized,
{
    let job = DeliverHookJob {
        target: target.to_string(),
        payload,
        instance_id: instance.map(|instance| instance.record_id()),
        hook_id: hook.id,
    };

    debug!(hook_id = hook.id, instance_id = ?job.instance_id, "Scheduling hook delivery");
    queue.enqueue(Job::DeliverHook(job)).await
}
