//! Job Queue Module
//!
//! Broker abstraction for background jobs.
//!
//! ```text
//! +-------------------+        +-------------------+
//! |  HTTP handlers    |        |   Worker pool     |
//! +-------------------+        +-------------------+
//!          | enqueue                    ^ pop
//!          v                            |
//! +---------------------------------------------+
//! |              JobQueue trait                 |
//! +---------------------------------------------+
//!          |                            |
//!          v                            v
//! +-------------------+        +-------------------+
//! |  RedisJobQueue    |        | InMemoryJobQueue  |
//! +-------------------+        +-------------------+
//! ```
//!
//! Jobs are delivered at most once: a popped job is gone from the broker
//! whether or not it succeeds.

mod memory_queue;
mod redis_queue;
mod worker;

pub use memory_queue::InMemoryJobQueue;
pub use redis_queue::{create_redis_client, RedisJobQueue};
pub use worker::{Worker, WorkerHandle};

use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use crate::application::tasks::{Job, QueuedJob};
use crate::infrastructure::metrics;

/// Job queue errors.
#[derive(Debug, thiserror::Error)]
pub enum QueueError {
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Job encoding failed: {0}")]
    Encode(serde_json::Error),

    #[error("Dropped undecodable job: {0}")]
    Decode(serde_json::Error),
}

/// A FIFO broker for [`QueuedJob`]s.
#[async_trait]
pub trait JobQueue: Send + Sync {
    /// Append a job to the tail of the queue.
    async fn push(&self, job: &QueuedJob) -> Result<(), QueueError>;

    /// Remove and return the head of the queue, if any.
    async fn pop(&self) -> Result<Option<QueuedJob>, QueueError>;

    /// Check the broker is reachable.
    async fn ping(&self) -> Result<(), QueueError>;

    /// Short backend name for logs and health output.
    fn backend(&self) -> &'static str;

    /// Wrap `job` in an envelope and push it. Returns the job id.
    async fn enqueue(&self, job: Job) -> Result<Uuid, QueueError> {
        let queued = QueuedJob::new(job);
        self.push(&queued).await?;
        metrics::record_job_enqueued(queued.job.name());
        debug!(
            job_id = %queued.id,
            task = queued.job.name(),
            backend = self.backend(),
            "Job enqueued"
        );
        Ok(queued.id)
    }
}
