//! Process-local job queue.

use std::collections::VecDeque;

use async_trait::async_trait;
use parking_lot::Mutex;

use super::{JobQueue, QueueError};
use crate::application::tasks::QueuedJob;

/// In-memory FIFO queue. Jobs do not survive a restart and are only
/// visible to workers in the same process.
#[derive(Debug, Default)]
pub struct InMemoryJobQueue {
    jobs: Mutex<VecDeque<QueuedJob>>,
}

impl InMemoryJobQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.jobs.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.lock().is_empty()
    }

    /// Snapshot of the queued jobs, head first.
    pub fn jobs(&self) -> Vec<QueuedJob> {
        self.jobs.lock().iter().cloned().collect()
    }
}

#[async_trait]
impl JobQueue for InMemoryJobQueue {
    async fn push(&self, job: &QueuedJob) -> Result<(), QueueError> {
        self.jobs.lock().push_back(job.clone());
        Ok(())
    }

    async fn pop(&self) -> Result<Option<QueuedJob>, QueueError> {
        Ok(self.jobs.lock().pop_front())
    }

    async fn ping(&self) -> Result<(), QueueError> {
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
