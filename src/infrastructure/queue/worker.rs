//! Worker pool consuming the job queue.

use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::future::join_all;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info, instrument};

use super::JobQueue;
use crate::application::tasks::{JobExecutor, QueuedJob};
use crate::config::QueueSettings;
use crate::infrastructure::metrics;

/// A pool of concurrent loops popping jobs and running each exactly once.
///
/// Failed jobs are logged and counted, never re-queued.
pub struct Worker {
    queue: Arc<dyn JobQueue>,
    executor: Arc<JobExecutor>,
    concurrency: usize,
    poll_interval: Duration,
}

/// Running worker pool.
pub struct WorkerHandle {
    shutdown: watch::Sender<bool>,
    loops: Vec<JoinHandle<()>>,
}

impl Worker {
    pub fn new(
        queue: Arc<dyn JobQueue>,
        executor: Arc<JobExecutor>,
        concurrency: usize,
        poll_interval: Duration,
    ) -> Self {
        Self {
            queue,
            executor,
            concurrency: concurrency.max(1),
            poll_interval,
        }
    }

    pub fn from_settings(
        queue: Arc<dyn JobQueue>,
        executor: Arc<JobExecutor>,
        settings: &QueueSettings,
    ) -> Self {
        Self::new(
            queue,
            executor,
            settings.workers,
            Duration::from_millis(settings.poll_interval_ms),
        )
    }

    /// Spawn the worker loops onto the current tokio runtime.
    pub fn spawn(self) -> WorkerHandle {
        let (shutdown, shutdown_rx) = watch::channel(false);

        info!(
            workers = self.concurrency,
            backend = self.queue.backend(),
            "Starting worker pool"
        );

        let loops = (0..self.concurrency)
            .map(|worker_id| {
                tokio::spawn(worker_loop(
                    worker_id,
                    self.queue.clone(),
                    self.executor.clone(),
                    self.poll_interval,
                    shutdown_rx.clone(),
                ))
            })
            .collect();

        WorkerHandle { shutdown, loops }
    }
}

impl WorkerHandle {
    /// Signal every loop to stop and wait for in-flight jobs to finish.
    pub async fn shutdown(self) {
        let _ = self.shutdown.send(true);
        for result in join_all(self.loops).await {
            if let Err(e) = result {
                error!(error = %e, "Worker loop panicked");
            }
        }
        info!("Worker pool stopped");
    }
}

async fn worker_loop(
    worker_id: usize,
    queue: Arc<dyn JobQueue>,
    executor: Arc<JobExecutor>,
    poll_interval: Duration,
    mut shutdown: watch::Receiver<bool>,
) {
    loop {
        if *shutdown.borrow() {
            break;
        }

        match queue.pop().await {
            Ok(Some(job)) => process_job(worker_id, &executor, job).await,
            Ok(None) => idle(poll_interval, &mut shutdown).await,
            Err(e) => {
                error!(worker_id, error = %e, "Failed to pop job");
                idle(poll_interval, &mut shutdown).await;
            }
        }
    }
}

async fn idle(poll_interval: Duration, shutdown: &mut watch::Receiver<bool>) {
    tokio::select! {
        _ = tokio::time::sleep(poll_interval) => {}
        _ = shutdown.changed() => {}
    }
}

/// Run one job and report its outcome.
#[instrument(skip(executor, job), fields(job_id = %job.id, task = job.job.name()))]
pub async fn process_job(worker_id: usize, executor: &JobExecutor, job: QueuedJob) {
    let task = job.job.name();
    let started = Instant::now();

    let result = executor.execute(&job.job).await;
    let elapsed = started.elapsed().as_secs_f64();

    match result {
        Ok(summary) => {
            metrics::record_job(task, "succeeded", elapsed);
            info!(worker_id, result = %summary, "Job succeeded");
        }
        Err(e) => {
            metrics::record_job(task, "failed", elapsed);
            error!(worker_id, error = %e, "Job failed");
        }
    }
}
