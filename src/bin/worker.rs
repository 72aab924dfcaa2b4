//! # Service Rating Worker
//!
//! Standalone worker pool consuming the job queue. Runs until ctrl-c, then
//! lets in-flight jobs finish.

use anyhow::{bail, Result};
use tracing::info;

use service_rating::config::{QueueBackend, Settings};
use service_rating::startup::{build_worker, shutdown_signal};

#[tokio::main]
async fn main() -> Result<()> {
    service_rating::telemetry::init_tracing();

    let settings = Settings::load()?;
    if settings.queue.backend == QueueBackend::Memory {
        bail!("The standalone worker needs a shared broker; set queue.backend = \"redis\"");
    }

    info!(
        environment = %settings.environment,
        workers = settings.queue.workers,
        key = %settings.queue.key,
        "Starting Service Rating worker"
    );

    let handle = build_worker(&settings).await?.spawn();

    shutdown_signal().await;
    handle.shutdown().await;

    Ok(())
}
