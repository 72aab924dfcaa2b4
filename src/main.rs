//! # Service Rating API
//!
//! This is the application entry point that initializes:
//! - Tracing/logging subsystem
//! - Configuration loading
//! - Database connection pool and migrations
//! - Job broker connection (and the embedded worker pool, when enabled)
//! - HTTP server

use anyhow::Result;
use tracing::info;

use service_rating::config::Settings;
use service_rating::startup::Application;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber for structured logging
    service_rating::telemetry::init_tracing();

    info!("Starting Service Rating API...");

    // Load configuration from environment and config files
    let settings = Settings::load()?;
    info!(
        host = %settings.server.host,
        port = %settings.server.port,
        environment = %settings.environment,
        queue = ?settings.queue.backend,
        embedded_worker = settings.queue.embedded_worker,
        "Configuration loaded"
    );

    // Build and run the application
    let application = Application::build(settings).await?;

    info!("Server ready to accept connections");
    application.run_until_stopped().await?;

    Ok(())
}
