//! Application Startup
//!
//! Wiring for the API server and the worker pool.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use sqlx::PgPool;
use tokio::net::TcpListener;

use crate::application::tasks::JobExecutor;
use crate::config::{QueueBackend, Settings};
use crate::infrastructure::clients::{HttpHookDeliverer, HttpMessageSender};
use crate::infrastructure::database;
use crate::infrastructure::queue::{
    create_redis_client, InMemoryJobQueue, JobQueue, RedisJobQueue, Worker, WorkerHandle,
};
use crate::infrastructure::repositories::PgInviteRepository;
use crate::presentation::http::{handlers::health, routes};
use crate::presentation::middleware::{cors, logging};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub queue: Arc<dyn JobQueue>,
    pub settings: Arc<Settings>,
}

/// Build the router with all middleware applied
pub fn build_router(state: AppState) -> Router {
    let cors_layer = cors::create_cors_layer(&state.settings.cors);
    routes::create_router(state)
        .layer(logging::create_trace_layer())
        .layer(cors_layer)
}

/// Connect to the configured job broker
pub async fn build_queue(settings: &Settings) -> Result<Arc<dyn JobQueue>> {
    let queue: Arc<dyn JobQueue> = match settings.queue.backend {
        QueueBackend::Redis => {
            let conn = create_redis_client(&settings.redis)
                .await
                .context("Failed to connect to Redis")?;
            tracing::info!(key = %settings.queue.key, "Redis job queue connected");
            Arc::new(RedisJobQueue::new(conn, settings.queue.key.clone()))
        }
        QueueBackend::Memory => {
            tracing::warn!("Using in-memory job queue; jobs are lost on restart");
            Arc::new(InMemoryJobQueue::new())
        }
    };
    Ok(queue)
}

/// Build the task executor with its HTTP clients
pub fn build_executor(settings: &Settings, db: PgPool) -> Result<JobExecutor> {
    let client = reqwest::Client::builder()
        .user_agent(concat!("service-rating/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("Failed to build HTTP client")?;

    let sender = HttpMessageSender::from_settings(client.clone(), &settings.message_sender);
    tracing::info!(url = %sender.outbound_url(), "Message sender configured");

    let deliverer = HttpHookDeliverer::new(client, &settings.hooks.auth_token);

    Ok(JobExecutor::new(
        Arc::new(PgInviteRepository::new(db)),
        Arc::new(sender),
        Arc::new(deliverer),
        settings.invite.text.clone(),
    ))
}

/// Connect the database, applying migrations when enabled
async fn connect_database(settings: &Settings) -> Result<PgPool> {
    let db = database::create_pool(&settings.database)
        .await
        .context("Failed to connect to the database")?;
    tracing::info!("Database connection pool created");

    if settings.database.run_migrations {
        database::run_migrations(&db)
            .await
            .context("Failed to run database migrations")?;
        tracing::info!("Database migrations applied");
    }

    Ok(db)
}

/// Build a standalone worker pool
pub async fn build_worker(settings: &Settings) -> Result<Worker> {
    let db = connect_database(settings).await?;
    let queue = build_queue(settings).await?;
    let executor = Arc::new(build_executor(settings, db)?);
    Ok(Worker::from_settings(queue, executor, &settings.queue))
}

/// Application instance
pub struct Application {
    listener: TcpListener,
    router: Router,
    worker: Option<WorkerHandle>,
}

impl Application {
    /// Build the application from settings
    pub async fn build(settings: Settings) -> Result<Self> {
        health::init_server_start();

        let db = connect_database(&settings).await?;
        let queue = build_queue(&settings).await?;

        let worker = if settings.queue.embedded_worker {
            let executor = Arc::new(build_executor(&settings, db.clone())?);
            Some(Worker::from_settings(queue.clone(), executor, &settings.queue).spawn())
        } else {
            None
        };

        let addr: SocketAddr = settings
            .server_addr()
            .parse()
            .context("Invalid server address")?;

        let state = AppState {
            db,
            queue,
            settings: Arc::new(settings),
        };
        let router = build_router(state);

        let listener = TcpListener::bind(addr).await?;
        tracing::info!("Listening on {}", addr);

        Ok(Self {
            listener,
            router,
            worker,
        })
    }

    /// Run the server until ctrl-c, then drain the embedded worker
    pub async fn run_until_stopped(self) -> Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        if let Some(worker) = self.worker {
            worker.shutdown().await;
        }
        Ok(())
    }

    /// Get the bound address
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }
}

/// Resolves on ctrl-c
pub async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
