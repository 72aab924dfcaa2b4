//! Application settings and configuration structures.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Root configuration structure containing all application settings.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Server configuration (host, port)
    pub server: ServerSettings,

    /// Database configuration (PostgreSQL)
    pub database: DatabaseSettings,

    /// Redis configuration (job broker)
    pub redis: RedisSettings,

    /// Background job queue and worker pool
    pub queue: QueueSettings,

    /// Outbound message sender API
    pub message_sender: MessageSenderSettings,

    /// Invite message defaults
    pub invite: InviteSettings,

    /// Webhook delivery settings
    pub hooks: HookSettings,

    /// CORS configuration
    pub cors: CorsSettings,

    /// Current environment (development, staging, production)
    pub environment: String,
}

/// Server binding configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// Host address to bind to (e.g., "0.0.0.0")
    pub host: String,

    /// Port number to listen on
    pub port: u16,
}

/// PostgreSQL database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    /// Database connection URL
    pub url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Minimum number of connections to maintain
    pub min_connections: u32,

    /// Connection acquire timeout in seconds
    pub acquire_timeout: u64,

    /// Apply pending migrations on startup
    pub run_migrations: bool,
}

/// Redis configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct RedisSettings {
    /// Redis connection URL
    pub url: String,
}

/// Which broker backs the job queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueueBackend {
    /// Redis list (shared between API and worker processes)
    Redis,
    /// Process-local queue, only useful with an embedded worker
    Memory,
}

/// Job queue and worker pool configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct QueueSettings {
    pub backend: QueueBackend,

    /// Redis list key jobs are pushed onto
    pub key: String,

    /// Number of concurrent worker loops
    pub workers: usize,

    /// Sleep between polls of an empty queue, in milliseconds
    pub poll_interval_ms: u64,

    /// Run the worker pool inside the API process
    pub embedded_worker: bool,
}

/// Message sender API configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageSenderSettings {
    /// Base URL of the API (e.g., "http://message-sender/api/v1")
    pub url: String,

    /// Token sent as `Authorization: Token <token>`
    pub token: String,
}

/// Invite message configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct InviteSettings {
    /// Message body used when an invite carries no `content` override
    pub text: String,
}

/// Webhook delivery configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct HookSettings {
    /// Token sent to hook targets as `Authorization: Token <token>`
    pub auth_token: String,
}

/// CORS configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CorsSettings {
    /// Allowed origins (comma-separated in env)
    pub allowed_origins: Vec<String>,
}

impl Settings {
    /// Load settings from environment variables and configuration files.
    ///
    /// The loading order is:
    /// 1. config/default.toml (base configuration)
    /// 2. config/{RUN_ENV}.toml (environment-specific overrides)
    /// 3. Environment variables (highest priority)
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if configuration cannot be loaded or parsed,
    /// or if the loaded values fail validation.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let environment = std::env::var("RUN_ENV").unwrap_or_else(|_| "development".into());

        Config::builder()
            .set_default("environment", environment.clone())?
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8000)?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 2)?
            .set_default("database.acquire_timeout", 30)?
            .set_default("database.run_migrations", true)?
            .set_default("redis.url", "redis://127.0.0.1:6379")?
            .set_default("queue.backend", "redis")?
            .set_default("queue.key", "service_rating:jobs")?
            .set_default("queue.workers", 4)?
            .set_default("queue.poll_interval_ms", 500)?
            .set_default("queue.embedded_worker", false)?
            .set_default("message_sender.url", "http://message-sender/api/v1")?
            .set_default("message_sender.token", "REPLACEME")?
            .set_default(
                "invite.text",
                "Please rate this service. Reply 1 (poor) to 5 (excellent).",
            )?
            .set_default("hooks.auth_token", "REPLACEME")?
            .set_default("cors.allowed_origins", Vec::<String>::new())?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // APP__QUEUE__WORKERS=8 -> queue.workers = 8
            .add_source(
                Environment::default()
                    .prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("server.host", std::env::var("SERVER_HOST").ok())?
            .set_override_option("server.port", std::env::var("SERVER_PORT").ok())?
            .set_override_option("database.url", std::env::var("DATABASE_URL").ok())?
            .set_override_option("redis.url", std::env::var("REDIS_URL").ok())?
            .set_override_option(
                "message_sender.url",
                std::env::var("MESSAGE_SENDER_URL").ok(),
            )?
            .set_override_option(
                "message_sender.token",
                std::env::var("MESSAGE_SENDER_TOKEN").ok(),
            )?
            .set_override_option("invite.text", std::env::var("INVITE_TEXT").ok())?
            .set_override_option("hooks.auth_token", std::env::var("HOOK_AUTH_TOKEN").ok())?
            .build()?
            .try_deserialize()
            .and_then(|settings: Self| {
                settings.validate()?;
                Ok(settings)
            })
    }

    /// Reject configurations the service cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.queue.workers == 0 {
            return Err(ConfigError::Message(
                "queue.workers must be at least 1".into(),
            ));
        }
        if self.message_sender.url.trim().is_empty() {
            return Err(ConfigError::Message(
                "message_sender.url must not be empty".into(),
            ));
        }
        if self.queue.backend == QueueBackend::Memory && !self.queue.embedded_worker {
            return Err(ConfigError::Message(
                "queue.backend = \"memory\" requires queue.embedded_worker = true".into(),
            ));
        }
        Ok(())
    }

    /// Get the full server address as a string.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
