//! Redis list-backed job queue.

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};
use tracing::{info, instrument, warn};

use super::{JobQueue, QueueError};
use crate::application::tasks::QueuedJob;
use crate::config::RedisSettings;

/// Creates a Redis connection manager with automatic reconnection.
#[instrument(skip(settings), fields(url = %settings.url))]
pub async fn create_redis_client(
    settings: &RedisSettings,
) -> Result<ConnectionManager, redis::RedisError> {
    info!("Connecting to Redis...");
    let client = Client::open(settings.url.as_str())?;
    let manager = ConnectionManager::new(client).await?;
    info!("Redis connection established");
    Ok(manager)
}

/// Jobs are JSON envelopes `RPUSH`ed onto a list and `LPOP`ed by workers,
/// so any number of API and worker processes can share one queue.
#[derive(Clone)]
pub struct RedisJobQueue {
    conn: ConnectionManager,
    key: String,
}

impl RedisJobQueue {
    pub fn new(conn: ConnectionManager, key: impl Into<String>) -> Self {
        Self {
            conn,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

/// Decode a popped envelope. The raw payload is logged on failure; it has
/// already left the list, so it is dropped.
fn decode_envelope(key: &str, data: &str) -> Result<QueuedJob, QueueError> {
    serde_json::from_str(data).map_err(|e| {
        warn!(key = %key, payload = %data, error = %e, "Undecodable job envelope");
        QueueError::Decode(e)
    })
}

#[async_trait]
impl JobQueue for RedisJobQueue {
    #[instrument(skip(self, job), fields(key = %self.key, job_id = %job.id), level = "debug")]
    async fn push(&self, job: &QueuedJob) -> Result<(), QueueError> {
        let data = serde_json::to_string(job).map_err(QueueError::Encode)?;
        let mut conn = self.conn.clone();

        let _: i64 = conn.rpush(&self.key, data).await?;
        Ok(())
    }

    async fn pop(&self) -> Result<Option<QueuedJob>, QueueError> {
        let mut conn = self.conn.clone();

        let data: Option<String> = conn.lpop(&self.key, None).await?;
        data.map(|data| decode_envelope(&self.key, &data)).transpose()
    }

    async fn ping(&self) -> Result<(), QueueError> {
        let mut conn = self.conn.clone();
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "redis"
    }
}
