//! Webhook delivery port.

use async_trait::async_trait;
use serde_json::Value;

/// Transport failure delivering a webhook. Non-2xx responses are not errors.
#[derive(Debug, thiserror::Error)]
pub enum HookDeliveryError {
    #[error("Hook delivery to {target} failed: {reason}")]
    Transport { target: String, reason: String },
}

/// Performs a single POST of a JSON payload to a hook target.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HookDeliverer: Send + Sync {
    async fn post(&self, target: &str, payload: &Value) -> Result<(), HookDeliveryError>;
}
