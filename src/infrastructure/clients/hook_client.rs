//! Webhook target client.

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use super::token_header;
use crate::domain::{HookDeliverer, HookDeliveryError};

/// Posts hook payloads with the service-wide hook token.
#[derive(Debug, Clone)]
pub struct HttpHookDeliverer {
    client: reqwest::Client,
    auth: String,
}

impl HttpHookDeliverer {
    pub fn new(client: reqwest::Client, auth_token: &str) -> Self {
        Self {
            client,
            auth: token_header(auth_token),
        }
    }
}

#[async_trait]
impl HookDeliverer for HttpHookDeliverer {
    /// One POST, no retry. The response status is only logged.
    async fn post(&self, target: &str, payload: &Value) -> Result<(), HookDeliveryError> {
        let body = serde_json::to_vec(payload).map_err(|e| HookDeliveryError::Transport {
            target: target.to_string(),
            reason: e.to_string(),
        })?;

        let response = self
            .client
            .post(target)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .header(reqwest::header::AUTHORIZATION, &self.auth)
            .body(body)
            .send()
            .await
            .map_err(|e| HookDeliveryError::Transport {
                target: target.to_string(),
                reason: e.to_string(),
            })?;

        debug!(url = %target, status = response.status().as_u16(), "Hook target responded");
        Ok(())
    }
}
