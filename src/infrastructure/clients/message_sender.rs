//! Message Sender API client.

use async_trait::async_trait;
use tracing::instrument;

use super::token_header;
use crate::config::MessageSenderSettings;
use crate::domain::{MessageSender, MessageSenderError, OutboundCreated, OutboundMessage};

/// HTTP client for the message sender's `outbound/` endpoint.
///
/// Built once at startup and shared by every worker.
#[derive(Debug, Clone)]
pub struct HttpMessageSender {
    client: reqwest::Client,
    outbound_url: String,
    auth: String,
}

impl HttpMessageSender {
    pub fn new(client: reqwest::Client, base_url: &str, token: &str) -> Self {
        Self {
            client,
            outbound_url: format!("{}/outbound/", base_url.trim_end_matches('/')),
            auth: token_header(token),
        }
    }

    pub fn from_settings(client: reqwest::Client, settings: &MessageSenderSettings) -> Self {
        Self::new(client, &settings.url, &settings.token)
    }

    pub fn outbound_url(&self) -> &str {
        &self.outbound_url
    }
}

#[async_trait]
impl MessageSender for HttpMessageSender {
    #[instrument(skip(self, payload), fields(url = %self.outbound_url))]
    async fn create_outbound(
        &self,
        payload: &OutboundMessage,
    ) -> Result<OutboundCreated, MessageSenderError> {
        let response = self
            .client
            .post(&self.outbound_url)
            .header(reqwest::header::AUTHORIZATION, &self.auth)
            .json(payload)
            .send()
            .await
            .map_err(|e| MessageSenderError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MessageSenderError::Api {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<OutboundCreated>()
            .await
            .map_err(|e| MessageSenderError::Transport(e.to_string()))
    }
}
