//! Outbound reply delivery to the chat channel.

use super::Activity;
use async_trait::async_trait;
use reqwest::{Client, Url};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeliveryError {
    #[error("reply has no serviceUrl or conversation to deliver to")]
    MissingAddress,

    #[error("invalid serviceUrl '{0}'")]
    InvalidServiceUrl(String),

    #[error("network error delivering reply: {0}")]
    Network(String),

    #[error("reply delivery timed out after {0}ms")]
    Timeout(u64),

    #[error("channel rejected reply with {status}: {message}")]
    Upstream { status: u16, message: String },
}

/// Delivers reply activities back to the conversation they answer.
#[async_trait]
pub trait ReplySender: Send + Sync + 'static {
    async fn send(&self, reply: &Activity) -> Result<(), DeliveryError>;
}

/// Posts replies to the channel's connector service:
/// `{serviceUrl}/v3/conversations/{conversationId}/activities/{replyToId}`.
pub struct ConnectorClient {
    token: Option<String>,
    timeout: Duration,
    client: Arc<Client>,
}

impl ConnectorClient {
    pub fn new(token: Option<String>, timeout: Duration, client: Arc<Client>) -> Self {
        Self {
            token,
            timeout,
            client,
        }
    }

    /// Reply URL for `reply`, with conversation and activity ids percent-encoded.
    pub fn reply_url(reply: &Activity) -> Result<Url, DeliveryError> {
        let service_url = reply
            .service_url
            .as_deref()
            .ok_or(DeliveryError::MissingAddress)?;
        let conversation_id = reply
            .conversation_id()
            .ok_or(DeliveryError::MissingAddress)?;

        let mut url = Url::parse(service_url)
            .map_err(|_| DeliveryError::InvalidServiceUrl(service_url.to_string()))?;
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| DeliveryError::InvalidServiceUrl(service_url.to_string()))?;
            segments
                .pop_if_empty()
                .extend(["v3", "conversations", conversation_id, "activities"]);
            if let Some(reply_to) = reply.reply_to_id.as_deref() {
                segments.push(reply_to);
            }
        }
        Ok(url)
    }
}

#[async_trait]
impl ReplySender for ConnectorClient {
    async fn send(&self, reply: &Activity) -> Result<(), DeliveryError> {
        let url = Self::reply_url(reply)?;
        let timeout_ms = self.timeout.as_millis() as u64;

        let mut request = self.client.post(url).json(reply).timeout(self.timeout);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                DeliveryError::Timeout(timeout_ms)
            } else {
                DeliveryError::Network(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(DeliveryError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        Ok(())
    }
}
