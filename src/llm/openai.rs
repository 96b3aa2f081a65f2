//! OpenAI / Azure OpenAI chat-completion client.

use super::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage, LanguageModel, LlmError};
use crate::config::{ConfigError, LlmConfig, LlmProvider};
use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Chat-completion client for Azure OpenAI deployments and OpenAI-compatible endpoints.
///
/// - Azure: POST `{endpoint}/openai/deployments/{deployment}/chat/completions?api-version=…`
///   with an `api-key` header
/// - OpenAI: POST `{endpoint}/v1/chat/completions` with a Bearer token and
///   `model` set to the deployment name
pub struct OpenAIClient {
    provider: LlmProvider,
    endpoint: String,
    deployment: String,
    api_version: String,
    api_key: String,
    temperature: Option<f32>,
    timeout: Duration,
    /// Shared HTTP client for connection pooling
    client: Arc<Client>,
}

impl OpenAIClient {
    pub fn new(config: &LlmConfig, api_key: String, client: Arc<Client>) -> Self {
        Self {
            provider: config.provider,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            deployment: config.deployment.clone(),
            api_version: config.api_version.clone(),
            api_key,
            temperature: config.temperature,
            timeout: Duration::from_secs(config.timeout_seconds),
            client,
        }
    }

    /// Build from configuration, reading the API key from the environment.
    pub fn from_config(config: &LlmConfig, client: Arc<Client>) -> Result<Self, ConfigError> {
        let api_key = config.api_key()?;
        Ok(Self::new(config, api_key, client))
    }

    fn completions_url(&self) -> String {
        match self.provider {
            LlmProvider::Azure => format!(
                "{}/openai/deployments/{}/chat/completions?api-version={}",
                self.endpoint, self.deployment, self.api_version
            ),
            LlmProvider::OpenAI => format!("{}/v1/chat/completions", self.endpoint),
        }
    }

    fn build_request(&self, messages: Vec<ChatMessage>) -> ChatCompletionRequest {
        let model = match self.provider {
            LlmProvider::Azure => None,
            LlmProvider::OpenAI => Some(self.deployment.clone()),
        };
        ChatCompletionRequest {
            model,
            messages,
            temperature: self.temperature,
        }
    }
}

#[async_trait]
impl LanguageModel for OpenAIClient {
    fn name(&self) -> &str {
        &self.deployment
    }

    async fn complete(&self, messages: Vec<ChatMessage>) -> Result<String, LlmError> {
        let url = self.completions_url();
        let request = self.build_request(messages);
        let timeout_ms = self.timeout.as_millis() as u64;

        let builder = self.client.post(&url).json(&request).timeout(self.timeout);
        let builder = match self.provider {
            LlmProvider::Azure => builder.header("api-key", &self.api_key),
            LlmProvider::OpenAI => builder.bearer_auth(&self.api_key),
        };

        let response = builder
            .send()
            .await
            .map_err(|e| LlmError::from_send(e, timeout_ms))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(LlmError::Upstream {
                status: status.as_u16(),
                message: error_body,
            });
        }

        let completion: ChatCompletionResponse = response.json().await.map_err(|e| {
            LlmError::InvalidResponse(format!("Failed to parse completion response: {}", e))
        })?;

        if let Some(usage) = completion.usage {
            debug!(
                deployment = %self.deployment,
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "Completion received"
            );
        }

        completion
            .first_text()
            .map(|text| text.to_string())
            .ok_or(LlmError::EmptyCompletion)
    }
}
