//! Language-model endpoint configuration

use super::ConfigError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Which chat-completion dialect the endpoint speaks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    /// Azure OpenAI: deployment in the path, `api-key` header
    #[default]
    Azure,
    /// OpenAI-compatible: `/v1/chat/completions`, bearer auth, model in the body
    OpenAI,
}

impl FromStr for LlmProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "azure" => Ok(LlmProvider::Azure),
            "openai" => Ok(LlmProvider::OpenAI),
            _ => Err(format!("Invalid LLM provider: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub provider: LlmProvider,
    /// Base URL, e.g. `https://my-resource.openai.azure.com`
    pub endpoint: String,
    /// Azure deployment name, or model name for OpenAI-compatible endpoints
    pub deployment: String,
    /// Only sent to Azure endpoints
    pub api_version: String,
    /// Environment variable holding the API key
    pub api_key_env: String,
    pub timeout_seconds: u64,
    /// Replaces the built-in query-extraction instruction
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: LlmProvider::Azure,
            endpoint: String::new(),
            deployment: String::new(),
            api_version: "2024-12-01-preview".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            timeout_seconds: 60,
            system_prompt: None,
            temperature: Some(0.0),
        }
    }
}

impl LlmConfig {
    /// Read the API key from the configured environment variable.
    pub fn api_key(&self) -> Result<String, ConfigError> {
        match std::env::var(&self.api_key_env) {
            Ok(key) if !key.is_empty() => Ok(key),
            _ => Err(ConfigError::MissingSecret {
                field: "llm.api_key_env".to_string(),
                var: self.api_key_env.clone(),
            }),
        }
    }
}
