//! Chat transport configuration

use serde::{Deserialize, Serialize};

pub const DEFAULT_WELCOME_MESSAGE: &str =
    "Welcome to the Azure Subscription Cost Chatbot! Ask me about Azure costs.";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    /// Bot registration id. Empty means local/emulator mode with no
    /// Authorization header required on inbound activities.
    pub app_id: String,
    pub welcome_message: String,
    /// Environment variable holding a bearer token for outbound replies
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_env: Option<String>,
    pub timeout_seconds: u64,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            app_id: String::new(),
            welcome_message: DEFAULT_WELCOME_MESSAGE.to_string(),
            token_env: None,
            timeout_seconds: 30,
        }
    }
}

impl BotConfig {
    pub fn requires_auth(&self) -> bool {
        !self.app_id.is_empty()
    }

    /// Outbound reply token, if one is configured and set.
    pub fn reply_token(&self) -> Option<String> {
        self.token_env
            .as_ref()
            .and_then(|var| std::env::var(var).ok())
            .filter(|token| !token.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bot_config_defaults() {
        let config = BotConfig::default();
        assert!(!config.requires_auth());
        assert_eq!(config.welcome_message, DEFAULT_WELCOME_MESSAGE);
        assert!(config.reply_token().is_none());
    }

    #[test]
    fn test_requires_auth_with_app_id() {
        let config = BotConfig {
            app_id: "bot-app".to_string(),
            ..Default::default()
        };
        assert!(config.requires_auth());
    }
}
