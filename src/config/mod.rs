//! Configuration module for costbot
//!
//! Provides layered configuration loading from files, environment variables, and defaults.
//!
//! # Configuration Precedence
//!
//! 1. CLI arguments (highest priority)
//! 2. Environment variables (`COSTBOT_*`, plus the conventional `PORT`,
//!    `OPENAI_ENDPOINT`, `OPENAI_DEPLOYMENT_NAME`, `AZURE_SUBSCRIPTION_ID`,
//!    `MICROSOFT_APP_ID`)
//! 3. Configuration file (TOML)
//! 4. Default values (lowest priority)
//!
//! The resulting [`CostBotConfig`] is built once at startup and shared
//! read-only (behind an `Arc`) by every collaborator that needs it.
//!
//! # Example
//!
//! ```rust
//! use costbot::config::CostBotConfig;
//!
//! let config = CostBotConfig::default();
//! assert_eq!(config.server.port, 8000);
//!
//! let toml = r#"
//! [billing]
//! subscription_id = "00000000-0000-0000-0000-000000000000"
//! "#;
//! let config: CostBotConfig = toml::from_str(toml).unwrap();
//! assert_eq!(config.billing.api_version, "2021-01-01");
//! ```

pub mod billing;
pub mod bot;
pub mod error;
pub mod llm;
pub mod logging;
pub mod server;

pub use billing::BillingConfig;
pub use bot::BotConfig;
pub use error::ConfigError;
pub use llm::{LlmConfig, LlmProvider};
pub use logging::{LogFormat, LoggingConfig};
pub use server::ServerConfig;

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Unified configuration for the cost bot.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CostBotConfig {
    /// HTTP listener
    pub server: ServerConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
    /// Language model used to interpret questions
    pub llm: LlmConfig,
    /// Cost-management API
    pub billing: BillingConfig,
    /// Chat transport
    pub bot: BotConfig,
}

impl CostBotConfig {
    /// Load configuration from a TOML file
    ///
    /// If path is None, returns default configuration.
    /// If path doesn't exist, returns NotFound error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => {
                if !p.exists() {
                    return Err(ConfigError::NotFound(p.to_path_buf()));
                }
                let content = std::fs::read_to_string(p).map_err(|source| ConfigError::Read {
                    path: p.to_path_buf(),
                    source,
                })?;
                toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
            }
            None => Ok(Self::default()),
        }
    }

    /// Apply environment variable overrides
    ///
    /// Invalid values are silently ignored (the previous value is kept).
    pub fn with_env_overrides(mut self) -> Self {
        // PORT is what hosting platforms inject; COSTBOT_PORT wins if both are set
        for var in ["PORT", "COSTBOT_PORT"] {
            if let Ok(port) = std::env::var(var) {
                if let Ok(p) = port.parse() {
                    self.server.port = p;
                }
            }
        }
        if let Ok(host) = std::env::var("COSTBOT_HOST") {
            self.server.host = host;
        }

        if let Ok(level) = std::env::var("COSTBOT_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("COSTBOT_LOG_FORMAT") {
            if let Ok(f) = format.parse() {
                self.logging.format = f;
            }
        }

        if let Ok(endpoint) = std::env::var("OPENAI_ENDPOINT") {
            self.llm.endpoint = endpoint;
        }
        if let Ok(deployment) = std::env::var("OPENAI_DEPLOYMENT_NAME") {
            self.llm.deployment = deployment;
        }
        if let Ok(provider) = std::env::var("COSTBOT_LLM_PROVIDER") {
            if let Ok(p) = provider.parse() {
                self.llm.provider = p;
            }
        }

        if let Ok(subscription) = std::env::var("AZURE_SUBSCRIPTION_ID") {
            self.billing.subscription_id = subscription;
        }

        if let Ok(app_id) = std::env::var("MICROSOFT_APP_ID") {
            self.bot.app_id = app_id;
        }

        self
    }

    /// Validate settings every command needs
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::invalid("server.port", "port must be non-zero"));
        }

        for (field, secs) in [
            (
                "server.request_timeout_seconds",
                self.server.request_timeout_seconds,
            ),
            ("llm.timeout_seconds", self.llm.timeout_seconds),
            ("billing.timeout_seconds", self.billing.timeout_seconds),
            ("bot.timeout_seconds", self.bot.timeout_seconds),
        ] {
            if secs == 0 {
                return Err(ConfigError::invalid(field, "timeout must be non-zero"));
            }
        }

        self.logging.validate()
    }

    /// Validate the endpoints a running pipeline calls out to
    pub fn validate_endpoints(&self) -> Result<(), ConfigError> {
        self.validate()?;

        let required = [
            ("llm.endpoint", &self.llm.endpoint),
            ("llm.deployment", &self.llm.deployment),
            ("billing.management_url", &self.billing.management_url),
            ("billing.subscription_id", &self.billing.subscription_id),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::invalid(field, "cannot be empty"));
            }
        }

        Ok(())
    }
}
