//! Logging configuration

use super::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;
use tracing::level_filters::LevelFilter;

/// Top-level modules a component level can target.
pub const COMPONENTS: [&str; 9] = [
    "api", "billing", "bot", "cli", "config", "llm", "logging", "query", "series",
];

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Human-readable, for local runs and the emulator
    #[default]
    Pretty,
    /// One JSON object per line, for App Service and container log collection
    Json,
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(ConfigError::invalid(
                "logging.format",
                format!("expected \"pretty\" or \"json\", got \"{}\"", other),
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
    /// Per-module levels, e.g. {"billing": "debug"} becomes `costbot::billing=debug`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component_levels: Option<HashMap<String, String>>,
    /// Log (truncated) user chat text. Off by default.
    pub enable_content_logging: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
            component_levels: None,
            enable_content_logging: false,
        }
    }
}

impl LoggingConfig {
    /// Reject levels tracing cannot parse and components that name no module.
    pub fn validate(&self) -> Result<(), ConfigError> {
        parse_level("logging.level", &self.level)?;

        for (component, level) in self.component_levels.iter().flatten() {
            let field = format!("logging.component_levels.{}", component);
            if !COMPONENTS.contains(&component.as_str()) {
                return Err(ConfigError::invalid(
                    field,
                    format!("unknown component, expected one of {}", COMPONENTS.join(", ")),
                ));
            }
            parse_level(&field, level)?;
        }

        Ok(())
    }
}

fn parse_level(field: &str, level: &str) -> Result<LevelFilter, ConfigError> {
    LevelFilter::from_str(level.trim())
        .map_err(|_| ConfigError::invalid(field, format!("unknown log level \"{}\"", level)))
}
