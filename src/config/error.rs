//! Configuration error types

use std::path::PathBuf;
use thiserror::Error;

/// Why a configuration could not be turned into a running bot.
///
/// Only produced at startup or by one-off commands; a turn never sees one.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config file not found: {0}")]
    NotFound(PathBuf),

    #[error("config is not valid TOML: {0}")]
    Parse(String),

    #[error("invalid value for '{field}': {message}")]
    Validation { field: String, message: String },

    #[error("environment variable '{var}' required by '{field}' is not set")]
    MissingSecret { field: String, var: String },
}

impl ConfigError {
    pub(crate) fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        ConfigError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Dotted config key at fault, when the error is about one setting.
    pub fn field(&self) -> Option<&str> {
        match self {
            ConfigError::Validation { field, .. } | ConfigError::MissingSecret { field, .. } => {
                Some(field)
            }
            _ => None,
        }
    }
}
