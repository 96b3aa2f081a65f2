//! Bearer tokens for the management API.
//!
//! Acquiring tokens (managed identity, service principals, CLI logins) is
//! left to the hosting environment; these providers only hand over a token
//! that already exists.

use super::CostDataFetchError;
use async_trait::async_trait;

/// Source of bearer tokens for the cost-management API.
#[async_trait]
pub trait TokenProvider: Send + Sync + 'static {
    async fn token(&self) -> Result<String, CostDataFetchError>;
}

/// Reads the token from an environment variable on every call, so a
/// sidecar or cron job can rotate it without a restart.
#[derive(Debug, Clone)]
pub struct EnvTokenProvider {
    var: String,
}

impl EnvTokenProvider {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

#[async_trait]
impl TokenProvider for EnvTokenProvider {
    async fn token(&self) -> Result<String, CostDataFetchError> {
        match std::env::var(&self.var) {
            Ok(token) if !token.trim().is_empty() => Ok(token.trim().to_string()),
            _ => Err(CostDataFetchError::Credential(format!(
                "environment variable '{}' is not set",
                self.var
            ))),
        }
    }
}

/// A fixed token, for tests and one-off CLI runs.
#[derive(Debug, Clone)]
pub struct StaticTokenProvider(pub String);

#[async_trait]
impl TokenProvider for StaticTokenProvider {
    async fn token(&self) -> Result<String, CostDataFetchError> {
        Ok(self.0.clone())
    }
}
