//! Cost data fetch errors.

use thiserror::Error;

/// The billing API could not be queried.
///
/// Never retried: the failure is reported to the chat user as-is.
#[derive(Error, Debug)]
pub enum CostDataFetchError {
    /// No bearer token could be obtained for the management API.
    #[error("could not obtain a management API token: {0}")]
    Credential(String),

    #[error("network error calling the cost API: {0}")]
    Network(String),

    #[error("cost API request timed out after {0}ms")]
    Timeout(u64),

    /// Non-success status; `message` is the response body.
    #[error("cost API returned {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("cost API returned an unreadable body: {0}")]
    InvalidResponse(String),
}

impl CostDataFetchError {
    pub fn from_send(e: reqwest::Error, timeout_ms: u64) -> Self {
        if e.is_timeout() {
            CostDataFetchError::Timeout(timeout_ms)
        } else {
            CostDataFetchError::Network(e.to_string())
        }
    }

    /// HTTP status of an upstream failure, if there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            CostDataFetchError::Upstream { status, .. } => Some(*status),
            _ => None,
        }
    }
}
