//! Error types for language-model calls.

use thiserror::Error;

/// Errors that can occur while asking the language model for a completion.
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network connectivity error (DNS, connection refused, etc.).
    #[error("Network error: {0}")]
    Network(String),

    /// Request exceeded deadline.
    #[error("Request timeout after {0}ms")]
    Timeout(u64),

    /// Endpoint returned an error response (4xx, 5xx).
    #[error("Language model error {status}: {message}")]
    Upstream { status: u16, message: String },

    /// Response body doesn't match the chat-completion format.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Response parsed but carried no text.
    #[error("Language model returned an empty completion")]
    EmptyCompletion,
}

impl LlmError {
    /// Map a reqwest send error, distinguishing timeouts.
    pub fn from_send(e: reqwest::Error, timeout_ms: u64) -> Self {
        if e.is_timeout() {
            LlmError::Timeout(timeout_ms)
        } else {
            LlmError::Network(e.to_string())
        }
    }
}
