//! Language-model access.
//!
//! The [`LanguageModel`] trait hides the chat-completion dialect behind a single
//! `complete` call so the query interpreter can be tested without a network.

use async_trait::async_trait;

pub mod error;
pub mod openai;
pub mod types;

pub use error::LlmError;
pub use openai::OpenAIClient;
pub use types::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};

/// A chat-completion capable language model.
///
/// # Object Safety
///
/// Object-safe; used as `Arc<dyn LanguageModel>`.
#[async_trait]
pub trait LanguageModel: Send + Sync + 'static {
    /// Name for logging (deployment or model name).
    fn name(&self) -> &str;

    /// Send one conversation and return the text of the first choice.
    ///
    /// # Returns
    ///
    /// - `Err(LlmError::Upstream)` if the endpoint returned 4xx/5xx
    /// - `Err(LlmError::Network)` / `Err(LlmError::Timeout)` on transport failure
    /// - `Err(LlmError::InvalidResponse)` if the body is not a chat completion
    /// - `Err(LlmError::EmptyCompletion)` if the first choice has no text
    async fn complete(&self, messages: Vec<ChatMessage>) -> Result<String, LlmError>;
}
