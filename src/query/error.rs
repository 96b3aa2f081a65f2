//! Query interpretation errors.

use super::types::InvalidDateRange;
use crate::llm::LlmError;
use thiserror::Error;

/// The user's message could not be turned into a [`CostQuery`](super::CostQuery).
#[derive(Error, Debug)]
pub enum QueryInterpretationError {
    #[error("language model call failed: {0}")]
    Model(#[from] LlmError),

    #[error("could not read a cost query from the model reply: {0}")]
    Unparseable(String),

    #[error("invalid {field} '{value}' (expected YYYY-MM-DD)")]
    InvalidDate { field: &'static str, value: String },

    #[error("unsupported granularity '{0}' (expected Daily or Monthly)")]
    UnsupportedGranularity(String),

    #[error("invalid date range: {0}")]
    InvalidRange(#[from] InvalidDateRange),

    /// The model judged the message not to be a cost question.
    #[error("I can only answer questions about subscription costs: {0}")]
    NotACostQuestion(String),
}
