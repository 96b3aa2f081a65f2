//! Natural-language to structured cost query.
//!
//! The [`QueryInterpreter`] asks the language model to restate the user's
//! question as a small JSON object and validates the answer into a
//! [`CostQuery`].

pub mod error;
pub mod interpreter;
pub mod types;

pub use error::QueryInterpretationError;
pub use interpreter::{parse_query_reply, system_instruction, QueryInterpreter};
pub use types::{CostQuery, Granularity, InvalidDateRange};
