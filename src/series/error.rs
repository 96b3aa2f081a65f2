//! Row-level parse errors.

use thiserror::Error;

/// A billing row that cannot be turned into a cost series entry.
///
/// `index` is the row's position in the billing response.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedCostRowError {
    #[error("row {index}: expected [cost, date, ...], found {found}")]
    Shape { index: usize, found: String },

    #[error("row {index}: cost is not a number: {value}")]
    Cost { index: usize, value: String },

    #[error("row {index}: unparseable date '{value}'")]
    Date { index: usize, value: String },

    #[error("row {index}: cost total exceeds the supported range")]
    Overflow { index: usize },
}

impl MalformedCostRowError {
    pub fn index(&self) -> usize {
        match self {
            MalformedCostRowError::Shape { index, .. }
            | MalformedCostRowError::Cost { index, .. }
            | MalformedCostRowError::Date { index, .. } => *index,
            MalformedCostRowError::Overflow { index } => *index,
        }
    }
}
