//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors: the data file content does not describe a database.
///
/// Tree operations themselves never fail.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("unexpected end of input: expected {0}")]
    UnexpectedEof(String),

    #[error("invalid {field}: {value:?} is not a non-negative integer")]
    InvalidNumber { field: String, value: String },
}

impl DomainError {
    pub(crate) fn eof(expected: impl Into<String>) -> Self {
        Self::UnexpectedEof(expected.into())
    }
}
