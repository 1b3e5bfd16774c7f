//! SDK error types

use intelliclaim_engine::{EvalError, ValidationError};
use intelliclaim_parser::ParseError;
use intelliclaim_repository::RepositoryError;
use thiserror::Error;

/// SDK error
#[derive(Error, Debug)]
pub enum SdkError {
    /// The rule failed static validation; the findings are carried along
    /// so callers can show them per field or offset
    #[error("Rule validation failed with {} finding(s)", errors.len())]
    InvalidRule { errors: Vec<ValidationError> },

    /// Rule text could not be parsed
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Rule evaluation failed
    #[error("Evaluation error: {0}")]
    Eval(#[from] EvalError),

    /// Storage-level failure
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Result type for SDK operations
pub type Result<T> = std::result::Result<T, SdkError>;
