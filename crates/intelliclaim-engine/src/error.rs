//! Evaluation error types

use serde::Serialize;
use thiserror::Error;

/// Evaluation error
///
/// Evaluation errors never abort a rule-set run; the affected rule is
/// reported as indeterminate and the remaining rules still evaluate.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
pub enum EvalError {
    /// The condition references a field the claim record does not carry
    #[error("Field not found: {0}")]
    MissingField(String),

    /// Operand types do not fit the operator's semantics
    #[error("Type mismatch on {field}: cannot apply {operator} to {actual} and {expected}")]
    TypeMismatch {
        field: String,
        operator: String,
        expected: String,
        actual: String,
    },

    /// The condition names a reference list the schema does not configure
    #[error("Unknown reference list: {0}")]
    UnknownList(String),
}

pub type Result<T> = std::result::Result<T, EvalError>;
