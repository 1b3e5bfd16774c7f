//! Parser error types
//!
//! Each syntax defect gets a distinct kind carrying the byte offset of the
//! offending token, so the authoring UI can point at the exact spot.

use serde::Serialize;
use thiserror::Error;

/// Parser error
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
pub enum ParseError {
    /// Empty rule text
    #[error("Empty rule text")]
    EmptyRule,

    /// Open and close parenthesis counts disagree
    #[error("Unbalanced parentheses in RuleText (at offset {offset})")]
    UnbalancedParens { offset: usize },

    /// Empty parenthesized group `()`
    #[error("Empty parenthesized group (at offset {offset})")]
    EmptyGroup { offset: usize },

    /// Rule text ends with a boolean connective
    #[error("Incomplete condition ending with {connective} (at offset {offset})")]
    DanglingConnective { connective: String, offset: usize },

    /// Operator token outside the supported set, e.g. `>>`
    #[error("Unknown operator \"{token}\" (at offset {offset})")]
    UnknownOperator { token: String, offset: usize },

    /// Expected a field name
    #[error("Expected a field name, found \"{found}\" (at offset {offset})")]
    ExpectedField { found: String, offset: usize },

    /// Expected a comparison operator after a field name
    #[error("Expected an operator after \"{field}\", found \"{found}\" (at offset {offset})")]
    ExpectedOperator {
        field: String,
        found: String,
        offset: usize,
    },

    /// Expected a literal on the right-hand side of a comparison
    #[error("Expected a literal, found \"{found}\" (at offset {offset})")]
    ExpectedLiteral { found: String, offset: usize },

    /// String literal missing its closing quote
    #[error("Unterminated string literal (at offset {offset})")]
    UnterminatedString { offset: usize },

    /// List literal missing its closing bracket
    #[error("Unterminated list literal (at offset {offset})")]
    UnterminatedList { offset: usize },

    /// Malformed numeric or date token
    #[error("Invalid number or date \"{token}\" (at offset {offset})")]
    InvalidNumber { token: String, offset: usize },

    /// Input continues after a complete condition
    #[error("Unexpected input \"{found}\" after condition (at offset {offset})")]
    TrailingInput { found: String, offset: usize },
}

impl ParseError {
    /// Byte offset of the offending token, where one exists
    pub fn offset(&self) -> Option<usize> {
        match self {
            ParseError::EmptyRule => None,
            ParseError::UnbalancedParens { offset }
            | ParseError::EmptyGroup { offset }
            | ParseError::DanglingConnective { offset, .. }
            | ParseError::UnknownOperator { offset, .. }
            | ParseError::ExpectedField { offset, .. }
            | ParseError::ExpectedOperator { offset, .. }
            | ParseError::ExpectedLiteral { offset, .. }
            | ParseError::UnterminatedString { offset }
            | ParseError::UnterminatedList { offset }
            | ParseError::InvalidNumber { offset, .. }
            | ParseError::TrailingInput { offset, .. } => Some(*offset),
        }
    }
}

/// Result type for parser operations
pub type Result<T> = std::result::Result<T, ParseError>;
