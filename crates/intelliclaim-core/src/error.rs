//! Error types for IntelliClaim Core

use thiserror::Error;

/// Core error type
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Severity must be \"Error\" or \"Warning\"")]
    InvalidSeverity(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
