//! Repository error types

use thiserror::Error;

/// Repository error
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// No rule with the given ID
    #[error("Rule not found: {0}")]
    NotFound(String),

    /// File could not be read during import
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Import file type not supported
    #[error("Unsupported import format: {0}")]
    UnsupportedFormat(String),
}

/// Result type for repository operations
pub type RepositoryResult<T> = std::result::Result<T, RepositoryError>;
