//! IntelliClaim Core - Core types for the IntelliClaim claims rule engine
//!
//! This crate provides the fundamental types used across the IntelliClaim ecosystem:
//! - Value types for claim field data and rule literals
//! - Claim record and confidence types
//! - Condition AST definitions
//! - Rule metadata and lifecycle types
//! - Claim schema configuration
//! - Error types

pub mod ast;
pub mod claim;
pub mod error;
pub mod rule;
pub mod schema;
pub mod types;

// Re-export commonly used types
pub use ast::{ConditionNode, Literal, LogicalOp, Operator};
pub use claim::{ClaimRecord, Confidence, FieldValue};
pub use error::CoreError;
pub use rule::{AuditInfo, Rule, Severity};
pub use schema::ClaimSchema;
pub use types::Value;
