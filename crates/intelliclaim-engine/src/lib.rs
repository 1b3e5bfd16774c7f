//! IntelliClaim Engine - rule validation and evaluation
//!
//! This crate hosts the stateless evaluation half of the rule engine:
//! - Static rule validation (metadata, parseability, schema references)
//! - Condition evaluation against a claim record, with explanation traces
//! - Rule-set evaluation with per-rule error isolation
//! - Claim confidence aggregation
//!
//! Every operation is a pure function of its inputs and safe to call
//! concurrently; the engine holds no mutable state between calls.

pub mod confidence;
pub mod error;
pub mod evaluator;
pub mod ruleset;
pub mod validator;

pub use confidence::{ConfidenceAggregator, ConfidenceBand, ConfidenceReport};
pub use error::EvalError;
pub use evaluator::{EvaluationResult, Evaluator};
pub use ruleset::{ClaimEvaluation, RuleEvaluation, RuleOutcome};
pub use validator::{RuleValidator, ValidationError};
