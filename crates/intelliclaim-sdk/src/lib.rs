//! IntelliClaim SDK - high-level claims rule engine API
//!
//! One entry point over the whole stack: rule catalog management with
//! validation-gated activation, bulk import, and claim assessment with
//! explanation trails and confidence aggregation.
//!
//! # Example
//!
//! ```rust,ignore
//! use intelliclaim_core::{ClaimRecord, Confidence, Value};
//! use intelliclaim_sdk::ClaimsRuleEngine;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let engine = ClaimsRuleEngine::builder().build();
//!
//!     engine.import_text("PatientAge < 18 AND GuardianConsent = false").await?;
//!
//!     let record = ClaimRecord::new()
//!         .with_field("PatientAge", Value::Number(16.0), Confidence::Scored(95))
//!         .with_field("GuardianConsent", Value::Bool(false), Confidence::Scored(45));
//!
//!     let assessment = engine.assess_claim(&record).await?;
//!     assert!(assessment.has_blocking_violation());
//!     assert_eq!(assessment.confidence.overall, Some(45));
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod engine;
pub mod error;

pub use builder::ClaimsRuleEngineBuilder;
pub use engine::{ClaimAssessment, ClaimsRuleEngine};
pub use error::{Result, SdkError};

// Re-export the types callers need to drive the engine
pub use intelliclaim_core::{
    ClaimRecord, ClaimSchema, Confidence, FieldValue, Rule, Severity, Value,
};
pub use intelliclaim_engine::{
    ConfidenceBand, ConfidenceReport, EvaluationResult, RuleOutcome, ValidationError,
};
pub use intelliclaim_repository::{ImportReport, InMemoryRepository, RowError, RuleRepository};
