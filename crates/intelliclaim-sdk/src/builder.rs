//! Builder pattern for ClaimsRuleEngine

use std::sync::Arc;

use intelliclaim_core::ClaimSchema;
use intelliclaim_engine::confidence::DEFAULT_LOW_CONFIDENCE_THRESHOLD;
use intelliclaim_repository::{InMemoryRepository, RuleRepository};

use crate::engine::ClaimsRuleEngine;

/// Builder for [`ClaimsRuleEngine`]
///
/// # Example
///
/// ```rust,ignore
/// use intelliclaim_sdk::ClaimsRuleEngine;
/// use intelliclaim_core::{ClaimSchema, Value};
///
/// let engine = ClaimsRuleEngine::builder()
///     .with_schema(
///         ClaimSchema::new()
///             .with_fields(["HospitalID", "PatientAge", "GuardianConsent"])
///             .with_reference_list("approved_hospitals", vec![Value::String("HSP-001".into())]),
///     )
///     .with_author("admin@intelliclaim.com")
///     .build();
/// ```
pub struct ClaimsRuleEngineBuilder {
    schema: ClaimSchema,
    threshold: u8,
    author: String,
    repository: Option<Arc<dyn RuleRepository>>,
}

impl ClaimsRuleEngineBuilder {
    pub fn new() -> Self {
        Self {
            schema: ClaimSchema::new(),
            threshold: DEFAULT_LOW_CONFIDENCE_THRESHOLD,
            author: "system@intelliclaim.com".to_string(),
            repository: None,
        }
    }

    /// Set the claim schema used for validation and reference lists.
    /// Without a schema, unknown-field and unknown-list checks are skipped.
    pub fn with_schema(mut self, schema: ClaimSchema) -> Self {
        self.schema = schema;
        self
    }

    /// Set the low-confidence flagging threshold (default 60)
    pub fn with_confidence_threshold(mut self, threshold: u8) -> Self {
        self.threshold = threshold;
        self
    }

    /// Set the author recorded on rules created through this engine
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    /// Use a custom rule store; defaults to an in-memory repository
    pub fn with_repository(mut self, repository: Arc<dyn RuleRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    pub fn build(self) -> ClaimsRuleEngine {
        let repository = self
            .repository
            .unwrap_or_else(|| Arc::new(InMemoryRepository::new()));
        ClaimsRuleEngine::from_parts(self.schema, self.threshold, self.author, repository)
    }
}

impl Default for ClaimsRuleEngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
