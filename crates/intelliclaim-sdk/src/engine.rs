//! High-level claims rule engine
//!
//! Ties the parser, validator, evaluator, confidence aggregator, and rule
//! store together behind one API: manage the rule catalog, import rules in
//! bulk, and assess claims.

use std::sync::Arc;

use intelliclaim_core::{ClaimRecord, ClaimSchema, Rule};
use intelliclaim_engine::{
    evaluator::{EvaluationResult, Evaluator},
    ruleset::{evaluate_rules, ClaimEvaluation},
    ConfidenceAggregator, ConfidenceReport, RuleValidator, ValidationError,
};
use intelliclaim_parser::parse;
use intelliclaim_repository::{ImportReport, RuleImporter, RuleRepository};
use serde::Serialize;

use crate::builder::ClaimsRuleEngineBuilder;
use crate::error::{Result, SdkError};

/// Combined outcome of assessing one claim: every active rule's result plus
/// aggregated field confidence
#[derive(Debug, Clone, Serialize)]
pub struct ClaimAssessment {
    pub rules: ClaimEvaluation,
    pub confidence: ConfidenceReport,
}

impl ClaimAssessment {
    /// True when a failed rule carries `Severity::Error`
    pub fn has_blocking_violation(&self) -> bool {
        self.rules.has_blocking_violation()
    }

    /// True when the claim cannot be auto-approved: a blocking violation,
    /// or at least one field below the confidence threshold
    pub fn needs_review(&self) -> bool {
        self.has_blocking_violation() || !self.confidence.flagged_fields.is_empty()
    }
}

/// The claims rule engine
///
/// Holds no claim state; all rule state lives in the repository, so the
/// engine is cheap to clone behind an `Arc` and safe to share across tasks.
pub struct ClaimsRuleEngine {
    repository: Arc<dyn RuleRepository>,
    validator: RuleValidator,
    evaluator: Evaluator,
    aggregator: ConfidenceAggregator,
    importer: RuleImporter,
    author: String,
}

impl ClaimsRuleEngine {
    pub fn builder() -> ClaimsRuleEngineBuilder {
        ClaimsRuleEngineBuilder::new()
    }

    pub(crate) fn from_parts(
        schema: ClaimSchema,
        threshold: u8,
        author: String,
        repository: Arc<dyn RuleRepository>,
    ) -> Self {
        let validator = RuleValidator::with_schema(schema.clone());
        ClaimsRuleEngine {
            repository,
            importer: RuleImporter::with_validator(validator.clone(), author.clone()),
            validator,
            evaluator: Evaluator::with_schema(schema),
            aggregator: ConfidenceAggregator::with_threshold(threshold),
            author,
        }
    }

    // ========== Rule catalog ==========

    /// Validate a rule without storing it
    pub fn validate_rule(&self, rule: &Rule) -> Vec<ValidationError> {
        self.validator.validate(rule)
    }

    /// Store a rule after it passes validation. The rule keeps the
    /// activation state it was given.
    pub async fn add_rule(&self, rule: Rule) -> Result<()> {
        let errors = self.validator.validate(&rule);
        if !errors.is_empty() {
            return Err(SdkError::InvalidRule { errors });
        }
        tracing::info!(rule_id = %rule.rule_id, "rule stored");
        self.repository.put(rule).await?;
        Ok(())
    }

    /// Load a rule by ID
    pub async fn get_rule(&self, rule_id: &str) -> Result<Rule> {
        Ok(self.repository.get(rule_id).await?)
    }

    /// List the whole rule catalog in insertion order
    pub async fn list_rules(&self) -> Result<Vec<Rule>> {
        Ok(self.repository.list().await?)
    }

    /// Activate a stored rule. Activation re-validates; a rule with
    /// findings stays inactive.
    pub async fn activate_rule(&self, rule_id: &str) -> Result<Rule> {
        let mut rule = self.repository.get(rule_id).await?;
        let errors = self.validator.validate(&rule);
        if !errors.is_empty() {
            return Err(SdkError::InvalidRule { errors });
        }
        rule.is_active = true;
        rule.audit.touch(&self.author);
        self.repository.put(rule.clone()).await?;
        tracing::info!(rule_id, "rule activated");
        Ok(rule)
    }

    /// Take a rule out of claim evaluation
    pub async fn deactivate_rule(&self, rule_id: &str) -> Result<Rule> {
        let mut rule = self.repository.get(rule_id).await?;
        rule.deactivate(&self.author);
        self.repository.put(rule.clone()).await?;
        tracing::info!(rule_id, "rule deactivated");
        Ok(rule)
    }

    /// Replace a rule's condition text. The rule comes back deactivated and
    /// must be re-activated once the new text validates.
    pub async fn update_rule_text(&self, rule_id: &str, text: &str) -> Result<Rule> {
        let mut rule = self.repository.get(rule_id).await?;
        rule.set_rule_text(text, &self.author);
        self.repository.put(rule.clone()).await?;
        Ok(rule)
    }

    /// Delete a rule by ID
    pub async fn delete_rule(&self, rule_id: &str) -> Result<()> {
        self.repository.delete(rule_id).await?;
        Ok(())
    }

    // ========== Bulk import ==========

    /// Import rules from CSV content and store the valid rows
    pub async fn import_csv(&self, content: &str) -> Result<ImportReport> {
        let report = self.importer.import_csv(content);
        self.store_imported(&report).await?;
        Ok(report)
    }

    /// Import rules from plain-text content and store the valid rows
    pub async fn import_text(&self, content: &str) -> Result<ImportReport> {
        let report = self.importer.import_text(content);
        self.store_imported(&report).await?;
        Ok(report)
    }

    async fn store_imported(&self, report: &ImportReport) -> Result<()> {
        for rule in &report.rules {
            self.repository.put(rule.clone()).await?;
        }
        Ok(())
    }

    // ========== Claim assessment ==========

    /// Evaluate one stored rule against a claim record, whether or not the
    /// rule is active. Meant for interactive rule testing.
    pub async fn test_rule(&self, rule_id: &str, record: &ClaimRecord) -> Result<EvaluationResult> {
        let rule = self.repository.get(rule_id).await?;
        self.test_rule_text(&rule.rule_text, record)
    }

    /// Evaluate unsaved rule text against a claim record
    pub fn test_rule_text(&self, text: &str, record: &ClaimRecord) -> Result<EvaluationResult> {
        let parsed = parse(text)?;
        Ok(self.evaluator.evaluate(&parsed.condition, record)?)
    }

    /// Run every active rule against a claim record and aggregate field
    /// confidence into a single assessment
    pub async fn assess_claim(&self, record: &ClaimRecord) -> Result<ClaimAssessment> {
        let rules = self.repository.list_active().await?;
        let evaluation = evaluate_rules(&self.evaluator, &rules, record);
        let confidence = self.aggregator.aggregate(record);

        tracing::info!(
            rules = evaluation.results.len(),
            blocking = evaluation.has_blocking_violation(),
            overall_confidence = ?confidence.overall,
            "claim assessed"
        );
        Ok(ClaimAssessment {
            rules: evaluation,
            confidence,
        })
    }
}
