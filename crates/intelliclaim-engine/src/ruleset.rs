//! Rule-set evaluation against one claim
//!
//! Applies every active rule to a claim record. Each rule's evaluation is
//! isolated: a rule whose text no longer parses, or whose evaluation hits a
//! missing field or type mismatch, is reported as indeterminate and the
//! remaining rules still run. Results keep rule-declaration order for
//! deterministic reporting.

use crate::error::EvalError;
use crate::evaluator::Evaluator;
use intelliclaim_core::{Rule, Severity};
use intelliclaim_parser::parse;
use serde::Serialize;

/// Per-rule outcome
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum RuleOutcome {
    /// The claim satisfies the rule
    Passed,
    /// The rule triggered on the claim
    Failed,
    /// The rule could not be evaluated; distinct from pass and fail so a
    /// reviewer can investigate
    Indeterminate { reason: String },
}

/// One rule's result within a claim evaluation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleEvaluation {
    pub rule_id: String,
    pub category: String,
    pub severity: Severity,
    pub outcome: RuleOutcome,
    /// Explanation trail, absent for indeterminate rules
    pub explanation: Option<String>,
}

/// All rule results for one claim, in rule-declaration order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClaimEvaluation {
    pub results: Vec<RuleEvaluation>,
}

impl ClaimEvaluation {
    /// True when any failed rule carries `Severity::Error`. Warning
    /// failures are advisory and do not block downstream processing.
    pub fn has_blocking_violation(&self) -> bool {
        self.results.iter().any(|r| {
            r.severity == Severity::Error && matches!(r.outcome, RuleOutcome::Failed)
        })
    }

    /// Failed rules, blocking and advisory alike
    pub fn violations(&self) -> impl Iterator<Item = &RuleEvaluation> {
        self.results
            .iter()
            .filter(|r| matches!(r.outcome, RuleOutcome::Failed))
    }

    /// Rules that could not be evaluated
    pub fn indeterminate(&self) -> impl Iterator<Item = &RuleEvaluation> {
        self.results
            .iter()
            .filter(|r| matches!(r.outcome, RuleOutcome::Indeterminate { .. }))
    }
}

/// Evaluate all active rules against one claim record
pub fn evaluate_rules(
    evaluator: &Evaluator,
    rules: &[Rule],
    record: &intelliclaim_core::ClaimRecord,
) -> ClaimEvaluation {
    let mut results = Vec::new();

    for rule in rules.iter().filter(|r| r.is_active) {
        let (outcome, explanation) = match parse(&rule.rule_text) {
            Err(parse_error) => {
                tracing::warn!(rule_id = %rule.rule_id, error = %parse_error, "active rule no longer parses");
                (
                    RuleOutcome::Indeterminate {
                        reason: parse_error.to_string(),
                    },
                    None,
                )
            }
            Ok(parsed) => match evaluator.evaluate(&parsed.condition, record) {
                Ok(result) => {
                    let outcome = if result.passed {
                        RuleOutcome::Passed
                    } else {
                        RuleOutcome::Failed
                    };
                    (outcome, Some(result.explanation))
                }
                Err(eval_error) => {
                    tracing::debug!(rule_id = %rule.rule_id, error = %eval_error, "rule indeterminate");
                    (indeterminate(eval_error), None)
                }
            },
        };

        results.push(RuleEvaluation {
            rule_id: rule.rule_id.clone(),
            category: rule.category.clone(),
            severity: rule.severity,
            outcome,
            explanation,
        });
    }

    ClaimEvaluation { results }
}

fn indeterminate(error: EvalError) -> RuleOutcome {
    RuleOutcome::Indeterminate {
        reason: error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use intelliclaim_core::{ClaimRecord, Confidence, Value};

    fn active_rule(id: &str, text: &str, severity: Severity) -> Rule {
        let mut rule = Rule::new(id, "Patient", text, severity, "tester");
        rule.is_active = true;
        rule
    }

    fn record() -> ClaimRecord {
        ClaimRecord::new()
            .with_field("PatientAge", Value::Number(16.0), Confidence::Calculated)
            .with_field("GuardianConsent", Value::Bool(false), Confidence::Scored(85))
    }

    #[test]
    fn test_results_keep_declaration_order() {
        let rules = vec![
            active_rule("R-003", "PatientAge > 100", Severity::Error),
            active_rule("R-001", "PatientAge < 18", Severity::Warning),
            active_rule("R-002", "GuardianConsent = false", Severity::Error),
        ];
        let evaluation = evaluate_rules(&Evaluator::new(), &rules, &record());

        let ids: Vec<_> = evaluation.results.iter().map(|r| r.rule_id.as_str()).collect();
        assert_eq!(ids, vec!["R-003", "R-001", "R-002"]);
    }

    #[test]
    fn test_inactive_rules_are_skipped() {
        let rules = vec![
            active_rule("R-001", "PatientAge < 18", Severity::Error),
            Rule::new("R-002", "Patient", "PatientAge < 18", Severity::Error, "t"),
        ];
        let evaluation = evaluate_rules(&Evaluator::new(), &rules, &record());
        assert_eq!(evaluation.results.len(), 1);
    }

    #[test]
    fn test_error_in_one_rule_does_not_abort_the_rest() {
        let rules = vec![
            active_rule("R-001", "NoSuchField = 1", Severity::Error),
            active_rule("R-002", "PatientAge < 18", Severity::Warning),
        ];
        let evaluation = evaluate_rules(&Evaluator::new(), &rules, &record());

        assert!(matches!(
            evaluation.results[0].outcome,
            RuleOutcome::Indeterminate { .. }
        ));
        assert_eq!(evaluation.results[1].outcome, RuleOutcome::Failed);
    }

    #[test]
    fn test_blocking_policy_follows_severity() {
        let warning_only = vec![active_rule("R-001", "PatientAge < 18", Severity::Warning)];
        let evaluation = evaluate_rules(&Evaluator::new(), &warning_only, &record());
        assert!(!evaluation.has_blocking_violation());
        assert_eq!(evaluation.violations().count(), 1);

        let blocking = vec![active_rule("R-002", "PatientAge < 18", Severity::Error)];
        let evaluation = evaluate_rules(&Evaluator::new(), &blocking, &record());
        assert!(evaluation.has_blocking_violation());
    }

    #[test]
    fn test_indeterminate_is_distinct_from_fail() {
        let rules = vec![active_rule("R-001", "NoSuchField = 1", Severity::Error)];
        let evaluation = evaluate_rules(&Evaluator::new(), &rules, &record());

        assert!(!evaluation.has_blocking_violation());
        assert_eq!(evaluation.indeterminate().count(), 1);
        assert_eq!(evaluation.violations().count(), 0);
    }
}
