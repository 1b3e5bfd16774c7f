//! Unit tests for the evaluation engine, covering the documented
//! end-to-end scenarios.

use intelliclaim_core::{ClaimRecord, Confidence, Rule, Severity, Value};
use intelliclaim_engine::{
    evaluator::Evaluator, ruleset::evaluate_rules, ConfidenceAggregator, RuleOutcome,
};
use intelliclaim_parser::parse_condition;

fn guardian_rule() -> Rule {
    let mut rule = Rule::new(
        "R-002",
        "Patient",
        "PatientAge < 18 AND GuardianConsent = false",
        Severity::Warning,
        "supervisor@intelliclaim.com",
    );
    rule.is_active = true;
    rule
}

#[test]
fn test_minor_without_consent_fails_rule() {
    let record = ClaimRecord::new()
        .with_field("PatientAge", Value::Number(16.0), Confidence::Scored(95))
        .with_field("GuardianConsent", Value::Bool(false), Confidence::Scored(85));

    let node = parse_condition(&guardian_rule().rule_text).unwrap();
    let result = Evaluator::new().evaluate(&node, &record).unwrap();

    assert!(!result.passed);
    assert!(result.explanation.contains("PatientAge < 18"));
    assert!(result.explanation.contains("GuardianConsent = false"));
}

#[test]
fn test_adult_passes_without_inspecting_consent() {
    // Left side is false, so the right-hand field need not even exist
    let record = ClaimRecord::new().with_field(
        "PatientAge",
        Value::Number(20.0),
        Confidence::Scored(95),
    );

    let node = parse_condition(&guardian_rule().rule_text).unwrap();
    let result = Evaluator::new().evaluate(&node, &record).unwrap();

    assert!(result.passed);
    assert!(result.explanation.contains("<skipped>"));
}

#[test]
fn test_warning_failure_is_not_blocking() {
    let record = ClaimRecord::new()
        .with_field("PatientAge", Value::Number(16.0), Confidence::Scored(95))
        .with_field("GuardianConsent", Value::Bool(false), Confidence::Scored(85));

    let evaluation = evaluate_rules(&Evaluator::new(), &[guardian_rule()], &record);
    assert_eq!(evaluation.results[0].outcome, RuleOutcome::Failed);
    assert!(!evaluation.has_blocking_violation());

    let mut blocking = guardian_rule();
    blocking.severity = Severity::Error;
    let evaluation = evaluate_rules(&Evaluator::new(), &[blocking], &record);
    assert!(evaluation.has_blocking_violation());
}

#[test]
fn test_aggregator_mixed_confidence_sources() {
    let record = ClaimRecord::new()
        .with_field("A", Value::Number(1.0), Confidence::Scored(45))
        .with_field("B", Value::Number(2.0), Confidence::Scored(88))
        .with_field("C", Value::Number(3.0), Confidence::Calculated)
        .with_field("D", Value::Number(4.0), Confidence::Fetched);

    let report = ConfidenceAggregator::new().aggregate(&record);
    assert_eq!(report.overall, Some(45));
    assert_eq!(report.flagged_fields, vec!["A".to_string()]);
}

#[test]
fn test_pre_auth_rule_end_to_end() {
    let mut rule = Rule::new(
        "R-004",
        "Policy",
        r#"ClaimAmount > 100000 AND PreAuthRequired = true AND PreAuthStatus != "Approved""#,
        Severity::Error,
        "admin@intelliclaim.com",
    );
    rule.is_active = true;

    let record = ClaimRecord::new()
        .with_field("ClaimAmount", Value::Number(120000.0), Confidence::Scored(80))
        .with_field("PreAuthRequired", Value::Bool(true), Confidence::Scored(90))
        .with_field(
            "PreAuthStatus",
            Value::String("Pending".to_string()),
            Confidence::Scored(90),
        );

    let evaluation = evaluate_rules(&Evaluator::new(), &[rule], &record);
    assert_eq!(evaluation.results[0].outcome, RuleOutcome::Failed);
    assert!(evaluation.has_blocking_violation());
}

#[test]
fn test_policy_period_date_rule() {
    let mut rule = Rule::new(
        "R-005",
        "Policy",
        "PolicyEndDate < 2024-06-15",
        Severity::Error,
        "admin@intelliclaim.com",
    );
    rule.is_active = true;

    let record = ClaimRecord::new().with_field(
        "PolicyEndDate",
        Value::String("2024-12-31".to_string()),
        Confidence::Fetched,
    );

    let evaluation = evaluate_rules(&Evaluator::new(), &[rule], &record);
    assert_eq!(evaluation.results[0].outcome, RuleOutcome::Passed);
}
