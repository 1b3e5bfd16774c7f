//! End-to-end tests: rule lifecycle, bulk import, and claim assessment

use intelliclaim_core::{ClaimRecord, ClaimSchema, Confidence, Rule, Severity, Value};
use intelliclaim_engine::RuleOutcome;
use intelliclaim_sdk::{ClaimsRuleEngine, SdkError};

fn hospital_schema() -> ClaimSchema {
    ClaimSchema::new()
        .with_fields([
            "HospitalID",
            "PatientAge",
            "GuardianConsent",
            "ClaimAmount",
            "PreAuthRequired",
            "PreAuthStatus",
        ])
        .with_reference_list(
            "approved_hospitals",
            vec![
                Value::String("HSP-001".into()),
                Value::String("HSP-002".into()),
            ],
        )
}

fn engine() -> ClaimsRuleEngine {
    ClaimsRuleEngine::builder()
        .with_schema(hospital_schema())
        .with_author("admin@intelliclaim.com")
        .build()
}

#[tokio::test]
async fn test_add_validate_activate_lifecycle() -> anyhow::Result<()> {
    let engine = engine();
    let rule = Rule::new(
        "R-001",
        "Hospital",
        "HospitalID NOT IN approved_hospitals",
        Severity::Error,
        "admin@intelliclaim.com",
    );
    engine.add_rule(rule).await?;

    // Stored but inactive: does not participate in assessment
    let record = ClaimRecord::new().with_field(
        "HospitalID",
        Value::String("HSP-999".into()),
        Confidence::Scored(90),
    );
    let assessment = engine.assess_claim(&record).await?;
    assert!(assessment.rules.results.is_empty());

    let activated = engine.activate_rule("R-001").await?;
    assert!(activated.is_active);

    let assessment = engine.assess_claim(&record).await?;
    assert_eq!(assessment.rules.results.len(), 1);
    assert_eq!(assessment.rules.results[0].outcome, RuleOutcome::Failed);
    assert!(assessment.has_blocking_violation());
    Ok(())
}

#[tokio::test]
async fn test_invalid_rule_is_rejected() {
    let engine = engine();
    let rule = Rule::new(
        "R-010",
        "Patient",
        "PatientAge >> 18",
        Severity::Error,
        "admin@intelliclaim.com",
    );

    let err = engine.add_rule(rule).await.unwrap_err();
    match err {
        SdkError::InvalidRule { errors } => {
            assert!(errors[0].message.contains("Unknown operator \">>\""));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_edit_deactivates_until_revalidated() -> anyhow::Result<()> {
    let engine = engine();
    engine
        .add_rule(Rule::new(
            "R-002",
            "Patient",
            "PatientAge < 18 AND GuardianConsent = false",
            Severity::Warning,
            "supervisor@intelliclaim.com",
        ))
        .await?;
    engine.activate_rule("R-002").await?;

    let edited = engine
        .update_rule_text("R-002", "PatientAge < 21 AND GuardianConsent = false")
        .await?;
    assert!(!edited.is_active);
    assert_eq!(edited.audit.last_updated_by, "admin@intelliclaim.com");

    // Broken text cannot be re-activated
    engine.update_rule_text("R-002", "PatientAge < 21 AND").await?;
    assert!(matches!(
        engine.activate_rule("R-002").await,
        Err(SdkError::InvalidRule { .. })
    ));
    Ok(())
}

#[tokio::test]
async fn test_bulk_import_and_assess() -> anyhow::Result<()> {
    let engine = engine();
    let report = engine
        .import_csv(
            "\
RuleID,Category,RuleText,Severity
R-001,Hospital,HospitalID NOT IN approved_hospitals,Error
R-002,Patient,PatientAge < 18 AND GuardianConsent = false,Warning
",
        )
        .await?;
    assert!(report.is_valid());
    assert_eq!(engine.list_rules().await?.len(), 2);

    let record = ClaimRecord::new()
        .with_field("HospitalID", Value::String("HSP-001".into()), Confidence::Scored(88))
        .with_field("PatientAge", Value::Number(16.0), Confidence::Scored(45))
        .with_field("GuardianConsent", Value::Bool(false), Confidence::Scored(92));

    let assessment = engine.assess_claim(&record).await?;
    assert_eq!(assessment.rules.results[0].outcome, RuleOutcome::Passed);
    assert_eq!(assessment.rules.results[1].outcome, RuleOutcome::Failed);
    // Warning-only failure does not block, but low confidence needs review
    assert!(!assessment.has_blocking_violation());
    assert_eq!(assessment.confidence.overall, Some(45));
    assert_eq!(assessment.confidence.flagged_fields, vec!["PatientAge".to_string()]);
    assert!(assessment.needs_review());
    Ok(())
}

#[tokio::test]
async fn test_import_keeps_valid_rows_on_partial_failure() -> anyhow::Result<()> {
    let engine = engine();
    let report = engine
        .import_csv(
            "\
RuleID,Category,RuleText,Severity
R-001,Hospital,HospitalID NOT IN approved_hospitals,Error
R-002,Patient,PatientAge < 18,
",
        )
        .await?;
    assert!(!report.is_valid());
    assert_eq!(report.errors[0].row, 2);

    // Only the clean row landed in the catalog
    let stored = engine.list_rules().await?;
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].rule_id, "R-001");
    Ok(())
}

#[tokio::test]
async fn test_rule_testing_without_activation() -> anyhow::Result<()> {
    let engine = engine();
    engine
        .add_rule(Rule::new(
            "R-003",
            "Policy",
            r#"ClaimAmount > 100000 AND PreAuthRequired = true AND PreAuthStatus != "Approved""#,
            Severity::Error,
            "admin@intelliclaim.com",
        ))
        .await?;

    let record = ClaimRecord::new()
        .with_field("ClaimAmount", Value::Number(120000.0), Confidence::Scored(80))
        .with_field("PreAuthRequired", Value::Bool(true), Confidence::Scored(90))
        .with_field(
            "PreAuthStatus",
            Value::String("Pending".into()),
            Confidence::Scored(90),
        );

    let result = engine.test_rule("R-003", &record).await?;
    assert!(!result.passed);
    assert!(result.explanation.contains("ClaimAmount > 100000 => true"));

    // Unsaved text can be tested too
    let result = engine.test_rule_text("ClaimAmount > 500000", &record)?;
    assert!(result.passed);
    Ok(())
}

#[tokio::test]
async fn test_claim_with_no_scored_fields() -> anyhow::Result<()> {
    let engine = engine();
    let record = ClaimRecord::new()
        .with_field("PatientAge", Value::Number(40.0), Confidence::Calculated)
        .with_field("ClaimAmount", Value::Number(50000.0), Confidence::Fetched);

    let assessment = engine.assess_claim(&record).await?;
    assert_eq!(assessment.confidence.overall, None);
    assert!(!assessment.needs_review());
    Ok(())
}
