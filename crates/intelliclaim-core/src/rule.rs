//! Rule metadata and lifecycle
//!
//! A `Rule` is a named, categorized boolean condition over claim fields with
//! a severity and an activation state. The rule text must validate before a
//! rule may be activated; editing the text of an active rule deactivates it
//! until it is re-validated.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Severity of a rule violation: blocking vs advisory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    /// Blocking violation
    Error,
    /// Advisory only
    Warning,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "Error",
            Severity::Warning => "Warning",
        }
    }
}

impl std::str::FromStr for Severity {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Error" => Ok(Severity::Error),
            "Warning" => Ok(Severity::Warning),
            other => Err(CoreError::InvalidSeverity(other.to_string())),
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Creation and last-update stamps for a rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditInfo {
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub last_updated_by: String,
    pub last_updated_at: DateTime<Utc>,
}

impl AuditInfo {
    /// Fresh audit info for a newly authored rule
    pub fn new(author: impl Into<String>) -> Self {
        let author = author.into();
        let now = Utc::now();
        AuditInfo {
            created_by: author.clone(),
            created_at: now,
            last_updated_by: author,
            last_updated_at: now,
        }
    }

    /// Stamp an update
    pub fn touch(&mut self, editor: impl Into<String>) {
        self.last_updated_by = editor.into();
        self.last_updated_at = Utc::now();
    }
}

/// Rule definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    /// Unique rule ID, immutable after creation
    pub rule_id: String,

    /// Business category (e.g. Hospital, Patient, Medical, Policy)
    pub category: String,

    /// Condition text in the rule grammar
    pub rule_text: String,

    /// Blocking vs advisory classification
    pub severity: Severity,

    /// Date from which the rule applies
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_date: Option<NaiveDate>,

    /// Whether the rule participates in claim evaluation.
    /// May only be set true after validation passes.
    pub is_active: bool,

    pub audit: AuditInfo,
}

impl Rule {
    /// Create a new, inactive rule
    pub fn new(
        rule_id: impl Into<String>,
        category: impl Into<String>,
        rule_text: impl Into<String>,
        severity: Severity,
        author: impl Into<String>,
    ) -> Self {
        Rule {
            rule_id: rule_id.into(),
            category: category.into(),
            rule_text: rule_text.into(),
            severity,
            effective_date: None,
            is_active: false,
            audit: AuditInfo::new(author),
        }
    }

    /// Set the effective date
    pub fn with_effective_date(mut self, date: NaiveDate) -> Self {
        self.effective_date = Some(date);
        self
    }

    /// Replace the rule text. The rule is deactivated until re-validated.
    pub fn set_rule_text(&mut self, text: impl Into<String>, editor: impl Into<String>) {
        self.rule_text = text.into();
        self.is_active = false;
        self.audit.touch(editor);
    }

    /// Take the rule out of claim evaluation
    pub fn deactivate(&mut self, editor: impl Into<String>) {
        self.is_active = false;
        self.audit.touch(editor);
    }
}
