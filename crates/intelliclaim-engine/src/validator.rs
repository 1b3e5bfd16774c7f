//! Static rule validation
//!
//! Checks a rule before it may be activated: required metadata, parseable
//! rule text, and schema-known field and reference-list names. Checks are
//! independent; every failure is reported, none aborts the rest.

use intelliclaim_core::{ClaimSchema, ConditionNode, Literal, Rule};
use intelliclaim_parser::parse;
use serde::Serialize;

/// A single validation finding
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationError {
    /// Byte offset into the rule text, where the finding has one
    pub location: Option<usize>,
    pub message: String,
}

impl ValidationError {
    fn new(message: impl Into<String>) -> Self {
        ValidationError {
            location: None,
            message: message.into(),
        }
    }

    fn at(location: Option<usize>, message: impl Into<String>) -> Self {
        ValidationError {
            location,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.location {
            Some(offset) => write!(f, "{} (at offset {})", self.message, offset),
            None => f.write_str(&self.message),
        }
    }
}

/// Rule validator with an optional claim schema
///
/// An empty schema disables the unknown-field and unknown-list checks; the
/// schema is caller configuration, not something the engine hard-codes.
#[derive(Debug, Clone, Default)]
pub struct RuleValidator {
    schema: ClaimSchema,
}

impl RuleValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_schema(schema: ClaimSchema) -> Self {
        RuleValidator { schema }
    }

    /// Validate a rule. An empty result means the rule may be activated.
    pub fn validate(&self, rule: &Rule) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if rule.rule_id.trim().is_empty() {
            errors.push(ValidationError::new("RuleID is required"));
        }
        if rule.category.trim().is_empty() {
            errors.push(ValidationError::new("Category is required"));
        }
        if rule.rule_text.trim().is_empty() {
            errors.push(ValidationError::new("RuleText is required"));
            return errors;
        }

        match parse(&rule.rule_text) {
            Err(parse_error) => {
                errors.push(ValidationError::at(
                    parse_error.offset(),
                    parse_error.to_string(),
                ));
            }
            Ok(parsed) => {
                self.check_schema_references(&parsed.condition, &mut errors);
            }
        }

        if !errors.is_empty() {
            tracing::debug!(
                rule_id = %rule.rule_id,
                count = errors.len(),
                "rule failed validation"
            );
        }
        errors
    }

    fn check_schema_references(&self, condition: &ConditionNode, errors: &mut Vec<ValidationError>) {
        if !self.schema.has_no_fields() {
            for field in condition.referenced_fields() {
                if !self.schema.contains_field(field) {
                    errors.push(ValidationError::new(format!("Unknown field: {}", field)));
                }
            }
        }
        if !self.schema.has_no_reference_lists() {
            for name in referenced_lists(condition) {
                if self.schema.reference_list(name).is_none() {
                    errors.push(ValidationError::new(format!(
                        "Unknown reference list: {}",
                        name
                    )));
                }
            }
        }
    }
}

fn referenced_lists(node: &ConditionNode) -> Vec<&str> {
    fn walk<'a>(node: &'a ConditionNode, out: &mut Vec<&'a str>) {
        match node {
            ConditionNode::Comparison {
                literal: Literal::ListRef(name),
                ..
            } => out.push(name),
            ConditionNode::Comparison { .. } => {}
            ConditionNode::Logical { left, right, .. } => {
                walk(left, out);
                walk(right, out);
            }
            ConditionNode::Not { inner } => walk(inner, out),
        }
    }
    let mut out = Vec::new();
    walk(node, &mut out);
    out
}
