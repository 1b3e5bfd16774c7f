//! Condition evaluation against a claim record
//!
//! Walks a parsed condition tree and compares typed field values to
//! literals. The condition text describes the *violation* (legacy rule
//! texts read `IF <problem> THEN flag as Error`), so a claim passes a rule
//! when the condition does NOT hold.
//!
//! `AND`/`OR` short-circuit left to right; a short-circuited right-hand
//! side is never looked up, so a record missing that field still evaluates
//! cleanly. The explanation trail is built bottom-up in evaluation order,
//! with `<skipped>` standing in for sub-conditions short-circuiting
//! suppressed.

use crate::error::{EvalError, Result};
use intelliclaim_core::{
    ClaimRecord, ClaimSchema, ConditionNode, Literal, LogicalOp, Operator, Value,
};
use serde::Serialize;
use std::cmp::Ordering;

/// Outcome of evaluating one rule against one claim record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationResult {
    /// True when the claim passes the rule (the violation condition did
    /// not hold)
    pub passed: bool,
    /// Human-readable trail of which sub-conditions fired
    pub explanation: String,
}

/// Stateless condition evaluator
///
/// Carries the claim schema so that named reference lists
/// (`HospitalID NOT IN approved_hospitals`) can be resolved. Evaluation is
/// a pure function of `(condition, record)`.
#[derive(Debug, Clone, Default)]
pub struct Evaluator {
    schema: ClaimSchema,
}

impl Evaluator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_schema(schema: ClaimSchema) -> Self {
        Evaluator { schema }
    }

    /// Evaluate a rule condition against a claim record.
    ///
    /// Returns `passed = false` when the condition holds (the rule
    /// triggers on the claim) and `passed = true` otherwise.
    pub fn evaluate(
        &self,
        condition: &ConditionNode,
        record: &ClaimRecord,
    ) -> Result<EvaluationResult> {
        let (triggered, trail) = self.eval_node(condition, record)?;
        tracing::debug!(triggered, %trail, "condition evaluated");
        let passed = !triggered;
        let explanation = if passed {
            format!("Rule passed: {}", trail)
        } else {
            format!("Rule failed: {}", trail)
        };
        Ok(EvaluationResult {
            passed,
            explanation,
        })
    }

    /// Evaluate the raw condition truth value with its explanation trail
    fn eval_node(&self, node: &ConditionNode, record: &ClaimRecord) -> Result<(bool, String)> {
        match node {
            ConditionNode::Comparison {
                field,
                operator,
                literal,
            } => {
                let result = self.eval_comparison(field, *operator, literal, record)?;
                let trail = format!("{} {} {} => {}", field, operator, literal, result);
                Ok((result, trail))
            }
            ConditionNode::Logical { left, op, right } => {
                let (left_result, left_trail) = self.eval_node(left, record)?;
                let short_circuit = match op {
                    LogicalOp::And => !left_result,
                    LogicalOp::Or => left_result,
                };
                if short_circuit {
                    return Ok((left_result, format!("{} {} <skipped>", left_trail, op)));
                }
                let (right_result, right_trail) = self.eval_node(right, record)?;
                Ok((
                    right_result,
                    format!("{} {} {}", left_trail, op, right_trail),
                ))
            }
            ConditionNode::Not { inner } => {
                let (result, trail) = self.eval_node(inner, record)?;
                Ok((!result, format!("NOT ({})", trail)))
            }
        }
    }

    fn eval_comparison(
        &self,
        field: &str,
        operator: Operator,
        literal: &Literal,
        record: &ClaimRecord,
    ) -> Result<bool> {
        let actual = record
            .value(field)
            .ok_or_else(|| EvalError::MissingField(field.to_string()))?;

        match literal {
            Literal::Value(expected) => compare(field, operator, actual, expected),
            Literal::ListRef(name) => {
                let items = self
                    .schema
                    .reference_list(name)
                    .ok_or_else(|| EvalError::UnknownList(name.clone()))?;
                membership(field, operator, actual, items)
            }
        }
    }
}

/// Typed comparison of a field value against a literal
fn compare(field: &str, operator: Operator, actual: &Value, expected: &Value) -> Result<bool> {
    if operator.is_membership() {
        return match expected {
            Value::List(items) => membership(field, operator, actual, items),
            other => Err(type_mismatch(field, operator, other, actual)),
        };
    }

    match expected {
        Value::Number(rhs) => {
            let lhs = actual
                .coerce_number()
                .ok_or_else(|| type_mismatch(field, operator, expected, actual))?;
            Ok(apply_ordering(operator, lhs.partial_cmp(rhs)))
        }
        Value::Date(rhs) => {
            let lhs = actual
                .coerce_date()
                .ok_or_else(|| type_mismatch(field, operator, expected, actual))?;
            Ok(apply_ordering(operator, lhs.partial_cmp(rhs)))
        }
        Value::String(rhs) => match actual {
            // A date-valued field may be compared against a quoted date
            Value::Date(lhs) => {
                let rhs = expected
                    .coerce_date()
                    .ok_or_else(|| type_mismatch(field, operator, expected, actual))?;
                Ok(apply_ordering(operator, lhs.partial_cmp(&rhs)))
            }
            // Case-sensitive exact match; strings have no ordering here
            Value::String(lhs) if !operator.is_ordering() => match operator {
                Operator::Eq => Ok(lhs == rhs),
                Operator::Ne => Ok(lhs != rhs),
                _ => unreachable!("membership handled above"),
            },
            _ => Err(type_mismatch(field, operator, expected, actual)),
        },
        Value::Bool(rhs) => match (actual, operator) {
            (Value::Bool(lhs), Operator::Eq) => Ok(lhs == rhs),
            (Value::Bool(lhs), Operator::Ne) => Ok(lhs != rhs),
            _ => Err(type_mismatch(field, operator, expected, actual)),
        },
        Value::Null => match operator {
            Operator::Eq => Ok(actual.is_null()),
            Operator::Ne => Ok(!actual.is_null()),
            _ => Err(type_mismatch(field, operator, expected, actual)),
        },
        Value::List(_) => Err(type_mismatch(field, operator, expected, actual)),
    }
}

fn membership(field: &str, operator: Operator, actual: &Value, items: &[Value]) -> Result<bool> {
    let contained = items.iter().any(|item| values_equal(actual, item));
    match operator {
        Operator::In => Ok(contained),
        Operator::NotIn => Ok(!contained),
        _ => Err(type_mismatch(
            field,
            operator,
            &Value::List(items.to_vec()),
            actual,
        )),
    }
}

// Exact-match membership, with date/string spellings unified so that a
// date-typed field matches a list of ISO strings and vice versa.
fn values_equal(a: &Value, b: &Value) -> bool {
    if a == b {
        return true;
    }
    match (a.coerce_date(), b.coerce_date()) {
        (Some(da), Some(db)) => da == db,
        _ => false,
    }
}

fn apply_ordering(operator: Operator, ordering: Option<Ordering>) -> bool {
    let Some(ordering) = ordering else {
        // NaN comparisons
        return false;
    };
    match operator {
        Operator::Eq => ordering == Ordering::Equal,
        Operator::Ne => ordering != Ordering::Equal,
        Operator::Lt => ordering == Ordering::Less,
        Operator::Le => ordering != Ordering::Greater,
        Operator::Gt => ordering == Ordering::Greater,
        Operator::Ge => ordering != Ordering::Less,
        Operator::In | Operator::NotIn => false,
    }
}

fn type_mismatch(field: &str, operator: Operator, expected: &Value, actual: &Value) -> EvalError {
    EvalError::TypeMismatch {
        field: field.to_string(),
        operator: operator.as_str().to_string(),
        expected: expected.type_name().to_string(),
        actual: actual.type_name().to_string(),
    }
}
