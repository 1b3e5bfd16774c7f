//! Parsed condition trees
//!
//! A `ConditionNode` is the structural form of a rule's boolean expression.
//! Trees are immutable once produced; re-parsing the same rule text yields a
//! structurally identical tree.

use super::operator::{LogicalOp, Operator};
use crate::types::Value;
use serde::{Deserialize, Serialize};

/// The right-hand side of a comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Literal {
    /// An inline literal value (number, string, date, boolean, null, list)
    Value(Value),
    /// A named reference list configured in the claim schema,
    /// e.g. `approved_hospitals` in `HospitalID NOT IN approved_hospitals`
    ListRef(String),
}

impl std::fmt::Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Literal::Value(v) => write!(f, "{}", v),
            Literal::ListRef(name) => f.write_str(name),
        }
    }
}

impl From<Value> for Literal {
    fn from(value: Value) -> Self {
        Literal::Value(value)
    }
}

/// A node in a parsed rule condition tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ConditionNode {
    /// A single field comparison, e.g. `PatientAge < 18`
    Comparison {
        field: String,
        operator: Operator,
        literal: Literal,
    },
    /// Two sub-conditions joined by AND/OR
    Logical {
        left: Box<ConditionNode>,
        op: LogicalOp,
        right: Box<ConditionNode>,
    },
    /// Negation of a sub-condition
    Not { inner: Box<ConditionNode> },
}

impl ConditionNode {
    pub fn comparison(
        field: impl Into<String>,
        operator: Operator,
        literal: impl Into<Literal>,
    ) -> Self {
        ConditionNode::Comparison {
            field: field.into(),
            operator,
            literal: literal.into(),
        }
    }

    pub fn and(left: ConditionNode, right: ConditionNode) -> Self {
        ConditionNode::Logical {
            left: Box::new(left),
            op: LogicalOp::And,
            right: Box::new(right),
        }
    }

    pub fn or(left: ConditionNode, right: ConditionNode) -> Self {
        ConditionNode::Logical {
            left: Box::new(left),
            op: LogicalOp::Or,
            right: Box::new(right),
        }
    }

    pub fn not(inner: ConditionNode) -> Self {
        ConditionNode::Not {
            inner: Box::new(inner),
        }
    }

    /// All field names referenced by comparisons in this tree
    pub fn referenced_fields(&self) -> Vec<&str> {
        let mut result = Vec::new();
        self.collect_fields(&mut result);
        result
    }

    fn collect_fields<'a>(&'a self, result: &mut Vec<&'a str>) {
        match self {
            ConditionNode::Comparison { field, .. } => result.push(field),
            ConditionNode::Logical { left, right, .. } => {
                left.collect_fields(result);
                right.collect_fields(result);
            }
            ConditionNode::Not { inner } => inner.collect_fields(result),
        }
    }

    // Children that bind looser than their parent need explicit grouping in
    // the canonical form so that re-parsing reproduces this exact tree.
    fn fmt_child(child: &ConditionNode, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if matches!(child, ConditionNode::Logical { .. }) {
            write!(f, "({})", child)
        } else {
            write!(f, "{}", child)
        }
    }
}

impl std::fmt::Display for ConditionNode {
    /// Canonical re-serialization, re-parseable by the rule grammar
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConditionNode::Comparison {
                field,
                operator,
                literal,
            } => write!(f, "{} {} {}", field, operator, literal),
            ConditionNode::Logical { left, op, right } => {
                Self::fmt_child(left, f)?;
                write!(f, " {} ", op)?;
                Self::fmt_child(right, f)
            }
            ConditionNode::Not { inner } => {
                write!(f, "NOT ")?;
                Self::fmt_child(inner, f)
            }
        }
    }
}
