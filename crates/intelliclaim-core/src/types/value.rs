//! Runtime value types for claim fields and rule literals
//!
//! The `Value` enum represents every value a claim field or rule literal can
//! take: null, boolean, number, calendar date, string, or list. Dates sort
//! before strings so that untagged deserialization recognizes ISO-like
//! tokens (`"2024-06-15"`) as dates rather than plain strings.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Runtime value type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Null value
    Null,
    /// Boolean value
    Bool(bool),
    /// Number value (f64 for simplicity, handles both int and float)
    Number(f64),
    /// Calendar date value
    Date(NaiveDate),
    /// String value
    String(String),
    /// List of values
    List(Vec<Value>),
}

impl Value {
    /// Human-readable type name, used in type-mismatch diagnostics
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::Date(_) => "date",
            Value::String(_) => "string",
            Value::List(_) => "list",
        }
    }

    /// Coerce this value to a number for numeric comparison.
    ///
    /// Numbers pass through; numeric strings (e.g. an extracted `"120000"`)
    /// are parsed. Everything else is not coercible.
    pub fn coerce_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
    }

    /// Coerce this value to a calendar date for chronological comparison.
    ///
    /// Dates pass through; ISO-formatted strings are parsed.
    pub fn coerce_date(&self) -> Option<NaiveDate> {
        match self {
            Value::Date(d) => Some(*d),
            Value::String(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok(),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl std::fmt::Display for Value {
    /// Canonical literal form, re-parseable by the rule grammar
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{}", n)
                }
            }
            Value::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Value::String(s) => write!(f, "\"{}\"", s),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
        }
    }
}
