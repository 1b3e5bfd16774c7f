//! Claim record types
//!
//! A `ClaimRecord` is one claim's extracted data snapshot: an
//! insertion-ordered mapping from field name to `FieldValue`. Records are
//! supplied by an external extraction service and are immutable for the
//! duration of an evaluation; the engine never owns or persists them.

use crate::types::Value;
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Extraction confidence for a claim field.
///
/// Raw-extracted fields carry a 0-100 score. Fields derived from other
/// fields (`Calculated`) or pulled from an external system of record
/// (`Fetched`) carry no score and are never subject to low-confidence
/// flagging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confidence {
    /// Extraction certainty, 0-100
    Scored(u8),
    /// Derived from other fields (e.g. age from date of birth)
    Calculated,
    /// Fetched from an external system of record
    Fetched,
}

impl Confidence {
    /// The numeric score, if this field is raw-extracted
    pub fn score(&self) -> Option<u8> {
        match self {
            Confidence::Scored(n) => Some(*n),
            Confidence::Calculated | Confidence::Fetched => None,
        }
    }
}

// Wire format: a bare integer for scored fields, "calculated"/"fetched"
// markers otherwise.
impl Serialize for Confidence {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Confidence::Scored(n) => serializer.serialize_u8(*n),
            Confidence::Calculated => serializer.serialize_str("calculated"),
            Confidence::Fetched => serializer.serialize_str("fetched"),
        }
    }
}

impl<'de> Deserialize<'de> for Confidence {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Score(u8),
            Marker(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Score(n) if n <= 100 => Ok(Confidence::Scored(n)),
            Raw::Score(n) => Err(D::Error::custom(format!(
                "confidence out of range: {} (expected 0-100)",
                n
            ))),
            Raw::Marker(s) => match s.as_str() {
                "calculated" => Ok(Confidence::Calculated),
                "fetched" => Ok(Confidence::Fetched),
                other => Err(D::Error::custom(format!(
                    "unknown confidence marker: {:?}",
                    other
                ))),
            },
        }
    }
}

/// A single extracted claim field: name, typed value, and confidence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldValue {
    pub name: String,
    pub value: Value,
    pub confidence: Confidence,
}

impl FieldValue {
    pub fn new(name: impl Into<String>, value: Value, confidence: Confidence) -> Self {
        FieldValue {
            name: name.into(),
            value,
            confidence,
        }
    }
}

/// One claim's extracted data snapshot, in extraction order
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ClaimRecord {
    fields: Vec<FieldValue>,
}

impl ClaimRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field, replacing any existing field of the same name
    pub fn insert(&mut self, field: FieldValue) {
        if let Some(existing) = self.fields.iter_mut().find(|f| f.name == field.name) {
            *existing = field;
        } else {
            self.fields.push(field);
        }
    }

    /// Builder-style insert
    pub fn with_field(
        mut self,
        name: impl Into<String>,
        value: Value,
        confidence: Confidence,
    ) -> Self {
        self.insert(FieldValue::new(name, value, confidence));
        self
    }

    /// Look up a field by name
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Look up a field's value by name
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.get(name).map(|f| &f.value)
    }

    /// Iterate fields in extraction order
    pub fn fields(&self) -> impl Iterator<Item = &FieldValue> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_insert_and_get() {
        let record = ClaimRecord::new()
            .with_field("PatientAge", Value::Number(16.0), Confidence::Calculated)
            .with_field("GuardianConsent", Value::Bool(false), Confidence::Scored(85));

        assert_eq!(record.len(), 2);
        assert_eq!(record.value("PatientAge"), Some(&Value::Number(16.0)));
        assert_eq!(
            record.get("GuardianConsent").unwrap().confidence,
            Confidence::Scored(85)
        );
        assert!(record.get("HospitalID").is_none());
    }

    #[test]
    fn test_insert_replaces_same_name() {
        let mut record = ClaimRecord::new();
        record.insert(FieldValue::new("A", Value::Number(1.0), Confidence::Scored(50)));
        record.insert(FieldValue::new("A", Value::Number(2.0), Confidence::Scored(60)));

        assert_eq!(record.len(), 1);
        assert_eq!(record.value("A"), Some(&Value::Number(2.0)));
    }

    #[test]
    fn test_record_preserves_order() {
        let record = ClaimRecord::new()
            .with_field("B", Value::Number(1.0), Confidence::Scored(10))
            .with_field("A", Value::Number(2.0), Confidence::Scored(20));

        let names: Vec<_> = record.fields().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["B", "A"]);
    }

    #[test]
    fn test_confidence_serde() {
        let json = r#"{"name":"HospitalCity","value":"Mumbai","confidence":45}"#;
        let field: FieldValue = serde_json::from_str(json).unwrap();
        assert_eq!(field.confidence, Confidence::Scored(45));

        let json = r#"{"name":"PatientAge","value":40,"confidence":"calculated"}"#;
        let field: FieldValue = serde_json::from_str(json).unwrap();
        assert_eq!(field.confidence, Confidence::Calculated);

        let bad = r#"{"name":"X","value":1,"confidence":150}"#;
        assert!(serde_json::from_str::<FieldValue>(bad).is_err());

        let bad = r#"{"name":"X","value":1,"confidence":"guessed"}"#;
        assert!(serde_json::from_str::<FieldValue>(bad).is_err());
    }
}
