//! Claim schema configuration
//!
//! The schema is caller-supplied configuration, not hard-coded: the set of
//! field names the extraction service can produce, plus named reference
//! lists that `IN` / `NOT IN` comparisons may cite by identifier (e.g.
//! `HospitalID NOT IN approved_hospitals`).

use crate::types::Value;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Known claim fields and reference lists
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ClaimSchema {
    fields: BTreeSet<String>,
    #[serde(default)]
    reference_lists: BTreeMap<String, Vec<Value>>,
}

impl ClaimSchema {
    /// An empty schema. Unknown-field validation is disabled until fields
    /// are registered.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields.extend(fields.into_iter().map(Into::into));
        self
    }

    pub fn with_reference_list(mut self, name: impl Into<String>, values: Vec<Value>) -> Self {
        self.reference_lists.insert(name.into(), values);
        self
    }

    pub fn contains_field(&self, name: &str) -> bool {
        self.fields.contains(name)
    }

    /// True when no fields are registered; the unknown-field check is
    /// skipped in that case.
    pub fn has_no_fields(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn reference_list(&self, name: &str) -> Option<&[Value]> {
        self.reference_lists.get(name).map(Vec::as_slice)
    }

    /// True when no reference lists are configured; the unknown-list check
    /// is skipped in that case.
    pub fn has_no_reference_lists(&self) -> bool {
        self.reference_lists.is_empty()
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(String::as_str)
    }
}
