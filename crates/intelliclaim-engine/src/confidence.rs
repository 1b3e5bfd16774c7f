//! Claim confidence aggregation
//!
//! Overall claim confidence is the minimum confidence across raw-extracted
//! fields. Calculated and fetched fields carry no extraction uncertainty
//! and are excluded. A claim with no scored fields has no overall
//! confidence at all, modeled as `None` rather than a default of 100 or 0.

use intelliclaim_core::ClaimRecord;
use serde::Serialize;

/// Default low-confidence threshold, matching the review UI's 60% cutoff
pub const DEFAULT_LOW_CONFIDENCE_THRESHOLD: u8 = 60;

/// Display banding for a confidence score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ConfidenceBand {
    /// Below 50
    Low,
    /// 50 to 74
    Medium,
    /// 75 and above
    High,
}

impl ConfidenceBand {
    pub fn of(score: u8) -> Self {
        if score < 50 {
            ConfidenceBand::Low
        } else if score < 75 {
            ConfidenceBand::Medium
        } else {
            ConfidenceBand::High
        }
    }
}

/// Aggregated confidence for one claim
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfidenceReport {
    /// Minimum confidence across scored fields, `None` when the record
    /// carries no scored field
    pub overall: Option<u8>,
    /// Fields strictly below the low-confidence threshold, in record order
    pub flagged_fields: Vec<String>,
}

impl ConfidenceReport {
    pub fn overall_band(&self) -> Option<ConfidenceBand> {
        self.overall.map(ConfidenceBand::of)
    }
}

/// Confidence aggregator with a configurable flagging threshold
#[derive(Debug, Clone)]
pub struct ConfidenceAggregator {
    threshold: u8,
}

impl Default for ConfidenceAggregator {
    fn default() -> Self {
        ConfidenceAggregator {
            threshold: DEFAULT_LOW_CONFIDENCE_THRESHOLD,
        }
    }
}

impl ConfidenceAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_threshold(threshold: u8) -> Self {
        ConfidenceAggregator { threshold }
    }

    /// Aggregate a claim record's field confidences
    pub fn aggregate(&self, record: &ClaimRecord) -> ConfidenceReport {
        let mut overall: Option<u8> = None;
        let mut flagged_fields = Vec::new();

        for field in record.fields() {
            let Some(score) = field.confidence.score() else {
                continue;
            };
            overall = Some(match overall {
                Some(current) => current.min(score),
                None => score,
            });
            if score < self.threshold {
                flagged_fields.push(field.name.clone());
            }
        }

        tracing::debug!(?overall, flagged = flagged_fields.len(), "claim confidence aggregated");
        ConfidenceReport {
            overall,
            flagged_fields,
        }
    }
}
