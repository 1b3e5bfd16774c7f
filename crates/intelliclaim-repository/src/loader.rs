//! Bulk rule import
//!
//! Two file formats are accepted:
//!
//! - CSV with a header row and columns `RuleID, Category, RuleText,
//!   Severity, EffectiveDate` (the last column optional). Fields are split
//!   on commas; rule texts therefore must not contain commas.
//! - Plain text with one rule condition per line. Line `N` becomes rule
//!   `TXT-N` in category `General` with severity `Error`.
//!
//! Every row runs through the full rule validator. Errors are reported per
//! row (1-based, counting data rows) and an offending row is excluded from
//! the imported set; the remaining rows still import. Rows that validate
//! cleanly come out active and ready to evaluate.

use std::path::Path;

use intelliclaim_core::{Rule, Severity};
use intelliclaim_engine::RuleValidator;
use serde::Serialize;

use crate::{RepositoryError, RepositoryResult};

/// Number of rows shown in an import preview
pub const PREVIEW_ROWS: usize = 10;

/// A validation finding tied to one data row of the import file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowError {
    /// 1-based data row number (the CSV header is not counted)
    pub row: usize,
    pub message: String,
}

impl std::fmt::Display for RowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Row {}: {}", self.row, self.message)
    }
}

/// Raw view of one parsed row, before any validation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RulePreview {
    pub rule_id: String,
    pub category: String,
    pub rule_text: String,
    pub severity: String,
    pub effective_date: Option<String>,
}

/// Outcome of an import run
#[derive(Debug, Clone)]
pub struct ImportReport {
    /// Rules that validated cleanly, in file order
    pub rules: Vec<Rule>,
    /// Raw view of the first [`PREVIEW_ROWS`] data rows
    pub preview: Vec<RulePreview>,
    /// Findings across all rows, in row order
    pub errors: Vec<RowError>,
}

impl ImportReport {
    /// True when every row validated cleanly
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Bulk rule importer
///
/// Shares the validator with interactive rule editing, so an import rejects
/// exactly what the editor would reject.
#[derive(Debug, Clone)]
pub struct RuleImporter {
    validator: RuleValidator,
    author: String,
}

impl RuleImporter {
    pub fn new(author: impl Into<String>) -> Self {
        RuleImporter {
            validator: RuleValidator::new(),
            author: author.into(),
        }
    }

    pub fn with_validator(validator: RuleValidator, author: impl Into<String>) -> Self {
        RuleImporter {
            validator,
            author: author.into(),
        }
    }

    /// Import from a file path, dispatching on the extension
    pub async fn import_file(&self, path: impl AsRef<Path>) -> RepositoryResult<ImportReport> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();

        let content = tokio::fs::read_to_string(path).await?;
        match extension.as_str() {
            "csv" => Ok(self.import_csv(&content)),
            "txt" => Ok(self.import_text(&content)),
            other => Err(RepositoryError::UnsupportedFormat(other.to_string())),
        }
    }

    /// Import CSV content; the first non-empty line is treated as a header
    pub fn import_csv(&self, content: &str) -> ImportReport {
        let rows: Vec<RulePreview> = content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .skip(1)
            .map(parse_csv_row)
            .collect();
        self.validate_rows(rows)
    }

    /// Import plain-text content, one rule condition per line
    pub fn import_text(&self, content: &str) -> ImportReport {
        let rows: Vec<RulePreview> = content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .enumerate()
            .map(|(index, line)| RulePreview {
                rule_id: format!("TXT-{}", index + 1),
                category: "General".to_string(),
                rule_text: line.trim().to_string(),
                severity: "Error".to_string(),
                effective_date: None,
            })
            .collect();
        self.validate_rows(rows)
    }

    fn validate_rows(&self, rows: Vec<RulePreview>) -> ImportReport {
        let mut rules = Vec::new();
        let mut errors = Vec::new();

        for (index, row) in rows.iter().enumerate() {
            let row_number = index + 1;
            let mut row_errors = Vec::new();

            let severity = match row.severity.parse::<Severity>() {
                Ok(severity) => severity,
                Err(err) => {
                    row_errors.push(RowError {
                        row: row_number,
                        message: err.to_string(),
                    });
                    // Placeholder so the remaining checks still run
                    Severity::Error
                }
            };

            let mut rule = Rule::new(
                &row.rule_id,
                &row.category,
                &row.rule_text,
                severity,
                &self.author,
            );
            if let Some(raw) = &row.effective_date {
                match raw.parse::<chrono::NaiveDate>() {
                    Ok(date) => rule = rule.with_effective_date(date),
                    Err(_) => row_errors.push(RowError {
                        row: row_number,
                        message: format!("Invalid EffectiveDate: {}", raw),
                    }),
                }
            }

            for finding in self.validator.validate(&rule) {
                row_errors.push(RowError {
                    row: row_number,
                    message: finding.to_string(),
                });
            }

            if row_errors.is_empty() {
                rule.is_active = true;
                rules.push(rule);
            } else {
                errors.extend(row_errors);
            }
        }

        tracing::info!(
            imported = rules.len(),
            rejected_findings = errors.len(),
            "bulk import validated"
        );
        ImportReport {
            rules,
            preview: rows.into_iter().take(PREVIEW_ROWS).collect(),
            errors,
        }
    }
}

fn parse_csv_row(line: &str) -> RulePreview {
    let values: Vec<&str> = line.split(',').map(str::trim).collect();
    let field = |index: usize| values.get(index).copied().unwrap_or("").to_string();
    let effective_date = values
        .get(4)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string);

    RulePreview {
        rule_id: field(0),
        category: field(1),
        rule_text: field(2),
        severity: field(3),
        effective_date,
    }
}
