use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One decoded CSV data line: header name to trimmed cell value.
pub type ImportRow = BTreeMap<String, String>;

/// A data row that could not be imported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowFailure {
    /// Line number in the uploaded file; the header is line 1.
    pub row: usize,
    pub error: String,
    /// The row as it was read, so the operator can correct and resubmit it.
    pub data: ImportRow,
}

/// A person created by the import.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedPerson {
    pub id: i64,
    pub national_id: String,
    pub name: String,
}

/// Outcome of one import batch. `total` always equals `success + failed`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImportSummary {
    pub total: usize,
    pub success: usize,
    pub failed: usize,
    pub errors: Vec<RowFailure>,
    pub created: Vec<CreatedPerson>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportDetails {
    pub errors: Vec<RowFailure>,
}

/// Body of a completed import, returned with `200 OK` even when rows failed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportResponse {
    pub message: String,
    pub summary: ImportSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<ImportDetails>,
}

impl From<ImportSummary> for ImportResponse {
    fn from(summary: ImportSummary) -> Self {
        let details = if summary.errors.is_empty() {
            None
        } else {
            Some(ImportDetails {
                errors: summary.errors.clone(),
            })
        };
        ImportResponse {
            message: "Import completed".to_string(),
            summary,
            details,
        }
    }
}
