use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::course::CourseImportRecord;

/// A record that failed validation, with every failing rule spelled out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvalidRecord {
    /// 1-based row number as shown in the spreadsheet.
    pub row: usize,
    pub record: CourseImportRecord,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportBatchResult {
    pub valid: Vec<CourseImportRecord>,
    pub invalid: Vec<InvalidRecord>,
    /// Rows dropped for having fewer cells than the schema needs.
    pub short_rows: usize,
}

/// Outcome of a completed import, returned to the admin UI.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportReport {
    pub session_id: Uuid,
    /// Count reported by the backend; may differ from `submitted`.
    pub imported_count: Option<usize>,
    pub submitted: usize,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    pub skipped: Vec<InvalidRecord>,
    pub short_rows: usize,
    pub refreshed_courses: Option<usize>,
}
