use serde::{Deserialize, Serialize};

use crate::error::AppError;

use super::workbook::Cell;

pub const SEMESTER_COLUMNS: [&str; 12] = [
    "S. No",
    "Course Code",
    "Course Title",
    "Category",
    "L",
    "T",
    "P",
    "E",
    "Total Contact Periods",
    "Credits",
    "Min Marks",
    "Max Marks",
];

pub const BULK_COLUMNS: [&str; 13] = [
    "S. No",
    "Semester No",
    "Course Code",
    "Course Title",
    "Category",
    "L",
    "T",
    "P",
    "E",
    "Total Contact Periods",
    "Credits",
    "Min Marks",
    "Max Marks",
];

/// Column layout an import sheet is expected to follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaderSchema {
    /// Courses of the one semester selected in the UI.
    #[default]
    Semester,
    /// Courses across a regulation, each row naming its semester.
    Bulk,
}

impl HeaderSchema {
    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            HeaderSchema::Semester => &SEMESTER_COLUMNS,
            HeaderSchema::Bulk => &BULK_COLUMNS,
        }
    }

    pub fn width(&self) -> usize {
        self.columns().len()
    }

    pub fn has_semester_column(&self) -> bool {
        matches!(self, HeaderSchema::Bulk)
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

/// The header row without the blank cells the sheet carries past its last
/// named column.
fn named_columns(header: &[Cell]) -> &[Cell] {
    let end = header
        .iter()
        .rposition(|c| !c.is_blank())
        .map_or(0, |last| last + 1);
    &header[..end]
}

/// Positional, case-insensitive comparison of a header row.
pub fn header_matches(schema: HeaderSchema, header: &[Cell]) -> bool {
    let header = named_columns(header);
    let expected = schema.columns();
    header.len() == expected.len()
        && header
            .iter()
            .zip(expected)
            .all(|(actual, expected)| normalize(&actual.text()) == normalize(expected))
}

pub fn validate_header(schema: HeaderSchema, header: &[Cell]) -> Result<(), AppError> {
    if header_matches(schema, header) {
        return Ok(());
    }

    Err(AppError::HeaderMismatch {
        expected: schema.columns().iter().map(|c| c.to_string()).collect(),
        actual: named_columns(header).iter().map(Cell::text).collect(),
    })
}
