use crate::models::{Category, CourseImportRecord, CourseType, ImportBatchResult, InvalidRecord};

use super::header::HeaderSchema;

pub const MAX_MARK_LIMIT: i64 = 100;
pub const SEMESTER_RANGE: std::ops::RangeInclusive<i64> = 1..=8;

/// Checks every rule against the record and returns all failures.
///
/// An empty list means the record is valid.
pub fn validate_record(schema: HeaderSchema, record: &CourseImportRecord) -> Vec<String> {
    let mut reasons = Vec::new();

    if record.course_code.trim().is_empty() {
        reasons.push("Course code is required".to_string());
    }
    if record.course_title.trim().is_empty() {
        reasons.push("Course title is required".to_string());
    }

    if record.category.trim().is_empty() {
        reasons.push("Category is required".to_string());
    } else if record.category.parse::<Category>().is_err() {
        let allowed: Vec<&str> = Category::ALL.iter().map(Category::as_str).collect();
        reasons.push(format!(
            "Invalid category '{}' (expected one of {})",
            record.category,
            allowed.join(", ")
        ));
    }

    if !CourseType::ALL.contains(&record.course_type) {
        reasons.push(format!("Invalid course type '{}'", record.course_type));
    }

    let hours = [
        ("L", record.lecture_hours),
        ("T", record.tutorial_hours),
        ("P", record.practical_hours),
        ("E", record.experiential_hours),
    ];
    for (name, value) in hours {
        if value < 0 {
            reasons.push(format!("{} hours cannot be negative", name));
        }
    }

    let numeric = [
        ("Min marks", record.min_mark),
        ("Max marks", record.max_mark),
        ("Total contact periods", record.total_contact_periods),
        ("Credits", record.credits),
    ];
    for (name, value) in numeric {
        if value.is_none() {
            reasons.push(format!("{} must be a number", name));
        }
    }

    if let Some(min) = record.min_mark {
        if min < 0 {
            reasons.push("Min marks cannot be negative".to_string());
        }
    }
    if let Some(max) = record.max_mark {
        if max < 0 {
            reasons.push("Max marks cannot be negative".to_string());
        }
        if max > MAX_MARK_LIMIT {
            reasons.push(format!("Max marks cannot exceed {}", MAX_MARK_LIMIT));
        }
    }
    if let (Some(min), Some(max)) = (record.min_mark, record.max_mark) {
        if min > max {
            reasons.push(format!("Min marks ({}) exceed max marks ({})", min, max));
        }
    }

    match (record.total_contact_periods, record.hours_total()) {
        (_, None) => reasons.push("L + T + P + E is too large".to_string()),
        (Some(total), Some(hours)) if total != hours => reasons.push(format!(
            "Total contact periods ({}) must equal L + T + P + E ({})",
            total, hours
        )),
        _ => {}
    }

    if schema.has_semester_column() {
        match record.semester_number {
            Some(n) if SEMESTER_RANGE.contains(&n) => {}
            Some(n) => reasons.push(format!("Semester number {} must be between 1 and 8", n)),
            None => reasons.push("Semester number must be a whole number between 1 and 8".to_string()),
        }
    }

    reasons
}

/// Splits mapped records into the batch to submit and the rejects.
///
/// `records` pairs each record with its 1-based sheet row.
pub fn partition(
    schema: HeaderSchema,
    records: impl IntoIterator<Item = (usize, CourseImportRecord)>,
) -> ImportBatchResult {
    let mut result = ImportBatchResult::default();

    for (row, record) in records {
        let reasons = validate_record(schema, &record);
        if reasons.is_empty() {
            result.valid.push(record);
        } else {
            result.invalid.push(InvalidRecord {
                row,
                record,
                reason: reasons.join("; "),
            });
        }
    }

    result
}
