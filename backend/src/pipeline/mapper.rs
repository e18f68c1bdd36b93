use crate::models::{CourseImportRecord, CourseType};

use super::header::HeaderSchema;
use super::workbook::Cell;

/// Maps one data row onto a course record.
///
/// Returns `None` when the row has fewer cells than the schema has columns.
/// Hour cells that are empty or not numeric count as 0; the remaining numeric
/// fields keep `None` so validation can report them.
pub fn map_row(schema: HeaderSchema, row: &[Cell]) -> Option<CourseImportRecord> {
    if row.len() < schema.width() {
        return None;
    }

    // Bulk sheets carry the semester number in column 1 and shift the rest.
    let (semester_number, rest) = if schema.has_semester_column() {
        (row[1].integer(), &row[2..])
    } else {
        (None, &row[1..])
    };

    let hours = |idx: usize| rest[idx].integer().unwrap_or(0);
    let lecture_hours = hours(3);
    let tutorial_hours = hours(4);
    let practical_hours = hours(5);
    let experiential_hours = hours(6);

    Some(CourseImportRecord {
        course_code: rest[0].text(),
        course_title: rest[1].text(),
        category: rest[2].text().to_uppercase(),
        lecture_hours,
        tutorial_hours,
        practical_hours,
        experiential_hours,
        total_contact_periods: rest[7].integer(),
        credits: rest[8].integer(),
        min_mark: rest[9].integer(),
        max_mark: rest[10].integer(),
        semester_number,
        course_type: CourseType::derive(
            lecture_hours,
            tutorial_hours,
            practical_hours,
            experiential_hours,
        ),
    })
}
