use rust_xlsxwriter::{Format, Workbook};

use crate::error::AppError;

use super::header::HeaderSchema;

pub fn template_file_name(schema: HeaderSchema) -> &'static str {
    match schema {
        HeaderSchema::Semester => "course_import_template.xlsx",
        HeaderSchema::Bulk => "bulk_course_import_template.xlsx",
    }
}

/// Builds an empty workbook holding only the header row of `schema`.
pub fn template_workbook(schema: HeaderSchema) -> Result<Vec<u8>, AppError> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();

    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Courses")?;
    for (col, name) in schema.columns().iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *name, &bold)?;
        worksheet.set_column_width(col as u16, (name.len() + 4) as f64)?;
    }

    Ok(workbook.save_to_buffer()?)
}
