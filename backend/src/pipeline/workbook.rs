use std::io::{Cursor, Read, Seek};
use std::path::Path;

use calamine::{Data, Range, Reader, Xls, Xlsx, open_workbook_from_rs};

use crate::error::AppError;

pub const XLS_MIME: &str = "application/vnd.ms-excel";
pub const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkbookFormat {
    Xls,
    Xlsx,
}

impl WorkbookFormat {
    /// Accepts the upload when either its declared MIME type or its file
    /// extension names one of the two spreadsheet formats.
    pub fn detect(file_name: &str, content_type: Option<&str>) -> Result<Self, AppError> {
        let from_mime = content_type.and_then(|ct| {
            let essence = ct.split(';').next().unwrap_or_default().trim();
            match essence {
                XLS_MIME => Some(WorkbookFormat::Xls),
                XLSX_MIME => Some(WorkbookFormat::Xlsx),
                _ => None,
            }
        });
        if let Some(format) = from_mime {
            return Ok(format);
        }

        let extension = Path::new(file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match extension.as_deref() {
            Some("xls") => Ok(WorkbookFormat::Xls),
            Some("xlsx") => Ok(WorkbookFormat::Xlsx),
            _ => Err(AppError::UnsupportedFormat(match content_type {
                Some(ct) => format!("{} ({})", file_name, ct),
                None => file_name.to_string(),
            })),
        }
    }
}

/// A spreadsheet file as handed over by the admin UI.
#[derive(Debug, Clone)]
pub struct WorkbookUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
}

impl Cell {
    pub fn text(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(s) => s.trim().to_string(),
            Cell::Number(n) if n.fract() == 0.0 => format!("{}", *n as i64),
            Cell::Number(n) => n.to_string(),
        }
    }

    /// Integer value of the cell; fractional numbers truncate toward zero.
    pub fn integer(&self) -> Option<i64> {
        match self {
            Cell::Empty => None,
            Cell::Number(n) if n.is_finite() => Some(n.trunc() as i64),
            Cell::Number(_) => None,
            Cell::Text(s) => {
                let s = s.trim();
                s.parse::<i64>().ok().or_else(|| {
                    s.parse::<f64>()
                        .ok()
                        .filter(|f| f.is_finite())
                        .map(|f| f.trunc() as i64)
                })
            }
        }
    }

    pub fn is_blank(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            Cell::Number(_) => false,
        }
    }
}

impl From<&Data> for Cell {
    fn from(data: &Data) -> Self {
        match data {
            Data::Empty => Cell::Empty,
            Data::String(s) => Cell::Text(s.clone()),
            Data::Int(i) => Cell::Number(*i as f64),
            Data::Float(f) => Cell::Number(*f),
            Data::Bool(b) => Cell::Text(b.to_string()),
            Data::DateTime(dt) => Cell::Number(dt.as_f64()),
            Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
            Data::Error(e) => Cell::Text(format!("{}", e)),
        }
    }
}

pub type RawRow = Vec<Cell>;

/// A non-blank sheet row together with its 1-based row number.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetRow {
    pub number: usize,
    pub cells: RawRow,
}

/// Reads the first sheet of the upload with the reader for its detected
/// format. Row 0 is the header row.
///
/// Every row spans the full used width of the sheet, blank cells included.
/// Fully blank rows are dropped.
pub fn read_rows(upload: &WorkbookUpload) -> Result<Vec<SheetRow>, AppError> {
    let format = WorkbookFormat::detect(&upload.file_name, upload.content_type.as_deref())?;
    tracing::debug!(
        "reading {:?} workbook {} ({} bytes)",
        format,
        upload.file_name,
        upload.bytes.len()
    );

    let cursor = Cursor::new(upload.bytes.as_slice());
    let range = match format {
        WorkbookFormat::Xlsx => first_sheet(
            open_workbook_from_rs::<Xlsx<_>, _>(cursor).map_err(calamine::Error::from)?,
        )?,
        WorkbookFormat::Xls => first_sheet(
            open_workbook_from_rs::<Xls<_>, _>(cursor).map_err(calamine::Error::from)?,
        )?,
    };
    let Some(range) = range else {
        return Ok(Vec::new());
    };

    let first_row = range.start().map(|(row, _)| row as usize).unwrap_or(0);
    let rows = range
        .rows()
        .enumerate()
        .map(|(idx, row)| SheetRow {
            number: first_row + idx + 1,
            cells: row.iter().map(Cell::from).collect(),
        })
        .filter(|row| !row.cells.iter().all(Cell::is_blank))
        .collect();
    Ok(rows)
}

fn first_sheet<R, RS>(mut workbook: R) -> Result<Option<Range<Data>>, calamine::Error>
where
    R: Reader<RS>,
    RS: Read + Seek,
    calamine::Error: From<R::Error>,
{
    workbook
        .worksheet_range_at(0)
        .transpose()
        .map_err(calamine::Error::from)
}
