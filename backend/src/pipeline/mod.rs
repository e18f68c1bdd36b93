pub mod header;
pub mod mapper;
pub mod template;
pub mod validator;
pub mod workbook;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::AppError;
use crate::models::ImportBatchResult;

pub use header::HeaderSchema;
pub use workbook::{Cell, RawRow, SheetRow, WorkbookFormat, WorkbookUpload};

/// Where the imported courses land on the backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportTarget {
    pub semester_id: Option<i64>,
    pub regulation_id: Option<i64>,
}

/// State of one import attempt, handed to each stage of the pipeline.
#[derive(Debug, Clone)]
pub struct ImportSession {
    pub id: Uuid,
    pub started_at: DateTime<Utc>,
    pub schema: HeaderSchema,
    pub target: ImportTarget,
}

impl ImportSession {
    pub fn new(schema: HeaderSchema, target: ImportTarget) -> Result<Self, AppError> {
        match schema {
            HeaderSchema::Semester if target.semester_id.is_none() => {
                return Err(AppError::BadRequest(
                    "Select a semester before importing courses".to_string(),
                ));
            }
            HeaderSchema::Bulk if target.regulation_id.is_none() => {
                return Err(AppError::BadRequest(
                    "Select a regulation before importing courses".to_string(),
                ));
            }
            _ => {}
        }

        Ok(Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            schema,
            target,
        })
    }
}

/// Runs the local stages: read, header check, row mapping, validation.
///
/// Fails before touching any row when the header does not match.
pub fn prepare(session: &ImportSession, upload: &WorkbookUpload) -> Result<ImportBatchResult, AppError> {
    let rows = workbook::read_rows(upload)?;

    let (header, data) = match rows.split_first() {
        Some((header, data)) => (header.cells.as_slice(), data),
        None => (&[][..], &[][..]),
    };
    header::validate_header(session.schema, header)?;

    let mut short_rows = 0;
    let mut records = Vec::with_capacity(data.len());
    for row in data {
        match mapper::map_row(session.schema, &row.cells) {
            Some(record) => records.push((row.number, record)),
            None => {
                warn!(
                    "import {}: dropping row {} ({} of {} columns)",
                    session.id,
                    row.number,
                    row.cells.len(),
                    session.schema.width()
                );
                short_rows += 1;
            }
        }
    }

    let mut result = validator::partition(session.schema, records);
    result.short_rows = short_rows;

    info!(
        "import {}: {} valid, {} invalid, {} short rows",
        session.id,
        result.valid.len(),
        result.invalid.len(),
        result.short_rows
    );

    Ok(result)
}
