#![allow(dead_code)]

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use course_import::client::CourseApi;
use course_import::client::dto::{ImportCoursesRequest, ImportCoursesResponse};
use course_import::error::AppError;
use course_import::models::{Batch, CourseSummary};
use course_import::pipeline::header::{BULK_COLUMNS, SEMESTER_COLUMNS};
use course_import::pipeline::workbook::XLSX_MIME;
use course_import::pipeline::{HeaderSchema, ImportTarget, WorkbookUpload};
use rust_xlsxwriter::Workbook;

/// Writes rows into a one-sheet xlsx. Cells that parse as numbers are
/// written as numbers, empty strings are left unwritten.
pub fn xlsx(rows: &[Vec<String>]) -> Vec<u8> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    for (r, row) in rows.iter().enumerate() {
        for (c, value) in row.iter().enumerate() {
            if value.is_empty() {
                continue;
            }
            match value.parse::<f64>() {
                Ok(n) => worksheet.write_number(r as u32, c as u16, n).unwrap(),
                Err(_) => worksheet.write_string(r as u32, c as u16, value).unwrap(),
            };
        }
    }
    workbook.save_to_buffer().unwrap()
}

pub fn upload(rows: &[Vec<String>]) -> WorkbookUpload {
    WorkbookUpload {
        file_name: "courses.xlsx".to_string(),
        content_type: Some(XLSX_MIME.to_string()),
        bytes: xlsx(rows),
    }
}

pub fn header(schema: HeaderSchema) -> Vec<String> {
    match schema {
        HeaderSchema::Semester => SEMESTER_COLUMNS.iter().map(|c| c.to_string()).collect(),
        HeaderSchema::Bulk => BULK_COLUMNS.iter().map(|c| c.to_string()).collect(),
    }
}

/// A 12-column data row with consistent totals, 3 credits and category PCC.
pub fn course_row(sno: u32, code: &str, ltpe: [i64; 4], min: i64, max: i64) -> Vec<String> {
    let [l, t, p, e] = ltpe;
    vec![
        sno.to_string(),
        code.to_string(),
        format!("Course {}", code),
        "PCC".to_string(),
        l.to_string(),
        t.to_string(),
        p.to_string(),
        e.to_string(),
        (l + t + p + e).to_string(),
        "3".to_string(),
        min.to_string(),
        max.to_string(),
    ]
}

/// Same as `course_row` with a semester number in column 1.
pub fn bulk_row(sno: u32, semester: &str, code: &str, ltpe: [i64; 4]) -> Vec<String> {
    let mut row = course_row(sno, code, ltpe, 40, 100);
    row.insert(1, semester.to_string());
    row
}

pub fn semester_target(id: i64) -> ImportTarget {
    ImportTarget {
        semester_id: Some(id),
        regulation_id: None,
    }
}

pub fn regulation_target(id: i64) -> ImportTarget {
    ImportTarget {
        semester_id: None,
        regulation_id: Some(id),
    }
}

pub fn batch(id: i64, course_id: i64, staff_id: Option<i64>) -> Batch {
    Batch {
        id,
        course_id,
        name: format!("Section {}", id),
        staff_id,
        capacity: Some(60),
    }
}

pub enum AssignBehavior {
    Accept,
    Reject(String),
    Stall(Duration),
    /// Rejects `batch_id` after `delay`; every other batch is accepted.
    RejectBatchAfter {
        batch_id: i64,
        delay: Duration,
        message: String,
    },
}

/// In-memory backend that records what the gateway sends it.
pub struct RecordingCourseApi {
    pub imports: Mutex<Vec<(HeaderSchema, ImportCoursesRequest)>>,
    pub refreshes: AtomicUsize,
    pub reported_count: Option<usize>,
    pub reject_import: Option<String>,
    pub batches: Vec<Batch>,
    pub assign: AssignBehavior,
}

impl Default for RecordingCourseApi {
    fn default() -> Self {
        Self {
            imports: Mutex::new(Vec::new()),
            refreshes: AtomicUsize::new(0),
            reported_count: None,
            reject_import: None,
            batches: Vec::new(),
            assign: AssignBehavior::Accept,
        }
    }
}

impl RecordingCourseApi {
    pub fn import_calls(&self) -> usize {
        self.imports.lock().unwrap().len()
    }

    pub fn last_import(&self) -> (HeaderSchema, ImportCoursesRequest) {
        self.imports.lock().unwrap().last().cloned().expect("no import issued")
    }

    pub fn refresh_calls(&self) -> usize {
        self.refreshes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CourseApi for RecordingCourseApi {
    async fn import_courses(
        &self,
        schema: HeaderSchema,
        request: &ImportCoursesRequest,
    ) -> Result<ImportCoursesResponse, AppError> {
        self.imports.lock().unwrap().push((schema, request.clone()));
        if let Some(message) = &self.reject_import {
            return Err(AppError::Submission(message.clone()));
        }
        Ok(ImportCoursesResponse {
            imported_count: Some(self.reported_count.unwrap_or(request.courses.len())),
            message: None,
        })
    }

    async fn fetch_courses(&self, _target: ImportTarget) -> Result<Vec<CourseSummary>, AppError> {
        self.refreshes.fetch_add(1, Ordering::SeqCst);
        let imported = self
            .imports
            .lock()
            .unwrap()
            .iter()
            .flat_map(|(_, req)| req.courses.clone())
            .enumerate()
            .map(|(idx, c)| CourseSummary {
                id: idx as i64 + 1,
                course_code: c.course_code,
                course_title: c.course_title,
                category: Some(c.category),
                course_type: Some(c.course_type.to_string()),
            })
            .collect();
        Ok(imported)
    }

    async fn fetch_batches(&self, course_id: i64) -> Result<Vec<Batch>, AppError> {
        Ok(self
            .batches
            .iter()
            .filter(|b| b.course_id == course_id)
            .cloned()
            .collect())
    }

    async fn assign_staff(&self, batch_id: i64, _staff_id: Option<i64>) -> Result<(), AppError> {
        match &self.assign {
            AssignBehavior::Accept => Ok(()),
            AssignBehavior::Reject(message) => Err(AppError::Submission(message.clone())),
            AssignBehavior::Stall(delay) => {
                tokio::time::sleep(*delay).await;
                Ok(())
            }
            AssignBehavior::RejectBatchAfter {
                batch_id: rejected,
                delay,
                message,
            } => {
                if batch_id != *rejected {
                    return Ok(());
                }
                tokio::time::sleep(*delay).await;
                Err(AppError::Submission(message.clone()))
            }
        }
    }
}
