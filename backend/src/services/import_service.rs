use std::sync::Arc;

use tracing::{error, info, warn};

use crate::client::CourseApi;
use crate::client::dto::ImportCoursesRequest;
use crate::error::AppError;
use crate::models::ImportReport;
use crate::pipeline::{self, ImportSession, WorkbookUpload};

pub struct ImportService {
    api: Arc<dyn CourseApi>,
}

impl ImportService {
    pub fn new(api: Arc<dyn CourseApi>) -> Self {
        Self { api }
    }

    /// Runs a whole import: local validation, submission of the valid rows,
    /// then a refresh of the target's course list.
    pub async fn import(
        &self,
        session: &ImportSession,
        upload: &WorkbookUpload,
    ) -> Result<ImportReport, AppError> {
        info!(
            "import {} started: {} as {:?} into {:?}",
            session.id, upload.file_name, session.schema, session.target
        );

        let batch = pipeline::prepare(session, upload)?;

        if batch.valid.is_empty() {
            warn!("import {}: no valid courses, nothing submitted", session.id);
            return Err(AppError::EmptyValidBatch {
                invalid: batch.invalid,
            });
        }

        let warning = if batch.invalid.is_empty() {
            None
        } else {
            Some(format!(
                "{} of {} rows were skipped because they failed validation",
                batch.invalid.len(),
                batch.invalid.len() + batch.valid.len()
            ))
        };

        let request = ImportCoursesRequest {
            courses: batch.valid,
            semester_id: session.target.semester_id,
            regulation_id: session.target.regulation_id,
        };
        let submitted = request.courses.len();

        let response = self
            .api
            .import_courses(session.schema, &request)
            .await
            .inspect_err(|e| error!("import {} failed at submission: {}", session.id, e))?;

        let message = match (response.imported_count, response.message) {
            (Some(count), _) => format!("Successfully imported {} courses", count),
            (None, Some(message)) => message,
            (None, None) => "Courses imported".to_string(),
        };

        let refreshed_courses = match self.api.fetch_courses(session.target).await {
            Ok(courses) => Some(courses.len()),
            Err(e) => {
                warn!("import {}: course list refresh failed: {}", session.id, e);
                None
            }
        };

        info!(
            "import {} finished: submitted {}, server reported {:?}",
            session.id, submitted, response.imported_count
        );

        Ok(ImportReport {
            session_id: session.id,
            imported_count: response.imported_count,
            submitted,
            message,
            warning,
            skipped: batch.invalid,
            short_rows: batch.short_rows,
            refreshed_courses,
        })
    }
}
