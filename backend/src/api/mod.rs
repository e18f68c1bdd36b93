use axum::Json;
use axum::body::Bytes;
use axum::extract::{DefaultBodyLimit, Path, Query};
use axum::http::{HeaderMap, HeaderValue, header};
use axum::response::IntoResponse;
use axum::routing::{post, put};
use axum::{Router, extract::State, http::StatusCode, routing::get};
use serde::Deserialize;

use crate::error::AppError;
use crate::models::*;
use crate::pipeline::template::{template_file_name, template_workbook};
use crate::pipeline::workbook::XLSX_MIME;
use crate::pipeline::{HeaderSchema, ImportSession, ImportTarget, WorkbookUpload};
use crate::state::AppState;

const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Deserialize)]
struct TemplateParams {
    #[serde(default)]
    schema: HeaderSchema,
}

#[derive(Deserialize)]
struct ImportParams {
    #[serde(default)]
    schema: HeaderSchema,
    semester_id: Option<i64>,
    regulation_id: Option<i64>,
    file_name: Option<String>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/template", get(download_template))
        .route(
            "/imports/courses",
            post(import_courses).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route("/courses/{course_id}/batches", get(list_batches))
        .route("/batches/{batch_id}/staff", put(assign_staff))
        .with_state(state)
}

async fn health() -> StatusCode {
    StatusCode::OK
}

async fn download_template(
    Query(params): Query<TemplateParams>,
) -> Result<impl IntoResponse, AppError> {
    let bytes = template_workbook(params.schema)?;
    let disposition = format!(
        "attachment; filename=\"{}\"",
        template_file_name(params.schema)
    );
    let disposition =
        HeaderValue::from_str(&disposition).map_err(|_| AppError::InternalServerError)?;

    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(XLSX_MIME)),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    ))
}

async fn import_courses(
    State(state): State<AppState>,
    Query(params): Query<ImportParams>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<ImportReport>, AppError> {
    if body.is_empty() {
        return Err(AppError::BadRequest("No file uploaded".to_string()));
    }

    let session = ImportSession::new(
        params.schema,
        ImportTarget {
            semester_id: params.semester_id,
            regulation_id: params.regulation_id,
        },
    )?;
    let upload = WorkbookUpload {
        file_name: params.file_name.unwrap_or_default(),
        content_type: headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        bytes: body.to_vec(),
    };

    let report = state.imports.import(&session, &upload).await?;
    Ok(Json(report))
}

async fn list_batches(
    State(state): State<AppState>,
    Path(course_id): Path<i64>,
) -> Result<Json<Vec<Batch>>, AppError> {
    let batches = state.allocations.load_batches(course_id).await?;
    Ok(Json(batches))
}

async fn assign_staff(
    State(state): State<AppState>,
    Path(batch_id): Path<i64>,
    Json(req): Json<AssignStaffRequest>,
) -> Result<Json<Batch>, AppError> {
    let batch = state.allocations.assign_staff(batch_id, req.staff_id).await?;
    Ok(Json(batch))
}
