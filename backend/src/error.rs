use axum::{Json, http::StatusCode, response::{IntoResponse, Response}};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::models::InvalidRecord;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Unsupported file format: {0}. Upload an .xls or .xlsx workbook")]
    UnsupportedFormat(String),

    #[error("Header mismatch: expected [{}], found [{}]", .expected.join(", "), .actual.join(", "))]
    HeaderMismatch {
        expected: Vec<String>,
        actual: Vec<String>,
    },

    #[error("No valid courses to import ({} rows failed validation)", .invalid.len())]
    EmptyValidBatch { invalid: Vec<InvalidRecord> },

    #[error("{0}")]
    Submission(String),

    #[error("Workbook error: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("Template error: {0}")]
    Template(#[from] rust_xlsxwriter::XlsxError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found")]
    NotFound,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Timed out: {0}")]
    Timeout(String),

    #[error("Internal server error")]
    InternalServerError,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        let (status, details) = match self {
            AppError::UnsupportedFormat(_) => (StatusCode::BAD_REQUEST, None),
            AppError::HeaderMismatch { expected, actual } => (
                StatusCode::BAD_REQUEST,
                Some(serde_json::json!({ "expected": expected, "actual": actual })),
            ),
            AppError::EmptyValidBatch { invalid } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                serde_json::to_value(invalid).ok(),
            ),
            AppError::Submission(_) => (StatusCode::BAD_GATEWAY, None),
            AppError::Workbook(_) => (StatusCode::BAD_REQUEST, None),
            AppError::NotFound => (StatusCode::NOT_FOUND, None),
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, None),
            AppError::Timeout(_) => (StatusCode::GATEWAY_TIMEOUT, None),
            AppError::Template(e) => {
                error!("template error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, None)
            }
            AppError::Config(msg) => {
                error!("configuration error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, None)
            }
            AppError::InternalServerError => (StatusCode::INTERNAL_SERVER_ERROR, None),
        };

        let body = Json(ErrorResponse {
            error: status.to_string(),
            message,
            details,
        });

        (status, body).into_response()
    }
}
