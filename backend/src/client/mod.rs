pub mod dto;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::config::CourseApiConfig;
use crate::error::AppError;
use crate::models::{Batch, CourseSummary};
use crate::pipeline::{HeaderSchema, ImportTarget};

use dto::{ApiResult, AssignStaffBody, ImportCoursesRequest, ImportCoursesResponse};

const IMPORT_FAILED: &str = "Failed to import courses";
const FETCH_COURSES_FAILED: &str = "Failed to load courses";
const FETCH_BATCHES_FAILED: &str = "Failed to load batches";
const ASSIGN_STAFF_FAILED: &str = "Failed to allocate staff";

/// The college administration REST backend.
#[async_trait]
pub trait CourseApi: Send + Sync {
    async fn import_courses(
        &self,
        schema: HeaderSchema,
        request: &ImportCoursesRequest,
    ) -> Result<ImportCoursesResponse, AppError>;
    async fn fetch_courses(&self, target: ImportTarget) -> Result<Vec<CourseSummary>, AppError>;
    async fn fetch_batches(&self, course_id: i64) -> Result<Vec<Batch>, AppError>;
    async fn assign_staff(&self, batch_id: i64, staff_id: Option<i64>) -> Result<(), AppError>;
}

pub fn import_path(schema: HeaderSchema) -> &'static str {
    match schema {
        HeaderSchema::Semester => "/courses",
        HeaderSchema::Bulk => "/regulations/courses",
    }
}

pub struct CourseApiHttpClient {
    client: Client,
    config: CourseApiConfig,
}

impl CourseApiHttpClient {
    pub fn new(config: CourseApiConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build http client: {}", e)))?;
        Ok(Self { client, config })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.config.api_token {
            Some(token) => request.header("Authorization", format!("Bearer {}", token)),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder, fallback: &str) -> Result<Response, AppError> {
        self.authorize(request).send().await.map_err(|e| {
            tracing::error!("course service request failed: {}", e);
            if e.is_timeout() {
                AppError::Submission(format!("{}: the course service did not respond in time", fallback))
            } else {
                AppError::Submission(format!("{}: the course service is unreachable", fallback))
            }
        })
    }

    async fn decode<T: DeserializeOwned>(response: Response, fallback: &str) -> Result<T, AppError> {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if !status.is_success() {
            tracing::warn!("course service returned {}: {}", status, body);
        }

        ApiResult::<T>::decode(status, &body, fallback)
            .into_result()
            .map_err(AppError::Submission)
    }
}

#[async_trait]
impl CourseApi for CourseApiHttpClient {
    async fn import_courses(
        &self,
        schema: HeaderSchema,
        request: &ImportCoursesRequest,
    ) -> Result<ImportCoursesResponse, AppError> {
        let url = self.url(import_path(schema));
        tracing::info!("posting {} courses to {}", request.courses.len(), url);

        let response = self
            .send(self.client.post(&url).json(request), IMPORT_FAILED)
            .await?;
        Self::decode(response, IMPORT_FAILED).await
    }

    async fn fetch_courses(&self, target: ImportTarget) -> Result<Vec<CourseSummary>, AppError> {
        let mut query = Vec::new();
        if let Some(id) = target.semester_id {
            query.push(format!("semesterId={}", id));
        }
        if let Some(id) = target.regulation_id {
            query.push(format!("regulationId={}", id));
        }
        let url = if query.is_empty() {
            self.url("/courses")
        } else {
            self.url(&format!("/courses?{}", query.join("&")))
        };

        let response = self.send(self.client.get(&url), FETCH_COURSES_FAILED).await?;
        Self::decode(response, FETCH_COURSES_FAILED).await
    }

    async fn fetch_batches(&self, course_id: i64) -> Result<Vec<Batch>, AppError> {
        let url = self.url(&format!("/courses/{}/batches", course_id));
        let response = self.send(self.client.get(&url), FETCH_BATCHES_FAILED).await?;
        Self::decode(response, FETCH_BATCHES_FAILED).await
    }

    async fn assign_staff(&self, batch_id: i64, staff_id: Option<i64>) -> Result<(), AppError> {
        let url = self.url(&format!("/batches/{}/staff", batch_id));
        let body = AssignStaffBody { staff_id };

        let response = self
            .send(self.client.put(&url).json(&body), ASSIGN_STAFF_FAILED)
            .await?;
        Self::decode::<serde_json::Value>(response, ASSIGN_STAFF_FAILED).await?;
        Ok(())
    }
}

/// Accepts everything and returns nothing; for running the gateway without a
/// backend.
pub struct NoopCourseApi;

#[async_trait]
impl CourseApi for NoopCourseApi {
    async fn import_courses(
        &self,
        _schema: HeaderSchema,
        request: &ImportCoursesRequest,
    ) -> Result<ImportCoursesResponse, AppError> {
        Ok(ImportCoursesResponse {
            imported_count: Some(request.courses.len()),
            message: None,
        })
    }

    async fn fetch_courses(&self, _target: ImportTarget) -> Result<Vec<CourseSummary>, AppError> {
        Ok(Vec::new())
    }

    async fn fetch_batches(&self, _course_id: i64) -> Result<Vec<Batch>, AppError> {
        Ok(Vec::new())
    }

    async fn assign_staff(&self, _batch_id: i64, _staff_id: Option<i64>) -> Result<(), AppError> {
        Ok(())
    }
}
