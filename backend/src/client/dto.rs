use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::models::CourseImportRecord;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportCoursesRequest {
    pub courses: Vec<CourseImportRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semester_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regulation_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportCoursesResponse {
    #[serde(default)]
    pub imported_count: Option<usize>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignStaffBody {
    pub staff_id: Option<i64>,
}

/// A backend response decoded once at the HTTP boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResult<T> {
    Ok(T),
    Error { message: String },
}

impl<T: DeserializeOwned> ApiResult<T> {
    /// Non-2xx statuses and bodies whose `status` is not `"success"` become
    /// `Error`, carrying the server's `message` (or `error`) when it sent one
    /// and `fallback` otherwise. A payload under `data` is preferred over the
    /// top-level object.
    pub fn decode(status: StatusCode, body: &str, fallback: &str) -> Self {
        let value = if body.trim().is_empty() {
            serde_json::Value::Null
        } else {
            match serde_json::from_str::<serde_json::Value>(body) {
                Ok(value) => value,
                Err(_) if status.is_success() => {
                    return ApiResult::Error {
                        message: format!("{}: unreadable response", fallback),
                    };
                }
                Err(_) => serde_json::Value::Null,
            }
        };

        let server_message = value
            .get("message")
            .or_else(|| value.get("error"))
            .and_then(|m| m.as_str())
            .filter(|m| !m.trim().is_empty())
            .map(str::to_string);

        if !status.is_success() {
            return ApiResult::Error {
                message: server_message.unwrap_or_else(|| fallback.to_string()),
            };
        }

        if let Some(flag) = value.get("status").and_then(|s| s.as_str()) {
            if flag != "success" {
                return ApiResult::Error {
                    message: server_message.unwrap_or_else(|| fallback.to_string()),
                };
            }
        }

        if let Some(data) = value.get("data").filter(|d| !d.is_null()) {
            if let Ok(parsed) = serde_json::from_value::<T>(data.clone()) {
                return ApiResult::Ok(parsed);
            }
        }

        match serde_json::from_value::<T>(value) {
            Ok(parsed) => ApiResult::Ok(parsed),
            Err(e) => ApiResult::Error {
                message: format!("{}: unexpected response ({})", fallback, e),
            },
        }
    }

    pub fn into_result(self) -> Result<T, String> {
        match self {
            ApiResult::Ok(value) => Ok(value),
            ApiResult::Error { message } => Err(message),
        }
    }
}
