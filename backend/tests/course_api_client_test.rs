use std::collections::HashMap;
use std::time::Duration;

use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use course_import::client::dto::ImportCoursesRequest;
use course_import::client::{CourseApi, CourseApiHttpClient};
use course_import::config::CourseApiConfig;
use course_import::error::AppError;
use course_import::models::{CourseImportRecord, CourseType};
use course_import::pipeline::{HeaderSchema, ImportTarget};
use serde_json::{Value, json};

async fn spawn_backend(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind fake backend");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("fake backend stopped");
    });
    format!("http://{}", addr)
}

fn client(base_url: String) -> CourseApiHttpClient {
    CourseApiHttpClient::new(CourseApiConfig {
        base_url,
        api_token: Some("secret".to_string()),
        request_timeout: Duration::from_millis(500),
    })
    .expect("Failed to create client")
}

fn record(code: &str) -> CourseImportRecord {
    CourseImportRecord {
        course_code: code.to_string(),
        course_title: format!("Course {}", code),
        category: "PCC".to_string(),
        lecture_hours: 3,
        tutorial_hours: 0,
        practical_hours: 0,
        experiential_hours: 0,
        total_contact_periods: Some(3),
        credits: Some(3),
        min_mark: Some(40),
        max_mark: Some(100),
        semester_number: None,
        course_type: CourseType::Theory,
    }
}

fn request(codes: &[&str]) -> ImportCoursesRequest {
    ImportCoursesRequest {
        courses: codes.iter().map(|c| record(c)).collect(),
        semester_id: Some(4),
        regulation_id: None,
    }
}

#[tokio::test]
async fn import_reports_server_count_and_sends_camel_case_body() {
    let app = Router::new().route(
        "/courses",
        post(|Json(body): Json<Value>| async move {
            let courses = body["courses"].as_array().cloned().unwrap_or_default();
            let well_formed = body["semesterId"] == json!(4)
                && body.get("regulationId").is_none()
                && courses[0]["courseCode"] == json!("CS101")
                && courses[0]["type"] == json!("THEORY")
                && courses[0]["totalContactPeriods"] == json!(3);
            if !well_formed {
                return (StatusCode::BAD_REQUEST, Json(json!({ "message": "bad payload" })));
            }
            // Server drops one course on its own.
            (StatusCode::OK, Json(json!({ "importedCount": courses.len() - 1 })))
        }),
    );
    let api = client(spawn_backend(app).await);

    let response = api
        .import_courses(HeaderSchema::Semester, &request(&["CS101", "CS102"]))
        .await
        .expect("import succeeds");

    assert_eq!(response.imported_count, Some(1));
}

#[tokio::test]
async fn bulk_import_posts_to_regulation_endpoint() {
    let app = Router::new().route(
        "/regulations/courses",
        post(|| async { Json(json!({ "message": "Courses added to regulation" })) }),
    );
    let api = client(spawn_backend(app).await);

    let response = api
        .import_courses(HeaderSchema::Bulk, &request(&["CS101"]))
        .await
        .expect("import succeeds");

    assert_eq!(response.imported_count, None);
    assert_eq!(response.message.as_deref(), Some("Courses added to regulation"));
}

#[tokio::test]
async fn import_count_is_read_from_data_envelope() {
    let app = Router::new().route(
        "/courses",
        post(|| async {
            Json(json!({
                "status": "success",
                "message": "Courses imported",
                "data": { "importedCount": 3 }
            }))
        }),
    );
    let api = client(spawn_backend(app).await);

    let response = api
        .import_courses(HeaderSchema::Semester, &request(&["CS101", "CS102", "CS103"]))
        .await
        .expect("import succeeds");

    assert_eq!(response.imported_count, Some(3));
}

#[tokio::test]
async fn server_message_is_surfaced_verbatim() {
    let app = Router::new().route(
        "/courses",
        post(|| async {
            (
                StatusCode::CONFLICT,
                Json(json!({ "message": "Course code CS101 already exists" })),
            )
        }),
    );
    let api = client(spawn_backend(app).await);

    let err = api
        .import_courses(HeaderSchema::Semester, &request(&["CS101"]))
        .await
        .expect_err("conflict");

    match err {
        AppError::Submission(message) => assert_eq!(message, "Course code CS101 already exists"),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn failure_without_message_uses_generic_text() {
    let app = Router::new().route(
        "/courses",
        post(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
    );
    let api = client(spawn_backend(app).await);

    let err = api
        .import_courses(HeaderSchema::Semester, &request(&["CS101"]))
        .await
        .expect_err("server error");

    assert_eq!(err.to_string(), "Failed to import courses");
}

#[tokio::test]
async fn success_status_with_error_flag_is_a_failure() {
    let app = Router::new().route(
        "/courses",
        post(|| async { Json(json!({ "status": "error", "message": "Semester is locked" })) }),
    );
    let api = client(spawn_backend(app).await);

    let err = api
        .import_courses(HeaderSchema::Semester, &request(&["CS101"]))
        .await
        .expect_err("flagged as error");

    assert_eq!(err.to_string(), "Semester is locked");
}

#[tokio::test]
async fn slow_backend_times_out() {
    let app = Router::new().route(
        "/courses",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(3)).await;
            Json(json!({ "importedCount": 1 }))
        }),
    );
    let api = client(spawn_backend(app).await);

    let err = api
        .import_courses(HeaderSchema::Semester, &request(&["CS101"]))
        .await
        .expect_err("timeout");

    assert!(matches!(err, AppError::Submission(_)));
    assert!(err.to_string().contains("in time"), "{}", err);
}

#[tokio::test]
async fn unreachable_backend_is_a_submission_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    let api = client(format!("http://{}", addr));

    let err = api
        .import_courses(HeaderSchema::Semester, &request(&["CS101"]))
        .await
        .expect_err("nothing listening");

    assert!(matches!(err, AppError::Submission(_)));
}

#[tokio::test]
async fn course_refresh_passes_target_as_query() {
    let app = Router::new().route(
        "/courses",
        get(|Query(params): Query<HashMap<String, String>>| async move {
            if params.get("semesterId").map(String::as_str) == Some("4") {
                Json(json!([
                    { "id": 1, "courseCode": "CS101", "courseTitle": "Programming" },
                    { "id": 2, "courseCode": "CS102", "courseTitle": "Data Structures", "type": "THEORY" }
                ]))
            } else {
                Json(json!([]))
            }
        }),
    );
    let api = client(spawn_backend(app).await);

    let courses = api
        .fetch_courses(ImportTarget {
            semester_id: Some(4),
            regulation_id: None,
        })
        .await
        .expect("courses");

    assert_eq!(courses.len(), 2);
    assert_eq!(courses[1].course_type.as_deref(), Some("THEORY"));
}

#[tokio::test]
async fn batches_are_unwrapped_from_data_envelope() {
    let app = Router::new().route(
        "/courses/{course_id}/batches",
        get(|Path(course_id): Path<i64>| async move {
            Json(json!({
                "status": "success",
                "data": [
                    { "id": 11, "courseId": course_id, "name": "A", "staffId": 7 },
                    { "id": 12, "courseId": course_id, "name": "B" }
                ]
            }))
        }),
    );
    let api = client(spawn_backend(app).await);

    let batches = api.fetch_batches(5).await.expect("batches");

    assert_eq!(batches.len(), 2);
    assert_eq!(batches[0].course_id, 5);
    assert_eq!(batches[0].staff_id, Some(7));
    assert_eq!(batches[1].staff_id, None);
}

#[tokio::test]
async fn staff_assignment_sends_staff_id() {
    let app = Router::new().route(
        "/batches/{batch_id}/staff",
        put(|Path(batch_id): Path<i64>, Json(body): Json<Value>| async move {
            if batch_id == 11 && body["staffId"] == json!(42) {
                (StatusCode::OK, Json(json!({ "status": "success" })))
            } else {
                (StatusCode::BAD_REQUEST, Json(json!({ "message": "Staff not found" })))
            }
        }),
    );
    let api = client(spawn_backend(app).await);

    api.assign_staff(11, Some(42)).await.expect("assigned");

    let err = api.assign_staff(11, Some(99)).await.expect_err("rejected");
    assert_eq!(err.to_string(), "Staff not found");
}
