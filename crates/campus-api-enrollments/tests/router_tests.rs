//! Router-level tests exercised through `tower::ServiceExt::oneshot`.
//!
//! These use a lazily-connected pool and only drive request paths that are
//! decided before any database work: catalog checks, batch size limits, and
//! shape validation.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use campus_api_enrollments::services::{NullGateway, StaticCatalog};
use campus_api_enrollments::{enrollments_router, EnrollmentsState};
use campus_db::DbPool;

const COURSE: &str = "course-v1:campusX+CS101+2026";

fn test_state(program_id: Uuid) -> EnrollmentsState {
    let pool = DbPool::connect_lazy("postgres://localhost/campus_test")
        .expect("lazy pool should build")
        .into_inner();
    let catalog = StaticCatalog::new().with_program(
        program_id,
        "Masters in Computer Science",
        vec![COURSE.to_string()],
    );
    EnrollmentsState::new(pool, Arc::new(catalog), Arc::new(NullGateway))
}

fn post_batch(program_id: Uuid, course_key: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(format!(
            "/programs/{program_id}/courses/{course_key}/enrollments"
        ))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_unknown_program_is_404() {
    let program_id = Uuid::new_v4();
    let app = enrollments_router(test_state(program_id));

    let request = post_batch(
        Uuid::new_v4(),
        COURSE,
        &json!([{"student_key": "a", "status": "enrolled"}]),
    );
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/problem+json"
    );
    let problem = body_json(response).await;
    assert_eq!(problem["title"], "Program Not Found");
}

#[tokio::test]
async fn test_course_outside_program_is_404() {
    let program_id = Uuid::new_v4();
    let app = enrollments_router(test_state(program_id));

    let request = post_batch(
        program_id,
        "course-v1:campusX+OTHER+2026",
        &json!([{"student_key": "a", "status": "enrolled"}]),
    );
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let problem = body_json(response).await;
    assert_eq!(problem["title"], "Course Not In Program");
}

#[tokio::test]
async fn test_oversize_batch_is_413() {
    let program_id = Uuid::new_v4();
    let app = enrollments_router(test_state(program_id));

    let records: Vec<Value> = (0..26)
        .map(|i| json!({"student_key": format!("learner-{i}"), "status": "enrolled"}))
        .collect();
    let response = app
        .oneshot(post_batch(program_id, COURSE, &json!(records)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    let problem = body_json(response).await;
    assert_eq!(problem["title"], "Batch Too Large");
}

#[tokio::test]
async fn test_empty_batch_is_422() {
    let program_id = Uuid::new_v4();
    let app = enrollments_router(test_state(program_id));

    let response = app
        .oneshot(post_batch(program_id, COURSE, &json!([])))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let problem = body_json(response).await;
    assert_eq!(problem["title"], "Empty Batch");
}

#[tokio::test]
async fn test_record_without_student_key_is_422() {
    let program_id = Uuid::new_v4();
    let app = enrollments_router(test_state(program_id));

    let body = json!([
        {"student_key": "a", "status": "enrolled"},
        {"status": "enrolled"}
    ]);
    let response = app
        .oneshot(post_batch(program_id, COURSE, &body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let problem = body_json(response).await;
    assert_eq!(problem["title"], "Malformed Record");
    assert_eq!(problem["detail"], "student_key is required");
}

#[tokio::test]
async fn test_record_without_status_is_422() {
    let program_id = Uuid::new_v4();
    let app = enrollments_router(test_state(program_id));

    let body = json!([{"student_key": "a"}]);
    let response = app
        .oneshot(post_batch(program_id, COURSE, &body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let problem = body_json(response).await;
    assert_eq!(problem["detail"], "status is required");
}

#[tokio::test]
async fn test_all_invalid_statuses_return_outcome_map_with_422() {
    let program_id = Uuid::new_v4();
    let app = enrollments_router(test_state(program_id));

    // Every record fails shape validation, so no database work happens and
    // the response is the per-learner outcome map with a 422.
    let body = json!([
        {"student_key": "a", "status": "graduated"},
        {"student_key": "b", "status": "alumni"}
    ]);
    let response = app
        .oneshot(post_batch(program_id, COURSE, &body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let outcomes: BTreeMap<String, String> =
        serde_json::from_value(body_json(response).await).unwrap();
    assert_eq!(outcomes["a"], "invalid-status");
    assert_eq!(outcomes["b"], "invalid-status");
}

#[tokio::test]
async fn test_duplicate_of_invalid_record_is_duplicated() {
    let program_id = Uuid::new_v4();
    let app = enrollments_router(test_state(program_id));

    let body = json!([
        {"student_key": "a", "status": "graduated"},
        {"student_key": "a", "status": "alumni"}
    ]);
    let response = app
        .oneshot(post_batch(program_id, COURSE, &body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let outcomes: BTreeMap<String, String> =
        serde_json::from_value(body_json(response).await).unwrap();
    assert_eq!(outcomes.len(), 1);
    assert_eq!(outcomes["a"], "duplicated");
}

#[tokio::test]
async fn test_program_enrollment_unknown_program_is_404() {
    let program_id = Uuid::new_v4();
    let app = enrollments_router(test_state(program_id));

    let request = Request::builder()
        .method("POST")
        .uri(format!("/programs/{}/enrollments", Uuid::new_v4()))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({
                "student_key": "learner-001",
                "curriculum_id": Uuid::new_v4(),
                "status": "enrolled"
            })
            .to_string(),
        ))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_program_enrollment_blank_student_key_is_422() {
    let program_id = Uuid::new_v4();
    let app = enrollments_router(test_state(program_id));

    let request = Request::builder()
        .method("POST")
        .uri(format!("/programs/{program_id}/enrollments"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({
                "student_key": "  ",
                "curriculum_id": Uuid::new_v4(),
                "status": "enrolled"
            })
            .to_string(),
        ))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let problem = body_json(response).await;
    assert_eq!(problem["detail"], "student_key must not be blank");
}
