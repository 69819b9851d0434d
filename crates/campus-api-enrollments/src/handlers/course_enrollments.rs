//! Handlers for course-level enrollments within a program.

use axum::{
    extract::{Path, Query},
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use uuid::Uuid;

use crate::error::EnrollmentsError;
use crate::models::{
    CourseEnrollmentListResponse, EnrollmentRequestRecord, ListCourseEnrollmentsParams,
};
use crate::router::EnrollmentsState;
use crate::services::{aggregate, ProgramEnrollmentService, MAX_BATCH_RECORDS};

/// POST /programs/:`program_id`/courses/:`course_key`/enrollments
///
/// Reconcile a batch of enrollment records against the program. Responds
/// with one outcome per distinct student key; the HTTP status reflects the
/// batch as a whole (200 all succeeded, 207 mixed, 422 all failed).
pub async fn create_course_enrollments(
    Extension(state): Extension<EnrollmentsState>,
    Path((program_id, course_key)): Path<(Uuid, String)>,
    Json(records): Json<Vec<EnrollmentRequestRecord>>,
) -> Result<Response, EnrollmentsError> {
    check_course_in_program(&state, program_id, &course_key).await?;

    if records.is_empty() {
        return Err(EnrollmentsError::EmptyBatch);
    }
    if records.len() > MAX_BATCH_RECORDS {
        return Err(EnrollmentsError::BatchTooLarge(format!(
            "{} records submitted; at most {MAX_BATCH_RECORDS} are accepted per request",
            records.len()
        )));
    }

    let outcomes = state
        .engine
        .reconcile(program_id, &course_key, &records)
        .await?;

    let resolution = aggregate(&outcomes);
    tracing::info!(
        %program_id,
        %course_key,
        records = records.len(),
        resolution = ?resolution,
        "Reconciled course enrollment batch"
    );

    Ok((resolution.status_code(), Json(outcomes)).into_response())
}

/// GET /programs/:`program_id`/courses/:`course_key`/enrollments
///
/// Paginated listing of course enrollments, newest first.
pub async fn list_course_enrollments(
    Extension(state): Extension<EnrollmentsState>,
    Path((program_id, course_key)): Path<(Uuid, String)>,
    Query(params): Query<ListCourseEnrollmentsParams>,
) -> Result<(StatusCode, Json<CourseEnrollmentListResponse>), EnrollmentsError> {
    check_course_in_program(&state, program_id, &course_key).await?;

    let service = ProgramEnrollmentService::new(state.pool.clone());
    let listing = service
        .list_course_enrollments(program_id, &course_key, &params)
        .await?;

    Ok((StatusCode::OK, Json(listing)))
}

/// Verify the program exists and the course run belongs to it.
async fn check_course_in_program(
    state: &EnrollmentsState,
    program_id: Uuid,
    course_key: &str,
) -> Result<(), EnrollmentsError> {
    let program = state
        .catalog
        .find_program(program_id)
        .await
        .map_err(|err| EnrollmentsError::Catalog(err.to_string()))?
        .ok_or(EnrollmentsError::ProgramNotFound)?;

    if !program.contains_course(course_key) {
        return Err(EnrollmentsError::CourseNotInProgram);
    }

    Ok(())
}
