//! Handlers for program-level enrollments.

use axum::{extract::Path, http::StatusCode, Extension, Json};
use uuid::Uuid;

use crate::error::EnrollmentsError;
use crate::models::{CreateProgramEnrollmentRequest, ProgramEnrollmentResponse};
use crate::router::EnrollmentsState;
use crate::services::ProgramEnrollmentService;
use crate::validation::MalformedReason;

/// POST /programs/:`program_id`/enrollments
///
/// Create one program enrollment. Returns 201 with the created record,
/// 409 if the student key is already enrolled in the program.
pub async fn create_program_enrollment(
    Extension(state): Extension<EnrollmentsState>,
    Path(program_id): Path<Uuid>,
    Json(request): Json<CreateProgramEnrollmentRequest>,
) -> Result<(StatusCode, Json<ProgramEnrollmentResponse>), EnrollmentsError> {
    state
        .catalog
        .find_program(program_id)
        .await
        .map_err(|err| EnrollmentsError::Catalog(err.to_string()))?
        .ok_or(EnrollmentsError::ProgramNotFound)?;

    if request.student_key.trim().is_empty() {
        return Err(EnrollmentsError::MalformedRecord(
            MalformedReason::BlankStudentKey,
        ));
    }

    let service = ProgramEnrollmentService::new(state.pool.clone());
    let created = service.create(program_id, request).await?;

    Ok((StatusCode::CREATED, Json(created.into())))
}
