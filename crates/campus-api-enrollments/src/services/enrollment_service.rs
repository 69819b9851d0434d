//! Program-level enrollment management.

use campus_db::is_unique_violation;
use campus_db::models::program_enrollment::status as program_status;
use campus_db::models::{CreateProgramEnrollment, ProgramCourseEnrollment, ProgramEnrollment};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::EnrollmentsError;
use crate::models::{
    CourseEnrollmentListResponse, CourseEnrollmentResponse, CreateProgramEnrollmentRequest,
    ListCourseEnrollmentsParams,
};

/// Statuses a caller may request when creating a program enrollment.
const REQUESTABLE_STATUSES: &[&str] = &[
    program_status::ENROLLED,
    program_status::PENDING,
    program_status::SUSPENDED,
    program_status::CANCELED,
];

/// Service for creating and listing program enrollments.
#[derive(Clone)]
pub struct ProgramEnrollmentService {
    pool: PgPool,
}

impl ProgramEnrollmentService {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create one program enrollment.
    ///
    /// Enrollments without a bound account are stored in the waiting
    /// variant of the requested status until the learner claims them.
    pub async fn create(
        &self,
        program_id: Uuid,
        request: CreateProgramEnrollmentRequest,
    ) -> Result<ProgramEnrollment, EnrollmentsError> {
        if !REQUESTABLE_STATUSES.contains(&request.status.as_str()) {
            return Err(EnrollmentsError::InvalidStatus(format!(
                "'{}' is not a valid program enrollment status",
                request.status
            )));
        }

        let status = stored_status(&request.status, request.user_id.is_some());

        let created = ProgramEnrollment::create(
            &self.pool,
            CreateProgramEnrollment {
                program_id,
                curriculum_id: request.curriculum_id,
                student_key: request.student_key,
                user_id: request.user_id,
                status: status.to_string(),
            },
        )
        .await
        .map_err(|err| {
            if is_unique_violation(&err) {
                EnrollmentsError::DuplicateEnrollment
            } else {
                EnrollmentsError::Database(err)
            }
        })?;

        tracing::info!(
            %program_id,
            student_key = %created.student_key,
            status = %created.status,
            "Created program enrollment"
        );

        Ok(created)
    }

    /// List course enrollments for one course run within a program.
    pub async fn list_course_enrollments(
        &self,
        program_id: Uuid,
        course_key: &str,
        params: &ListCourseEnrollmentsParams,
    ) -> Result<CourseEnrollmentListResponse, EnrollmentsError> {
        let limit = params.limit.clamp(1, 100);
        let offset = params.offset.max(0);

        let (items, total) =
            ProgramCourseEnrollment::list_for_course(&self.pool, program_id, course_key, limit, offset)
                .await?;

        Ok(CourseEnrollmentListResponse {
            items: items.into_iter().map(CourseEnrollmentResponse::from).collect(),
            total,
            limit,
            offset,
        })
    }
}

/// Map a requested status to the stored one.
fn stored_status(requested: &str, has_account: bool) -> &str {
    if has_account {
        return requested;
    }
    match requested {
        program_status::ENROLLED => program_status::ENROLLED_WAITING,
        program_status::PENDING => program_status::PENDING_WAITING,
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stored_status_waits_without_account() {
        assert_eq!(stored_status("enrolled", false), "enrolled-waiting");
        assert_eq!(stored_status("pending", false), "pending-waiting");
        assert_eq!(stored_status("suspended", false), "suspended");
    }

    #[test]
    fn test_stored_status_direct_with_account() {
        assert_eq!(stored_status("enrolled", true), "enrolled");
        assert_eq!(stored_status("pending", true), "pending");
    }
}
