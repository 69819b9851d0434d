//! Persistence seam for course-level program enrollments.

use async_trait::async_trait;
use campus_db::is_unique_violation;
use campus_db::models::{CreateProgramCourseEnrollment, ProgramCourseEnrollment};
use sqlx::PgPool;
use std::collections::HashSet;
use thiserror::Error;
use uuid::Uuid;

/// Store errors, with unique-constraint races surfaced as their own variant.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A course enrollment already exists for this learner and course.
    #[error("Course enrollment already exists")]
    Conflict,

    /// Any other database failure.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// A course enrollment to be written.
#[derive(Debug, Clone)]
pub struct NewCourseEnrollment {
    pub program_enrollment_id: Uuid,
    pub course_key: String,
    pub status: String,
    /// Platform enrollment reference, when one was created.
    pub course_enrollment_ref: Option<Uuid>,
}

/// Writes and bulk-checks course-level enrollment rows.
#[async_trait]
pub trait CourseEnrollmentStore: Send + Sync {
    /// Insert one course enrollment row.
    async fn insert(&self, new: NewCourseEnrollment) -> Result<ProgramCourseEnrollment, StoreError>;

    /// Which of `program_enrollment_ids` already hold an enrollment in
    /// `course_key`.
    async fn existing_for_course(
        &self,
        program_enrollment_ids: &[Uuid],
        course_key: &str,
    ) -> Result<HashSet<Uuid>, StoreError>;
}

/// Postgres-backed store.
#[derive(Clone)]
pub struct PgCourseEnrollmentStore {
    pool: PgPool,
}

impl PgCourseEnrollmentStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CourseEnrollmentStore for PgCourseEnrollmentStore {
    async fn insert(&self, new: NewCourseEnrollment) -> Result<ProgramCourseEnrollment, StoreError> {
        ProgramCourseEnrollment::create(
            &self.pool,
            CreateProgramCourseEnrollment {
                program_enrollment_id: new.program_enrollment_id,
                course_key: new.course_key,
                status: new.status,
                course_enrollment_ref: new.course_enrollment_ref,
            },
        )
        .await
        .map_err(|err| {
            if is_unique_violation(&err) {
                StoreError::Conflict
            } else {
                StoreError::Database(err)
            }
        })
    }

    async fn existing_for_course(
        &self,
        program_enrollment_ids: &[Uuid],
        course_key: &str,
    ) -> Result<HashSet<Uuid>, StoreError> {
        if program_enrollment_ids.is_empty() {
            return Ok(HashSet::new());
        }

        ProgramCourseEnrollment::existing_for_course(&self.pool, program_enrollment_ids, course_key)
            .await
            .map_err(StoreError::Database)
    }
}
