//! Program course enrollment model.
//!
//! Links a program enrollment to one course run. Owned by its parent
//! program enrollment (deletes cascade); the optional
//! `course_enrollment_ref` is a non-owning link into the external
//! course-enrollment subsystem.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use std::collections::HashSet;
use uuid::Uuid;

/// Course enrollment status values as stored in the database.
pub mod status {
    pub const ENROLLED: &str = "enrolled";
    pub const PENDING: &str = "pending";
    pub const INACTIVE: &str = "inactive";
}

/// A course-run enrollment owned by a program enrollment.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ProgramCourseEnrollment {
    /// Unique record identifier.
    pub id: Uuid,

    /// Owning program enrollment.
    pub program_enrollment_id: Uuid,

    /// External course run identifier.
    pub course_key: String,

    /// Enrollment status (see [`status`]).
    pub status: String,

    /// Reference into the external course-enrollment subsystem.
    /// `None` for waiting enrollments created before account linkage.
    pub course_enrollment_ref: Option<Uuid>,

    /// Record creation timestamp.
    pub created_at: DateTime<Utc>,

    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a new program course enrollment.
#[derive(Debug, Clone)]
pub struct CreateProgramCourseEnrollment {
    pub program_enrollment_id: Uuid,
    pub course_key: String,
    pub status: String,
    pub course_enrollment_ref: Option<Uuid>,
}

/// One row of the course enrollment listing, joined with the owning
/// program enrollment for the student key.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CourseEnrollmentListing {
    pub id: Uuid,
    pub student_key: String,
    pub course_key: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl ProgramCourseEnrollment {
    /// Create a new program course enrollment.
    ///
    /// The `(program_enrollment_id, course_key)` unique constraint is the
    /// authoritative duplicate guard; callers must map violations (detected
    /// with [`crate::is_unique_violation`]) to a conflict outcome.
    pub async fn create(
        pool: &PgPool,
        data: CreateProgramCourseEnrollment,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as(
            r"
            INSERT INTO program_course_enrollments
                (program_enrollment_id, course_key, status, course_enrollment_ref)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            ",
        )
        .bind(data.program_enrollment_id)
        .bind(&data.course_key)
        .bind(&data.status)
        .bind(data.course_enrollment_ref)
        .fetch_one(pool)
        .await
    }

    /// Which of the given program enrollments already hold an enrollment
    /// for this course.
    ///
    /// One query for the whole batch, so the reconciliation pass can do its
    /// conflict checks without per-record lookups.
    pub async fn existing_for_course(
        pool: &PgPool,
        program_enrollment_ids: &[Uuid],
        course_key: &str,
    ) -> Result<HashSet<Uuid>, sqlx::Error> {
        if program_enrollment_ids.is_empty() {
            return Ok(HashSet::new());
        }
        let rows: Vec<(Uuid,)> = sqlx::query_as(
            r"
            SELECT program_enrollment_id FROM program_course_enrollments
            WHERE program_enrollment_id = ANY($1) AND course_key = $2
            ",
        )
        .bind(program_enrollment_ids)
        .bind(course_key)
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    /// List course enrollments for a program and course with pagination,
    /// newest first.
    pub async fn list_for_course(
        pool: &PgPool,
        program_id: Uuid,
        course_key: &str,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<CourseEnrollmentListing>, i64), sqlx::Error> {
        let items: Vec<CourseEnrollmentListing> = sqlx::query_as(
            r"
            SELECT pce.id, pe.student_key, pce.course_key, pce.status, pce.created_at
            FROM program_course_enrollments pce
            JOIN program_enrollments pe ON pe.id = pce.program_enrollment_id
            WHERE pe.program_id = $1 AND pce.course_key = $2
            ORDER BY pce.created_at DESC
            LIMIT $3 OFFSET $4
            ",
        )
        .bind(program_id)
        .bind(course_key)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;

        let (total,): (i64,) = sqlx::query_as(
            r"
            SELECT COUNT(*)
            FROM program_course_enrollments pce
            JOIN program_enrollments pe ON pe.id = pce.program_enrollment_id
            WHERE pe.program_id = $1 AND pce.course_key = $2
            ",
        )
        .bind(program_id)
        .bind(course_key)
        .fetch_one(pool)
        .await?;

        Ok((items, total))
    }
}
