//! Program enrollment model.
//!
//! One row per learner per program, keyed by `(program_id, student_key)`.
//! The learner is identified by an external `student_key` from the partner
//! organization; `user_id` is bound later, once the learner links an
//! authenticated account.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

/// Program enrollment status values as stored in the database.
///
/// The `-waiting` variants mirror their plain counterparts for enrollments
/// whose external key has not yet been linked to an account.
pub mod status {
    pub const ENROLLED: &str = "enrolled";
    pub const PENDING: &str = "pending";
    pub const ENROLLED_WAITING: &str = "enrolled-waiting";
    pub const PENDING_WAITING: &str = "pending-waiting";
    pub const SUSPENDED: &str = "suspended";
    pub const CANCELED: &str = "canceled";
}

/// Whether a program enrollment has been linked to an authenticated account.
///
/// Every downstream enrollment decision branches on this, so it is surfaced
/// as a tagged variant rather than a bare `Option<Uuid>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountLink {
    /// The learner has linked an account; course-level enrollments are real.
    Bound(Uuid),
    /// No account yet; course-level enrollments are created in a waiting
    /// state and materialized when the account is linked.
    Unbound,
}

/// A program enrollment record.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ProgramEnrollment {
    /// Unique enrollment identifier.
    pub id: Uuid,

    /// Program this enrollment belongs to.
    pub program_id: Uuid,

    /// Curriculum the learner follows within the program.
    pub curriculum_id: Uuid,

    /// External learner identifier from the partner organization.
    pub student_key: String,

    /// Linked account, if any. `None` while the enrollment is waiting.
    pub user_id: Option<Uuid>,

    /// Enrollment status (see [`status`]).
    pub status: String,

    /// Record creation timestamp.
    pub created_at: DateTime<Utc>,

    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a new program enrollment.
#[derive(Debug)]
pub struct CreateProgramEnrollment {
    pub program_id: Uuid,
    pub curriculum_id: Uuid,
    pub student_key: String,
    pub user_id: Option<Uuid>,
    pub status: String,
}

impl ProgramEnrollment {
    /// Create a new program enrollment.
    ///
    /// The `(program_id, student_key)` unique constraint rejects duplicates;
    /// callers detect that with [`crate::is_unique_violation`].
    pub async fn create(pool: &PgPool, data: CreateProgramEnrollment) -> Result<Self, sqlx::Error> {
        sqlx::query_as(
            r"
            INSERT INTO program_enrollments
                (program_id, curriculum_id, student_key, user_id, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            ",
        )
        .bind(data.program_id)
        .bind(data.curriculum_id)
        .bind(&data.student_key)
        .bind(data.user_id)
        .bind(&data.status)
        .fetch_one(pool)
        .await
    }

    /// Find a program enrollment by its external student key.
    pub async fn find_by_student_key(
        pool: &PgPool,
        program_id: Uuid,
        student_key: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as(
            r"
            SELECT * FROM program_enrollments
            WHERE program_id = $1 AND student_key = $2
            ",
        )
        .bind(program_id)
        .bind(student_key)
        .fetch_optional(pool)
        .await
    }

    /// Bulk-fetch the program enrollments for a set of student keys.
    ///
    /// One query for the whole batch; keys with no enrollment are simply
    /// absent from the result.
    pub async fn find_by_student_keys(
        pool: &PgPool,
        program_id: Uuid,
        student_keys: &[String],
    ) -> Result<Vec<Self>, sqlx::Error> {
        if student_keys.is_empty() {
            return Ok(Vec::new());
        }
        sqlx::query_as(
            r"
            SELECT * FROM program_enrollments
            WHERE program_id = $1 AND student_key = ANY($2)
            ",
        )
        .bind(program_id)
        .bind(student_keys)
        .fetch_all(pool)
        .await
    }

    /// The enrollment's account linkage as a tagged variant.
    #[must_use]
    pub fn account_link(&self) -> AccountLink {
        match self.user_id {
            Some(user_id) => AccountLink::Bound(user_id),
            None => AccountLink::Unbound,
        }
    }
}
