//! Bulk matching of student keys against program enrollments.

use async_trait::async_trait;
use campus_core::StudentKey;
use campus_db::models::ProgramEnrollment;
use sqlx::PgPool;
use std::collections::HashMap;
use uuid::Uuid;

/// Resolves a set of student keys to their program enrollments in one query.
#[async_trait]
pub trait EnrollmentMatcher: Send + Sync {
    /// Fetch the program enrollments for `keys` within `program_id`.
    ///
    /// Keys without an enrollment are simply absent from the result map.
    async fn match_all(
        &self,
        program_id: Uuid,
        keys: &[StudentKey],
    ) -> Result<HashMap<StudentKey, ProgramEnrollment>, sqlx::Error>;
}

/// Postgres-backed matcher.
#[derive(Clone)]
pub struct PgEnrollmentMatcher {
    pool: PgPool,
}

impl PgEnrollmentMatcher {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EnrollmentMatcher for PgEnrollmentMatcher {
    async fn match_all(
        &self,
        program_id: Uuid,
        keys: &[StudentKey],
    ) -> Result<HashMap<StudentKey, ProgramEnrollment>, sqlx::Error> {
        if keys.is_empty() {
            return Ok(HashMap::new());
        }

        let raw_keys: Vec<String> = keys.iter().map(|k| k.as_str().to_string()).collect();
        let rows =
            ProgramEnrollment::find_by_student_keys(&self.pool, program_id, &raw_keys).await?;

        Ok(rows
            .into_iter()
            .map(|row| (StudentKey::from(row.student_key.as_str()), row))
            .collect())
    }
}
