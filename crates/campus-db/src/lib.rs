//! campus Database Layer
//!
//! Connection pooling, versioned migrations, and the persistent models for
//! program enrollments:
//!
//! - [`models::ProgramEnrollment`] - one learner's membership in a program,
//!   keyed by `(program_id, student_key)`
//! - [`models::ProgramCourseEnrollment`] - a course-run enrollment owned by a
//!   program enrollment, keyed by `(program_enrollment_id, course_key)`
//!
//! Both uniqueness constraints live in the database; callers detect them with
//! [`is_unique_violation`] rather than pre-checking under race.
//!
//! # Example
//!
//! ```rust,ignore
//! use campus_db::{DbPool, run_migrations};
//!
//! let pool = DbPool::connect(&database_url).await?;
//! run_migrations(&pool).await?;
//! ```

pub mod error;
pub mod migrations;
pub mod models;
pub mod pool;

pub use error::DbError;
pub use migrations::run_migrations;
pub use pool::DbPool;

/// Check whether a sqlx error is a PostgreSQL unique-constraint violation.
///
/// Used to map duplicate inserts to domain-level conflicts instead of
/// surfacing them as internal errors.
#[must_use]
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().as_deref() == Some("23505"),
        _ => false,
    }
}
