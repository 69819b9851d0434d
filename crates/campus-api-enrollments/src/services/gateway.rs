//! Gateway to the platform's course enrollment system.
//!
//! Course-level program enrollments own a row in this service's database,
//! but learners with a bound account also get a real course enrollment in
//! the learning platform. That side effect goes through this trait so the
//! reconciliation engine never talks to the platform directly.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

/// Enrollment track used for program-driven course enrollments.
pub const PROGRAM_ENROLLMENT_MODE: &str = "masters";

/// Gateway errors.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The platform rejected the enrollment request.
    #[error("Enrollment rejected: {0}")]
    Rejected(String),

    /// The platform could not be reached.
    #[error("Enrollment system unavailable: {0}")]
    Unavailable(String),
}

/// Creates and deactivates course enrollments in the learning platform.
#[async_trait]
pub trait CourseEnrollmentGateway: Send + Sync {
    /// Enroll `user_id` in `course_key` under `mode`.
    ///
    /// Returns the platform's enrollment reference. Must be idempotent for
    /// an already-enrolled learner.
    async fn create_enrollment(
        &self,
        user_id: Uuid,
        course_key: &str,
        mode: &str,
    ) -> Result<Uuid, GatewayError>;

    /// Mark an existing course enrollment inactive.
    async fn deactivate_enrollment(
        &self,
        user_id: Uuid,
        course_key: &str,
    ) -> Result<(), GatewayError>;
}

/// Gateway that performs no platform calls.
///
/// Used when the deployment has no co-located learning platform; course
/// enrollments then live only in this service and are pushed later by a
/// separate sync job.
#[derive(Debug, Clone, Default)]
pub struct NullGateway;

#[async_trait]
impl CourseEnrollmentGateway for NullGateway {
    async fn create_enrollment(
        &self,
        user_id: Uuid,
        course_key: &str,
        _mode: &str,
    ) -> Result<Uuid, GatewayError> {
        tracing::debug!(%user_id, course_key, "Skipping platform enrollment (null gateway)");
        Ok(Uuid::new_v4())
    }

    async fn deactivate_enrollment(
        &self,
        user_id: Uuid,
        course_key: &str,
    ) -> Result<(), GatewayError> {
        tracing::debug!(%user_id, course_key, "Skipping platform deactivation (null gateway)");
        Ok(())
    }
}
