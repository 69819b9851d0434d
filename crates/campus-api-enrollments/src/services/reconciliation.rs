//! Batch reconciliation of course enrollment requests.
//!
//! The engine turns a raw batch of enrollment records into one outcome per
//! distinct student key. It works in two passes:
//!
//! 1. Shape pass: extract and deduplicate student keys, judge each record's
//!    requested status. Records whose status is unrecognized get a
//!    per-record error outcome; records missing a student key or status
//!    abort the whole batch, because they cannot be attributed an outcome.
//! 2. Apply pass: bulk-match the surviving keys against program enrollments
//!    and bulk-check which matched learners already hold the course, then
//!    decide and apply each record individually. Apply failures degrade to
//!    per-record error outcomes; only lookup failures abort the batch.
//!
//! Duplicate handling: every repeat of a student key writes `duplicated`
//! over whatever the key's outcome was, and the apply pass later writes the
//! first occurrence's real result back over that. A first occurrence that
//! never reached the apply pass (invalid status) therefore stays
//! `duplicated` once the key repeats.

use std::collections::HashSet;
use std::sync::Arc;

use campus_core::StudentKey;
use campus_db::models::{AccountLink, ProgramEnrollment};
use thiserror::Error;
use uuid::Uuid;

use crate::models::{
    CourseEnrollmentStatus, EnrollmentRequestRecord, OutcomeMap, ResultCode,
};
use crate::services::gateway::{CourseEnrollmentGateway, PROGRAM_ENROLLMENT_MODE};
use crate::services::matcher::EnrollmentMatcher;
use crate::services::store::{CourseEnrollmentStore, NewCourseEnrollment, StoreError};
use crate::validation::{self, MalformedReason, StatusVerdict};

/// Maximum number of records accepted in one batch request.
pub const MAX_BATCH_RECORDS: usize = 25;

/// Failures that abort the whole batch.
#[derive(Debug, Error)]
pub enum ReconcileError {
    /// A record could not be attributed an outcome.
    #[error("Malformed record: {0}")]
    MalformedRecord(MalformedReason),

    /// Bulk matching against program enrollments failed.
    #[error("Enrollment lookup failed: {0}")]
    Lookup(#[from] sqlx::Error),

    /// The bulk course-enrollment check failed.
    #[error("Course enrollment check failed: {0}")]
    Store(#[from] StoreError),
}

impl From<ReconcileError> for crate::error::EnrollmentsError {
    fn from(err: ReconcileError) -> Self {
        match err {
            ReconcileError::MalformedRecord(reason) => {
                crate::error::EnrollmentsError::MalformedRecord(reason)
            }
            ReconcileError::Lookup(err) | ReconcileError::Store(StoreError::Database(err)) => {
                crate::error::EnrollmentsError::Database(err)
            }
            ReconcileError::Store(StoreError::Conflict) => {
                crate::error::EnrollmentsError::Internal(
                    "unexpected conflict during bulk course enrollment check".to_string(),
                )
            }
        }
    }
}

/// The batch reconciliation engine.
#[derive(Clone)]
pub struct ReconciliationEngine {
    matcher: Arc<dyn EnrollmentMatcher>,
    gateway: Arc<dyn CourseEnrollmentGateway>,
    store: Arc<dyn CourseEnrollmentStore>,
}

impl ReconciliationEngine {
    #[must_use]
    pub fn new(
        matcher: Arc<dyn EnrollmentMatcher>,
        gateway: Arc<dyn CourseEnrollmentGateway>,
        store: Arc<dyn CourseEnrollmentStore>,
    ) -> Self {
        Self {
            matcher,
            gateway,
            store,
        }
    }

    /// Reconcile one batch against `program_id` and `course_key`.
    ///
    /// Returns one outcome per distinct student key in the batch.
    pub async fn reconcile(
        &self,
        program_id: Uuid,
        course_key: &str,
        records: &[EnrollmentRequestRecord],
    ) -> Result<OutcomeMap, ReconcileError> {
        let mut outcomes = OutcomeMap::new();
        let mut seen: HashSet<StudentKey> = HashSet::new();
        let mut queued: Vec<(StudentKey, CourseEnrollmentStatus)> = Vec::new();

        for record in records {
            let key = validation::student_key(record).map_err(ReconcileError::MalformedRecord)?;

            if !seen.insert(key.clone()) {
                outcomes.insert(key, ResultCode::Duplicated);
                continue;
            }

            match validation::status_verdict(record) {
                StatusVerdict::Valid(status) => queued.push((key, status)),
                StatusVerdict::Unrecognized => {
                    outcomes.insert(key, ResultCode::InvalidStatus);
                }
                StatusVerdict::Missing => {
                    return Err(ReconcileError::MalformedRecord(MalformedReason::MissingStatus));
                }
            }
        }

        let keys: Vec<StudentKey> = queued.iter().map(|(key, _)| key.clone()).collect();
        let matched = self.matcher.match_all(program_id, &keys).await?;

        let enrollment_ids: Vec<Uuid> = matched.values().map(|e| e.id).collect();
        let taken = self
            .store
            .existing_for_course(&enrollment_ids, course_key)
            .await?;

        for (key, status) in queued {
            let Some(enrollment) = matched.get(&key) else {
                outcomes.insert(key, ResultCode::NotInProgram);
                continue;
            };

            if taken.contains(&enrollment.id) {
                outcomes.insert(key, ResultCode::Conflict);
                continue;
            }

            let outcome = self.apply_one(enrollment, course_key, status).await;
            outcomes.insert(key, outcome);
        }

        Ok(outcomes)
    }

    /// Create course enrollment state for one matched record.
    ///
    /// Failures here never abort the batch; they become the record's
    /// outcome.
    async fn apply_one(
        &self,
        enrollment: &ProgramEnrollment,
        course_key: &str,
        status: CourseEnrollmentStatus,
    ) -> ResultCode {
        let course_enrollment_ref = match enrollment.account_link() {
            AccountLink::Bound(user_id) => {
                let created = self
                    .gateway
                    .create_enrollment(user_id, course_key, PROGRAM_ENROLLMENT_MODE)
                    .await;

                match created {
                    Ok(enrollment_ref) => {
                        if status == CourseEnrollmentStatus::Inactive {
                            if let Err(err) =
                                self.gateway.deactivate_enrollment(user_id, course_key).await
                            {
                                tracing::error!(
                                    student_key = %enrollment.student_key,
                                    course_key,
                                    error = %err,
                                    "Failed to deactivate platform enrollment"
                                );
                                return ResultCode::InternalError;
                            }
                        }
                        Some(enrollment_ref)
                    }
                    Err(err) => {
                        tracing::error!(
                            student_key = %enrollment.student_key,
                            course_key,
                            error = %err,
                            "Failed to create platform enrollment"
                        );
                        return ResultCode::InternalError;
                    }
                }
            }
            // No account bound yet; the row below records the intent and
            // the platform enrollment happens when the learner claims the
            // program enrollment.
            AccountLink::Unbound => None,
        };

        let inserted = self
            .store
            .insert(NewCourseEnrollment {
                program_enrollment_id: enrollment.id,
                course_key: course_key.to_string(),
                status: status.as_str().to_string(),
                course_enrollment_ref,
            })
            .await;

        match inserted {
            Ok(_) => status.into(),
            Err(StoreError::Conflict) => ResultCode::Conflict,
            Err(StoreError::Database(err)) => {
                tracing::error!(
                    student_key = %enrollment.student_key,
                    course_key,
                    error = %err,
                    "Failed to persist course enrollment"
                );
                ResultCode::InternalError
            }
        }
    }
}
