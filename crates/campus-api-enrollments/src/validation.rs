//! Shape validation for incoming enrollment records.
//!
//! The reconciliation engine only needs two signals from validation: whether
//! the record is structurally unprocessable (which aborts the whole batch),
//! and whether it is invalid specifically because of the status value (which
//! is a per-record outcome). Both are expressed as explicit enums here
//! rather than inspecting a serializer's error shape.

use crate::models::{CourseEnrollmentStatus, EnrollmentRequestRecord};
use campus_core::StudentKey;
use std::fmt;

/// Why a record is structurally unprocessable.
///
/// A record without a usable student key cannot be attributed an outcome,
/// so any of these aborts the batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedReason {
    MissingStudentKey,
    BlankStudentKey,
    MissingStatus,
}

impl fmt::Display for MalformedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MalformedReason::MissingStudentKey => write!(f, "student_key is required"),
            MalformedReason::BlankStudentKey => write!(f, "student_key must not be blank"),
            MalformedReason::MissingStatus => write!(f, "status is required"),
        }
    }
}

/// Verdict on a record's status field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusVerdict {
    /// Recognized status value.
    Valid(CourseEnrollmentStatus),
    /// Present but not a recognized value; per-record outcome.
    Unrecognized,
    /// Absent or blank; malformed record.
    Missing,
}

/// Extract the student key, rejecting missing or blank values.
pub fn student_key(record: &EnrollmentRequestRecord) -> Result<StudentKey, MalformedReason> {
    match record.student_key.as_deref() {
        None => Err(MalformedReason::MissingStudentKey),
        Some(raw) if raw.trim().is_empty() => Err(MalformedReason::BlankStudentKey),
        Some(raw) => Ok(StudentKey::from(raw)),
    }
}

/// Judge the record's status field.
#[must_use]
pub fn status_verdict(record: &EnrollmentRequestRecord) -> StatusVerdict {
    match record.status.as_deref() {
        None => StatusVerdict::Missing,
        Some(raw) if raw.trim().is_empty() => StatusVerdict::Missing,
        Some(raw) => match CourseEnrollmentStatus::parse(raw) {
            Some(status) => StatusVerdict::Valid(status),
            None => StatusVerdict::Unrecognized,
        },
    }
}
