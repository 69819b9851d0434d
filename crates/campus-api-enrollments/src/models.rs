//! API request/response models for the program enrollment endpoints.

use campus_core::StudentKey;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Result vocabulary
// ---------------------------------------------------------------------------

/// Per-learner outcome of one batch enrollment request.
///
/// The first three variants are the successful outcomes and mirror the
/// status the course enrollment was created with; the rest are error
/// outcomes that leave no course enrollment behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum ResultCode {
    #[serde(rename = "enrolled")]
    Enrolled,
    #[serde(rename = "pending")]
    Pending,
    #[serde(rename = "inactive")]
    Inactive,
    /// The student key appeared more than once in the batch.
    #[serde(rename = "duplicated")]
    Duplicated,
    /// The requested status value is not recognized.
    #[serde(rename = "invalid-status")]
    InvalidStatus,
    /// A course enrollment for this learner and course already exists.
    #[serde(rename = "conflict")]
    Conflict,
    /// No program enrollment exists for this student key.
    #[serde(rename = "not-in-program")]
    NotInProgram,
    /// The creation step failed unexpectedly.
    #[serde(rename = "internal-error")]
    InternalError,
}

impl ResultCode {
    /// Whether this outcome counts as an error for aggregation purposes.
    #[must_use]
    pub fn is_error(self) -> bool {
        matches!(
            self,
            ResultCode::Duplicated
                | ResultCode::InvalidStatus
                | ResultCode::Conflict
                | ResultCode::NotInProgram
                | ResultCode::InternalError
        )
    }

    /// The wire representation of this outcome.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ResultCode::Enrolled => "enrolled",
            ResultCode::Pending => "pending",
            ResultCode::Inactive => "inactive",
            ResultCode::Duplicated => "duplicated",
            ResultCode::InvalidStatus => "invalid-status",
            ResultCode::Conflict => "conflict",
            ResultCode::NotInProgram => "not-in-program",
            ResultCode::InternalError => "internal-error",
        }
    }
}

/// Requested (and resulting) status of a course enrollment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum CourseEnrollmentStatus {
    Enrolled,
    Pending,
    Inactive,
}

impl CourseEnrollmentStatus {
    /// Parse a request status value. Returns `None` for unrecognized values.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "enrolled" => Some(CourseEnrollmentStatus::Enrolled),
            "pending" => Some(CourseEnrollmentStatus::Pending),
            "inactive" => Some(CourseEnrollmentStatus::Inactive),
            _ => None,
        }
    }

    /// The wire and database representation of this status.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            CourseEnrollmentStatus::Enrolled => "enrolled",
            CourseEnrollmentStatus::Pending => "pending",
            CourseEnrollmentStatus::Inactive => "inactive",
        }
    }
}

impl From<CourseEnrollmentStatus> for ResultCode {
    fn from(status: CourseEnrollmentStatus) -> Self {
        match status {
            CourseEnrollmentStatus::Enrolled => ResultCode::Enrolled,
            CourseEnrollmentStatus::Pending => ResultCode::Pending,
            CourseEnrollmentStatus::Inactive => ResultCode::Inactive,
        }
    }
}

/// The outcome map returned by the batch endpoint: one entry per distinct
/// student key submitted.
pub type OutcomeMap = BTreeMap<StudentKey, ResultCode>;

// ---------------------------------------------------------------------------
// Batch enrollment request
// ---------------------------------------------------------------------------

/// One raw entry of the batch enrollment request body.
///
/// Both fields are optional at the wire level so the reconciliation engine
/// can distinguish "missing" (malformed batch) from "unrecognized"
/// (per-record invalid status). Unknown extra fields are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct EnrollmentRequestRecord {
    /// External learner identifier; required and batch-unique.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_key: Option<String>,

    /// Requested enrollment status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl EnrollmentRequestRecord {
    /// Convenience constructor, mainly for tests.
    #[must_use]
    pub fn new(student_key: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            student_key: Some(student_key.into()),
            status: Some(status.into()),
        }
    }
}

// ---------------------------------------------------------------------------
// Program enrollment creation
// ---------------------------------------------------------------------------

/// Request body for creating one program-level enrollment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CreateProgramEnrollmentRequest {
    /// External learner identifier; unique within the program.
    pub student_key: String,

    /// Curriculum the learner follows within the program.
    pub curriculum_id: Uuid,

    /// Requested status: `enrolled` or `pending`.
    pub status: String,

    /// Linked account, when already known. Absent for partner-submitted
    /// enrollments that have not been claimed yet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Uuid>,
}

/// A program enrollment as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ProgramEnrollmentResponse {
    pub id: Uuid,
    pub program_id: Uuid,
    pub curriculum_id: Uuid,
    pub student_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Uuid>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl From<campus_db::models::ProgramEnrollment> for ProgramEnrollmentResponse {
    fn from(enrollment: campus_db::models::ProgramEnrollment) -> Self {
        Self {
            id: enrollment.id,
            program_id: enrollment.program_id,
            curriculum_id: enrollment.curriculum_id,
            student_key: enrollment.student_key,
            user_id: enrollment.user_id,
            status: enrollment.status,
            created_at: enrollment.created_at,
        }
    }
}

// ---------------------------------------------------------------------------
// Course enrollment listing
// ---------------------------------------------------------------------------

/// One row of the course enrollment listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CourseEnrollmentResponse {
    pub id: Uuid,
    pub student_key: String,
    pub course_key: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl From<campus_db::models::CourseEnrollmentListing> for CourseEnrollmentResponse {
    fn from(listing: campus_db::models::CourseEnrollmentListing) -> Self {
        Self {
            id: listing.id,
            student_key: listing.student_key,
            course_key: listing.course_key,
            status: listing.status,
            created_at: listing.created_at,
        }
    }
}

/// Paginated list of course enrollments.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CourseEnrollmentListResponse {
    pub items: Vec<CourseEnrollmentResponse>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}

/// Query parameters for listing course enrollments.
#[derive(Debug, Clone, Deserialize)]
pub struct ListCourseEnrollmentsParams {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    20
}
