//! Error types for the program enrollment API.
//!
//! Uses RFC 7807 Problem Details for HTTP APIs.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::validation::MalformedReason;

/// Base URL for error type URIs.
const ERROR_BASE_URL: &str = "https://campus.example.org/errors/enrollments";

/// RFC 7807 Problem Details structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProblemDetails {
    /// URI identifying the problem type.
    #[serde(rename = "type")]
    pub error_type: String,

    /// Short human-readable summary.
    pub title: String,

    /// HTTP status code.
    pub status: u16,

    /// Human-readable explanation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    /// URI of the specific occurrence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
}

impl ProblemDetails {
    /// Create a new `ProblemDetails` instance.
    #[must_use]
    pub fn new(error_type: &str, title: &str, status: StatusCode) -> Self {
        Self {
            error_type: format!("{ERROR_BASE_URL}/{error_type}"),
            title: title.to_string(),
            status: status.as_u16(),
            detail: None,
            instance: None,
        }
    }

    /// Add detail message.
    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

/// Program enrollment API errors.
#[derive(Debug, Error)]
pub enum EnrollmentsError {
    /// Program is not known to the catalog.
    #[error("Program not found")]
    ProgramNotFound,

    /// Course run is not part of the program's curricula.
    #[error("Course not in program")]
    CourseNotInProgram,

    /// Batch exceeds the per-request record limit.
    #[error("Batch too large: {0}")]
    BatchTooLarge(String),

    /// A batch record is structurally unprocessable.
    #[error("Malformed record: {0}")]
    MalformedRecord(MalformedReason),

    /// Submitted batch contains no records.
    #[error("Empty batch")]
    EmptyBatch,

    /// A program enrollment already exists for this student key.
    #[error("Enrollment already exists")]
    DuplicateEnrollment,

    /// The requested enrollment status is not recognized.
    #[error("Invalid status: {0}")]
    InvalidStatus(String),

    /// Program catalog lookup failed.
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// Internal server error.
    #[error("Internal server error: {0}")]
    Internal(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl EnrollmentsError {
    /// Convert to `ProblemDetails`.
    pub fn to_problem_details(&self) -> ProblemDetails {
        match self {
            EnrollmentsError::ProgramNotFound => ProblemDetails::new(
                "program-not-found",
                "Program Not Found",
                StatusCode::NOT_FOUND,
            )
            .with_detail("The requested program was not found."),

            EnrollmentsError::CourseNotInProgram => ProblemDetails::new(
                "course-not-in-program",
                "Course Not In Program",
                StatusCode::NOT_FOUND,
            )
            .with_detail("The course run is not part of the program's curricula."),

            EnrollmentsError::BatchTooLarge(msg) => ProblemDetails::new(
                "batch-too-large",
                "Batch Too Large",
                StatusCode::PAYLOAD_TOO_LARGE,
            )
            .with_detail(msg.clone()),

            EnrollmentsError::MalformedRecord(reason) => ProblemDetails::new(
                "malformed-record",
                "Malformed Record",
                StatusCode::UNPROCESSABLE_ENTITY,
            )
            .with_detail(reason.to_string()),

            EnrollmentsError::EmptyBatch => ProblemDetails::new(
                "empty-batch",
                "Empty Batch",
                StatusCode::UNPROCESSABLE_ENTITY,
            )
            .with_detail("The request body must contain at least one record."),

            EnrollmentsError::DuplicateEnrollment => ProblemDetails::new(
                "duplicate-enrollment",
                "Duplicate Enrollment",
                StatusCode::CONFLICT,
            )
            .with_detail("A program enrollment already exists for this student key."),

            EnrollmentsError::InvalidStatus(msg) => ProblemDetails::new(
                "invalid-status",
                "Invalid Status",
                StatusCode::UNPROCESSABLE_ENTITY,
            )
            .with_detail(msg.clone()),

            EnrollmentsError::Catalog(msg) => {
                tracing::error!(error = %msg, "Catalog lookup failed");
                ProblemDetails::new(
                    "catalog-error",
                    "Catalog Error",
                    StatusCode::INTERNAL_SERVER_ERROR,
                )
                .with_detail("The program catalog could not be reached. Please try again later.")
            }

            EnrollmentsError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal enrollment error");
                ProblemDetails::new(
                    "internal-error",
                    "Internal Server Error",
                    StatusCode::INTERNAL_SERVER_ERROR,
                )
                .with_detail("An internal error occurred. Please try again later.")
            }

            EnrollmentsError::Database(err) => {
                tracing::error!(error = %err, "Database error in enrollments");
                ProblemDetails::new(
                    "database-error",
                    "Database Error",
                    StatusCode::INTERNAL_SERVER_ERROR,
                )
                .with_detail("A database error occurred. Please try again later.")
            }
        }
    }

    /// Get the HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            EnrollmentsError::ProgramNotFound => StatusCode::NOT_FOUND,
            EnrollmentsError::CourseNotInProgram => StatusCode::NOT_FOUND,
            EnrollmentsError::BatchTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            EnrollmentsError::MalformedRecord(_) => StatusCode::UNPROCESSABLE_ENTITY,
            EnrollmentsError::EmptyBatch => StatusCode::UNPROCESSABLE_ENTITY,
            EnrollmentsError::DuplicateEnrollment => StatusCode::CONFLICT,
            EnrollmentsError::InvalidStatus(_) => StatusCode::UNPROCESSABLE_ENTITY,
            EnrollmentsError::Catalog(_) => StatusCode::INTERNAL_SERVER_ERROR,
            EnrollmentsError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            EnrollmentsError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for EnrollmentsError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let problem = self.to_problem_details();

        let mut response = (status, Json(problem)).into_response();
        response.headers_mut().insert(
            axum::http::header::CONTENT_TYPE,
            axum::http::HeaderValue::from_static("application/problem+json"),
        );

        response
    }
}
