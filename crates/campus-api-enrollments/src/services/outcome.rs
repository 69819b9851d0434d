//! Aggregation of per-learner outcomes into one batch-level resolution.

use crate::models::OutcomeMap;
use axum::http::StatusCode;

/// Batch-level resolution derived from the per-learner outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchResolution {
    /// Every record succeeded.
    FullSuccess,
    /// A mix of successes and per-record errors.
    PartialSuccess,
    /// Every record failed.
    TotalFailure,
}

impl BatchResolution {
    /// HTTP status code the batch endpoint responds with.
    #[must_use]
    pub fn status_code(self) -> StatusCode {
        match self {
            BatchResolution::FullSuccess => StatusCode::OK,
            BatchResolution::PartialSuccess => StatusCode::MULTI_STATUS,
            BatchResolution::TotalFailure => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

/// Classify a finished outcome map.
///
/// An empty map means nothing was processed, which is a total failure.
#[must_use]
pub fn aggregate(outcomes: &OutcomeMap) -> BatchResolution {
    let mut successes = 0usize;
    let mut errors = 0usize;
    for code in outcomes.values() {
        if code.is_error() {
            errors += 1;
        } else {
            successes += 1;
        }
    }

    match (successes, errors) {
        (0, _) => BatchResolution::TotalFailure,
        (_, 0) => BatchResolution::FullSuccess,
        _ => BatchResolution::PartialSuccess,
    }
}
