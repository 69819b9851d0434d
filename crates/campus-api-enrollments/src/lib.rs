//! Program Enrollment API
//!
//! This crate provides REST API endpoints for:
//! - Batch enrollment of learners into a course within a program, with
//!   per-learner outcomes and an aggregate response status
//! - Creation of program-level enrollments
//! - Listing course enrollments within a program
//!
//! The heart of the crate is the reconciliation engine
//! ([`services::reconciliation::ReconciliationEngine`]): it deduplicates and
//! validates an incoming batch, bulk-matches it against known program
//! enrollments, conditionally creates course-level enrollment state, and
//! reports one outcome per learner. Records with unrecognized statuses or
//! unknown learners fail individually; only a structurally malformed record
//! rejects the whole request.
//!
//! # Example
//!
//! ```rust,ignore
//! use campus_api_enrollments::{enrollments_router, EnrollmentsState};
//! use axum::Router;
//!
//! let state = EnrollmentsState::new(pool, catalog, gateway);
//! let app = Router::new().nest("/api/v1", enrollments_router(state));
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod router;
pub mod services;
pub mod validation;

// Re-export public API
pub use error::EnrollmentsError;
pub use router::{enrollments_router, EnrollmentsState};
