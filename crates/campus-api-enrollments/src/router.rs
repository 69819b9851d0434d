//! Router and state for the program enrollment API.
//!
//! Provides the `EnrollmentsState` struct and `enrollments_router()`
//! function that creates the Axum router for all enrollment endpoints.

use axum::{
    routing::post,
    Extension, Router,
};
use sqlx::PgPool;
use std::sync::Arc;

use crate::handlers;
use crate::services::{
    CourseEnrollmentGateway, PgCourseEnrollmentStore, PgEnrollmentMatcher, ProgramCatalog,
    ReconciliationEngine,
};

/// Shared state for enrollment routes.
#[derive(Clone)]
pub struct EnrollmentsState {
    /// Database connection pool.
    pub pool: PgPool,
    /// Source of program and curriculum metadata.
    pub catalog: Arc<dyn ProgramCatalog>,
    /// Batch reconciliation engine.
    pub engine: ReconciliationEngine,
}

impl EnrollmentsState {
    /// Create a new `EnrollmentsState` with Postgres-backed matching and
    /// persistence.
    pub fn new(
        pool: PgPool,
        catalog: Arc<dyn ProgramCatalog>,
        gateway: Arc<dyn CourseEnrollmentGateway>,
    ) -> Self {
        let matcher = Arc::new(PgEnrollmentMatcher::new(pool.clone()));
        let store = Arc::new(PgCourseEnrollmentStore::new(pool.clone()));
        let engine = ReconciliationEngine::new(matcher, gateway, store);
        Self {
            pool,
            catalog,
            engine,
        }
    }
}

/// Create the enrollments router.
///
/// Routes:
/// - POST /`programs/:program_id/enrollments`                         — Create program enrollment
/// - POST /`programs/:program_id/courses/:course_key/enrollments`     — Batch course enrollment
/// - GET  /`programs/:program_id/courses/:course_key/enrollments`     — List course enrollments
pub fn enrollments_router(state: EnrollmentsState) -> Router {
    Router::new()
        .route(
            "/programs/:program_id/enrollments",
            post(handlers::program_enrollments::create_program_enrollment),
        )
        .route(
            "/programs/:program_id/courses/:course_key/enrollments",
            post(handlers::course_enrollments::create_course_enrollments)
                .get(handlers::course_enrollments::list_course_enrollments),
        )
        .layer(Extension(state))
}
