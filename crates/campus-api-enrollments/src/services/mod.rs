//! Business logic services for program enrollments.

pub mod catalog;
pub mod enrollment_service;
pub mod gateway;
pub mod matcher;
pub mod outcome;
pub mod reconciliation;
pub mod store;

pub use catalog::{CatalogError, ProgramCatalog, ProgramRecord, StaticCatalog};
pub use enrollment_service::ProgramEnrollmentService;
pub use gateway::{CourseEnrollmentGateway, GatewayError, NullGateway, PROGRAM_ENROLLMENT_MODE};
pub use matcher::{EnrollmentMatcher, PgEnrollmentMatcher};
pub use outcome::{aggregate, BatchResolution};
pub use reconciliation::{ReconcileError, ReconciliationEngine, MAX_BATCH_RECORDS};
pub use store::{CourseEnrollmentStore, NewCourseEnrollment, PgCourseEnrollmentStore, StoreError};
