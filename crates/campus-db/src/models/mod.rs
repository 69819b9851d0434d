//! Persistent models for program enrollments.

pub mod program_course_enrollment;
pub mod program_enrollment;

pub use program_course_enrollment::{
    CourseEnrollmentListing, CreateProgramCourseEnrollment, ProgramCourseEnrollment,
};
pub use program_enrollment::{AccountLink, CreateProgramEnrollment, ProgramEnrollment};
