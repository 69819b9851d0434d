//! HTTP handlers for the program enrollment API.

pub mod course_enrollments;
pub mod program_enrollments;
