//! campus Core Library
//!
//! Shared types for the campus enrollment services.
//!
//! # Modules
//!
//! - [`ids`] - The [`StudentKey`] external learner identifier
//!
//! # Example
//!
//! ```
//! use campus_core::StudentKey;
//!
//! let student = StudentKey::from("learner-0042");
//! assert_eq!(student.as_str(), "learner-0042");
//! ```

pub mod ids;

// Re-export main types for convenient access
pub use ids::StudentKey;
