//! Data models for the course catalog, trends and student profile.
//!
//! This module contains the core data structures shared by the API client,
//! the catalog view and the recommendation workflow.
//! Models are designed to be independent of UI and network logic.

pub mod course;
pub mod department;
pub mod profile;
pub mod trend;

// Re-export all model types
pub use course::{CourseId, CourseRecord};
pub use department::{department_label, department_name};
pub use profile::{ClassYear, College, StudentProfile, MAJORS};
pub use trend::TrendRecord;
