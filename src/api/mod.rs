//! Client side of the course API.
//!
//! # Endpoints
//!
//! - `GET {base}/courses` - Full catalog
//! - `POST {base}/recommend` - Recommendations for a set of taken courses
//! - `GET {base}/data/trends` - Enrollment by department

pub mod client;
pub mod error;
pub mod wire;

pub use client::{normalize_base_url, CourseApi, HttpCourseApi};
pub use error::ApiError;
pub use wire::{RecommendRequest, RecommendResponse};
