//! Request and response bodies of the course API.
//!
//! Field names match the server exactly; do not rename them.

use serde::{Deserialize, Serialize};

use crate::models::{CourseId, CourseRecord, StudentProfile};

/// Body of `POST /recommend`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendRequest {
    /// Courses the student has already taken, in selection order
    pub taken_course_ids: Vec<CourseId>,
    /// Optional profile fields (`major`, `college`, `year`) at the top level
    #[serde(flatten)]
    pub profile: Option<StudentProfile>,
}

/// Body of a `POST /recommend` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendResponse {
    /// Recommended courses, best first
    pub courses: Vec<CourseRecord>,
    /// Human-readable status from the server
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Error body shape shared by all endpoints.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}
