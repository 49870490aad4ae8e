//! Enrollment trend rows for the dashboard.

use serde::{Deserialize, Serialize};

/// Aggregated enrollment for a single department.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendRecord {
    /// Department code
    pub department: String,
    /// Average enrollment reported by the server
    pub average_enrollment: f64,
}

impl TrendRecord {
    /// Average enrollment rounded to whole students (half away from zero).
    pub fn rounded_average(&self) -> i64 {
        self.average_enrollment.round() as i64
    }
}
