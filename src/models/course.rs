//! Course record as served by the catalog API.

use serde::{Deserialize, Deserializer, Serialize};

/// Unique identifier of a course in the catalog.
pub type CourseId = i64;

/// A single course from the catalog.
///
/// Records are immutable once fetched. `id`, `title` and `department` are
/// required on the wire; `description` and `credits` are nullable columns
/// on the server and decode to their defaults when `null` or absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseRecord {
    /// Unique course identifier
    pub id: CourseId,
    /// Full title, usually prefixed with the course code (e.g., "CSE 8A: Intro")
    pub title: String,
    /// Department code (e.g., "CSE")
    pub department: String,
    /// Credit units
    #[serde(default, deserialize_with = "null_as_default")]
    pub credits: f64,
    /// Catalog description
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    /// Enrollment, when the server reports one (any JSON number)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enrollment: Option<f64>,
}

impl CourseRecord {
    /// Formats credits without a trailing `.0` for whole numbers.
    pub fn credits_label(&self) -> String {
        number_label(self.credits)
    }

    /// Formats enrollment like [`CourseRecord::credits_label`].
    pub fn enrollment_label(&self) -> Option<String> {
        self.enrollment.map(number_label)
    }
}

fn number_label(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value}")
    }
}

/// Deserializes `null` as the type's default value.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
