//! Course code extraction and numeric-aware ordering.
//!
//! Titles look like `"CSE 8A: Introduction to Programming"`. The sort key is
//! the code token after the department prefix (`"8A"`). Titles that do not
//! start with the department fall back to the first number anywhere in the
//! title, and titles without digits get a sentinel that sorts last.

use regex::Regex;
use std::cmp::Ordering;
use std::sync::LazyLock;

use crate::constants::UNPARSEABLE_COURSE_CODE;

// ASCII digits only, matching `split_leading_digits`
static FIRST_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+").expect("literal pattern is valid"));

/// Extracts course code tokens for one department.
///
/// Compiles the department-specific pattern once so a whole department can
/// be keyed without recompiling per title.
#[derive(Debug, Clone)]
pub struct CourseCodeExtractor {
    prefix: Option<Regex>,
}

impl CourseCodeExtractor {
    /// Creates an extractor for the given department code.
    pub fn new(department: &str) -> Self {
        let pattern = format!(
            r"(?i-u)^{}\s*([0-9]+[a-z]?)(?::|\s|$)",
            regex::escape(department.trim())
        );
        Self {
            prefix: Regex::new(&pattern).ok(),
        }
    }

    /// Returns the comparable code token for a title.
    pub fn extract(&self, title: &str) -> String {
        if let Some(captures) = self.prefix.as_ref().and_then(|re| re.captures(title)) {
            return captures[1].to_ascii_uppercase();
        }

        FIRST_NUMBER
            .find(title)
            .map(|m| m.as_str().to_string())
            .unwrap_or_else(|| UNPARSEABLE_COURSE_CODE.to_string())
    }
}

/// Returns the comparable code token for `title` within `department`.
///
/// ```
/// use coursepilot::catalog::extract_course_code;
///
/// assert_eq!(extract_course_code("CSE 8A: Intro", "CSE"), "8A");
/// assert_eq!(extract_course_code("Selected Topics (100 level)", "CSE"), "100");
/// assert_eq!(extract_course_code("Seminar", "CSE"), "9999");
/// ```
pub fn extract_course_code(title: &str, department: &str) -> String {
    CourseCodeExtractor::new(department).extract(title)
}

/// Compares two code tokens the way a person reads course numbers.
///
/// The leading digit runs are compared numerically, then whatever follows
/// is compared lexically, so `"8A" < "10" < "100"`.
pub fn compare_course_codes(a: &str, b: &str) -> Ordering {
    let (a_digits, a_rest) = split_leading_digits(a);
    let (b_digits, b_rest) = split_leading_digits(b);

    match (a_digits.is_empty(), b_digits.is_empty()) {
        (false, true) => return Ordering::Less,
        (true, false) => return Ordering::Greater,
        _ => {}
    }

    compare_digit_runs(a_digits, b_digits).then_with(|| a_rest.cmp(b_rest))
}

fn split_leading_digits(code: &str) -> (&str, &str) {
    let end = code
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(code.len());
    code.split_at(end)
}

/// Numeric comparison of digit strings of any length.
fn compare_digit_runs(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}
