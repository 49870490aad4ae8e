//! Application-wide constants.
//!
//! This module defines constants used throughout the application,
//! including the application name and the fixed limits of the
//! recommendation workflow.

/// The display name of the application (human-readable, with proper capitalization).
pub const APP_NAME: &str = "CoursePilot";

/// The binary name of the application (used in command examples).
pub const APP_BINARY_NAME: &str = "coursepilot";

/// Environment variable that overrides the configuration directory.
pub const CONFIG_DIR_ENV: &str = "COURSEPILOT_CONFIG_DIR";

/// Base URL of the course API when none is configured.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api";

/// Request timeout when none is configured.
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Minimum number of taken courses before a recommendation can be requested.
pub const MIN_SELECTED_COURSES: usize = 2;

/// Maximum number of recommendations kept from a server response.
pub const MAX_RECOMMENDATIONS: usize = 4;

/// Course code token returned for titles without any digits, so they sort last.
pub const UNPARSEABLE_COURSE_CODE: &str = "9999";
