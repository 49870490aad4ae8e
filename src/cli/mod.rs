//! CLI command handlers for CoursePilot.
//!
//! This module provides headless, scriptable access to the catalog,
//! recommendations and trends for automation and testing.

pub mod catalog;
pub mod common;
pub mod config;
pub mod recommend;
pub mod trends;

// Re-export types used by main.rs and tests
pub use catalog::{CatalogArgs, DepartmentsArgs};
pub use common::{CliError, CliResult, Context, ExitCode};
pub use config::ConfigArgs;
pub use recommend::RecommendArgs;
pub use trends::TrendsArgs;
