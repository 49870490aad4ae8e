//! CoursePilot Library
//!
//! Terminal client for a course catalog service: browse courses by
//! department, mark the ones already taken, request recommendations, and
//! view enrollment trends.

// Module declarations
pub mod api;
pub mod background;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod constants;
pub mod dashboard;
pub mod logging;
pub mod models;
pub mod recommend;
pub mod tui;
