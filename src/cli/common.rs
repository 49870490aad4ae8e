//! Shared types for CLI commands: errors, exit codes, output helpers.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::api::{ApiError, CourseApi};
use crate::catalog::CatalogStore;
use crate::config::Config;

/// Process exit codes used by every command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Command succeeded
    Success = 0,
    /// Bad arguments or input
    Validation = 1,
    /// File system or network failure
    Io = 2,
    /// Server rejected the request or returned nothing useful
    Remote = 3,
}

impl ExitCode {
    /// Numeric process exit code.
    pub const fn code(self) -> i32 {
        self as i32
    }
}

/// Error returned by a command, carrying its exit code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliError {
    /// Exit code for the process
    pub code: ExitCode,
    /// Message printed to stderr
    pub message: String,
}

impl CliError {
    /// Invalid input from the user.
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            code: ExitCode::Validation,
            message: message.into(),
        }
    }

    /// File system or network failure.
    pub fn io(message: impl Into<String>) -> Self {
        Self {
            code: ExitCode::Io,
            message: message.into(),
        }
    }

    /// Failure reported by the server.
    pub fn remote(message: impl Into<String>) -> Self {
        Self {
            code: ExitCode::Remote,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<ApiError> for CliError {
    fn from(error: ApiError) -> Self {
        match error {
            ApiError::InvalidUrl { .. } => Self::validation(error.to_string()),
            ApiError::Status { .. } => Self::remote(error.to_string()),
            ApiError::Transport { .. } | ApiError::Parse { .. } => Self::io(error.to_string()),
        }
    }
}

/// Result type for CLI commands.
pub type CliResult<T> = Result<T, CliError>;

/// Settings every network command needs, resolved from config and flags.
#[derive(Debug, Clone)]
pub struct Context {
    /// Loaded configuration with overrides applied
    pub config: Config,
}

impl Context {
    /// Loads the config file and applies a `--api-url` override.
    pub fn load(api_url: Option<&str>) -> CliResult<Self> {
        let mut config = Config::load()
            .map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))?;

        if let Some(url) = api_url {
            config.api.base_url = url.to_string();
        }

        Ok(Self { config })
    }

    /// Builds the HTTP client.
    pub fn api(&self) -> CliResult<Arc<dyn CourseApi>> {
        let api = self
            .config
            .api
            .client()
            .map_err(|e| CliError::validation(format!("{e:#}")))?;
        Ok(Arc::new(api))
    }
}

/// Fetches the catalog synchronously.
pub fn load_catalog(api: Arc<dyn CourseApi>) -> CliResult<CatalogStore> {
    let mut store = CatalogStore::new();
    store.start_fetch(api);
    store.wait();

    match store.status().error() {
        Some(error) => Err(error.clone().into()),
        None => Ok(store),
    }
}

/// Prints a value as pretty JSON on stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> CliResult<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?;
    println!("{json}");
    Ok(())
}
