//! Persistent settings: API endpoint, UI preferences and the student profile.
//!
//! Stored as TOML in the platform config directory; missing sections and
//! keys fall back to defaults.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::api::{normalize_base_url, HttpCourseApi};
use crate::constants::{CONFIG_DIR_ENV, DEFAULT_API_BASE_URL, DEFAULT_TIMEOUT_SECS};
use crate::models::StudentProfile;

/// Longest request timeout accepted, in seconds.
const MAX_TIMEOUT_SECS: u64 = 300;

/// Theme display mode preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ThemeMode {
    /// Automatically detect OS theme (dark/light)
    #[default]
    Auto,
    /// Always use dark theme
    Dark,
    /// Always use light theme
    Light,
}

impl std::str::FromStr for ThemeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            _ => Err("Invalid theme mode. Must be 'auto', 'light', or 'dark'".to_string()),
        }
    }
}

/// Course API connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL the endpoint paths are appended to
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

const fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ApiConfig {
    /// Request timeout as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Builds an HTTP client for these settings.
    pub fn client(&self) -> Result<HttpCourseApi> {
        HttpCourseApi::new(&self.base_url, self.timeout()).context("Failed to create API client")
    }
}

/// UI preferences configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Theme mode preference (Auto, Dark, Light)
    #[serde(default)]
    pub theme_mode: ThemeMode,
    /// Department pre-selected in the catalog screen
    #[serde(default)]
    pub default_department: Option<String>,
    /// Show course descriptions under the selected course
    #[serde(default = "default_show_descriptions")]
    pub show_descriptions: bool,
}

const fn default_show_descriptions() -> bool {
    true
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme_mode: ThemeMode::default(),
            default_department: None,
            show_descriptions: default_show_descriptions(),
        }
    }
}

/// Application configuration.
///
/// # File Location
///
/// - Linux: `~/.config/CoursePilot/config.toml`
/// - macOS: `~/Library/Application Support/CoursePilot/config.toml`
/// - Windows: `%APPDATA%\CoursePilot\config.toml`
///
/// `COURSEPILOT_CONFIG_DIR` replaces the directory when set.
///
/// # Validation
///
/// - `base_url` must be an http(s) URL
/// - `timeout_secs` must be between 1 and 300
/// - profile major must be one of the offered majors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    /// Course API settings
    #[serde(default)]
    pub api: ApiConfig,
    /// UI preferences
    #[serde(default)]
    pub ui: UiConfig,
    /// Profile submitted with recommendation requests
    #[serde(default)]
    pub profile: StudentProfile,
}

impl Config {
    /// Creates a new Config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks if the config file exists on disk.
    #[must_use]
    pub fn exists() -> bool {
        Self::config_file_path()
            .map(|path| path.exists())
            .unwrap_or(false)
    }

    /// Gets the config directory path.
    ///
    /// - Linux: `~/.config/CoursePilot/`
    /// - macOS: `~/Library/Application Support/CoursePilot/`
    /// - Windows: `%APPDATA%\CoursePilot\`
    pub fn config_dir() -> Result<PathBuf> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|d| !d.is_empty()) {
            return Ok(PathBuf::from(dir));
        }

        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join("CoursePilot");

        Ok(config_dir)
    }

    /// Gets the full path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Gets the path of the TUI log file.
    pub fn log_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("coursepilot.log"))
    }

    /// Loads configuration from the config file.
    ///
    /// If the file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Loads configuration from a specific file.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(config_path).context(format!(
            "Failed to read config file: {}",
            config_path.display()
        ))?;

        let config: Self = toml::from_str(&content).context(format!(
            "Failed to parse config file: {}",
            config_path.display()
        ))?;

        config.validate()?;
        Ok(config)
    }

    /// Saves configuration to the config file using atomic write.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    /// Saves configuration to a specific file using temp file + rename.
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(config_dir) = config_path.parent() {
            fs::create_dir_all(config_dir).context(format!(
                "Failed to create config directory: {}",
                config_dir.display()
            ))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;
        let temp_path = config_path.with_extension("toml.tmp");

        fs::write(&temp_path, content).context(format!(
            "Failed to write temp config file: {}",
            temp_path.display()
        ))?;

        fs::rename(&temp_path, config_path).context(format!(
            "Failed to rename temp config file to: {}",
            config_path.display()
        ))?;

        Ok(())
    }

    /// Validates configuration values.
    pub fn validate(&self) -> Result<()> {
        normalize_base_url(&self.api.base_url).context("Invalid api.base_url")?;

        if self.api.timeout_secs == 0 || self.api.timeout_secs > MAX_TIMEOUT_SECS {
            anyhow::bail!(
                "Invalid api.timeout_secs: {} (must be between 1 and {MAX_TIMEOUT_SECS})",
                self.api.timeout_secs
            );
        }

        if let Some(department) = &self.ui.default_department {
            if department.trim().is_empty() {
                anyhow::bail!("Invalid ui.default_department: must not be empty");
            }
        }

        self.profile
            .validate()
            .map_err(|e| anyhow::anyhow!("Invalid profile: {e}"))?;

        Ok(())
    }
}
