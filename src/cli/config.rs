//! Configuration management CLI commands.

use crate::api::normalize_base_url;
use crate::cli::common::{print_json, CliError, CliResult};
use crate::config::{Config, ThemeMode};
use crate::models::department_label;
use clap::{Args, Subcommand};
use serde::Serialize;

/// Configuration management commands
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Display current configuration
    Show(ConfigShowArgs),
    /// Set configuration values
    Set(ConfigSetArgs),
}

/// Display current configuration
#[derive(Args, Debug)]
pub struct ConfigShowArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Set configuration values
///
/// The base URL comes from the global `--api-url` flag.
#[derive(Args, Debug)]
pub struct ConfigSetArgs {
    /// Request timeout in seconds
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Theme mode (auto, light, or dark)
    #[arg(long, value_name = "MODE")]
    theme: Option<String>,

    /// Department pre-selected in the catalog screen
    #[arg(long, value_name = "CODE")]
    department: Option<String>,
}

/// JSON-serializable configuration for output
#[derive(Serialize, Debug)]
struct ConfigOutput<'a> {
    config_file: String,
    api: ApiOutput<'a>,
    ui: UiOutput<'a>,
    profile: ProfileOutput,
}

#[derive(Serialize, Debug)]
struct ApiOutput<'a> {
    base_url: &'a str,
    timeout_secs: u64,
}

#[derive(Serialize, Debug)]
struct UiOutput<'a> {
    theme: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    default_department: Option<&'a str>,
    show_descriptions: bool,
}

#[derive(Serialize, Debug)]
struct ProfileOutput {
    major: String,
    college: String,
    year: String,
}

impl ConfigArgs {
    /// Execute config subcommand
    pub fn execute(&self, api_url: Option<&str>) -> CliResult<()> {
        match &self.command {
            ConfigCommand::Show(args) => args.execute(),
            ConfigCommand::Set(args) => args.execute(api_url),
        }
    }
}

impl ConfigShowArgs {
    /// Execute show command
    pub fn execute(&self) -> CliResult<()> {
        let config = Config::load()
            .map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))?;
        let path = Config::config_file_path()
            .map_err(|e| CliError::io(format!("Failed to resolve config path: {e}")))?;

        if self.json {
            print_json(&ConfigOutput {
                config_file: path.display().to_string(),
                api: ApiOutput {
                    base_url: &config.api.base_url,
                    timeout_secs: config.api.timeout_secs,
                },
                ui: UiOutput {
                    theme: theme_name(config.ui.theme_mode),
                    default_department: config.ui.default_department.as_deref(),
                    show_descriptions: config.ui.show_descriptions,
                },
                profile: ProfileOutput {
                    major: config.profile.major.clone(),
                    college: config.profile.college.to_string(),
                    year: config.profile.year.to_string(),
                },
            })?;
        } else {
            output_human_readable(&config, &path.display().to_string());
        }

        Ok(())
    }
}

impl ConfigSetArgs {
    /// Execute set command
    pub fn execute(&self, api_url: Option<&str>) -> CliResult<()> {
        // At least one argument must be provided
        if api_url.is_none()
            && self.timeout.is_none()
            && self.theme.is_none()
            && self.department.is_none()
        {
            return Err(CliError::validation(
                "At least one configuration option must be specified: --api-url, --timeout, --theme, or --department",
            ));
        }

        let mut config = Config::load().unwrap_or_default();

        if let Some(url) = api_url {
            config.api.base_url = normalize_base_url(url)
                .map_err(|e| CliError::validation(e.to_string()))?;
        }

        if let Some(timeout) = self.timeout {
            config.api.timeout_secs = timeout;
        }

        if let Some(theme) = &self.theme {
            config.ui.theme_mode = theme.parse::<ThemeMode>().map_err(CliError::validation)?;
        }

        if let Some(department) = &self.department {
            let department = department.trim().to_ascii_uppercase();
            config.ui.default_department = (!department.is_empty()).then_some(department);
        }

        config
            .validate()
            .map_err(|e| CliError::validation(format!("{e:#}")))?;

        config
            .save()
            .map_err(|e| CliError::io(format!("Failed to save configuration: {e:#}")))?;

        println!("Configuration updated successfully.");

        Ok(())
    }
}

fn theme_name(mode: ThemeMode) -> String {
    format!("{mode:?}").to_lowercase()
}

/// Output configuration in human-readable format
fn output_human_readable(config: &Config, path: &str) {
    println!("CoursePilot Configuration");
    println!("=========================");
    println!("File: {path}");
    println!();

    println!("API:");
    println!("  Base URL: {}", config.api.base_url);
    println!("  Timeout:  {}s", config.api.timeout_secs);
    println!();

    println!("UI:");
    println!("  Theme Mode:         {}", theme_name(config.ui.theme_mode));
    match &config.ui.default_department {
        Some(code) => println!("  Default Department: {}", department_label(code)),
        None => println!("  Default Department: (none)"),
    }
    println!("  Show Descriptions:  {}", config.ui.show_descriptions);
    println!();

    println!("Profile:");
    println!("  Major:   {}", config.profile.major);
    println!("  College: {}", config.profile.college);
    println!("  Year:    {}", config.profile.year);
}
