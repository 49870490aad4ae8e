//! CoursePilot - Terminal course catalog and recommendation client
//!
//! Browse a course catalog by department, mark courses already taken, and
//! ask the course service for recommendations. Runs the TUI by default;
//! subcommands give headless, scriptable access.

use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use coursepilot::cli::{
    CatalogArgs, CliError, ConfigArgs, Context, DepartmentsArgs, ExitCode, RecommendArgs,
    TrendsArgs,
};
use coursepilot::config::Config;
use coursepilot::constants::APP_NAME;
use coursepilot::logging::{self, LogTarget};
use coursepilot::tui;

/// CoursePilot - Terminal course catalog and recommendation client
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Course API base URL (overrides the config file)
    #[arg(long, value_name = "URL", global = true)]
    api_url: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List courses by department
    Catalog(CatalogArgs),
    /// List departments in the catalog
    Departments(DepartmentsArgs),
    /// Recommend courses from courses already taken
    Recommend(RecommendArgs),
    /// Show average enrollment per department
    Trends(TrendsArgs),
    /// Manage configuration
    Config(ConfigArgs),
}

fn main() {
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        if let Err(e) = run_tui(cli.api_url.as_deref(), cli.verbose) {
            eprintln!("Error: {e:#}");
            std::process::exit(ExitCode::Io.code());
        }
        return;
    };

    if let Err(e) = logging::init(LogTarget::Stderr, cli.verbose) {
        eprintln!("Warning: {e:#}");
    }

    let result = match command {
        Command::Config(args) => args.execute(cli.api_url.as_deref()),
        Command::Catalog(args) => with_context(cli.api_url.as_deref(), |ctx| args.execute(ctx)),
        Command::Departments(args) => {
            with_context(cli.api_url.as_deref(), |ctx| args.execute(ctx))
        }
        Command::Recommend(args) => with_context(cli.api_url.as_deref(), |ctx| args.execute(ctx)),
        Command::Trends(args) => with_context(cli.api_url.as_deref(), |ctx| args.execute(ctx)),
    };

    if let Err(CliError { code, message }) = result {
        eprintln!("Error: {message}");
        std::process::exit(code.code());
    }
}

fn with_context(
    api_url: Option<&str>,
    command: impl FnOnce(&Context) -> Result<(), CliError>,
) -> Result<(), CliError> {
    let ctx = Context::load(api_url)?;
    command(&ctx)
}

fn run_tui(api_url: Option<&str>, verbose: bool) -> Result<()> {
    let mut config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Warning: Failed to load config: {e:#}");
            eprintln!("Continuing with default settings.");
            Config::default()
        }
    };
    if let Some(url) = api_url {
        config.api.base_url = url.to_string();
    }

    // The TUI owns the terminal, so logs go to a file
    let log_path = Config::log_file_path()?;
    if let Err(e) = logging::init(LogTarget::File(&log_path), verbose) {
        eprintln!("Warning: {e:#}");
    }

    let api = Arc::new(config.api.client()?);
    tracing::info!(base_url = api.base_url(), "Starting {APP_NAME}");

    let mut app_state = tui::AppState::new(config, api);
    app_state.start();

    let mut terminal = tui::setup_terminal()?;
    let result = tui::run_tui(&mut app_state, &mut terminal);
    tui::restore_terminal(terminal)?;

    result
}
