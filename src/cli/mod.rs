//! Command-line interface module for cmdhist
//!
//! This module is organized into submodules:
//! - `args`: Command-line argument structures
//! - `handlers`: Command handler implementations

mod args;
mod handlers;

pub use args::*;
use handlers::*;

use crate::config::Config;
use crate::error::{Error, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt};

/// cmdhist - shell history records
#[derive(Parser)]
#[command(name = "cmdhist")]
#[command(about = "Create, filter and render shell history records")]
#[command(version, long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet mode (only errors are logged)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a record and print its encoded line
    New(NewArgs),
    /// Read encoded records and print them for display
    List(ListArgs),
    /// Show or initialize configuration
    Config(ConfigArgs),
}

/// Main CLI application
pub struct CliApp {
    pub config: Config,
    /// Why the default config file could not be used, if it was replaced by defaults
    pub config_error: Option<Error>,
    pub verbose: bool,
    pub quiet: bool,
}

impl CliApp {
    /// Create a new CLI application
    pub fn new(cli: &Cli) -> Result<Self> {
        let (config, config_error) = if let Some(config_path) = &cli.config {
            (Config::load_from_path(config_path)?, None)
        } else {
            match Config::load() {
                Ok(config) => (config, None),
                Err(e) => (Config::default(), Some(e)),
            }
        };

        Ok(Self {
            config,
            config_error,
            verbose: cli.verbose,
            quiet: cli.quiet,
        })
    }

    /// Log level used when `RUST_LOG` is not set
    pub fn log_level(&self) -> &str {
        if self.quiet {
            "error"
        } else if self.verbose {
            "debug"
        } else {
            &self.config.logging.level
        }
    }

    /// Run the CLI application
    pub fn run(&mut self, command: &Commands) -> Result<()> {
        match command {
            Commands::New(args) => handle_new(self, args),
            Commands::List(args) => handle_list(self, args),
            Commands::Config(args) => handle_config(self, args),
        }
    }
}

/// Install the stderr tracing subscriber
fn init_tracing(default_level: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    // a subscriber may already be installed when embedded
    let _ = fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let mut app = CliApp::new(&cli)?;
    init_tracing(app.log_level());
    if let Some(e) = &app.config_error {
        tracing::warn!(error = %e, "could not load configuration, using defaults");
    }
    tracing::debug!(level = app.log_level(), "cmdhist starting");
    app.run(&cli.command)
}
