//! prova demo - runs the sample suites through the report driver
//!
//! The exit status is 0 when every test passed and 1 otherwise.

use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use prova_testing::{run_with_config, ProvaConfig, ReportFormat};
use std::path::PathBuf;
use tracing::{debug, error};

mod suites;

/// Run the prova sample suites
#[derive(Parser)]
#[command(name = "prova-demo")]
#[command(about = "Run the prova sample test suites")]
#[command(version)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Report format (console, json, junit)
    #[arg(short, long)]
    format: Option<ReportFormat>,

    /// Disable colored PASSED / FAILED markers
    #[arg(long)]
    no_color: bool,

    /// Failure message buffer capacity in bytes
    #[arg(long)]
    buffer_capacity: Option<usize>,

    /// Also run the suites that fail on purpose
    #[arg(long)]
    with_failures: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose)?;

    let config = load_config(&cli)?;
    debug!(?config, "effective configuration");

    let suites = suites::all(cli.with_failures);
    match run_with_config(&config, &suites, std::io::stdout()) {
        Ok(summary) => std::process::exit(summary.exit_status()),
        Err(e) => {
            error!("Test run failed: {}", e);
            eprintln!("{} {}", "Error:".red().bold(), e);
            std::process::exit(1);
        }
    }
}

fn load_config(cli: &Cli) -> Result<ProvaConfig> {
    let path = match &cli.config {
        Some(path) => Some(path.clone()),
        None => default_config_path(),
    };

    let mut config = match &path {
        Some(path) => ProvaConfig::load(Some(path))
            .with_context(|| format!("Failed to load config file: {}", path.display()))?,
        None => ProvaConfig::default(),
    };

    if let Some(format) = cli.format {
        config.format = format;
    }
    if cli.no_color {
        config.color = false;
    }
    if let Some(capacity) = cli.buffer_capacity {
        config.buffer_capacity = capacity;
    }

    config.validate().context("Invalid configuration")?;
    Ok(config)
}

/// `<config dir>/prova/config.toml`, when the platform has a config dir.
fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("prova").join("config.toml"))
}

fn init_logging(verbose: bool) -> Result<()> {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}
