//! Command execution and runtime logic.
//!
//! Contains the command dispatch and logging initialization.

use anyhow::{Result, anyhow};
use catalog_core::cli::{ExitCode, OutputFormat};
use clap::CommandFactory;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Commands};
use crate::commands;
use crate::commands::common::Workspace;

/// Initializes logging infrastructure.
///
/// `--verbose` forces debug level, otherwise `RUST_LOG` applies with
/// `info` as the fallback. Logs go to stderr so stdout stays parseable.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_logging(verbose: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()?;

    Ok(())
}

/// Executes the parsed command line.
///
/// Routes commands to their respective handlers and returns an exit code.
///
/// # Errors
///
/// Returns an error if the output format is unknown, the configuration
/// cannot be loaded, or the command fails.
pub async fn execute_command(cli: Cli) -> Result<ExitCode> {
    let output_format = cli.format.parse::<OutputFormat>().map_err(|e| anyhow!("{e}"))?;

    if let Commands::Completions { shell } = cli.command {
        let mut cmd = Cli::command();
        return commands::completions::run(shell, &mut cmd);
    }

    let workspace = Workspace::load(cli.root.as_deref(), cli.config.as_deref())?;

    match cli.command {
        Commands::Readme { offline } => commands::readme::run(&workspace, offline, output_format).await,
        Commands::WebsiteData => commands::website::run(&workspace, output_format),
        Commands::Validate => commands::validate::run(&workspace, output_format),
        Commands::Collection { action } => commands::collection::run(&workspace, action, output_format),
        Commands::Skill { action } => commands::skill::run(&workspace, action, output_format),
        Commands::Plugin { action } => commands::plugin::run(&workspace, action, output_format),
        Commands::Marketplace => commands::marketplace::run(&workspace, output_format),
        Commands::Config { action } => commands::config::run(&workspace, action, output_format),
        Commands::All { offline } => commands::all::run(&workspace, offline, output_format).await,
        Commands::Completions { .. } => Ok(ExitCode::SUCCESS),
    }
}
