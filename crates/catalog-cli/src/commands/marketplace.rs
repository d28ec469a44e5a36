//! `marketplace` command.

use anyhow::{Context, Result};
use catalog_core::cli::{ExitCode, OutputFormat};
use catalog_store::write_marketplace;
use colored::Colorize;

use super::common::{Workspace, print_write_report};

/// Runs the `marketplace` command.
///
/// # Errors
///
/// Returns an error if `plugins/` is missing or the file cannot be written.
pub fn run(workspace: &Workspace, output_format: OutputFormat) -> Result<ExitCode> {
    let (marketplace, report) = write_marketplace(&workspace.layout, &workspace.config.marketplace)
        .context("failed to generate marketplace.json")?;

    if output_format == OutputFormat::Pretty {
        println!(
            "{} Marketplace {} lists {} plugins",
            "✅".green(),
            marketplace.name.bold(),
            marketplace.plugins.len()
        );
    }
    print_write_report(&report, output_format)?;
    Ok(ExitCode::SUCCESS)
}
