//! `all` command.
//!
//! Validates every collection, then regenerates the README files and the
//! website data in one pass. Nothing is written when validation fails.

use anyhow::Result;
use catalog_core::cli::{ExitCode, OutputFormat};
use catalog_store::validate_collections;
use tracing::{info, warn};

use super::common::{Workspace, print_write_report};
use super::readme::{fetch_registry, write_readmes};
use super::website::write_website_data;
use crate::formatters::format_validation_report;

/// Runs the `all` command.
///
/// # Errors
///
/// Returns an error if generation fails.
pub async fn run(workspace: &Workspace, offline: bool, output_format: OutputFormat) -> Result<ExitCode> {
    let validation = validate_collections(&workspace.layout);
    if !validation.is_valid() {
        println!("{}", format_validation_report(&validation, output_format)?);
        warn!("Skipping generation: {} invalid collections", validation.invalid_count());
        return Ok(ExitCode::ERROR);
    }
    info!("Validated {} collections", validation.files.len());

    let registry = fetch_registry(workspace, offline).await;
    let mut report = write_readmes(workspace, registry)?;
    report.merge(write_website_data(workspace)?);

    print_write_report(&report, output_format)?;
    Ok(ExitCode::SUCCESS)
}
