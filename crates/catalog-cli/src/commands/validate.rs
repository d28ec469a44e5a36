//! `validate` command.

use anyhow::Result;
use catalog_core::cli::{ExitCode, OutputFormat};
use catalog_store::validate_collections;
use tracing::info;

use super::common::Workspace;
use crate::formatters::format_validation_report;

/// Runs the `validate` command.
///
/// Exits with [`ExitCode::ERROR`] when any manifest is invalid.
///
/// # Errors
///
/// Returns an error if the report cannot be formatted.
pub fn run(workspace: &Workspace, output_format: OutputFormat) -> Result<ExitCode> {
    let report = validate_collections(&workspace.layout);
    println!("{}", format_validation_report(&report, output_format)?);

    if report.is_valid() {
        info!("Validated {} collections", report.files.len());
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::ERROR)
    }
}
