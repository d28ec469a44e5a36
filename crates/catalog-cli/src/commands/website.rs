//! `website-data` command.

use anyhow::{Context, Result};
use catalog_codegen::website::GIT_DATE_DIRECTORIES;
use catalog_codegen::{Catalog, GenerationContext, generate_website_data};
use catalog_core::cli::{ExitCode, OutputFormat};
use catalog_files::WriteReport;
use catalog_parser::GitDates;
use catalog_registry::McpRegistry;

use super::common::{Workspace, print_write_report};

/// Renders and writes the website JSON documents.
///
/// # Errors
///
/// Returns an error if rendering or writing fails.
pub fn write_website_data(workspace: &Workspace) -> Result<WriteReport> {
    let ctx = GenerationContext::from_config(workspace.layout.clone(), &workspace.config, McpRegistry::empty())
        .context("failed to prepare generation context")?;
    let catalog = Catalog::scan(ctx.layout());
    let dates = GitDates::load(workspace.layout.root(), &GIT_DATE_DIRECTORIES);

    let files = generate_website_data(&ctx, &catalog, &dates).context("failed to render website data")?;
    let report = files
        .write_to(workspace.layout.root())
        .context("failed to write website data")?;
    Ok(report)
}

/// Runs the `website-data` command.
///
/// # Errors
///
/// Returns an error if generation fails.
pub fn run(workspace: &Workspace, output_format: OutputFormat) -> Result<ExitCode> {
    let report = write_website_data(workspace)?;
    print_write_report(&report, output_format)?;
    Ok(ExitCode::SUCCESS)
}
