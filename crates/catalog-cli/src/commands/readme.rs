//! `readme` command.
//!
//! Fetches the MCP registry (unless offline), scans the sources and writes
//! the category pages, collection pages and the featured block of the root
//! README.

use anyhow::{Context, Result};
use catalog_codegen::{Catalog, GenerationContext, generate_readmes};
use catalog_core::cli::{ExitCode, OutputFormat};
use catalog_files::WriteReport;
use catalog_registry::{McpRegistry, RegistryClient, load_registry};
use tracing::info;

use super::common::{Workspace, print_write_report};

/// Registry snapshot for this run.
pub async fn fetch_registry(workspace: &Workspace, offline: bool) -> McpRegistry {
    if offline || !workspace.config.registry.enabled {
        info!("Skipping MCP registry lookup");
        return McpRegistry::empty();
    }
    let client = RegistryClient::new(workspace.config.registry.url.clone());
    load_registry(&client).await
}

/// Renders and writes the README files.
///
/// # Errors
///
/// Returns an error if rendering or writing fails.
pub fn write_readmes(workspace: &Workspace, registry: McpRegistry) -> Result<WriteReport> {
    let ctx = GenerationContext::from_config(workspace.layout.clone(), &workspace.config, registry)
        .context("failed to prepare generation context")?;
    let catalog = Catalog::scan(ctx.layout());

    let files = generate_readmes(&ctx, &catalog).context("failed to render README files")?;
    let report = files
        .write_to(workspace.layout.root())
        .context("failed to write README files")?;
    Ok(report)
}

/// Runs the `readme` command.
///
/// # Errors
///
/// Returns an error if generation fails.
pub async fn run(workspace: &Workspace, offline: bool, output_format: OutputFormat) -> Result<ExitCode> {
    let registry = fetch_registry(workspace, offline).await;
    let report = write_readmes(workspace, registry)?;
    print_write_report(&report, output_format)?;
    Ok(ExitCode::SUCCESS)
}
