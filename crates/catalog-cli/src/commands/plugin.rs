//! `plugin migrate|refresh` commands.

use anyhow::{Context, Result};
use catalog_core::cli::{ExitCode, OutputFormat};
use catalog_store::{PluginStore, PluginSummary, RefreshReport};
use colored::Colorize;
use tracing::info;

use super::common::Workspace;
use crate::actions::PluginAction;
use crate::formatters::format_output;

fn print_summary(summary: &PluginSummary) {
    println!("{} Plugin ready: {}", "✅".green(), summary.dir.bold());
    for (label, count) in [
        ("Commands", summary.commands),
        ("Agents", summary.agents),
        ("Skills", summary.skills),
        ("Hooks", summary.hooks),
    ] {
        if count > 0 {
            println!("   - {label}: {count}");
        }
    }
    if summary.instructions_skipped > 0 {
        println!(
            "   {} {} instructions excluded (not supported in plugins)",
            "ℹ".blue(),
            summary.instructions_skipped
        );
    }
    for path in &summary.skipped {
        println!("   {} skipped missing source: {}", "⚠️".yellow(), path);
    }
}

fn print_refresh_report(report: &RefreshReport) {
    for summary in &report.refreshed {
        print_summary(summary);
    }
    for (id, error) in &report.failed {
        println!("{} Failed to refresh {}: {}", "❌".red(), id.bold(), error);
    }
    println!();
    println!(
        "Refreshed {} plugins, {} failed",
        report.refreshed.len(),
        report.failed.len()
    );
}

/// Runs a `plugin` action.
///
/// `refresh --all` exits with [`ExitCode::PARTIAL_FAILURE`] when some
/// plugins fail and others succeed.
///
/// # Errors
///
/// Returns an error if a single-plugin migrate or refresh fails.
pub fn run(workspace: &Workspace, action: PluginAction, output_format: OutputFormat) -> Result<ExitCode> {
    let store = PluginStore::new(&workspace.layout, &workspace.config);

    let summary = match action {
        PluginAction::Migrate { collection } => store
            .migrate(&collection)
            .with_context(|| format!("failed to migrate collection '{collection}'"))?,
        PluginAction::Refresh { all: true, .. } => {
            let report = store.refresh_all();
            if output_format == OutputFormat::Pretty {
                print_refresh_report(&report);
            } else {
                println!("{}", format_output(&report, output_format)?);
            }
            info!(
                "Refreshed {} plugins ({} failed)",
                report.refreshed.len(),
                report.failed.len()
            );
            return Ok(ExitCode::for_batch(report.refreshed.len(), report.failed.len()));
        }
        PluginAction::Refresh { collection, .. } => {
            let collection = collection.context("a collection id or --all is required")?;
            store
                .refresh(&collection)
                .with_context(|| format!("failed to refresh plugin '{collection}'"))?
        }
    };

    if output_format == OutputFormat::Pretty {
        print_summary(&summary);
    } else {
        println!("{}", format_output(&summary, output_format)?);
    }
    Ok(ExitCode::SUCCESS)
}
