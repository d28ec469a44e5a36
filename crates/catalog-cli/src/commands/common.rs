//! Common utilities shared across CLI commands.

use anyhow::{Context, Result};
use catalog_core::cli::OutputFormat;
use catalog_core::{CatalogConfig, RepoLayout};
use catalog_files::WriteReport;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::formatters::format_write_report;

/// Repository layout and configuration resolved from the global flags.
#[derive(Debug, Clone)]
pub struct Workspace {
    /// Repository layout
    pub layout: RepoLayout,
    /// Effective configuration
    pub config: CatalogConfig,
}

impl Workspace {
    /// Resolves the root and loads the configuration.
    ///
    /// `--root` wins over `[repository] root`, which is taken relative to
    /// the current directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded.
    pub fn load(root: Option<&Path>, config: Option<&Path>) -> Result<Self> {
        let base = root.map_or_else(|| PathBuf::from("."), Path::to_path_buf);
        let config = CatalogConfig::load(config, &base).context("failed to load configuration")?;

        let root = match (root, &config.repository.root) {
            (None, Some(configured)) => base.join(configured),
            _ => base,
        };
        debug!("Repository root: {}", root.display());

        Ok(Self {
            layout: RepoLayout::new(root),
            config,
        })
    }

    /// Workspace over `root` with default configuration.
    #[must_use]
    pub fn with_defaults(root: impl Into<PathBuf>) -> Self {
        Self {
            layout: RepoLayout::new(root),
            config: CatalogConfig::default(),
        }
    }
}

/// Prints a write report in the requested format.
///
/// # Errors
///
/// Returns an error if formatting fails.
pub fn print_write_report(report: &WriteReport, format: OutputFormat) -> Result<()> {
    println!("{}", format_write_report(report, format)?);
    Ok(())
}

/// Returns `true` if prompts can be shown.
#[must_use]
pub fn can_prompt(yes: bool) -> bool {
    !yes && std::io::stdin().is_terminal()
}
