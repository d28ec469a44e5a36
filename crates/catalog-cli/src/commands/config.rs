//! `config show|init` commands.
//!
//! Configuration is stored in TOML at `copilot-catalog.toml` in the
//! repository root, or wherever `--config` points.

use anyhow::{Context, Result, bail};
use catalog_core::CatalogConfig;
use catalog_core::cli::{ExitCode, OutputFormat};
use catalog_core::config::CONFIG_FILE_NAME;
use catalog_files::write_if_changed;
use colored::Colorize;
use std::path::PathBuf;
use tracing::info;

use super::common::Workspace;
use crate::actions::ConfigAction;
use crate::formatters::format_output;

/// Writes the default configuration to the repository root.
///
/// # Errors
///
/// Returns an error if the file exists and `force` is not set, or if it
/// cannot be written.
pub fn init(workspace: &Workspace, force: bool) -> Result<PathBuf> {
    let path = workspace.layout.root().join(CONFIG_FILE_NAME);
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }

    let content = CatalogConfig::default()
        .to_toml()
        .context("failed to serialize default configuration")?;
    write_if_changed(&path, &content).with_context(|| format!("failed to write {}", path.display()))?;

    info!("Wrote default configuration to {}", path.display());
    Ok(path)
}

/// Runs a `config` action.
///
/// # Errors
///
/// Returns an error if the configuration cannot be shown or written.
pub fn run(workspace: &Workspace, action: ConfigAction, output_format: OutputFormat) -> Result<ExitCode> {
    match action {
        ConfigAction::Show => {
            if output_format == OutputFormat::Json {
                println!("{}", format_output(&workspace.config, output_format)?);
            } else {
                print!("{}", workspace.config.to_toml()?);
            }
        }
        ConfigAction::Init { force } => {
            let path = init(workspace, force)?;
            println!("{} Created {}", "✅".green(), path.display());
        }
    }
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_refuses_to_overwrite() {
        let temp = TempDir::new().unwrap();
        let workspace = Workspace::with_defaults(temp.path());

        let path = init(&workspace, false).unwrap();
        let written = CatalogConfig::load_file(&path).unwrap();
        assert_eq!(written, CatalogConfig::default());

        assert!(init(&workspace, false).is_err());
        assert!(init(&workspace, true).is_ok());
    }
}
