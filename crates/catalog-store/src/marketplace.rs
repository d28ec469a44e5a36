//! Marketplace listing of the built plugins.

use catalog_codegen::plugin::{Marketplace, MarketplacePlugin, PluginManifest};
use catalog_core::config::MarketplaceConfig;
use catalog_core::{Error, RepoLayout, Result};
use catalog_files::{WriteReport, write_if_changed};
use catalog_parser::list_folders;
use tracing::{debug, info, warn};

fn read_manifest(path: &std::path::Path) -> Option<PluginManifest> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            warn!("Skipping plugin without readable {}: {}", path.display(), e);
            return None;
        }
    };
    match serde_json::from_str(&content) {
        Ok(manifest) => Some(manifest),
        Err(e) => {
            warn!("Skipping plugin with malformed {}: {}", path.display(), e);
            None
        }
    }
}

/// Lists every plugin directory that has a readable `plugin.json`.
///
/// # Errors
///
/// Returns [`Error::ResourceNotFound`] if `plugins/` does not exist.
pub fn marketplace_plugins(layout: &RepoLayout) -> Result<Vec<MarketplacePlugin>> {
    let plugins_dir = layout.plugins_dir();
    if !plugins_dir.is_dir() {
        return Err(Error::ResourceNotFound {
            resource: layout.relative(&plugins_dir),
        });
    }

    let plugins: Vec<MarketplacePlugin> = list_folders(&plugins_dir)
        .into_iter()
        .filter_map(|dir| {
            let name = dir.file_name()?.to_string_lossy().into_owned();
            let manifest = read_manifest(&dir.join(".github").join("plugin").join("plugin.json"))?;
            debug!("Found plugin: {}", name);
            Some(MarketplacePlugin::from_manifest(&name, &manifest))
        })
        .collect();

    info!("Found {} plugins", plugins.len());
    Ok(plugins)
}

/// Builds and writes `.github/plugin/marketplace.json`.
///
/// # Errors
///
/// Returns an error if `plugins/` is missing or the file cannot be written.
pub fn write_marketplace(layout: &RepoLayout, config: &MarketplaceConfig) -> Result<(Marketplace, WriteReport)> {
    let marketplace = Marketplace::new(config, marketplace_plugins(layout)?);
    let path = layout.marketplace_file();
    let outcome = write_if_changed(&path, &marketplace.to_json()?)?;

    let mut report = WriteReport::default();
    report.record(layout.relative(&path), outcome);
    Ok((marketplace, report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_files::WriteOutcome;
    use tempfile::TempDir;

    fn write(root: &std::path::Path, rel: &str, content: &str) {
        let path = root.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    #[test]
    fn test_missing_plugins_dir_is_an_error() {
        let temp = TempDir::new().unwrap();
        let err = marketplace_plugins(&RepoLayout::new(temp.path())).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_lists_sorted_readable_plugins() {
        let temp = TempDir::new().unwrap();
        write(
            temp.path(),
            "plugins/zeta/.github/plugin/plugin.json",
            r#"{"name": "zeta", "description": "Last", "version": "2.0.0"}"#,
        );
        write(
            temp.path(),
            "plugins/alpha/.github/plugin/plugin.json",
            r#"{"name": "alpha", "description": "First"}"#,
        );
        write(temp.path(), "plugins/broken/.github/plugin/plugin.json", "{not json");
        std::fs::create_dir_all(temp.path().join("plugins/empty")).unwrap();

        let layout = RepoLayout::new(temp.path());
        let (marketplace, report) = write_marketplace(&layout, &MarketplaceConfig::default()).unwrap();

        let names: Vec<&str> = marketplace.plugins.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["alpha", "zeta"]);
        assert_eq!(marketplace.plugins[0].source, "./plugins/alpha");
        assert_eq!(marketplace.plugins[0].version, "1.0.0");
        assert_eq!(marketplace.plugins[1].version, "2.0.0");
        assert_eq!(report.count(WriteOutcome::Created), 1);

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(layout.marketplace_file()).unwrap()).unwrap();
        assert_eq!(json["metadata"]["pluginRoot"], "./plugins");
        assert_eq!(json["owner"]["email"], "copilot@github.com");

        let (_, again) = write_marketplace(&layout, &MarketplaceConfig::default()).unwrap();
        assert!(again.is_noop());
    }
}
