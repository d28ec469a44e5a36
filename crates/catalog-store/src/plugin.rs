//! Plugin directories built from collections.
//!
//! A plugin lives in `plugins/<collection>/` and links back to the source
//! artifacts instead of copying them, so edits to a prompt show up in every
//! plugin that includes it:
//!
//! ```text
//! plugins/git-tools/
//! ├── .github/plugin/plugin.json
//! ├── README.md
//! ├── commands/commit.md    -> ../../../prompts/commit.prompt.md
//! ├── agents/reviewer.md    -> ../../../agents/reviewer.agent.md
//! ├── skills/pdf-tools      -> ../../../skills/pdf-tools
//! └── hooks/audit           -> ../../../hooks/audit
//! ```
//!
//! Links are relative symlinks on Unix and plain copies elsewhere.

use catalog_codegen::plugin::{PluginItem, PluginManifest, plugin_readme};
use catalog_core::types::COLLECTION_SUFFIX;
use catalog_core::{ArtifactKind, CatalogConfig, Error, RepoLayout, Result};
use catalog_files::{WriteReport, write_if_changed};
use catalog_parser::{CollectionSource, item_location, list_folders, load_file, parse_collection_file};
use serde::Serialize;
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info, warn};

/// Directory guard that removes an incomplete plugin on drop.
///
/// Building a plugin touches many paths; if any step fails the partially
/// written directory is removed so the next `migrate` starts clean.
struct PluginDirGuard {
    path: PathBuf,
    cleanup: bool,
}

impl PluginDirGuard {
    const fn new(path: PathBuf) -> Self {
        Self { path, cleanup: true }
    }

    fn commit(mut self) {
        self.cleanup = false;
    }
}

impl Drop for PluginDirGuard {
    fn drop(&mut self) {
        if self.cleanup {
            if let Err(e) = fs::remove_dir_all(&self.path) {
                warn!("Failed to cleanup plugin directory {}: {}", self.path.display(), e);
            } else {
                debug!("Cleaned up incomplete plugin directory: {}", self.path.display());
            }
        }
    }
}

/// What went into one plugin.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PluginSummary {
    /// Plugin directory name, the collection file stem
    pub id: String,
    /// Repository-relative plugin directory
    pub dir: String,
    /// Prompts linked as commands
    pub commands: usize,
    /// Agents linked
    pub agents: usize,
    /// Skill folders linked
    pub skills: usize,
    /// Hook folders linked
    pub hooks: usize,
    /// Instructions left out, plugins cannot carry them
    pub instructions_skipped: usize,
    /// Item paths whose source did not exist or had the wrong shape
    pub skipped: Vec<String>,
    /// Manifest and README write outcomes
    pub files: WriteReport,
}

/// Result of refreshing every plugin.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RefreshReport {
    /// Plugins rebuilt
    pub refreshed: Vec<PluginSummary>,
    /// `(plugin, error)` for plugins that failed
    pub failed: Vec<(String, String)>,
}

impl RefreshReport {
    /// Returns `true` if some plugins failed.
    #[must_use]
    pub fn is_partial(&self) -> bool {
        !self.failed.is_empty()
    }
}

/// Relative path from directory `from` to `target`, both repository-relative.
///
/// # Examples
///
/// ```
/// use catalog_store::plugin::relative_link;
/// use std::path::Path;
///
/// assert_eq!(
///     relative_link(Path::new("plugins/git-tools/commands"), Path::new("prompts/commit.prompt.md")),
///     Path::new("../../../prompts/commit.prompt.md")
/// );
/// ```
#[must_use]
pub fn relative_link(from: &Path, target: &Path) -> PathBuf {
    let from: Vec<Component<'_>> = from.components().collect();
    let target: Vec<Component<'_>> = target.components().collect();
    let common = from.iter().zip(&target).take_while(|(a, b)| a == b).count();

    let mut link = PathBuf::new();
    for _ in common..from.len() {
        link.push("..");
    }
    for component in &target[common..] {
        link.push(component.as_os_str());
    }
    link
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> Error + '_ {
    move |source| Error::io(path, source)
}

/// Removes whatever sits at `dest`, a link, file or copied directory.
fn clear(dest: &Path) -> Result<()> {
    match fs::symlink_metadata(dest) {
        Ok(meta) if meta.is_dir() => fs::remove_dir_all(dest).map_err(io_error(dest)),
        Ok(_) => fs::remove_file(dest).map_err(io_error(dest)),
        Err(_) => Ok(()),
    }
}

/// Links `source` at `dest`, where both live under the repository root.
#[cfg(unix)]
fn link(root: &Path, source: &Path, dest: &Path) -> Result<()> {
    let dest_dir = dest.parent().unwrap_or(root);
    fs::create_dir_all(dest_dir).map_err(io_error(dest_dir))?;
    clear(dest)?;
    let from = dest_dir.strip_prefix(root).unwrap_or(dest_dir);
    let target = source.strip_prefix(root).unwrap_or(source);
    std::os::unix::fs::symlink(relative_link(from, target), dest).map_err(io_error(dest))
}

#[cfg(not(unix))]
fn link(root: &Path, source: &Path, dest: &Path) -> Result<()> {
    let dest_dir = dest.parent().unwrap_or(root);
    fs::create_dir_all(dest_dir).map_err(io_error(dest_dir))?;
    clear(dest)?;
    if source.is_file() {
        fs::copy(source, dest).map_err(io_error(dest))?;
        return Ok(());
    }
    for entry in walkdir::WalkDir::new(source) {
        let entry = entry.map_err(|e| Error::InvalidArgument(e.to_string()))?;
        let relative = entry.path().strip_prefix(source).unwrap_or(entry.path());
        let target = dest.join(relative);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).map_err(io_error(&target))?;
        } else {
            fs::copy(entry.path(), &target).map_err(io_error(&target))?;
        }
    }
    Ok(())
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Builds, refreshes and lists plugin directories.
#[derive(Debug, Clone, Copy)]
pub struct PluginStore<'a> {
    layout: &'a RepoLayout,
    config: &'a CatalogConfig,
}

impl<'a> PluginStore<'a> {
    /// Creates a store over `layout`.
    #[must_use]
    pub const fn new(layout: &'a RepoLayout, config: &'a CatalogConfig) -> Self {
        Self { layout, config }
    }

    fn plugin_dir(&self, id: &str) -> PathBuf {
        self.layout.plugins_dir().join(id)
    }

    /// Loads `collections/<id>.collection.yml`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ResourceNotFound`] if the manifest does not exist,
    /// or a parse error if it is malformed.
    pub fn collection(&self, id: &str) -> Result<CollectionSource> {
        let file_name = format!("{id}{COLLECTION_SUFFIX}");
        let path = self.layout.collections_dir().join(&file_name);
        if !path.is_file() {
            return Err(Error::ResourceNotFound {
                resource: format!("collection '{id}' ({})", self.layout.relative(&path)),
            });
        }
        let manifest = parse_collection_file(&path)?;
        Ok(CollectionSource {
            id: manifest.resolved_id(id),
            path: self.layout.relative(&path),
            file_name,
            file_stem: id.to_string(),
            manifest,
        })
    }

    /// Plugin directory names that have a matching collection, sorted.
    #[must_use]
    pub fn existing_plugins(&self) -> Vec<String> {
        list_folders(&self.layout.plugins_dir())
            .into_iter()
            .map(|dir| file_name(&dir))
            .filter(|name| {
                self.layout
                    .collections_dir()
                    .join(format!("{name}{COLLECTION_SUFFIX}"))
                    .is_file()
            })
            .collect()
    }

    /// Creates `plugins/<id>` from the collection.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AlreadyExists`] if the plugin directory exists,
    /// [`Error::ResourceNotFound`] if the collection does not, or an I/O
    /// error while linking. A failed build leaves no directory behind.
    pub fn migrate(&self, id: &str) -> Result<PluginSummary> {
        let dir = self.plugin_dir(id);
        if dir.exists() {
            return Err(Error::AlreadyExists { path: dir });
        }
        let source = self.collection(id)?;
        info!("Creating plugin from collection \"{}\"", id);
        self.build(&source, &dir)
    }

    /// Rebuilds an existing `plugins/<id>` from the collection.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ResourceNotFound`] if the plugin directory or the
    /// collection does not exist, or an I/O error while rebuilding.
    pub fn refresh(&self, id: &str) -> Result<PluginSummary> {
        let dir = self.plugin_dir(id);
        if !dir.is_dir() {
            return Err(Error::ResourceNotFound {
                resource: format!("plugin '{id}' ({})", self.layout.relative(&dir)),
            });
        }
        let source = self.collection(id)?;
        info!("Refreshing plugin \"{}\" from collection", id);
        fs::remove_dir_all(&dir).map_err(io_error(&dir))?;
        self.build(&source, &dir)
    }

    /// Refreshes every plugin with a matching collection.
    ///
    /// Failures are recorded and the remaining plugins still refreshed.
    #[must_use]
    pub fn refresh_all(&self) -> RefreshReport {
        let plugins = self.existing_plugins();
        if plugins.is_empty() {
            info!("No plugins with a matching collection found");
        }

        let mut report = RefreshReport::default();
        for id in plugins {
            match self.refresh(&id) {
                Ok(summary) => report.refreshed.push(summary),
                Err(e) => {
                    warn!("Failed to refresh plugin {}: {}", id, e);
                    report.failed.push((id, e.to_string()));
                }
            }
        }
        report
    }

    fn build(&self, source: &CollectionSource, dir: &Path) -> Result<PluginSummary> {
        let guard = PluginDirGuard::new(dir.to_path_buf());
        let root = self.layout.root();
        let manifest_dir = dir.join(".github").join("plugin");
        fs::create_dir_all(&manifest_dir).map_err(io_error(&manifest_dir))?;

        let mut summary = PluginSummary {
            id: source.file_stem.clone(),
            dir: self.layout.relative(dir),
            ..PluginSummary::default()
        };
        let mut items = Vec::new();

        for item in &source.manifest.items {
            if item.kind == ArtifactKind::Instruction {
                summary.instructions_skipped += 1;
                continue;
            }

            let location = item_location(self.layout, item.kind, &item.path);
            if !location.exists() {
                warn!("Source not found, skipping: {}", item.path);
                summary.skipped.push(item.path.clone());
                continue;
            }

            let (name, dest) = match item.kind {
                ArtifactKind::Prompt | ArtifactKind::Agent => {
                    let file = file_name(&location);
                    let stem = item.kind.strip_suffix(&file).unwrap_or(&file).to_string();
                    let subdir = if item.kind == ArtifactKind::Prompt {
                        "commands"
                    } else {
                        "agents"
                    };
                    let dest = dir.join(subdir).join(format!("{stem}.md"));
                    (stem, dest)
                }
                _ => {
                    if !location.is_dir() {
                        warn!("{} path is not a directory, skipping: {}", item.kind, item.path);
                        summary.skipped.push(item.path.clone());
                        continue;
                    }
                    let folder = file_name(&location);
                    let dest = dir.join(item.kind.directory()).join(&folder);
                    (folder, dest)
                }
            };

            link(root, &location, &dest)?;
            debug!("Linked {} -> {}", self.layout.relative(&dest), item.path);

            match item.kind {
                ArtifactKind::Prompt => summary.commands += 1,
                ArtifactKind::Agent => summary.agents += 1,
                ArtifactKind::Skill => summary.skills += 1,
                _ => summary.hooks += 1,
            }

            let artifact = match load_file(self.layout, item.kind, &location) {
                Ok(artifact) => Some(artifact),
                Err(e) => {
                    debug!("No metadata for {}: {}", item.path, e);
                    None
                }
            };
            items.push(PluginItem {
                kind: item.kind,
                name,
                artifact,
            });
        }

        let manifest = PluginManifest::for_collection(
            source,
            &self.config.plugins,
            &self.config.repository.repository_url,
        );
        let manifest_path = manifest_dir.join("plugin.json");
        let outcome = write_if_changed(&manifest_path, &manifest.to_json()?)?;
        summary.files.record(self.layout.relative(&manifest_path), outcome);

        let readme = plugin_readme(
            source,
            &items,
            &self.config.marketplace.name,
            &self.config.plugins.license,
        );
        let readme_path = dir.join("README.md");
        let outcome = write_if_changed(&readme_path, &readme)?;
        summary.files.record(self.layout.relative(&readme_path), outcome);

        if summary.instructions_skipped > 0 {
            info!(
                "Excluded {} instructions (not supported in plugins)",
                summary.instructions_skipped
            );
        }

        guard.commit();
        info!("Created plugin: {}", summary.dir);
        Ok(summary)
    }
}
