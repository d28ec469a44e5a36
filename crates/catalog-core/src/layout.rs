//! Repository layout.
//!
//! Every path the generators read or write is derived from the repository
//! root through [`RepoLayout`], so tests can point the whole pipeline at a
//! temporary directory.

use crate::types::ArtifactKind;
use std::path::{Path, PathBuf};

/// Paths of a catalog repository.
///
/// # Examples
///
/// ```
/// use catalog_core::{ArtifactKind, RepoLayout};
/// use std::path::Path;
///
/// let layout = RepoLayout::new("/repo");
/// assert_eq!(layout.kind_dir(ArtifactKind::Agent), Path::new("/repo/agents"));
/// assert_eq!(layout.docs_dir(), Path::new("/repo/docs"));
/// assert_eq!(layout.relative(Path::new("/repo/agents/a.agent.md")), "agents/a.agent.md");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoLayout {
    root: PathBuf,
}

impl RepoLayout {
    /// Creates a layout rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Repository root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Source directory of an artifact kind.
    #[must_use]
    pub fn kind_dir(&self, kind: ArtifactKind) -> PathBuf {
        self.root.join(kind.directory())
    }

    /// `collections/`
    #[must_use]
    pub fn collections_dir(&self) -> PathBuf {
        self.root.join("collections")
    }

    /// `docs/`, target of the per-category READMEs.
    #[must_use]
    pub fn docs_dir(&self) -> PathBuf {
        self.root.join("docs")
    }

    /// Root `README.md` receiving the featured-collections splice.
    #[must_use]
    pub fn root_readme(&self) -> PathBuf {
        self.root.join("README.md")
    }

    /// `website/public/data`, target of the JSON documents.
    #[must_use]
    pub fn website_data_dir(&self) -> PathBuf {
        self.root.join("website").join("public").join("data")
    }

    /// `website/data/tools.yml`
    #[must_use]
    pub fn tools_file(&self) -> PathBuf {
        self.root.join("website").join("data").join("tools.yml")
    }

    /// `cookbook/cookbook.yml`
    #[must_use]
    pub fn cookbook_file(&self) -> PathBuf {
        self.root.join("cookbook").join("cookbook.yml")
    }

    /// `plugins/`
    #[must_use]
    pub fn plugins_dir(&self) -> PathBuf {
        self.root.join("plugins")
    }

    /// `.github/plugin/marketplace.json`
    #[must_use]
    pub fn marketplace_file(&self) -> PathBuf {
        self.root
            .join(".github")
            .join("plugin")
            .join("marketplace.json")
    }

    /// Resolves a repository-relative path such as a manifest item path.
    #[must_use]
    pub fn resolve(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }

    /// Repository-relative form of `path` with forward slashes.
    ///
    /// Paths outside the root are returned unchanged (still normalized).
    #[must_use]
    pub fn relative(&self, path: &Path) -> String {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_dirs() {
        let layout = RepoLayout::new("/r");
        assert_eq!(layout.kind_dir(ArtifactKind::Instruction), Path::new("/r/instructions"));
        assert_eq!(layout.kind_dir(ArtifactKind::Hook), Path::new("/r/hooks"));
    }

    #[test]
    fn test_generated_targets() {
        let layout = RepoLayout::new("/r");
        assert_eq!(layout.website_data_dir(), Path::new("/r/website/public/data"));
        assert_eq!(layout.marketplace_file(), Path::new("/r/.github/plugin/marketplace.json"));
        assert_eq!(layout.root_readme(), Path::new("/r/README.md"));
    }

    #[test]
    fn test_relative_nested() {
        let layout = RepoLayout::new("/r");
        let path = layout.resolve("skills/demo/scripts/run.sh");
        assert_eq!(layout.relative(&path), "skills/demo/scripts/run.sh");
    }

    #[test]
    fn test_relative_outside_root() {
        let layout = RepoLayout::new("/r");
        assert_eq!(layout.relative(Path::new("other/file.md")), "other/file.md");
    }
}
