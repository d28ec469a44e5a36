//! Inputs shared by every generator of one run.
//!
//! [`GenerationContext`] carries the repository layout, the text table and
//! the MCP registry snapshot fetched at start-up. [`Catalog`] is the parsed
//! source tree, scanned once and read by both the README and the website
//! generators.

use crate::text::TextTable;
use catalog_core::{ArtifactKind, CatalogConfig, RepoLayout, Result};
use catalog_parser::{Artifact, CollectionSource, compare_titles, scan_collections, scan_kind};
use catalog_registry::McpRegistry;
use tracing::info;

/// Everything a generator needs besides the parsed sources.
///
/// # Examples
///
/// ```
/// use catalog_codegen::GenerationContext;
/// use catalog_core::RepoLayout;
///
/// let ctx = GenerationContext::new(RepoLayout::new("/repo"), "https://raw.example.com/main");
/// assert!(ctx.registry().is_empty());
/// assert_eq!(ctx.text().column_title, "Title");
/// ```
#[derive(Debug, Clone)]
pub struct GenerationContext {
    layout: RepoLayout,
    text: TextTable,
    registry: McpRegistry,
    raw_base_url: String,
}

impl GenerationContext {
    /// Context with English text and an empty registry.
    #[must_use]
    pub fn new(layout: RepoLayout, raw_base_url: impl Into<String>) -> Self {
        Self {
            layout,
            text: TextTable::default(),
            registry: McpRegistry::empty(),
            raw_base_url: raw_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Builds a context from configuration, loading the text table override
    /// if one is configured. Relative table paths resolve against the root.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured text table cannot be loaded.
    pub fn from_config(layout: RepoLayout, config: &CatalogConfig, registry: McpRegistry) -> Result<Self> {
        let table_path = config
            .text
            .table
            .as_ref()
            .map(|path| layout.root().join(path));
        let text = TextTable::load_or_default(table_path.as_deref())?;

        Ok(Self::new(layout, config.repository.raw_base_url.clone())
            .with_text(text)
            .with_registry(registry))
    }

    /// Replaces the text table.
    #[must_use]
    pub fn with_text(mut self, text: TextTable) -> Self {
        self.text = text;
        self
    }

    /// Replaces the registry snapshot.
    #[must_use]
    pub fn with_registry(mut self, registry: McpRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Repository layout.
    #[must_use]
    pub const fn layout(&self) -> &RepoLayout {
        &self.layout
    }

    /// Text table.
    #[must_use]
    pub const fn text(&self) -> &TextTable {
        &self.text
    }

    /// MCP registry snapshot.
    #[must_use]
    pub const fn registry(&self) -> &McpRegistry {
        &self.registry
    }

    /// Raw-content base URL used by install badges, without trailing `/`.
    #[must_use]
    pub fn raw_base_url(&self) -> &str {
        &self.raw_base_url
    }
}

/// Parsed source tree. Artifacts of each kind are sorted by title.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    /// `instructions/*.instructions.md`
    pub instructions: Vec<Artifact>,
    /// `prompts/*.prompt.md`
    pub prompts: Vec<Artifact>,
    /// `agents/*.agent.md`
    pub agents: Vec<Artifact>,
    /// `skills/<folder>/`
    pub skills: Vec<Artifact>,
    /// `hooks/<folder>/`
    pub hooks: Vec<Artifact>,
    /// `collections/*.collection.yml`, in file-name order
    pub collections: Vec<CollectionSource>,
}

impl Catalog {
    /// Scans every source directory under the layout root.
    #[must_use]
    pub fn scan(layout: &RepoLayout) -> Self {
        let scan_sorted = |kind: ArtifactKind| {
            let mut artifacts = scan_kind(layout, kind);
            artifacts.sort_by(|a, b| compare_titles(&a.title, &b.title));
            info!("Found {} {} files", artifacts.len(), kind);
            artifacts
        };

        let catalog = Self {
            instructions: scan_sorted(ArtifactKind::Instruction),
            prompts: scan_sorted(ArtifactKind::Prompt),
            agents: scan_sorted(ArtifactKind::Agent),
            skills: scan_sorted(ArtifactKind::Skill),
            hooks: scan_sorted(ArtifactKind::Hook),
            collections: scan_collections(layout),
        };
        info!("Found {} collection files", catalog.collections.len());
        catalog
    }

    /// Artifacts of one kind.
    #[must_use]
    pub fn artifacts(&self, kind: ArtifactKind) -> &[Artifact] {
        match kind {
            ArtifactKind::Instruction => &self.instructions,
            ArtifactKind::Prompt => &self.prompts,
            ArtifactKind::Agent => &self.agents,
            ArtifactKind::Skill => &self.skills,
            ArtifactKind::Hook => &self.hooks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    #[test]
    fn test_raw_base_url_trailing_slash_trimmed() {
        let ctx = GenerationContext::new(RepoLayout::new("/r"), "https://raw.example.com/main/");
        assert_eq!(ctx.raw_base_url(), "https://raw.example.com/main");
    }

    #[test]
    fn test_from_config_loads_relative_text_table() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "locale/text.toml", "label_prompt = \"Prompt!\"\n");

        let mut config = CatalogConfig::default();
        config.text.table = Some("locale/text.toml".into());

        let ctx = GenerationContext::from_config(
            RepoLayout::new(temp.path()),
            &config,
            McpRegistry::empty(),
        )
        .unwrap();
        assert_eq!(ctx.text().label_prompt, "Prompt!");
    }

    #[test]
    fn test_from_config_missing_text_table_fails() {
        let temp = TempDir::new().unwrap();
        let mut config = CatalogConfig::default();
        config.text.table = Some("nope.toml".into());

        let result =
            GenerationContext::from_config(RepoLayout::new(temp.path()), &config, McpRegistry::empty());
        assert!(result.is_err());
    }

    #[test]
    fn test_scan_sorts_by_title() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "prompts/a.prompt.md", "# zeta\n");
        write(temp.path(), "prompts/b.prompt.md", "# Alpha\n");
        write(temp.path(), "prompts/c.prompt.md", "# beta\n");

        let catalog = Catalog::scan(&RepoLayout::new(temp.path()));
        let titles: Vec<&str> = catalog
            .artifacts(ArtifactKind::Prompt)
            .iter()
            .map(|a| a.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Alpha", "beta", "zeta"]);
        assert!(catalog.agents.is_empty());
    }
}
