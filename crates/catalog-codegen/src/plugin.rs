//! Plugin and marketplace documents.
//!
//! A plugin is a collection packaged for the Copilot CLI: a `plugin.json`
//! manifest, a README describing what is included, and links to the
//! collection's prompts, agents, skills and hooks. This module renders the
//! documents; materializing the directory is left to the store.

use crate::markdown::escape_cell;
use catalog_core::config::{MarketplaceConfig, PluginConfig};
use catalog_core::{ArtifactKind, Error, Result};
use catalog_parser::{Artifact, ArtifactMeta, CollectionSource};
use serde::{Deserialize, Serialize};

const DEFAULT_PLUGIN_VERSION: &str = "1.0.0";

fn default_version() -> String {
    DEFAULT_PLUGIN_VERSION.to_string()
}

fn pretty_json<T: Serialize>(value: &T) -> Result<String> {
    let mut json = serde_json::to_string_pretty(value).map_err(Error::from)?;
    json.push('\n');
    Ok(json)
}

/// `author` of a plugin manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginAuthor {
    /// Author name
    #[serde(default)]
    pub name: String,
}

/// `.github/plugin/plugin.json`
///
/// # Examples
///
/// ```
/// use catalog_codegen::plugin::PluginManifest;
///
/// let manifest: PluginManifest = serde_json::from_str(r#"{"name": "git-tools"}"#).unwrap();
/// assert_eq!(manifest.version, "1.0.0");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginManifest {
    /// Plugin name, the collection id
    pub name: String,
    /// Collection description
    #[serde(default)]
    pub description: String,
    /// Plugin version
    #[serde(default = "default_version")]
    pub version: String,
    /// Plugin author
    #[serde(default)]
    pub author: PluginAuthor,
    /// Source repository URL
    #[serde(default)]
    pub repository: String,
    /// License identifier
    #[serde(default)]
    pub license: String,
}

impl PluginManifest {
    /// Manifest of the plugin built from `source`.
    #[must_use]
    pub fn for_collection(source: &CollectionSource, config: &PluginConfig, repository: &str) -> Self {
        Self {
            name: source.id.clone(),
            description: source.manifest.description_text().unwrap_or_default().to_string(),
            version: config.version.clone(),
            author: PluginAuthor {
                name: config.author.clone(),
            },
            repository: repository.to_string(),
            license: config.license.clone(),
        }
    }

    /// Pretty JSON with a trailing newline.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        pretty_json(self)
    }
}

/// One collection item that made it into a plugin.
#[derive(Debug, Clone, PartialEq)]
pub struct PluginItem {
    /// Item kind
    pub kind: ArtifactKind,
    /// File stem or folder name used inside the plugin
    pub name: String,
    /// Parsed artifact, if it loaded
    pub artifact: Option<Artifact>,
}

impl PluginItem {
    fn description(&self) -> String {
        let Some(artifact) = &self.artifact else {
            return self.name.clone();
        };
        let fallback = match &artifact.meta {
            ArtifactMeta::Prompt(meta) => meta.title.clone(),
            ArtifactMeta::Agent(meta) => meta.name.clone(),
            ArtifactMeta::Hook(meta) => Some(meta.name.clone()).filter(|name| !name.is_empty()),
            _ => None,
        };
        artifact
            .description
            .clone()
            .filter(|description| !description.is_empty())
            .or(fallback)
            .unwrap_or_else(|| self.name.clone())
    }

    fn events(&self) -> String {
        match self.artifact.as_ref().map(|artifact| &artifact.meta) {
            Some(ArtifactMeta::Hook(meta)) if !meta.events.is_empty() => meta.events.join(", "),
            _ => "N/A".to_string(),
        }
    }
}

fn push_table(lines: &mut Vec<String>, heading: &str, header: &str, rows: Vec<String>) {
    if rows.is_empty() {
        return;
    }
    lines.push(format!("### {heading}"));
    lines.push(String::new());
    lines.extend(header.lines().map(str::to_string));
    lines.extend(rows);
    lines.push(String::new());
}

fn items_of(items: &[PluginItem], kind: ArtifactKind) -> impl Iterator<Item = &PluginItem> {
    items.iter().filter(move |item| item.kind == kind)
}

/// Plugin `README.md`.
#[must_use]
pub fn plugin_readme(source: &CollectionSource, items: &[PluginItem], marketplace: &str, license: &str) -> String {
    let id = &source.id;
    let mut lines = vec![
        format!("# {} Plugin", source.name()),
        String::new(),
        source.manifest.description_text().unwrap_or_default().to_string(),
        String::new(),
        "## Installation".to_string(),
        String::new(),
        "```bash".to_string(),
        "# Using Copilot CLI".to_string(),
        format!("copilot plugin install {id}@{marketplace}"),
        "```".to_string(),
        String::new(),
        "## What's Included".to_string(),
        String::new(),
    ];

    let commands = items_of(items, ArtifactKind::Prompt)
        .map(|item| format!("| `/{id}:{}` | {} |", item.name, escape_cell(&item.description())))
        .collect();
    push_table(
        &mut lines,
        "Commands (Slash Commands)",
        "| Command | Description |\n|---------|-------------|",
        commands,
    );

    let agents = items_of(items, ArtifactKind::Agent)
        .map(|item| format!("| `{}` | {} |", item.name, escape_cell(&item.description())))
        .collect();
    push_table(&mut lines, "Agents", "| Agent | Description |\n|-------|-------------|", agents);

    let hooks = items_of(items, ArtifactKind::Hook)
        .map(|item| {
            format!(
                "| `{}` | {} | {} |",
                item.name,
                escape_cell(&item.description()),
                item.events()
            )
        })
        .collect();
    push_table(
        &mut lines,
        "Hooks",
        "| Hook | Description | Event |\n|------|-------------|-------|",
        hooks,
    );

    let skills = items_of(items, ArtifactKind::Skill)
        .map(|item| format!("| `{}` | {} |", item.name, escape_cell(&item.description())))
        .collect();
    push_table(&mut lines, "Skills", "| Skill | Description |\n|-------|-------------|", skills);

    lines.extend([
        "## Source".to_string(),
        String::new(),
        "This plugin is part of [Awesome Copilot](https://github.com/github/awesome-copilot), \
         a community-driven collection of GitHub Copilot extensions."
            .to_string(),
        String::new(),
        "## License".to_string(),
        String::new(),
        license.to_string(),
    ]);

    let mut readme = lines.join("\n");
    readme.push('\n');
    readme
}

/// `metadata` of the marketplace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketplaceMetadata {
    /// Marketplace description
    pub description: String,
    /// Marketplace version
    pub version: String,
    /// Directory holding the plugins
    pub plugin_root: String,
}

/// `owner` of the marketplace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarketplaceOwner {
    /// Owner name
    pub name: String,
    /// Contact address
    pub email: String,
}

/// One listed plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarketplacePlugin {
    /// Plugin name
    pub name: String,
    /// `./plugins/<dir>`
    pub source: String,
    /// Plugin description
    pub description: String,
    /// Plugin version
    pub version: String,
}

impl MarketplacePlugin {
    /// Listing for the plugin in `plugins/<dir_name>`.
    #[must_use]
    pub fn from_manifest(dir_name: &str, manifest: &PluginManifest) -> Self {
        let version = if manifest.version.is_empty() {
            default_version()
        } else {
            manifest.version.clone()
        };
        Self {
            name: manifest.name.clone(),
            source: format!("./plugins/{dir_name}"),
            description: manifest.description.clone(),
            version,
        }
    }
}

/// `.github/plugin/marketplace.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Marketplace {
    /// Marketplace name
    pub name: String,
    /// Metadata block
    pub metadata: MarketplaceMetadata,
    /// Owner block
    pub owner: MarketplaceOwner,
    /// Listed plugins, sorted by directory
    pub plugins: Vec<MarketplacePlugin>,
}

impl Marketplace {
    /// Marketplace listing `plugins`.
    #[must_use]
    pub fn new(config: &MarketplaceConfig, plugins: Vec<MarketplacePlugin>) -> Self {
        Self {
            name: config.name.clone(),
            metadata: MarketplaceMetadata {
                description: config.description.clone(),
                version: config.version.clone(),
                plugin_root: "./plugins".to_string(),
            },
            owner: MarketplaceOwner {
                name: config.owner_name.clone(),
                email: config.owner_email.clone(),
            },
            plugins,
        }
    }

    /// Pretty JSON with a trailing newline.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        pretty_json(self)
    }
}
