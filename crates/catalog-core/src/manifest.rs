//! Collection manifest model.
//!
//! A manifest (`collections/<id>.collection.yml`) is a plain YAML document
//! listing curated artifacts plus display preferences. This module holds the
//! typed form used by the generators; structural validation of untrusted
//! manifests works on the raw YAML value in `catalog-store`.
//!
//! Display values are read leniently: `ordering` and `show_badge` tolerate
//! inline `#` comments and surrounding quotes left behind by hand editing.

use crate::types::ArtifactKind;
use serde::{Deserialize, Deserializer, Serialize};

/// Item ordering inside a collection README.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemOrdering {
    /// Keep manifest order
    #[default]
    Manual,
    /// Sort by resolved item title
    Alpha,
}

impl ItemOrdering {
    /// Parses a normalized ordering value.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match normalize_display_value(value).as_str() {
            "manual" => Some(Self::Manual),
            "alpha" => Some(Self::Alpha),
            _ => None,
        }
    }
}

impl<'de> Deserialize<'de> for ItemOrdering {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().and_then(Self::parse).unwrap_or_default())
    }
}

/// `display` block of a collection manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayOptions {
    /// Item ordering
    #[serde(default)]
    pub ordering: ItemOrdering,

    /// Listed first and spliced into the root README
    #[serde(default, deserialize_with = "flexible_bool")]
    pub featured: bool,

    /// Append the curated-items footer to the collection README
    #[serde(default, deserialize_with = "flexible_bool")]
    pub show_badge: bool,
}

/// One entry of `items[]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionItem {
    /// Repository-relative path of the artifact
    pub path: String,

    /// Artifact kind
    pub kind: ArtifactKind,

    /// Optional usage notes rendered under "Collection Usage"
    #[serde(default)]
    pub usage: Option<String>,
}

impl CollectionItem {
    /// Returns the usage text if it has visible content.
    #[must_use]
    pub fn usage_text(&self) -> Option<&str> {
        self.usage
            .as_deref()
            .map(str::trim)
            .filter(|usage| !usage.is_empty())
    }
}

/// Parsed collection manifest.
///
/// # Examples
///
/// ```
/// use catalog_core::{ArtifactKind, CollectionManifest};
///
/// let yaml = r#"
/// id: git-tools
/// name: Git Tools
/// description: Git helpers
/// items:
///   - path: prompts/commit.prompt.md
///     kind: prompt
/// display:
///   ordering: alpha # sorted by title
///   show_badge: "true"
/// "#;
/// let manifest: CollectionManifest = serde_yaml::from_str(yaml).unwrap();
/// assert_eq!(manifest.items[0].kind, ArtifactKind::Prompt);
/// assert!(manifest.display.show_badge);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionManifest {
    /// Collection id, falls back to the file stem
    #[serde(default)]
    pub id: Option<String>,

    /// Display name, falls back to the id
    #[serde(default)]
    pub name: Option<String>,

    /// Free-text description
    #[serde(default)]
    pub description: Option<String>,

    /// Lowercase kebab tags
    #[serde(default)]
    pub tags: Vec<String>,

    /// Curated items
    #[serde(default)]
    pub items: Vec<CollectionItem>,

    /// Display preferences
    #[serde(default)]
    pub display: DisplayOptions,

    /// Legacy top-level featured flag
    #[serde(default, deserialize_with = "flexible_bool")]
    pub featured: bool,
}

impl CollectionManifest {
    /// Resolves the collection id, using `file_stem` when the manifest has none.
    #[must_use]
    pub fn resolved_id(&self, file_stem: &str) -> String {
        self.id
            .as_deref()
            .filter(|id| !id.is_empty())
            .unwrap_or(file_stem)
            .to_string()
    }

    /// Resolves the display name, falling back to `id`.
    #[must_use]
    pub fn display_name(&self, id: &str) -> String {
        self.name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(id)
            .to_string()
    }

    /// Returns the description if present and non-empty.
    #[must_use]
    pub fn description_text(&self) -> Option<&str> {
        self.description.as_deref().filter(|d| !d.is_empty())
    }

    /// Returns `true` if the collection is featured at either level.
    #[must_use]
    pub const fn is_featured(&self) -> bool {
        self.featured || self.display.featured
    }

    /// Returns `true` if any item is an agent.
    #[must_use]
    pub fn has_agents(&self) -> bool {
        self.items.iter().any(|item| item.kind == ArtifactKind::Agent)
    }
}

/// Strips an inline `#` comment and surrounding quotes from a display value.
///
/// # Examples
///
/// ```
/// use catalog_core::manifest::normalize_display_value;
///
/// assert_eq!(normalize_display_value("alpha # sorted"), "alpha");
/// assert_eq!(normalize_display_value("\"manual\""), "manual");
/// ```
#[must_use]
pub fn normalize_display_value(value: &str) -> String {
    let mut value = value.split('#').next().unwrap_or_default().trim();
    let quoted = value.len() >= 2
        && ((value.starts_with('"') && value.ends_with('"'))
            || (value.starts_with('\'') && value.ends_with('\'')));
    if quoted {
        value = &value[1..value.len() - 1];
    }
    value.trim().to_string()
}

/// Parses a boolean written either as a YAML bool or as a string.
#[must_use]
pub fn parse_flexible_bool(value: &str) -> Option<bool> {
    match normalize_display_value(value).to_lowercase().as_str() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FlexibleBool {
    Bool(bool),
    Text(String),
}

fn flexible_bool<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(match Option::<FlexibleBool>::deserialize(deserializer)? {
        Some(FlexibleBool::Bool(value)) => value,
        Some(FlexibleBool::Text(text)) => parse_flexible_bool(&text).unwrap_or(false),
        None => false,
    })
}
