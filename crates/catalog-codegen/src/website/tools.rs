//! `tools.json` from the hand-maintained `website/data/tools.yml`.

use crate::website::records::CategoryData;
use catalog_parser::{compare_titles, parse_yaml_file};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use std::path::Path;
use tracing::warn;

#[derive(Debug, Default, Deserialize)]
struct ToolsFile {
    #[serde(default)]
    tools: Vec<ToolSource>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ToolSource {
    id: String,
    name: String,
    description: Option<String>,
    category: Option<String>,
    featured: bool,
    requirements: Vec<String>,
    features: Vec<String>,
    links: Option<Value>,
    configuration: Option<Value>,
    tags: Vec<String>,
}

/// `tools.json` item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolRecord {
    /// Tool id
    pub id: String,
    /// Display name
    pub name: String,
    /// Description, empty when absent
    pub description: String,
    /// Category, `Other` when absent
    pub category: String,
    /// Listed first on the site
    pub featured: bool,
    /// Installation requirements
    pub requirements: Vec<String>,
    /// Feature bullet points
    pub features: Vec<String>,
    /// Named links
    pub links: Value,
    /// Free-form configuration snippet
    pub configuration: Value,
    /// Tags
    pub tags: Vec<String>,
}

/// `tools.json` filters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ToolsFilters {
    /// Categories
    pub categories: Vec<String>,
    /// Tags
    pub tags: Vec<String>,
}

/// Tools document.
pub type ToolsData = CategoryData<ToolRecord, ToolsFilters>;

fn empty() -> ToolsData {
    CategoryData {
        items: Vec::new(),
        filters: ToolsFilters::default(),
    }
}

/// Reads `tools.yml` at `path`. A missing or malformed file gives an empty
/// document.
#[must_use]
pub fn tools_data(path: &Path) -> ToolsData {
    if !path.is_file() {
        warn!("tools.yml not found at {}", path.display());
        return empty();
    }

    let file: ToolsFile = match parse_yaml_file(path)
        .map_err(|e| e.to_string())
        .and_then(|value| serde_yaml::from_value(value).map_err(|e| e.to_string()))
    {
        Ok(file) => file,
        Err(e) => {
            warn!("Skipping tools data: {}", e);
            return empty();
        }
    };

    let mut categories = BTreeSet::new();
    let mut tags = BTreeSet::new();

    let mut items: Vec<ToolRecord> = file
        .tools
        .into_iter()
        .map(|tool| {
            let category = tool.category.unwrap_or_else(|| "Other".to_string());
            categories.insert(category.clone());
            tags.extend(tool.tags.iter().cloned());
            ToolRecord {
                id: tool.id,
                name: tool.name,
                description: tool.description.unwrap_or_default(),
                category,
                featured: tool.featured,
                requirements: tool.requirements,
                features: tool.features,
                links: tool.links.unwrap_or_else(|| Value::Object(Map::new())),
                configuration: tool.configuration.unwrap_or(Value::Null),
                tags: tool.tags,
            }
        })
        .collect();

    items.sort_by(|a, b| {
        b.featured
            .cmp(&a.featured)
            .then_with(|| compare_titles(&a.name, &b.name))
    });

    CategoryData {
        items,
        filters: ToolsFilters {
            categories: categories.into_iter().collect(),
            tags: tags.into_iter().collect(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_empty() {
        let temp = TempDir::new().unwrap();
        let data = tools_data(&temp.path().join("tools.yml"));
        assert!(data.items.is_empty());
        assert!(data.filters.categories.is_empty());
    }

    #[test]
    fn test_featured_first_and_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("tools.yml");
        std::fs::write(
            &path,
            r"
tools:
  - id: zed
    name: Zed Tool
    tags: [editor]
  - id: alpha
    name: Alpha
    category: Extensions
  - id: star
    name: Star
    featured: true
    links:
      github: https://github.com/example/star
",
        )
        .unwrap();

        let data = tools_data(&path);
        let names: Vec<&str> = data.items.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Star", "Alpha", "Zed Tool"]);
        assert_eq!(data.items[2].category, "Other");
        assert_eq!(data.items[1].links, serde_json::json!({}));
        assert_eq!(data.items[0].links["github"], "https://github.com/example/star");
        assert_eq!(data.items[0].configuration, Value::Null);
        assert_eq!(data.filters.categories, vec!["Extensions", "Other"]);
        assert_eq!(data.filters.tags, vec!["editor"]);
    }
}
