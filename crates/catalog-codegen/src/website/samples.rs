//! `samples.json` from the cookbook manifest.
//!
//! Each recipe lists one variant per language whose document exists on
//! disk, with the runnable example when there is one.

use catalog_core::RepoLayout;
use catalog_parser::parse_yaml_file;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use std::path::Path;
use tracing::warn;

#[derive(Debug, Deserialize)]
struct CookbookFile {
    cookbooks: Vec<CookbookSource>,
}

#[derive(Debug, Deserialize)]
struct CookbookSource {
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    description: String,
    path: String,
    #[serde(default)]
    featured: bool,
    #[serde(default)]
    languages: Vec<Language>,
    #[serde(default)]
    recipes: Vec<RecipeSource>,
}

#[derive(Debug, Deserialize)]
struct RecipeSource {
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    tags: Vec<String>,
}

/// A cookbook language, passed through with any extra keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    /// Directory name under the cookbook path
    pub id: String,
    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Example file extension, with the leading dot
    #[serde(default)]
    pub extension: String,
    /// Keys not interpreted here
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recipe {
    /// Recipe id, also the document file stem
    pub id: String,
    /// Display name
    pub name: String,
    /// Description
    pub description: String,
    /// Tags
    pub tags: Vec<String>,
    /// `{doc, example}` keyed by language id, in language order
    pub variants: Map<String, Value>,
}

/// One cookbook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cookbook {
    /// Cookbook id
    pub id: String,
    /// Display name
    pub name: String,
    /// Description
    pub description: String,
    /// Repository-relative directory
    pub path: String,
    /// Featured on the site
    pub featured: bool,
    /// Languages the recipes are written in
    pub languages: Vec<Language>,
    /// Recipes
    pub recipes: Vec<Recipe>,
}

/// `samples.json` filters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SampleFilters {
    /// Language ids
    pub languages: Vec<String>,
    /// Recipe tags
    pub tags: Vec<String>,
}

/// `samples.json` document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SamplesData {
    /// Cookbooks in manifest order
    pub cookbooks: Vec<Cookbook>,
    /// Recipes across every cookbook
    pub total_recipes: usize,
    /// Number of cookbooks
    pub total_cookbooks: usize,
    /// Facets
    pub filters: SampleFilters,
}

fn load(path: &Path) -> Option<CookbookFile> {
    if !path.is_file() {
        warn!("cookbook/cookbook.yml not found, skipping samples");
        return None;
    }
    let parsed = parse_yaml_file(path)
        .map_err(|e| e.to_string())
        .and_then(|value| serde_yaml::from_value(value).map_err(|e| e.to_string()));
    match parsed {
        Ok(file) => Some(file),
        Err(e) => {
            warn!("Invalid cookbook.yml format: {}", e);
            None
        }
    }
}

fn variants(layout: &RepoLayout, cookbook: &CookbookSource, recipe: &RecipeSource) -> Map<String, Value> {
    let mut variants = Map::new();
    for language in &cookbook.languages {
        let doc = format!("{}/{}/{}.md", cookbook.path, language.id, recipe.id);
        if !layout.resolve(&doc).is_file() {
            continue;
        }
        let example = format!(
            "{}/{}/recipe/{}{}",
            cookbook.path, language.id, recipe.id, language.extension
        );
        let example = layout.resolve(&example).is_file().then_some(example);
        variants.insert(
            language.id.clone(),
            serde_json::json!({ "doc": doc, "example": example }),
        );
    }
    variants
}

/// Builds `samples.json` from `cookbook/cookbook.yml`.
#[must_use]
pub fn samples_data(layout: &RepoLayout) -> SamplesData {
    let Some(file) = load(&layout.cookbook_file()) else {
        return SamplesData::default();
    };

    let mut languages = BTreeSet::new();
    let mut tags = BTreeSet::new();
    let mut total_recipes = 0;

    let cookbooks: Vec<Cookbook> = file
        .cookbooks
        .into_iter()
        .map(|cookbook| {
            languages.extend(cookbook.languages.iter().map(|l| l.id.clone()));
            let recipes = cookbook
                .recipes
                .iter()
                .map(|recipe| {
                    tags.extend(recipe.tags.iter().cloned());
                    total_recipes += 1;
                    Recipe {
                        id: recipe.id.clone(),
                        name: recipe.name.clone(),
                        description: recipe.description.clone(),
                        tags: recipe.tags.clone(),
                        variants: variants(layout, &cookbook, recipe),
                    }
                })
                .collect();
            Cookbook {
                id: cookbook.id,
                name: cookbook.name,
                description: cookbook.description,
                path: cookbook.path,
                featured: cookbook.featured,
                languages: cookbook.languages,
                recipes,
            }
        })
        .collect();

    SamplesData {
        total_cookbooks: cookbooks.len(),
        cookbooks,
        total_recipes,
        filters: SampleFilters {
            languages: languages.into_iter().collect(),
            tags: tags.into_iter().collect(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    #[test]
    fn test_missing_cookbook_is_empty() {
        let temp = TempDir::new().unwrap();
        let data = samples_data(&RepoLayout::new(temp.path()));
        assert_eq!(data, SamplesData::default());
    }

    #[test]
    fn test_variants_follow_files_on_disk() {
        let temp = TempDir::new().unwrap();
        write(
            temp.path(),
            "cookbook/cookbook.yml",
            r"
cookbooks:
  - id: sdk
    name: SDK Cookbook
    description: Recipes
    path: cookbook/sdk
    languages:
      - id: python
        name: Python
        extension: .py
      - id: go
        extension: .go
    recipes:
      - id: hello
        name: Hello
        description: First steps
        tags: [basics]
",
        );
        write(temp.path(), "cookbook/sdk/python/hello.md", "# Hello\n");
        write(temp.path(), "cookbook/sdk/python/recipe/hello.py", "print()\n");
        write(temp.path(), "cookbook/sdk/go/hello.md", "# Hello\n");

        let data = samples_data(&RepoLayout::new(temp.path()));
        assert_eq!(data.total_cookbooks, 1);
        assert_eq!(data.total_recipes, 1);
        assert_eq!(data.filters.languages, vec!["go", "python"]);

        let variants = &data.cookbooks[0].recipes[0].variants;
        let keys: Vec<&String> = variants.keys().collect();
        assert_eq!(keys, vec!["python", "go"]);
        assert_eq!(variants["python"]["example"], "cookbook/sdk/python/recipe/hello.py");
        assert_eq!(variants["go"]["example"], Value::Null);

        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["totalRecipes"], 1);
        assert!(json["cookbooks"][0]["languages"][1].get("name").is_none());
    }
}
