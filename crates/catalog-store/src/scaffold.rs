//! Starter files for new collections and skills.

use catalog_codegen::TemplateEngine;
use catalog_codegen::template_engine::{CollectionTemplate, SkillTemplate};
use catalog_core::types::{SKILL_DESCRIPTION_MAX_LENGTH, SKILL_DESCRIPTION_MIN_LENGTH};
use catalog_core::{CollectionId, Error, RepoLayout, Result, SkillName};
use catalog_files::write_if_changed;
use catalog_parser::title_case_name;
use std::path::PathBuf;
use tracing::info;

const DEFAULT_TAG_COUNT: usize = 3;

/// Splits a comma-separated tag list, dropping empty entries.
///
/// # Examples
///
/// ```
/// use catalog_store::scaffold::parse_tags;
///
/// assert_eq!(parse_tags("git, vcs,,review "), ["git", "vcs", "review"]);
/// ```
#[must_use]
pub fn parse_tags(tags: &str) -> Vec<String> {
    tags.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

/// Values of a new collection manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionScaffold {
    /// Collection id and file stem
    pub id: CollectionId,
    /// Display name
    pub name: String,
    /// One-line description
    pub description: String,
    /// Tags
    pub tags: Vec<String>,
}

impl CollectionScaffold {
    /// Scaffold with every value derived from `id`.
    ///
    /// # Examples
    ///
    /// ```
    /// use catalog_core::CollectionId;
    /// use catalog_store::scaffold::CollectionScaffold;
    ///
    /// let scaffold = CollectionScaffold::new(CollectionId::new("azure-devops-pipelines-ci").unwrap());
    /// assert_eq!(scaffold.name, "Azure Devops Pipelines Ci");
    /// assert_eq!(scaffold.tags, ["azure", "devops", "pipelines"]);
    /// ```
    #[must_use]
    pub fn new(id: CollectionId) -> Self {
        let name = title_case_name(id.as_str());
        let description = format!(
            "A collection of prompts, instructions, and agents related to {}.",
            name.to_lowercase()
        );
        let tags = id
            .as_str()
            .split('-')
            .filter(|segment| !segment.is_empty())
            .take(DEFAULT_TAG_COUNT)
            .map(str::to_string)
            .collect();
        Self {
            id,
            name,
            description,
            tags,
        }
    }

    /// Replaces the derived tags unless `tags` is empty.
    #[must_use]
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        if !tags.is_empty() {
            self.tags = tags;
        }
        self
    }

    /// Repository-relative manifest path.
    #[must_use]
    pub fn relative_path(&self) -> String {
        format!("collections/{}", self.id.manifest_file_name())
    }
}

/// Writes `collections/<id>.collection.yml`.
///
/// # Errors
///
/// Returns [`Error::AlreadyExists`] if the manifest exists, or an I/O or
/// template error if it cannot be rendered or written.
pub fn create_collection(
    layout: &RepoLayout,
    engine: &TemplateEngine<'_>,
    scaffold: &CollectionScaffold,
) -> Result<PathBuf> {
    let path = layout.resolve(&scaffold.relative_path());
    if path.exists() {
        return Err(Error::AlreadyExists { path });
    }

    let content = engine.render_collection(&CollectionTemplate {
        id: scaffold.id.to_string(),
        name: scaffold.name.clone(),
        description: scaffold.description.clone(),
        tags: scaffold.tags.join(", "),
    })?;
    write_if_changed(&path, &content)?;

    info!("Created collection {}", path.display());
    Ok(path)
}

/// Values of a new skill.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillScaffold {
    /// Folder name and front-matter `name`
    pub name: SkillName,
    /// Trimmed description
    pub description: String,
    /// Heading of `SKILL.md`
    pub title: String,
}

impl SkillScaffold {
    /// Validates the description and derives the title from the name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ValidationError`] if the trimmed description is
    /// shorter than 10 or longer than 1024 characters.
    pub fn new(name: SkillName, description: &str) -> Result<Self> {
        let description = description.trim();
        let length = description.chars().count();
        if !(SKILL_DESCRIPTION_MIN_LENGTH..=SKILL_DESCRIPTION_MAX_LENGTH).contains(&length) {
            return Err(Error::ValidationError {
                field: "description".to_string(),
                reason: format!(
                    "must be between {SKILL_DESCRIPTION_MIN_LENGTH} and {SKILL_DESCRIPTION_MAX_LENGTH} characters"
                ),
            });
        }
        Ok(Self {
            title: title_case_name(name.as_str()),
            name,
            description: description.to_string(),
        })
    }

    /// Overrides the derived title when `title` is non-blank.
    #[must_use]
    pub fn with_title(mut self, title: Option<&str>) -> Self {
        if let Some(title) = title.map(str::trim).filter(|t| !t.is_empty()) {
            self.title = title.to_string();
        }
        self
    }
}

/// Writes `skills/<name>/SKILL.md`.
///
/// # Errors
///
/// Returns [`Error::AlreadyExists`] if the skill folder exists, or an I/O
/// or template error if it cannot be rendered or written.
pub fn create_skill(layout: &RepoLayout, engine: &TemplateEngine<'_>, scaffold: &SkillScaffold) -> Result<PathBuf> {
    let folder = layout.resolve(&format!("skills/{}", scaffold.name));
    if folder.exists() {
        return Err(Error::AlreadyExists { path: folder });
    }

    let content = engine.render_skill(&SkillTemplate {
        name: scaffold.name.to_string(),
        description: scaffold.description.clone(),
        title: scaffold.title.clone(),
    })?;
    let path = folder.join("SKILL.md");
    write_if_changed(&path, &content)?;

    info!("Created skill {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_collection_defaults() {
        let scaffold = CollectionScaffold::new(CollectionId::new("git-tools").unwrap());
        assert_eq!(scaffold.name, "Git Tools");
        assert_eq!(
            scaffold.description,
            "A collection of prompts, instructions, and agents related to git tools."
        );
        assert_eq!(scaffold.tags, ["git", "tools"]);
        assert_eq!(scaffold.relative_path(), "collections/git-tools.collection.yml");
    }

    #[test]
    fn test_with_empty_tags_keeps_defaults() {
        let scaffold = CollectionScaffold::new(CollectionId::new("git-tools").unwrap()).with_tags(Vec::new());
        assert_eq!(scaffold.tags, ["git", "tools"]);
    }

    #[test]
    fn test_create_collection_refuses_existing() {
        let temp = TempDir::new().unwrap();
        let layout = RepoLayout::new(temp.path());
        let engine = TemplateEngine::new().unwrap();
        let scaffold = CollectionScaffold::new(CollectionId::new("git-tools").unwrap())
            .with_tags(vec!["git".to_string(), "vcs".to_string()]);

        let path = create_collection(&layout, &engine, &scaffold).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("id: git-tools"));
        assert!(content.contains("git, vcs"));

        let err = create_collection(&layout, &engine, &scaffold).unwrap_err();
        assert!(err.is_already_exists());
    }

    #[test]
    fn test_skill_description_bounds() {
        let name = SkillName::new("pdf-tools").unwrap();
        assert!(SkillScaffold::new(name.clone(), "   too short   ").is_err());
        assert!(SkillScaffold::new(name.clone(), &"x".repeat(1025)).is_err());

        let scaffold = SkillScaffold::new(name, "  Reads and fills PDF forms  ").unwrap();
        assert_eq!(scaffold.description, "Reads and fills PDF forms");
        assert_eq!(scaffold.title, "Pdf Tools");
        assert_eq!(scaffold.with_title(Some("PDF Tools")).title, "PDF Tools");
    }

    #[test]
    fn test_create_skill_writes_skill_md() {
        let temp = TempDir::new().unwrap();
        let layout = RepoLayout::new(temp.path());
        let engine = TemplateEngine::new().unwrap();
        let scaffold =
            SkillScaffold::new(SkillName::new("pdf-tools").unwrap(), "Reads and fills PDF forms").unwrap();

        let path = create_skill(&layout, &engine, &scaffold).unwrap();
        assert_eq!(path, temp.path().join("skills/pdf-tools/SKILL.md"));
        let content = std::fs::read_to_string(path).unwrap();
        assert!(content.starts_with("---\nname: pdf-tools\n"));

        assert!(create_skill(&layout, &engine, &scaffold).unwrap_err().is_already_exists());
    }
}
