//! Handlebars engine for scaffolding templates.
//!
//! Renders the starter `*.collection.yml` manifest and the `SKILL.md`
//! skeleton. Output is Markdown and YAML, so HTML escaping is disabled.
//!
//! # Examples
//!
//! ```
//! use catalog_codegen::template_engine::{SkillTemplate, TemplateEngine};
//!
//! let engine = TemplateEngine::new().unwrap();
//! let skill_md = engine
//!     .render_skill(&SkillTemplate {
//!         name: "pdf-tools".to_string(),
//!         description: "Split and merge PDF files".to_string(),
//!         title: "PDF Tools".to_string(),
//!     })
//!     .unwrap();
//!
//! assert!(skill_md.starts_with("---\nname: pdf-tools\n"));
//! assert!(skill_md.contains("# PDF Tools"));
//! ```

use catalog_core::{Error, Result};
use handlebars::Handlebars;
use serde::Serialize;

const COLLECTION_TEMPLATE: &str = "collection";
const SKILL_TEMPLATE: &str = "skill";

/// Values of the starter collection manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollectionTemplate {
    /// Collection id
    pub id: String,
    /// Display name
    pub name: String,
    /// One-line description
    pub description: String,
    /// Tags, already joined with `, `
    pub tags: String,
}

/// Values of the `SKILL.md` skeleton.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillTemplate {
    /// Skill name, also the folder name
    pub name: String,
    /// Description placed in the front-matter
    pub description: String,
    /// Top-level heading
    pub title: String,
}

/// Template engine with the built-in scaffolding templates registered.
#[derive(Debug)]
pub struct TemplateEngine<'a> {
    handlebars: Handlebars<'a>,
}

impl<'a> TemplateEngine<'a> {
    /// Creates an engine with every built-in template registered.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TemplateError`] if a built-in template fails to
    /// compile.
    pub fn new() -> Result<Self> {
        let mut handlebars = Handlebars::new();

        // Strict mode: fail on missing variables
        handlebars.set_strict_mode(true);
        handlebars.register_escape_fn(handlebars::no_escape);

        Self::register_templates(&mut handlebars)?;

        Ok(Self { handlebars })
    }

    fn register_templates(handlebars: &mut Handlebars<'a>) -> Result<()> {
        let templates = [
            (
                COLLECTION_TEMPLATE,
                include_str!("../templates/collection.yml.hbs"),
            ),
            (SKILL_TEMPLATE, include_str!("../templates/skill.md.hbs")),
        ];

        for (name, source) in templates {
            handlebars
                .register_template_string(name, source)
                .map_err(|e| Error::TemplateError {
                    template: name.to_string(),
                    message: format!("failed to register template: {e}"),
                })?;
        }

        Ok(())
    }

    /// Renders the starter collection manifest.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TemplateError`] if rendering fails.
    pub fn render_collection(&self, context: &CollectionTemplate) -> Result<String> {
        self.render(COLLECTION_TEMPLATE, context)
    }

    /// Renders the `SKILL.md` skeleton.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TemplateError`] if rendering fails.
    pub fn render_skill(&self, context: &SkillTemplate) -> Result<String> {
        self.render(SKILL_TEMPLATE, context)
    }

    fn render<T: Serialize>(&self, template: &str, context: &T) -> Result<String> {
        self.handlebars
            .render(template, context)
            .map_err(|e| Error::TemplateError {
                template: template.to_string(),
                message: e.to_string(),
            })
    }

    /// Checks if a template is registered.
    #[must_use]
    pub fn has_template(&self, name: &str) -> bool {
        self.handlebars.has_template(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_templates_registered() {
        let engine = TemplateEngine::new().unwrap();
        assert!(engine.has_template("collection"));
        assert!(engine.has_template("skill"));
        assert!(!engine.has_template("missing"));
    }

    #[test]
    fn test_render_collection_is_valid_yaml() {
        let engine = TemplateEngine::new().unwrap();
        let yaml = engine
            .render_collection(&CollectionTemplate {
                id: "git-tools".to_string(),
                name: "Git Tools".to_string(),
                description: "Git helpers".to_string(),
                tags: "git, tools".to_string(),
            })
            .unwrap();

        assert!(yaml.starts_with("id: git-tools\nname: Git Tools\n"));
        assert!(yaml.contains("tags: [git, tools]\n"));

        let value: serde_yaml::Value = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(value["display"]["ordering"].as_str(), Some("alpha"));
        assert_eq!(value["display"]["show_badge"].as_bool(), Some(false));
        assert!(value["items"].is_null());
    }

    #[test]
    fn test_render_does_not_escape_markup() {
        let engine = TemplateEngine::new().unwrap();
        let skill = engine
            .render_skill(&SkillTemplate {
                name: "a-b".to_string(),
                description: "Handles <xml> & \"quotes\"".to_string(),
                title: "A B".to_string(),
            })
            .unwrap();
        assert!(skill.contains("description: Handles <xml> & \"quotes\"\n"));
        assert!(skill.contains("## Limitations"));
    }
}
