//! `skill new` command.

use anyhow::{Context, Result, bail};
use catalog_codegen::TemplateEngine;
use catalog_core::SkillName;
use catalog_core::cli::{ExitCode, OutputFormat};
use catalog_store::scaffold::{SkillScaffold, create_skill};
use colored::Colorize;
use dialoguer::Input;
use serde::Serialize;

use super::common::{Workspace, can_prompt};
use crate::actions::SkillAction;

/// Result of creating a skill.
#[derive(Debug, Serialize)]
pub struct CreatedSkill {
    /// Skill name
    pub name: String,
    /// Repository-relative `SKILL.md` path
    pub path: String,
}

fn prompt(label: &str) -> Result<String> {
    Input::new()
        .with_prompt(label)
        .interact_text()
        .with_context(|| format!("failed to read {}", label.to_lowercase()))
}

/// Creates the skill described by the arguments.
///
/// # Errors
///
/// Returns an error if the name or description is invalid or missing, or
/// the skill folder exists already.
pub fn create(
    workspace: &Workspace,
    name: Option<String>,
    description: Option<String>,
    title: Option<&str>,
    interactive: bool,
) -> Result<CreatedSkill> {
    let name = match name {
        Some(name) => name,
        None if interactive => prompt("Skill name (lowercase, hyphens)")?,
        None => bail!("a skill name is required (pass --name or run interactively)"),
    };
    let name = SkillName::new(name.trim()).context("invalid skill name")?;

    let description = match description {
        Some(description) => description,
        None if interactive => prompt("Description (10 to 1024 characters)")?,
        None => bail!("a description is required (pass --description or run interactively)"),
    };

    let scaffold = SkillScaffold::new(name, &description)
        .context("invalid skill description")?
        .with_title(title);
    let engine = TemplateEngine::new().context("failed to load templates")?;
    let path = create_skill(&workspace.layout, &engine, &scaffold)
        .with_context(|| format!("failed to create skill '{}'", scaffold.name))?;

    Ok(CreatedSkill {
        name: scaffold.name.to_string(),
        path: workspace.layout.relative(&path),
    })
}

/// Runs a `skill` action.
///
/// # Errors
///
/// Returns an error if the skill cannot be created.
pub fn run(workspace: &Workspace, action: SkillAction, output_format: OutputFormat) -> Result<ExitCode> {
    let SkillAction::New {
        name,
        description,
        title,
        yes,
    } = action;

    let created = create(workspace, name, description, title.as_deref(), can_prompt(yes))?;

    if output_format == OutputFormat::Pretty {
        println!("{} Created skill: {}", "✅".green(), created.path.bold());
        println!();
        println!("Next steps:");
        println!("1. Fill in the sections of {}", created.path);
        println!("2. Add bundled assets next to SKILL.md if the skill needs them");
        println!("3. Run 'copilot-catalog readme' to list the skill");
    } else {
        println!("{}", crate::formatters::format_output(&created, output_format)?);
    }
    Ok(ExitCode::SUCCESS)
}
