//! `collection new` command.

use anyhow::{Context, Result, bail};
use catalog_codegen::TemplateEngine;
use catalog_core::CollectionId;
use catalog_core::cli::{ExitCode, OutputFormat};
use catalog_store::scaffold::{CollectionScaffold, create_collection, parse_tags};
use colored::Colorize;
use dialoguer::Input;
use serde::Serialize;

use super::common::{Workspace, can_prompt};
use crate::actions::CollectionAction;

/// Result of creating a collection.
#[derive(Debug, Serialize)]
pub struct CreatedCollection {
    /// Collection id
    pub id: String,
    /// Repository-relative manifest path
    pub path: String,
    /// Tags written into the manifest
    pub tags: Vec<String>,
}

fn prompt_id() -> Result<String> {
    Input::new()
        .with_prompt("Collection ID (lowercase, hyphens only)")
        .validate_with(|input: &String| CollectionId::new(input.trim()).map(|_| ()).map_err(|e| e.to_string()))
        .interact_text()
        .context("failed to read collection id")
}

fn prompt_tags(default: &[String]) -> Result<String> {
    Input::new()
        .with_prompt("Tags (comma-separated, optional)")
        .default(default.join(", "))
        .allow_empty(true)
        .interact_text()
        .context("failed to read tags")
}

/// Creates the manifest described by the arguments.
///
/// # Errors
///
/// Returns an error if the id is invalid or missing, or the manifest
/// exists already.
pub fn create(
    workspace: &Workspace,
    id: Option<String>,
    tags: Option<String>,
    interactive: bool,
) -> Result<CreatedCollection> {
    let id = match id {
        Some(id) => id,
        None if interactive => prompt_id()?,
        None => bail!("a collection id is required (pass --id or run interactively)"),
    };
    let id = CollectionId::new(id.trim()).context("invalid collection id")?;

    let mut scaffold = CollectionScaffold::new(id);
    let tags = match tags {
        Some(tags) => Some(tags),
        None if interactive => Some(prompt_tags(&scaffold.tags)?),
        None => None,
    };
    if let Some(tags) = tags {
        scaffold = scaffold.with_tags(parse_tags(&tags));
    }

    let engine = TemplateEngine::new().context("failed to load templates")?;
    let path = create_collection(&workspace.layout, &engine, &scaffold)
        .with_context(|| format!("failed to create collection '{}'", scaffold.id))?;

    Ok(CreatedCollection {
        id: scaffold.id.to_string(),
        path: workspace.layout.relative(&path),
        tags: scaffold.tags,
    })
}

/// Runs a `collection` action.
///
/// # Errors
///
/// Returns an error if the collection cannot be created.
pub fn run(workspace: &Workspace, action: CollectionAction, output_format: OutputFormat) -> Result<ExitCode> {
    let CollectionAction::New {
        id,
        tags,
        id_arg,
        tags_arg,
        yes,
    } = action;

    let created = create(workspace, id.or(id_arg), tags.or(tags_arg), can_prompt(yes))?;

    if output_format == OutputFormat::Pretty {
        println!("{} Created collection template: {}", "✅".green(), created.path.bold());
        println!();
        println!("Next steps:");
        println!("1. Edit {} to add your collection items", created.path);
        println!("2. Update the name, description, and tags as needed");
        println!("3. Run 'copilot-catalog validate' to check the collection");
        println!("4. Run 'copilot-catalog readme' to generate documentation");
    } else {
        println!("{}", crate::formatters::format_output(&created, output_format)?);
    }
    Ok(ExitCode::SUCCESS)
}
