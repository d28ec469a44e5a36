//! Per-category sections and the standalone `docs/README.<category>.md`
//! pages built from them.
//!
//! Every section is `{header}\n{usage}\n\n{table}`; a category without
//! entries yields `None` and its page falls back to the "no entries" body.

use crate::context::GenerationContext;
use crate::markdown::{encode_uri, escape_cell, install_badges, promote_heading, table_header, table_row};
use crate::readme::mcp_links::mcp_server_links;
use crate::text::TextTable;
use catalog_core::ArtifactKind;
use catalog_parser::{Artifact, ArtifactMeta, CollectionSource, compare_titles, mcp_server_configs};

fn section(header: &str, usage: &str, table: &str) -> String {
    format!("{header}\n{usage}\n\n{table}")
}

/// Title cell: link to the artifact plus install badges.
fn title_cell(ctx: &GenerationContext, artifact: &Artifact) -> String {
    let kind = artifact.kind();
    let link = encode_uri(&format!("{}/{}", kind.directory(), artifact.file_name));
    let title = escape_cell(&artifact.title);
    match kind.install_type() {
        Some(install_type) => format!(
            "[{title}](../{link})<br />{}",
            install_badges(ctx.raw_base_url(), &link, install_type)
        ),
        None => format!("[{title}](../{link})"),
    }
}

/// Description used for instructions without one: the last title word,
/// singularized, followed by the fallback suffix.
fn instruction_fallback(title: &str, text: &TextTable) -> String {
    let last = title.split(' ').next_back().unwrap_or_default();
    let topic = last.strip_suffix('s').unwrap_or(last);
    escape_cell(&format!("{topic} {}", text.instruction_fallback))
}

fn description_cell(artifact: &Artifact) -> String {
    artifact.description.as_deref().map(escape_cell).unwrap_or_default()
}

/// Custom instructions section.
#[must_use]
pub fn instructions_section(ctx: &GenerationContext, instructions: &[Artifact]) -> Option<String> {
    if instructions.is_empty() {
        return None;
    }
    let text = ctx.text();
    let mut table = table_header(&[
        (text.column_title.as_str(), "-----"),
        (text.column_description.as_str(), "-----------"),
    ]);
    for instruction in instructions {
        let description = instruction.description.as_deref().map_or_else(
            || instruction_fallback(&instruction.title, text),
            escape_cell,
        );
        table.push_str(&table_row(&[&title_cell(ctx, instruction), &description]));
    }
    Some(section(&text.instructions_section, &text.instructions_usage, &table))
}

/// Reusable prompts section.
#[must_use]
pub fn prompts_section(ctx: &GenerationContext, prompts: &[Artifact]) -> Option<String> {
    if prompts.is_empty() {
        return None;
    }
    let text = ctx.text();
    let mut table = table_header(&[
        (text.column_title.as_str(), "-----"),
        (text.column_description.as_str(), "-----------"),
    ]);
    for prompt in prompts {
        table.push_str(&table_row(&[&title_cell(ctx, prompt), &description_cell(prompt)]));
    }
    Some(section(&text.prompts_section, &text.prompts_usage, &table))
}

/// Custom agents section, with the MCP servers column.
#[must_use]
pub fn agents_section(ctx: &GenerationContext, agents: &[Artifact]) -> Option<String> {
    if agents.is_empty() {
        return None;
    }
    let text = ctx.text();
    let mut table = table_header(&[
        (text.column_title.as_str(), "-----"),
        (text.column_description.as_str(), "-----------"),
        (text.column_mcp_servers.as_str(), "-----------"),
    ]);
    for agent in agents {
        let servers = agent
            .as_agent()
            .map(|meta| mcp_server_configs(&meta.mcp_servers))
            .unwrap_or_default();
        table.push_str(&table_row(&[
            &title_cell(ctx, agent),
            &description_cell(agent),
            &mcp_server_links(&servers, ctx.registry()),
        ]));
    }
    Some(section(&text.agents_section, &text.agents_usage, &table))
}

fn assets_cell(assets: &[String], text: &TextTable) -> String {
    if assets.is_empty() {
        return text.no_assets.clone();
    }
    assets
        .iter()
        .map(|asset| format!("`{}`", escape_cell(asset)))
        .collect::<Vec<_>>()
        .join("<br />")
}

fn folder_link(artifact: &Artifact) -> String {
    encode_uri(&artifact.document_path)
}

/// Agent skills section.
#[must_use]
pub fn skills_section(ctx: &GenerationContext, skills: &[Artifact]) -> Option<String> {
    if skills.is_empty() {
        return None;
    }
    let text = ctx.text();
    let mut table = table_header(&[
        (text.column_name.as_str(), "----"),
        (text.column_description.as_str(), "-----------"),
        (text.column_bundled_assets.as_str(), "--------------"),
    ]);
    for skill in skills {
        let ArtifactMeta::Skill(meta) = &skill.meta else {
            continue;
        };
        table.push_str(&table_row(&[
            &format!("[{}](../{})", escape_cell(&meta.name), folder_link(skill)),
            &escape_cell(&meta.description),
            &assets_cell(&meta.assets, text),
        ]));
    }
    Some(section(&text.skills_section, &text.skills_usage, &table))
}

/// Hooks section.
#[must_use]
pub fn hooks_section(ctx: &GenerationContext, hooks: &[Artifact]) -> Option<String> {
    if hooks.is_empty() {
        return None;
    }
    let text = ctx.text();
    let mut table = table_header(&[
        (text.column_name.as_str(), "----"),
        (text.column_description.as_str(), "-----------"),
        (text.column_events.as_str(), "------"),
        (text.column_bundled_assets.as_str(), "--------------"),
    ]);
    for hook in hooks {
        let ArtifactMeta::Hook(meta) = &hook.meta else {
            continue;
        };
        let events = if meta.events.is_empty() {
            text.not_applicable.clone()
        } else {
            escape_cell(&meta.events.join(", "))
        };
        table.push_str(&table_row(&[
            &format!("[{}](../{})", escape_cell(&meta.name), folder_link(hook)),
            &escape_cell(&meta.description),
            &events,
            &assets_cell(&meta.assets, text),
        ]));
    }
    Some(section(&text.hooks_section, &text.hooks_usage, &table))
}

/// Collections ordered featured first, each group by name.
#[must_use]
pub fn sorted_collections(collections: &[CollectionSource]) -> Vec<&CollectionSource> {
    let mut sorted: Vec<&CollectionSource> = collections.iter().collect();
    sorted.sort_by(|a, b| {
        b.manifest
            .is_featured()
            .cmp(&a.manifest.is_featured())
            .then_with(|| compare_titles(&a.name(), &b.name()))
    });
    sorted
}

/// Collections table with the given link prefix; featured names get a
/// star when `star_featured` is set.
#[must_use]
pub fn collections_table(
    text: &TextTable,
    collections: &[&CollectionSource],
    link_prefix: &str,
    star_featured: bool,
) -> String {
    let mut table = table_header(&[
        (text.column_name.as_str(), "----"),
        (text.column_description.as_str(), "-----------"),
        (text.column_items.as_str(), "-----"),
        (text.column_tags.as_str(), "----"),
    ]);
    for collection in collections {
        let manifest = &collection.manifest;
        let name = escape_cell(&collection.name());
        let display_name = if star_featured && manifest.is_featured() {
            format!("⭐ {name}")
        } else {
            name
        };
        let description = manifest
            .description_text()
            .map_or_else(|| text.no_description_provided.clone(), escape_cell);
        table.push_str(&table_row(&[
            &format!("[{display_name}]({link_prefix}{}.md)", collection.id),
            &description,
            &text.items_cell(manifest.items.len()),
            &escape_cell(&manifest.tags.join(", ")),
        ]));
    }
    table
}

/// Collections section.
#[must_use]
pub fn collections_section(ctx: &GenerationContext, collections: &[CollectionSource]) -> Option<String> {
    if collections.is_empty() {
        return None;
    }
    let text = ctx.text();
    let sorted = sorted_collections(collections);
    let table = collections_table(text, &sorted, "../collections/", true);
    Some(section(&text.collections_section, &text.collections_usage, &table))
}

/// Standalone page for a category: the section with its heading promoted,
/// or the header, usage and "no entries" text when the section is empty.
#[must_use]
pub fn category_readme(section: Option<String>, header: &str, usage: &str, text: &TextTable) -> String {
    match section {
        Some(section) if !section.trim().is_empty() => promote_heading(&section),
        _ => format!("{}\n\n{usage}\n\n{}", promote_heading(header), text.no_entries),
    }
}

/// Section header and usage text of a category page.
#[must_use]
pub fn category_text(text: &TextTable, kind: Option<ArtifactKind>) -> (&str, &str) {
    match kind {
        Some(ArtifactKind::Instruction) => (text.instructions_section.as_str(), text.instructions_usage.as_str()),
        Some(ArtifactKind::Prompt) => (text.prompts_section.as_str(), text.prompts_usage.as_str()),
        Some(ArtifactKind::Agent) => (text.agents_section.as_str(), text.agents_usage.as_str()),
        Some(ArtifactKind::Skill) => (text.skills_section.as_str(), text.skills_usage.as_str()),
        Some(ArtifactKind::Hook) => (text.hooks_section.as_str(), text.hooks_usage.as_str()),
        None => (text.collections_section.as_str(), text.collections_usage.as_str()),
    }
}
