//! Per-collection README: header, items table and usage notes.

use crate::context::GenerationContext;
use crate::markdown::{escape_cell, heading_anchor, install_badges, table_header, table_row};
use crate::readme::mcp_links::mcp_server_links;
use catalog_core::{ArtifactKind, CollectionItem, ItemOrdering};
use catalog_parser::{Artifact, CollectionSource, compare_titles, load_item, mcp_server_configs, title_case_file_stem};
use std::path::Path;
use tracing::warn;

/// One manifest item with the artifact it points at, if it loaded.
struct ResolvedItem<'a> {
    item: &'a CollectionItem,
    artifact: Option<Artifact>,
    title: String,
}

impl<'a> ResolvedItem<'a> {
    fn resolve(ctx: &GenerationContext, item: &'a CollectionItem) -> Self {
        let artifact = match load_item(ctx.layout(), item.kind, &item.path) {
            Ok(artifact) => Some(artifact),
            Err(e) => {
                warn!("Could not load collection item {}: {}", item.path, e);
                None
            }
        };
        let title = artifact
            .as_ref()
            .map_or_else(|| fallback_title(item), |artifact| artifact.title.clone());
        Self {
            item,
            artifact,
            title,
        }
    }
}

/// Title of an item that failed to load, from its file or folder name.
fn fallback_title(item: &CollectionItem) -> String {
    let path = Path::new(&item.path);
    let path = match (path.file_name(), item.kind.metadata_file()) {
        (Some(name), Some(metadata)) if name == metadata => path.parent().unwrap_or(path),
        _ => path,
    };
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = item
        .kind
        .strip_suffix(&name)
        .or_else(|| name.strip_suffix(".md"))
        .unwrap_or(&name);
    title_case_file_stem(stem)
}

/// Renders `collections/<id>.md` for one manifest.
#[must_use]
pub fn collection_readme(ctx: &GenerationContext, source: &CollectionSource) -> String {
    let text = ctx.text();
    let manifest = &source.manifest;
    let name = source.name();
    let description = manifest
        .description_text()
        .unwrap_or(text.collection_no_description.as_str());

    let mut content = format!("# {name}\n\n{description}\n\n");
    if !manifest.tags.is_empty() {
        content.push_str(&format!("**{}:** {}\n\n", text.tags_label, manifest.tags.join(", ")));
    }
    content.push_str(&format!("## {}\n\n", text.items_heading));

    let has_agents = manifest.has_agents();
    let mut columns = vec![
        (text.column_title.as_str(), "-----"),
        (text.column_type.as_str(), "----"),
        (text.column_description.as_str(), "-----------"),
    ];
    if has_agents {
        columns.push((text.column_mcp_servers.as_str(), "-----------"));
    }
    content.push_str(&table_header(&columns));

    let mut items: Vec<ResolvedItem> = manifest
        .items
        .iter()
        .map(|item| ResolvedItem::resolve(ctx, item))
        .collect();
    if manifest.display.ordering == ItemOrdering::Alpha {
        items.sort_by(|a, b| compare_titles(&a.title, &b.title));
    }

    let mut usage_blocks = Vec::new();
    for resolved in &items {
        content.push_str(&item_row(ctx, resolved, has_agents));
        if let Some(usage) = resolved.item.usage_text() {
            usage_blocks.push(format!("### {}\n\n{usage}\n\n---\n\n", resolved.title));
        }
    }

    if !usage_blocks.is_empty() {
        content.push_str(&format!("\n## {}\n\n", text.usage_heading));
        content.push_str(&usage_blocks.concat());
    } else if manifest.display.show_badge {
        content.push_str("\n---\n");
    }

    if manifest.display.show_badge {
        content.push_str(&text.footer(items.len(), &name));
    }

    content
}

fn item_row(ctx: &GenerationContext, resolved: &ResolvedItem, has_agents: bool) -> String {
    let text = ctx.text();
    let item = resolved.item;
    let title = escape_cell(&resolved.title);

    let link_cell = match item.kind.install_type() {
        Some(install_type) => format!(
            "[{title}](../{})<br />{}",
            item.path,
            install_badges(ctx.raw_base_url(), &item.path, install_type)
        ),
        None => format!("[{title}](../{})", item.path),
    };

    let description = resolved
        .artifact
        .as_ref()
        .and_then(|artifact| artifact.description.as_deref())
        .map_or_else(|| text.item_no_description.clone(), escape_cell);
    let description = if item.usage_text().is_some() {
        format!(
            "{description} [{}](#{})",
            text.see_usage,
            heading_anchor(&resolved.title)
        )
    } else {
        description
    };

    let kind_label = text.kind_label(item.kind);
    if !has_agents {
        return table_row(&[&link_cell, kind_label, &description]);
    }

    let servers = match (&resolved.artifact, item.kind) {
        (Some(artifact), ArtifactKind::Agent) => artifact
            .as_agent()
            .map(|meta| mcp_server_configs(&meta.mcp_servers))
            .unwrap_or_default(),
        _ => Vec::new(),
    };
    table_row(&[
        &link_cell,
        kind_label,
        &description,
        &mcp_server_links(&servers, ctx.registry()),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_title_strips_kind_suffix() {
        let item = CollectionItem {
            path: "prompts/missing-thing.prompt.md".to_string(),
            kind: ArtifactKind::Prompt,
            usage: None,
        };
        assert_eq!(fallback_title(&item), "Missing Thing");

        let item = CollectionItem {
            path: "skills/pdf-tools".to_string(),
            kind: ArtifactKind::Skill,
            usage: None,
        };
        assert_eq!(fallback_title(&item), "Pdf Tools");

        let item = CollectionItem {
            path: "hooks/audit-log/README.md".to_string(),
            kind: ArtifactKind::Hook,
            usage: None,
        };
        assert_eq!(fallback_title(&item), "Audit Log");
    }
}
