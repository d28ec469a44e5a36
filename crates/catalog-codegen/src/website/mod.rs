//! JSON documents for the static website.
//!
//! [`generate_website_data`] renders one `{items, filters}` document per
//! category, `tools.json`, `samples.json`, the combined search index and
//! `manifest.json` into `website/public/data/`.
//!
//! `manifest.json` carries a generation timestamp. When the counts match
//! the manifest already on disk, its timestamp is reused so an unchanged
//! catalog regenerates byte-identical output.

mod records;
mod samples;
mod search;
mod tools;

pub use records::{
    AgentFilters, AgentRecord, CategoryData, CollectionItemRecord, CollectionRecord, HookFilters, HookRecord,
    InstructionFilters, InstructionRecord, NONE_FACET, PromptRecord, SkillFileRecord, SkillFilters, SkillRecord,
    TagFilters, ToolFilters, agents_data, collections_data, hooks_data, instructions_data, pattern_extensions,
    prompts_data, skill_category, skills_data,
};
pub use samples::{Cookbook, Language, Recipe, SampleFilters, SamplesData, samples_data};
pub use search::{IndexSources, SearchEntry, search_index};
pub use tools::{ToolRecord, ToolsData, ToolsFilters, tools_data};

use crate::context::{Catalog, GenerationContext};
use catalog_core::{Error, Result};
use catalog_files::FileSet;
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use tracing::{debug, info};

/// Source directories whose git history dates the records.
pub const GIT_DATE_DIRECTORIES: [&str; 6] = [
    "agents/",
    "prompts/",
    "instructions/",
    "skills/",
    "hooks/",
    "collections/",
];

/// Per-category counts of `manifest.json`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct ManifestCounts {
    pub agents: usize,
    pub prompts: usize,
    pub instructions: usize,
    pub skills: usize,
    pub hooks: usize,
    pub collections: usize,
    pub tools: usize,
    pub samples: usize,
    pub total: usize,
}

/// `manifest.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebsiteManifest {
    /// RFC 3339 generation time
    pub generated: String,
    /// Counts
    pub counts: ManifestCounts,
}

impl WebsiteManifest {
    /// Manifest for `counts`, keeping the timestamp of `previous` when its
    /// counts are the same.
    #[must_use]
    pub fn new(counts: ManifestCounts, previous: Option<Self>) -> Self {
        match previous {
            Some(previous) if previous.counts == counts => previous,
            _ => Self {
                generated: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
                counts,
            },
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(Error::from)
}

fn read_manifest(ctx: &GenerationContext) -> Option<WebsiteManifest> {
    let path = ctx.layout().website_data_dir().join("manifest.json");
    let content = fs::read_to_string(&path).ok()?;
    match serde_json::from_str(&content) {
        Ok(manifest) => Some(manifest),
        Err(e) => {
            debug!("Ignoring unreadable {}: {}", path.display(), e);
            None
        }
    }
}

/// Renders every website document.
///
/// # Errors
///
/// Returns an error if a document fails to serialize.
pub fn generate_website_data(
    ctx: &GenerationContext,
    catalog: &Catalog,
    dates: &catalog_parser::GitDates,
) -> Result<FileSet> {
    let layout = ctx.layout();
    let out_dir = layout.relative(&layout.website_data_dir());
    let mut files = FileSet::new();

    let agents = agents_data(&catalog.agents, dates);
    info!(
        "Generated {} agents ({} models, {} tools)",
        agents.items.len(),
        agents.filters.models.len(),
        agents.filters.tools.len()
    );
    let prompts = prompts_data(&catalog.prompts, dates);
    info!(
        "Generated {} prompts ({} tools)",
        prompts.items.len(),
        prompts.filters.tools.len()
    );
    let instructions = instructions_data(&catalog.instructions, dates);
    info!(
        "Generated {} instructions ({} extensions)",
        instructions.items.len(),
        instructions.filters.extensions.len()
    );
    let skills = skills_data(&catalog.skills, dates);
    info!(
        "Generated {} skills ({} categories)",
        skills.items.len(),
        skills.filters.categories.len()
    );
    let hooks = hooks_data(&catalog.hooks, dates);
    info!("Generated {} hooks ({} events)", hooks.items.len(), hooks.filters.events.len());
    let collections = collections_data(&catalog.collections, dates);
    info!(
        "Generated {} collections ({} tags)",
        collections.items.len(),
        collections.filters.tags.len()
    );
    let tools = tools_data(&layout.tools_file());
    info!(
        "Generated {} tools ({} categories)",
        tools.items.len(),
        tools.filters.categories.len()
    );
    let samples = samples_data(layout);
    info!(
        "Generated {} recipes in {} cookbooks",
        samples.total_recipes, samples.total_cookbooks
    );

    let index = search_index(IndexSources {
        agents: &agents.items,
        prompts: &prompts.items,
        instructions: &instructions.items,
        skills: &skills.items,
        hooks: &hooks.items,
        collections: &collections.items,
    });
    info!("Generated search index with {} entries", index.len());

    let counts = ManifestCounts {
        agents: agents.items.len(),
        prompts: prompts.items.len(),
        instructions: instructions.items.len(),
        skills: skills.items.len(),
        hooks: hooks.items.len(),
        collections: collections.items.len(),
        tools: tools.items.len(),
        samples: samples.total_recipes,
        total: index.len(),
    };
    let manifest = WebsiteManifest::new(counts, read_manifest(ctx));

    let documents = [
        ("agents.json", to_json(&agents)?),
        ("prompts.json", to_json(&prompts)?),
        ("instructions.json", to_json(&instructions)?),
        ("skills.json", to_json(&skills)?),
        ("hooks.json", to_json(&hooks)?),
        ("collections.json", to_json(&collections)?),
        ("tools.json", to_json(&tools)?),
        ("samples.json", to_json(&samples)?),
        ("search-index.json", to_json(&index)?),
        ("manifest.json", to_json(&manifest)?),
    ];
    for (name, content) in documents {
        files.insert(format!("{out_dir}/{name}"), content)?;
    }

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(agents: usize) -> ManifestCounts {
        ManifestCounts {
            agents,
            total: agents,
            ..ManifestCounts::default()
        }
    }

    #[test]
    fn test_manifest_keeps_timestamp_when_counts_match() {
        let previous = WebsiteManifest {
            generated: "2026-01-01T00:00:00.000Z".to_string(),
            counts: counts(3),
        };
        let manifest = WebsiteManifest::new(counts(3), Some(previous.clone()));
        assert_eq!(manifest, previous);
    }

    #[test]
    fn test_manifest_restamps_when_counts_change() {
        let previous = WebsiteManifest {
            generated: "2026-01-01T00:00:00.000Z".to_string(),
            counts: counts(3),
        };
        let manifest = WebsiteManifest::new(counts(4), Some(previous));
        assert_ne!(manifest.generated, "2026-01-01T00:00:00.000Z");
        assert!(manifest.generated.ends_with('Z'));
        assert_eq!(manifest.counts.agents, 4);
    }
}
