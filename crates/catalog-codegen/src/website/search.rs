//! Combined search index over every catalogued artifact.

use crate::website::records::{AgentRecord, CollectionRecord, HookRecord, InstructionRecord, PromptRecord, SkillRecord};
use serde::Serialize;

/// One `search-index.json` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchEntry {
    /// Artifact kind
    #[serde(rename = "type")]
    pub kind: &'static str,
    /// Artifact id
    pub id: String,
    /// Title shown in results
    pub title: String,
    /// Description
    pub description: String,
    /// Repository-relative path opened by the result
    pub path: String,
    /// Collection tags
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// Last commit date
    pub last_updated: Option<String>,
    /// Lowercased text matched against queries
    pub search_text: String,
}

fn search_text(parts: &[&str]) -> String {
    parts.join(" ").to_lowercase()
}

/// Records of every category, borrowed for indexing.
#[derive(Debug, Clone, Copy)]
pub struct IndexSources<'a> {
    /// Agents
    pub agents: &'a [AgentRecord],
    /// Prompts
    pub prompts: &'a [PromptRecord],
    /// Instructions
    pub instructions: &'a [InstructionRecord],
    /// Skills
    pub skills: &'a [SkillRecord],
    /// Hooks
    pub hooks: &'a [HookRecord],
    /// Collections
    pub collections: &'a [CollectionRecord],
}

/// Flattens every category into one index, in category order.
#[must_use]
pub fn search_index(sources: IndexSources<'_>) -> Vec<SearchEntry> {
    let mut index = Vec::new();

    index.extend(sources.agents.iter().map(|agent| SearchEntry {
        kind: "agent",
        id: agent.id.clone(),
        title: agent.title.clone(),
        description: agent.description.clone(),
        path: agent.path.clone(),
        tags: None,
        last_updated: agent.last_updated.clone(),
        search_text: search_text(&[&agent.title, &agent.description, &agent.tools.join(" ")]),
    }));

    index.extend(sources.prompts.iter().map(|prompt| SearchEntry {
        kind: "prompt",
        id: prompt.id.clone(),
        title: prompt.title.clone(),
        description: prompt.description.clone(),
        path: prompt.path.clone(),
        tags: None,
        last_updated: prompt.last_updated.clone(),
        search_text: search_text(&[&prompt.title, &prompt.description]),
    }));

    index.extend(sources.instructions.iter().map(|instruction| {
        let apply_to = instruction
            .apply_to
            .as_ref()
            .map(catalog_parser::ApplyTo::display)
            .unwrap_or_default();
        SearchEntry {
            kind: "instruction",
            id: instruction.id.clone(),
            title: instruction.title.clone(),
            description: instruction.description.clone(),
            path: instruction.path.clone(),
            tags: None,
            last_updated: instruction.last_updated.clone(),
            search_text: search_text(&[&instruction.title, &instruction.description, &apply_to]),
        }
    }));

    index.extend(sources.skills.iter().map(|skill| SearchEntry {
        kind: "skill",
        id: skill.id.clone(),
        title: skill.title.clone(),
        description: skill.description.clone(),
        path: skill.skill_file.clone(),
        tags: None,
        last_updated: skill.last_updated.clone(),
        search_text: search_text(&[&skill.title, &skill.description]),
    }));

    index.extend(sources.hooks.iter().map(|hook| SearchEntry {
        kind: "hook",
        id: hook.id.clone(),
        title: hook.title.clone(),
        description: hook.description.clone(),
        path: hook.readme_file.clone(),
        tags: None,
        last_updated: hook.last_updated.clone(),
        search_text: search_text(&[&hook.title, &hook.description, &hook.tags.join(" ")]),
    }));

    index.extend(sources.collections.iter().map(|collection| SearchEntry {
        kind: "collection",
        id: collection.id.clone(),
        title: collection.name.clone(),
        description: collection.description.clone(),
        path: collection.path.clone(),
        tags: Some(collection.tags.clone()),
        last_updated: collection.last_updated.clone(),
        search_text: search_text(&[&collection.name, &collection.description, &collection.tags.join(" ")]),
    }));

    index
}
