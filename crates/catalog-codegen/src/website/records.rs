//! Per-category website records and their filter facets.

use catalog_parser::{ApplyTo, Artifact, ArtifactMeta, CollectionSource, GitDates, Handoff};
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeSet;
use std::sync::LazyLock;

/// Facet value meaning "field absent", listed first.
pub const NONE_FACET: &str = "(none)";

static EXTENSION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*?\.(\w+)$").expect("valid regex"));

static BRACE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*?/\*\.\{([^}]+)\}\*?$").expect("valid regex"));

/// Skill categories and their keywords, checked in order.
const SKILL_CATEGORIES: [(&str, &[&str]); 8] = [
    ("Azure", &["azure", "appinsights"]),
    ("Git & GitHub", &["github", "gh-cli", "git-commit", "git "]),
    ("VS Code", &["vscode", "vs code"]),
    ("Testing", &["test", "qa", "playwright"]),
    ("Microsoft", &["microsoft", "m365", "workiq"]),
    ("CLI Tools", &["cli", "command"]),
    ("Diagrams", &["diagram", "plantuml", "visual"]),
    (".NET", &["nuget", "dotnet", ".net"]),
];

/// `{items, filters}` document of one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryData<T, F> {
    /// Records sorted for display
    pub items: Vec<T>,
    /// Distinct facet values
    pub filters: F,
}

fn sorted(values: BTreeSet<String>) -> Vec<String> {
    values.into_iter().collect()
}

fn with_none_facet(values: BTreeSet<String>) -> Vec<String> {
    std::iter::once(NONE_FACET.to_string()).chain(values).collect()
}

fn last_updated(dates: &GitDates, path: &str) -> Option<String> {
    dates.get(path).map(str::to_string)
}

/// `agents.json` item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct AgentRecord {
    pub id: String,
    pub title: String,
    pub description: String,
    pub model: Option<String>,
    pub tools: Vec<String>,
    pub has_handoffs: bool,
    pub handoffs: Vec<Handoff>,
    pub mcp_servers: Vec<String>,
    pub path: String,
    pub filename: String,
    pub last_updated: Option<String>,
}

/// `agents.json` filters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgentFilters {
    /// Models, `(none)` first
    pub models: Vec<String>,
    /// Tool names
    pub tools: Vec<String>,
}

/// Builds `agents.json`.
#[must_use]
pub fn agents_data(agents: &[Artifact], dates: &GitDates) -> CategoryData<AgentRecord, AgentFilters> {
    let mut models = BTreeSet::new();
    let mut tools = BTreeSet::new();

    let items = agents
        .iter()
        .filter_map(|agent| {
            let meta = agent.as_agent()?;
            models.extend(meta.model.clone());
            tools.extend(meta.tools.iter().cloned());
            Some(AgentRecord {
                id: agent.id.clone(),
                title: agent.title.clone(),
                description: agent.description.clone().unwrap_or_default(),
                model: meta.model.clone(),
                tools: meta.tools.clone(),
                has_handoffs: !meta.handoffs.is_empty(),
                handoffs: meta.handoffs.clone(),
                mcp_servers: meta.mcp_server_names(),
                path: agent.path.clone(),
                filename: agent.file_name.clone(),
                last_updated: last_updated(dates, &agent.path),
            })
        })
        .collect();

    CategoryData {
        items,
        filters: AgentFilters {
            models: with_none_facet(models),
            tools: sorted(tools),
        },
    }
}

/// `prompts.json` item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct PromptRecord {
    pub id: String,
    pub title: String,
    pub description: String,
    pub agent: Option<String>,
    pub model: Option<String>,
    pub tools: Vec<String>,
    pub path: String,
    pub filename: String,
    pub last_updated: Option<String>,
}

/// Facet list of tool names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolFilters {
    /// Tool names
    pub tools: Vec<String>,
}

/// Builds `prompts.json`.
#[must_use]
pub fn prompts_data(prompts: &[Artifact], dates: &GitDates) -> CategoryData<PromptRecord, ToolFilters> {
    let mut tools = BTreeSet::new();

    let items = prompts
        .iter()
        .filter_map(|prompt| {
            let ArtifactMeta::Prompt(meta) = &prompt.meta else {
                return None;
            };
            tools.extend(meta.tools.iter().cloned());
            Some(PromptRecord {
                id: prompt.id.clone(),
                title: prompt.title.clone(),
                description: prompt.description.clone().unwrap_or_default(),
                agent: meta.agent.clone(),
                model: meta.model.clone(),
                tools: meta.tools.clone(),
                path: prompt.path.clone(),
                filename: prompt.file_name.clone(),
                last_updated: last_updated(dates, &prompt.path),
            })
        })
        .collect();

    CategoryData {
        items,
        filters: ToolFilters { tools: sorted(tools) },
    }
}

/// File extensions targeted by one glob pattern.
///
/// `**.ts`, `*.ts` and `**/*.ts` give `.ts`; `**/*.{ts,tsx}` gives each
/// listed extension. Anything else gives nothing.
///
/// # Examples
///
/// ```
/// use catalog_codegen::website::pattern_extensions;
///
/// assert_eq!(pattern_extensions("**/*.rs"), vec![".rs"]);
/// assert_eq!(pattern_extensions("**/*.{ts, tsx}"), vec![".ts", ".tsx"]);
/// assert!(pattern_extensions("src/**").is_empty());
/// ```
#[must_use]
pub fn pattern_extensions(pattern: &str) -> Vec<String> {
    if let Some(caps) = EXTENSION_PATTERN.captures(pattern) {
        return vec![format!(".{}", &caps[1])];
    }
    BRACE_PATTERN
        .captures(pattern)
        .map(|caps| caps[1].split(',').map(|ext| format!(".{}", ext.trim())).collect())
        .unwrap_or_default()
}

/// `instructions.json` item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct InstructionRecord {
    pub id: String,
    pub title: String,
    pub description: String,
    pub apply_to: Option<ApplyTo>,
    pub apply_to_patterns: Vec<String>,
    pub extensions: Vec<String>,
    pub path: String,
    pub filename: String,
    pub last_updated: Option<String>,
}

/// `instructions.json` filters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstructionFilters {
    /// Every glob pattern
    pub patterns: Vec<String>,
    /// Extensions, `(none)` first
    pub extensions: Vec<String>,
}

/// Builds `instructions.json`.
#[must_use]
pub fn instructions_data(
    instructions: &[Artifact],
    dates: &GitDates,
) -> CategoryData<InstructionRecord, InstructionFilters> {
    let mut all_patterns = BTreeSet::new();
    let mut all_extensions = BTreeSet::new();

    let items = instructions
        .iter()
        .filter_map(|instruction| {
            let ArtifactMeta::Instruction(meta) = &instruction.meta else {
                return None;
            };
            let patterns = meta.apply_to.as_ref().map(ApplyTo::patterns).unwrap_or_default();

            let mut extensions: Vec<String> = Vec::new();
            for pattern in &patterns {
                all_patterns.insert(pattern.clone());
                for extension in pattern_extensions(pattern) {
                    all_extensions.insert(extension.clone());
                    if !extensions.contains(&extension) {
                        extensions.push(extension);
                    }
                }
            }

            Some(InstructionRecord {
                id: instruction.id.clone(),
                title: instruction.title.clone(),
                description: instruction.description.clone().unwrap_or_default(),
                apply_to: meta.apply_to.clone(),
                apply_to_patterns: patterns,
                extensions,
                path: instruction.path.clone(),
                filename: instruction.file_name.clone(),
                last_updated: last_updated(dates, &instruction.path),
            })
        })
        .collect();

    CategoryData {
        items,
        filters: InstructionFilters {
            patterns: sorted(all_patterns),
            extensions: with_none_facet(all_extensions),
        },
    }
}

/// Coarse skill category from keywords in its name and description.
///
/// # Examples
///
/// ```
/// use catalog_codegen::website::skill_category;
///
/// assert_eq!(skill_category("azure-deploy", "Deploy apps"), "Azure");
/// assert_eq!(skill_category("webapp-testing", "Playwright checks"), "Testing");
/// assert_eq!(skill_category("recipes", "Cooking"), "Other");
/// ```
#[must_use]
pub fn skill_category(name: &str, description: &str) -> &'static str {
    let text = format!("{name} {description}").to_lowercase();
    SKILL_CATEGORIES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|keyword| text.contains(keyword)))
        .map_or("Other", |(category, _)| category)
}

/// One file of a skill folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillFileRecord {
    /// Repository-relative path
    pub path: String,
    /// Path inside the skill folder
    pub name: String,
    /// Size in bytes
    pub size: u64,
}

/// `skills.json` item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct SkillRecord {
    pub id: String,
    pub name: String,
    pub title: String,
    pub description: String,
    pub assets: Vec<String>,
    pub has_assets: bool,
    pub asset_count: usize,
    pub category: String,
    pub path: String,
    pub skill_file: String,
    pub files: Vec<SkillFileRecord>,
    pub last_updated: Option<String>,
}

/// `skills.json` filters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillFilters {
    /// Categories observed
    pub categories: Vec<String>,
    /// Always `["Yes", "No"]`
    pub has_assets: Vec<String>,
}

/// Builds `skills.json`.
#[must_use]
pub fn skills_data(skills: &[Artifact], dates: &GitDates) -> CategoryData<SkillRecord, SkillFilters> {
    let mut categories = BTreeSet::new();

    let items = skills
        .iter()
        .filter_map(|skill| {
            let ArtifactMeta::Skill(meta) = &skill.meta else {
                return None;
            };
            let category = skill_category(&meta.name, &meta.description);
            categories.insert(category.to_string());

            let files = meta
                .files
                .iter()
                .map(|file| SkillFileRecord {
                    path: format!("{}/{}", skill.path, file.name),
                    name: file.name.clone(),
                    size: file.size,
                })
                .collect();

            Some(SkillRecord {
                id: skill.id.clone(),
                name: meta.name.clone(),
                title: skill.title.clone(),
                description: meta.description.clone(),
                assets: meta.assets.clone(),
                has_assets: !meta.assets.is_empty(),
                asset_count: meta.assets.len(),
                category: category.to_string(),
                path: skill.path.clone(),
                skill_file: skill.document_path.clone(),
                files,
                last_updated: last_updated(dates, &skill.document_path),
            })
        })
        .collect();

    CategoryData {
        items,
        filters: SkillFilters {
            categories: sorted(categories),
            has_assets: vec!["Yes".to_string(), "No".to_string()],
        },
    }
}

/// `hooks.json` item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct HookRecord {
    pub id: String,
    pub name: String,
    pub title: String,
    pub description: String,
    pub events: Vec<String>,
    pub tags: Vec<String>,
    pub assets: Vec<String>,
    pub path: String,
    pub readme_file: String,
    pub last_updated: Option<String>,
}

/// `hooks.json` filters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HookFilters {
    /// Event names
    pub events: Vec<String>,
    /// Tags
    pub tags: Vec<String>,
}

/// Builds `hooks.json`.
#[must_use]
pub fn hooks_data(hooks: &[Artifact], dates: &GitDates) -> CategoryData<HookRecord, HookFilters> {
    let mut events = BTreeSet::new();
    let mut tags = BTreeSet::new();

    let items = hooks
        .iter()
        .filter_map(|hook| {
            let ArtifactMeta::Hook(meta) = &hook.meta else {
                return None;
            };
            events.extend(meta.events.iter().cloned());
            tags.extend(meta.tags.iter().cloned());
            Some(HookRecord {
                id: hook.id.clone(),
                name: meta.name.clone(),
                title: hook.title.clone(),
                description: meta.description.clone(),
                events: meta.events.clone(),
                tags: meta.tags.clone(),
                assets: meta.assets.clone(),
                path: hook.path.clone(),
                readme_file: hook.document_path.clone(),
                last_updated: last_updated(dates, &hook.document_path),
            })
        })
        .collect();

    CategoryData {
        items,
        filters: HookFilters {
            events: sorted(events),
            tags: sorted(tags),
        },
    }
}

/// One `items[]` entry of a collection record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollectionItemRecord {
    /// Artifact path
    pub path: String,
    /// Artifact kind
    pub kind: String,
    /// Raw usage notes
    pub usage: Option<String>,
}

/// `collections.json` item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct CollectionRecord {
    pub id: String,
    pub name: String,
    pub description: String,
    pub tags: Vec<String>,
    pub featured: bool,
    pub items: Vec<CollectionItemRecord>,
    pub path: String,
    pub filename: String,
    pub last_updated: Option<String>,
}

/// Facet list of tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagFilters {
    /// Tags
    pub tags: Vec<String>,
}

/// Builds `collections.json`, featured collections first.
///
/// Records are keyed by manifest file stem.
#[must_use]
pub fn collections_data(
    collections: &[CollectionSource],
    dates: &GitDates,
) -> CategoryData<CollectionRecord, TagFilters> {
    let mut tags = BTreeSet::new();

    let mut items: Vec<CollectionRecord> = collections
        .iter()
        .map(|source| {
            let manifest = &source.manifest;
            tags.extend(manifest.tags.iter().cloned());
            CollectionRecord {
                id: source.file_stem.clone(),
                name: manifest.display_name(&source.file_stem),
                description: manifest.description.clone().unwrap_or_default(),
                tags: manifest.tags.clone(),
                featured: manifest.is_featured(),
                items: manifest
                    .items
                    .iter()
                    .map(|item| CollectionItemRecord {
                        path: item.path.clone(),
                        kind: item.kind.to_string(),
                        usage: item.usage.clone().filter(|usage| !usage.is_empty()),
                    })
                    .collect(),
                path: source.path.clone(),
                filename: source.file_name.clone(),
                last_updated: last_updated(dates, &source.path),
            }
        })
        .collect();

    items.sort_by(|a, b| {
        b.featured
            .cmp(&a.featured)
            .then_with(|| catalog_parser::compare_titles(&a.name, &b.name))
    });

    CategoryData {
        items,
        filters: TagFilters { tags: sorted(tags) },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_parser::{AgentMeta, BundledFile, InstructionMeta, SkillMeta};

    fn artifact(kind_dir: &str, id: &str, suffix: &str, meta: ArtifactMeta) -> Artifact {
        let file_name = format!("{id}{suffix}");
        Artifact {
            id: id.to_string(),
            path: format!("{kind_dir}/{file_name}"),
            document_path: format!("{kind_dir}/{file_name}"),
            file_name,
            title: id.to_string(),
            description: None,
            meta,
        }
    }

    #[test]
    fn test_agent_filters_put_none_first() {
        let with_model = artifact(
            "agents",
            "a",
            ".agent.md",
            ArtifactMeta::Agent(AgentMeta {
                model: Some("gpt-5".to_string()),
                tools: vec!["search".to_string(), "edit".to_string()],
                ..AgentMeta::default()
            }),
        );
        let without = artifact("agents", "b", ".agent.md", ArtifactMeta::Agent(AgentMeta::default()));

        let data = agents_data(&[with_model, without], &GitDates::default());
        assert_eq!(data.filters.models, vec!["(none)", "gpt-5"]);
        assert_eq!(data.filters.tools, vec!["edit", "search"]);
        assert_eq!(data.items[1].model, None);
        assert_eq!(data.items[0].description, "");
    }

    #[test]
    fn test_agent_record_json_shape() {
        let agent = artifact("agents", "a", ".agent.md", ArtifactMeta::Agent(AgentMeta::default()));
        let dates: GitDates = [("agents/a.agent.md".to_string(), "2026-01-01T00:00:00Z".to_string())]
            .into_iter()
            .collect();
        let data = agents_data(&[agent], &dates);
        let json = serde_json::to_value(&data.items[0]).unwrap();
        assert_eq!(json["hasHandoffs"], false);
        assert_eq!(json["mcpServers"], serde_json::json!([]));
        assert_eq!(json["lastUpdated"], "2026-01-01T00:00:00Z");
        assert_eq!(json["filename"], "a.agent.md");
    }

    #[test]
    fn test_instruction_extensions_deduplicated() {
        let instruction = artifact(
            "instructions",
            "web",
            ".instructions.md",
            ArtifactMeta::Instruction(InstructionMeta {
                apply_to: Some(ApplyTo::Text("**/*.ts, **/*.{ts,tsx}, docs/**".to_string())),
                ..InstructionMeta::default()
            }),
        );
        let data = instructions_data(&[instruction], &GitDates::default());
        let item = &data.items[0];
        assert_eq!(item.extensions, vec![".ts", ".tsx"]);
        assert_eq!(item.apply_to_patterns.len(), 3);
        assert_eq!(data.filters.extensions, vec!["(none)", ".ts", ".tsx"]);

        let json = serde_json::to_value(item).unwrap();
        assert_eq!(json["applyTo"], "**/*.ts, **/*.{ts,tsx}, docs/**");
    }

    #[test]
    fn test_skill_category_order() {
        assert_eq!(skill_category("gh-cli", "Run tests with the GitHub CLI"), "Git & GitHub");
        assert_eq!(skill_category("nuget-manager", "Manage packages"), ".NET");
        assert_eq!(skill_category("plantuml", "Render diagrams"), "Diagrams");
    }

    #[test]
    fn test_skill_record_paths() {
        let skill = Artifact {
            id: "pdf".to_string(),
            path: "skills/pdf".to_string(),
            document_path: "skills/pdf/SKILL.md".to_string(),
            file_name: "pdf".to_string(),
            title: "Pdf".to_string(),
            description: Some("Work with documents".to_string()),
            meta: ArtifactMeta::Skill(SkillMeta {
                name: "pdf".to_string(),
                description: "Work with documents".to_string(),
                files: vec![
                    BundledFile {
                        name: "SKILL.md".to_string(),
                        size: 10,
                    },
                    BundledFile {
                        name: "scripts/run.py".to_string(),
                        size: 4,
                    },
                ],
                assets: vec!["scripts/run.py".to_string()],
            }),
        };
        let data = skills_data(&[skill], &GitDates::default());
        let item = &data.items[0];
        assert_eq!(item.skill_file, "skills/pdf/SKILL.md");
        assert_eq!(item.files[1].path, "skills/pdf/scripts/run.py");
        assert_eq!(item.asset_count, 1);
        assert_eq!(item.category, "Other");
        assert_eq!(data.filters.has_assets, vec!["Yes", "No"]);
    }
}
