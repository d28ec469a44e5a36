//! Typed artifact records.
//!
//! Each artifact kind has its own metadata type with explicit optional
//! fields. Front-matter is hand-written, so the deserializers here are
//! lenient: a field of the wrong shape reads as absent instead of failing
//! the whole file.

use catalog_core::ArtifactKind;
use serde::{Deserialize, Deserializer, Serialize};
use serde_yaml::{Mapping, Value};

/// `applyTo` of an instruction, kept in the form it was written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ApplyTo {
    /// `applyTo: ['**/*.ts', '**/*.tsx']`
    Patterns(Vec<String>),
    /// `applyTo: '**/*.ts, **/*.tsx'`
    Text(String),
}

impl ApplyTo {
    /// Individual glob patterns, trimmed and without empties.
    ///
    /// # Examples
    ///
    /// ```
    /// use catalog_parser::ApplyTo;
    ///
    /// let apply_to = ApplyTo::Text("**/*.ts, **/*.tsx,".to_string());
    /// assert_eq!(apply_to.patterns(), vec!["**/*.ts", "**/*.tsx"]);
    /// ```
    #[must_use]
    pub fn patterns(&self) -> Vec<String> {
        let parts: Vec<&str> = match self {
            Self::Patterns(list) => list.iter().map(String::as_str).collect(),
            Self::Text(text) => text.split(',').collect(),
        };
        parts
            .into_iter()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Text form used in search text.
    #[must_use]
    pub fn display(&self) -> String {
        match self {
            Self::Patterns(list) => list.join(","),
            Self::Text(text) => text.clone(),
        }
    }
}

/// Front-matter of `*.instructions.md`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct InstructionMeta {
    /// Explicit title
    #[serde(default, deserialize_with = "opt_string")]
    pub title: Option<String>,
    /// Slug-style name
    #[serde(default, deserialize_with = "opt_string")]
    pub name: Option<String>,
    /// Description
    #[serde(default, deserialize_with = "opt_string")]
    pub description: Option<String>,
    /// Target glob patterns
    #[serde(default, rename = "applyTo", deserialize_with = "opt_apply_to")]
    pub apply_to: Option<ApplyTo>,
}

/// Front-matter of `*.prompt.md`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PromptMeta {
    /// Explicit title
    #[serde(default, deserialize_with = "opt_string")]
    pub title: Option<String>,
    /// Slug-style name
    #[serde(default, deserialize_with = "opt_string")]
    pub name: Option<String>,
    /// Description
    #[serde(default, deserialize_with = "opt_string")]
    pub description: Option<String>,
    /// Agent the prompt runs in
    #[serde(default, deserialize_with = "opt_string")]
    pub agent: Option<String>,
    /// Preferred model
    #[serde(default, deserialize_with = "opt_string")]
    pub model: Option<String>,
    /// Tool names
    #[serde(default, deserialize_with = "string_list")]
    pub tools: Vec<String>,
}

/// One `handoffs[]` entry of an agent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Handoff {
    /// Button label
    pub label: String,
    /// Target agent
    pub agent: String,
}

/// Front-matter of `*.agent.md`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AgentMeta {
    /// Explicit title
    #[serde(default, deserialize_with = "opt_string")]
    pub title: Option<String>,
    /// Slug-style name
    #[serde(default, deserialize_with = "opt_string")]
    pub name: Option<String>,
    /// Description
    #[serde(default, deserialize_with = "opt_string")]
    pub description: Option<String>,
    /// Preferred model
    #[serde(default, deserialize_with = "opt_string")]
    pub model: Option<String>,
    /// Tool names
    #[serde(default, deserialize_with = "string_list")]
    pub tools: Vec<String>,
    /// Handoff buttons
    #[serde(default, deserialize_with = "handoff_list")]
    pub handoffs: Vec<Handoff>,
    /// Raw `mcp-servers` block, in declaration order
    #[serde(default, rename = "mcp-servers", deserialize_with = "lenient_mapping")]
    pub mcp_servers: Mapping,
}

impl AgentMeta {
    /// Declared MCP server names in declaration order.
    #[must_use]
    pub fn mcp_server_names(&self) -> Vec<String> {
        self.mcp_servers
            .keys()
            .filter_map(|key| key.as_str().map(str::to_string))
            .collect()
    }
}

/// One file inside a skill or hook folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BundledFile {
    /// Path relative to the folder, forward slashes
    pub name: String,
    /// Size in bytes
    pub size: u64,
}

/// Metadata of a `skills/<folder>/` artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillMeta {
    /// `name` from `SKILL.md`
    pub name: String,
    /// `description` from `SKILL.md`
    pub description: String,
    /// Every file in the folder, `SKILL.md` included, sorted by name
    pub files: Vec<BundledFile>,
    /// Bundled assets, `SKILL.md` excluded, sorted
    pub assets: Vec<String>,
}

/// Metadata of a `hooks/<folder>/` artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookMeta {
    /// `name` from `README.md`
    pub name: String,
    /// `description` from `README.md`
    pub description: String,
    /// `tags` from `README.md`
    pub tags: Vec<String>,
    /// Event names declared in `hooks.json`
    pub events: Vec<String>,
    /// Bundled assets, `README.md` excluded, sorted
    pub assets: Vec<String>,
}

/// Kind-specific metadata.
#[derive(Debug, Clone, PartialEq)]
pub enum ArtifactMeta {
    /// Instruction file
    Instruction(InstructionMeta),
    /// Prompt file
    Prompt(PromptMeta),
    /// Agent file
    Agent(AgentMeta),
    /// Skill folder
    Skill(SkillMeta),
    /// Hook folder
    Hook(HookMeta),
}

/// One catalogued artifact with its resolved display fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Artifact {
    /// Id derived from the file name or folder name
    pub id: String,
    /// Repository-relative path of the file or folder
    pub path: String,
    /// Repository-relative path of the file holding the front-matter
    pub document_path: String,
    /// File or folder name
    pub file_name: String,
    /// Resolved title
    pub title: String,
    /// Front-matter description, if any
    pub description: Option<String>,
    /// Kind-specific metadata
    pub meta: ArtifactMeta,
}

impl Artifact {
    /// Kind of this artifact.
    #[must_use]
    pub const fn kind(&self) -> ArtifactKind {
        match self.meta {
            ArtifactMeta::Instruction(_) => ArtifactKind::Instruction,
            ArtifactMeta::Prompt(_) => ArtifactKind::Prompt,
            ArtifactMeta::Agent(_) => ArtifactKind::Agent,
            ArtifactMeta::Skill(_) => ArtifactKind::Skill,
            ArtifactMeta::Hook(_) => ArtifactKind::Hook,
        }
    }

    /// Agent metadata, if this is an agent.
    #[must_use]
    pub const fn as_agent(&self) -> Option<&AgentMeta> {
        match &self.meta {
            ArtifactMeta::Agent(meta) => Some(meta),
            _ => None,
        }
    }

    /// Assets bundled with a skill or hook, empty for single files.
    #[must_use]
    pub fn assets(&self) -> &[String] {
        match &self.meta {
            ArtifactMeta::Skill(meta) => &meta.assets,
            ArtifactMeta::Hook(meta) => &meta.assets,
            _ => &[],
        }
    }
}

fn opt_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(text)) if !text.is_empty() => Some(text),
        _ => None,
    })
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

/// Accepts a YAML list or a comma-separated string.
fn string_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Sequence(items)) => items.iter().filter_map(scalar_to_string).collect(),
        Some(Value::String(text)) => text
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    })
}

fn opt_apply_to<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<ApplyTo>, D::Error> {
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Sequence(items)) => Some(ApplyTo::Patterns(
            items.iter().filter_map(scalar_to_string).collect(),
        )),
        Some(Value::String(text)) if !text.is_empty() => Some(ApplyTo::Text(text)),
        _ => None,
    })
}

fn handoff_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Handoff>, D::Error> {
    let Some(Value::Sequence(items)) = Option::<Value>::deserialize(deserializer)? else {
        return Ok(Vec::new());
    };
    Ok(items
        .iter()
        .filter_map(Value::as_mapping)
        .map(|entry| Handoff {
            label: entry
                .get("label")
                .and_then(scalar_to_string)
                .unwrap_or_default(),
            agent: entry
                .get("agent")
                .and_then(scalar_to_string)
                .unwrap_or_default(),
        })
        .collect())
}

fn lenient_mapping<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Mapping, D::Error> {
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Mapping(mapping)) => mapping,
        _ => Mapping::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_agent_meta_lenient_fields() {
        let meta: AgentMeta = serde_yaml::from_str(
            "name: reviewer\ndescription: 42\ntools: [read, 7, {x: 1}]\nhandoffs:\n  - label: Plan\n    agent: planner\n  - oops\nmcp-servers: nope\n",
        )
        .unwrap();
        assert_eq!(meta.name.as_deref(), Some("reviewer"));
        assert_eq!(meta.description, None);
        assert_eq!(meta.tools, vec!["read", "7"]);
        assert_eq!(
            meta.handoffs,
            vec![Handoff {
                label: "Plan".to_string(),
                agent: "planner".to_string()
            }]
        );
        assert!(meta.mcp_servers.is_empty());
    }

    #[test]
    fn test_agent_server_names_keep_order() {
        let meta: AgentMeta = serde_yaml::from_str(
            "mcp-servers:\n  zeta:\n    type: local\n  alpha:\n    type: http\n",
        )
        .unwrap();
        assert_eq!(meta.mcp_server_names(), vec!["zeta", "alpha"]);
    }

    #[test]
    fn test_prompt_tools_as_string() {
        let meta: PromptMeta = serde_yaml::from_str("tools: 'codebase, search'\n").unwrap();
        assert_eq!(meta.tools, vec!["codebase", "search"]);
    }

    #[test]
    fn test_apply_to_forms() {
        let meta: InstructionMeta =
            serde_yaml::from_str("applyTo: ['**/*.ts', ' **/*.js ']\n").unwrap();
        assert_eq!(
            meta.apply_to.unwrap().patterns(),
            vec!["**/*.ts", "**/*.js"]
        );

        let meta: InstructionMeta = serde_yaml::from_str("applyTo: '**'\n").unwrap();
        assert_eq!(meta.apply_to, Some(ApplyTo::Text("**".to_string())));

        let meta: InstructionMeta = serde_yaml::from_str("applyTo: 3\n").unwrap();
        assert_eq!(meta.apply_to, None);
    }

    #[test]
    fn test_apply_to_serializes_raw_form() {
        let list = ApplyTo::Patterns(vec!["a".to_string()]);
        assert_eq!(serde_json::to_string(&list).unwrap(), "[\"a\"]");
        let text = ApplyTo::Text("a, b".to_string());
        assert_eq!(serde_json::to_string(&text).unwrap(), "\"a, b\"");
    }
}
