//! Metadata extractors.
//!
//! Pure functions over parsed documents and file-name conventions, plus
//! the folder walks that list bundled assets.

use crate::frontmatter::FrontMatter;
use crate::records::BundledFile;
use serde::Serialize;
use serde_json::{Map, Value as JsonValue};
use serde_yaml::{Mapping, Value};
use std::cmp::Ordering;
use std::path::Path;
use tracing::warn;
use walkdir::WalkDir;

/// Title-cases a slug by capitalizing each `-` separated word.
///
/// # Examples
///
/// ```
/// use catalog_parser::title_case_name;
///
/// assert_eq!(title_case_name("azure-devops-cli"), "Azure Devops Cli");
/// ```
#[must_use]
pub fn title_case_name(name: &str) -> String {
    name.split('-')
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Turns a file stem into a title: `-` and `_` become spaces and every
/// word start is capitalized.
///
/// # Examples
///
/// ```
/// use catalog_parser::title_case_file_stem;
///
/// assert_eq!(title_case_file_stem("foo-bar_baz"), "Foo Bar Baz");
/// assert_eq!(title_case_file_stem("next.js"), "Next.Js");
/// ```
#[must_use]
pub fn title_case_file_stem(stem: &str) -> String {
    let mut out = String::with_capacity(stem.len());
    let mut at_word_start = true;
    for ch in stem.chars() {
        let ch = if ch == '-' || ch == '_' { ' ' } else { ch };
        let is_word = ch.is_alphanumeric();
        if is_word && at_word_start {
            out.extend(ch.to_uppercase());
        } else {
            out.push(ch);
        }
        at_word_start = !is_word;
    }
    out
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// First `# ` heading of a Markdown body outside fenced code blocks.
///
/// # Examples
///
/// ```
/// use catalog_parser::first_heading;
///
/// let body = "```md\n# Not this\n```\n\n# Real Title\n";
/// assert_eq!(first_heading(body), Some("Real Title"));
/// ```
#[must_use]
pub fn first_heading(body: &str) -> Option<&str> {
    let mut in_code_block = false;
    for line in body.lines() {
        let trimmed = line.trim();
        if trimmed.starts_with("```") {
            in_code_block = !in_code_block;
            continue;
        }
        if trimmed == "---" {
            continue;
        }
        if !in_code_block && let Some(heading) = line.strip_prefix("# ") {
            return Some(heading.trim());
        }
    }
    None
}

/// Resolves a display title.
///
/// Order: explicit `title`, title-cased `name`, first `# ` heading of the
/// body, title-cased `fallback_stem`.
#[must_use]
pub fn resolve_title(front_matter: &FrontMatter, body: &str, fallback_stem: &str) -> String {
    if let Some(title) = front_matter.string("title") {
        return title.to_string();
    }
    if let Some(name) = front_matter.string("name") {
        return title_case_name(name);
    }
    first_heading(body).map_or_else(|| title_case_file_stem(fallback_stem), str::to_string)
}

/// Title ordering close to a locale collation: case-insensitive first,
/// then by exact text.
#[must_use]
pub fn compare_titles(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// One entry of an agent's `mcp-servers` block.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct McpServerConfig {
    /// Server name (the mapping key)
    pub name: String,
    /// `type`, such as `local`, `stdio` or `http`
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub server_type: Option<String>,
    /// Command of a local server
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    /// Arguments of a local server
    #[serde(skip_serializing_if = "Option::is_none")]
    pub args: Option<Vec<String>>,
    /// Environment of a local server
    #[serde(skip_serializing_if = "Option::is_none")]
    pub env: Option<Map<String, JsonValue>>,
    /// URL of an HTTP server
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Headers of an HTTP server
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<Map<String, JsonValue>>,
}

impl McpServerConfig {
    /// Returns `true` for HTTP servers.
    #[must_use]
    pub fn is_http(&self) -> bool {
        self.server_type
            .as_deref()
            .is_some_and(|t| t.eq_ignore_ascii_case("http"))
    }
}

/// Normalizes an agent's `mcp-servers` block, keeping declaration order.
/// Entries whose value is not a mapping keep only their name.
#[must_use]
pub fn mcp_server_configs(servers: &Mapping) -> Vec<McpServerConfig> {
    servers
        .iter()
        .filter_map(|(key, value)| {
            let name = key.as_str()?.to_string();
            let Some(config) = value.as_mapping() else {
                return Some(McpServerConfig {
                    name,
                    ..McpServerConfig::default()
                });
            };
            let text = |field: &str| config.get(field).and_then(Value::as_str).map(str::to_string);
            Some(McpServerConfig {
                name,
                server_type: text("type"),
                command: text("command"),
                args: config.get("args").and_then(Value::as_sequence).map(|args| {
                    args.iter()
                        .filter_map(|arg| match arg {
                            Value::String(s) => Some(s.clone()),
                            Value::Number(n) => Some(n.to_string()),
                            Value::Bool(b) => Some(b.to_string()),
                            _ => None,
                        })
                        .collect()
                }),
                env: config.get("env").and_then(yaml_object),
                url: text("url"),
                headers: config.get("headers").and_then(yaml_object),
            })
        })
        .collect()
}

/// Converts a YAML mapping into a JSON object, if every key is a string.
fn yaml_object(value: &Value) -> Option<Map<String, JsonValue>> {
    if !value.is_mapping() {
        return None;
    }
    match serde_json::to_value(value) {
        Ok(JsonValue::Object(map)) => Some(map),
        _ => None,
    }
}

/// Lists every file under `folder` with its size, sorted by relative path.
#[must_use]
pub fn folder_files(folder: &Path) -> Vec<BundledFile> {
    let mut files: Vec<BundledFile> = WalkDir::new(folder)
        .min_depth(1)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("Skipping unreadable entry under {}: {}", folder.display(), e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| {
            let relative = entry.path().strip_prefix(folder).ok()?;
            let name = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            let size = entry.metadata().map(|m| m.len()).unwrap_or_default();
            Some(BundledFile { name, size })
        })
        .collect();
    files.sort_by(|a, b| a.name.cmp(&b.name));
    files
}

/// Asset names of a folder artifact: every file except the top-level
/// metadata file.
#[must_use]
pub fn bundled_assets(files: &[BundledFile], metadata_file: &str) -> Vec<String> {
    files
        .iter()
        .filter(|file| file.name != metadata_file)
        .map(|file| file.name.clone())
        .collect()
}

/// Event names from a `hooks.json` document: the keys of its top-level
/// `hooks` object, in document order.
///
/// # Examples
///
/// ```
/// use catalog_parser::hook_events;
///
/// let json = r#"{"version": 1, "hooks": {"sessionStart": [], "preToolUse": []}}"#;
/// assert_eq!(hook_events(json).unwrap(), vec!["sessionStart", "preToolUse"]);
/// ```
///
/// # Errors
///
/// Returns the JSON error if the document is not valid JSON.
pub fn hook_events(json: &str) -> Result<Vec<String>, serde_json::Error> {
    let value: JsonValue = serde_json::from_str(json)?;
    Ok(value
        .get("hooks")
        .and_then(JsonValue::as_object)
        .map(|hooks| hooks.keys().cloned().collect())
        .unwrap_or_default())
}
