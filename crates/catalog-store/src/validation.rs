//! Collection manifest validation.
//!
//! Manifests are checked on their raw YAML so that a wrong type is reported
//! as a validation error instead of a deserialization failure. Every field
//! group reports at most its first problem; all groups are checked.
//!
//! # Examples
//!
//! ```
//! use catalog_core::RepoLayout;
//! use catalog_store::validation::validate_manifest;
//!
//! let layout = RepoLayout::new("/nonexistent");
//! let manifest: serde_yaml::Value =
//!     serde_yaml::from_str("id: Git Tools\nname: Git Tools\ndescription: Git helpers\nitems: []\n").unwrap();
//!
//! let errors = validate_manifest(&layout, &manifest);
//! let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
//! assert_eq!(
//!     messages,
//!     [
//!         "ID: must contain only lowercase letters, numbers, and hyphens",
//!         "Items: at least one item is required",
//!     ]
//! );
//! ```

use catalog_core::manifest::parse_flexible_bool;
use catalog_core::types::{COLLECTION_ID_MAX_LENGTH, COLLECTION_SUFFIX, MAX_COLLECTION_ITEMS, is_slug};
use catalog_core::{ArtifactKind, ItemOrdering, RepoLayout};
use catalog_parser::{item_location, list_files, parse_yaml_file, split_front_matter};
use serde::Serialize;
use serde_yaml::{Mapping, Value};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use tracing::{debug, info};

const NAME_MAX_LENGTH: usize = 100;
const DESCRIPTION_MAX_LENGTH: usize = 500;
const MAX_TAGS: usize = 10;
const TAG_MAX_LENGTH: usize = 30;
const AGENT_NAME_MAX_LENGTH: usize = 50;

/// One validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    /// Field group (`ID`, `Name`, `Items`, ...)
    pub field: &'static str,
    /// What is wrong
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validation result of one manifest file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    /// Manifest file name
    pub file_name: String,
    /// Errors found, empty when the file is valid
    pub errors: Vec<ValidationError>,
}

impl FileReport {
    /// Returns `true` if the file has no errors.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Validation result of the `collections/` directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    /// Per-file results in file name order
    pub files: Vec<FileReport>,
    /// Set when there was nothing to validate
    pub skipped: bool,
}

impl ValidationReport {
    /// Returns `true` if every file is valid.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.files.iter().all(FileReport::is_valid)
    }

    /// Number of files with at least one error.
    #[must_use]
    pub fn invalid_count(&self) -> usize {
        self.files.iter().filter(|file| !file.is_valid()).count()
    }

    /// Number of errors across all files.
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.files.iter().map(|file| file.errors.len()).sum()
    }
}

fn char_len(value: &str) -> usize {
    value.chars().count()
}

/// Length as the front-matter parser leaves it: trailing whitespace is
/// dropped, leading whitespace counts.
fn text_len(value: &str) -> usize {
    char_len(value.trim_end())
}

fn check_id(manifest: &Value) -> Option<String> {
    let Some(id) = manifest.get("id").and_then(Value::as_str) else {
        return Some("is required and must be a string".to_string());
    };
    if !is_slug(id) {
        return Some("must contain only lowercase letters, numbers, and hyphens".to_string());
    }
    if char_len(id) > COLLECTION_ID_MAX_LENGTH {
        return Some(format!("must be between 1 and {COLLECTION_ID_MAX_LENGTH} characters"));
    }
    None
}

fn check_text(manifest: &Value, key: &str, max: usize) -> Option<String> {
    let Some(value) = manifest.get(key).and_then(Value::as_str) else {
        return Some("is required and must be a string".to_string());
    };
    let length = text_len(value);
    if length == 0 || length > max {
        return Some(format!("must be between 1 and {max} characters"));
    }
    None
}

fn check_tags(manifest: &Value) -> Option<String> {
    let tags = match manifest.get("tags") {
        None | Some(Value::Null) => return None,
        Some(Value::Sequence(tags)) => tags,
        Some(_) => return Some("must be an array".to_string()),
    };
    if tags.len() > MAX_TAGS {
        return Some(format!("maximum {MAX_TAGS} tags allowed"));
    }
    for tag in tags {
        let Some(tag) = tag.as_str() else {
            return Some("all tags must be strings".to_string());
        };
        if !is_slug(tag) {
            return Some(format!(
                "tag \"{tag}\" must contain only lowercase letters, numbers, and hyphens"
            ));
        }
        if char_len(tag) > TAG_MAX_LENGTH {
            return Some(format!("tag \"{tag}\" must be between 1 and {TAG_MAX_LENGTH} characters"));
        }
    }
    None
}

fn is_string_list(value: Option<&Value>) -> bool {
    value.is_none_or(Value::is_sequence)
}

fn check_mcp_server(name: &str, server: &Value) -> Option<String> {
    let Some(server) = server.as_mapping() else {
        return Some(format!("MCP server \"{name}\" must be an object"));
    };
    let Some(kind) = server.get("type").and_then(Value::as_str) else {
        return Some(format!("MCP server \"{name}\" must have a string \"type\""));
    };
    if kind == "local" && server.get("command").and_then(Value::as_str).is_none() {
        return Some(format!("local MCP server \"{name}\" must have a \"command\""));
    }
    for key in ["args", "tools"] {
        if !is_string_list(server.get(key)) {
            return Some(format!("MCP server \"{name}\" \"{key}\" must be an array"));
        }
    }
    if server.get("env").is_some_and(|env| !env.is_mapping()) {
        return Some(format!("MCP server \"{name}\" \"env\" must be an object"));
    }
    None
}

fn check_mcp_servers(servers: &Mapping) -> Option<String> {
    servers.iter().find_map(|(name, server)| {
        let name = name.as_str().unwrap_or("?");
        check_mcp_server(name, server)
    })
}

/// Checks the front-matter of an agent file.
///
/// `name` and `description` are required.
fn check_agent_file(path: &Path) -> Option<String> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => return Some(format!("cannot be read: {e}")),
    };
    let front_matter: Value = match split_front_matter(&content).0 {
        Some(yaml) => match serde_yaml::from_str(yaml) {
            Ok(value) => value,
            Err(e) => return Some(format!("has invalid front-matter: {e}")),
        },
        None => return Some("is missing front-matter".to_string()),
    };

    let Some(name) = front_matter.get("name").and_then(Value::as_str) else {
        return Some("must have a string name".to_string());
    };
    if !(1..=AGENT_NAME_MAX_LENGTH).contains(&text_len(name)) {
        return Some(format!("name must be between 1 and {AGENT_NAME_MAX_LENGTH} characters"));
    }
    let description_ok = front_matter
        .get("description")
        .and_then(Value::as_str)
        .is_some_and(|d| (1..=DESCRIPTION_MAX_LENGTH).contains(&text_len(d)));
    if !description_ok {
        return Some(format!(
            "description is required and must be between 1 and {DESCRIPTION_MAX_LENGTH} characters"
        ));
    }
    if !is_string_list(front_matter.get("tools")) {
        return Some("tools must be an array".to_string());
    }
    match front_matter.get("mcp-servers") {
        None | Some(Value::Null) => None,
        Some(Value::Mapping(servers)) => check_mcp_servers(servers),
        Some(_) => Some("mcp-servers must be an object".to_string()),
    }
}

fn check_item(layout: &RepoLayout, index: usize, item: &Value) -> Option<String> {
    let n = index + 1;
    if !item.is_mapping() {
        return Some(format!("item {n} must be an object"));
    }
    let Some(path) = item.get("path").and_then(Value::as_str) else {
        return Some(format!("item {n} must have a path string"));
    };
    let Some(kind) = item.get("kind").and_then(Value::as_str) else {
        return Some(format!("item {n} must have a kind string"));
    };
    let Ok(kind) = kind.parse::<ArtifactKind>() else {
        return Some(format!(
            "item {n} kind must be one of: prompt, instruction, agent, skill, hook"
        ));
    };

    let resolved = layout.resolve(path);
    if !resolved.exists() {
        return Some(format!("item {n} file does not exist: {path}"));
    }

    if let Some(metadata) = kind.metadata_file() {
        let folder = item_location(layout, kind, path);
        if !folder.join(metadata).is_file() {
            return Some(format!(
                "item {n} {kind} must be a folder (or its {metadata}) containing {metadata}: {path}"
            ));
        }
        return None;
    }

    if let Some(suffix) = kind.file_suffix()
        && !path.ends_with(suffix)
    {
        return Some(format!("item {n} kind \"{kind}\" requires a path ending in {suffix}"));
    }

    if kind == ArtifactKind::Agent {
        return check_agent_file(&resolved).map(|reason| format!("item {n} agent file {reason}: {path}"));
    }
    None
}

fn check_items(layout: &RepoLayout, manifest: &Value) -> Option<String> {
    let Some(items) = manifest.get("items").and_then(Value::as_sequence) else {
        return Some("is required and must be an array".to_string());
    };
    if items.is_empty() {
        return Some("at least one item is required".to_string());
    }
    if items.len() > MAX_COLLECTION_ITEMS {
        return Some(format!("maximum {MAX_COLLECTION_ITEMS} items allowed"));
    }
    items
        .iter()
        .enumerate()
        .find_map(|(index, item)| check_item(layout, index, item))
}

fn check_display(manifest: &Value) -> Option<String> {
    let display = match manifest.get("display") {
        None | Some(Value::Null) => return None,
        Some(Value::Mapping(display)) => display,
        Some(_) => return Some("must be an object".to_string()),
    };

    if let Some(ordering) = display.get("ordering") {
        let valid = ordering
            .as_str()
            .is_some_and(|ordering| ItemOrdering::parse(ordering).is_some());
        if !valid {
            return Some("ordering must be \"manual\" or \"alpha\"".to_string());
        }
    }
    if let Some(show_badge) = display.get("show_badge") {
        let valid = match show_badge {
            Value::Bool(_) => true,
            Value::String(text) => parse_flexible_bool(text).is_some(),
            _ => false,
        };
        if !valid {
            return Some("show_badge must be boolean".to_string());
        }
    }
    None
}

/// Validates one parsed manifest.
///
/// Item paths are resolved against `layout`.
#[must_use]
pub fn validate_manifest(layout: &RepoLayout, manifest: &Value) -> Vec<ValidationError> {
    [
        ("ID", check_id(manifest)),
        ("Name", check_text(manifest, "name", NAME_MAX_LENGTH)),
        ("Description", check_text(manifest, "description", DESCRIPTION_MAX_LENGTH)),
        ("Tags", check_tags(manifest)),
        ("Items", check_items(layout, manifest)),
        ("Display", check_display(manifest)),
    ]
    .into_iter()
    .filter_map(|(field, message)| message.map(|message| ValidationError::new(field, message)))
    .collect()
}

/// Validates every `*.collection.yml` under `collections/`.
///
/// A missing directory or an empty one is reported as skipped, which counts
/// as valid. Ids used by more than one file are errors on every file after
/// the first.
#[must_use]
pub fn validate_collections(layout: &RepoLayout) -> ValidationReport {
    let paths = list_files(&layout.collections_dir(), COLLECTION_SUFFIX);
    if paths.is_empty() {
        info!("No collection files found, skipping validation");
        return ValidationReport {
            files: Vec::new(),
            skipped: true,
        };
    }
    info!("Validating {} collection files", paths.len());

    let mut seen: HashMap<String, String> = HashMap::new();
    let files = paths
        .iter()
        .map(|path| {
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            debug!("Validating {}", file_name);

            let manifest = match parse_yaml_file(path) {
                Ok(manifest) => manifest,
                Err(e) => {
                    return FileReport {
                        file_name,
                        errors: vec![ValidationError::new("YAML", e.to_string())],
                    };
                }
            };

            let mut errors = validate_manifest(layout, &manifest);
            if let Some(id) = manifest.get("id").and_then(Value::as_str) {
                if let Some(first) = seen.get(id) {
                    errors.push(ValidationError::new(
                        "ID",
                        format!("duplicate collection ID \"{id}\" (also used by {first})"),
                    ));
                } else {
                    seen.insert(id.to_string(), file_name.clone());
                }
            }
            FileReport { file_name, errors }
        })
        .collect();

    ValidationReport { files, skipped: false }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    fn yaml(text: &str) -> Value {
        serde_yaml::from_str(text).unwrap()
    }

    fn fields(errors: &[ValidationError]) -> Vec<&'static str> {
        errors.iter().map(|e| e.field).collect()
    }

    fn repo() -> TempDir {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "prompts/commit.prompt.md", "---\ndescription: Commit\n---\n");
        temp
    }

    #[test]
    fn test_valid_manifest_has_no_errors() {
        let temp = repo();
        let layout = RepoLayout::new(temp.path());
        let manifest = yaml(
            "id: git-tools\nname: Git Tools\ndescription: Git helpers\ntags: [git, vcs]\nitems:\n  - path: prompts/commit.prompt.md\n    kind: prompt\ndisplay:\n  ordering: alpha # sorted\n  show_badge: \"true\"\n",
        );
        assert!(validate_manifest(&layout, &manifest).is_empty());
    }

    #[test]
    fn test_every_group_reports_once() {
        let temp = repo();
        let layout = RepoLayout::new(temp.path());
        let manifest = yaml("id: 7\ntags: [Bad Tag, also bad]\nitems: {}\ndisplay:\n  ordering: random\n");
        let errors = validate_manifest(&layout, &manifest);
        assert_eq!(fields(&errors), ["ID", "Name", "Description", "Tags", "Items", "Display"]);
        assert_eq!(
            errors[3].message,
            "tag \"Bad Tag\" must contain only lowercase letters, numbers, and hyphens"
        );
    }

    #[test]
    fn test_missing_item_file() {
        let temp = repo();
        let layout = RepoLayout::new(temp.path());
        let manifest = yaml(
            "id: a\nname: A\ndescription: A\nitems:\n  - path: prompts/commit.prompt.md\n    kind: prompt\n  - path: prompts/gone.prompt.md\n    kind: prompt\n",
        );
        let errors = validate_manifest(&layout, &manifest);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].to_string(), "Items: item 2 file does not exist: prompts/gone.prompt.md");
    }

    #[test]
    fn test_kind_suffix_mismatch() {
        let temp = repo();
        let layout = RepoLayout::new(temp.path());
        let manifest = yaml(
            "id: a\nname: A\ndescription: A\nitems:\n  - path: prompts/commit.prompt.md\n    kind: agent\n",
        );
        let errors = validate_manifest(&layout, &manifest);
        assert_eq!(
            errors[0].message,
            "item 1 kind \"agent\" requires a path ending in .agent.md"
        );
    }

    #[test]
    fn test_skill_folder_or_skill_md_accepted() {
        let temp = repo();
        write(temp.path(), "skills/pdf/SKILL.md", "---\nname: pdf\ndescription: PDF tools\n---\n");
        std::fs::create_dir_all(temp.path().join("skills/empty")).unwrap();
        let layout = RepoLayout::new(temp.path());

        for path in ["skills/pdf", "skills/pdf/SKILL.md"] {
            let manifest = yaml(&format!(
                "id: a\nname: A\ndescription: A\nitems:\n  - path: {path}\n    kind: skill\n"
            ));
            assert!(validate_manifest(&layout, &manifest).is_empty(), "{path}");
        }

        let manifest = yaml("id: a\nname: A\ndescription: A\nitems:\n  - path: skills/empty\n    kind: skill\n");
        let errors = validate_manifest(&layout, &manifest);
        assert!(errors[0].message.contains("containing SKILL.md"));
    }

    #[test]
    fn test_agent_front_matter_checks() {
        let temp = repo();
        write(
            temp.path(),
            "agents/ok.agent.md",
            "---\nname: Reviewer\ndescription: Reviews code\ntools: [read]\nmcp-servers:\n  gh:\n    type: http\n---\n",
        );
        write(
            temp.path(),
            "agents/local.agent.md",
            "---\nname: Local\ndescription: Runs locally\nmcp-servers:\n  tool:\n    type: local\n---\n",
        );
        write(temp.path(), "agents/bare.agent.md", "# No front-matter\n");
        write(temp.path(), "agents/nameless.agent.md", "---\ndescription: Has no name\n---\n");
        write(temp.path(), "agents/blank.agent.md", "---\nname: \"\"\ndescription: Blank name\n---\n");
        let layout = RepoLayout::new(temp.path());

        let check = |file: &str| {
            let manifest = yaml(&format!(
                "id: a\nname: A\ndescription: A\nitems:\n  - path: agents/{file}\n    kind: agent\n"
            ));
            validate_manifest(&layout, &manifest)
        };

        assert!(check("ok.agent.md").is_empty());
        assert_eq!(
            check("local.agent.md")[0].message,
            "item 1 agent file local MCP server \"tool\" must have a \"command\": agents/local.agent.md"
        );
        assert!(check("bare.agent.md")[0].message.contains("is missing front-matter"));
        assert_eq!(
            check("nameless.agent.md")[0].message,
            "item 1 agent file must have a string name: agents/nameless.agent.md"
        );
        assert!(check("blank.agent.md")[0].message.contains("name must be between 1 and 50"));
    }

    #[test]
    fn test_leading_padding_counts_toward_length() {
        let temp = repo();
        let layout = RepoLayout::new(temp.path());
        let padded = format!("{}{}", " ".repeat(10), "n".repeat(95));
        let manifest = yaml(&format!(
            "id: a\nname: \"{padded}\"\ndescription: A\nitems:\n  - path: prompts/commit.prompt.md\n    kind: prompt\n"
        ));
        let errors = validate_manifest(&layout, &manifest);
        assert_eq!(errors[0].to_string(), "Name: must be between 1 and 100 characters");

        let manifest = yaml(
            "id: a\nname: \"A   \"\ndescription: \"   \"\nitems:\n  - path: prompts/commit.prompt.md\n    kind: prompt\n",
        );
        assert_eq!(fields(&validate_manifest(&layout, &manifest)), ["Description"]);
    }

    #[test]
    fn test_show_badge_rejects_other_strings() {
        let manifest = yaml("display:\n  show_badge: sometimes\n");
        assert_eq!(check_display(&manifest).as_deref(), Some("show_badge must be boolean"));
        let manifest = yaml("display:\n  show_badge: \"'false'\"\n");
        assert_eq!(check_display(&manifest), None);
    }

    #[test]
    fn test_collections_duplicate_ids() {
        let temp = repo();
        let body = "name: A\ndescription: A\nitems:\n  - path: prompts/commit.prompt.md\n    kind: prompt\n";
        write(temp.path(), "collections/a.collection.yml", &format!("id: same\n{body}"));
        write(temp.path(), "collections/b.collection.yml", &format!("id: same\n{body}"));
        write(temp.path(), "collections/c.collection.yml", "id: [unclosed\n");

        let report = validate_collections(&RepoLayout::new(temp.path()));
        assert!(!report.skipped);
        assert_eq!(report.files.len(), 3);
        assert!(report.files[0].is_valid());
        assert_eq!(
            report.files[1].errors[0].message,
            "duplicate collection ID \"same\" (also used by a.collection.yml)"
        );
        assert_eq!(report.files[2].errors[0].field, "YAML");
        assert_eq!(report.invalid_count(), 2);
        assert!(!report.is_valid());
    }

    #[test]
    fn test_missing_directory_is_skipped() {
        let temp = TempDir::new().unwrap();
        let report = validate_collections(&RepoLayout::new(temp.path()));
        assert!(report.skipped);
        assert!(report.is_valid());
    }
}
