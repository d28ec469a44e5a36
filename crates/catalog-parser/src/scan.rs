//! Directory scanning and artifact loading.
//!
//! A missing source directory is not an error: it simply holds no
//! artifacts. Files that fail to parse are logged and skipped.

use crate::error::ParseError;
use crate::extract::{bundled_assets, folder_files, hook_events, resolve_title};
use crate::frontmatter::{MarkdownDocument, parse_collection_file};
use crate::records::{
    AgentMeta, Artifact, ArtifactMeta, HookMeta, InstructionMeta, PromptMeta, SkillMeta,
};
use catalog_core::types::COLLECTION_SUFFIX;
use catalog_core::{ArtifactKind, CollectionManifest, RepoLayout};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Hook definitions file inside a hook folder.
pub const HOOKS_FILE: &str = "hooks.json";

/// Files in `dir` whose name ends with `suffix`, sorted by name.
#[must_use]
pub fn list_files(dir: &Path, suffix: &str) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        debug!("Directory {} not found, nothing to scan", dir.display());
        return Vec::new();
    };
    let mut files: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .filter(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|name| name.ends_with(suffix))
        })
        .collect();
    files.sort();
    files
}

/// Sub-directories of `dir`, sorted by name.
#[must_use]
pub fn list_folders(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        debug!("Directory {} not found, nothing to scan", dir.display());
        return Vec::new();
    };
    let mut folders: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .collect();
    folders.sort();
    folders
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Loads one single-file artifact (instruction, prompt or agent).
///
/// # Errors
///
/// Returns an error if the file cannot be read or its front-matter is
/// malformed. Folder kinds are routed to [`load_folder`].
pub fn load_file(layout: &RepoLayout, kind: ArtifactKind, path: &Path) -> Result<Artifact, ParseError> {
    if kind.is_folder() {
        return load_folder(layout, kind, path);
    }

    let doc = MarkdownDocument::read(path)?;
    let name = file_name(path);
    let id = kind.strip_suffix(&name).unwrap_or(&name).to_string();
    let title = resolve_title(&doc.front_matter, &doc.body, &id);
    let description = doc.front_matter.string("description").map(str::to_string);

    let meta = match kind {
        ArtifactKind::Instruction => {
            ArtifactMeta::Instruction(doc.front_matter.deserialize::<InstructionMeta>(path)?)
        }
        ArtifactKind::Prompt => ArtifactMeta::Prompt(doc.front_matter.deserialize::<PromptMeta>(path)?),
        _ => ArtifactMeta::Agent(doc.front_matter.deserialize::<AgentMeta>(path)?),
    };

    let relative = layout.relative(path);
    Ok(Artifact {
        id,
        document_path: relative.clone(),
        path: relative,
        file_name: name,
        title,
        description,
        meta,
    })
}

/// Loads a skill or hook folder.
///
/// # Errors
///
/// Returns an error if the metadata file is missing, unreadable, malformed,
/// or lacks `name` or `description`.
pub fn load_folder(layout: &RepoLayout, kind: ArtifactKind, folder: &Path) -> Result<Artifact, ParseError> {
    let metadata_file = kind.metadata_file().unwrap_or("README.md");
    let document = folder.join(metadata_file);
    if !document.is_file() {
        return Err(ParseError::MissingMetadataFile {
            path: folder.to_path_buf(),
            file: metadata_file,
        });
    }

    let doc = MarkdownDocument::read(&document)?;
    let required = |field: &'static str| {
        doc.front_matter
            .string(field)
            .map(str::to_string)
            .ok_or_else(|| ParseError::MissingField {
                path: document.clone(),
                field,
            })
    };
    let name = required("name")?;
    let description = required("description")?;

    let folder_name = file_name(folder);
    let title = resolve_title(&doc.front_matter, &doc.body, &folder_name);
    let files = folder_files(folder);
    let assets = bundled_assets(&files, metadata_file);

    let meta = if kind == ArtifactKind::Skill {
        ArtifactMeta::Skill(SkillMeta {
            name,
            description: description.clone(),
            files,
            assets,
        })
    } else {
        let hooks_file = folder.join(HOOKS_FILE);
        let events = match std::fs::read_to_string(&hooks_file) {
            Ok(json) => hook_events(&json).unwrap_or_else(|e| {
                warn!("Ignoring invalid {}: {}", hooks_file.display(), e);
                Vec::new()
            }),
            Err(_) => Vec::new(),
        };
        let tags = doc
            .front_matter
            .deserialize::<HookTags>(&document)
            .map(|t| t.tags)
            .unwrap_or_default();
        ArtifactMeta::Hook(HookMeta {
            name,
            description: description.clone(),
            tags,
            events,
            assets,
        })
    };

    Ok(Artifact {
        id: folder_name.clone(),
        path: layout.relative(folder),
        document_path: layout.relative(&document),
        file_name: folder_name,
        title,
        description: Some(description),
        meta,
    })
}

#[derive(serde::Deserialize)]
struct HookTags {
    #[serde(default)]
    tags: Vec<String>,
}

/// Loads every artifact of `kind`, skipping (and logging) the ones that
/// fail to parse. Results are in file-name order.
#[must_use]
pub fn scan_kind(layout: &RepoLayout, kind: ArtifactKind) -> Vec<Artifact> {
    let dir = layout.kind_dir(kind);
    let sources = match kind.file_suffix() {
        Some(suffix) => list_files(&dir, suffix),
        None => list_folders(&dir),
    };

    let artifacts: Vec<Artifact> = sources
        .iter()
        .filter_map(|path| match load_file(layout, kind, path) {
            Ok(artifact) => Some(artifact),
            Err(e) => {
                warn!("Skipping {}: {}", layout.relative(path), e);
                None
            }
        })
        .collect();

    debug!("Loaded {} {} artifacts", artifacts.len(), kind);
    artifacts
}

/// Resolves a collection item path to the artifact location on disk.
///
/// Folder kinds accept either the folder or its metadata file; the folder
/// is returned in both cases.
#[must_use]
pub fn item_location(layout: &RepoLayout, kind: ArtifactKind, item_path: &str) -> PathBuf {
    let path = layout.resolve(item_path);
    match kind.metadata_file() {
        Some(metadata) if path.file_name().is_some_and(|n| n == metadata) => path
            .parent()
            .map_or_else(|| path.clone(), Path::to_path_buf),
        _ => path,
    }
}

/// Loads the artifact a collection item points at.
///
/// # Errors
///
/// Returns an error if the referenced file or folder cannot be loaded.
pub fn load_item(layout: &RepoLayout, kind: ArtifactKind, item_path: &str) -> Result<Artifact, ParseError> {
    load_file(layout, kind, &item_location(layout, kind, item_path))
}

/// A parsed collection manifest with its resolved id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionSource {
    /// Resolved id (manifest `id`, else file stem)
    pub id: String,
    /// Repository-relative manifest path
    pub path: String,
    /// Manifest file name
    pub file_name: String,
    /// File stem without the collection suffix
    pub file_stem: String,
    /// Parsed manifest
    pub manifest: CollectionManifest,
}

impl CollectionSource {
    /// Display name (manifest `name`, else id).
    #[must_use]
    pub fn name(&self) -> String {
        self.manifest.display_name(&self.id)
    }
}

/// Loads every `*.collection.yml`, skipping (and logging) unparseable files.
#[must_use]
pub fn scan_collections(layout: &RepoLayout) -> Vec<CollectionSource> {
    list_files(&layout.collections_dir(), COLLECTION_SUFFIX)
        .into_iter()
        .filter_map(|path| {
            let file_name = file_name(&path);
            let file_stem = file_name
                .strip_suffix(COLLECTION_SUFFIX)
                .unwrap_or(&file_name)
                .to_string();
            match parse_collection_file(&path) {
                Ok(manifest) => Some(CollectionSource {
                    id: manifest.resolved_id(&file_stem),
                    path: layout.relative(&path),
                    file_name,
                    file_stem,
                    manifest,
                }),
                Err(e) => {
                    warn!("Failed to parse collection {}: {}", file_name, e);
                    None
                }
            }
        })
        .collect()
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

    #[test]
    fn test_missing_directory_is_empty() {
        let temp = TempDir::new().unwrap();
        let layout = RepoLayout::new(temp.path());
        assert!(scan_kind(&layout, ArtifactKind::Prompt).is_empty());
        assert!(scan_collections(&layout).is_empty());
    }

    #[test]
    fn test_scan_prompts_skips_malformed() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "prompts/good.prompt.md", "---\ndescription: Good\n---\n# Good One\n");
        write(temp.path(), "prompts/bad.prompt.md", "---\ndescription: [oops\n---\n");
        write(temp.path(), "prompts/notes.md", "# ignored\n");

        let layout = RepoLayout::new(temp.path());
        let prompts = scan_kind(&layout, ArtifactKind::Prompt);
        assert_eq!(prompts.len(), 1);
        assert_eq!(prompts[0].id, "good");
        assert_eq!(prompts[0].title, "Good One");
        assert_eq!(prompts[0].path, "prompts/good.prompt.md");
        assert_eq!(prompts[0].description.as_deref(), Some("Good"));
    }

    #[test]
    fn test_title_falls_back_to_file_stem() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "prompts/foo-bar.prompt.md", "Just text.\n");
        let layout = RepoLayout::new(temp.path());
        let prompts = scan_kind(&layout, ArtifactKind::Prompt);
        assert_eq!(prompts[0].title, "Foo Bar");
        assert!(prompts[0].description.is_none());
    }

    #[test]
    fn test_load_skill_folder() {
        let temp = TempDir::new().unwrap();
        write(
            temp.path(),
            "skills/pdf-tools/SKILL.md",
            "---\nname: pdf-tools\ndescription: Work with PDF files\n---\n",
        );
        write(temp.path(), "skills/pdf-tools/scripts/split.py", "pass\n");
        write(temp.path(), "skills/empty/notes.txt", "x");

        let layout = RepoLayout::new(temp.path());
        let skills = scan_kind(&layout, ArtifactKind::Skill);
        assert_eq!(skills.len(), 1);
        let skill = &skills[0];
        assert_eq!(skill.id, "pdf-tools");
        assert_eq!(skill.title, "Pdf Tools");
        assert_eq!(skill.path, "skills/pdf-tools");
        assert_eq!(skill.document_path, "skills/pdf-tools/SKILL.md");
        assert_eq!(skill.assets(), ["scripts/split.py".to_string()]);
    }

    #[test]
    fn test_load_hook_folder() {
        let temp = TempDir::new().unwrap();
        write(
            temp.path(),
            "hooks/audit/README.md",
            "---\nname: audit\ndescription: Audit tool calls\ntags: [security]\n---\n",
        );
        write(
            temp.path(),
            "hooks/audit/hooks.json",
            r#"{"hooks": {"preToolUse": [], "sessionEnd": []}}"#,
        );

        let layout = RepoLayout::new(temp.path());
        let hooks = scan_kind(&layout, ArtifactKind::Hook);
        let ArtifactMeta::Hook(meta) = &hooks[0].meta else {
            panic!("expected hook metadata");
        };
        assert_eq!(meta.events, vec!["preToolUse", "sessionEnd"]);
        assert_eq!(meta.tags, vec!["security"]);
        assert_eq!(meta.assets, vec!["hooks.json"]);
    }

    #[test]
    fn test_skill_without_description_is_skipped() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "skills/x/SKILL.md", "---\nname: x\n---\n");
        let layout = RepoLayout::new(temp.path());
        let err = load_folder(&layout, ArtifactKind::Skill, &temp.path().join("skills/x")).unwrap_err();
        assert!(matches!(err, ParseError::MissingField { field: "description", .. }));
    }

    #[test]
    fn test_item_location_accepts_metadata_file() {
        let layout = RepoLayout::new("/r");
        assert_eq!(
            item_location(&layout, ArtifactKind::Skill, "skills/a/SKILL.md"),
            Path::new("/r/skills/a")
        );
        assert_eq!(
            item_location(&layout, ArtifactKind::Skill, "skills/a"),
            Path::new("/r/skills/a")
        );
        assert_eq!(
            item_location(&layout, ArtifactKind::Prompt, "prompts/p.prompt.md"),
            Path::new("/r/prompts/p.prompt.md")
        );
    }

    #[test]
    fn test_scan_collections_resolves_id() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "collections/web.collection.yml", "name: Web\nitems: []\n");
        write(temp.path(), "collections/broken.collection.yml", "items: [\n");

        let layout = RepoLayout::new(temp.path());
        let collections = scan_collections(&layout);
        assert_eq!(collections.len(), 1);
        assert_eq!(collections[0].id, "web");
        assert_eq!(collections[0].name(), "Web");
        assert_eq!(collections[0].path, "collections/web.collection.yml");
    }
}
