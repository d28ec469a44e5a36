//! Integration tests for the catalog CLI commands over temporary repositories.

use catalog_cli::commands::common::Workspace;
use catalog_cli::commands::{collection, readme, skill, validate, website};
use catalog_core::cli::{ExitCode, OutputFormat};
use catalog_registry::McpRegistry;
use std::path::Path;
use tempfile::TempDir;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

fn repo() -> TempDir {
    let temp = TempDir::new().unwrap();
    write(
        temp.path(),
        "collections/git-tools.collection.yml",
        "id: git-tools\nname: Git Tools\ndescription: Git helpers\ntags: [git]\nitems:\n  - path: prompts/commit.prompt.md\n    kind: prompt\n",
    );
    write(
        temp.path(),
        "prompts/commit.prompt.md",
        "---\ndescription: 'Generate a commit message'\n---\n\n# Commit\n",
    );
    temp
}

/// Creating a collection non-interactively writes the manifest with derived tags.
#[test]
fn test_collection_new_without_prompts() {
    let temp = TempDir::new().unwrap();
    let workspace = Workspace::with_defaults(temp.path());

    let created = collection::create(&workspace, Some("azure-cloud-tools".into()), None, false).unwrap();

    assert_eq!(created.path, "collections/azure-cloud-tools.collection.yml");
    assert_eq!(created.tags, vec!["azure", "cloud", "tools"]);
    let manifest = std::fs::read_to_string(temp.path().join(&created.path)).unwrap();
    assert!(manifest.contains("id: azure-cloud-tools"));
}

/// An id is mandatory when prompting is not possible.
#[test]
fn test_collection_new_requires_id() {
    let temp = TempDir::new().unwrap();
    let workspace = Workspace::with_defaults(temp.path());

    assert!(collection::create(&workspace, None, None, false).is_err());
    assert!(collection::create(&workspace, Some("Bad Id".into()), None, false).is_err());
}

/// Creating the same collection twice fails the second time.
#[test]
fn test_collection_new_refuses_existing() {
    let temp = repo();
    let workspace = Workspace::with_defaults(temp.path());

    let result = collection::create(&workspace, Some("git-tools".into()), Some("git".into()), false);
    assert!(result.is_err());
}

/// Skill scaffolding writes `skills/<name>/SKILL.md`.
#[test]
fn test_skill_new_writes_skill_file() {
    let temp = TempDir::new().unwrap();
    let workspace = Workspace::with_defaults(temp.path());

    let created = skill::create(
        &workspace,
        Some("pdf-tools".into()),
        Some("Extract text and tables from PDF files".into()),
        None,
        false,
    )
    .unwrap();

    assert_eq!(created.path, "skills/pdf-tools/SKILL.md");
    let content = std::fs::read_to_string(temp.path().join(&created.path)).unwrap();
    assert!(content.contains("name: pdf-tools"));

    let again = skill::create(
        &workspace,
        Some("pdf-tools".into()),
        Some("Extract text and tables from PDF files".into()),
        None,
        false,
    );
    assert!(again.is_err());
}

/// Descriptions shorter than ten characters are rejected before anything is written.
#[test]
fn test_skill_new_rejects_short_description() {
    let temp = TempDir::new().unwrap();
    let workspace = Workspace::with_defaults(temp.path());

    assert!(skill::create(&workspace, Some("pdf-tools".into()), Some("short".into()), None, false).is_err());
    assert!(!temp.path().join("skills/pdf-tools").exists());
}

/// README generation is idempotent.
#[test]
fn test_readme_second_run_is_noop() {
    let temp = repo();
    let workspace = Workspace::with_defaults(temp.path());

    let first = readme::write_readmes(&workspace, McpRegistry::empty()).unwrap();
    assert!(!first.is_noop());
    assert!(temp.path().join("collections/git-tools.md").is_file());
    assert!(temp.path().join("docs/README.prompts.md").is_file());

    let second = readme::write_readmes(&workspace, McpRegistry::empty()).unwrap();
    assert!(second.is_noop());
}

/// Website data is written under `website/public/data`.
#[test]
fn test_website_data_written() {
    let temp = repo();
    let workspace = Workspace::with_defaults(temp.path());

    website::write_website_data(&workspace).unwrap();

    let prompts = std::fs::read_to_string(temp.path().join("website/public/data/prompts.json")).unwrap();
    let prompts: serde_json::Value = serde_json::from_str(&prompts).unwrap();
    assert_eq!(prompts["items"][0]["id"], "commit");
    assert!(temp.path().join("website/public/data/manifest.json").is_file());
}

/// Validation exits with an error code when a manifest is invalid.
#[test]
fn test_validate_exit_codes() {
    let temp = repo();
    let workspace = Workspace::with_defaults(temp.path());
    assert_eq!(validate::run(&workspace, OutputFormat::Json).unwrap(), ExitCode::SUCCESS);

    write(
        temp.path(),
        "collections/broken.collection.yml",
        "id: Broken Id\nname: Broken\ndescription: Broken\nitems: []\n",
    );
    assert_eq!(validate::run(&workspace, OutputFormat::Json).unwrap(), ExitCode::ERROR);
}
