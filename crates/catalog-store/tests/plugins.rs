//! Plugin directories and the marketplace over a temporary repository.

use catalog_core::{CatalogConfig, RepoLayout};
use catalog_store::plugin::PluginStore;
use catalog_store::write_marketplace;
use std::path::Path;
use tempfile::TempDir;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

fn repo() -> TempDir {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write(
        root,
        "collections/git-tools.collection.yml",
        "id: git-tools\nname: Git Tools\ndescription: Git helpers\nitems:\n  - path: prompts/commit.prompt.md\n    kind: prompt\n  - path: agents/reviewer.agent.md\n    kind: agent\n  - path: instructions/git.instructions.md\n    kind: instruction\n  - path: skills/changelog/SKILL.md\n    kind: skill\n  - path: hooks/audit\n    kind: hook\n  - path: prompts/missing.prompt.md\n    kind: prompt\n",
    );
    write(root, "prompts/commit.prompt.md", "---\ndescription: 'Generate a commit message'\n---\n");
    write(root, "agents/reviewer.agent.md", "---\ndescription: Reviews code\n---\n");
    write(root, "instructions/git.instructions.md", "---\napplyTo: '**'\n---\n");
    write(
        root,
        "skills/changelog/SKILL.md",
        "---\nname: changelog\ndescription: Writes changelogs\n---\n",
    );
    write(
        root,
        "hooks/audit/README.md",
        "---\nname: Audit\ndescription: Logs every tool call\n---\n",
    );
    write(root, "hooks/audit/hooks.json", r#"{"hooks": {"postToolUse": []}}"#);
    temp
}

#[test]
fn test_migrate_builds_plugin() {
    let temp = repo();
    let layout = RepoLayout::new(temp.path());
    let config = CatalogConfig::default();
    let store = PluginStore::new(&layout, &config);

    let summary = store.migrate("git-tools").unwrap();
    assert_eq!(summary.dir, "plugins/git-tools");
    assert_eq!(
        (summary.commands, summary.agents, summary.skills, summary.hooks),
        (1, 1, 1, 1)
    );
    assert_eq!(summary.instructions_skipped, 1);
    assert_eq!(summary.skipped, ["prompts/missing.prompt.md"]);

    let plugin = temp.path().join("plugins/git-tools");
    assert!(plugin.join("commands/commit.md").is_file());
    assert!(plugin.join("agents/reviewer.md").is_file());
    assert!(plugin.join("skills/changelog/SKILL.md").is_file());
    assert!(plugin.join("hooks/audit/hooks.json").is_file());

    let manifest: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(plugin.join(".github/plugin/plugin.json")).unwrap()).unwrap();
    assert_eq!(manifest["name"], "git-tools");
    assert_eq!(manifest["author"]["name"], "Awesome Copilot Community");

    let readme = std::fs::read_to_string(plugin.join("README.md")).unwrap();
    assert!(readme.starts_with("# Git Tools Plugin\n"));
    assert!(readme.contains("copilot plugin install git-tools@awesome-copilot"));
    assert!(readme.contains("| `/git-tools:commit` | Generate a commit message |"));
    assert!(readme.contains("| `audit` | Logs every tool call | postToolUse |"));
}

#[cfg(unix)]
#[test]
fn test_links_are_relative_symlinks() {
    let temp = repo();
    let layout = RepoLayout::new(temp.path());
    let config = CatalogConfig::default();
    PluginStore::new(&layout, &config).migrate("git-tools").unwrap();

    let link = temp.path().join("plugins/git-tools/commands/commit.md");
    assert_eq!(
        std::fs::read_link(link).unwrap(),
        Path::new("../../../prompts/commit.prompt.md")
    );
    let link = temp.path().join("plugins/git-tools/skills/changelog");
    assert_eq!(std::fs::read_link(link).unwrap(), Path::new("../../../skills/changelog"));
}

#[test]
fn test_migrate_and_refresh_preconditions() {
    let temp = repo();
    let layout = RepoLayout::new(temp.path());
    let config = CatalogConfig::default();
    let store = PluginStore::new(&layout, &config);

    assert!(store.refresh("git-tools").unwrap_err().is_not_found());
    assert!(store.migrate("unknown").unwrap_err().is_not_found());
    assert!(!temp.path().join("plugins/unknown").exists());

    store.migrate("git-tools").unwrap();
    assert!(store.migrate("git-tools").unwrap_err().is_already_exists());

    std::fs::write(temp.path().join("plugins/git-tools/stale.txt"), "old").unwrap();
    let summary = store.refresh("git-tools").unwrap();
    assert_eq!(summary.commands, 1);
    assert!(!temp.path().join("plugins/git-tools/stale.txt").exists());
}

#[test]
fn test_refresh_all_and_marketplace() {
    let temp = repo();
    let layout = RepoLayout::new(temp.path());
    let config = CatalogConfig::default();
    let store = PluginStore::new(&layout, &config);

    let report = store.refresh_all();
    assert!(report.refreshed.is_empty());
    assert!(!report.is_partial());

    store.migrate("git-tools").unwrap();
    std::fs::create_dir_all(temp.path().join("plugins/orphan")).unwrap();
    assert_eq!(store.existing_plugins(), ["git-tools"]);

    let report = store.refresh_all();
    assert_eq!(report.refreshed.len(), 1);
    assert!(!report.is_partial());

    let (marketplace, _) = write_marketplace(&layout, &config.marketplace).unwrap();
    assert_eq!(marketplace.plugins.len(), 1);
    assert_eq!(marketplace.plugins[0].description, "Git helpers");
}
