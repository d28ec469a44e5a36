//! Writing output sets twice.

use catalog_files::{FileSet, WriteOutcome};
use std::fs;
use tempfile::TempDir;

fn file_set(files: &[(&str, &str)]) -> FileSet {
    let mut set = FileSet::new();
    for (path, content) in files {
        set.insert(path, *content).unwrap();
    }
    set
}

#[test]
fn test_second_run_writes_nothing() {
    let temp = TempDir::new().unwrap();
    let files = file_set(&[
        ("docs/README.agents.md", "# Agents\n\n| Title |\n"),
        ("collections/git-tools.md", "# Git Tools\n"),
        ("website/public/data/manifest.json", "{}\n"),
    ]);

    let first = files.write_to(temp.path()).unwrap();
    assert_eq!(first.count(WriteOutcome::Created), 3);

    let second = files.write_to(temp.path()).unwrap();
    assert!(second.is_noop());
    assert_eq!(second.count(WriteOutcome::Unchanged), 3);
}

#[test]
fn test_changed_file_is_updated_alone() {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("docs")).unwrap();
    fs::write(temp.path().join("docs/a.md"), "old").unwrap();
    fs::write(temp.path().join("docs/b.md"), "same").unwrap();

    let files = file_set(&[("docs/a.md", "new"), ("docs/b.md", "same")]);
    let report = files.write_to(temp.path()).unwrap();

    let outcomes: Vec<_> = report.files.iter().map(|f| (f.path.as_str(), f.outcome)).collect();
    assert_eq!(
        outcomes,
        [("docs/a.md", WriteOutcome::Updated), ("docs/b.md", WriteOutcome::Unchanged)]
    );
    assert_eq!(fs::read_to_string(temp.path().join("docs/a.md")).unwrap(), "new");
}
