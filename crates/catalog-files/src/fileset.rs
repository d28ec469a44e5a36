//! In-memory set of rendered outputs.
//!
//! Generators never touch the disk: they return a [`FileSet`] of
//! repository-relative paths and contents, and the caller hands it to
//! [`FileSet::write_to`] once everything rendered successfully.
//!
//! # Examples
//!
//! ```
//! use catalog_files::FileSet;
//!
//! let mut files = FileSet::new();
//! files.insert("docs/README.agents.md", "# Agents\n").unwrap();
//! files.insert("collections/git-tools.md", "# Git Tools\n").unwrap();
//!
//! assert_eq!(files.len(), 2);
//! assert_eq!(files.get("docs/README.agents.md"), Some("# Agents\n"));
//! assert!(files.insert("../outside.md", "x").is_err());
//! ```

use crate::error::{FilesError, Result};
use crate::writer::{WriteReport, write_if_changed};
use std::path::{Component, Path};

/// One rendered output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFile {
    path: String,
    content: String,
}

impl OutputFile {
    /// Repository-relative path with forward slashes.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Rendered content.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }
}

/// Ordered collection of rendered outputs, unique by path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileSet {
    files: Vec<OutputFile>,
}

impl FileSet {
    /// Creates an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self { files: Vec::new() }
    }

    /// Adds a file after validating its path.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is absolute, empty, climbs out with
    /// `..`, or is already present.
    pub fn insert(&mut self, path: impl AsRef<Path>, content: impl Into<String>) -> Result<()> {
        let path = normalize(path.as_ref())?;
        if self.files.iter().any(|f| f.path == path) {
            return Err(FilesError::DuplicatePath { path });
        }
        self.files.push(OutputFile {
            path,
            content: content.into(),
        });
        Ok(())
    }

    /// Moves every file of `other` into this set.
    ///
    /// # Errors
    ///
    /// Returns [`FilesError::DuplicatePath`] on the first path present in
    /// both sets.
    pub fn extend(&mut self, other: Self) -> Result<()> {
        for file in other.files {
            self.insert(&file.path, file.content)?;
        }
        Ok(())
    }

    /// Content of the file at `path`, if present.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&str> {
        self.files
            .iter()
            .find(|f| f.path == path)
            .map(|f| f.content.as_str())
    }

    /// Returns `true` if `path` is present.
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    /// Files in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &OutputFile> {
        self.files.iter()
    }

    /// Number of files.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Returns `true` if there are no files.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Writes every file below `root`, skipping files whose content is
    /// already on disk.
    ///
    /// # Errors
    ///
    /// Stops at the first I/O error.
    pub fn write_to(&self, root: impl AsRef<Path>) -> Result<WriteReport> {
        let root = root.as_ref();
        let mut report = WriteReport::default();
        for file in &self.files {
            let outcome = write_if_changed(&root.join(&file.path), &file.content)?;
            report.record(&file.path, outcome);
        }
        Ok(report)
    }
}

impl<'a> IntoIterator for &'a FileSet {
    type Item = &'a OutputFile;
    type IntoIter = std::slice::Iter<'a, OutputFile>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.iter()
    }
}

/// Validates a relative output path and renders it with forward slashes.
fn normalize(path: &Path) -> Result<String> {
    let invalid = || FilesError::InvalidPath {
        path: path.display().to_string(),
    };

    let mut parts = Vec::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_str().ok_or_else(invalid)?),
            Component::CurDir => {}
            Component::ParentDir => {
                return Err(FilesError::InvalidPathComponent {
                    path: path.display().to_string(),
                });
            }
            Component::RootDir | Component::Prefix(_) => return Err(invalid()),
        }
    }

    if parts.is_empty() {
        return Err(invalid());
    }
    Ok(parts.join("/"))
}
