//! Idempotent file writer.
//!
//! Rendered content is compared byte-for-byte with what is on disk and only
//! written on a difference, so regenerating unchanged inputs leaves the
//! working tree clean.

use crate::error::{FilesError, Result};
use serde::Serialize;
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::info;

/// What [`write_if_changed`] did with a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteOutcome {
    /// The file did not exist and was written.
    Created,
    /// The file existed with different content and was rewritten.
    Updated,
    /// The file already had this content; nothing was written.
    Unchanged,
}

impl WriteOutcome {
    /// Returns `true` if the disk was touched.
    #[must_use]
    pub const fn is_write(self) -> bool {
        !matches!(self, Self::Unchanged)
    }

    /// Lowercase label used in reports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::Unchanged => "unchanged",
        }
    }
}

impl fmt::Display for WriteOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Writes `content` to `path` unless the file already holds exactly that.
///
/// Parent directories are created as needed. The write goes to a sibling
/// temporary file that is then renamed over the target.
///
/// # Errors
///
/// Returns [`FilesError::IoError`] if the existing file cannot be read or
/// the new content cannot be written.
///
/// # Examples
///
/// ```
/// use catalog_files::{WriteOutcome, write_if_changed};
/// # let temp = tempfile::TempDir::new().unwrap();
/// let path = temp.path().join("docs/README.md");
///
/// assert_eq!(write_if_changed(&path, "# Hi\n").unwrap(), WriteOutcome::Created);
/// assert_eq!(write_if_changed(&path, "# Hi\n").unwrap(), WriteOutcome::Unchanged);
/// assert_eq!(write_if_changed(&path, "# Hello\n").unwrap(), WriteOutcome::Updated);
/// ```
pub fn write_if_changed(path: &Path, content: &str) -> Result<WriteOutcome> {
    let name = display_name(path);

    let outcome = match fs::read(path) {
        Ok(existing) if existing == content.as_bytes() => {
            info!("{} is already up to date. No changes needed.", name);
            return Ok(WriteOutcome::Unchanged);
        }
        Ok(_) => WriteOutcome::Updated,
        Err(e) if e.kind() == ErrorKind::NotFound => WriteOutcome::Created,
        Err(e) => {
            return Err(FilesError::IoError {
                path: path.display().to_string(),
                source: e,
            });
        }
    };

    write_atomic(path, content)?;

    match outcome {
        WriteOutcome::Created => info!("{} successfully created!", name),
        _ => info!("{} successfully updated!", name),
    }
    Ok(outcome)
}

/// Writes through a temporary sibling and renames it into place.
fn write_atomic(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| FilesError::IoError {
            path: parent.display().to_string(),
            source: e,
        })?;
    }

    let mut temp_name = path.file_name().unwrap_or_default().to_os_string();
    temp_name.push(".tmp");
    let temp_path = path.with_file_name(temp_name);

    fs::write(&temp_path, content).map_err(|e| FilesError::IoError {
        path: temp_path.display().to_string(),
        source: e,
    })?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        FilesError::IoError {
            path: path.display().to_string(),
            source: e,
        }
    })
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned())
}

/// Outcome of writing a whole [`FileSet`](crate::FileSet).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WriteReport {
    /// Per-file outcomes in write order
    pub files: Vec<WrittenFile>,
}

/// One entry of a [`WriteReport`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WrittenFile {
    /// Repository-relative path
    pub path: String,
    /// What happened to it
    pub outcome: WriteOutcome,
}

impl WriteReport {
    /// Appends an outcome.
    pub fn record(&mut self, path: impl Into<String>, outcome: WriteOutcome) {
        self.files.push(WrittenFile {
            path: path.into(),
            outcome,
        });
    }

    /// Appends every entry of `other`.
    pub fn merge(&mut self, other: Self) {
        self.files.extend(other.files);
    }

    /// Number of files with the given outcome.
    #[must_use]
    pub fn count(&self, outcome: WriteOutcome) -> usize {
        self.files.iter().filter(|f| f.outcome == outcome).count()
    }

    /// Number of files actually written.
    #[must_use]
    pub fn written(&self) -> usize {
        self.files.iter().filter(|f| f.outcome.is_write()).count()
    }

    /// Returns `true` if nothing was written.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.written() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_unchanged_file_is_not_rewritten() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("README.md");
        fs::write(&path, "same").unwrap();
        let before = fs::metadata(&path).unwrap().modified().unwrap();

        assert_eq!(write_if_changed(&path, "same").unwrap(), WriteOutcome::Unchanged);
        assert_eq!(fs::metadata(&path).unwrap().modified().unwrap(), before);
    }

    #[test]
    fn test_creates_parent_directories() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("website/public/data/agents.json");
        assert_eq!(write_if_changed(&path, "{}").unwrap(), WriteOutcome::Created);
        assert_eq!(fs::read_to_string(&path).unwrap(), "{}");
    }

    #[test]
    fn test_no_temp_file_left_behind() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("a.md");
        write_if_changed(&path, "x").unwrap();
        write_if_changed(&path, "y").unwrap();
        let names: Vec<_> = fs::read_dir(temp.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, ["a.md"]);
    }

    #[test]
    fn test_unreadable_target_is_error() {
        let temp = TempDir::new().unwrap();
        let err = write_if_changed(temp.path(), "x").unwrap_err();
        assert!(err.is_io_error());
    }

    #[test]
    fn test_report_counts() {
        let mut report = WriteReport::default();
        report.record("a", WriteOutcome::Created);
        report.record("b", WriteOutcome::Unchanged);
        report.record("c", WriteOutcome::Updated);
        assert_eq!(report.written(), 2);
        assert_eq!(report.count(WriteOutcome::Unchanged), 1);
        assert!(!report.is_noop());
        assert!(WriteReport::default().is_noop());
    }
}
