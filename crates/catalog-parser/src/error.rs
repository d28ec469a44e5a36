//! Parser errors.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading one source file or folder.
///
/// None of these is fatal for a generator run: callers log the error with
/// `tracing::warn!` and skip the artifact.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// File being read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The YAML document or front-matter block is malformed.
    #[error("invalid YAML in {}: {message}", path.display())]
    InvalidYaml {
        /// File being parsed
        path: PathBuf,
        /// YAML parser message
        message: String,
    },

    /// The YAML document is valid but not a key/value mapping.
    #[error("expected a YAML mapping in {}", path.display())]
    NotAMapping {
        /// File being parsed
        path: PathBuf,
    },

    /// A folder artifact lacks its metadata file.
    #[error("{} is missing {file}", path.display())]
    MissingMetadataFile {
        /// Artifact folder
        path: PathBuf,
        /// Expected file name
        file: &'static str,
    },

    /// A required front-matter field is absent or not a string.
    #[error("{} has no '{field}' in its front-matter", path.display())]
    MissingField {
        /// File being parsed
        path: PathBuf,
        /// Field name
        field: &'static str,
    },
}

impl ParseError {
    /// Path of the file or folder the error refers to.
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::Io { path, .. }
            | Self::InvalidYaml { path, .. }
            | Self::NotAMapping { path }
            | Self::MissingMetadataFile { path, .. }
            | Self::MissingField { path, .. } => path,
        }
    }

    /// Returns `true` if the source could not be read at all.
    #[must_use]
    pub const fn is_io_error(&self) -> bool {
        matches!(self, Self::Io { .. })
    }
}

impl From<ParseError> for catalog_core::Error {
    fn from(err: ParseError) -> Self {
        match err {
            ParseError::Io { path, source } => Self::Io { path, source },
            other => Self::ParseError {
                path: other.path().to_path_buf(),
                message: other.to_string(),
            },
        }
    }
}
