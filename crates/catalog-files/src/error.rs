//! Output errors.

use thiserror::Error;

/// Errors raised while assembling or writing generated files.
#[derive(Debug, Error)]
pub enum FilesError {
    /// Output path is absolute, empty or not valid UTF-8.
    #[error("invalid output path: {path}")]
    InvalidPath {
        /// Offending path
        path: String,
    },

    /// Output path climbs out of the output root.
    #[error("output path escapes the root: {path}")]
    InvalidPathComponent {
        /// Offending path
        path: String,
    },

    /// Two generators produced the same output path.
    #[error("duplicate output path: {path}")]
    DuplicatePath {
        /// Offending path
        path: String,
    },

    /// Reading or writing a file failed.
    #[error("I/O error at {path}: {source}")]
    IoError {
        /// Path being accessed
        path: String,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
}

impl FilesError {
    /// Returns `true` for path validation errors.
    #[must_use]
    pub const fn is_path_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidPath { .. } | Self::InvalidPathComponent { .. } | Self::DuplicatePath { .. }
        )
    }

    /// Returns `true` for I/O errors.
    #[must_use]
    pub const fn is_io_error(&self) -> bool {
        matches!(self, Self::IoError { .. })
    }
}

impl From<FilesError> for catalog_core::Error {
    fn from(err: FilesError) -> Self {
        match err {
            FilesError::IoError { path, source } => Self::Io {
                path: path.into(),
                source,
            },
            other => Self::InvalidArgument(other.to_string()),
        }
    }
}

/// Result alias for output operations.
pub type Result<T> = std::result::Result<T, FilesError>;
