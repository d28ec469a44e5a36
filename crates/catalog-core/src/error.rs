//! Error types for the catalog generator.
//!
//! Library crates in the workspace return [`Result`] over this [`Error`]
//! so that the binary can map any failure to an exit code in one place.
//!
//! # Examples
//!
//! ```
//! use catalog_core::{Error, Result};
//!
//! fn require_id(id: &str) -> Result<()> {
//!     if id.is_empty() {
//!         return Err(Error::ValidationError {
//!             field: "id".to_string(),
//!             reason: "is required".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//!
//! let err = require_id("").unwrap_err();
//! assert!(err.is_validation_error());
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the catalog generator.
#[derive(Error, Debug)]
pub enum Error {
    /// Filesystem operation failed.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        /// Path being read or written
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Front-matter or YAML document could not be parsed.
    #[error("failed to parse {}: {message}", path.display())]
    ParseError {
        /// File that failed to parse
        path: PathBuf,
        /// Parser message
        message: String,
    },

    /// The MCP registry could not be queried.
    #[error("MCP registry error: {message}")]
    RegistryError {
        /// Description of the failure
        message: String,
    },

    /// Template registration or rendering failed.
    #[error("template error in '{template}': {message}")]
    TemplateError {
        /// Template name
        template: String,
        /// Handlebars message
        message: String,
    },

    /// A field failed validation.
    ///
    /// Raised by strong types such as `CollectionId` and `SkillName` and by
    /// scaffolding commands when user input is out of bounds.
    #[error("Validation error in {field}: {reason}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Reason for the failure
        reason: String,
    },

    /// A file or directory that must not exist already does.
    #[error("already exists: {}", path.display())]
    AlreadyExists {
        /// Conflicting path
        path: PathBuf,
    },

    /// A required resource does not exist.
    #[error("Resource not found: {resource}")]
    ResourceNotFound {
        /// Identifier of the missing resource
        resource: String,
    },

    /// Configuration error.
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration problem
        message: String,
    },

    /// JSON serialization failed.
    #[error("Serialization error: {message}")]
    SerializationError {
        /// Description of the serialization failure
        message: String,
        /// Underlying serde error
        #[source]
        source: Option<serde_json::Error>,
    },

    /// Invalid argument error.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl Error {
    /// Builds an [`Error::Io`] for `path`.
    ///
    /// # Examples
    ///
    /// ```
    /// use catalog_core::Error;
    /// use std::io;
    ///
    /// let err = Error::io("README.md", io::Error::from(io::ErrorKind::NotFound));
    /// assert!(err.is_io_error());
    /// ```
    #[must_use]
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns `true` if this is an I/O error.
    #[must_use]
    pub const fn is_io_error(&self) -> bool {
        matches!(self, Self::Io { .. })
    }

    /// Returns `true` if this is a parse error.
    ///
    /// # Examples
    ///
    /// ```
    /// use catalog_core::Error;
    ///
    /// let err = Error::ParseError {
    ///     path: "a.collection.yml".into(),
    ///     message: "bad indentation".to_string(),
    /// };
    /// assert!(err.is_parse_error());
    /// ```
    #[must_use]
    pub const fn is_parse_error(&self) -> bool {
        matches!(self, Self::ParseError { .. })
    }

    /// Returns `true` if this is a registry error.
    #[must_use]
    pub const fn is_registry_error(&self) -> bool {
        matches!(self, Self::RegistryError { .. })
    }

    /// Returns `true` if this is a validation error.
    #[must_use]
    pub const fn is_validation_error(&self) -> bool {
        matches!(self, Self::ValidationError { .. })
    }

    /// Returns `true` if the target already exists.
    #[must_use]
    pub const fn is_already_exists(&self) -> bool {
        matches!(self, Self::AlreadyExists { .. })
    }

    /// Returns `true` if this is a resource not found error.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::ResourceNotFound { .. })
    }

    /// Returns `true` if this is a configuration error.
    #[must_use]
    pub const fn is_config_error(&self) -> bool {
        matches!(self, Self::ConfigError { .. })
    }

    /// Returns `true` if this is a template error.
    #[must_use]
    pub const fn is_template_error(&self) -> bool {
        matches!(self, Self::TemplateError { .. })
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

/// Result type alias using the workspace [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
