//! Registry errors.

use thiserror::Error;

/// Errors raised while querying the MCP registry.
///
/// [`crate::load_registry`] turns all of them into an empty registry; they
/// only surface to callers that drive a [`crate::RegistrySource`] directly.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The request could not be sent or the body could not be read.
    #[error("request to {url} failed: {source}")]
    Http {
        /// Requested URL
        url: String,
        /// Underlying client error
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("{url} returned status {status}")]
    Status {
        /// Requested URL
        url: String,
        /// HTTP status code
        status: u16,
    },

    /// The body was not the expected JSON document.
    #[error("unexpected response from {url}: {message}")]
    InvalidResponse {
        /// Requested URL
        url: String,
        /// What was wrong
        message: String,
    },
}

impl From<RegistryError> for catalog_core::Error {
    fn from(err: RegistryError) -> Self {
        Self::RegistryError {
            message: err.to_string(),
        }
    }
}
