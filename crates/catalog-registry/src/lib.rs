//! MCP server registry lookup.
//!
//! Agents declare MCP servers by short name. The registry maps those names
//! to canonical entries so generated tables can link to the server page.
//! It is fetched once per run through a [`RegistrySource`] and then passed
//! explicitly to every generator as an [`McpRegistry`].
//!
//! # Examples
//!
//! ```no_run
//! use catalog_registry::{RegistryClient, load_registry};
//!
//! # async fn run() {
//! let client = RegistryClient::new("https://api.mcp.github.com/v0.1/servers/");
//! let registry = load_registry(&client).await;
//! if let Some(entry) = registry.find("github") {
//!     println!("{}", entry.link());
//! }
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

mod error;
mod registry;
mod source;

pub use error::RegistryError;
pub use registry::{McpRegistry, RegistryEntry};
pub use source::{MAX_PAGES, RegistryClient, RegistryPage, RegistrySource, load_registry};
