//! Catalog CLI library.
//!
//! Exposes the argument definitions, command implementations and output
//! formatters behind the `copilot-catalog` binary so they can be tested.
//!
//! # Commands
//!
//! - `readme` - Regenerate category, collection and root README content
//! - `website-data` - Regenerate the website JSON documents
//! - `validate` - Check every collection manifest
//! - `collection new` / `skill new` - Scaffold new sources
//! - `plugin migrate|refresh` / `marketplace` - Maintain plugin packaging
//! - `config show|init` - Inspect or create `copilot-catalog.toml`
//! - `completions` - Generate shell completions
//! - `all` - Validate, then regenerate everything

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::unnecessary_wraps)]

pub mod actions;
pub mod cli;
pub mod commands;
pub mod formatters;
pub mod runner;

pub use cli::{Cli, Commands};
