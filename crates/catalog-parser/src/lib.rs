//! Source parsing for the Copilot catalog.
//!
//! Turns repository files into typed records:
//! - [`split_front_matter`], [`MarkdownDocument`] and [`parse_collection_file`]
//!   read front-matter blocks and plain YAML documents
//! - [`scan_kind`] and [`scan_collections`] load every artifact of a kind
//! - the extractors resolve titles, MCP server configs and bundled assets
//! - [`GitDates`] maps files to their last commit date
//!
//! Parsing never aborts a run: a file that cannot be read or parsed yields
//! a [`ParseError`] that callers log and skip.
//!
//! # Examples
//!
//! ```no_run
//! use catalog_core::{ArtifactKind, RepoLayout};
//! use catalog_parser::scan_kind;
//!
//! let layout = RepoLayout::new(".");
//! for agent in scan_kind(&layout, ArtifactKind::Agent) {
//!     println!("{} -> {}", agent.title, agent.path);
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

mod error;
mod extract;
mod frontmatter;
mod git_dates;
mod records;
mod scan;

pub use error::ParseError;
pub use extract::{
    McpServerConfig, bundled_assets, compare_titles, first_heading, folder_files, hook_events,
    mcp_server_configs, resolve_title, title_case_file_stem, title_case_name,
};
pub use frontmatter::{
    FrontMatter, MarkdownDocument, parse_collection_file, parse_yaml_file, split_front_matter,
};
pub use git_dates::GitDates;
pub use records::{
    AgentMeta, ApplyTo, Artifact, ArtifactMeta, BundledFile, Handoff, HookMeta, InstructionMeta,
    PromptMeta, SkillMeta,
};
pub use scan::{
    CollectionSource, HOOKS_FILE, item_location, list_files, list_folders, load_file, load_folder,
    load_item, scan_collections, scan_kind,
};
