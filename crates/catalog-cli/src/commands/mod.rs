//! Command implementations for the catalog CLI.
//!
//! Each command module resolves its inputs from the [`common::Workspace`],
//! performs the operation, and formats output according to the requested
//! format.

pub mod all;
pub mod collection;
pub mod common;
pub mod completions;
pub mod config;
pub mod marketplace;
pub mod plugin;
pub mod readme;
pub mod skill;
pub mod validate;
pub mod website;
