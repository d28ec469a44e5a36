//! Core types, configuration, and errors for the Copilot catalog generator.
//!
//! This crate provides the foundational types shared by every other crate
//! in the workspace.
//!
//! # Architecture
//!
//! The core consists of:
//! - Strong domain types (`ArtifactKind`, `CollectionId`, `SkillName`)
//! - The typed collection manifest
//! - Repository layout, the single source of input and output paths
//! - Error hierarchy with contextual information
//! - TOML configuration

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

mod error;

pub mod cli;
pub mod config;
pub mod layout;
pub mod manifest;
pub mod types;

pub use config::CatalogConfig;
pub use error::{Error, Result};
pub use layout::RepoLayout;
pub use manifest::{CollectionItem, CollectionManifest, DisplayOptions, ItemOrdering};
pub use types::{ArtifactKind, CollectionId, SkillName};
