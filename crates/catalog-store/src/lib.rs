//! On-disk operations of the Copilot catalog.
//!
//! Everything here reads or changes the repository tree directly, as
//! opposed to the generators which only render a
//! [`FileSet`](catalog_files::FileSet):
//! - [`validation`] checks every collection manifest
//! - [`scaffold`] creates new collection manifests and skill folders
//! - [`plugin`] materializes collections as plugin directories
//! - [`marketplace`] lists the plugins in `marketplace.json`
//!
//! # Examples
//!
//! ```no_run
//! use catalog_core::{CatalogConfig, RepoLayout};
//! use catalog_store::plugin::PluginStore;
//! use catalog_store::validation::validate_collections;
//!
//! # fn main() -> catalog_core::Result<()> {
//! let layout = RepoLayout::new(".");
//! let config = CatalogConfig::default();
//!
//! let report = validate_collections(&layout);
//! if report.is_valid() {
//!     let summary = PluginStore::new(&layout, &config).migrate("git-tools")?;
//!     println!("{} commands linked", summary.commands);
//! }
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod marketplace;
pub mod plugin;
pub mod scaffold;
pub mod validation;

pub use marketplace::{marketplace_plugins, write_marketplace};
pub use plugin::{PluginStore, PluginSummary, RefreshReport};
pub use scaffold::{CollectionScaffold, SkillScaffold, create_collection, create_skill};
pub use validation::{FileReport, ValidationError, ValidationReport, validate_collections, validate_manifest};
