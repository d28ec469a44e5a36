//! Output generation for the Copilot catalog.
//!
//! Turns the parsed source tree into rendered files:
//! - [`readme`] builds the category pages, collection pages and the
//!   featured splice of the root README
//! - [`website`] builds the JSON documents of the static site
//! - [`plugin`] renders plugin manifests, plugin READMEs and the marketplace
//! - [`template_engine`] renders the scaffolding templates
//!
//! Generators take a [`GenerationContext`] and return a
//! [`FileSet`](catalog_files::FileSet); writing is left to the caller.
//!
//! # Examples
//!
//! ```no_run
//! use catalog_codegen::{Catalog, GenerationContext, readme::generate_readmes};
//! use catalog_core::RepoLayout;
//!
//! # fn main() -> catalog_core::Result<()> {
//! let layout = RepoLayout::new(".");
//! let catalog = Catalog::scan(&layout);
//! let ctx = GenerationContext::new(layout, "https://raw.githubusercontent.com/github/awesome-copilot/main");
//!
//! let files = generate_readmes(&ctx, &catalog)?;
//! let report = files.write_to(ctx.layout().root())?;
//! println!("{} files written", report.written());
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

mod context;
mod text;

pub mod markdown;
pub mod plugin;
pub mod readme;
pub mod template_engine;
pub mod website;

pub use context::{Catalog, GenerationContext};
pub use readme::generate_readmes;
pub use template_engine::TemplateEngine;
pub use text::TextTable;
pub use website::generate_website_data;
