//! Rendered output sets and the idempotent writer.
//!
//! Generators collect their outputs into a [`FileSet`]; [`FileSet::write_to`]
//! then writes each file through [`write_if_changed`], which only touches
//! the disk when content differs.
//!
//! # Examples
//!
//! ```
//! use catalog_files::{FileSet, WriteOutcome};
//! # let temp = tempfile::TempDir::new().unwrap();
//!
//! let mut files = FileSet::new();
//! files.insert("docs/README.prompts.md", "# Prompts\n").unwrap();
//!
//! let first = files.write_to(temp.path()).unwrap();
//! assert_eq!(first.count(WriteOutcome::Created), 1);
//!
//! let second = files.write_to(temp.path()).unwrap();
//! assert!(second.is_noop());
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

mod error;
mod fileset;
mod writer;

pub use error::{FilesError, Result};
pub use fileset::{FileSet, OutputFile};
pub use writer::{WriteOutcome, WriteReport, WrittenFile, write_if_changed};
