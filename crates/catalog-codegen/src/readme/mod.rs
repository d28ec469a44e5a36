//! Markdown README generation.
//!
//! [`generate_readmes`] renders one page per category under `docs/`, one
//! page per collection next to its manifest, and the featured-collections
//! block of the root `README.md`. Nothing is written here; the caller hands
//! the returned [`FileSet`] to the idempotent writer.

pub mod collection;
pub mod featured;
pub mod mcp_links;
pub mod sections;

pub use collection::collection_readme;
pub use featured::{featured_section, splice_featured};
pub use sections::{category_readme, category_text};

use crate::context::{Catalog, GenerationContext};
use catalog_core::{ArtifactKind, Error, Result};
use catalog_files::FileSet;
use std::fs;
use tracing::{info, warn};

/// `docs/README.<name>.md` page names, `None` standing for collections.
const CATEGORY_PAGES: [(Option<ArtifactKind>, &str); 6] = [
    (Some(ArtifactKind::Instruction), "instructions"),
    (Some(ArtifactKind::Prompt), "prompts"),
    (Some(ArtifactKind::Agent), "agents"),
    (Some(ArtifactKind::Skill), "skills"),
    (Some(ArtifactKind::Hook), "hooks"),
    (None, "collections"),
];

fn category_section(ctx: &GenerationContext, catalog: &Catalog, kind: Option<ArtifactKind>) -> Option<String> {
    match kind {
        Some(ArtifactKind::Instruction) => sections::instructions_section(ctx, &catalog.instructions),
        Some(ArtifactKind::Prompt) => sections::prompts_section(ctx, &catalog.prompts),
        Some(ArtifactKind::Agent) => sections::agents_section(ctx, &catalog.agents),
        Some(ArtifactKind::Skill) => sections::skills_section(ctx, &catalog.skills),
        Some(ArtifactKind::Hook) => sections::hooks_section(ctx, &catalog.hooks),
        None => sections::collections_section(ctx, &catalog.collections),
    }
}

/// Renders every README output for `catalog`.
///
/// The root `README.md` is included only when it exists and a featured
/// block could be spliced into it.
///
/// # Errors
///
/// Returns an error if the root README exists but cannot be read. A
/// collection whose page clashes with an earlier one, or whose id is not a
/// valid file name, is logged and skipped.
pub fn generate_readmes(ctx: &GenerationContext, catalog: &Catalog) -> Result<FileSet> {
    let text = ctx.text();
    let mut files = FileSet::new();

    info!("Generating category README files");
    for (kind, name) in CATEGORY_PAGES {
        let (header, usage) = category_text(text, kind);
        let page = category_readme(category_section(ctx, catalog, kind), header, usage, text);
        files.insert(format!("docs/README.{name}.md"), page)?;
    }

    if !catalog.collections.is_empty() {
        info!("Generating {} collection README files", catalog.collections.len());
    }
    for source in &catalog.collections {
        let path = format!("collections/{}.md", source.id);
        if let Err(e) = files.insert(&path, collection_readme(ctx, source)) {
            warn!("Skipping collection page for {}: {e}", source.file_name);
        }
    }

    match featured_section(ctx, &catalog.collections) {
        Some(section) => {
            let path = ctx.layout().root_readme();
            if path.is_file() {
                let readme = fs::read_to_string(&path).map_err(|e| Error::io(&path, e))?;
                files.insert("README.md", splice_featured(&readme, &section, text))?;
            } else {
                warn!("README.md not found, skipping featured collections update");
            }
        }
        None => info!("No featured collections to add to README.md"),
    }

    Ok(files)
}
