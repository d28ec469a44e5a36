//! Featured-collections block of the root README.
//!
//! The block starts at the first line of the featured section text and runs
//! up to the end marker heading. Re-splicing an unchanged block is a no-op.

use crate::context::GenerationContext;
use crate::readme::sections::{collections_table, sorted_collections};
use crate::text::TextTable;
use catalog_parser::CollectionSource;

/// Featured block, or `None` when no collection is featured.
#[must_use]
pub fn featured_section(ctx: &GenerationContext, collections: &[CollectionSource]) -> Option<String> {
    let featured: Vec<&CollectionSource> = sorted_collections(collections)
        .into_iter()
        .filter(|c| c.manifest.is_featured())
        .collect();
    if featured.is_empty() {
        return None;
    }

    let text = ctx.text();
    let table = collections_table(text, &featured, "collections/", false);
    Some(format!("{}\n\n{table}", text.featured_collections_section))
}

/// Splices `section` into `readme`.
///
/// An existing block is replaced up to the end marker; without a block the
/// section is inserted before the end marker. When neither fits, the README
/// is returned unchanged.
///
/// # Examples
///
/// ```
/// use catalog_codegen::readme::splice_featured;
/// use catalog_codegen::TextTable;
///
/// let text = TextTable::default();
/// let readme = "# Repo\n\n## MCP Server\n";
/// let out = splice_featured(readme, "## 🌟 Featured Collections\n\nnew", &text);
/// assert_eq!(out, "# Repo\n\n## 🌟 Featured Collections\n\nnew\n\n## MCP Server\n");
/// ```
#[must_use]
pub fn splice_featured(readme: &str, section: &str, text: &TextTable) -> String {
    let start_marker = text.featured_start_marker();
    let end_marker = text.featured_end_marker.as_str();

    if let Some(start) = readme.find(start_marker).filter(|_| !start_marker.is_empty()) {
        return readme[start..].find(end_marker).map_or_else(
            || readme.to_string(),
            |offset| {
                let end = start + offset;
                format!("{}{section}\n\n{}", &readme[..start], &readme[end..])
            },
        );
    }

    readme.find(end_marker).map_or_else(
        || readme.to_string(),
        |end| format!("{}{section}\n\n{}", &readme[..end], &readme[end..]),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECTION: &str = "## 🌟 Featured Collections\n\n| table |\n";

    #[test]
    fn test_replaces_existing_block() {
        let text = TextTable::default();
        let readme = "intro\n## 🌟 Featured Collections\n\nold stuff\n\n## MCP Server\nrest\n";
        let out = splice_featured(readme, SECTION, &text);
        assert_eq!(
            out,
            "intro\n## 🌟 Featured Collections\n\n| table |\n\n\n## MCP Server\nrest\n"
        );
        assert_eq!(splice_featured(&out, SECTION, &text), out);
    }

    #[test]
    fn test_start_without_end_is_unchanged() {
        let text = TextTable::default();
        let readme = "## 🌟 Featured Collections\n\nold\n";
        assert_eq!(splice_featured(readme, SECTION, &text), readme);
    }

    #[test]
    fn test_no_markers_is_unchanged() {
        let text = TextTable::default();
        assert_eq!(splice_featured("# Plain\n", SECTION, &text), "# Plain\n");
    }
}
