//! Registry entries and server-name matching.

use serde::{Deserialize, Serialize};

/// One server listed in the MCP registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryEntry {
    /// Canonical registry name, such as `io.github.github/github-mcp-server`
    pub name: String,
    /// Publisher-provided display name, lowercased
    pub display_name: String,
    /// Canonical name, lowercased
    pub full_name: String,
}

impl RegistryEntry {
    /// Creates an entry, falling back to `name` for the display name.
    #[must_use]
    pub fn new(name: impl Into<String>, display_name: Option<&str>) -> Self {
        let name = name.into();
        let display_name = display_name
            .filter(|d| !d.is_empty())
            .unwrap_or(&name)
            .to_lowercase();
        let full_name = name.to_lowercase();
        Self {
            name,
            display_name,
            full_name,
        }
    }

    /// Page URL of the server on GitHub.
    #[must_use]
    pub fn link(&self) -> String {
        format!("https://github.com/mcp/{}", self.name)
    }

    /// Returns `true` if `server` (already lowercased) names this entry.
    ///
    /// Matches the display name, the full name, or the part after `/` with
    /// a `-mcp-server` or `-mcp` suffix removed.
    fn matches(&self, server: &str) -> bool {
        if self.display_name == server || self.full_name == server {
            return true;
        }
        self.full_name
            .split_once('/')
            .map(|(_, short)| short.split('/').next().unwrap_or(short))
            .filter(|short| !short.is_empty())
            .is_some_and(|short| {
                let short = short.replacen("-mcp-server", "", 1).replacen("-mcp", "", 1);
                short == server
            })
    }
}

/// MCP registry snapshot, fetched once per run and passed to generators.
///
/// # Examples
///
/// ```
/// use catalog_registry::{McpRegistry, RegistryEntry};
///
/// let registry = McpRegistry::from_entries(vec![RegistryEntry::new(
///     "com.apify/apify-mcp-server",
///     Some("Apify"),
/// )]);
///
/// assert!(registry.find("apify").is_some());
/// assert!(registry.find("APIFY").is_some());
/// assert!(registry.find("unknown").is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct McpRegistry {
    entries: Vec<RegistryEntry>,
}

impl McpRegistry {
    /// Empty registry, used offline or when the fetch failed.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Registry over known entries.
    #[must_use]
    pub const fn from_entries(entries: Vec<RegistryEntry>) -> Self {
        Self { entries }
    }

    /// Finds the entry for an agent-declared server name, case-insensitively.
    #[must_use]
    pub fn find(&self, server_name: &str) -> Option<&RegistryEntry> {
        let wanted = server_name.trim().to_lowercase();
        self.entries.iter().find(|entry| entry.matches(&wanted))
    }

    /// All entries in fetch order.
    #[must_use]
    pub fn entries(&self) -> &[RegistryEntry] {
        &self.entries
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the registry has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> McpRegistry {
        McpRegistry::from_entries(vec![
            RegistryEntry::new("io.github.github/github-mcp-server", Some("GitHub")),
            RegistryEntry::new("com.microsoft/playwright-mcp", None),
            RegistryEntry::new("io.example/Terraform", Some("HashiCorp Terraform")),
        ])
    }

    #[test]
    fn test_entry_lowercases_names() {
        let entry = RegistryEntry::new("Io.Example/Thing", Some("My Thing"));
        assert_eq!(entry.display_name, "my thing");
        assert_eq!(entry.full_name, "io.example/thing");
        assert_eq!(entry.name, "Io.Example/Thing");
    }

    #[test]
    fn test_display_name_falls_back_to_name() {
        let entry = RegistryEntry::new("a/b", Some(""));
        assert_eq!(entry.display_name, "a/b");
    }

    #[test]
    fn test_match_by_display_name() {
        let binding = registry();
        let found = binding.find("github").unwrap();
        assert_eq!(found.link(), "https://github.com/mcp/io.github.github/github-mcp-server");
    }

    #[test]
    fn test_match_by_short_name_without_suffix() {
        assert_eq!(
            registry().find("Playwright").unwrap().name,
            "com.microsoft/playwright-mcp"
        );
        assert_eq!(registry().find("terraform").unwrap().name, "io.example/Terraform");
    }

    #[test]
    fn test_match_by_full_name() {
        assert!(registry().find("com.microsoft/playwright-mcp").is_some());
    }

    #[test]
    fn test_no_match() {
        assert!(registry().find("postgres").is_none());
        assert!(McpRegistry::empty().find("github").is_none());
    }
}
