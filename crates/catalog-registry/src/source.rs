//! Registry sources and the paginated fetch.

use crate::error::RegistryError;
use crate::registry::{McpRegistry, RegistryEntry};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashSet;
use tracing::{info, warn};

/// Publisher metadata key holding the GitHub display name.
const PUBLISHER_META_KEY: &str = "io.modelcontextprotocol.registry/publisher-provided";

/// Upper bound on followed pages.
pub const MAX_PAGES: usize = 1000;

/// One page of registry results.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistryPage {
    /// Servers on this page
    pub entries: Vec<RegistryEntry>,
    /// Cursor of the next page, if any
    pub next_cursor: Option<String>,
}

impl RegistryPage {
    /// Parses a registry API page.
    ///
    /// Reads `servers[].server.name`, the display name from the publisher
    /// metadata (falling back to the name) and `metadata.nextCursor`.
    /// Entries without a name are skipped.
    ///
    /// # Examples
    ///
    /// ```
    /// use catalog_registry::RegistryPage;
    /// use serde_json::json;
    ///
    /// let page = RegistryPage::from_json(&json!({
    ///     "servers": [{"server": {"name": "io.github.github/github-mcp-server"}}],
    ///     "metadata": {"nextCursor": "abc"}
    /// }));
    /// assert_eq!(page.entries.len(), 1);
    /// assert_eq!(page.next_cursor.as_deref(), Some("abc"));
    /// ```
    #[must_use]
    pub fn from_json(body: &Value) -> Self {
        let entries = body
            .get("servers")
            .and_then(Value::as_array)
            .map(|servers| {
                servers
                    .iter()
                    .filter_map(|entry| {
                        let server = entry.get("server")?;
                        let name = server.get("name")?.as_str()?;
                        let display_name = server
                            .get("_meta")
                            .and_then(|meta| meta.get(PUBLISHER_META_KEY))
                            .and_then(|publisher| publisher.get("github"))
                            .and_then(|github| github.get("displayName"))
                            .and_then(Value::as_str);
                        Some(RegistryEntry::new(name, display_name))
                    })
                    .collect()
            })
            .unwrap_or_default();

        let next_cursor = body
            .get("metadata")
            .and_then(|metadata| metadata.get("nextCursor"))
            .and_then(Value::as_str)
            .filter(|cursor| !cursor.is_empty())
            .map(str::to_string);

        Self {
            entries,
            next_cursor,
        }
    }
}

/// Anything that can serve registry pages.
///
/// The HTTP client implements it for the live API; tests plug in fixed
/// pages.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrySource: Send + Sync {
    /// Fetches the page after `cursor`, or the first page for `None`.
    ///
    /// # Errors
    ///
    /// Returns a [`RegistryError`] if the page cannot be fetched or parsed.
    async fn fetch_page(&self, cursor: Option<String>) -> Result<RegistryPage, RegistryError>;
}

/// HTTP client for the MCP registry API.
#[derive(Debug, Clone)]
pub struct RegistryClient {
    http: reqwest::Client,
    base_url: String,
}

impl RegistryClient {
    /// Creates a client for the registry at `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// URL of the page after `cursor`.
    ///
    /// # Examples
    ///
    /// ```
    /// use catalog_registry::RegistryClient;
    ///
    /// let client = RegistryClient::new("https://api.example.com/servers/");
    /// assert_eq!(client.page_url(None), "https://api.example.com/servers/");
    /// assert_eq!(
    ///     client.page_url(Some("a b/c")),
    ///     "https://api.example.com/servers/?cursor=a%20b%2Fc"
    /// );
    /// ```
    #[must_use]
    pub fn page_url(&self, cursor: Option<&str>) -> String {
        cursor.map_or_else(
            || self.base_url.clone(),
            |cursor| format!("{}?cursor={}", self.base_url, urlencoding::encode(cursor)),
        )
    }
}

#[async_trait]
impl RegistrySource for RegistryClient {
    async fn fetch_page(&self, cursor: Option<String>) -> Result<RegistryPage, RegistryError> {
        let url = self.page_url(cursor.as_deref());

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|source| RegistryError::Http {
                url: url.clone(),
                source,
            })?;

        if !response.status().is_success() {
            return Err(RegistryError::Status {
                url,
                status: response.status().as_u16(),
            });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| RegistryError::InvalidResponse {
                url: url.clone(),
                message: e.to_string(),
            })?;

        if !body.is_object() {
            return Err(RegistryError::InvalidResponse {
                url,
                message: "expected a JSON object".to_string(),
            });
        }

        Ok(RegistryPage::from_json(&body))
    }
}

/// Follows every page of `source` and collects the registry.
///
/// Any failure, on any page, degrades to an empty registry with a warning:
/// registry links are decoration, never a reason to abort generation.
pub async fn load_registry(source: &dyn RegistrySource) -> McpRegistry {
    info!("Fetching MCP registry...");
    match fetch_all(source).await {
        Ok(entries) => {
            info!("Loaded {} servers from the MCP registry", entries.len());
            McpRegistry::from_entries(entries)
        }
        Err(e) => {
            warn!("Failed to load the MCP registry: {}", e);
            McpRegistry::empty()
        }
    }
}

async fn fetch_all(source: &dyn RegistrySource) -> Result<Vec<RegistryEntry>, RegistryError> {
    let mut entries = Vec::new();
    let mut seen = HashSet::new();
    let mut cursor: Option<String> = None;

    for _ in 0..MAX_PAGES {
        let page = source.fetch_page(cursor.clone()).await?;
        entries.extend(page.entries);
        match page.next_cursor {
            Some(next) if seen.insert(next.clone()) => cursor = Some(next),
            Some(next) => {
                warn!("Registry repeated cursor {}, stopping pagination", next);
                break;
            }
            None => break,
        }
    }

    Ok(entries)
}
