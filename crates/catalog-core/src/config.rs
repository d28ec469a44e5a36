//! Catalog configuration.
//!
//! Stored in TOML. Lookup order:
//! 1. an explicit `--config` path
//! 2. `copilot-catalog.toml` at the repository root
//! 3. `<config dir>/copilot-catalog/config.toml` (via `dirs`)
//! 4. built-in defaults
//!
//! ```toml
//! [repository]
//! root = "."
//! raw_base_url = "https://raw.githubusercontent.com/github/awesome-copilot/main"
//! repository_url = "https://github.com/github/awesome-copilot"
//!
//! [registry]
//! enabled = true
//! url = "https://api.mcp.github.com/v0.1/servers/"
//!
//! [plugins]
//! author = "Awesome Copilot Community"
//! license = "MIT"
//! version = "1.0.0"
//!
//! [marketplace]
//! name = "awesome-copilot"
//! owner_name = "GitHub"
//! owner_email = "copilot@github.com"
//!
//! [text]
//! table = "catalog-text.toml"
//! ```

use crate::{Error, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::debug;

/// File name looked up at the repository root.
pub const CONFIG_FILE_NAME: &str = "copilot-catalog.toml";

/// Default MCP registry endpoint.
pub const DEFAULT_REGISTRY_URL: &str = "https://api.mcp.github.com/v0.1/servers/";

static VERSION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.\d+\.\d+([-+][0-9A-Za-z.-]+)?$").expect("valid regex"));

/// Complete catalog configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Repository URLs
    #[serde(default)]
    pub repository: RepositoryConfig,

    /// MCP registry lookup
    #[serde(default)]
    pub registry: RegistryConfig,

    /// Plugin metadata
    #[serde(default)]
    pub plugins: PluginConfig,

    /// Marketplace metadata
    #[serde(default)]
    pub marketplace: MarketplaceConfig,

    /// Locale/template table override
    #[serde(default)]
    pub text: TextConfig,
}

/// `[repository]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepositoryConfig {
    /// Repository root, overridden by `--root`
    pub root: Option<PathBuf>,

    /// Raw-content base URL used by the install badges
    pub raw_base_url: String,

    /// Browsable repository URL written into plugin metadata
    pub repository_url: String,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            root: None,
            raw_base_url: "https://raw.githubusercontent.com/github/awesome-copilot/main"
                .to_string(),
            repository_url: "https://github.com/github/awesome-copilot".to_string(),
        }
    }
}

/// `[registry]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Query the registry at all
    pub enabled: bool,

    /// First page URL
    pub url: String,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            url: DEFAULT_REGISTRY_URL.to_string(),
        }
    }
}

/// `[plugins]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginConfig {
    /// `author.name` in `plugin.json`
    pub author: String,

    /// `license` in `plugin.json`
    pub license: String,

    /// `version` in `plugin.json`
    pub version: String,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            author: "Awesome Copilot Community".to_string(),
            license: "MIT".to_string(),
            version: "1.0.0".to_string(),
        }
    }
}

/// `[marketplace]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketplaceConfig {
    /// Marketplace name, also used in plugin install commands
    pub name: String,

    /// `metadata.description`
    pub description: String,

    /// `metadata.version`
    pub version: String,

    /// `owner.name`
    pub owner_name: String,

    /// `owner.email`
    pub owner_email: String,
}

impl Default for MarketplaceConfig {
    fn default() -> Self {
        Self {
            name: "awesome-copilot".to_string(),
            description: "Community-driven collection of GitHub Copilot plugins, agents, prompts, and skills".to_string(),
            version: "1.0.0".to_string(),
            owner_name: "GitHub".to_string(),
            owner_email: "copilot@github.com".to_string(),
        }
    }
}

/// `[text]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextConfig {
    /// TOML file overriding the built-in English text table,
    /// relative to the repository root
    pub table: Option<PathBuf>,
}

impl CatalogConfig {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] naming the first invalid key.
    ///
    /// # Examples
    ///
    /// ```
    /// use catalog_core::CatalogConfig;
    ///
    /// let mut config = CatalogConfig::default();
    /// assert!(config.validate().is_ok());
    ///
    /// config.plugins.version = "one".to_string();
    /// assert!(config.validate().unwrap_err().is_config_error());
    /// ```
    pub fn validate(&self) -> Result<()> {
        for (key, url) in [
            ("repository.raw_base_url", &self.repository.raw_base_url),
            ("repository.repository_url", &self.repository.repository_url),
            ("registry.url", &self.registry.url),
        ] {
            if !(url.starts_with("https://") || url.starts_with("http://")) {
                return Err(Error::ConfigError {
                    message: format!("{key} must be an http(s) URL, got '{url}'"),
                });
            }
        }

        for (key, version) in [
            ("plugins.version", &self.plugins.version),
            ("marketplace.version", &self.marketplace.version),
        ] {
            if !VERSION_REGEX.is_match(version) {
                return Err(Error::ConfigError {
                    message: format!("{key} must be a semantic version, got '{version}'"),
                });
            }
        }

        if self.marketplace.name.trim().is_empty() {
            return Err(Error::ConfigError {
                message: "marketplace.name must not be empty".to_string(),
            });
        }

        Ok(())
    }

    /// Parses and validates configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the TOML is malformed or invalid.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| Error::ConfigError {
            message: format!("failed to parse configuration: {e}"),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes the configuration as pretty TOML.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if serialization fails.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::ConfigError {
            message: format!("failed to serialize configuration: {e}"),
        })
    }

    /// Loads configuration following the lookup order in the module docs.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit path is missing, or if a found file
    /// cannot be read or parsed.
    pub fn load(explicit: Option<&Path>, repo_root: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_file(path);
        }

        let candidates = [
            Some(repo_root.join(CONFIG_FILE_NAME)),
            user_config_path(),
        ];
        for candidate in candidates.into_iter().flatten() {
            if candidate.is_file() {
                return Self::load_file(&candidate);
            }
        }

        debug!("No configuration file found, using defaults");
        Ok(Self::default())
    }

    /// Loads configuration from one file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read, or
    /// [`Error::ConfigError`] if it is invalid.
    pub fn load_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        debug!("Loaded configuration from {}", path.display());
        Self::from_toml(&content)
    }
}

/// Per-user configuration path, if the platform has a config directory.
#[must_use]
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("copilot-catalog").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_is_valid() {
        assert!(CatalogConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = CatalogConfig::from_toml("[registry]\nenabled = false\n").unwrap();
        assert!(!config.registry.enabled);
        assert_eq!(config.registry.url, DEFAULT_REGISTRY_URL);
        assert_eq!(config.plugins.license, "MIT");
    }

    #[test]
    fn test_invalid_url_rejected() {
        let err = CatalogConfig::from_toml("[repository]\nraw_base_url = \"ftp://x\"\n")
            .unwrap_err();
        assert!(err.is_config_error());
        assert!(err.to_string().contains("raw_base_url"));
    }

    #[test]
    fn test_malformed_toml_rejected() {
        let err = CatalogConfig::from_toml("[registry\n").unwrap_err();
        assert!(err.is_config_error());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = CatalogConfig::default();
        let text = config.to_toml().unwrap();
        assert_eq!(CatalogConfig::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn test_load_prefers_repo_file() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join(CONFIG_FILE_NAME),
            "[marketplace]\nname = \"internal\"\n",
        )
        .unwrap();

        let config = CatalogConfig::load(None, temp.path()).unwrap();
        assert_eq!(config.marketplace.name, "internal");
    }

    #[test]
    fn test_load_explicit_missing_file_errors() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("missing.toml");
        let err = CatalogConfig::load(Some(&missing), temp.path()).unwrap_err();
        assert!(err.is_io_error());
    }
}
