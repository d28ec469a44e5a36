//! Strong domain types for catalog artifacts.
//!
//! Identifiers that end up in file names are validated at construction so
//! that scaffolding and plugin commands never touch paths built from
//! unchecked input.
//!
//! # Examples
//!
//! ```
//! use catalog_core::{ArtifactKind, CollectionId, SkillName};
//!
//! let kind: ArtifactKind = "agent".parse().unwrap();
//! assert_eq!(kind.file_suffix(), Some(".agent.md"));
//!
//! let id = CollectionId::new("git-tools").unwrap();
//! assert_eq!(id.manifest_file_name(), "git-tools.collection.yml");
//!
//! assert!(SkillName::new("Not Valid").is_err());
//! ```

use crate::{Error, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// Maximum number of items in one collection manifest.
pub const MAX_COLLECTION_ITEMS: usize = 50;

/// Maximum collection id length.
pub const COLLECTION_ID_MAX_LENGTH: usize = 50;

/// Maximum skill name length.
pub const SKILL_NAME_MAX_LENGTH: usize = 64;

/// Minimum skill description length.
pub const SKILL_DESCRIPTION_MIN_LENGTH: usize = 10;

/// Maximum skill description length.
pub const SKILL_DESCRIPTION_MAX_LENGTH: usize = 1024;

/// File name suffix of collection manifests.
pub const COLLECTION_SUFFIX: &str = ".collection.yml";

static SLUG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9-]+$").expect("valid regex"));

/// Returns `true` if `value` is a non-empty lowercase kebab slug.
///
/// # Examples
///
/// ```
/// use catalog_core::types::is_slug;
///
/// assert!(is_slug("azure-devops"));
/// assert!(!is_slug("Azure"));
/// assert!(!is_slug(""));
/// ```
#[must_use]
pub fn is_slug(value: &str) -> bool {
    SLUG_REGEX.is_match(value)
}

/// Kind of catalog artifact.
///
/// The lowercase form is what collection manifests use in `items[].kind`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    /// `*.instructions.md` coding standards
    Instruction,
    /// `*.prompt.md` reusable prompts
    Prompt,
    /// `*.agent.md` custom agents
    Agent,
    /// `skills/<name>/SKILL.md` folders
    Skill,
    /// `hooks/<name>/README.md` folders
    Hook,
}

impl ArtifactKind {
    /// All kinds in catalog order.
    pub const ALL: [Self; 5] = [
        Self::Instruction,
        Self::Prompt,
        Self::Agent,
        Self::Skill,
        Self::Hook,
    ];

    /// Returns the manifest spelling of the kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Instruction => "instruction",
            Self::Prompt => "prompt",
            Self::Agent => "agent",
            Self::Skill => "skill",
            Self::Hook => "hook",
        }
    }

    /// File suffix for single-file kinds, `None` for folder kinds.
    #[must_use]
    pub const fn file_suffix(&self) -> Option<&'static str> {
        match self {
            Self::Instruction => Some(".instructions.md"),
            Self::Prompt => Some(".prompt.md"),
            Self::Agent => Some(".agent.md"),
            Self::Skill | Self::Hook => None,
        }
    }

    /// Metadata file inside the folder for folder kinds.
    #[must_use]
    pub const fn metadata_file(&self) -> Option<&'static str> {
        match self {
            Self::Skill => Some("SKILL.md"),
            Self::Hook => Some("README.md"),
            Self::Instruction | Self::Prompt | Self::Agent => None,
        }
    }

    /// Top-level repository directory holding this kind.
    #[must_use]
    pub const fn directory(&self) -> &'static str {
        match self {
            Self::Instruction => "instructions",
            Self::Prompt => "prompts",
            Self::Agent => "agents",
            Self::Skill => "skills",
            Self::Hook => "hooks",
        }
    }

    /// Install-link type used by the editor badges, if the kind has one.
    #[must_use]
    pub const fn install_type(&self) -> Option<&'static str> {
        match self {
            Self::Instruction => Some("instructions"),
            Self::Prompt => Some("prompt"),
            Self::Agent => Some("agent"),
            Self::Skill | Self::Hook => None,
        }
    }

    /// Returns `true` for kinds stored as a folder with a metadata file.
    #[must_use]
    pub const fn is_folder(&self) -> bool {
        matches!(self, Self::Skill | Self::Hook)
    }

    /// Strips the kind's suffix from a file name, yielding the artifact id.
    ///
    /// # Examples
    ///
    /// ```
    /// use catalog_core::ArtifactKind;
    ///
    /// assert_eq!(ArtifactKind::Prompt.strip_suffix("commit.prompt.md"), Some("commit"));
    /// assert_eq!(ArtifactKind::Prompt.strip_suffix("commit.agent.md"), None);
    /// ```
    #[must_use]
    pub fn strip_suffix<'a>(&self, file_name: &'a str) -> Option<&'a str> {
        self.file_suffix()
            .and_then(|suffix| file_name.strip_suffix(suffix))
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArtifactKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "instruction" => Ok(Self::Instruction),
            "prompt" => Ok(Self::Prompt),
            "agent" => Ok(Self::Agent),
            "skill" => Ok(Self::Skill),
            "hook" => Ok(Self::Hook),
            other => Err(Error::ValidationError {
                field: "kind".to_string(),
                reason: format!(
                    "'{other}' must be one of: instruction, prompt, agent, skill, hook"
                ),
            }),
        }
    }
}

/// Validated collection identifier.
///
/// Lowercase letters, digits and hyphens, at most
/// [`COLLECTION_ID_MAX_LENGTH`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct CollectionId(String);

impl CollectionId {
    /// Creates a collection id after validating its format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ValidationError`] if the id is empty, too long, or
    /// contains characters other than `[a-z0-9-]`.
    pub fn new(id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        if !is_slug(&id) {
            return Err(Error::ValidationError {
                field: "id".to_string(),
                reason: "must contain only lowercase letters, numbers, and hyphens".to_string(),
            });
        }
        if id.chars().count() > COLLECTION_ID_MAX_LENGTH {
            return Err(Error::ValidationError {
                field: "id".to_string(),
                reason: format!("must be between 1 and {COLLECTION_ID_MAX_LENGTH} characters"),
            });
        }
        Ok(Self(id))
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Manifest file name for this id.
    #[must_use]
    pub fn manifest_file_name(&self) -> String {
        format!("{}{COLLECTION_SUFFIX}", self.0)
    }
}

impl fmt::Display for CollectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for CollectionId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

/// Validated skill folder name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct SkillName(String);

impl SkillName {
    /// Creates a skill name after validating its format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ValidationError`] if the name is not a lowercase slug
    /// of at most [`SKILL_NAME_MAX_LENGTH`] characters.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if !is_slug(&name) {
            return Err(Error::ValidationError {
                field: "name".to_string(),
                reason: "must contain only lowercase letters, numbers, and hyphens".to_string(),
            });
        }
        if name.chars().count() > SKILL_NAME_MAX_LENGTH {
            return Err(Error::ValidationError {
                field: "name".to_string(),
                reason: format!("must be between 1 and {SKILL_NAME_MAX_LENGTH} characters"),
            });
        }
        Ok(Self(name))
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SkillName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_kind_parse_all() {
        for kind in ArtifactKind::ALL {
            let parsed: ArtifactKind = kind.as_str().parse().unwrap();
            assert_eq!(parsed, kind);
        }
    }

    #[test]
    fn test_artifact_kind_parse_unknown() {
        let err = "chat-mode".parse::<ArtifactKind>().unwrap_err();
        assert!(err.is_validation_error());
        assert!(err.to_string().contains("chat-mode"));
    }

    #[test]
    fn test_artifact_kind_serde_lowercase() {
        let json = serde_json::to_string(&ArtifactKind::Instruction).unwrap();
        assert_eq!(json, "\"instruction\"");
        let kind: ArtifactKind = serde_json::from_str("\"hook\"").unwrap();
        assert_eq!(kind, ArtifactKind::Hook);
    }

    #[test]
    fn test_folder_kinds() {
        assert!(ArtifactKind::Skill.is_folder());
        assert!(ArtifactKind::Hook.is_folder());
        assert!(!ArtifactKind::Agent.is_folder());
        assert_eq!(ArtifactKind::Skill.metadata_file(), Some("SKILL.md"));
        assert_eq!(ArtifactKind::Hook.metadata_file(), Some("README.md"));
        assert_eq!(ArtifactKind::Skill.file_suffix(), None);
    }

    #[test]
    fn test_install_types() {
        assert_eq!(ArtifactKind::Instruction.install_type(), Some("instructions"));
        assert_eq!(ArtifactKind::Prompt.install_type(), Some("prompt"));
        assert_eq!(ArtifactKind::Agent.install_type(), Some("agent"));
        assert_eq!(ArtifactKind::Hook.install_type(), None);
    }

    #[test]
    fn test_collection_id_valid() {
        let id = CollectionId::new("azure-cloud-2").unwrap();
        assert_eq!(id.as_str(), "azure-cloud-2");
        assert_eq!(id.to_string(), "azure-cloud-2");
    }

    #[test]
    fn test_collection_id_rejects_uppercase_and_spaces() {
        assert!(CollectionId::new("Azure").is_err());
        assert!(CollectionId::new("git tools").is_err());
        assert!(CollectionId::new("").is_err());
    }

    #[test]
    fn test_collection_id_length_limit() {
        assert!(CollectionId::new("a".repeat(50)).is_ok());
        assert!(CollectionId::new("a".repeat(51)).is_err());
    }

    #[test]
    fn test_skill_name_length_limit() {
        assert!(SkillName::new("s".repeat(64)).is_ok());
        assert!(SkillName::new("s".repeat(65)).is_err());
    }
}
