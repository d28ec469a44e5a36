//! Front-matter and YAML document parsing.
//!
//! Markdown artifacts carry a YAML block delimited by `---` lines at the
//! very top of the file:
//!
//! ```markdown
//! ---
//! description: 'Generate a conventional commit message'
//! tools: ['changes', 'codebase']
//! ---
//!
//! # Commit Message
//! ```
//!
//! Collection manifests, `tools.yml` and `cookbook.yml` are plain YAML
//! documents without delimiters.

use crate::error::ParseError;
use catalog_core::CollectionManifest;
use serde::de::DeserializeOwned;
use serde_yaml::{Mapping, Value};
use std::path::Path;

const DELIMITER: &str = "---";

/// Splits a Markdown document into its front-matter block and body.
///
/// Returns `(None, content)` when the document does not open with a
/// `---` line or the block is never closed.
///
/// # Examples
///
/// ```
/// use catalog_parser::split_front_matter;
///
/// let (yaml, body) = split_front_matter("---\nname: demo\n---\n# Demo\n");
/// assert_eq!(yaml, Some("name: demo\n"));
/// assert_eq!(body, "# Demo\n");
///
/// let (yaml, body) = split_front_matter("# No front-matter\n");
/// assert!(yaml.is_none());
/// assert_eq!(body, "# No front-matter\n");
/// ```
#[must_use]
pub fn split_front_matter(content: &str) -> (Option<&str>, &str) {
    let text = content.strip_prefix('\u{feff}').unwrap_or(content);
    let Some(rest) = text.strip_prefix(DELIMITER) else {
        return (None, text);
    };
    let Some(newline) = rest.find('\n') else {
        return (None, text);
    };
    if !rest[..newline].trim().is_empty() {
        return (None, text);
    }

    let block = &rest[newline + 1..];
    let mut offset = 0;
    for line in block.split_inclusive('\n') {
        if line.trim_end() == DELIMITER {
            return (Some(&block[..offset]), &block[offset + line.len()..]);
        }
        offset += line.len();
    }

    (None, text)
}

/// Parsed front-matter of one Markdown artifact.
///
/// String fields that editors tend to leave trailing newlines on are
/// normalized at parse time: `name` and `title` are trimmed, `description`
/// loses trailing whitespace only so its inner line breaks survive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrontMatter(Mapping);

impl FrontMatter {
    /// Parses a front-matter YAML block. An empty block yields an empty
    /// front-matter.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::InvalidYaml`] for malformed YAML and
    /// [`ParseError::NotAMapping`] when the block is a scalar or list.
    pub fn parse(yaml: &str, path: &Path) -> Result<Self, ParseError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }

        let value: Value = serde_yaml::from_str(yaml).map_err(|e| ParseError::InvalidYaml {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let mut mapping = match value {
            Value::Null => Mapping::new(),
            Value::Mapping(mapping) => mapping,
            _ => {
                return Err(ParseError::NotAMapping {
                    path: path.to_path_buf(),
                });
            }
        };

        for key in ["name", "title"] {
            if let Some(Value::String(text)) = mapping.get_mut(key) {
                *text = text.trim().to_string();
            }
        }
        if let Some(Value::String(text)) = mapping.get_mut("description") {
            *text = text.trim_end().to_string();
        }

        Ok(Self(mapping))
    }

    /// Raw value of a key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Non-empty string value of a key.
    #[must_use]
    pub fn string(&self, key: &str) -> Option<&str> {
        match self.0.get(key) {
            Some(Value::String(text)) if !text.is_empty() => Some(text),
            _ => None,
        }
    }

    /// Mapping value of a key.
    #[must_use]
    pub fn mapping(&self, key: &str) -> Option<&Mapping> {
        self.0.get(key).and_then(Value::as_mapping)
    }

    /// Returns `true` if the block defined no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Underlying YAML mapping.
    #[must_use]
    pub const fn as_mapping(&self) -> &Mapping {
        &self.0
    }

    /// Deserializes the front-matter into a typed record.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::InvalidYaml`] if the mapping does not fit `T`.
    pub fn deserialize<T: DeserializeOwned>(&self, path: &Path) -> Result<T, ParseError> {
        serde_yaml::from_value(Value::Mapping(self.0.clone())).map_err(|e| {
            ParseError::InvalidYaml {
                path: path.to_path_buf(),
                message: e.to_string(),
            }
        })
    }
}

/// A Markdown artifact split into front-matter and body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarkdownDocument {
    /// Parsed front-matter, empty when the file has none
    pub front_matter: FrontMatter,
    /// Everything after the closing delimiter
    pub body: String,
}

impl MarkdownDocument {
    /// Parses document text.
    ///
    /// # Errors
    ///
    /// Returns an error if the front-matter block is malformed.
    pub fn parse(content: &str, path: &Path) -> Result<Self, ParseError> {
        let (yaml, body) = split_front_matter(content);
        let front_matter = match yaml {
            Some(yaml) => FrontMatter::parse(yaml, path)?,
            None => FrontMatter::default(),
        };
        Ok(Self {
            front_matter,
            body: body.to_string(),
        })
    }

    /// Reads and parses a Markdown file.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Io`] if the file cannot be read, or a YAML
    /// error if its front-matter is malformed.
    pub fn read(path: &Path) -> Result<Self, ParseError> {
        let content = std::fs::read_to_string(path).map_err(|source| ParseError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content, path)
    }
}

/// Reads a whole file as one YAML document.
///
/// # Errors
///
/// Returns [`ParseError::Io`] or [`ParseError::InvalidYaml`].
pub fn parse_yaml_file(path: &Path) -> Result<Value, ParseError> {
    let content = std::fs::read_to_string(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_yaml::from_str(&content).map_err(|e| ParseError::InvalidYaml {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Reads a collection manifest into its typed form.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not valid YAML, or does
/// not match the manifest shape (for example an unknown item kind).
pub fn parse_collection_file(path: &Path) -> Result<CollectionManifest, ParseError> {
    let value = parse_yaml_file(path)?;
    if !value.is_mapping() {
        return Err(ParseError::NotAMapping {
            path: path.to_path_buf(),
        });
    }
    serde_yaml::from_value(value).map_err(|e| ParseError::InvalidYaml {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn path() -> &'static Path {
        Path::new("test.md")
    }

    #[test]
    fn test_split_with_crlf_and_bom() {
        let (yaml, body) = split_front_matter("\u{feff}---\r\nname: x\r\n---\r\nbody");
        assert_eq!(yaml, Some("name: x\r\n"));
        assert_eq!(body, "body");
    }

    #[test]
    fn test_split_unclosed_block() {
        let content = "---\nname: x\n# Heading\n";
        let (yaml, body) = split_front_matter(content);
        assert!(yaml.is_none());
        assert_eq!(body, content);
    }

    #[test]
    fn test_split_empty_block() {
        let (yaml, body) = split_front_matter("---\n---\ntext");
        assert_eq!(yaml, Some(""));
        assert_eq!(body, "text");
    }

    #[test]
    fn test_split_requires_delimiter_line() {
        let (yaml, _) = split_front_matter("----\nname: x\n----\n");
        assert!(yaml.is_none());
    }

    #[test]
    fn test_normalizes_string_fields() {
        let fm = FrontMatter::parse(
            "name: \"  demo \"\ntitle: |\n  Demo Title\n\ndescription: |\n  Line one\n  Line two\n\n",
            path(),
        )
        .unwrap();
        assert_eq!(fm.string("name"), Some("demo"));
        assert_eq!(fm.string("title"), Some("Demo Title"));
        assert_eq!(fm.string("description"), Some("Line one\nLine two"));
    }

    #[test]
    fn test_string_ignores_non_strings_and_empty() {
        let fm = FrontMatter::parse("description: ''\nmodel: 4\n", path()).unwrap();
        assert_eq!(fm.string("description"), None);
        assert_eq!(fm.string("model"), None);
        assert!(fm.get("model").is_some());
    }

    #[test]
    fn test_malformed_yaml_is_error() {
        let err = MarkdownDocument::parse("---\nname: [unclosed\n---\n", path()).unwrap_err();
        assert!(matches!(err, ParseError::InvalidYaml { .. }));
    }

    #[test]
    fn test_scalar_front_matter_is_error() {
        let err = FrontMatter::parse("just text", path()).unwrap_err();
        assert!(matches!(err, ParseError::NotAMapping { .. }));
    }

    #[test]
    fn test_document_without_front_matter() {
        let doc = MarkdownDocument::parse("# Title\n", path()).unwrap();
        assert!(doc.front_matter.is_empty());
        assert_eq!(doc.body, "# Title\n");
    }

    #[test]
    fn test_read_missing_file() {
        let err = MarkdownDocument::read(Path::new("/nonexistent/file.md")).unwrap_err();
        assert!(err.is_io_error());
    }

    #[test]
    fn test_parse_collection_file() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("demo.collection.yml");
        std::fs::write(
            &file,
            "id: demo\nname: Demo\nitems:\n  - path: prompts/a.prompt.md\n    kind: prompt\n",
        )
        .unwrap();

        let manifest = parse_collection_file(&file).unwrap();
        assert_eq!(manifest.id.as_deref(), Some("demo"));
        assert_eq!(manifest.items.len(), 1);
    }

    #[test]
    fn test_parse_collection_file_rejects_list() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("bad.collection.yml");
        std::fs::write(&file, "- a\n- b\n").unwrap();
        assert!(matches!(
            parse_collection_file(&file).unwrap_err(),
            ParseError::NotAMapping { .. }
        ));
    }
}
