//! Markdown building blocks: cell escaping, URI encoding and install badges.

use regex::Regex;
use std::sync::LazyLock;

static FIRST_H2: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^##\s").expect("valid regex"));

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

const VSCODE_INSTALL_IMAGE: &str = "https://img.shields.io/badge/VS_Code-Install-0098FF?style=flat-square&logo=visualstudiocode&logoColor=white";
const VSCODE_INSIDERS_INSTALL_IMAGE: &str = "https://img.shields.io/badge/VS_Code_Insiders-Install-24bfa5?style=flat-square&logo=visualstudiocode&logoColor=white";
const AKA_INSTALL_BASE: &str = "https://aka.ms/awesome-copilot/install";

/// Escapes text for a table cell so it can never split the row.
///
/// # Examples
///
/// ```
/// use catalog_codegen::markdown::escape_cell;
///
/// assert_eq!(escape_cell("A|B\nC"), "A&#124;B<br />C");
/// ```
#[must_use]
pub fn escape_cell(text: &str) -> String {
    text.replace('|', "&#124;")
        .replace("\r\n", "<br />")
        .replace(['\n', '\r'], "<br />")
}

/// Percent-encodes like `encodeURIComponent`.
///
/// Alphanumerics and `-_.!~*'()` pass through.
///
/// ```
/// use catalog_codegen::markdown::encode_uri_component;
///
/// assert_eq!(encode_uri_component("a b/c(1)"), "a%20b%2Fc(1)");
/// ```
#[must_use]
pub fn encode_uri_component(text: &str) -> String {
    unescape(&urlencoding::encode(text), &["!", "*", "'", "(", ")"])
}

/// Percent-encodes like `encodeURI`, keeping URI delimiters intact.
///
/// ```
/// use catalog_codegen::markdown::encode_uri;
///
/// assert_eq!(encode_uri("prompts/my file.prompt.md"), "prompts/my%20file.prompt.md");
/// ```
#[must_use]
pub fn encode_uri(text: &str) -> String {
    unescape(
        &urlencoding::encode(text),
        &[
            "!", "*", "'", "(", ")", ";", ",", "/", "?", ":", "@", "&", "=", "+", "$", "#",
        ],
    )
}

fn unescape(encoded: &str, keep: &[&str]) -> String {
    keep.iter().fold(encoded.to_string(), |acc, ch| {
        let escaped = format!("%{:02X}", ch.as_bytes()[0]);
        acc.replace(&escaped, ch)
    })
}

/// VS Code and VS Code Insiders install badges for an artifact.
///
/// `link` is the repository-relative path, `install_type` one of
/// `instructions`, `prompt` or `agent`.
#[must_use]
pub fn install_badges(raw_base_url: &str, link: &str, install_type: &str) -> String {
    let target = |scheme: &str| {
        format!(
            "{AKA_INSTALL_BASE}/{install_type}?url={}",
            encode_uri_component(&format!(
                "{scheme}:chat-{install_type}/install?url={raw_base_url}/{link}"
            ))
        )
    };

    format!(
        "[![Install in VS Code]({VSCODE_INSTALL_IMAGE})]({})<br />[![Install in VS Code Insiders]({VSCODE_INSIDERS_INSTALL_IMAGE})]({})",
        target("vscode"),
        target("vscode-insiders"),
    )
}

/// Turns the first `## ` heading into `# ` for standalone pages.
#[must_use]
pub fn promote_heading(section: &str) -> String {
    FIRST_H2.replacen(section, 1, "# ").into_owned()
}

/// Anchor of a heading rendered from `title`.
///
/// ```
/// use catalog_codegen::markdown::heading_anchor;
///
/// assert_eq!(heading_anchor("Git  Commit Helper"), "git-commit-helper");
/// ```
#[must_use]
pub fn heading_anchor(title: &str) -> String {
    WHITESPACE.replace_all(title, "-").to_lowercase()
}

/// Table header and separator rows.
#[must_use]
pub fn table_header(columns: &[(&str, &str)]) -> String {
    let header: Vec<&str> = columns.iter().map(|(label, _)| *label).collect();
    let separator: Vec<&str> = columns.iter().map(|(_, dashes)| *dashes).collect();
    format!("| {} |\n| {} |\n", header.join(" | "), separator.join(" | "))
}

/// One table row from already-escaped cells.
#[must_use]
pub fn table_row(cells: &[&str]) -> String {
    format!("| {} |\n", cells.join(" | "))
}
