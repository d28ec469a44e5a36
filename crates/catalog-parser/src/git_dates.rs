//! Last-modified dates from git history.
//!
//! One `git log` call covers every source directory. Dates are display
//! metadata only: when git is missing or the root is not a repository the
//! lookup is empty and generation carries on.

use regex::Regex;
use std::collections::HashMap;
use std::path::Path;
use std::process::Command;
use std::sync::LazyLock;
use tracing::{debug, warn};

static DATE_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}T").expect("valid regex"));

/// Map from repository-relative path to the ISO-8601 author date of the
/// latest commit that added, copied, modified or renamed it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GitDates(HashMap<String, String>);

impl GitDates {
    /// Runs `git log` in `root` over `directories`.
    ///
    /// Never fails; any problem is logged and yields an empty map.
    #[must_use]
    pub fn load(root: &Path, directories: &[&str]) -> Self {
        let output = Command::new("git")
            .current_dir(root)
            .args([
                "--no-pager",
                "log",
                "--format=%aI",
                "--name-only",
                "--diff-filter=ACMR",
                "--",
            ])
            .args(directories)
            .output();

        match output {
            Ok(output) if output.status.success() => {
                let dates = Self::parse(&String::from_utf8_lossy(&output.stdout));
                debug!("Loaded git dates for {} files", dates.len());
                dates
            }
            Ok(output) => {
                warn!(
                    "Could not read git dates: {}",
                    String::from_utf8_lossy(&output.stderr).trim()
                );
                Self::default()
            }
            Err(e) => {
                warn!("Could not run git for file dates: {}", e);
                Self::default()
            }
        }
    }

    /// Parses `git log --format=%aI --name-only` output.
    ///
    /// Output is newest first, so only the first date seen for a path is
    /// kept.
    ///
    /// # Examples
    ///
    /// ```
    /// use catalog_parser::GitDates;
    ///
    /// let output = "2026-01-15T10:30:00+00:00\n\nagents/a.agent.md\n\n\
    ///               2026-01-14T09:00:00+00:00\n\nagents/a.agent.md\nprompts/p.prompt.md\n";
    /// let dates = GitDates::parse(output);
    /// assert_eq!(dates.get("agents/a.agent.md"), Some("2026-01-15T10:30:00+00:00"));
    /// assert_eq!(dates.get("prompts/p.prompt.md"), Some("2026-01-14T09:00:00+00:00"));
    /// ```
    #[must_use]
    pub fn parse(output: &str) -> Self {
        let mut dates = HashMap::new();
        let mut current: Option<&str> = None;

        for line in output.lines().map(str::trim).filter(|l| !l.is_empty()) {
            if DATE_LINE.is_match(line) {
                current = Some(line);
            } else if let Some(date) = current {
                dates
                    .entry(line.to_string())
                    .or_insert_with(|| date.to_string());
            }
        }

        Self(dates)
    }

    /// Date of a repository-relative path.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&str> {
        self.0.get(path).map(String::as_str)
    }

    /// Number of known paths.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no dates are known.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, String)> for GitDates {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
