//! Output formatters for CLI commands.
//!
//! Every command result is serializable. `json` and `text` print it as
//! pretty or compact JSON; `pretty` renders a colored human summary where
//! the command has one and falls back to colored JSON otherwise.

use anyhow::Result;
use catalog_core::cli::OutputFormat;
use catalog_files::{WriteOutcome, WriteReport};
use catalog_store::ValidationReport;
use colored::Colorize;
use serde::Serialize;

/// Format data according to the specified output format.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
///
/// # Examples
///
/// ```
/// use catalog_cli::formatters::format_output;
/// use catalog_core::cli::OutputFormat;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Created {
///     path: String,
/// }
///
/// let output = format_output(&Created { path: "skills/pdf/SKILL.md".to_string() }, OutputFormat::Json)?;
/// assert!(output.contains("\"path\""));
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn format_output<T: Serialize>(data: &T, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => json::format(data),
        OutputFormat::Text => text::format(data),
        OutputFormat::Pretty => pretty::format(data),
    }
}

/// Write outcomes, one line per file that changed plus a count line.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_write_report(report: &WriteReport, format: OutputFormat) -> Result<String> {
    if format != OutputFormat::Pretty {
        return format_output(report, format);
    }

    let mut lines: Vec<String> = report
        .files
        .iter()
        .filter(|file| file.outcome.is_write())
        .map(|file| {
            let label = match file.outcome {
                WriteOutcome::Created => file.outcome.as_str().green(),
                _ => file.outcome.as_str().yellow(),
            };
            format!("  {label:>9} {}", file.path)
        })
        .collect();

    let unchanged = report.count(WriteOutcome::Unchanged);
    let summary = if report.is_noop() {
        format!("✅ {unchanged} files already up to date")
    } else {
        format!(
            "✅ {} created, {} updated, {unchanged} unchanged",
            report.count(WriteOutcome::Created),
            report.count(WriteOutcome::Updated)
        )
    };
    lines.push(summary.green().to_string());
    Ok(lines.join("\n"))
}

/// Per-file validation result with ❌/✅ markers.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_validation_report(report: &ValidationReport, format: OutputFormat) -> Result<String> {
    if format != OutputFormat::Pretty {
        return format_output(report, format);
    }
    if report.skipped {
        return Ok("No collection files found - validation skipped".yellow().to_string());
    }

    let mut lines = Vec::new();
    for file in &report.files {
        if file.is_valid() {
            lines.push(format!("✅ {} is valid", file.file_name));
        } else {
            lines.push(format!("{} {}:", "❌".red(), file.file_name.bold()));
            lines.extend(file.errors.iter().map(|error| format!("   - {error}")));
        }
    }

    lines.push(String::new());
    if report.is_valid() {
        lines.push(
            format!("🎉 All {} collections are valid!", report.files.len())
                .green()
                .bold()
                .to_string(),
        );
    } else {
        lines.push(
            format!(
                "❌ Validation failed: {} errors in {} of {} collections",
                report.error_count(),
                report.invalid_count(),
                report.files.len()
            )
            .red()
            .bold()
            .to_string(),
        );
    }
    Ok(lines.join("\n"))
}

/// JSON output formatting.
pub mod json {
    use super::{Result, Serialize};

    /// Format data as JSON with 2-space indentation.
    pub fn format<T: Serialize>(data: &T) -> Result<String> {
        Ok(serde_json::to_string_pretty(data)?)
    }

    /// Format data as compact JSON.
    pub fn format_compact<T: Serialize>(data: &T) -> Result<String> {
        Ok(serde_json::to_string(data)?)
    }
}

/// Plain text output formatting.
pub mod text {
    use super::{Result, Serialize, json};

    /// Compact JSON, for piping into other tools.
    pub fn format<T: Serialize>(data: &T) -> Result<String> {
        json::format_compact(data)
    }
}

/// Pretty (human-readable) output formatting.
pub mod pretty {
    use super::{Colorize, Result, Serialize};
    use serde_json::Value;

    /// Format data as colorized, indented output.
    pub fn format<T: Serialize>(data: &T) -> Result<String> {
        let value = serde_json::to_value(data)?;
        Ok(format_value(&value, 0))
    }

    fn format_value(value: &Value, indent: usize) -> String {
        let indent_str = "  ".repeat(indent);
        let next_indent_str = "  ".repeat(indent + 1);

        match value {
            Value::Null => "null".dimmed().to_string(),
            Value::Bool(b) => b.to_string().yellow().to_string(),
            Value::Number(n) => n.to_string().cyan().to_string(),
            Value::String(s) => format!("\"{}\"", s.green()),
            Value::Array(arr) if arr.is_empty() => "[]".to_string(),
            Value::Array(arr) => {
                let items: Vec<String> = arr
                    .iter()
                    .map(|item| format!("{next_indent_str}{}", format_value(item, indent + 1)))
                    .collect();
                format!("[\n{}\n{indent_str}]", items.join(",\n"))
            }
            Value::Object(obj) if obj.is_empty() => "{}".to_string(),
            Value::Object(obj) => {
                let entries: Vec<String> = obj
                    .iter()
                    .map(|(key, val)| {
                        format!(
                            "{next_indent_str}\"{}\": {}",
                            key.blue().bold(),
                            format_value(val, indent + 1)
                        )
                    })
                    .collect();
                format!("{{\n{}\n{indent_str}}}", entries.join(",\n"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_store::{FileReport, ValidationError};

    #[derive(Serialize)]
    struct TestData {
        name: String,
        count: i32,
    }

    fn data() -> TestData {
        TestData {
            name: "git-tools".to_string(),
            count: 3,
        }
    }

    #[test]
    fn test_text_format_is_compact() {
        let output = text::format(&data()).unwrap();
        assert_eq!(output, r#"{"name":"git-tools","count":3}"#);
    }

    #[test]
    fn test_pretty_format_has_structure() {
        colored::control::set_override(false);
        let output = pretty::format(&data()).unwrap();
        assert_eq!(output, "{\n  \"name\": \"git-tools\",\n  \"count\": 3\n}");
    }

    #[test]
    fn test_write_report_pretty_lists_changes_only() {
        colored::control::set_override(false);
        let mut report = WriteReport::default();
        report.record("docs/README.agents.md", WriteOutcome::Created);
        report.record("docs/README.prompts.md", WriteOutcome::Unchanged);

        let output = format_write_report(&report, OutputFormat::Pretty).unwrap();
        assert!(output.contains("created docs/README.agents.md"));
        assert!(!output.contains("README.prompts.md"));
        assert!(output.ends_with("1 created, 0 updated, 1 unchanged"));
    }

    #[test]
    fn test_write_report_json() {
        let mut report = WriteReport::default();
        report.record("README.md", WriteOutcome::Updated);
        let output = format_write_report(&report, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["files"][0]["outcome"], "updated");
    }

    #[test]
    fn test_validation_report_pretty() {
        colored::control::set_override(false);
        let report = ValidationReport {
            files: vec![
                FileReport {
                    file_name: "a.collection.yml".to_string(),
                    errors: Vec::new(),
                },
                FileReport {
                    file_name: "b.collection.yml".to_string(),
                    errors: vec![ValidationError {
                        field: "ID",
                        message: "is required and must be a string".to_string(),
                    }],
                },
            ],
            skipped: false,
        };

        let output = format_validation_report(&report, OutputFormat::Pretty).unwrap();
        assert!(output.contains("✅ a.collection.yml is valid"));
        assert!(output.contains("   - ID: is required and must be a string"));
        assert!(output.ends_with("❌ Validation failed: 1 errors in 1 of 2 collections"));
    }
}
