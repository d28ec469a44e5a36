//! CLI-facing types shared by the binary and its integration tests.
//!
//! # Examples
//!
//! ```
//! use catalog_core::cli::{ExitCode, OutputFormat};
//!
//! let format: OutputFormat = "json".parse().unwrap();
//! assert_eq!(format, OutputFormat::Json);
//!
//! assert_eq!(ExitCode::PARTIAL_FAILURE.as_i32(), 2);
//! ```

use std::fmt;
use std::str::FromStr;

/// CLI output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputFormat {
    /// JSON output for machine parsing
    Json,
    /// Compact text output for scripts
    Text,
    /// Colored output for humans
    #[default]
    Pretty,
}

impl OutputFormat {
    /// Returns the string representation of the format.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Text => "text",
            Self::Pretty => "pretty",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "text" => Ok(Self::Text),
            "pretty" => Ok(Self::Pretty),
            _ => Err(crate::Error::InvalidArgument(format!(
                "invalid output format: '{s}' (expected: json, text, or pretty)"
            ))),
        }
    }
}

/// Process exit code with semantic meaning.
///
/// # Examples
///
/// ```
/// use catalog_core::cli::ExitCode;
///
/// assert!(ExitCode::SUCCESS.is_success());
/// assert!(!ExitCode::ERROR.is_success());
/// assert_eq!(ExitCode::from_i32(2), ExitCode::PARTIAL_FAILURE);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExitCode(i32);

impl ExitCode {
    /// Successful execution (exit code 0).
    pub const SUCCESS: Self = Self(0);

    /// Fatal error or failed validation (exit code 1).
    pub const ERROR: Self = Self(1);

    /// Some units of a batch succeeded and some failed (exit code 2).
    pub const PARTIAL_FAILURE: Self = Self(2);

    /// Creates an exit code from an integer value.
    #[must_use]
    pub const fn from_i32(code: i32) -> Self {
        Self(code)
    }

    /// Returns the exit code as an integer.
    #[must_use]
    pub const fn as_i32(&self) -> i32 {
        self.0
    }

    /// Checks if the exit code represents success.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.0 == 0
    }

    /// Picks the exit code for a batch of `succeeded + failed` units.
    ///
    /// # Examples
    ///
    /// ```
    /// use catalog_core::cli::ExitCode;
    ///
    /// assert_eq!(ExitCode::for_batch(3, 0), ExitCode::SUCCESS);
    /// assert_eq!(ExitCode::for_batch(2, 1), ExitCode::PARTIAL_FAILURE);
    /// assert_eq!(ExitCode::for_batch(0, 4), ExitCode::ERROR);
    /// ```
    #[must_use]
    pub const fn for_batch(succeeded: usize, failed: usize) -> Self {
        match (succeeded, failed) {
            (_, 0) => Self::SUCCESS,
            (0, _) => Self::ERROR,
            _ => Self::PARTIAL_FAILURE,
        }
    }
}

impl Default for ExitCode {
    fn default() -> Self {
        Self::SUCCESS
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code.0
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_round_trip() {
        for format in [OutputFormat::Json, OutputFormat::Text, OutputFormat::Pretty] {
            let parsed: OutputFormat = format.as_str().parse().unwrap();
            assert_eq!(parsed, format);
        }
    }

    #[test]
    fn test_output_format_case_insensitive() {
        let format: OutputFormat = "JSON".parse().unwrap();
        assert_eq!(format, OutputFormat::Json);
    }

    #[test]
    fn test_output_format_invalid() {
        let err = "yaml".parse::<OutputFormat>().unwrap_err();
        assert!(err.to_string().contains("yaml"));
    }

    #[test]
    fn test_exit_code_constants() {
        assert_eq!(ExitCode::SUCCESS.as_i32(), 0);
        assert_eq!(ExitCode::ERROR.as_i32(), 1);
        assert_eq!(ExitCode::PARTIAL_FAILURE.as_i32(), 2);
        assert_eq!(ExitCode::default(), ExitCode::SUCCESS);
        assert_eq!(i32::from(ExitCode::ERROR), 1);
    }

    #[test]
    fn test_exit_code_for_empty_batch() {
        assert_eq!(ExitCode::for_batch(0, 0), ExitCode::SUCCESS);
    }
}
