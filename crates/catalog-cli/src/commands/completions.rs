//! Shell completion generation command.
//!
//! Generates shell completion scripts for bash, zsh, fish, and `PowerShell`.

use anyhow::Result;
use catalog_core::cli::ExitCode;
use clap::Command;
use clap_complete::{Shell, generate};
use std::io::{self, Write};
use tracing::info;

/// Writes the completion script for `shell` to `out`.
pub fn write_completions(shell: Shell, cmd: &mut Command, out: &mut dyn Write) {
    let name = cmd.get_name().to_string();
    generate(shell, cmd, name, out);
}

/// Prints the completion script for `shell` to stdout.
///
/// # Examples
///
/// ```no_run
/// use catalog_cli::commands::completions;
/// use clap::Command;
/// use clap_complete::Shell;
///
/// let mut cmd = Command::new("copilot-catalog");
/// completions::generate_completions(Shell::Bash, &mut cmd);
/// ```
pub fn generate_completions(shell: Shell, cmd: &mut Command) {
    info!("Generating {} completions", shell);
    write_completions(shell, cmd, &mut io::stdout());
}

/// Runs the completions command.
pub fn run(shell: Shell, cmd: &mut Command) -> Result<ExitCode> {
    generate_completions(shell, cmd);
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use clap::CommandFactory;

    fn script(shell: Shell) -> String {
        let mut cmd = Cli::command();
        let mut out = Vec::new();
        write_completions(shell, &mut cmd, &mut out);
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_bash_completions_name_the_binary() {
        let script = script(Shell::Bash);
        assert!(script.contains("copilot-catalog"));
        assert!(script.contains("website-data"));
    }

    #[test]
    fn test_zsh_completions() {
        assert!(script(Shell::Zsh).contains("#compdef copilot-catalog"));
    }

    #[test]
    fn test_fish_completions() {
        assert!(script(Shell::Fish).contains("marketplace"));
    }

    #[test]
    fn test_run_powershell() {
        let mut cmd = Command::new("test-cli");
        assert_eq!(run(Shell::PowerShell, &mut cmd).unwrap(), ExitCode::SUCCESS);
    }
}
