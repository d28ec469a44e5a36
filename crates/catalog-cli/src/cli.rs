//! CLI argument definitions and parsing.
//!
//! Defines the command-line interface structure using clap:
//! - `Cli` - Main CLI entry point
//! - `Commands` - Available subcommands

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::actions::{CollectionAction, ConfigAction, PluginAction, SkillAction};

/// Generates and maintains the Awesome Copilot catalog.
///
/// Renders the README tables and website data from the instructions,
/// prompts, agents, skills, hooks and collections of the repository, and
/// manages collection manifests, skills and plugins.
#[derive(Parser, Debug)]
#[command(name = "copilot-catalog")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Repository root
    #[arg(long, global = true, env = "CATALOG_ROOT")]
    pub root: Option<PathBuf>,

    /// Configuration file (defaults to copilot-catalog.toml at the root)
    #[arg(long, global = true, env = "CATALOG_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (json, text, pretty)
    #[arg(long = "format", global = true, default_value = "pretty")]
    pub format: String,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Regenerate docs/README.*.md, collection pages and the featured block.
    ///
    /// # Examples
    ///
    /// ```bash
    /// copilot-catalog readme
    ///
    /// # Skip the MCP registry lookup
    /// copilot-catalog readme --offline
    /// ```
    Readme {
        /// Do not query the MCP registry
        #[arg(long)]
        offline: bool,
    },

    /// Regenerate the JSON documents under website/public/data.
    WebsiteData,

    /// Validate every collection manifest.
    Validate,

    /// Manage collection manifests.
    Collection {
        /// Collection action
        #[command(subcommand)]
        action: CollectionAction,
    },

    /// Manage skills.
    Skill {
        /// Skill action
        #[command(subcommand)]
        action: SkillAction,
    },

    /// Build plugin directories from collections.
    ///
    /// # Examples
    ///
    /// ```bash
    /// copilot-catalog plugin migrate git-tools
    /// copilot-catalog plugin refresh --all
    /// ```
    Plugin {
        /// Plugin action
        #[command(subcommand)]
        action: PluginAction,
    },

    /// Regenerate .github/plugin/marketplace.json from plugins/.
    Marketplace,

    /// Show or initialize the configuration.
    Config {
        /// Config action
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions.
    ///
    /// # Examples
    ///
    /// ```bash
    /// copilot-catalog completions bash > /etc/bash_completion.d/copilot-catalog
    /// copilot-catalog completions zsh > ~/.zfunc/_copilot-catalog
    /// ```
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Validate, then regenerate the READMEs and the website data.
    All {
        /// Do not query the MCP registry
        #[arg(long)]
        offline: bool,
    },
}
