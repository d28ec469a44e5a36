//! Nested subcommand actions.

use clap::Subcommand;

/// `collection` actions.
#[derive(Subcommand, Debug)]
pub enum CollectionAction {
    /// Create a new collection manifest from the starter template
    New {
        /// Collection id (lowercase, numbers, hyphens)
        #[arg(short, long = "id", conflicts_with = "id_arg")]
        id: Option<String>,

        /// Comma-separated tags
        #[arg(short, long = "tags", conflicts_with = "tags_arg")]
        tags: Option<String>,

        /// Collection id, as a positional alternative to --id
        #[arg(value_name = "ID")]
        id_arg: Option<String>,

        /// Tags, as a positional alternative to --tags
        #[arg(value_name = "TAGS")]
        tags_arg: Option<String>,

        /// Never prompt; use defaults for anything not given
        #[arg(short, long)]
        yes: bool,
    },
}

/// `skill` actions.
#[derive(Subcommand, Debug)]
pub enum SkillAction {
    /// Create a new skill folder with a SKILL.md skeleton
    New {
        /// Skill name (lowercase, numbers, hyphens, at most 64 characters)
        #[arg(short, long)]
        name: Option<String>,

        /// What the skill does (10 to 1024 characters)
        #[arg(short, long)]
        description: Option<String>,

        /// Heading of SKILL.md, defaults to the title-cased name
        #[arg(long)]
        title: Option<String>,

        /// Never prompt; fail if a required value is missing
        #[arg(short, long)]
        yes: bool,
    },
}

/// `plugin` actions.
#[derive(Subcommand, Debug)]
pub enum PluginAction {
    /// Create plugins/<collection> from a collection
    Migrate {
        /// Collection id (file stem under collections/)
        collection: String,
    },

    /// Rebuild an existing plugin from its collection
    Refresh {
        /// Collection id (file stem under collections/)
        #[arg(required_unless_present = "all")]
        collection: Option<String>,

        /// Refresh every plugin that has a matching collection
        #[arg(long, conflicts_with = "collection")]
        all: bool,
    },
}

/// `config` actions.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Write a default copilot-catalog.toml at the repository root
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
