//! Locale table for every human-readable string the generators emit.
//!
//! There is exactly one generation pipeline; translations only swap this
//! table. Any field missing from a TOML override keeps its English default.
//!
//! # Examples
//!
//! ```
//! use catalog_codegen::TextTable;
//!
//! let text = TextTable::from_toml(r#"
//! no_entries = "_Nothing here yet._"
//! "#).unwrap();
//!
//! assert_eq!(text.no_entries, "_Nothing here yet._");
//! assert_eq!(text.column_title, "Title");
//! ```

use catalog_core::{ArtifactKind, Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Section templates, column labels and fallback strings.
///
/// `{count}` and `{name}` placeholders are substituted where noted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextTable {
    /// Instructions section header (starts with `## `)
    pub instructions_section: String,
    /// Instructions usage block
    pub instructions_usage: String,
    /// Prompts section header
    pub prompts_section: String,
    /// Prompts usage block
    pub prompts_usage: String,
    /// Agents section header
    pub agents_section: String,
    /// Agents usage block
    pub agents_usage: String,
    /// Skills section header
    pub skills_section: String,
    /// Skills usage block
    pub skills_usage: String,
    /// Hooks section header
    pub hooks_section: String,
    /// Hooks usage block
    pub hooks_usage: String,
    /// Collections section header
    pub collections_section: String,
    /// Collections usage block
    pub collections_usage: String,
    /// Featured collections block spliced into the root README; its first
    /// line is also the splice start marker
    pub featured_collections_section: String,
    /// Heading that ends the featured block in the root README
    pub featured_end_marker: String,

    /// "Title" column
    pub column_title: String,
    /// "Description" column
    pub column_description: String,
    /// "MCP Servers" column
    pub column_mcp_servers: String,
    /// "Name" column
    pub column_name: String,
    /// "Items" column
    pub column_items: String,
    /// "Tags" column
    pub column_tags: String,
    /// "Type" column
    pub column_type: String,
    /// "Events" column
    pub column_events: String,
    /// "Bundled Assets" column
    pub column_bundled_assets: String,

    /// Type label of instruction items
    pub label_instruction: String,
    /// Type label of prompt items
    pub label_prompt: String,
    /// Type label of agent items
    pub label_agent: String,
    /// Type label of skill items
    pub label_skill: String,
    /// Type label of hook items
    pub label_hook: String,

    /// Body of a category page without entries
    pub no_entries: String,
    /// Suffix of the generated instruction description
    pub instruction_fallback: String,
    /// Collection description fallback in tables
    pub no_description_provided: String,
    /// Collection description fallback on its own page
    pub collection_no_description: String,
    /// Item description fallback in collection tables
    pub item_no_description: String,
    /// Items cell, `{count}` is substituted
    pub items_count: String,
    /// "Tags" label of the collection page header
    pub tags_label: String,
    /// Heading of the collection items table
    pub items_heading: String,
    /// Heading of the collection usage notes
    pub usage_heading: String,
    /// Link text pointing at usage notes
    pub see_usage: String,
    /// Collection footer, `{count}` and `{name}` are substituted
    pub curated_footer: String,
    /// Empty assets cell
    pub no_assets: String,
    /// Empty events cell
    pub not_applicable: String,
}

impl Default for TextTable {
    fn default() -> Self {
        Self {
            instructions_section: "## 📋 Custom Instructions\n\nTeam and project-specific instructions to enhance GitHub Copilot's behavior for specific technologies and coding practices.".to_string(),
            instructions_usage: "### How to Use Custom Instructions\n\n**To Install:**\n- Click the **VS Code** or **VS Code Insiders** install button for the instruction you want to use\n- Download the `*.instructions.md` file and manually add it to your project's instruction collection\n\n**To Use/Apply:**\n- Copy these instructions to your `.github/copilot-instructions.md` file in your workspace\n- Create task-specific `*.instructions.md` files in your workspace's `.github/instructions/` folder (e.g., `.github/instructions/my-csharp-rules.instructions.md`)\n- Instructions automatically apply to Copilot behavior once installed in your workspace".to_string(),
            prompts_section: "## 🎯 Reusable Prompts\n\nReady-to-use prompt templates for specific development scenarios and tasks, defining prompt text with a specific mode, model, and available set of tools.".to_string(),
            prompts_usage: "### How to Use Reusable Prompts\n\n**To Install:**\n- Click the **VS Code** or **VS Code Insiders** install button for the prompt you want to use\n- Download the `*.prompt.md` file and manually add it to your prompt collection\n\n**To Run/Execute:**\n- Use `/prompt-name` in VS Code chat after installation\n- Run the `Chat: Run Prompt` command from the Command Palette\n- Hit the run button while you have a prompt file open in VS Code".to_string(),
            agents_section: "## 🤖 Custom Agents\n\nCustom agents for GitHub Copilot, making it easy for users and organizations to \"specialize\" their Copilot coding agent (CCA) through simple file-based configuration.".to_string(),
            agents_usage: "### How to Use Custom Agents\n\n**To Install:**\n- Click the **VS Code** or **VS Code Insiders** install button for the agent you want to use\n- Download the `*.agent.md` file and add it to your repository\n\n**MCP Server Setup:**\n- Each agent may require one or more MCP servers to function\n- Click the MCP server to view it on the GitHub MCP registry\n- Follow the guide on how to add the MCP server to your repository\n\n**To Activate/Use:**\n- Access installed agents through the VS Code Chat interface, assign them in CCA, or through Copilot CLI (coming soon)\n- Agents will have access to tools from configured MCP servers\n- Follow agent-specific instructions for optimal usage".to_string(),
            skills_section: "## 🎯 Agent Skills\n\nAgent Skills are self-contained folders with instructions and bundled resources that enhance AI capabilities for specialized tasks. Based on the [Agent Skills specification](https://agentskills.io/specification), each skill contains a `SKILL.md` file with detailed instructions that agents load on-demand.\n\nSkills differ from other primitives by supporting bundled assets (scripts, code samples, reference data) that agents can utilize when performing specialized tasks.".to_string(),
            skills_usage: "### How to Use Agent Skills\n\n**What's Included:**\n- Each skill is a folder containing a `SKILL.md` instruction file\n- Skills may include helper scripts, code templates, or reference data\n- Skills follow the Agent Skills specification for maximum compatibility\n\n**When to Use:**\n- Skills are ideal for complex, repeatable workflows that benefit from bundled resources\n- Use skills when you need code templates, helper utilities, or reference data alongside instructions\n- Skills provide progressive disclosure - loaded only when needed for specific tasks\n\n**Usage:**\n- Browse the skills table below to find relevant capabilities\n- Copy the skill folder to your local skills directory\n- Reference skills in your prompts or let the agent discover them automatically".to_string(),
            hooks_section: "## 🪝 Hooks\n\nHooks enable automated workflows triggered by specific events during GitHub Copilot coding agent sessions, such as session start, session end, user prompts, and tool usage.".to_string(),
            hooks_usage: "### How to Use Hooks\n\n**What's Included:**\n- Each hook is a folder containing a `README.md` file and a `hooks.json` configuration\n- Hooks may include helper scripts, utilities, or other bundled assets\n\n**To Install:**\n- Copy the hook folder to your repository's `.github/hooks/` directory\n- Ensure any bundled scripts are executable (`chmod +x script.sh`)\n- Commit the hook to your repository's default branch\n\n**To Activate/Use:**\n- Hooks automatically execute during Copilot coding agent sessions\n- Configure hook events in the `hooks.json` file\n- Monitor hook execution through Copilot session logs".to_string(),
            collections_section: "## 📦 Collections\n\nCurated collections of related prompts, instructions, and agents organized around specific themes, workflows, or use cases.".to_string(),
            collections_usage: "### How to Use Collections\n\n**Browse Collections:**\n- ⭐ Featured collections are highlighted and appear at the top of the list\n- Explore themed collections that group related customizations\n- Each collection includes prompts, instructions, and agents for specific workflows\n- Collections make it easy to adopt comprehensive toolkits for particular scenarios\n\n**Install Items:**\n- Click install buttons for individual items within collections\n- Or browse to the individual files to copy content manually\n- Collections help you discover related customizations you might have missed".to_string(),
            featured_collections_section: "## 🌟 Featured Collections\n\nDiscover our curated collections of prompts, instructions, and agents organized around specific themes and workflows.".to_string(),
            featured_end_marker: "## MCP Server".to_string(),

            column_title: "Title".to_string(),
            column_description: "Description".to_string(),
            column_mcp_servers: "MCP Servers".to_string(),
            column_name: "Name".to_string(),
            column_items: "Items".to_string(),
            column_tags: "Tags".to_string(),
            column_type: "Type".to_string(),
            column_events: "Events".to_string(),
            column_bundled_assets: "Bundled Assets".to_string(),

            label_instruction: "Instruction".to_string(),
            label_prompt: "Prompt".to_string(),
            label_agent: "Agent".to_string(),
            label_skill: "Skill".to_string(),
            label_hook: "Hook".to_string(),

            no_entries: "_No entries found yet._".to_string(),
            instruction_fallback: "specific coding standards and best practices".to_string(),
            no_description_provided: "No description provided".to_string(),
            collection_no_description: "No description provided.".to_string(),
            item_no_description: "No description".to_string(),
            items_count: "{count} items".to_string(),
            tags_label: "Tags".to_string(),
            items_heading: "Items in this Collection".to_string(),
            usage_heading: "Collection Usage".to_string(),
            see_usage: "see usage".to_string(),
            curated_footer: "*This collection includes {count} curated items for **{name}**.*".to_string(),
            no_assets: "None".to_string(),
            not_applicable: "N/A".to_string(),
        }
    }
}

impl TextTable {
    /// Parses a TOML override table.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the TOML is malformed.
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::ConfigError {
            message: format!("invalid text table: {e}"),
        })
    }

    /// Loads a TOML override table from disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_toml(&content)
    }

    /// Loads `path` when given, otherwise the English defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit table cannot be loaded.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        path.map_or_else(|| Ok(Self::default()), Self::load)
    }

    /// Type label of a collection item kind.
    #[must_use]
    pub fn kind_label(&self, kind: ArtifactKind) -> &str {
        match kind {
            ArtifactKind::Instruction => &self.label_instruction,
            ArtifactKind::Prompt => &self.label_prompt,
            ArtifactKind::Agent => &self.label_agent,
            ArtifactKind::Skill => &self.label_skill,
            ArtifactKind::Hook => &self.label_hook,
        }
    }

    /// Items cell for `count` items.
    #[must_use]
    pub fn items_cell(&self, count: usize) -> String {
        self.items_count.replace("{count}", &count.to_string())
    }

    /// Collection footer for `count` items of `name`.
    #[must_use]
    pub fn footer(&self, count: usize, name: &str) -> String {
        self.curated_footer
            .replace("{count}", &count.to_string())
            .replace("{name}", name)
    }

    /// Marker line opening the featured block in the root README.
    #[must_use]
    pub fn featured_start_marker(&self) -> &str {
        self.featured_collections_section
            .lines()
            .next()
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_roundtrip_through_toml() {
        let text = TextTable::default();
        let encoded = toml::to_string(&text).unwrap();
        assert_eq!(TextTable::from_toml(&encoded).unwrap(), text);
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let text = TextTable::from_toml("label_agent = \"Agente\"\n").unwrap();
        assert_eq!(text.kind_label(ArtifactKind::Agent), "Agente");
        assert_eq!(text.kind_label(ArtifactKind::Prompt), "Prompt");
    }

    #[test]
    fn test_invalid_toml() {
        let err = TextTable::from_toml("label_agent = [").unwrap_err();
        assert!(err.is_config_error());
    }

    #[test]
    fn test_placeholders() {
        let text = TextTable::default();
        assert_eq!(text.items_cell(3), "3 items");
        assert_eq!(
            text.footer(2, "Git Tools"),
            "*This collection includes 2 curated items for **Git Tools**.*"
        );
        assert_eq!(text.featured_start_marker(), "## 🌟 Featured Collections");
    }

    #[test]
    fn test_load_missing_file() {
        let err = TextTable::load(Path::new("/nonexistent/text.toml")).unwrap_err();
        assert!(err.is_io_error());
    }
}
