//! MCP server cells: registry links plus one-click install badges.

use crate::markdown::{encode_uri_component, escape_cell};
use catalog_parser::McpServerConfig;
use catalog_registry::McpRegistry;
use serde_json::{Map, Value, json};

const VSCODE_BADGE: &str = "https://img.shields.io/badge/Install-VS_Code-0098FF?style=flat-square";
const INSIDERS_BADGE: &str =
    "https://img.shields.io/badge/Install-VS_Code_Insiders-24bfa5?style=flat-square";
const VISUAL_STUDIO_BADGE: &str =
    "https://img.shields.io/badge/Install-Visual_Studio-C16FDE?style=flat-square";

/// Install payload: URL and headers for HTTP servers, otherwise command,
/// arguments (each percent-encoded) and environment.
fn config_payload(server: &McpServerConfig) -> Value {
    if server.is_http() {
        json!({
            "url": server.url.clone().unwrap_or_default(),
            "headers": server.headers.clone().unwrap_or_else(Map::new),
        })
    } else {
        let args: Vec<String> = server
            .args
            .iter()
            .flatten()
            .map(|arg| encode_uri_component(arg))
            .collect();
        json!({
            "command": server.command.clone().unwrap_or_default(),
            "args": args,
            "env": server.env.clone().unwrap_or_else(Map::new),
        })
    }
}

/// Renders one server: its label, linked when the registry knows it, then
/// the VS Code, VS Code Insiders and Visual Studio install badges.
#[must_use]
pub fn mcp_server_link(server: &McpServerConfig, registry: &McpRegistry) -> String {
    let name = server.name.trim();
    let label = escape_cell(name);
    let query_name = encode_uri_component(name);
    let config = encode_uri_component(&config_payload(server).to_string());

    let badges = [
        format!(
            "[![Install MCP]({VSCODE_BADGE})](https://aka.ms/awesome-copilot/install/mcp-vscode?name={query_name}&config={config})"
        ),
        format!(
            "[![Install MCP]({INSIDERS_BADGE})](https://aka.ms/awesome-copilot/install/mcp-vscodeinsiders?name={query_name}&config={config})"
        ),
        format!(
            "[![Install MCP]({VISUAL_STUDIO_BADGE})](https://aka.ms/awesome-copilot/install/mcp-visualstudio/mcp-install?{config})"
        ),
    ]
    .join("<br />");

    let label = registry
        .find(name)
        .map_or_else(|| label.clone(), |entry| format!("[{label}]({})", entry.link()));

    format!("{label}<br />{badges}")
}

/// Cell content for every server of an agent, empty when it declares none.
#[must_use]
pub fn mcp_server_links(servers: &[McpServerConfig], registry: &McpRegistry) -> String {
    servers
        .iter()
        .map(|server| mcp_server_link(server, registry))
        .collect::<Vec<_>>()
        .join("<br />")
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_registry::RegistryEntry;

    fn local(name: &str) -> McpServerConfig {
        McpServerConfig {
            name: name.to_string(),
            server_type: Some("local".to_string()),
            command: Some("npx".to_string()),
            args: Some(vec!["-y".to_string(), "@scope/pkg".to_string()]),
            ..McpServerConfig::default()
        }
    }

    #[test]
    fn test_local_payload_encodes_args() {
        let payload = config_payload(&local("github"));
        assert_eq!(
            payload.to_string(),
            r#"{"command":"npx","args":["-y","%40scope%2Fpkg"],"env":{}}"#
        );
    }

    #[test]
    fn test_http_payload() {
        let server = McpServerConfig {
            name: "remote".to_string(),
            server_type: Some("HTTP".to_string()),
            url: Some("https://mcp.example.com".to_string()),
            ..McpServerConfig::default()
        };
        assert_eq!(
            config_payload(&server).to_string(),
            r#"{"url":"https://mcp.example.com","headers":{}}"#
        );
    }

    #[test]
    fn test_registry_match_links_label() {
        let registry = McpRegistry::from_entries(vec![RegistryEntry::new(
            "io.github.github/github-mcp-server",
            Some("GitHub"),
        )]);
        let cell = mcp_server_link(&local("github"), &registry);
        assert!(cell.starts_with(
            "[github](https://github.com/mcp/io.github.github/github-mcp-server)<br />[![Install MCP]"
        ));
        assert_eq!(cell.matches("[![Install MCP]").count(), 3);
        assert!(cell.contains("mcp-vscode?name=github&config=%7B%22command%22"));
    }

    #[test]
    fn test_unknown_server_is_plain_label() {
        let cell = mcp_server_link(&local("custom"), &McpRegistry::empty());
        assert!(cell.starts_with("custom<br />"));
    }

    #[test]
    fn test_server_name_with_pipe_stays_in_one_cell() {
        let cell = mcp_server_link(&local("a|b"), &McpRegistry::empty());
        assert!(!cell.contains('|'));
        assert!(cell.starts_with("a&#124;b<br />"));
        assert!(cell.contains("mcp-vscode?name=a%7Cb&config="));
    }

    #[test]
    fn test_servers_joined() {
        assert_eq!(mcp_server_links(&[], &McpRegistry::empty()), "");
        let cell = mcp_server_links(&[local("a"), local("b")], &McpRegistry::empty());
        assert!(cell.contains("<br />b<br />"));
    }
}
