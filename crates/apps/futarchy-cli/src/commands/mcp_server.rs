//! MCP server command implementation.
//!
//! Starts an MCP server on stdio for AI assistant integration.

use futarchy_client::ClientConfig;
use futarchy_mcp::run_server;
use tracing::info;

use crate::error::{CliError, CliResult};

/// Start the MCP server.
///
/// Blocks until the client disconnects. Nothing is printed on stdout
/// besides the protocol itself.
pub async fn mcp_server(config: ClientConfig) -> CliResult<String> {
    info!(
        api = %config.api_base_url(),
        facilitator = %config.facilitator_url(),
        "Starting MCP server"
    );
    run_server(config)
        .await
        .map_err(|e| CliError::Mcp(e.to_string()))?;
    Ok(String::new())
}
