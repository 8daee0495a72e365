//! MCP server implementation for futarchy402.
//!
//! Uses the RMCP SDK. Tools are listed from the canonical definitions and
//! every call goes through the shared dispatcher.

use std::sync::Arc;

use futarchy_client::{ClientConfig, Futarchy402Client};
use futarchy_tools::{all_tools, execute_tool, input_schema, ToolContext, ToolError, ToolFormat};
use rmcp::{
    model::*,
    service::{RequestContext, RoleServer},
    ErrorData as McpError,
};
use serde_json::Value;
use tracing::{debug, info, warn};

/// Error result carrying `{error, code, suggestion}`.
fn tool_error(error: &ToolError) -> CallToolResult {
    CallToolResult::error(vec![Content::text(error.to_json().to_string())])
}

/// The tools as MCP sees them.
pub fn mcp_tools() -> Vec<Tool> {
    let with_defaults = ToolFormat::Mcp.includes_defaults();
    all_tools()
        .iter()
        .map(|tool| {
            let schema = match input_schema(tool, with_defaults) {
                Value::Object(map) => map,
                _ => JsonObject::new(),
            };
            Tool::new(tool.name.as_str(), tool.description, Arc::new(schema))
        })
        .collect()
}

/// futarchy402 MCP server.
#[derive(Clone)]
pub struct FutarchyMcpServer {
    ctx: Arc<ToolContext>,
}

impl FutarchyMcpServer {
    pub fn new(client: Futarchy402Client) -> Self {
        Self {
            ctx: Arc::new(ToolContext::new(client)),
        }
    }

    /// Run one tool call and wrap the result for MCP.
    ///
    /// Tool errors become error results rather than protocol errors, so the
    /// agent sees the suggestion. A failed vote is a normal result.
    pub async fn dispatch(&self, name: &str, arguments: Option<JsonObject>) -> CallToolResult {
        let args = arguments.map(Value::Object).unwrap_or(Value::Null);
        debug!(tool = name, "MCP tool call");

        match execute_tool(name, &args, &self.ctx).await {
            Ok(value) => {
                let json = serde_json::to_string_pretty(&value)
                    .unwrap_or_else(|_| value.to_string());
                CallToolResult::success(vec![Content::text(json)])
            }
            Err(e) => {
                warn!(tool = name, code = e.code(), error = %e, "MCP tool call failed");
                tool_error(&e)
            }
        }
    }
}

impl rmcp::ServerHandler for FutarchyMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(
                "Futarchy402 MCP Server - Browse futarchy governance polls and vote on them \
                 with x402 USDC payments. Use `futarchy_list_polls` and `futarchy_get_poll` to \
                 explore, `futarchy_get_position` to track a wallet, and `futarchy_vote` to \
                 cast a paid vote. Voting executes a real on-chain transaction."
                    .into(),
            ),
        }
    }

    #[allow(clippy::manual_async_fn)]
    fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<ListToolsResult, McpError>> + Send + '_ {
        async move {
            Ok(ListToolsResult {
                tools: mcp_tools(),
                next_cursor: None,
            })
        }
    }

    #[allow(clippy::manual_async_fn)]
    fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<CallToolResult, McpError>> + Send + '_ {
        async move { Ok(self.dispatch(&request.name, request.arguments).await) }
    }
}

/// Run the MCP server on stdio transport.
pub async fn run_server(
    config: ClientConfig,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    use rmcp::{transport::stdio, ServiceExt};

    info!(
        api = %config.api_base_url(),
        wallet_configured = config.has_wallet(),
        "Starting futarchy402 MCP server"
    );

    let server = FutarchyMcpServer::new(Futarchy402Client::new(config)?);

    // A transport that closes during setup (stdin already gone) is a clean exit.
    let service = match server.serve(stdio()).await {
        Ok(s) => s,
        Err(e) => {
            info!("MCP transport closed during setup: {}", e);
            return Ok(());
        }
    };

    if let Err(e) = service.waiting().await {
        info!("MCP transport closed: {}", e);
    }

    info!("MCP server stopped");
    Ok(())
}
