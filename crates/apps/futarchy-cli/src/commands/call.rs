//! Run an agent tool command.

use futarchy_client::Futarchy402Client;
use futarchy_tools::{execute_tool, ToolContext, ToolError};
use serde_json::Value;

use crate::error::CliResult;

/// Execute the call command.
///
/// Prints the tool's JSON result exactly as an agent would receive it.
pub async fn call(client: Futarchy402Client, tool: &str, args: &str) -> CliResult<String> {
    let args: Value =
        serde_json::from_str(args).map_err(|e| ToolError::InvalidArguments(e.to_string()))?;
    let ctx = ToolContext::new(client);

    let result = execute_tool(tool, &args, &ctx).await?;
    Ok(serde_json::to_string_pretty(&result)?)
}
