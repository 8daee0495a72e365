//! Tool schema command.

use futarchy_tools::ToolFormat;

use crate::error::CliResult;

/// Execute the tools command.
///
/// Schemas are always JSON; they are meant to be pasted into agent code.
pub fn tools(format: ToolFormat) -> CliResult<String> {
    Ok(serde_json::to_string_pretty(&format.render_all())?)
}
