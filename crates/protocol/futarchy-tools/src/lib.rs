//! Agent tools for futarchy402.
//!
//! Six tools wrap the client for use by AI agents:
//!
//! | Tool | Does |
//! |------|------|
//! | `futarchy_list_polls` | List polls, optionally by status or treasury |
//! | `futarchy_get_poll` | Poll details with votes and proposal |
//! | `futarchy_get_position` | A wallet's position in a poll |
//! | `futarchy_vote` | Pay for and cast a vote |
//! | `futarchy_get_stats` | Platform statistics |
//! | `futarchy_get_my_wallet` | Public key of the configured wallet |
//!
//! Definitions are runtime-neutral ([`ToolDefinition`]) and rendered per
//! agent runtime with [`ToolFormat`]. [`execute_tool`] dispatches a call by
//! name.
//!
//! # Example
//!
//! ```no_run
//! use futarchy_client::{ClientConfig, Futarchy402Client};
//! use futarchy_tools::{execute_tool, ToolContext, ToolFormat};
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let schemas = ToolFormat::Anthropic.render_all();
//! assert_eq!(schemas.len(), 6);
//!
//! let ctx = ToolContext::new(Futarchy402Client::new(ClientConfig::from_env()?)?);
//! let polls = execute_tool("futarchy_list_polls", &json!({"status": "open"}), &ctx).await?;
//! println!("{}", polls);
//! # Ok(())
//! # }
//! ```

pub mod definitions;
pub mod error;
pub mod format;
pub mod handlers;

pub use definitions::{all_tools, ParamKind, ToolDefinition, ToolName, ToolParameter};
pub use error::{ToolError, ToolResult};
pub use format::{input_schema, ToolFormat};
pub use handlers::{execute_tool, execute_tool_text, outcome_json, ToolContext};
