//! MCP server for futarchy402.
//!
//! Exposes the agent tools from `futarchy-tools` to MCP clients over
//! stdio. Tool schemas come from the canonical definitions, so the server
//! and every other runtime always agree on parameters.

pub mod server;

pub use server::{mcp_tools, run_server, FutarchyMcpServer};
