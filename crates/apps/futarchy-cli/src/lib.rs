//! Command-line interface for futarchy402.
//!
//! This crate provides the `futarchy` binary. It includes commands for:
//!
//! - **Governance**: list polls, show a poll, show a position, platform stats
//! - **Voting**: cast an x402-paid vote, show the configured wallet
//! - **Agents**: print tool schemas, run a tool, serve tools over MCP
//!
//! # Quick Start
//!
//! ```bash
//! # Open polls
//! futarchy polls --status open
//!
//! # Vote yes with up to 10% entry fee movement
//! export WALLET_PRIVATE_KEY=...
//! futarchy vote <poll-id> yes --slippage 0.1
//!
//! # Tool schemas for an OpenAI agent
//! futarchy tools --format openai
//! ```
//!
//! # Output Formats
//!
//! All commands support `--output` for output control:
//!
//! - `human` (default): Human-readable with colors
//! - `json`: Machine-readable JSON
//!
//! # Configuration
//!
//! Configuration is loaded from `~/.futarchy/config.toml`. Override with
//! `--config`. Values may reference environment variables as `${VAR}`.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;

// Re-export main types
pub use cli::{Cli, Commands, OutputFormatArg, SideArg, StatusArg, ToolFormatArg};
pub use config::CliConfig;
pub use error::{CliError, CliResult};
pub use output::{OutputFormat, Render};
