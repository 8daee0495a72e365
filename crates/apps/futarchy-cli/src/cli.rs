//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use futarchy_client::PollStatus;
use futarchy_tools::ToolFormat;
use futarchy_x402::Side;

use crate::output::OutputFormat;

/// futarchy402 CLI.
#[derive(Parser, Debug)]
#[command(name = "futarchy")]
#[command(version)]
#[command(about = "Browse futarchy402 governance polls and cast x402-paid votes")]
#[command(
    long_about = "Browse futarchy402 governance polls and cast votes paid with USDC over the x402 protocol.\n\nSet WALLET_PRIVATE_KEY (or [wallet] private_key in the config file) to vote."
)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Governance API base URL (overrides config and FUTARCHY_API_URL).
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Output format (human or json).
    #[arg(short, long, global = true, default_value = "human")]
    pub output: OutputFormatArg,

    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Output format argument for clap.
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
pub enum OutputFormatArg {
    /// Human-readable output.
    #[default]
    Human,
    /// JSON output.
    Json,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Human => OutputFormat::Human,
            OutputFormatArg::Json => OutputFormat::Json,
        }
    }
}

/// CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    // =========================================================================
    // Governance Commands
    // =========================================================================
    /// List polls.
    Polls {
        /// Filter by status.
        #[arg(short, long)]
        status: Option<StatusArg>,

        /// Filter by treasury ID.
        #[arg(short, long)]
        treasury: Option<String>,

        /// Maximum polls to return.
        #[arg(short, long, default_value = "20")]
        limit: u32,

        /// Pagination offset.
        #[arg(long, default_value = "0")]
        offset: u32,
    },

    /// Show a poll with its proposal and votes.
    Poll {
        /// Poll ID.
        id: String,
    },

    /// Show a wallet's position in a poll.
    Position {
        /// Poll ID.
        poll_id: String,

        /// Voter public key (defaults to the configured wallet).
        #[arg(long)]
        voter: Option<String>,
    },

    /// Show platform statistics.
    Stats,

    // =========================================================================
    // Wallet & Voting Commands
    // =========================================================================
    /// Show the configured wallet's public key.
    Wallet {
        /// Check whether a public key is well formed instead.
        #[arg(long, value_name = "PUBKEY")]
        check: Option<String>,
    },

    /// Vote on a poll, paying the entry fee over x402.
    ///
    /// Executes a real on-chain USDC payment.
    Vote {
        /// Poll ID.
        poll_id: String,

        /// Side to vote for.
        side: SideArg,

        /// Maximum allowed entry fee change (0.05 = 5%).
        #[arg(short, long, allow_hyphen_values = true)]
        slippage: Option<f64>,

        /// Base58 wallet private key (defaults to the configured wallet).
        #[arg(short, long)]
        key: Option<String>,
    },

    // =========================================================================
    // Agent Integration Commands
    // =========================================================================
    /// Print the agent tool schemas for a runtime.
    Tools {
        /// Target runtime.
        #[arg(short, long, default_value = "anthropic")]
        format: ToolFormatArg,
    },

    /// Run an agent tool by name.
    Call {
        /// Tool name, e.g. futarchy_list_polls.
        tool: String,

        /// Tool arguments as a JSON object.
        #[arg(short, long, default_value = "{}")]
        args: String,
    },

    /// Start an MCP server on stdio.
    Mcp,
}

/// Poll status argument for clap.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StatusArg {
    /// Accepting votes.
    Open,
    /// Closed and settled.
    Resolved,
}

impl From<StatusArg> for PollStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Open => PollStatus::Open,
            StatusArg::Resolved => PollStatus::Resolved,
        }
    }
}

/// Vote side argument for clap.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SideArg {
    Yes,
    No,
}

impl From<SideArg> for Side {
    fn from(arg: SideArg) -> Self {
        match arg {
            SideArg::Yes => Side::Yes,
            SideArg::No => Side::No,
        }
    }
}

/// Tool schema format argument for clap.
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
pub enum ToolFormatArg {
    /// Anthropic Messages API.
    #[default]
    Anthropic,
    /// OpenAI function calling.
    Openai,
    /// Model Context Protocol.
    Mcp,
    /// LangChain structured tools.
    Langchain,
}

impl From<ToolFormatArg> for ToolFormat {
    fn from(arg: ToolFormatArg) -> Self {
        match arg {
            ToolFormatArg::Anthropic => ToolFormat::Anthropic,
            ToolFormatArg::Openai => ToolFormat::OpenAi,
            ToolFormatArg::Mcp => ToolFormat::Mcp,
            ToolFormatArg::Langchain => ToolFormat::LangChain,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parse() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_vote_args() {
        let cli = Cli::try_parse_from(["futarchy", "vote", "p1", "yes", "--slippage", "0.1"])
            .unwrap();
        match cli.command {
            Commands::Vote {
                poll_id,
                side,
                slippage,
                ..
            } => {
                assert_eq!(poll_id, "p1");
                assert_eq!(Side::from(side), Side::Yes);
                assert_eq!(slippage, Some(0.1));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_invalid_side_rejected() {
        assert!(Cli::try_parse_from(["futarchy", "vote", "p1", "maybe"]).is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "futarchy",
            "stats",
            "--output",
            "json",
            "--api-url",
            "https://api.example.com",
        ])
        .unwrap();
        assert!(matches!(cli.output, OutputFormatArg::Json));
        assert_eq!(cli.api_url.as_deref(), Some("https://api.example.com"));
    }

    #[test]
    fn test_tools_format_conversion() {
        let cli = Cli::try_parse_from(["futarchy", "tools", "--format", "openai"]).unwrap();
        match cli.command {
            Commands::Tools { format } => {
                assert_eq!(ToolFormat::from(format), ToolFormat::OpenAi)
            }
            other => panic!("unexpected command {:?}", other),
        }
    }
}
