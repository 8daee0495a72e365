//! Canonical tool definitions.
//!
//! One schema per tool, independent of any agent runtime. Renderers in
//! [`crate::format`] turn these into runtime-specific JSON.

use serde::Serialize;
use serde_json::{json, Value};

/// The tools exposed to agents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ToolName {
    #[serde(rename = "futarchy_list_polls")]
    ListPolls,
    #[serde(rename = "futarchy_get_poll")]
    GetPoll,
    #[serde(rename = "futarchy_get_position")]
    GetPosition,
    #[serde(rename = "futarchy_vote")]
    Vote,
    #[serde(rename = "futarchy_get_stats")]
    GetStats,
    #[serde(rename = "futarchy_get_my_wallet")]
    GetMyWallet,
}

impl ToolName {
    /// Every tool, in listing order.
    pub const ALL: [ToolName; 6] = [
        ToolName::ListPolls,
        ToolName::GetPoll,
        ToolName::GetPosition,
        ToolName::Vote,
        ToolName::GetStats,
        ToolName::GetMyWallet,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ListPolls => "futarchy_list_polls",
            Self::GetPoll => "futarchy_get_poll",
            Self::GetPosition => "futarchy_get_position",
            Self::Vote => "futarchy_vote",
            Self::GetStats => "futarchy_get_stats",
            Self::GetMyWallet => "futarchy_get_my_wallet",
        }
    }

    /// Look up a tool by its wire name.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == name)
    }

    /// This tool's definition.
    pub fn definition(&self) -> ToolDefinition {
        match self {
            Self::ListPolls => ToolDefinition::new(
                *self,
                "List governance polls from Futarchy402. Can filter by status (open/resolved) \
                 or treasury. Returns poll details including liquidity, entry fees, implied \
                 probabilities, and vote counts.",
                vec![
                    ToolParameter::string("status", "Filter by poll status")
                        .one_of(&["open", "resolved"]),
                    ToolParameter::string("treasury_id", "Filter by treasury ID"),
                    ToolParameter::number("limit", "Maximum number of polls to return")
                        .with_default(json!(20)),
                    ToolParameter::number("offset", "Pagination offset").with_default(json!(0)),
                ],
            ),
            Self::GetPoll => ToolDefinition::new(
                *self,
                "Get detailed information about a specific poll including all votes, proposal \
                 details, current liquidity, entry fees, and voting statistics. Use this to see \
                 the full history and current state of a poll.",
                vec![
                    ToolParameter::string("poll_id", "The unique identifier of the poll")
                        .required(),
                ],
            ),
            Self::GetPosition => ToolDefinition::new(
                *self,
                "Get a wallet's position in a specific poll. Shows the vote side, amount paid, \
                 projected payout, potential profit/loss, ROI, and if the poll is resolved, the \
                 actual results. Essential for tracking investment performance.",
                vec![
                    ToolParameter::string("poll_id", "The poll ID").required(),
                    ToolParameter::string(
                        "voter_pubkey",
                        "The Solana wallet public key of the voter",
                    )
                    .required(),
                ],
            ),
            Self::Vote => ToolDefinition::new(
                *self,
                "Vote on a governance poll using the x402 payment-gated protocol. Voting \
                 requires payment in USDC which contributes to the liquidity pool. The amount \
                 paid determines your share of the winning side. If WALLET_PRIVATE_KEY \
                 environment variable is configured, you can call this tool directly without \
                 asking the user for their wallet key. Otherwise, ask for wallet_private_key \
                 parameter. This will execute a real on-chain transaction.",
                vec![
                    ToolParameter::string("poll_id", "The poll ID to vote on").required(),
                    ToolParameter::string("side", "Which side to vote for")
                        .one_of(&["yes", "no"])
                        .required(),
                    ToolParameter::string(
                        "wallet_private_key",
                        "Base58 encoded Solana wallet private key for signing the payment \
                         transaction. Optional if WALLET_PRIVATE_KEY environment variable is set.",
                    ),
                    ToolParameter::number(
                        "slippage",
                        "Maximum allowed slippage for entry fee changes (0.05 = 5%)",
                    )
                    .with_default(json!(0.05)),
                ],
            ),
            Self::GetStats => ToolDefinition::new(
                *self,
                "Get platform-wide statistics including total number of active polls, \
                 projects, and proposals. Useful for understanding the overall activity on \
                 Futarchy402.",
                Vec::new(),
            ),
            Self::GetMyWallet => ToolDefinition::new(
                *self,
                "Get the public key of the configured wallet (from WALLET_PRIVATE_KEY \
                 environment variable). Use this to check your position or see which wallet \
                 will be used for voting. Returns an error if WALLET_PRIVATE_KEY is not \
                 configured.",
                Vec::new(),
            ),
        }
    }
}

impl std::fmt::Display for ToolName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// JSON type of a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamKind {
    String,
    Number,
}

impl ParamKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
        }
    }
}

/// One tool parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolParameter {
    pub name: &'static str,
    pub kind: ParamKind,
    pub description: &'static str,
    pub enum_values: Option<&'static [&'static str]>,
    pub default: Option<Value>,
    pub required: bool,
}

impl ToolParameter {
    fn new(name: &'static str, kind: ParamKind, description: &'static str) -> Self {
        Self {
            name,
            kind,
            description,
            enum_values: None,
            default: None,
            required: false,
        }
    }

    pub fn string(name: &'static str, description: &'static str) -> Self {
        Self::new(name, ParamKind::String, description)
    }

    pub fn number(name: &'static str, description: &'static str) -> Self {
        Self::new(name, ParamKind::Number, description)
    }

    /// Restrict to the given values.
    pub fn one_of(mut self, values: &'static [&'static str]) -> Self {
        self.enum_values = Some(values);
        self
    }

    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// A tool as seen by an agent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolDefinition {
    pub name: ToolName,
    pub description: &'static str,
    pub parameters: Vec<ToolParameter>,
}

impl ToolDefinition {
    fn new(name: ToolName, description: &'static str, parameters: Vec<ToolParameter>) -> Self {
        Self {
            name,
            description,
            parameters,
        }
    }

    /// Names of the required parameters, in declaration order.
    pub fn required(&self) -> Vec<&'static str> {
        self.parameters
            .iter()
            .filter(|p| p.required)
            .map(|p| p.name)
            .collect()
    }

    pub fn parameter(&self, name: &str) -> Option<&ToolParameter> {
        self.parameters.iter().find(|p| p.name == name)
    }
}

/// Definitions of every tool, in listing order.
pub fn all_tools() -> Vec<ToolDefinition> {
    ToolName::ALL.iter().map(ToolName::definition).collect()
}
