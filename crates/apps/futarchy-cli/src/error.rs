//! CLI error types.

use futarchy_client::{vote_suggestion, ApiError};
use futarchy_tools::ToolError;
use futarchy_x402::VoteError;
use thiserror::Error;

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;

/// CLI error enum wrapping all crate errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Read-only API error.
    #[error("{0}")]
    Api(#[from] ApiError),

    /// Vote or wallet error.
    #[error("{0}")]
    Vote(#[from] VoteError),

    /// Tool dispatch error.
    #[error("{0}")]
    Tool(#[from] ToolError),

    /// MCP server failure.
    #[error("MCP server error: {0}")]
    Mcp(String),

    /// IO error.
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// User-facing error with actionable message.
    #[error("{0}")]
    User(String),
}

impl CliError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a user-facing error.
    pub fn user(msg: impl Into<String>) -> Self {
        Self::User(msg.into())
    }

    /// Get the exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            // User errors: 1
            Self::User(_) => 1,
            // Not found: 2
            Self::Api(ApiError::PollNotFound(_) | ApiError::PositionNotFound { .. })
            | Self::Vote(VoteError::ProposalNotFound(_)) => 2,
            // Config errors: 3
            Self::Config(_) | Self::Toml(_) | Self::Api(ApiError::Config(_)) => 3,
            // Network errors: 5
            Self::Api(ApiError::Network(_)) | Self::Vote(VoteError::NetworkError(_)) => 5,
            // Vote and payment errors: 4
            Self::Vote(_) => 4,
            // Remaining API errors: 6
            Self::Api(_) => 6,
            // Tool errors: 7
            Self::Tool(_) | Self::Mcp(_) => 7,
            // IO errors: 9
            Self::Io(_) => 9,
            // JSON errors: 10
            Self::Json(_) => 10,
        }
    }

    /// Short label shown next to the error.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Config(_) | Self::Toml(_) => "config",
            Self::Api(_) => "api",
            Self::Vote(_) => "vote",
            Self::Tool(e) => e.code(),
            Self::Mcp(_) => "mcp",
            Self::Io(_) => "io",
            Self::Json(_) => "json",
            Self::User(_) => "usage",
        }
    }

    /// Recovery hint, if one applies.
    pub fn hint(&self) -> Option<&str> {
        match self {
            Self::Api(e) => Some(e.suggestion()),
            Self::Vote(e) => Some(vote_suggestion(e)),
            Self::Tool(e) => Some(e.suggestion()),
            Self::Config(_) | Self::Toml(_) => {
                Some("Check ~/.futarchy/config.toml or pass --config")
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(CliError::user("bad").exit_code(), 1);
        assert_eq!(
            CliError::from(ApiError::PollNotFound("p".into())).exit_code(),
            2
        );
        assert_eq!(CliError::config("x").exit_code(), 3);
        assert_eq!(CliError::from(VoteError::DuplicateVote("x".into())).exit_code(), 4);
        assert_eq!(
            CliError::from(VoteError::NetworkError("timeout".into())).exit_code(),
            5
        );
        assert_eq!(
            CliError::from(ApiError::Network("dns".into())).exit_code(),
            5
        );
    }

    #[test]
    fn test_hint_delegates() {
        let err = CliError::from(VoteError::MissingKeyMaterial);
        assert!(err.hint().unwrap().contains("WALLET_PRIVATE_KEY"));
        assert!(CliError::user("x").hint().is_none());
        assert_eq!(
            CliError::from(ToolError::UnknownTool("x".into())).label(),
            "UNKNOWN_TOOL"
        );
    }
}
