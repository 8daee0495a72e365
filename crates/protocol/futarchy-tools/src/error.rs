//! Error types for tool execution.

use futarchy_client::{vote_suggestion, ApiError};
use futarchy_x402::VoteError;
use serde_json::{json, Value};
use thiserror::Error;

/// Result type for tool execution.
pub type ToolResult<T> = Result<T, ToolError>;

/// Errors a tool call can end with.
///
/// A failed vote is not one of them: the vote tool reports its outcome,
/// success or failure, as its result.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ToolError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Wallet(#[from] VoteError),

    #[error("Failed to encode result: {0}")]
    Encode(String),
}

impl ToolError {
    /// Short machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownTool(_) => "UNKNOWN_TOOL",
            Self::InvalidArguments(_) => "INVALID_ARGUMENTS",
            Self::Api(_) => "API_ERROR",
            Self::Wallet(_) => "WALLET_ERROR",
            Self::Encode(_) => "ENCODE_ERROR",
        }
    }

    /// Returns a user-friendly suggestion for recovering from this error.
    pub fn suggestion(&self) -> &str {
        match self {
            Self::UnknownTool(_) => "List the available tools and use one of their names",
            Self::InvalidArguments(_) => "Check the tool's input schema",
            Self::Api(e) => e.suggestion(),
            Self::Wallet(e) => vote_suggestion(e),
            Self::Encode(_) => "Please report this error",
        }
    }

    /// Error payload returned to the agent.
    pub fn to_json(&self) -> Value {
        json!({
            "error": self.to_string(),
            "code": self.code(),
            "suggestion": self.suggestion(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_json() {
        let err = ToolError::UnknownTool("futarchy_nope".into());
        let value = err.to_json();
        assert_eq!(value["code"], "UNKNOWN_TOOL");
        assert!(value["error"].as_str().unwrap().contains("futarchy_nope"));
    }

    #[test]
    fn test_wrapped_messages_are_transparent() {
        let err: ToolError = ApiError::PollNotFound("p9".into()).into();
        assert_eq!(err.to_string(), "Poll not found: p9");
        let err: ToolError = VoteError::MissingKeyMaterial.into();
        assert_eq!(err.to_string(), "No wallet private key provided");
        assert!(err.suggestion().contains("WALLET_PRIVATE_KEY"));
    }
}
