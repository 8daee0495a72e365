//! Error types for the governance API client.

use futarchy_x402::VoteError;
use thiserror::Error;

/// Result type for read-only API operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors from the read-only governance API and client configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The API answered with a status the operation does not handle.
    #[error("Failed to {operation}: HTTP {status}")]
    RequestFailed {
        /// Operation name, e.g. "list polls"
        operation: &'static str,
        /// HTTP status
        status: u16,
    },

    /// The poll does not exist.
    #[error("Poll not found: {0}")]
    PollNotFound(String),

    /// The wallet has no position in the poll.
    #[error("No position found for {voter} in poll {poll_id}")]
    PositionNotFound {
        /// Poll that was queried
        poll_id: String,
        /// Wallet that was queried
        voter: String,
    },

    /// The API rejected the request parameters (400), or they were
    /// rejected locally before sending.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Connection failure or timeout.
    #[error("Network error: {0}")]
    Network(String),

    /// A 2xx body that does not match the expected shape.
    #[error("Failed to decode {operation} response: {reason}")]
    Decode {
        /// Operation name
        operation: &'static str,
        /// Decoder message
        reason: String,
    },

    /// Invalid client configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ApiError {
    /// Returns a user-friendly suggestion for recovering from this error.
    pub fn suggestion(&self) -> &str {
        match self {
            Self::RequestFailed { .. } => "The API may be degraded; retry later",
            Self::PollNotFound(_) => "List polls to find a valid poll id",
            Self::PositionNotFound { .. } => {
                "This wallet has not voted on the poll; check the voter public key"
            }
            Self::InvalidRequest(_) => "Check the request parameters",
            Self::Network(_) => "Check connectivity and FUTARCHY_API_URL",
            Self::Decode { .. } => "The API response changed shape; please report it",
            Self::Config(_) => "Check FUTARCHY_* environment variables and the config file",
        }
    }

    /// Returns true if the same request may succeed later.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Network(_) => true,
            Self::RequestFailed { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

/// Recovery hint for a vote or wallet error, naming the client's
/// configuration where the key could have come from.
pub fn vote_suggestion(error: &VoteError) -> &str {
    match error {
        VoteError::MissingKeyMaterial => {
            "Pass a wallet private key or set the WALLET_PRIVATE_KEY environment variable"
        }
        other => other.suggestion(),
    }
}
