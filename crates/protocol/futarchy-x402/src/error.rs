//! Error taxonomy for the vote handshake.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for vote protocol operations.
pub type VoteResult<T> = Result<T, VoteError>;

/// Terminal result of one vote invocation.
///
/// Exactly one is produced per invocation, carrying whichever step failed
/// first; later steps are never attempted.
pub type VoteOutcome = Result<crate::types::VoteReceipt, VoteError>;

/// Errors that can end a vote handshake.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum VoteError {
    /// The wallet private key could not be decoded.
    #[error("Invalid wallet private key: {0}")]
    InvalidKeyMaterial(String),

    /// No key was passed and none is configured.
    #[error("No wallet private key provided")]
    MissingKeyMaterial,

    /// Slippage tolerance outside `[0, 1)`.
    #[error("Invalid slippage {0}: must be at least 0 and below 1")]
    InvalidSlippage(f64),

    /// The governance API rejected the vote parameters (400).
    #[error("Invalid vote request: {0}")]
    InvalidVoteRequest(String),

    /// This wallet already voted on this poll (403).
    #[error("Duplicate vote: {0}")]
    DuplicateVote(String),

    /// The poll does not exist (404).
    #[error("Poll not found: {0}")]
    ProposalNotFound(String),

    /// A 402 response without a usable payment requirement.
    #[error("Missing X-Payment-Required header: {reason}")]
    MissingPaymentHeader {
        /// What was wrong with the header
        reason: String,
    },

    /// The facilitator answered with an error; its body is kept verbatim.
    #[error("Facilitator error {status}: {body}")]
    FacilitatorError {
        /// HTTP status returned by the facilitator
        status: u16,
        /// Raw response body
        body: String,
    },

    /// The unsigned transaction could not be decoded or signed.
    #[error("Transaction signing failed: {0}")]
    SigningError(String),

    /// The price moved beyond the slippage tolerance before settlement (409).
    #[error("Slippage exceeded: {0}")]
    SlippageExceeded(String),

    /// Connection failure or timeout.
    #[error("Network error: {0}")]
    NetworkError(String),

    /// A status code the step does not expect.
    #[error("Unexpected response {status}: {detail}")]
    UnexpectedResponse {
        /// HTTP status
        status: u16,
        /// Response detail
        detail: String,
    },
}

/// Serializable tag naming a [`VoteError`] variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FailureKind {
    InvalidKeyMaterial,
    MissingKeyMaterial,
    InvalidSlippage,
    InvalidVoteRequest,
    DuplicateVote,
    ProposalNotFound,
    MissingPaymentHeader,
    FacilitatorError,
    SigningError,
    SlippageExceeded,
    NetworkError,
    UnexpectedResponse,
}

impl VoteError {
    /// The failure kind.
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::InvalidKeyMaterial(_) => FailureKind::InvalidKeyMaterial,
            Self::MissingKeyMaterial => FailureKind::MissingKeyMaterial,
            Self::InvalidSlippage(_) => FailureKind::InvalidSlippage,
            Self::InvalidVoteRequest(_) => FailureKind::InvalidVoteRequest,
            Self::DuplicateVote(_) => FailureKind::DuplicateVote,
            Self::ProposalNotFound(_) => FailureKind::ProposalNotFound,
            Self::MissingPaymentHeader { .. } => FailureKind::MissingPaymentHeader,
            Self::FacilitatorError { .. } => FailureKind::FacilitatorError,
            Self::SigningError(_) => FailureKind::SigningError,
            Self::SlippageExceeded(_) => FailureKind::SlippageExceeded,
            Self::NetworkError(_) => FailureKind::NetworkError,
            Self::UnexpectedResponse { .. } => FailureKind::UnexpectedResponse,
        }
    }

    /// Returns a user-friendly suggestion for recovering from this error.
    pub fn suggestion(&self) -> &str {
        match self {
            Self::InvalidKeyMaterial(_) => {
                "Provide the wallet's 64-byte secret key encoded as base58"
            }
            Self::MissingKeyMaterial => "Provide the wallet's base58 private key",
            Self::InvalidSlippage(_) => "Use a slippage between 0 and 1 (0.05 = 5%)",
            Self::InvalidVoteRequest(_) => "Check the poll id and side, then try again",
            Self::DuplicateVote(_) => {
                "This wallet already voted on this poll; check its position instead"
            }
            Self::ProposalNotFound(_) => "List open polls to find a valid poll id",
            Self::MissingPaymentHeader { .. } => {
                "The server did not quote payment terms; report this to the poll operator"
            }
            Self::FacilitatorError { .. } => "Retry later or check the facilitator status",
            Self::SigningError(_) => {
                "Make sure the wallet is the payer of the transaction built by the facilitator"
            }
            Self::SlippageExceeded(_) => {
                "The entry fee moved; vote again, optionally with a higher slippage"
            }
            Self::NetworkError(_) => "Check connectivity and retry the vote",
            Self::UnexpectedResponse { .. } => "The API responded unexpectedly; please report it",
        }
    }

    /// Returns true if a fresh handshake may succeed.
    ///
    /// Informational only: the handshake itself never retries. An interrupted
    /// resubmission should be reconciled by checking the wallet's position.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::NetworkError(_) | Self::SlippageExceeded(_))
    }
}

impl From<futarchy_crypto::CryptoError> for VoteError {
    fn from(e: futarchy_crypto::CryptoError) -> Self {
        Self::InvalidKeyMaterial(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_suggestions() {
        let err = VoteError::SlippageExceeded("fee moved".into());
        assert!(!err.suggestion().is_empty());
        assert!(!VoteError::MissingKeyMaterial.suggestion().is_empty());
    }

    #[test]
    fn test_error_retryable() {
        assert!(VoteError::NetworkError("timeout".into()).is_retryable());
        assert!(VoteError::SlippageExceeded("moved".into()).is_retryable());
        assert!(!VoteError::DuplicateVote("again".into()).is_retryable());
        assert!(!VoteError::FacilitatorError {
            status: 500,
            body: "boom".into()
        }
        .is_retryable());
    }

    #[test]
    fn test_error_messages_match_api_wording() {
        assert!(VoteError::InvalidVoteRequest("bad side".into())
            .to_string()
            .contains("Invalid vote request"));
        assert!(VoteError::DuplicateVote("x".into())
            .to_string()
            .contains("Duplicate vote"));
        assert!(VoteError::ProposalNotFound("x".into())
            .to_string()
            .contains("Poll not found"));
        assert!(VoteError::MissingPaymentHeader {
            reason: "header absent".into()
        }
        .to_string()
        .contains("Missing X-Payment-Required header"));
    }

    #[test]
    fn test_kind_serializes_as_name() {
        let json = serde_json::to_string(&VoteError::SigningError("x".into()).kind()).unwrap();
        assert_eq!(json, "\"SigningError\"");
    }

    #[test]
    fn test_crypto_error_becomes_invalid_key() {
        let err: VoteError = futarchy_crypto::CryptoError::KeypairMismatch.into();
        assert_eq!(err.kind(), FailureKind::InvalidKeyMaterial);
    }
}
