//! x402 vote protocol types.
//!
//! Covers the vote intent sent by the caller, the payment requirement quoted
//! by the governance API, the facilitator request/response bodies and the
//! payment proof attached on resubmission.

use std::str::FromStr;

use base64::Engine as _;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::error::{VoteError, VoteResult};

/// x402 protocol version.
pub const X402_VERSION: u32 = 1;

/// HTTP header carrying the payment requirement (server → client, on 402).
pub const HEADER_PAYMENT_REQUIRED: &str = "X-Payment-Required";

/// HTTP header carrying the payment proof (client → server, on resubmission).
pub const HEADER_PAYMENT: &str = "X-PAYMENT";

/// The payment scheme used for vote payments.
pub const SCHEME_EXACT: &str = "exact";

/// Network reported in the payment proof when the requirement names none.
pub const DEFAULT_NETWORK: &str = "solana";

/// Slippage tolerance used when the caller does not specify one (5%).
pub const DEFAULT_SLIPPAGE: f64 = 0.05;

// =============================================================================
// Vote Intent
// =============================================================================

/// Which side of a poll to vote for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Yes,
    No,
}

impl Side {
    /// Wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Yes => "yes",
            Side::No => "no",
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Side {
    type Err = VoteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "yes" => Ok(Side::Yes),
            "no" => Ok(Side::No),
            other => Err(VoteError::InvalidVoteRequest(format!(
                "side must be 'yes' or 'no', got '{}'",
                other
            ))),
        }
    }
}

/// A request to vote on a poll. Immutable once built.
///
/// Construction validates everything that can be checked locally, so an
/// invalid intent never reaches the network.
#[derive(Debug, Clone, PartialEq)]
pub struct VoteIntent {
    poll_id: String,
    side: Side,
    slippage: f64,
}

impl VoteIntent {
    /// Create an intent with the default slippage tolerance.
    pub fn new(poll_id: impl Into<String>, side: Side) -> VoteResult<Self> {
        let poll_id = poll_id.into();
        validate_poll_id(&poll_id)?;

        Ok(Self {
            poll_id,
            side,
            slippage: DEFAULT_SLIPPAGE,
        })
    }

    /// Replace the slippage tolerance.
    ///
    /// # Errors
    /// `InvalidSlippage` unless `0 <= slippage < 1`.
    pub fn with_slippage(mut self, slippage: f64) -> VoteResult<Self> {
        if !(0.0..1.0).contains(&slippage) {
            return Err(VoteError::InvalidSlippage(slippage));
        }
        self.slippage = slippage;
        Ok(self)
    }

    pub fn poll_id(&self) -> &str {
        &self.poll_id
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn slippage(&self) -> f64 {
        self.slippage
    }
}

/// Check a poll id before it is interpolated into a request path.
pub fn validate_poll_id(poll_id: &str) -> VoteResult<()> {
    if poll_id.trim().is_empty() {
        return Err(VoteError::InvalidVoteRequest(
            "poll id must not be empty".to_string(),
        ));
    }
    if poll_id == "." || poll_id == ".." {
        return Err(VoteError::InvalidVoteRequest(format!(
            "poll id is a relative path segment: '{}'",
            poll_id
        )));
    }
    if poll_id
        .chars()
        .any(|c| c.is_whitespace() || matches!(c, '/' | '?' | '#' | '%'))
    {
        return Err(VoteError::InvalidVoteRequest(format!(
            "poll id contains reserved characters: '{}'",
            poll_id
        )));
    }
    Ok(())
}

/// JSON body of the vote request.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct VoteRequestBody<'a> {
    pub side: Side,
    pub slippage: f64,
    pub voter_pubkey: &'a str,
}

// =============================================================================
// Payment Requirement (402 Response)
// =============================================================================

/// Amount quoted in a payment requirement.
///
/// x402 servers send either a JSON number or a decimal string (smallest
/// units). Both are kept as received so the facilitator sees the original.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Amount {
    Number(Number),
    Text(String),
}

impl std::fmt::Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Amount::Number(n) => write!(f, "{}", n),
            Amount::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for Amount {
    fn from(value: u64) -> Self {
        Amount::Number(Number::from(value))
    }
}

impl From<&str> for Amount {
    fn from(value: &str) -> Self {
        Amount::Text(value.to_string())
    }
}

/// Payment terms quoted by the governance API in a 402 response.
///
/// Valid for a single negotiation. Fields the client does not interpret are
/// kept in `extra` and forwarded verbatim to the facilitator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRequirement {
    /// Amount to pay, in `currency` units.
    pub amount: Amount,

    /// Asset symbol or mint (e.g. "USDC").
    #[serde(alias = "asset")]
    pub currency: String,

    /// Address receiving the payment.
    #[serde(alias = "payTo", alias = "pay_to")]
    pub destination: String,

    /// Reference / memo binding the payment to this vote.
    #[serde(default, alias = "memo", skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    /// Expiry of the quote (Unix seconds). Enforced by the server only.
    #[serde(
        default,
        alias = "expires_at",
        alias = "expiresAt",
        skip_serializing_if = "Option::is_none"
    )]
    pub expiry: Option<u64>,

    /// Settlement network, when quoted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network: Option<String>,

    /// Slippage the server accepted for this quote.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slippage: Option<f64>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PaymentRequirement {
    /// Parse the value of an `X-Payment-Required` header.
    ///
    /// Accepts raw JSON or base64-encoded JSON, either a bare requirement or
    /// an x402 envelope with an `accepts` list (the first entry is used).
    /// Anything else is reported as a missing header, since it cannot be
    /// acted on.
    pub fn from_header(header_value: Option<&str>) -> VoteResult<Self> {
        let raw = header_value
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| VoteError::MissingPaymentHeader {
                reason: "header absent".to_string(),
            })?;

        let value: Value = match serde_json::from_str(raw) {
            Ok(v) => v,
            Err(json_err) => base64::engine::general_purpose::STANDARD
                .decode(raw)
                .ok()
                .and_then(|bytes| serde_json::from_slice(&bytes).ok())
                .ok_or_else(|| VoteError::MissingPaymentHeader {
                    reason: format!("header is not JSON: {}", json_err),
                })?,
        };

        let requirement = match value {
            Value::Object(mut envelope) if envelope.contains_key("accepts") => {
                match envelope.remove("accepts") {
                    Some(Value::Array(mut accepts)) if !accepts.is_empty() => accepts.remove(0),
                    _ => {
                        return Err(VoteError::MissingPaymentHeader {
                            reason: "envelope has no accepted payment".to_string(),
                        })
                    }
                }
            }
            other => other,
        };

        serde_json::from_value(requirement).map_err(|e| VoteError::MissingPaymentHeader {
            reason: format!("malformed payment requirement: {}", e),
        })
    }

    /// Network to report in the payment proof.
    pub fn network_or_default(&self) -> &str {
        self.network.as_deref().unwrap_or(DEFAULT_NETWORK)
    }
}

// =============================================================================
// Facilitator API Types
// =============================================================================

/// Request to the facilitator's settle endpoint: the full requirement plus
/// the paying wallet.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct SettleRequest<'a> {
    #[serde(flatten)]
    pub requirement: &'a PaymentRequirement,
    pub payer: String,
}

/// Response from the facilitator's settle endpoint.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SettleResponse {
    /// Base64 serialized, unsigned transaction.
    pub transaction: String,
}

// =============================================================================
// Payment Proof (Client → Server)
// =============================================================================

/// Payment proof sent in the `X-PAYMENT` header on resubmission.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentProof {
    pub x402_version: u32,
    pub scheme: String,
    pub network: String,
    pub payload: SignedPaymentDetails,
}

/// Scheme-specific proof details.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedPaymentDetails {
    /// Base64 serialized, signed transaction.
    pub transaction: String,

    /// The wallet's signature (base58), i.e. the transaction id.
    pub signature: String,
}

impl PaymentProof {
    /// Encode as a base64 header value.
    pub fn to_header(&self) -> VoteResult<String> {
        let json = serde_json::to_vec(self)
            .map_err(|e| VoteError::SigningError(format!("failed to encode payment proof: {}", e)))?;
        Ok(base64::engine::general_purpose::STANDARD.encode(json))
    }

    /// Decode a base64 header value.
    pub fn from_header(header_value: &str) -> Result<Self, String> {
        let decoded = base64::engine::general_purpose::STANDARD
            .decode(header_value)
            .map_err(|e| format!("base64 decode error: {}", e))?;
        serde_json::from_slice(&decoded).map_err(|e| format!("JSON parse error: {}", e))
    }
}

// =============================================================================
// Vote Result
// =============================================================================

/// Success body of the vote endpoint.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct VoteSuccessBody {
    pub vote_id: String,
    #[serde(default)]
    pub transaction_signature: Option<String>,
}

/// Error body returned by the governance API.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(alias = "message")]
    pub error: String,
}

/// Summary of what was paid for a vote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentSummary {
    pub amount: Amount,
    pub currency: String,
    pub destination: String,
}

impl From<&PaymentRequirement> for PaymentSummary {
    fn from(req: &PaymentRequirement) -> Self {
        Self {
            amount: req.amount.clone(),
            currency: req.currency.clone(),
            destination: req.destination.clone(),
        }
    }
}

/// A successfully recorded vote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoteReceipt {
    pub vote_id: String,

    /// On-chain signature of the payment; absent when no payment was needed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_signature: Option<String>,

    /// What was paid; absent when no payment was needed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment: Option<PaymentSummary>,
}
