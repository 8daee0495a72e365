//! x402 payment negotiation for futarchy402 governance votes.
//!
//! A vote on a futarchy402 poll is a paid write: the first request is
//! answered with `402 Payment Required`, the payment is settled through a
//! facilitator, and the vote is sent again carrying the signed payment.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐  POST /poll/{id}/vote   ┌──────────────┐
//! │  VoteClient  │ ──────────────────────→│  Governance  │
//! │              │ ←────────────────────  │  API         │
//! │              │  402 + X-Payment-      │              │
//! │              │        Required        │              │
//! │              │                        └──────────────┘
//! │              │  POST /facilitator/    ┌──────────────┐
//! │              │        settle          │              │
//! │              │ ──────────────────────→│  Facilitator │
//! │              │ ←────────────────────  │              │
//! │              │  unsigned transaction  └──────────────┘
//! │   sign       │
//! │   (local)    │  POST /poll/{id}/vote  ┌──────────────┐
//! │              │  + X-PAYMENT           │  Governance  │
//! │              │ ──────────────────────→│  API         │
//! │              │ ←────────────────────  │              │
//! │              │  200 {vote_id, ...}    │              │
//! └─────────────┘                        └──────────────┘
//! ```
//!
//! # Components
//!
//! - **[`transport`]**: HTTP requests and responses, no status interpretation
//! - **[`negotiate`]**: the first vote request and the per-step status table
//! - **[`facilitator`]**: turns a payment requirement into a transaction
//! - **[`transaction`]**: signs the wallet's slot of that transaction
//! - **[`resubmit`]**: the paid vote request
//! - **[`client`]**: runs the steps in order
//! - **[`error`]**: the failure taxonomy with recovery suggestions
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use futarchy_x402::{HttpTransport, Side, VoteClient, VoteIntent};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let transport = Arc::new(HttpTransport::new()?);
//! let client = VoteClient::new(
//!     "https://futarchy402-api.example.com",
//!     "https://futarchy402-api.example.com",
//!     transport,
//! );
//!
//! let intent = VoteIntent::new("poll-123", Side::Yes)?.with_slippage(0.1)?;
//! match client.vote_with_encoded_key(&intent, "base58-keypair...").await {
//!     Ok(receipt) => println!("voted: {}", receipt.vote_id),
//!     Err(e) => eprintln!("{} ({})", e, e.suggestion()),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Retries
//!
//! Nothing is retried. [`VoteError::is_retryable`] tells the caller whether
//! a fresh handshake may help; an interrupted resubmission should be
//! reconciled by reading the wallet's position first.

pub mod client;
pub mod error;
pub mod facilitator;
pub mod negotiate;
pub mod resubmit;
pub mod transaction;
pub mod transport;
pub mod types;

// Re-export main types
pub use client::{HandshakeStage, VoteClient};
pub use error::{FailureKind, VoteError, VoteOutcome, VoteResult};
pub use facilitator::{FacilitatorClient, SETTLE_PATH};
pub use negotiate::{classify_failure, negotiate, Negotiation, Step};
pub use resubmit::{payment_proof, resubmit};
pub use transaction::{sign_transaction, SignedTransaction, UnsignedTransaction};
pub use transport::{
    join_url, HttpRequest, HttpResponse, HttpTransport, Method, Transport, TransportError,
    DEFAULT_TIMEOUT,
};
pub use types::{
    validate_poll_id, Amount, PaymentProof, PaymentRequirement, PaymentSummary, Side,
    SignedPaymentDetails, VoteIntent, VoteReceipt, DEFAULT_NETWORK, DEFAULT_SLIPPAGE,
    HEADER_PAYMENT, HEADER_PAYMENT_REQUIRED, SCHEME_EXACT, X402_VERSION,
};
