//! futarchy402 governance client.
//!
//! Wraps the governance API for agents and tools:
//!
//! - **[`config`]**: API and facilitator URLs, timeout, configured wallet
//! - **[`governance`]**: read-only queries (polls, positions, stats)
//! - **[`client`]**: the [`Futarchy402Client`] facade, which also casts
//!   paid votes through [`futarchy_x402`]
//!
//! # Example
//!
//! ```rust,no_run
//! use futarchy_client::{Futarchy402Client, PollFilter, PollStatus};
//! use futarchy_x402::Side;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Futarchy402Client::from_env()?;
//!
//! let open = client
//!     .list_polls(&PollFilter::default().with_status(PollStatus::Open))
//!     .await?;
//! if let Some(poll) = open.polls.first() {
//!     // Uses WALLET_PRIVATE_KEY since no key is passed.
//!     let receipt = client.vote(&poll.id, Side::Yes, Some(0.05), None).await?;
//!     println!("vote {}", receipt.vote_id);
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod governance;
pub mod models;

pub use client::Futarchy402Client;
pub use config::{
    ClientConfig, DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS, ENV_API_URL, ENV_FACILITATOR_URL,
    ENV_TIMEOUT_SECS, ENV_WALLET_PRIVATE_KEY,
};
pub use error::{vote_suggestion, ApiError, ApiResult};
pub use governance::GovernanceClient;
pub use models::{Pagination, Poll, PollDetails, PollFilter, PollList, PollStatus, Position, Stats};
