//! Client facade.
//!
//! Combines the read-only governance API with the vote handshake and
//! resolves which wallet signs a vote.

use std::sync::Arc;

use futarchy_crypto::{KeyMaterial, PublicKey};
use futarchy_x402::{
    HttpTransport, Side, Transport, VoteClient, VoteError, VoteIntent, VoteOutcome, VoteResult,
};
use tracing::{debug, info};

use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult};
use crate::governance::GovernanceClient;
use crate::models::{PollDetails, PollFilter, PollList, Position, Stats};

/// Entry point for agents and tools talking to futarchy402.
#[derive(Clone)]
pub struct Futarchy402Client {
    config: ClientConfig,
    governance: GovernanceClient,
    votes: VoteClient,
}

impl Futarchy402Client {
    /// Create a client over HTTP using the configured timeout.
    pub fn new(config: ClientConfig) -> ApiResult<Self> {
        let transport = HttpTransport::with_timeout(config.timeout())
            .map_err(|e| ApiError::Config(e.to_string()))?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Create a client configured from the environment.
    pub fn from_env() -> ApiResult<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    /// Create a client over an arbitrary transport.
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        info!(
            api = %config.api_base_url(),
            facilitator = %config.facilitator_url(),
            wallet_configured = config.has_wallet(),
            "Futarchy402 client ready"
        );
        Self {
            governance: GovernanceClient::new(config.api_base_url(), transport.clone()),
            votes: VoteClient::new(config.api_base_url(), config.facilitator_url(), transport),
            config,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn base_url(&self) -> &str {
        self.config.api_base_url()
    }

    pub fn governance(&self) -> &GovernanceClient {
        &self.governance
    }

    // =========================================================================
    // Read-only
    // =========================================================================

    pub async fn list_polls(&self, filter: &PollFilter) -> ApiResult<PollList> {
        self.governance.list_polls(filter).await
    }

    pub async fn get_poll(&self, poll_id: &str) -> ApiResult<PollDetails> {
        self.governance.get_poll(poll_id).await
    }

    pub async fn get_position(&self, poll_id: &str, voter_pubkey: &str) -> ApiResult<Position> {
        self.governance.get_position(poll_id, voter_pubkey).await
    }

    pub async fn get_stats(&self) -> ApiResult<Stats> {
        self.governance.get_stats().await
    }

    // =========================================================================
    // Wallet
    // =========================================================================

    /// Decode the signing key: `explicit` if given, else the configured one.
    ///
    /// # Errors
    /// - `MissingKeyMaterial` if neither is present
    /// - `InvalidKeyMaterial` if the chosen key does not decode
    pub fn resolve_key(&self, explicit: Option<&str>) -> VoteResult<KeyMaterial> {
        let encoded = explicit
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .or_else(|| self.config.wallet_private_key())
            .ok_or(VoteError::MissingKeyMaterial)?;
        debug!(explicit = explicit.is_some(), "Resolving wallet key");
        Ok(KeyMaterial::decode(encoded)?)
    }

    /// Public identifier of the configured wallet.
    pub fn my_wallet(&self) -> VoteResult<PublicKey> {
        let key = KeyMaterial::decode(
            self.config
                .wallet_private_key()
                .ok_or(VoteError::MissingKeyMaterial)?,
        )?;
        Ok(key.public_key())
    }

    // =========================================================================
    // Voting
    // =========================================================================

    /// Vote on a poll, paying for it if required.
    ///
    /// Everything checkable locally (poll id, slippage, key) is checked
    /// before the first request.
    pub async fn vote(
        &self,
        poll_id: &str,
        side: Side,
        slippage: Option<f64>,
        wallet_private_key: Option<&str>,
    ) -> VoteOutcome {
        let mut intent = VoteIntent::new(poll_id, side)?;
        if let Some(slippage) = slippage {
            intent = intent.with_slippage(slippage)?;
        }
        self.vote_intent(&intent, wallet_private_key).await
    }

    /// Vote with a prepared intent.
    pub async fn vote_intent(
        &self,
        intent: &VoteIntent,
        wallet_private_key: Option<&str>,
    ) -> VoteOutcome {
        let key = self.resolve_key(wallet_private_key)?;
        self.votes.vote(intent, key).await
    }
}

impl std::fmt::Debug for Futarchy402Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Futarchy402Client")
            .field("config", &self.config)
            .finish()
    }
}
