//! Handshake orchestration.
//!
//! Runs negotiate → settle → sign → resubmit for one vote intent and
//! produces exactly one [`VoteOutcome`]. The first failing step ends the
//! handshake; nothing is retried.

use std::sync::Arc;

use futarchy_crypto::KeyMaterial;
use tracing::{debug, info, warn};

use crate::error::VoteOutcome;
use crate::facilitator::FacilitatorClient;
use crate::negotiate::{negotiate, Negotiation};
use crate::resubmit::resubmit;
use crate::transaction::sign_transaction;
use crate::transport::Transport;
use crate::types::VoteIntent;

/// Progress of a single handshake. Stages only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandshakeStage {
    Negotiating,
    AwaitingPayment,
    Settling,
    Signing,
    Resubmitting,
    Done,
}

impl std::fmt::Display for HandshakeStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Negotiating => "negotiating",
            Self::AwaitingPayment => "awaiting_payment",
            Self::Settling => "settling",
            Self::Signing => "signing",
            Self::Resubmitting => "resubmitting",
            Self::Done => "done",
        };
        f.write_str(name)
    }
}

/// Casts paid votes against a governance API.
///
/// Holds no per-vote state: concurrent [`vote`](Self::vote) calls share
/// only the transport.
#[derive(Clone)]
pub struct VoteClient {
    transport: Arc<dyn Transport>,
    api_base_url: String,
    facilitator: FacilitatorClient,
}

impl VoteClient {
    /// Create a client for the given API and facilitator.
    pub fn new(api_base_url: &str, facilitator_url: &str, transport: Arc<dyn Transport>) -> Self {
        Self {
            facilitator: FacilitatorClient::new(facilitator_url, transport.clone()),
            transport,
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Cast a vote, paying for it if the API asks.
    ///
    /// `key` is consumed: it is zeroed once the transaction is signed, or
    /// as soon as the handshake ends without reaching the signing step.
    pub async fn vote(&self, intent: &VoteIntent, key: KeyMaterial) -> VoteOutcome {
        let mut stage = HandshakeStage::Negotiating;
        let outcome = self.run(intent, key, &mut stage).await;

        match &outcome {
            Ok(receipt) => info!(
                poll_id = %intent.poll_id(),
                vote_id = %receipt.vote_id,
                paid = receipt.payment.is_some(),
                "Vote handshake complete"
            ),
            Err(e) => warn!(
                poll_id = %intent.poll_id(),
                stage = %stage,
                kind = ?e.kind(),
                error = %e,
                "Vote handshake failed"
            ),
        }
        outcome
    }

    /// Decode `encoded_key` and cast a vote with it.
    ///
    /// A key that does not decode fails with `InvalidKeyMaterial` before
    /// any request is sent.
    pub async fn vote_with_encoded_key(&self, intent: &VoteIntent, encoded_key: &str) -> VoteOutcome {
        let key = KeyMaterial::decode(encoded_key)?;
        self.vote(intent, key).await
    }

    async fn run(
        &self,
        intent: &VoteIntent,
        key: KeyMaterial,
        stage: &mut HandshakeStage,
    ) -> VoteOutcome {
        let voter = key.public_key();

        let requirement =
            match negotiate(self.transport.as_ref(), &self.api_base_url, intent, &voter).await? {
                Negotiation::PaidImmediately(receipt) => {
                    advance(stage, HandshakeStage::Done);
                    return Ok(receipt);
                }
                Negotiation::PaymentRequired(requirement) => requirement,
            };
        advance(stage, HandshakeStage::AwaitingPayment);

        advance(stage, HandshakeStage::Settling);
        let unsigned = self.facilitator.settle(&requirement, &voter).await?;

        advance(stage, HandshakeStage::Signing);
        let signed = sign_transaction(unsigned, key)?;

        advance(stage, HandshakeStage::Resubmitting);
        let receipt = resubmit(
            self.transport.as_ref(),
            &self.api_base_url,
            intent,
            &signed,
            &requirement,
            &voter,
        )
        .await?;

        advance(stage, HandshakeStage::Done);
        Ok(receipt)
    }

    /// The governance API base URL.
    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    /// The facilitator client used for settlement.
    pub fn facilitator(&self) -> &FacilitatorClient {
        &self.facilitator
    }
}

impl std::fmt::Debug for VoteClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VoteClient")
            .field("api_base_url", &self.api_base_url)
            .field("facilitator", &self.facilitator)
            .finish()
    }
}

fn advance(stage: &mut HandshakeStage, next: HandshakeStage) {
    debug!(from = %stage, to = %next, "Handshake stage");
    *stage = next;
}
