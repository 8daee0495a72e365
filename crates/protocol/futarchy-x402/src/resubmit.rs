//! Vote resubmission.
//!
//! Reissues the original vote request with the signed transaction attached
//! as an `X-PAYMENT` proof, and turns the final answer into a
//! [`VoteOutcome`].

use futarchy_crypto::PublicKey;
use tracing::{debug, info, warn};

use crate::error::{VoteError, VoteOutcome};
use crate::negotiate::{classify_failure, parse_vote_success, vote_request, Step};
use crate::transaction::SignedTransaction;
use crate::transport::Transport;
use crate::types::{
    PaymentProof, PaymentRequirement, PaymentSummary, SignedPaymentDetails, VoteIntent,
    HEADER_PAYMENT, SCHEME_EXACT, X402_VERSION,
};

/// Build the `X-PAYMENT` proof for a signed transaction.
pub fn payment_proof(signed: &SignedTransaction, requirement: &PaymentRequirement) -> PaymentProof {
    PaymentProof {
        x402_version: X402_VERSION,
        scheme: SCHEME_EXACT.to_string(),
        network: requirement.network_or_default().to_string(),
        payload: SignedPaymentDetails {
            transaction: signed.to_base64(),
            signature: signed.signature().to_base58(),
        },
    }
}

/// Resend the vote with payment attached.
///
/// Not idempotent. If this future is dropped after the request went out,
/// the vote's state is unknown and must be reconciled through the
/// position endpoint rather than by resubmitting.
pub async fn resubmit(
    transport: &dyn Transport,
    api_base_url: &str,
    intent: &VoteIntent,
    signed: &SignedTransaction,
    requirement: &PaymentRequirement,
    voter: &PublicKey,
) -> VoteOutcome {
    let proof = payment_proof(signed, requirement).to_header()?;
    let request = vote_request(api_base_url, intent, voter)?.header(HEADER_PAYMENT, proof);

    debug!(
        poll_id = %intent.poll_id(),
        signature = %signed.signature(),
        "Resubmitting vote with payment"
    );

    let response = transport
        .send(request)
        .await
        .map_err(|e| VoteError::NetworkError(e.to_string()))?;

    if !response.is_success() {
        let err = classify_failure(Step::Resubmission, &response);
        warn!(status = response.status, kind = ?err.kind(), "Paid vote rejected");
        return Err(err);
    }

    let mut receipt = parse_vote_success(&response)?;
    if receipt.transaction_signature.is_none() {
        receipt.transaction_signature = Some(signed.signature().to_base58());
    }
    receipt.payment = Some(PaymentSummary::from(requirement));

    info!(
        poll_id = %intent.poll_id(),
        vote_id = %receipt.vote_id,
        "Vote recorded"
    );
    Ok(receipt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction::{sign_transaction, UnsignedTransaction};
    use crate::transport::{HttpRequest, HttpResponse, TransportError};
    use crate::types::Side;
    use async_trait::async_trait;
    use futarchy_crypto::KeyMaterial;
    use std::sync::Mutex;

    struct Recording {
        response: HttpResponse,
        seen: Mutex<Vec<HttpRequest>>,
    }

    #[async_trait]
    impl Transport for Recording {
        async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
            if let Ok(mut seen) = self.seen.lock() {
                seen.push(request);
            }
            Ok(self.response.clone())
        }
    }

    fn signed_for(key: KeyMaterial) -> (SignedTransaction, PublicKey) {
        let payer = key.public_key();
        let mut tx = vec![1u8];
        tx.extend([0u8; 64]);
        tx.extend([1, 0, 1, 2]);
        tx.extend(payer.0);
        tx.extend([0u8; 32]);
        tx.extend([7u8; 32]);
        tx.push(0);
        let signed = sign_transaction(UnsignedTransaction::from_bytes(&tx), key).unwrap();
        (signed, payer)
    }

    fn requirement() -> PaymentRequirement {
        PaymentRequirement::from_header(Some(
            r#"{"amount":1,"currency":"USDC","destination":"D","expiry":1}"#,
        ))
        .unwrap()
    }

    #[tokio::test]
    async fn test_resubmit_attaches_payment_header() {
        let (signed, voter) = signed_for(KeyMaterial::generate());
        let transport = Recording {
            response: HttpResponse::new(200, r#"{"vote_id":"v1"}"#),
            seen: Mutex::new(Vec::new()),
        };
        let intent = VoteIntent::new("p1", Side::Yes).unwrap();

        let receipt = resubmit(&transport, "https://api", &intent, &signed, &requirement(), &voter)
            .await
            .unwrap();

        assert_eq!(receipt.vote_id, "v1");
        assert_eq!(
            receipt.transaction_signature,
            Some(signed.signature().to_base58())
        );
        assert_eq!(receipt.payment.unwrap().currency, "USDC");

        let seen = transport.seen.lock().unwrap();
        let header = seen[0].header_value("X-PAYMENT").unwrap();
        let proof = PaymentProof::from_header(header).unwrap();
        assert_eq!(proof.x402_version, 1);
        assert_eq!(proof.scheme, "exact");
        assert_eq!(proof.network, "solana");
        assert_eq!(proof.payload.transaction, signed.to_base64());
    }

    #[tokio::test]
    async fn test_resubmit_409_is_slippage() {
        let (signed, voter) = signed_for(KeyMaterial::generate());
        let transport = Recording {
            response: HttpResponse::new(409, r#"{"error":"price moved"}"#),
            seen: Mutex::new(Vec::new()),
        };
        let intent = VoteIntent::new("p1", Side::No).unwrap();

        let err = resubmit(&transport, "https://api", &intent, &signed, &requirement(), &voter)
            .await
            .unwrap_err();
        assert_eq!(err, VoteError::SlippageExceeded("price moved".to_string()));
    }
}
