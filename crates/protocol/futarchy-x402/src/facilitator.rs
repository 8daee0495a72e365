//! x402 facilitator client.
//!
//! Turns a payment requirement into an unsigned, ready-to-sign transaction.
//! The facilitator is a separate trust domain: its error responses are passed
//! back verbatim instead of being mapped onto governance API errors.

use std::sync::Arc;

use futarchy_crypto::PublicKey;
use tracing::{debug, info, warn};

use crate::error::{VoteError, VoteResult};
use crate::transaction::UnsignedTransaction;
use crate::transport::{join_url, HttpRequest, Transport};
use crate::types::{PaymentRequirement, SettleRequest, SettleResponse};

/// Path of the settle endpoint, relative to the facilitator base URL.
pub const SETTLE_PATH: &str = "facilitator/settle";

/// Client for the settlement facilitator.
#[derive(Clone)]
pub struct FacilitatorClient {
    transport: Arc<dyn Transport>,
    /// Base URL of the facilitator
    base_url: String,
}

impl FacilitatorClient {
    /// Create a new facilitator client.
    pub fn new(facilitator_url: &str, transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            base_url: facilitator_url.trim_end_matches('/').to_string(),
        }
    }

    /// Request a transaction paying `requirement` from `payer`.
    ///
    /// # Errors
    /// - `NetworkError` if no response arrived
    /// - `FacilitatorError` for any non-2xx status, or a 2xx body without a
    ///   transaction
    pub async fn settle(
        &self,
        requirement: &PaymentRequirement,
        payer: &PublicKey,
    ) -> VoteResult<UnsignedTransaction> {
        let url = join_url(&self.base_url, SETTLE_PATH);
        debug!(url = %url, payer = %payer, "Requesting transaction from facilitator");

        let body = serde_json::to_value(SettleRequest {
            requirement,
            payer: payer.to_base58(),
        })
        .map_err(|e| VoteError::FacilitatorError {
            status: 0,
            body: format!("failed to encode settle request: {}", e),
        })?;

        let response = self
            .transport
            .send(HttpRequest::post(url, body))
            .await
            .map_err(|e| VoteError::NetworkError(e.to_string()))?;

        if !response.is_success() {
            warn!(status = response.status, "Facilitator rejected settlement");
            return Err(VoteError::FacilitatorError {
                status: response.status,
                body: response.body,
            });
        }

        let settled: SettleResponse =
            response.json().map_err(|_| VoteError::FacilitatorError {
                status: response.status,
                body: response.body.clone(),
            })?;

        info!(
            bytes = settled.transaction.len(),
            "Facilitator returned unsigned transaction"
        );
        Ok(UnsignedTransaction::new(settled.transaction))
    }

    /// Get the facilitator's base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl std::fmt::Debug for FacilitatorClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FacilitatorClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::{HttpResponse, TransportError};
    use async_trait::async_trait;

    struct Fixed(Result<HttpResponse, TransportError>);

    #[async_trait]
    impl Transport for Fixed {
        async fn send(&self, _request: HttpRequest) -> Result<HttpResponse, TransportError> {
            self.0.clone()
        }
    }

    fn requirement() -> PaymentRequirement {
        PaymentRequirement::from_header(Some(
            r#"{"amount":1,"currency":"USDC","destination":"D","expiry":1}"#,
        ))
        .unwrap()
    }

    #[test]
    fn test_client_url_normalization() {
        let client = FacilitatorClient::new(
            "https://api.example.com/",
            Arc::new(Fixed(Ok(HttpResponse::new(200, "")))),
        );
        assert_eq!(client.base_url(), "https://api.example.com");
        assert!(format!("{:?}", client).contains("api.example.com"));
    }

    #[tokio::test]
    async fn test_settle_non_2xx_preserves_body() {
        let client = FacilitatorClient::new(
            "https://f.example.com",
            Arc::new(Fixed(Ok(HttpResponse::new(503, "insufficient SOL for fees")))),
        );
        let err = client
            .settle(&requirement(), &PublicKey([1u8; 32]))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            VoteError::FacilitatorError {
                status: 503,
                body: "insufficient SOL for fees".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_settle_network_failure() {
        let client = FacilitatorClient::new(
            "https://f.example.com",
            Arc::new(Fixed(Err(TransportError::Network("connection reset".into())))),
        );
        let err = client
            .settle(&requirement(), &PublicKey([1u8; 32]))
            .await
            .unwrap_err();
        assert!(matches!(err, VoteError::NetworkError(_)));
    }

    #[tokio::test]
    async fn test_settle_missing_transaction_field() {
        let client = FacilitatorClient::new(
            "https://f.example.com",
            Arc::new(Fixed(Ok(HttpResponse::new(200, r#"{"status":"ok"}"#)))),
        );
        let err = client
            .settle(&requirement(), &PublicKey([1u8; 32]))
            .await
            .unwrap_err();
        assert!(matches!(err, VoteError::FacilitatorError { status: 200, .. }));
    }

    #[tokio::test]
    async fn test_settle_success() {
        let client = FacilitatorClient::new(
            "https://f.example.com",
            Arc::new(Fixed(Ok(HttpResponse::new(200, r#"{"transaction":"AQID"}"#)))),
        );
        let unsigned = client
            .settle(&requirement(), &PublicKey([1u8; 32]))
            .await
            .unwrap();
        assert_eq!(unsigned.encoded(), "AQID");
    }
}
