//! End-to-end handshake tests against a scripted transport.

use std::sync::Arc;

use base64::Engine as _;
use futarchy_crypto::{verify, Signature};
use futarchy_test_utils::{
    api_error, payment_required, payment_required_without_header, requirement_json, settled,
    test_keypair, test_keypair_base58, test_public_key, unsigned_transaction_for, vote_success,
    MockTransport, TEST_EXPIRY,
};
use futarchy_x402::{
    Amount, FailureKind, HttpResponse, Method, PaymentProof, Side, VoteClient, VoteError, VoteIntent,
    HEADER_PAYMENT, HEADER_PAYMENT_REQUIRED,
};
use serde_json::json;

const API: &str = "https://api.futarchy.test";
const FACILITATOR: &str = "https://facilitator.futarchy.test";

fn client(mock: &MockTransport) -> VoteClient {
    VoteClient::new(API, FACILITATOR, Arc::new(mock.clone()))
}

fn intent() -> VoteIntent {
    VoteIntent::new("p1", Side::Yes).unwrap()
}

/// Script negotiation → settlement for the test wallet, then `final_response`.
fn paid_flow(final_response: HttpResponse) -> MockTransport {
    MockTransport::new()
        .respond(payment_required(&requirement_json()))
        .respond(settled(&unsigned_transaction_for(&test_public_key())))
        .respond(final_response)
}

#[tokio::test]
async fn scenario_a_paid_vote_succeeds() {
    let mock = paid_flow(vote_success("v1", Some("sig1")));

    let receipt = client(&mock).vote(&intent(), test_keypair()).await.unwrap();

    assert_eq!(receipt.vote_id, "v1");
    assert_eq!(receipt.transaction_signature.as_deref(), Some("sig1"));
    let payment = receipt.payment.unwrap();
    assert_eq!(payment.amount, Amount::from(1u64));
    assert_eq!(payment.currency, "USDC");
    assert_eq!(payment.destination, "D");

    let requests = mock.requests();
    assert_eq!(requests.len(), 3);
    assert_eq!(requests[0].url, format!("{}/poll/p1/vote", API));
    assert_eq!(requests[1].url, format!("{}/facilitator/settle", FACILITATOR));
    assert_eq!(requests[2].url, format!("{}/poll/p1/vote", API));
    assert!(requests.iter().all(|r| r.method == Method::Post));
    assert!(requests[0].header_value(HEADER_PAYMENT).is_none());
}

#[tokio::test]
async fn scenario_a_payment_proof_is_signed_by_wallet() {
    let mock = paid_flow(vote_success("v1", Some("sig1")));
    client(&mock).vote(&intent(), test_keypair()).await.unwrap();

    let requests = mock.requests();
    let header = requests[2].header_value(HEADER_PAYMENT).unwrap();
    let proof = PaymentProof::from_header(header).unwrap();
    assert_eq!(proof.x402_version, 1);
    assert_eq!(proof.scheme, "exact");

    let tx = base64::engine::general_purpose::STANDARD
        .decode(&proof.payload.transaction)
        .unwrap();
    let sig_bytes: [u8; 64] = tx[1..65].try_into().unwrap();
    let signature = Signature::from_bytes(sig_bytes);
    assert_eq!(signature.to_base58(), proof.payload.signature);
    assert!(verify(&test_public_key(), &tx[65..], &signature));
}

#[tokio::test]
async fn scenario_a_falls_back_to_local_signature() {
    let mock = paid_flow(vote_success("v1", None));
    let receipt = client(&mock).vote(&intent(), test_keypair()).await.unwrap();

    let header = mock.requests()[2]
        .header_value(HEADER_PAYMENT)
        .unwrap()
        .to_string();
    let proof = PaymentProof::from_header(&header).unwrap();
    assert_eq!(receipt.transaction_signature, Some(proof.payload.signature));
}

#[tokio::test]
async fn scenario_b_resubmission_409_is_slippage_exceeded() {
    let mock = paid_flow(api_error(409, "Entry fee moved beyond slippage"));

    let err = client(&mock).vote(&intent(), test_keypair()).await.unwrap_err();

    assert_eq!(err.kind(), FailureKind::SlippageExceeded);
    assert!(err.is_retryable());
    assert_eq!(mock.request_count(), 3);
}

#[tokio::test]
async fn scenario_c_missing_poll_skips_facilitator() {
    let mock = MockTransport::new().respond(api_error(404, "Poll not found"));

    let err = client(&mock).vote(&intent(), test_keypair()).await.unwrap_err();

    assert_eq!(err, VoteError::ProposalNotFound("Poll not found".to_string()));
    assert_eq!(mock.request_count(), 1);
    assert!(mock.requests_to("facilitator").is_empty());
}

#[tokio::test]
async fn scenario_d_402_without_header() {
    let mock = MockTransport::new().respond(payment_required_without_header());

    let err = client(&mock).vote(&intent(), test_keypair()).await.unwrap_err();

    assert_eq!(err.kind(), FailureKind::MissingPaymentHeader);
    assert_eq!(mock.request_count(), 1);
}

#[tokio::test]
async fn scenario_e_invalid_key_makes_no_calls() {
    let mock = MockTransport::new().respond(vote_success("never", None));

    let err = client(&mock)
        .vote_with_encoded_key(&intent(), "invalid-key")
        .await
        .unwrap_err();

    assert_eq!(err.kind(), FailureKind::InvalidKeyMaterial);
    assert_eq!(mock.request_count(), 0);
}

#[tokio::test]
async fn scenario_f_facilitator_network_failure() {
    let mock = MockTransport::new()
        .respond(payment_required(&requirement_json()))
        .fail_with("connection refused");

    let err = client(&mock).vote(&intent(), test_keypair()).await.unwrap_err();

    assert!(matches!(err, VoteError::NetworkError(_)));
    assert_eq!(mock.request_count(), 2);
}

#[tokio::test]
async fn facilitator_non_2xx_is_distinct_from_network_error() {
    let mock = MockTransport::new()
        .respond(payment_required(&requirement_json()))
        .respond_with(500, "facilitator out of SOL");

    let err = client(&mock).vote(&intent(), test_keypair()).await.unwrap_err();

    assert_eq!(
        err,
        VoteError::FacilitatorError {
            status: 500,
            body: "facilitator out of SOL".to_string()
        }
    );
    assert_eq!(mock.request_count(), 2);
}

#[tokio::test]
async fn immediate_success_skips_payment() {
    let mock = MockTransport::new().respond(vote_success("free-vote", None));

    let receipt = client(&mock)
        .vote_with_encoded_key(&intent(), &test_keypair_base58())
        .await
        .unwrap();

    assert_eq!(receipt.vote_id, "free-vote");
    assert!(receipt.payment.is_none());
    assert!(receipt.transaction_signature.is_none());
    assert_eq!(mock.request_count(), 1);
}

#[tokio::test]
async fn requirement_fields_reach_facilitator_unchanged() {
    let requirement = json!({
        "amount": 2.5,
        "currency": "USDC",
        "destination": "Treasury111",
        "reference": "memo-42",
        "expiry": TEST_EXPIRY,
        "network": "solana-devnet",
        "slippage": 0.05,
        "quote_id": "q-9"
    });
    let mock = MockTransport::new()
        .respond(payment_required(&requirement))
        .respond(settled(&unsigned_transaction_for(&test_public_key())))
        .respond(vote_success("v2", Some("s2")));

    client(&mock).vote(&intent(), test_keypair()).await.unwrap();

    let settle_body = mock.requests()[1].body.clone().unwrap();
    for field in [
        "amount",
        "currency",
        "destination",
        "reference",
        "expiry",
        "network",
        "slippage",
        "quote_id",
    ] {
        assert_eq!(settle_body[field], requirement[field], "field {}", field);
    }
    assert_eq!(settle_body["payer"], test_public_key().to_base58());

    let header = mock.requests()[2]
        .header_value(HEADER_PAYMENT)
        .unwrap()
        .to_string();
    assert_eq!(PaymentProof::from_header(&header).unwrap().network, "solana-devnet");
}

#[tokio::test]
async fn string_amount_is_forwarded_as_received() {
    let requirement = json!({
        "amount": "1000000",
        "currency": "USDC",
        "destination": "Treasury111",
        "expiry": TEST_EXPIRY
    });
    let mock = MockTransport::new()
        .respond(payment_required(&requirement))
        .respond(settled(&unsigned_transaction_for(&test_public_key())))
        .respond(vote_success("v3", Some("s3")));

    let receipt = client(&mock).vote(&intent(), test_keypair()).await.unwrap();

    assert_eq!(receipt.payment.unwrap().amount, Amount::from("1000000"));
    let settle_body = mock.requests()[1].body.clone().unwrap();
    assert_eq!(settle_body["amount"], json!("1000000"));
}

#[tokio::test]
async fn malformed_payment_headers_are_missing_header() {
    for value in ["", "not json", "{\"amount\":1}", "bm90IGpzb24="] {
        let mock = MockTransport::new().respond(
            HttpResponse::new(402, r#"{"vote_id":"ignored"}"#)
                .with_header(HEADER_PAYMENT_REQUIRED, value),
        );
        let err = client(&mock).vote(&intent(), test_keypair()).await.unwrap_err();
        assert_eq!(err.kind(), FailureKind::MissingPaymentHeader, "header {:?}", value);
        assert_eq!(mock.request_count(), 1);
    }
}

#[tokio::test]
async fn negotiation_status_table() {
    let cases = [
        (400, FailureKind::InvalidVoteRequest),
        (403, FailureKind::DuplicateVote),
        (404, FailureKind::ProposalNotFound),
        (409, FailureKind::UnexpectedResponse),
        (500, FailureKind::UnexpectedResponse),
    ];
    for (status, kind) in cases {
        let mock = MockTransport::new().respond(api_error(status, "nope"));
        let err = client(&mock).vote(&intent(), test_keypair()).await.unwrap_err();
        assert_eq!(err.kind(), kind, "status {}", status);
    }
}

#[tokio::test]
async fn resubmission_duplicate_vote() {
    let mock = paid_flow(api_error(403, "Duplicate vote"));
    let err = client(&mock).vote(&intent(), test_keypair()).await.unwrap_err();
    assert_eq!(err, VoteError::DuplicateVote("Duplicate vote".to_string()));
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn facilitator_transaction_for_other_wallet_is_signing_error() {
    let other = futarchy_crypto::KeyMaterial::generate().public_key();
    let mock = MockTransport::new()
        .respond(payment_required(&requirement_json()))
        .respond(settled(&unsigned_transaction_for(&other)));

    let err = client(&mock).vote(&intent(), test_keypair()).await.unwrap_err();

    assert_eq!(err.kind(), FailureKind::SigningError);
    assert_eq!(mock.request_count(), 2);
}

#[tokio::test]
async fn negotiation_network_failure() {
    let mock = MockTransport::new().fail_with("timed out");
    let err = client(&mock).vote(&intent(), test_keypair()).await.unwrap_err();
    assert_eq!(err, VoteError::NetworkError("timed out".to_string()));
}

#[tokio::test]
async fn slippage_travels_on_both_vote_calls() {
    let mock = paid_flow(vote_success("v1", Some("sig1")));
    let intent = VoteIntent::new("p1", Side::No)
        .unwrap()
        .with_slippage(0.2)
        .unwrap();

    client(&mock).vote(&intent, test_keypair()).await.unwrap();

    for request in mock.requests_to("/vote") {
        assert!(request
            .query
            .contains(&("slippage".to_string(), "0.2".to_string())));
        assert!(request.query.contains(&("side".to_string(), "no".to_string())));
        let body = request.body.unwrap();
        assert_eq!(body["slippage"], 0.2);
        assert_eq!(body["voter_pubkey"], test_public_key().to_base58());
    }
}

#[test]
fn invalid_slippage_rejected_before_any_call() {
    for slippage in [1.0, 1.5, -0.1, f64::NAN, f64::INFINITY] {
        let err = intent().with_slippage(slippage).unwrap_err();
        assert_eq!(err.kind(), FailureKind::InvalidSlippage);
    }
}

#[tokio::test]
async fn concurrent_votes_are_independent() {
    let first = paid_flow(vote_success("v1", Some("s1")));
    let second = MockTransport::new().respond(api_error(403, "Duplicate vote"));

    let a = client(&first);
    let b = client(&second);
    let intent_a = intent();
    let intent_b = VoteIntent::new("p2", Side::No).unwrap();

    let (ra, rb) = tokio::join!(
        a.vote(&intent_a, test_keypair()),
        b.vote(&intent_b, test_keypair())
    );

    assert_eq!(ra.unwrap().vote_id, "v1");
    assert_eq!(rb.unwrap_err().kind(), FailureKind::DuplicateVote);
}
