//! Canned API responses.

use futarchy_x402::{HttpResponse, HEADER_PAYMENT_REQUIRED};
use serde_json::{json, Value};

/// Default expiry used in payment requirements.
pub const TEST_EXPIRY: u64 = 1_900_000_000;

/// Payment requirement `{amount:1, currency:"USDC", destination:"D", expiry}`.
pub fn requirement_json() -> Value {
    json!({
        "amount": 1,
        "currency": "USDC",
        "destination": "D",
        "reference": "vote-p1-yes",
        "expiry": TEST_EXPIRY
    })
}

/// 402 carrying `requirement` in the payment header.
pub fn payment_required(requirement: &Value) -> HttpResponse {
    HttpResponse::new(402, r#"{"error":"Payment required"}"#)
        .with_header(HEADER_PAYMENT_REQUIRED, requirement.to_string())
}

/// 402 with no payment header at all.
pub fn payment_required_without_header() -> HttpResponse {
    HttpResponse::new(402, r#"{"error":"Payment required"}"#)
}

/// Facilitator 200 carrying `transaction`.
pub fn settled(transaction: &str) -> HttpResponse {
    HttpResponse::new(200, json!({ "transaction": transaction }).to_string())
}

/// Vote endpoint 200.
pub fn vote_success(vote_id: &str, transaction_signature: Option<&str>) -> HttpResponse {
    let mut body = json!({ "vote_id": vote_id });
    if let Some(signature) = transaction_signature {
        body["transaction_signature"] = json!(signature);
    }
    HttpResponse::new(200, body.to_string())
}

/// Error response with an `{error}` body.
pub fn api_error(status: u16, message: &str) -> HttpResponse {
    HttpResponse::new(status, json!({ "error": message }).to_string())
}

/// A single poll as listed by `/polls`.
pub fn poll_json(id: &str, status: &str) -> Value {
    json!({
        "id": id,
        "proposal_id": format!("proposal-{}", id),
        "status": status,
        "yes_stake": 1500,
        "no_stake": 900,
        "voter_count": 12,
        "created_at": "2025-01-01T00:00:00Z",
        "expires_at": "2025-01-08T00:00:00Z",
        "treasury_id": "treasury-1"
    })
}

/// `/polls` body with the given polls.
pub fn poll_list_json(polls: Vec<Value>, total: u64, limit: u64, offset: u64) -> Value {
    json!({
        "polls": polls,
        "pagination": { "total": total, "limit": limit, "offset": offset }
    })
}

/// `/poll/{id}` body: the poll's fields plus its proposal and votes.
pub fn poll_details_json(id: &str) -> Value {
    let mut details = poll_json(id, "open");
    details["proposal"] = json!({
        "id": format!("proposal-{}", id),
        "title": "Fund the grants program",
        "description": "Allocate 10k USDC",
        "project_id": "project-1"
    });
    details["votes"] = json!([
        { "voter_pubkey": "Voter1", "side": "yes", "amount": 100 },
        { "voter_pubkey": "Voter2", "side": "no", "amount": 40 }
    ]);
    details
}

/// `/poll/{id}/position` body.
pub fn position_json(poll_id: &str, voter: &str) -> Value {
    json!({
        "poll_id": poll_id,
        "voter_pubkey": voter,
        "vote_side": "yes",
        "amount_paid": 100,
        "projected_payout": 180,
        "roi": 0.8
    })
}

/// `/stats` body.
pub fn stats_json() -> Value {
    json!({
        "active_polls": 5,
        "total_projects": 12,
        "total_proposals": 27
    })
}
