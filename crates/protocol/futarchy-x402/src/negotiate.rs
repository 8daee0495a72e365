//! Payment negotiation.
//!
//! The first vote request either completes immediately or answers
//! `402 Payment Required` with the payment terms in a header. Status codes
//! are interpreted per [`Step`], since 402 and 409 mean different things on
//! the first call and on the paid resubmission.

use futarchy_crypto::PublicKey;
use tracing::{debug, info, warn};

use crate::error::{VoteError, VoteResult};
use crate::transport::{join_url, HttpRequest, HttpResponse, Transport};
use crate::types::{
    ErrorBody, PaymentRequirement, VoteIntent, VoteReceipt, VoteRequestBody, VoteSuccessBody,
    HEADER_PAYMENT_REQUIRED,
};

/// Which call of the handshake produced a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The first, unpaid vote request.
    Negotiation,
    /// The vote request carrying the signed payment.
    Resubmission,
}

/// What the first vote request resolved to.
#[derive(Debug, Clone, PartialEq)]
pub enum Negotiation {
    /// The vote was accepted without payment.
    PaidImmediately(VoteReceipt),
    /// Payment is needed before the vote is recorded.
    PaymentRequired(PaymentRequirement),
}

/// Build the vote request for a step's call.
///
/// Slippage travels on both calls, as a query parameter and in the body.
pub(crate) fn vote_request(
    api_base_url: &str,
    intent: &VoteIntent,
    voter: &PublicKey,
) -> VoteResult<HttpRequest> {
    let url = join_url(api_base_url, &format!("poll/{}/vote", intent.poll_id()));
    let voter = voter.to_base58();
    let body = serde_json::to_value(VoteRequestBody {
        side: intent.side(),
        slippage: intent.slippage(),
        voter_pubkey: &voter,
    })
    .map_err(|e| VoteError::InvalidVoteRequest(format!("failed to encode vote: {}", e)))?;

    Ok(HttpRequest::post(url, body)
        .query("side", intent.side())
        .query("slippage", intent.slippage()))
}

/// Send the vote intent and interpret the answer.
pub async fn negotiate(
    transport: &dyn Transport,
    api_base_url: &str,
    intent: &VoteIntent,
    voter: &PublicKey,
) -> VoteResult<Negotiation> {
    let request = vote_request(api_base_url, intent, voter)?;
    debug!(
        poll_id = %intent.poll_id(),
        side = %intent.side(),
        slippage = intent.slippage(),
        "Negotiating vote"
    );

    let response = transport
        .send(request)
        .await
        .map_err(|e| VoteError::NetworkError(e.to_string()))?;

    match response.status {
        200..=299 => {
            info!(poll_id = %intent.poll_id(), "Vote accepted without payment");
            parse_vote_success(&response).map(Negotiation::PaidImmediately)
        }
        402 => {
            let requirement =
                PaymentRequirement::from_header(response.header(HEADER_PAYMENT_REQUIRED))
                    .inspect_err(|e| warn!(error = %e, "402 without usable payment terms"))?;
            info!(
                poll_id = %intent.poll_id(),
                amount = %requirement.amount,
                currency = %requirement.currency,
                destination = %requirement.destination,
                "Payment required"
            );
            Ok(Negotiation::PaymentRequired(requirement))
        }
        _ => Err(classify_failure(Step::Negotiation, &response)),
    }
}

/// Map a non-success vote response to an error for the given step.
pub fn classify_failure(step: Step, response: &HttpResponse) -> VoteError {
    let detail = error_detail(response);
    match (step, response.status) {
        (_, 400) => VoteError::InvalidVoteRequest(detail),
        (_, 403) => VoteError::DuplicateVote(detail),
        (_, 404) => VoteError::ProposalNotFound(detail),
        (Step::Resubmission, 409) => VoteError::SlippageExceeded(detail),
        (_, status) => VoteError::UnexpectedResponse { status, detail },
    }
}

/// Decode a 2xx vote body.
pub(crate) fn parse_vote_success(response: &HttpResponse) -> VoteResult<VoteReceipt> {
    let body: VoteSuccessBody = response
        .json()
        .map_err(|e| VoteError::UnexpectedResponse {
            status: response.status,
            detail: format!("malformed vote response: {}", e),
        })?;

    Ok(VoteReceipt {
        vote_id: body.vote_id,
        transaction_signature: body.transaction_signature,
        payment: None,
    })
}

/// Human-readable detail: the API's `error` field, else the raw body.
fn error_detail(response: &HttpResponse) -> String {
    if let Ok(body) = response.json::<ErrorBody>() {
        return body.error;
    }
    let trimmed = response.body.trim();
    if trimmed.is_empty() {
        format!("HTTP {}", response.status)
    } else {
        trimmed.to_string()
    }
}
