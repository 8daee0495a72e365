//! Read-only governance API.
//!
//! Single request/response JSON fetches with no protocol state. Status
//! handling is per operation: a 404 means "no such poll" for one call and
//! "no position" for another.

use std::sync::Arc;

use futarchy_x402::{join_url, validate_poll_id, HttpRequest, HttpResponse, Transport};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{ApiError, ApiResult};
use crate::models::{PollDetails, PollFilter, PollList, Position, Stats};

/// Client for the read-only governance endpoints.
#[derive(Clone)]
pub struct GovernanceClient {
    transport: Arc<dyn Transport>,
    base_url: String,
}

impl GovernanceClient {
    pub fn new(base_url: &str, transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// List polls matching `filter`.
    pub async fn list_polls(&self, filter: &PollFilter) -> ApiResult<PollList> {
        let mut request = HttpRequest::get(join_url(&self.base_url, "polls"));
        for (name, value) in filter.query_pairs() {
            request = request.query(name, value);
        }

        let response = self.send(request).await?;
        expect_success(&response, "list polls", |_| None)?;
        decode(&response, "list polls")
    }

    /// Fetch one poll with its votes.
    pub async fn get_poll(&self, poll_id: &str) -> ApiResult<PollDetails> {
        check_poll_id(poll_id)?;
        let request = HttpRequest::get(join_url(&self.base_url, &format!("poll/{}", poll_id)));

        let response = self.send(request).await?;
        expect_success(&response, "get poll", |status| {
            (status == 404).then(|| ApiError::PollNotFound(poll_id.to_string()))
        })?;
        decode(&response, "get poll")
    }

    /// Fetch a wallet's position in a poll.
    ///
    /// The voter is passed through as given; the API rejects an empty or
    /// malformed key with 400.
    pub async fn get_position(&self, poll_id: &str, voter_pubkey: &str) -> ApiResult<Position> {
        check_poll_id(poll_id)?;
        let request = HttpRequest::get(join_url(
            &self.base_url,
            &format!("poll/{}/position", poll_id),
        ))
        .query("voter_pubkey", voter_pubkey);

        let response = self.send(request).await?;
        expect_success(&response, "get position", |status| {
            (status == 404).then(|| ApiError::PositionNotFound {
                poll_id: poll_id.to_string(),
                voter: voter_pubkey.to_string(),
            })
        })?;
        decode(&response, "get position")
    }

    /// Fetch platform statistics.
    pub async fn get_stats(&self) -> ApiResult<Stats> {
        let request = HttpRequest::get(join_url(&self.base_url, "stats"));
        let response = self.send(request).await?;
        expect_success(&response, "get stats", |_| None)?;
        decode(&response, "get stats")
    }

    async fn send(&self, request: HttpRequest) -> ApiResult<HttpResponse> {
        debug!(url = %request.url, query = ?request.query, "Governance API request");
        self.transport
            .send(request)
            .await
            .map_err(|e| ApiError::Network(e.to_string()))
    }
}

impl std::fmt::Debug for GovernanceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GovernanceClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(alias = "message")]
    error: String,
}

fn check_poll_id(poll_id: &str) -> ApiResult<()> {
    validate_poll_id(poll_id).map_err(|e| ApiError::InvalidRequest(e.to_string()))
}

/// Map a non-2xx response: `specific` first, then 400, then a generic
/// failure naming the operation.
fn expect_success(
    response: &HttpResponse,
    operation: &'static str,
    specific: impl FnOnce(u16) -> Option<ApiError>,
) -> ApiResult<()> {
    if response.is_success() {
        return Ok(());
    }
    warn!(operation, status = response.status, "Governance API request failed");

    if let Some(err) = specific(response.status) {
        return Err(err);
    }
    if response.status == 400 {
        let detail = response
            .json::<ErrorBody>()
            .map(|b| b.error)
            .unwrap_or_else(|_| format!("{} rejected", operation));
        return Err(ApiError::InvalidRequest(detail));
    }
    Err(ApiError::RequestFailed {
        operation,
        status: response.status,
    })
}

fn decode<T: DeserializeOwned>(response: &HttpResponse, operation: &'static str) -> ApiResult<T> {
    response.json().map_err(|e| ApiError::Decode {
        operation,
        reason: e.to_string(),
    })
}
