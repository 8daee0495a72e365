//! Governance API response models.
//!
//! Only the fields the client relies on are typed. Everything else is kept
//! in `extra` so that new API fields pass through to callers untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Poll lifecycle filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PollStatus {
    Open,
    Resolved,
}

impl PollStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Resolved => "resolved",
        }
    }
}

impl std::fmt::Display for PollStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PollStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "open" => Ok(Self::Open),
            "resolved" => Ok(Self::Resolved),
            other => Err(format!("status must be 'open' or 'resolved', got '{}'", other)),
        }
    }
}

/// Filter for listing polls. Unset fields are not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<PollStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub treasury_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
}

impl PollFilter {
    /// Filter by status.
    pub fn with_status(mut self, status: PollStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Filter by treasury.
    pub fn with_treasury(mut self, treasury_id: impl Into<String>) -> Self {
        self.treasury_id = Some(treasury_id.into());
        self
    }

    /// Set the page window.
    pub fn with_page(mut self, limit: u32, offset: u32) -> Self {
        self.limit = Some(limit);
        self.offset = Some(offset);
        self
    }

    /// Query parameters in wire order.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(status) = self.status {
            pairs.push(("status", status.to_string()));
        }
        if let Some(treasury_id) = &self.treasury_id {
            pairs.push(("treasury_id", treasury_id.clone()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        if let Some(offset) = self.offset {
            pairs.push(("offset", offset.to_string()));
        }
        pairs
    }
}

/// A poll as listed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Poll {
    pub id: String,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub treasury_id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Page window reported by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub total: u64,
    pub limit: u64,
    pub offset: u64,
}

/// One page of polls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PollList {
    pub polls: Vec<Poll>,
    pub pagination: Pagination,
}

/// A poll with its proposal and vote history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PollDetails {
    pub id: String,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proposal: Option<Value>,
    #[serde(default)]
    pub votes: Vec<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A wallet's stake in a poll.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub poll_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voter_pubkey: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vote_side: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Platform-wide counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    pub active_polls: u64,
    pub total_projects: u64,
    pub total_proposals: u64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
