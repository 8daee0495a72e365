//! Output formatting for CLI.

use colored::Colorize;
use futarchy_client::{Poll, PollDetails, PollList, Position, Stats};
use futarchy_x402::VoteReceipt;
use serde::Serialize;
use serde_json::{Map, Value};

/// Output format for CLI commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable output.
    #[default]
    Human,
    /// JSON output.
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "human" | "text" => Ok(Self::Human),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown format: {}. Use 'human' or 'json'.", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Human => write!(f, "human"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Trait for renderable output.
pub trait Render: Serialize {
    /// Render as human-readable string.
    fn render_human(&self) -> String;

    /// Render as JSON string.
    fn render_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Render in the specified format.
    fn render(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Human => self.render_human(),
            OutputFormat::Json => self.render_json(),
        }
    }
}

/// Scalar JSON values as plain text; nested values as compact JSON.
fn plain(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "-".to_string(),
        other => other.to_string(),
    }
}

/// `key: value` lines for the fields the client does not model.
fn extra_lines(extra: &Map<String, Value>) -> Vec<String> {
    extra
        .iter()
        .map(|(key, value)| format!("  {} {}", format!("{}:", key).dimmed(), plain(value)))
        .collect()
}

fn status_colored(status: &str) -> String {
    match status {
        "open" => status.green().to_string(),
        "resolved" => status.blue().to_string(),
        other => other.yellow().to_string(),
    }
}

fn poll_line(poll: &Poll) -> String {
    let mut line = format!("{}  {}", poll.id.bold(), status_colored(&poll.status));
    if let Some(treasury) = &poll.treasury_id {
        line.push_str(&format!("  {} {}", "treasury".dimmed(), treasury));
    }
    line
}

// =============================================================================
// Governance reads
// =============================================================================

impl Render for PollList {
    fn render_human(&self) -> String {
        if self.polls.is_empty() {
            return "No polls found.".dimmed().to_string();
        }
        let mut lines: Vec<String> = self.polls.iter().map(poll_line).collect();
        let p = &self.pagination;
        lines.push(String::new());
        lines.push(
            format!(
                "Showing {} of {} (offset {}, limit {})",
                self.polls.len(),
                p.total,
                p.offset,
                p.limit
            )
            .dimmed()
            .to_string(),
        );
        lines.join("\n")
    }
}

impl Render for PollDetails {
    fn render_human(&self) -> String {
        let mut lines = vec![
            format!("{} {}", "Poll:".bold(), self.id),
            format!("{} {}", "Status:".bold(), status_colored(&self.status)),
        ];
        lines.extend(extra_lines(&self.extra));

        if let Some(proposal) = &self.proposal {
            lines.push(format!("{}", "Proposal:".bold()));
            match proposal {
                Value::Object(fields) => lines.extend(extra_lines(fields)),
                other => lines.push(format!("  {}", plain(other))),
            }
        }

        lines.push(format!("{} {}", "Votes:".bold(), self.votes.len()));
        for vote in &self.votes {
            let field = |name: &str| vote.get(name).map(plain).unwrap_or_else(|| "-".into());
            lines.push(format!(
                "  {}  {}  {}",
                field("voter_pubkey"),
                field("side"),
                field("amount")
            ));
        }
        lines.join("\n")
    }
}

impl Render for Position {
    fn render_human(&self) -> String {
        let mut lines = vec![format!("{} {}", "Poll:".bold(), self.poll_id)];
        if let Some(voter) = &self.voter_pubkey {
            lines.push(format!("{} {}", "Voter:".bold(), voter));
        }
        if let Some(side) = &self.vote_side {
            lines.push(format!("{} {}", "Side:".bold(), side));
        }
        lines.extend(extra_lines(&self.extra));
        lines.join("\n")
    }
}

impl Render for Stats {
    fn render_human(&self) -> String {
        let mut lines = vec![
            format!("{} {}", "Active polls:".bold(), self.active_polls),
            format!("{} {}", "Projects:".bold(), self.total_projects),
            format!("{} {}", "Proposals:".bold(), self.total_proposals),
        ];
        lines.extend(extra_lines(&self.extra));
        lines.join("\n")
    }
}

// =============================================================================
// Wallet and voting
// =============================================================================

/// Output for the wallet command.
#[derive(Debug, Serialize)]
pub struct WalletOutput {
    pub public_key: String,
}

impl Render for WalletOutput {
    fn render_human(&self) -> String {
        format!("{} {}", "Public Key:".bold(), self.public_key)
    }
}

/// Output for `wallet --check`.
#[derive(Debug, Serialize)]
pub struct KeyCheckOutput {
    pub public_key: String,
    pub valid: bool,
}

impl Render for KeyCheckOutput {
    fn render_human(&self) -> String {
        if self.valid {
            format!("{} {}", "Valid public key:".green().bold(), self.public_key)
        } else {
            format!("{} {}", "Invalid public key:".red().bold(), self.public_key)
        }
    }
}

impl Render for VoteReceipt {
    fn render_human(&self) -> String {
        let mut lines = vec![format!("{} {}", "Vote recorded:".green().bold(), self.vote_id)];
        if let Some(signature) = &self.transaction_signature {
            lines.push(format!("{} {}", "Transaction:".bold(), signature));
        }
        if let Some(payment) = &self.payment {
            lines.push(format!(
                "{} {} {} to {}",
                "Paid:".bold(),
                payment.amount,
                payment.currency,
                payment.destination
            ));
        }
        lines.join("\n")
    }
}
