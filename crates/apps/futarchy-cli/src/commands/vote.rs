//! Vote command.

use futarchy_client::Futarchy402Client;
use futarchy_x402::Side;
use tracing::info;

use crate::error::CliResult;
use crate::output::{OutputFormat, Render};

/// Execute the vote command.
pub async fn vote(
    client: &Futarchy402Client,
    format: OutputFormat,
    poll_id: &str,
    side: Side,
    slippage: Option<f64>,
    key: Option<String>,
) -> CliResult<String> {
    info!(poll_id, side = %side, "Casting vote");
    let receipt = client.vote(poll_id, side, slippage, key.as_deref()).await?;
    Ok(receipt.render(format))
}
