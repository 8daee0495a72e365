//! Show position command.

use futarchy_client::Futarchy402Client;
use futarchy_x402::VoteError;
use tracing::debug;

use crate::error::{CliError, CliResult};
use crate::output::{OutputFormat, Render};

/// Execute the position command.
///
/// Without `--voter` the configured wallet's position is shown.
pub async fn position(
    client: &Futarchy402Client,
    format: OutputFormat,
    poll_id: &str,
    voter: Option<String>,
) -> CliResult<String> {
    let voter = match voter {
        Some(voter) => voter,
        None => match client.my_wallet() {
            Ok(key) => key.to_base58(),
            Err(VoteError::MissingKeyMaterial) => {
                return Err(CliError::user(
                    "Pass --voter or configure a wallet (WALLET_PRIVATE_KEY)",
                ))
            }
            Err(e) => return Err(e.into()),
        },
    };
    debug!(poll_id, voter = %voter, "Fetching position");

    let position = client.get_position(poll_id, &voter).await?;
    Ok(position.render(format))
}
