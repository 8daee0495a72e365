//! Platform statistics command.

use futarchy_client::Futarchy402Client;

use crate::error::CliResult;
use crate::output::{OutputFormat, Render};

/// Execute the stats command.
pub async fn stats(client: &Futarchy402Client, format: OutputFormat) -> CliResult<String> {
    Ok(client.get_stats().await?.render(format))
}
