//! Show poll command.

use futarchy_client::Futarchy402Client;

use crate::error::CliResult;
use crate::output::{OutputFormat, Render};

/// Execute the poll command.
pub async fn poll(client: &Futarchy402Client, format: OutputFormat, id: &str) -> CliResult<String> {
    let details = client.get_poll(id).await?;
    Ok(details.render(format))
}
