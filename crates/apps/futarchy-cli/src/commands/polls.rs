//! List polls command.

use futarchy_client::{Futarchy402Client, PollFilter, PollStatus};

use crate::error::CliResult;
use crate::output::{OutputFormat, Render};

/// Execute the polls command.
pub async fn polls(
    client: &Futarchy402Client,
    format: OutputFormat,
    status: Option<PollStatus>,
    treasury: Option<String>,
    limit: u32,
    offset: u32,
) -> CliResult<String> {
    let mut filter = PollFilter::default().with_page(limit, offset);
    if let Some(status) = status {
        filter = filter.with_status(status);
    }
    if let Some(treasury) = treasury {
        filter = filter.with_treasury(treasury);
    }

    let list = client.list_polls(&filter).await?;
    Ok(list.render(format))
}
