//! Wallet command.

use futarchy_client::Futarchy402Client;
use futarchy_crypto::validate_public_key;

use crate::error::CliResult;
use crate::output::{KeyCheckOutput, OutputFormat, Render, WalletOutput};

/// Execute the wallet command.
///
/// Shows the configured wallet, or checks `check` if given. Checking needs
/// no wallet and makes no request.
pub fn wallet(
    client: &Futarchy402Client,
    format: OutputFormat,
    check: Option<String>,
) -> CliResult<String> {
    if let Some(public_key) = check {
        let output = KeyCheckOutput {
            valid: validate_public_key(public_key.trim()),
            public_key,
        };
        return Ok(output.render(format));
    }

    let output = WalletOutput {
        public_key: client.my_wallet()?.to_base58(),
    };
    Ok(output.render(format))
}
