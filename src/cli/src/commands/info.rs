//! Network info command for the command line wallet.

use crate::commands::connect;
use crate::errors::CliError;
use pigeonium_client::ClientConfig;
use pigeonium_core::NetworkInfo;

/// Runs the info command.
pub fn run(config: &ClientConfig) -> Result<NetworkInfo, CliError> {
    let client = connect(config)?;
    Ok(client.network_info().clone())
}
