//! Transaction lookup command for the command line wallet.

use crate::commands::connect;
use crate::errors::CliError;
use pigeonium_client::ClientConfig;
use pigeonium_core::{IndexId, Transaction};

/// Runs the transaction command.
pub fn run(config: &ClientConfig, index_id: IndexId) -> Result<Transaction, CliError> {
    let client = connect(config)?;
    client
        .get_transaction(index_id)?
        .ok_or_else(|| CliError::NotFound(format!("No transaction with indexId {}", index_id)))
}
