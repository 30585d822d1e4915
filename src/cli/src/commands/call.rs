//! Contract call command for the command line wallet.

use crate::commands::{connect, load_wallet, parse_address, parse_amount, parse_currency_id, parse_data};
use crate::errors::CliError;
use pigeonium_client::ClientConfig;
use pigeonium_core::Transaction;
use std::path::Path;
use tracing::info;

/// Runs the call command: a transfer to `contract` carrying hex call data.
pub fn run<P: AsRef<Path>>(
    config: &ClientConfig,
    wallet_path: P,
    contract: &str,
    amount: &str,
    currency: Option<&str>,
    data: Option<&str>,
) -> Result<Transaction, CliError> {
    let wallet = load_wallet(wallet_path)?;
    let contract = parse_address(contract)?;
    let amount = parse_amount(amount)?;
    let call_data = parse_data(data)?;

    let client = connect(config)?;
    let currency_id = match currency {
        Some(hex_str) => parse_currency_id(hex_str)?,
        None => client.network_info().base_currency.currency_id,
    };

    info!("Calling contract {} with {} bytes", contract, call_data.len());
    let tx = client.invoke_contract(&wallet, &contract, &currency_id, amount, &call_data)?;
    Ok(tx)
}
