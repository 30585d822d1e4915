//! Send command for the command line wallet.

use crate::commands::{connect, load_wallet, parse_address, parse_amount, parse_currency_id, parse_data};
use crate::errors::CliError;
use pigeonium_client::ClientConfig;
use pigeonium_core::Transaction;
use std::path::Path;
use tracing::info;

/// Runs the send command. The base currency is used unless one is given.
pub fn run<P: AsRef<Path>>(
    config: &ClientConfig,
    wallet_path: P,
    to: &str,
    amount: &str,
    currency: Option<&str>,
    fee: &str,
    data: Option<&str>,
) -> Result<Transaction, CliError> {
    let wallet = load_wallet(wallet_path)?;
    let dest = parse_address(to)?;
    let amount = parse_amount(amount)?;
    let fee = parse_amount(fee)?;
    let input_data = parse_data(data)?;

    let client = connect(config)?;
    let currency_id = match currency {
        Some(hex_str) => parse_currency_id(hex_str)?,
        None => client.network_info().base_currency.currency_id,
    };

    info!("Sending {} of {} from {} to {}", amount, currency_id, wallet.address(), dest);
    let tx = client.send_transaction(&wallet, &dest, &currency_id, amount, fee, &input_data)?;
    Ok(tx)
}
