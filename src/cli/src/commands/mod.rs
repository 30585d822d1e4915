//! Commands for the command line wallet.

pub mod address;
pub mod balance;
pub mod call;
pub mod currency;
pub mod deploy;
pub mod export_key;
pub mod history;
pub mod import_key;
pub mod info;
pub mod init_wallet;
pub mod send;
pub mod transaction;

use crate::errors::CliError;
use crate::keystore::KeyStore;
use pigeonium_client::{ClientConfig, LedgerClient};
use pigeonium_core::{Address, CurrencyId, Wallet};
use std::path::Path;
use tracing::debug;

/// Loads the signing wallet from the key store at `wallet_path`.
pub fn load_wallet<P: AsRef<Path>>(wallet_path: P) -> Result<Wallet, CliError> {
    let store = KeyStore::load(&wallet_path)?;
    debug!("Loaded key store from {}", wallet_path.as_ref().display());
    store.wallet()
}

/// Connects to the configured node.
pub fn connect(config: &ClientConfig) -> Result<LedgerClient, CliError> {
    Ok(LedgerClient::connect(config.clone())?)
}

pub fn parse_address(input: &str) -> Result<Address, CliError> {
    Address::from_hex(input).map_err(|e| CliError::InvalidAddress(format!("{}: {}", input, e)))
}

pub fn parse_currency_id(input: &str) -> Result<CurrencyId, CliError> {
    CurrencyId::from_hex(input).map_err(|e| CliError::InvalidAddress(format!("{}: {}", input, e)))
}

pub fn parse_amount(input: &str) -> Result<u64, CliError> {
    pigeonium_core::types::parse_amount(input).map_err(|e| CliError::InvalidAmount(e.to_string()))
}

/// Decodes hex encoded input data. An absent value is empty.
pub fn parse_data(input: Option<&str>) -> Result<Vec<u8>, CliError> {
    match input {
        Some(data) => hex::decode(data.trim().trim_start_matches("0x"))
            .map_err(|e| CliError::InvalidArgument(format!("Input data is not hex: {}", e))),
        None => Ok(Vec::new()),
    }
}
