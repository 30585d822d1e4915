//! Import key command for the command line wallet.

use crate::errors::CliError;
use crate::keystore::KeyStore;
use pigeonium_core::Address;
use std::path::Path;
use tracing::info;

/// Runs the import-key command, storing a raw private key or a mnemonic.
pub fn run<P: AsRef<Path>>(
    wallet_path: P,
    private_key: Option<&str>,
    mnemonic: Option<&str>,
    account_index: u32,
) -> Result<Address, CliError> {
    let store = match (private_key, mnemonic) {
        (Some(key), None) => KeyStore::from_private_hex(key)?,
        (None, Some(phrase)) => KeyStore::from_mnemonic(phrase, account_index)?,
        _ => {
            return Err(CliError::InvalidArgument(
                "Pass exactly one of --private-key or --mnemonic".to_string(),
            ))
        }
    };

    let address = store.wallet()?.address();
    store.save(&wallet_path)?;
    info!("Imported wallet {} into {}", address, wallet_path.as_ref().display());

    Ok(address)
}
