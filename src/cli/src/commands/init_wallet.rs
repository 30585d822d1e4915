//! Initialize wallet command for the command line wallet.

use crate::errors::CliError;
use crate::keystore::KeyStore;
use pigeonium_core::Address;
use std::path::Path;
use tracing::{debug, info};

/// Runs the init-wallet command. Returns the new address and its mnemonic.
pub fn run<P: AsRef<Path>>(wallet_path: P, account_index: u32) -> Result<(Address, String), CliError> {
    if wallet_path.as_ref().exists() {
        return Err(CliError::KeyStoreError(
            "Wallet file already exists. Use export-key to view the key.".to_string(),
        ));
    }

    let store = KeyStore::generate(account_index);
    let wallet = store.wallet()?;
    debug!("Created new wallet for account {}", account_index);

    store.save(&wallet_path)?;
    info!("Wallet saved to {}", wallet_path.as_ref().display());

    let mnemonic = store.mnemonic().unwrap_or_default().to_string();
    Ok((wallet.address(), mnemonic))
}
