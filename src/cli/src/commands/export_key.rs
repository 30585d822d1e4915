//! Export key command for the command line wallet.

use crate::errors::CliError;
use crate::keystore::KeyStore;
use std::path::Path;
use tracing::{debug, info};

/// Secret material shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedKey {
    pub private_key: String,
    pub mnemonic: Option<String>,
    pub account_index: u32,
}

/// Runs the export-key command.
pub fn run<P: AsRef<Path>>(wallet_path: P) -> Result<ExportedKey, CliError> {
    let store = KeyStore::load(&wallet_path)?;
    debug!("Loaded key store from {}", wallet_path.as_ref().display());

    let wallet = store.wallet()?;
    info!("Exporting key for {}", wallet.address());

    Ok(ExportedKey {
        private_key: wallet.private_key_hex(),
        mnemonic: store.mnemonic().map(str::to_string),
        account_index: store.account_index(),
    })
}
