//! On-disk key store for the command line wallet.

use crate::errors::CliError;
use pigeonium_core::Wallet;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

/// Key material persisted between invocations.
///
/// Holds either a BIP-39 mnemonic with the account to derive, or an imported
/// raw private key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyStore {
    /// The BIP-39 mnemonic, if the key was derived from one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    mnemonic: Option<String>,
    /// The account index derived from the mnemonic
    #[serde(default)]
    account_index: u32,
    /// A hex encoded private key, if imported directly
    #[serde(default, skip_serializing_if = "Option::is_none")]
    private_key: Option<String>,
}

impl KeyStore {
    /// Creates a key store around a fresh random mnemonic.
    pub fn generate(account_index: u32) -> Self {
        Self {
            mnemonic: Some(Wallet::random_mnemonic()),
            account_index,
            private_key: None,
        }
    }

    /// Creates a key store from an existing mnemonic.
    pub fn from_mnemonic(phrase: &str, account_index: u32) -> Result<Self, CliError> {
        let store = Self {
            mnemonic: Some(phrase.trim().to_string()),
            account_index,
            private_key: None,
        };
        store.wallet()?;
        Ok(store)
    }

    /// Creates a key store from a hex encoded private key.
    pub fn from_private_hex(hex_str: &str) -> Result<Self, CliError> {
        let wallet = Wallet::from_private_hex(hex_str)?;
        Ok(Self {
            mnemonic: None,
            account_index: 0,
            private_key: Some(wallet.private_key_hex()),
        })
    }

    /// Loads a key store from a file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CliError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(CliError::KeyStoreError(format!(
                "No wallet at {}. Use init-wallet or import-key first.",
                path.display()
            )));
        }

        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        let store = serde_json::from_str(&contents)?;
        Ok(store)
    }

    /// Saves the key store to a new file. An existing file is never overwritten.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), CliError> {
        let path = path.as_ref();
        if path.exists() {
            return Err(CliError::KeyStoreError(format!(
                "Wallet file {} already exists. Use export-key to view it.",
                path.display()
            )));
        }

        let contents = serde_json::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut file = File::create(path)?;
        file.write_all(contents.as_bytes())?;

        Ok(())
    }

    pub fn mnemonic(&self) -> Option<&str> {
        self.mnemonic.as_deref()
    }

    pub fn account_index(&self) -> u32 {
        self.account_index
    }

    /// Materializes the signing wallet.
    pub fn wallet(&self) -> Result<Wallet, CliError> {
        match (&self.private_key, &self.mnemonic) {
            (Some(key), _) => Ok(Wallet::from_private_hex(key)?),
            (None, Some(phrase)) => Ok(Wallet::from_mnemonic(phrase, self.account_index)?),
            (None, None) => Err(CliError::KeyStoreError(
                "Wallet file holds neither a mnemonic nor a private key".to_string(),
            )),
        }
    }
}
