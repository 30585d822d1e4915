//! Configuration resolution for the command line wallet.

use anyhow::Result;
use pigeonium_client::ClientConfig;
use std::path::{Path, PathBuf};

/// Directory under the user's data dir holding the wallet.
pub const DATA_DIR_NAME: &str = "pigeonium";

/// Default key store file name.
pub const WALLET_FILE_NAME: &str = "wallet.json";

/// Builds the client configuration from an optional file and an optional node override.
pub fn resolve_config(path: Option<&Path>, node: Option<String>) -> Result<ClientConfig> {
    let mut config = match path {
        Some(path) => ClientConfig::from_file(path)?,
        None => ClientConfig::default(),
    };

    if let Some(node) = node {
        config.node = node;
    }

    Ok(config)
}

/// Where the key store lives when `--wallet` is not given.
pub fn default_wallet_path() -> PathBuf {
    let mut dir = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
    dir.push(DATA_DIR_NAME);
    dir.push(WALLET_FILE_NAME);
    dir
}
