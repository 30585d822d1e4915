//! Error types for the command line wallet.

use pigeonium_client::ClientError;
use pigeonium_core::CoreError;
use std::error::Error as StdError;
use std::fmt;

/// Errors that can occur in the command line wallet.
#[derive(Debug)]
pub enum CliError {
    /// Error when a file operation fails.
    FileError(std::io::Error),

    /// Error when JSON serialization or deserialization fails.
    JsonError(serde_json::Error),

    /// Error when the key store is missing, unreadable or would be overwritten.
    KeyStoreError(String),

    /// Error when key material cannot be turned into a wallet.
    KeyError(String),

    /// Error when an address or currency id is invalid.
    InvalidAddress(String),

    /// Error when an amount is invalid.
    InvalidAmount(String),

    /// Error when command arguments are inconsistent.
    InvalidArgument(String),

    /// Error when the ledger node reports that something does not exist.
    NotFound(String),

    /// Error returned by the ledger client.
    ClientError(ClientError),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::FileError(e) => write!(f, "File error: {}", e),
            CliError::JsonError(e) => write!(f, "JSON error: {}", e),
            CliError::KeyStoreError(msg) => write!(f, "Key store error: {}", msg),
            CliError::KeyError(msg) => write!(f, "Key error: {}", msg),
            CliError::InvalidAddress(msg) => write!(f, "Invalid address: {}", msg),
            CliError::InvalidAmount(msg) => write!(f, "Invalid amount: {}", msg),
            CliError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            CliError::NotFound(msg) => write!(f, "Not found: {}", msg),
            CliError::ClientError(e) => write!(f, "{}", e),
        }
    }
}

impl StdError for CliError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            CliError::FileError(e) => Some(e),
            CliError::JsonError(e) => Some(e),
            CliError::ClientError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(error: std::io::Error) -> Self {
        CliError::FileError(error)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(error: serde_json::Error) -> Self {
        CliError::JsonError(error)
    }
}

impl From<ClientError> for CliError {
    fn from(error: ClientError) -> Self {
        CliError::ClientError(error)
    }
}

impl From<CoreError> for CliError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::Key(msg) | CoreError::Signature(msg) => CliError::KeyError(msg),
            other => CliError::ClientError(ClientError::from(other)),
        }
    }
}
