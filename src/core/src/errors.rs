//! Error types for the core crate.

use thiserror::Error;

/// Errors that can occur in the core crate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A client-side precondition was violated (bad field length, negative amount, ...).
    #[error("Validation error: {0}")]
    Validation(String),

    /// A wire record could not be decoded.
    #[error("Decode error: {0}")]
    Decode(String),

    /// Signature creation or verification failed.
    #[error("Signature verification failed: {0}")]
    Signature(String),

    /// Key material could not be parsed or derived.
    #[error("Key error: {0}")]
    Key(String),
}

impl From<hex::FromHexError> for CoreError {
    fn from(error: hex::FromHexError) -> Self {
        CoreError::Decode(format!("invalid hex: {}", error))
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(error: serde_json::Error) -> Self {
        CoreError::Decode(error.to_string())
    }
}

impl From<ed25519_dalek::SignatureError> for CoreError {
    fn from(error: ed25519_dalek::SignatureError) -> Self {
        CoreError::Signature(error.to_string())
    }
}

impl From<bip32::Error> for CoreError {
    fn from(error: bip32::Error) -> Self {
        CoreError::Key(error.to_string())
    }
}
