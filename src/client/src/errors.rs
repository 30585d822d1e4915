//! Error types for the client crate.

use pigeonium_core::CoreError;
use thiserror::Error;

/// Errors returned by client operations.
#[derive(Error, Debug)]
pub enum ClientError {
    /// No response was obtained from the node (connection refused, timeout, ...).
    #[error("Connectivity error: {0}")]
    Connectivity(String),

    /// The node answered with a non-success status. The body is kept verbatim.
    #[error("HTTP {status}: {body}")]
    Http {
        /// The HTTP status code
        status: u16,
        /// The response body as sent by the node
        body: String,
    },

    /// A response could not be decoded (malformed JSON, bad hex, missing field).
    #[error("Decode error: {0}")]
    Decode(String),

    /// A client-side precondition failed before anything was sent.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The node refused a contract deployment.
    #[error("Deployment rejected ({status}): {message}")]
    DeploymentRejected {
        /// The HTTP status code
        status: u16,
        /// The node's explanation, verbatim
        message: String,
    },
}

impl ClientError {
    /// The HTTP status carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Http { status, .. } | ClientError::DeploymentRejected { status, .. } => {
                Some(*status)
            }
            _ => None,
        }
    }
}

impl From<CoreError> for ClientError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::Decode(msg) => ClientError::Decode(msg),
            CoreError::Validation(msg) => ClientError::Validation(msg),
            CoreError::Signature(msg) | CoreError::Key(msg) => ClientError::Validation(msg),
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(error: serde_json::Error) -> Self {
        ClientError::Decode(error.to_string())
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            ClientError::Decode(error.to_string())
        } else {
            ClientError::Connectivity(error.to_string())
        }
    }
}

/// Convenience alias used across the crate
pub type Result<T> = std::result::Result<T, ClientError>;
