//! Command line wallet for the Pigeonium ledger service.

pub mod commands;
pub mod config;
pub mod errors;
pub mod keystore;

// Re-export commonly used types and functions
pub use commands::{balance, deploy, history, send};
pub use config::{default_wallet_path, resolve_config};
pub use errors::CliError;
pub use keystore::KeyStore;
