//! Core primitives for the Pigeonium ledger client.
//!
//! This crate provides the value types exchanged with a Pigeonium ledger
//! service, the canonical transaction encoding and its signing, wallets,
//! contract addressing and deployment payloads, and the capability surface
//! deployed contract scripts are executed against.

pub mod contract;
pub mod errors;
pub mod hash;
pub mod query;
pub mod sandbox;
pub mod transaction;
pub mod types;
pub mod wallet;
pub mod wire;

// Re-export commonly used types
pub use contract::{derive_address, DeploymentRequest};
pub use errors::CoreError;
pub use query::{CurrencyQuery, SortBy, SortOrder, TransactionFilter};
pub use transaction::{Transaction, UnsignedTransaction};
pub use types::{Address, Amount, Currency, CurrencyId, IndexId, NetworkInfo};
pub use wallet::{TransactionSigner, Wallet};
pub use wire::{WireDeployment, WireTransaction};
