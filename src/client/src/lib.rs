//! Blocking client for a Pigeonium ledger node.
//!
//! [`LedgerClient`] signs and submits transfers, deploys contracts, looks up
//! balances and currencies, and walks the transaction log through
//! [`TransactionPager`].

pub mod client;
pub mod config;
pub mod errors;
pub mod network_info;
pub mod pager;
pub mod transport;

pub use client::{CurrencyLookup, DeployedContract, LedgerClient};
pub use config::ClientConfig;
pub use errors::ClientError;
pub use network_info::NetworkInfoSynchronizer;
pub use pager::{Cursor, PageSource, PagerState, TransactionPager, TransactionQuery};
pub use transport::HttpTransport;
