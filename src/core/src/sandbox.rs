//! Capability surface available to deployed contract scripts.
//!
//! Scripts run inside the ledger's execution engine, not here. This module only
//! describes what the engine hands to a script so that script authors and
//! tooling can type-check against it. An engine implements [`ContractHost`];
//! the script sees the triggering transfer through [`ContractHost::transaction`]
//! and its own storage scoped to [`ContractHost::self_address`].

use crate::errors::CoreError;
use crate::query::{CurrencyQuery, TransactionFilter};
use crate::transaction::Transaction;
use crate::types::{Address, Amount, Currency, CurrencyId, IndexId};
use thiserror::Error;

pub use crate::hash::{sha256, sha3_256, sha3_512};

/// Raised by a script to abort the triggering transfer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Transaction cancelled by contract: {reason}")]
pub struct CancelTransaction {
    /// Human readable reason, passed back to the submitter
    pub reason: String,
}

impl CancelTransaction {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Outcome of a ledger-mutating primitive.
pub type HostResult<T> = Result<T, CancelTransaction>;

/// What the execution engine exposes to a running contract.
pub trait ContractHost {
    /// The transfer that triggered this execution.
    fn transaction(&self) -> &Transaction;

    /// The contract's own address.
    fn self_address(&self) -> Address;

    /// The network's base currency.
    fn base_currency(&self) -> &Currency;

    fn get_balance(&self, address: &Address, currency_id: &CurrencyId) -> Amount;

    fn get_currency(&self, query: &CurrencyQuery) -> Option<Currency>;

    /// The currency issued by this contract, if it created one.
    fn get_self_currency(&self) -> Option<Currency> {
        self.get_currency(&CurrencyQuery::Issuer(self.self_address()))
    }

    fn get_transaction(&self, index_id: IndexId) -> Option<Transaction>;

    /// One page of the log, with `offset` applied on top of `filter`.
    fn get_transactions(&self, filter: &TransactionFilter, offset: u64) -> Vec<Transaction>;

    /// Reads a variable stored by the contract at `address`.
    fn get_variable(&self, address: &Address, key: &[u8]) -> Option<Vec<u8>>;

    /// Stores a variable under the contract's own address. `None` deletes it.
    fn set_variable(&mut self, key: &[u8], value: Option<&[u8]>) {
        match value {
            Some(value) => self.put_variable(key, value),
            None => self.del_variable(key),
        }
    }

    /// Unconditionally writes a variable under the contract's own address.
    fn put_variable(&mut self, key: &[u8], value: &[u8]);

    fn del_variable(&mut self, key: &[u8]);

    /// Moves `amount` of `currency_id` from the contract to `dest`.
    fn transfer(
        &mut self,
        dest: &Address,
        currency_id: &CurrencyId,
        amount: Amount,
    ) -> HostResult<Transaction>;

    /// Destroys `amount` of the contract's own currency.
    fn burn(&mut self, amount: Amount) -> HostResult<Transaction>;

    /// Creates `amount` of the contract's own currency.
    fn mint(&mut self, amount: Amount) -> HostResult<Transaction>;

    /// Issues a new currency owned by the contract.
    fn create_currency(
        &mut self,
        name: &str,
        symbol: &str,
        supply: Amount,
    ) -> HostResult<Transaction>;

    /// The index id the next accepted transaction will receive.
    fn next_index_id(&self) -> IndexId;
}

/// Decodes hex text, optionally requiring an exact byte length.
pub fn hex2bytes(hex_str: &str, length: Option<usize>) -> Result<Vec<u8>, CoreError> {
    let bytes = hex::decode(hex_str.trim().trim_start_matches("0x"))?;
    match length {
        Some(expected) if bytes.len() != expected => Err(CoreError::Validation(format!(
            "expected {} bytes, got {}",
            expected,
            bytes.len()
        ))),
        _ => Ok(bytes),
    }
}
