//! Filters for transaction history and currency lookups.

use crate::types::{Address, Amount, CurrencyId, IndexId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default page size when none is requested.
pub const DEFAULT_PAGE_LIMIT: u32 = 20;

/// Column the server orders transactions by.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortBy {
    /// Server-assigned sequence number
    #[default]
    #[serde(rename = "indexId")]
    IndexId,
    /// Acceptance time
    #[serde(rename = "timestamp")]
    Timestamp,
    /// Transferred amount
    #[serde(rename = "amount")]
    Amount,
    /// Fee paid
    #[serde(rename = "feeAmount")]
    FeeAmount,
}

impl SortBy {
    /// Name of the column on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortBy::IndexId => "indexId",
            SortBy::Timestamp => "timestamp",
            SortBy::Amount => "amount",
            SortBy::FeeAmount => "feeAmount",
        }
    }
}

/// Direction of the ordering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortOrder {
    /// Ascending
    #[serde(rename = "ASC")]
    Asc,
    /// Descending, newest first
    #[default]
    #[serde(rename = "DESC")]
    Desc,
}

impl SortOrder {
    /// Name of the direction on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Caller supplied filter over the transaction log.
///
/// Every `None` field is left out of the request. `index_id_start` is the
/// traversal start in the direction of `sort_order`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransactionFilter {
    /// Either source or destination equals this address
    pub address: Option<Address>,
    /// Sender
    pub source: Option<Address>,
    /// Recipient
    pub dest: Option<Address>,
    /// Currency moved
    pub currency_id: Option<CurrencyId>,
    /// Lower bound on the amount (inclusive)
    pub amount_min: Option<Amount>,
    /// Upper bound on the amount (inclusive)
    pub amount_max: Option<Amount>,
    /// First index id of the traversal
    pub index_id_start: Option<IndexId>,
    /// Last index id of the traversal
    pub index_id_end: Option<IndexId>,
    /// Lower bound on the timestamp
    pub timestamp_start: Option<u64>,
    /// Upper bound on the timestamp
    pub timestamp_end: Option<u64>,
    /// Only contract (or only non-contract) transactions
    pub is_contract: Option<bool>,
    /// Ordering column
    pub sort_by: SortBy,
    /// Ordering direction
    pub sort_order: SortOrder,
    /// Page size
    pub limit: u32,
}

impl Default for TransactionFilter {
    fn default() -> Self {
        Self {
            address: None,
            source: None,
            dest: None,
            currency_id: None,
            amount_min: None,
            amount_max: None,
            index_id_start: None,
            index_id_end: None,
            timestamp_start: None,
            timestamp_end: None,
            is_contract: None,
            sort_by: SortBy::default(),
            sort_order: SortOrder::default(),
            limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

impl TransactionFilter {
    /// Creates a filter matching every transaction, newest first.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn address(mut self, address: Address) -> Self {
        self.address = Some(address);
        self
    }

    pub fn source(mut self, source: Address) -> Self {
        self.source = Some(source);
        self
    }

    pub fn dest(mut self, dest: Address) -> Self {
        self.dest = Some(dest);
        self
    }

    pub fn currency(mut self, currency_id: CurrencyId) -> Self {
        self.currency_id = Some(currency_id);
        self
    }

    pub fn amount_range(mut self, min: Option<Amount>, max: Option<Amount>) -> Self {
        self.amount_min = min;
        self.amount_max = max;
        self
    }

    pub fn index_range(mut self, start: Option<IndexId>, end: Option<IndexId>) -> Self {
        self.index_id_start = start;
        self.index_id_end = end;
        self
    }

    pub fn time_range(mut self, start: Option<u64>, end: Option<u64>) -> Self {
        self.timestamp_start = start;
        self.timestamp_end = end;
        self
    }

    pub fn contract(mut self, is_contract: bool) -> Self {
        self.is_contract = Some(is_contract);
        self
    }

    pub fn sort(mut self, sort_by: SortBy, sort_order: SortOrder) -> Self {
        self.sort_by = sort_by;
        self.sort_order = sort_order;
        self
    }

    /// Sets the page size. Zero is bumped to one.
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit.max(1);
        self
    }
}

/// Ways of looking up a currency.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CurrencyQuery {
    /// By identifier
    Id(CurrencyId),
    /// By exact name
    Name(String),
    /// By ticker symbol
    Symbol(String),
    /// By issuing address
    Issuer(Address),
}

impl CurrencyQuery {
    /// The single query parameter sent for this lookup.
    pub fn query_pair(&self) -> (&'static str, String) {
        match self {
            CurrencyQuery::Id(id) => ("currencyId", id.to_hex()),
            CurrencyQuery::Name(name) => ("name", name.clone()),
            CurrencyQuery::Symbol(symbol) => ("symbol", symbol.clone()),
            CurrencyQuery::Issuer(issuer) => ("issuer", issuer.to_hex()),
        }
    }
}
