//! Lazy, restartable traversal of the remote transaction log.
//!
//! The server keeps no session, so the whole traversal position lives in a
//! [`Cursor`]. A cursor yields the next [`TransactionQuery`] and is advanced
//! with the page the server returned for it. [`TransactionPager`] drives a
//! cursor against a [`PageSource`] and buffers one page at a time.
//!
//! When ordering by `indexId` and the caller did not fix `indexId_start`, each
//! drained page pins the boundary just past its last item and resets the
//! offset, so every request is a bounded "continue after" query. Otherwise the
//! traversal advances by offset. Offset paging, and any ordering other than by
//! `indexId`, can duplicate or skip an item when the log changes between two
//! fetches.

use crate::errors::{ClientError, Result};
use crate::transport::{HttpTransport, QueryParams};
use pigeonium_core::{IndexId, SortBy, SortOrder, Transaction, TransactionFilter, WireTransaction};
use std::collections::VecDeque;
use tracing::debug;

/// Position of a cursor in its traversal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PagerState {
    /// Nothing fetched yet
    Fresh,
    /// A page was fetched and more may follow
    PageLoaded,
    /// No further requests will be made
    Exhausted,
}

/// One `GET /transactions` request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransactionQuery {
    /// Filter and ordering, with the current boundary in `index_id_start`
    pub filter: TransactionFilter,
    /// Number of matching items to skip
    pub offset: u64,
}

impl TransactionQuery {
    /// Query string parameters. Unset filters are omitted.
    pub fn to_query_pairs(&self) -> QueryParams {
        let f = &self.filter;
        let mut pairs: QueryParams = Vec::new();

        if let Some(address) = &f.address {
            pairs.push(("address", address.to_hex()));
        }
        if let Some(source) = &f.source {
            pairs.push(("source", source.to_hex()));
        }
        if let Some(dest) = &f.dest {
            pairs.push(("dest", dest.to_hex()));
        }
        if let Some(currency_id) = &f.currency_id {
            pairs.push(("currencyId", currency_id.to_hex()));
        }
        push_opt(&mut pairs, "amount_min", f.amount_min);
        push_opt(&mut pairs, "amount_max", f.amount_max);
        push_opt(&mut pairs, "indexId_start", f.index_id_start);
        push_opt(&mut pairs, "indexId_end", f.index_id_end);
        push_opt(&mut pairs, "timestamp_start", f.timestamp_start);
        push_opt(&mut pairs, "timestamp_end", f.timestamp_end);
        push_opt(&mut pairs, "is_contract", f.is_contract);

        pairs.push(("sort_by", f.sort_by.as_str().to_string()));
        pairs.push(("sort_order", f.sort_order.as_str().to_string()));
        pairs.push(("limit", f.limit.to_string()));
        pairs.push(("offset", self.offset.to_string()));
        pairs
    }
}

fn push_opt<T: ToString>(pairs: &mut QueryParams, key: &'static str, value: Option<T>) {
    if let Some(value) = value {
        pairs.push((key, value.to_string()));
    }
}

/// Traversal position over the remote log.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cursor {
    filter: TransactionFilter,
    index_id_start: Option<IndexId>,
    offset: u64,
    state: PagerState,
    last_page: bool,
}

impl Cursor {
    /// A fresh cursor over `filter`.
    pub fn new(filter: TransactionFilter) -> Self {
        Self {
            index_id_start: filter.index_id_start,
            filter,
            offset: 0,
            state: PagerState::Fresh,
            last_page: false,
        }
    }

    pub fn state(&self) -> PagerState {
        self.state
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// The boundary the next request starts from.
    pub fn index_id_start(&self) -> Option<IndexId> {
        self.index_id_start
    }

    /// The filter the cursor was created with.
    pub fn filter(&self) -> &TransactionFilter {
        &self.filter
    }

    pub fn is_exhausted(&self) -> bool {
        self.state == PagerState::Exhausted
    }

    /// Whether the cursor moves its own boundary rather than the offset.
    pub fn pins_boundary(&self) -> bool {
        self.filter.index_id_start.is_none() && self.filter.sort_by == SortBy::IndexId
    }

    /// The request for the next page, or `None` once exhausted.
    ///
    /// Call this after the previous page has been fully consumed. A short
    /// previous page exhausts the cursor here.
    pub fn query(&mut self) -> Option<TransactionQuery> {
        if self.last_page && self.state != PagerState::Exhausted {
            debug!("Last page drained, cursor exhausted");
            self.state = PagerState::Exhausted;
        }
        if self.is_exhausted() {
            return None;
        }

        let mut filter = self.filter.clone();
        filter.index_id_start = self.index_id_start;
        Some(TransactionQuery {
            filter,
            offset: self.offset,
        })
    }

    /// Advances past `page`, the server's answer to the last [`Cursor::query`].
    ///
    /// Fails with [`ClientError::Decode`] if the boundary must be pinned from an
    /// item that carries no `indexId`; the cursor is left unchanged then.
    pub fn advance(&mut self, page: &[Transaction]) -> Result<()> {
        if page.is_empty() {
            debug!("Empty page at offset {}, cursor exhausted", self.offset);
            self.state = PagerState::Exhausted;
            return Ok(());
        }

        let short = page.len() < self.filter.limit as usize;

        if self.pins_boundary() {
            let last = page
                .last()
                .and_then(|tx| tx.index_id)
                .ok_or_else(|| ClientError::Decode("Transaction in page has no indexId".to_string()))?;

            let next = match self.filter.sort_order {
                SortOrder::Asc => last.checked_add(1),
                SortOrder::Desc => last.checked_sub(1),
            };
            match next {
                Some(next) => {
                    debug!("Pinning indexId_start at {}", next);
                    self.index_id_start = Some(next);
                    self.last_page = short;
                }
                None => {
                    // Nothing lies past the end of the id space
                    self.last_page = true;
                }
            }
            self.offset = 0;
        } else {
            self.offset += page.len() as u64;
            self.last_page = short;
            debug!("Advancing offset to {}", self.offset);
        }

        self.state = PagerState::PageLoaded;
        Ok(())
    }

    /// Marks the cursor as exhausted without another request.
    pub fn finish(&mut self) {
        self.state = PagerState::Exhausted;
    }

    /// Rewinds to the start of the traversal, restoring the caller's boundary.
    pub fn reset(&mut self) {
        self.index_id_start = self.filter.index_id_start;
        self.offset = 0;
        self.state = PagerState::Fresh;
        self.last_page = false;
    }
}

/// Anything that can answer a [`TransactionQuery`] with one page of transactions.
pub trait PageSource {
    fn fetch_page(&self, query: &TransactionQuery) -> Result<Vec<Transaction>>;
}

impl<S: PageSource + ?Sized> PageSource for &S {
    fn fetch_page(&self, query: &TransactionQuery) -> Result<Vec<Transaction>> {
        (**self).fetch_page(query)
    }
}

impl PageSource for HttpTransport {
    fn fetch_page(&self, query: &TransactionQuery) -> Result<Vec<Transaction>> {
        let records: Vec<WireTransaction> = self.get("/transactions", &query.to_query_pairs())?;
        records
            .into_iter()
            .map(|record| Transaction::from_wire(record).map_err(ClientError::from))
            .collect()
    }
}

/// Iterator over every transaction matching a filter, one page at a time.
///
/// A pager is a single-consumer cursor: iterate it directly or through
/// [`Iterator::by_ref`], and call [`TransactionPager::restart`] to traverse again.
/// An error is yielded once; the pager then stops until restarted.
pub struct TransactionPager<S: PageSource> {
    source: S,
    cursor: Cursor,
    buffer: VecDeque<Transaction>,
}

impl<S: PageSource> TransactionPager<S> {
    pub fn new(source: S, filter: TransactionFilter) -> Self {
        Self {
            source,
            cursor: Cursor::new(filter),
            buffer: VecDeque::new(),
        }
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    /// Starts the traversal over from the beginning.
    pub fn restart(&mut self) {
        debug!("Restarting transaction traversal");
        self.cursor.reset();
        self.buffer.clear();
    }

    fn fill(&mut self) -> Result<bool> {
        let query = match self.cursor.query() {
            Some(query) => query,
            None => return Ok(false),
        };

        debug!(
            "Fetching page: indexId_start={:?} offset={} limit={}",
            query.filter.index_id_start, query.offset, query.filter.limit
        );
        let page = self.source.fetch_page(&query)?;
        self.cursor.advance(&page)?;
        self.buffer.extend(page);
        Ok(!self.buffer.is_empty())
    }
}

impl<S: PageSource> Iterator for TransactionPager<S> {
    type Item = Result<Transaction>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(tx) = self.buffer.pop_front() {
            return Some(Ok(tx));
        }

        match self.fill() {
            Ok(true) => self.buffer.pop_front().map(Ok),
            Ok(false) => None,
            Err(e) => {
                self.cursor.finish();
                Some(Err(e))
            }
        }
    }
}
