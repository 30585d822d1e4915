//! Transaction history command for the command line wallet.

use crate::commands::{connect, load_wallet, parse_address, parse_amount, parse_currency_id};
use crate::errors::CliError;
use pigeonium_client::ClientConfig;
use pigeonium_core::{SortBy, SortOrder, Transaction, TransactionFilter};
use std::path::Path;
use structopt::StructOpt;
use tracing::{debug, info};

/// Filters accepted by the history command.
#[derive(Debug, Default, StructOpt)]
pub struct HistoryArgs {
    /// Transactions sent or received by this address
    #[structopt(long)]
    pub address: Option<String>,

    /// Transactions sent by this address
    #[structopt(long)]
    pub source: Option<String>,

    /// Transactions received by this address
    #[structopt(long)]
    pub dest: Option<String>,

    /// Only this currency
    #[structopt(long)]
    pub currency: Option<String>,

    /// Smallest amount to include
    #[structopt(long)]
    pub min_amount: Option<String>,

    /// Largest amount to include
    #[structopt(long)]
    pub max_amount: Option<String>,

    /// Start from this indexId
    #[structopt(long)]
    pub from_index: Option<u64>,

    /// Stop at this indexId
    #[structopt(long)]
    pub to_index: Option<u64>,

    /// Only contract transactions
    #[structopt(long)]
    pub contracts: bool,

    /// Sort column: indexId, timestamp, amount or feeAmount
    #[structopt(long, default_value = "indexId")]
    pub sort: String,

    /// Oldest first
    #[structopt(long)]
    pub asc: bool,

    /// Page size requested from the node
    #[structopt(long)]
    pub limit: Option<u32>,

    /// Stop after this many transactions
    #[structopt(long, default_value = "20")]
    pub max: usize,

    /// Filter on the wallet's own address
    #[structopt(long)]
    pub mine: bool,
}

pub fn parse_sort_by(input: &str) -> Result<SortBy, CliError> {
    match input {
        "indexId" | "index" => Ok(SortBy::IndexId),
        "timestamp" | "time" => Ok(SortBy::Timestamp),
        "amount" => Ok(SortBy::Amount),
        "feeAmount" | "fee" => Ok(SortBy::FeeAmount),
        other => Err(CliError::InvalidArgument(format!("Unknown sort column: {}", other))),
    }
}

impl HistoryArgs {
    /// Turns the arguments into a transaction filter.
    pub fn to_filter(&self, page_limit: u32) -> Result<TransactionFilter, CliError> {
        let order = if self.asc { SortOrder::Asc } else { SortOrder::Desc };
        let mut filter = TransactionFilter::new()
            .sort(parse_sort_by(&self.sort)?, order)
            .limit(self.limit.unwrap_or(page_limit))
            .index_range(self.from_index, self.to_index);

        if let Some(address) = &self.address {
            filter = filter.address(parse_address(address)?);
        }
        if let Some(source) = &self.source {
            filter = filter.source(parse_address(source)?);
        }
        if let Some(dest) = &self.dest {
            filter = filter.dest(parse_address(dest)?);
        }
        if let Some(currency) = &self.currency {
            filter = filter.currency(parse_currency_id(currency)?);
        }
        let min = self.min_amount.as_deref().map(parse_amount).transpose()?;
        let max = self.max_amount.as_deref().map(parse_amount).transpose()?;
        filter = filter.amount_range(min, max);
        if self.contracts {
            filter = filter.contract(true);
        }

        Ok(filter)
    }
}

/// Runs the history command, returning at most `args.max` transactions.
pub fn run<P: AsRef<Path>>(
    config: &ClientConfig,
    wallet_path: P,
    args: &HistoryArgs,
) -> Result<Vec<Transaction>, CliError> {
    let mut filter = args.to_filter(config.page_limit)?;
    if args.mine {
        filter = filter.address(load_wallet(wallet_path)?.address());
    }
    debug!("History filter: {:?}", filter);

    let client = connect(config)?;
    let transactions = client
        .transactions(filter)
        .take(args.max)
        .collect::<Result<Vec<_>, _>>()?;
    info!("Retrieved {} transactions", transactions.len());

    Ok(transactions)
}
