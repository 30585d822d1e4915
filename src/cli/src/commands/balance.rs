//! Balance command for the command line wallet.

use crate::commands::{connect, load_wallet, parse_address, parse_currency_id};
use crate::errors::CliError;
use pigeonium_client::ClientConfig;
use pigeonium_core::{Address, Amount, CurrencyId};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info};

/// Runs the balance command.
///
/// Queries `address`, or the wallet's own address when none is given. With a
/// currency only that balance is returned, otherwise every balance held.
pub fn run<P: AsRef<Path>>(
    config: &ClientConfig,
    wallet_path: P,
    address: Option<&str>,
    currency: Option<&str>,
) -> Result<(Address, BTreeMap<CurrencyId, Amount>), CliError> {
    let address = match address {
        Some(hex_str) => parse_address(hex_str)?,
        None => load_wallet(wallet_path)?.address(),
    };
    info!("Getting balance for address: {}", address);

    let client = connect(config)?;
    let balances = match currency {
        Some(hex_str) => {
            let currency_id = parse_currency_id(hex_str)?;
            let amount = client.get_balance(&address, &currency_id)?;
            BTreeMap::from([(currency_id, amount)])
        }
        None => client.get_balances(&address)?,
    };
    debug!("Found {} balances", balances.len());

    Ok((address, balances))
}
