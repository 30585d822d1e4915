//! Currency lookup command for the command line wallet.

use crate::commands::{connect, parse_address, parse_currency_id};
use crate::errors::CliError;
use pigeonium_client::{ClientConfig, CurrencyLookup};
use pigeonium_core::{Currency, CurrencyQuery};

/// Runs the currency command. Exactly one selector must be given.
pub fn run(
    config: &ClientConfig,
    id: Option<&str>,
    name: Option<&str>,
    symbol: Option<&str>,
    issuer: Option<&str>,
) -> Result<Currency, CliError> {
    let query = match (id, name, symbol, issuer) {
        (Some(id), None, None, None) => CurrencyQuery::Id(parse_currency_id(id)?),
        (None, Some(name), None, None) => CurrencyQuery::Name(name.to_string()),
        (None, None, Some(symbol), None) => CurrencyQuery::Symbol(symbol.to_string()),
        (None, None, None, Some(issuer)) => CurrencyQuery::Issuer(parse_address(issuer)?),
        _ => {
            return Err(CliError::InvalidArgument(
                "Pass exactly one of --id, --name, --symbol or --issuer".to_string(),
            ))
        }
    };

    let client = connect(config)?;
    match client.lookup_currency(&query) {
        CurrencyLookup::Found(currency) => Ok(currency),
        CurrencyLookup::NotFound => Err(CliError::NotFound(format!("No currency matches {:?}", query))),
        CurrencyLookup::LookupFailed(e) => Err(e.into()),
    }
}
