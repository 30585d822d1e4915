//! Address command for the command line wallet.

use crate::commands::load_wallet;
use crate::errors::CliError;
use pigeonium_core::Address;
use std::path::Path;

/// Runs the address command.
pub fn run<P: AsRef<Path>>(wallet_path: P) -> Result<Address, CliError> {
    Ok(load_wallet(wallet_path)?.address())
}
