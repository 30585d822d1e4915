//! Deploy command for the command line wallet.

use crate::commands::{connect, load_wallet};
use crate::errors::CliError;
use pigeonium_client::{ClientConfig, DeployedContract};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Runs the deploy command with the script stored at `script_path`.
pub fn run<P: AsRef<Path>, S: AsRef<Path>>(
    config: &ClientConfig,
    wallet_path: P,
    script_path: S,
) -> Result<DeployedContract, CliError> {
    let wallet = load_wallet(wallet_path)?;

    let script = fs::read_to_string(&script_path)?;
    debug!(
        "Read {} bytes of script from {}",
        script.len(),
        script_path.as_ref().display()
    );

    let client = connect(config)?;
    let deployed = client.deploy_contract(&wallet, &script)?;
    info!("Contract deployed at {}", deployed.address);

    Ok(deployed)
}
