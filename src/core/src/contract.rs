//! Contract addressing and deployment payloads.

use crate::errors::CoreError;
use crate::hash::sha3_256;
use crate::transaction::{Transaction, UnsignedTransaction};
use crate::types::{Address, NetworkInfo, ID_LENGTH};
use crate::wallet::TransactionSigner;
use crate::wire::WireDeployment;
use tracing::debug;

/// Destination of every deployment payment.
pub const DEPLOY_DESTINATION: Address = Address::ZERO;

/// SHA3-256 of the script source, the payload the deployer signs.
pub fn script_hash(script: &str) -> [u8; 32] {
    sha3_256(script.as_bytes())
}

/// Derives the contract address of a script: its SHA3-256 digest truncated to 16 bytes.
pub fn derive_address(script: &str) -> Address {
    let digest = script_hash(script);
    let mut address = [0u8; ID_LENGTH];
    address.copy_from_slice(&digest[..ID_LENGTH]);
    Address(address)
}

/// Everything `POST /contract` needs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeploymentRequest {
    /// Address paying for the deployment
    pub sender: Address,
    /// Raw script source
    pub script: String,
    /// Sender's public key
    pub public_key: Vec<u8>,
    /// Sender's signature over [`script_hash`]
    pub signature: Vec<u8>,
    /// Payment of the deploy cost to [`DEPLOY_DESTINATION`]
    pub deploy_transaction: Transaction,
}

impl DeploymentRequest {
    /// Builds and signs a deployment of `script` under the given network parameters.
    pub fn prepare<S: TransactionSigner + ?Sized>(
        sender: &S,
        script: &str,
        network: &NetworkInfo,
    ) -> Result<Self, CoreError> {
        let contract_address = derive_address(script);
        debug!(
            "Preparing deployment of contract {} (cost {})",
            contract_address, network.contract_deploy_cost
        );

        let deploy_transaction = UnsignedTransaction::new(
            sender.address(),
            DEPLOY_DESTINATION,
            network.base_currency.currency_id,
            network.contract_deploy_cost,
            0,
            contract_address.as_bytes().to_vec(),
        )
        .sign(sender)?;

        let signature = sender.sign(&script_hash(script))?;

        Ok(Self {
            sender: sender.address(),
            script: script.to_string(),
            public_key: sender.public_key(),
            signature,
            deploy_transaction,
        })
    }

    /// The address the contract will live at.
    pub fn contract_address(&self) -> Address {
        derive_address(&self.script)
    }

    /// The request body.
    pub fn to_wire(&self) -> WireDeployment {
        WireDeployment {
            sender: self.sender.to_hex(),
            script: self.script.clone(),
            public_key: hex::encode(&self.public_key),
            signature: hex::encode(&self.signature),
            deploy_transaction: self.deploy_transaction.to_wire(),
        }
    }
}
