//! The ledger client facade.

use crate::config::ClientConfig;
use crate::errors::{ClientError, Result};
use crate::network_info::NetworkInfoSynchronizer;
use crate::pager::TransactionPager;
use crate::transport::HttpTransport;
use pigeonium_core::{
    Address, Amount, Currency, CurrencyId, CurrencyQuery, DeploymentRequest, IndexId, NetworkInfo,
    Transaction, TransactionFilter, TransactionSigner, UnsignedTransaction, WireTransaction,
};
use serde::Deserialize;
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

/// Outcome of a currency lookup.
#[derive(Debug)]
pub enum CurrencyLookup {
    /// The server knows the currency
    Found(Currency),
    /// The server answered that no such currency exists
    NotFound,
    /// No answer could be obtained or understood
    LookupFailed(ClientError),
}

impl CurrencyLookup {
    /// The currency if found. Collapses `NotFound` and `LookupFailed` into `None`.
    pub fn found(self) -> Option<Currency> {
        match self {
            CurrencyLookup::Found(currency) => Some(currency),
            _ => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, CurrencyLookup::Found(_))
    }
}

/// A contract accepted by the ledger.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeployedContract {
    /// Address the contract lives at
    pub address: Address,
    /// The finalized deployment payment
    pub transaction: Transaction,
}

#[derive(Deserialize)]
struct BalanceResponse {
    #[serde(default)]
    amount: Option<Amount>,
}

/// Client for one ledger node, holding that node's network parameters.
pub struct LedgerClient {
    config: ClientConfig,
    transport: HttpTransport,
    network: NetworkInfo,
}

impl LedgerClient {
    /// Connects to the configured node and synchronizes network parameters.
    pub fn connect(config: ClientConfig) -> Result<Self> {
        info!("Connecting to ledger node {}", config.node);
        let transport = HttpTransport::new(&config.node, config.timeout())?;
        let network = NetworkInfoSynchronizer::new(&transport).fetch()?;

        Ok(Self {
            config,
            transport,
            network,
        })
    }

    /// Creates a client with known network parameters, without contacting the node.
    pub fn with_network(config: ClientConfig, network: NetworkInfo) -> Result<Self> {
        let transport = HttpTransport::new(&config.node, config.timeout())?;
        Ok(Self {
            config,
            transport,
            network,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &HttpTransport {
        &self.transport
    }

    /// The network parameters of the last synchronization.
    pub fn network_info(&self) -> &NetworkInfo {
        &self.network
    }

    /// Fetches the network parameters again. On failure the previous ones are kept.
    pub fn refresh_network_info(&mut self) -> Result<&NetworkInfo> {
        let network = NetworkInfoSynchronizer::new(&self.transport).fetch()?;
        self.network = network;
        Ok(&self.network)
    }

    /// Balance of `address` in `currency_id`. An address the server has never seen holds 0.
    pub fn get_balance(&self, address: &Address, currency_id: &CurrencyId) -> Result<Amount> {
        let path = format!("/balance/{}/{}", address.to_hex(), currency_id.to_hex());
        let response: BalanceResponse = self.transport.get(&path, &[])?;
        Ok(response.amount.unwrap_or(0))
    }

    /// Every non-zero balance held by `address`.
    pub fn get_balances(&self, address: &Address) -> Result<BTreeMap<CurrencyId, Amount>> {
        let path = format!("/balances/{}", address.to_hex());
        let balances: Option<BTreeMap<CurrencyId, Amount>> = self.transport.get(&path, &[])?;
        Ok(balances.unwrap_or_default())
    }

    /// Looks up a currency, keeping "does not exist" apart from "could not ask".
    pub fn lookup_currency(&self, query: &CurrencyQuery) -> CurrencyLookup {
        let pair = query.query_pair();
        match self.transport.get_optional::<Currency>("/currency", &[pair]) {
            Ok(Some(currency)) => CurrencyLookup::Found(currency),
            Ok(None) => CurrencyLookup::NotFound,
            Err(e) => {
                warn!("Currency lookup {:?} failed: {}", query, e);
                CurrencyLookup::LookupFailed(e)
            }
        }
    }

    /// The transaction at `index_id`, or `None` if the server has no such entry.
    pub fn get_transaction(&self, index_id: IndexId) -> Result<Option<Transaction>> {
        let path = format!("/transaction/{}", index_id);
        let record: Option<WireTransaction> = self.transport.get_optional(&path, &[])?;
        Ok(record.map(Transaction::from_wire).transpose()?)
    }

    /// Signs and submits a transfer, returning the server's finalized copy.
    pub fn send_transaction<S: TransactionSigner + ?Sized>(
        &self,
        wallet: &S,
        dest: &Address,
        currency_id: &CurrencyId,
        amount: Amount,
        fee_amount: Amount,
        input_data: &[u8],
    ) -> Result<Transaction> {
        let tx = UnsignedTransaction::new(
            wallet.address(),
            *dest,
            *currency_id,
            amount,
            fee_amount,
            input_data.to_vec(),
        )
        .sign(wallet)?;

        self.submit_transaction(&tx)
    }

    /// Submits an already signed transaction.
    pub fn submit_transaction(&self, tx: &Transaction) -> Result<Transaction> {
        info!(
            "Submitting transfer of {} {} from {} to {}",
            tx.amount, tx.currency_id, tx.source, tx.dest
        );
        let record: WireTransaction = self.transport.post("/transaction", &tx.to_wire())?;
        let finalized = Transaction::from_wire(record)?;
        debug!("Transaction finalized: {}", finalized);
        Ok(finalized)
    }

    /// Calls a contract: a transfer to the contract address carrying `call_data`.
    pub fn invoke_contract<S: TransactionSigner + ?Sized>(
        &self,
        wallet: &S,
        contract: &Address,
        currency_id: &CurrencyId,
        amount: Amount,
        call_data: &[u8],
    ) -> Result<Transaction> {
        debug!("Invoking contract {} with {} bytes of call data", contract, call_data.len());
        self.send_transaction(wallet, contract, currency_id, amount, 0, call_data)
    }

    /// Deploys `script`, paying the network's deploy cost from `wallet`.
    ///
    /// A refusal by the node is reported as [`ClientError::DeploymentRejected`]
    /// with the node's message. Nothing is retried.
    pub fn deploy_contract<S: TransactionSigner + ?Sized>(
        &self,
        wallet: &S,
        script: &str,
    ) -> Result<DeployedContract> {
        let request = DeploymentRequest::prepare(wallet, script, &self.network)?;
        let address = request.contract_address();
        info!("Deploying contract {} from {}", address, request.sender);

        let record: WireTransaction = self
            .transport
            .post("/contract", &request.to_wire())
            .map_err(|e| match e {
                ClientError::Http { status, body } => {
                    warn!("Deployment of {} rejected with status {}", address, status);
                    ClientError::DeploymentRejected {
                        status,
                        message: body,
                    }
                }
                other => other,
            })?;

        Ok(DeployedContract {
            address,
            transaction: Transaction::from_wire(record)?,
        })
    }

    /// A lazy traversal of the transactions matching `filter`.
    pub fn transactions(&self, filter: TransactionFilter) -> TransactionPager<&HttpTransport> {
        TransactionPager::new(&self.transport, filter)
    }
}
