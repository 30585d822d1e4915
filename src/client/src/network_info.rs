//! Retrieval of the static network parameters.

use crate::errors::Result;
use crate::transport::HttpTransport;
use pigeonium_core::NetworkInfo;
use tracing::info;

/// Fetches network parameters from `GET /`.
pub struct NetworkInfoSynchronizer<'a> {
    transport: &'a HttpTransport,
}

impl<'a> NetworkInfoSynchronizer<'a> {
    pub fn new(transport: &'a HttpTransport) -> Self {
        Self { transport }
    }

    /// Fetches and fully decodes the network parameters.
    ///
    /// The result is either a complete [`NetworkInfo`] or an error; nothing is
    /// returned for a response that decodes only partially.
    pub fn fetch(&self) -> Result<NetworkInfo> {
        let network: NetworkInfo = self.transport.get("/", &[])?;
        info!(
            "Synchronized network {} (id {}), base currency {}",
            network.network_name, network.network_id, network.base_currency.symbol
        );
        Ok(network)
    }
}
