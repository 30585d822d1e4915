//! Blocking HTTP transport to the ledger API server.

use crate::errors::{ClientError, Result};
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

/// Query string parameters of a request.
pub type QueryParams = Vec<(&'static str, String)>;

/// One long-lived HTTP session against a ledger node.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    base_url: String,
    http: Client,
}

impl HttpTransport {
    /// Creates a transport for `base_url`. Every call blocks for at most `timeout`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Connectivity(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    /// The node URL without trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `GET path?query` and decodes the JSON body.
    pub fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T> {
        debug!("GET {} {:?}", path, query);
        let (status, body) = self.send(self.http.get(self.url(path)).query(query))?;
        if !status.is_success() {
            return Err(http_error(status, body));
        }
        decode(&body)
    }

    /// Like [`HttpTransport::get`], but a 404 or a JSON `null` body yields `None`.
    pub fn get_optional<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Option<T>> {
        debug!("GET {} {:?}", path, query);
        let (status, body) = self.send(self.http.get(self.url(path)).query(query))?;
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(http_error(status, body));
        }
        decode::<Option<T>>(&body)
    }

    /// `POST path` with a JSON body and decodes the JSON response.
    pub fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, payload: &B) -> Result<T> {
        debug!("POST {}", path);
        let (status, body) = self.send(self.http.post(self.url(path)).json(payload))?;
        if !status.is_success() {
            return Err(http_error(status, body));
        }
        decode(&body)
    }

    fn send(&self, request: RequestBuilder) -> Result<(StatusCode, String)> {
        let response = request
            .send()
            .map_err(|e| ClientError::Connectivity(format!("Failed to reach node: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| ClientError::Connectivity(format!("Failed to read response body: {}", e)))?;
        debug!("Response {} ({} bytes)", status, body.len());

        Ok((status, body))
    }
}

fn http_error(status: StatusCode, body: String) -> ClientError {
    ClientError::Http {
        status: status.as_u16(),
        body,
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T> {
    if body.is_empty() {
        return Err(ClientError::Decode("Empty response from node".to_string()));
    }
    serde_json::from_str(body)
        .map_err(|e| ClientError::Decode(format!("Failed to parse response: {}", e)))
}
