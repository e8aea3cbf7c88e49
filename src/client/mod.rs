pub mod account;
pub mod block;
pub mod price;
pub mod queries;
pub mod transaction;

use std::{env, fmt, str::FromStr, time::Duration};

use serde::{de::DeserializeOwned, Deserialize};
use serde_json::{json, Value};
use url::Url;

use crate::{
    config::Config,
    error::{ExplorerError, Result},
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Network {
    Mainnet,
    Testnet,
    /// A self-hosted API, given by its GraphQL endpoint.
    Custom(String),
}

impl Network {
    /// Returns the GraphQL endpoint for the network.
    ///
    /// # Arguments
    ///
    /// * `self` - A reference to the network instance.
    ///
    /// # Returns
    ///
    /// A string containing the URL the explorer queries are posted to.
    pub fn api_url(&self) -> String {
        match self {
            Network::Mainnet => env::var("MAINNET_API_URL")
                .unwrap_or_else(|_| "https://xapi.fantom.network/".to_owned()),
            Network::Testnet => env::var("TESTNET_API_URL")
                .unwrap_or_else(|_| "https://xapi.testnet.fantom.network/".to_owned()),
            Network::Custom(url) => url.clone(),
        }
    }

    /// JSON-RPC endpoint used for contract reads such as the price feed.
    pub fn rpc_url(&self) -> String {
        match self {
            Network::Mainnet | Network::Custom(_) => env::var("MAINNET_RPC_URL")
                .unwrap_or_else(|_| "https://rpcapi.fantom.network".to_owned()),
            Network::Testnet => env::var("TESTNET_RPC_URL")
                .unwrap_or_else(|_| "https://rpc.testnet.fantom.network".to_owned()),
        }
    }

    pub fn identifier(&self) -> &str {
        match self {
            Network::Mainnet => "mainnet",
            Network::Testnet => "testnet",
            Network::Custom(_) => "custom",
        }
    }
}

impl Default for Network {
    fn default() -> Self {
        env::var("ENVIRONMENT")
            .map(|env| match env.as_str() {
                "testnet" => Network::Testnet,
                _ => Network::Mainnet,
            })
            .unwrap_or(Network::Mainnet)
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

impl FromStr for Network {
    type Err = ExplorerError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "mainnet" => Ok(Network::Mainnet),
            "testnet" => Ok(Network::Testnet),
            url if url.starts_with("http://") || url.starts_with("https://") => {
                Url::parse(url)?;
                Ok(Network::Custom(url.to_owned()))
            }
            other => Err(ExplorerError::InvalidNetwork(other.to_owned())),
        }
    }
}

/// Client for the explorer GraphQL API and the chain's JSON-RPC endpoint.
#[derive(Clone, Debug)]
pub struct Client {
    inner: reqwest::Client, // The inner HTTP client used for requests.
    api_url: String,        // GraphQL endpoint.
    rpc_url: String,        // JSON-RPC endpoint for contract reads.
}

impl Client {
    /// Creates a new `Client` instance for interacting with a specified network.
    ///
    /// # Arguments
    ///
    /// * `network` - The network to connect to.
    ///
    /// # Returns
    ///
    /// A new `Client` instance.
    pub fn new(network: Network) -> Self {
        Self { inner: reqwest::Client::new(), api_url: network.api_url(), rpc_url: network.rpc_url() }
    }

    /// Builds a client with explicit endpoints and an optional request timeout.
    pub fn with_endpoints(
        api_url: impl Into<String>,
        rpc_url: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let api_url = api_url.into();
        let rpc_url = rpc_url.into();
        Url::parse(&api_url)?;
        Url::parse(&rpc_url)?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self { inner: builder.build()?, api_url, rpc_url })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let network = config.network()?;
        Self::with_endpoints(
            config.api_url.clone().unwrap_or_else(|| network.api_url()),
            config.rpc_url.clone().unwrap_or_else(|| network.rpc_url()),
            Some(config.request_timeout()),
        )
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn rpc_url(&self) -> &str {
        &self.rpc_url
    }

    /// Posts a GraphQL operation and returns its `data` member.
    ///
    /// Non-2xx statuses, a non-empty `errors` array and undecodable bodies
    /// are all reported as errors; nothing is retried here.
    pub(crate) async fn query<T: DeserializeOwned>(
        &self,
        operation: &str,
        query: &str,
        variables: Value,
    ) -> Result<T> {
        let url = Url::parse(&self.api_url)?;
        tracing::debug!(operation, %url, "Sending GraphQL request");

        let body = json!({ "operationName": operation, "query": query, "variables": variables });
        let response = self.inner.post(url).json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(operation, status = status.as_u16(), "API returned error status");
            return Err(ExplorerError::Status(status.as_u16()));
        }

        let bytes = response.bytes().await?;
        decode_response(&bytes)
    }

    pub(crate) async fn rpc_call(&self, method: &str, params: Value) -> Result<String> {
        let url = Url::parse(&self.rpc_url)?;
        tracing::debug!(method, %url, "Sending JSON-RPC request");

        let body = json!({ "jsonrpc": "2.0", "id": 1, "method": method, "params": params });
        let response = self.inner.post(url).json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExplorerError::Status(status.as_u16()));
        }

        let bytes = response.bytes().await?;
        decode_rpc_response(&bytes)
    }
}

#[derive(Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Option<Vec<GraphQlErrorMessage>>,
}

#[derive(Deserialize)]
struct GraphQlErrorMessage {
    message: String,
}

pub(crate) fn decode_response<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    let response: GraphQlResponse<T> = serde_json::from_slice(body)?;
    if let Some(errors) = response.errors.filter(|errors| !errors.is_empty()) {
        let message = errors.into_iter().map(|e| e.message).collect::<Vec<_>>().join("; ");
        return Err(ExplorerError::GraphQl(message));
    }
    response.data.ok_or(ExplorerError::EmptyResponse)
}

#[derive(Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<String>,
    #[serde(default)]
    error: Option<RpcErrorBody>,
}

#[derive(Deserialize)]
struct RpcErrorBody {
    code: i64,
    message: String,
}

pub(crate) fn decode_rpc_response(body: &[u8]) -> Result<String> {
    let response: RpcResponse = serde_json::from_slice(body)?;
    if let Some(error) = response.error {
        return Err(ExplorerError::Rpc { code: error.code, message: error.message });
    }
    response.result.ok_or(ExplorerError::EmptyResponse)
}
