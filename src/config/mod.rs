use std::{fs, path::Path, time::Duration};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::{client::Network, error::ExplorerError};

pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// FTM / USD Chainlink aggregator on Opera mainnet.
pub const DEFAULT_PRICE_FEED: &str = "0xf4766552D15AE4d256Ad41B6cf2933482B0680dc";

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Config {
    /// `mainnet`, `testnet` or a GraphQL endpoint url.
    #[serde(default = "default_network")]
    pub network: String,
    /// Overrides the network's GraphQL endpoint.
    #[serde(default)]
    pub api_url: Option<String>,
    /// Overrides the network's JSON-RPC endpoint.
    #[serde(default)]
    pub rpc_url: Option<String>,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    #[serde(default = "default_price_feed")]
    pub price_feed_address: String,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_network() -> String {
    Network::default().identifier().to_owned()
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

fn default_price_feed() -> String {
    DEFAULT_PRICE_FEED.to_owned()
}

fn default_request_timeout() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            network: default_network(),
            api_url: None,
            rpc_url: None,
            page_size: DEFAULT_PAGE_SIZE,
            price_feed_address: default_price_feed(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl Config {
    /// Builds a config from `NETWORK`, `API_URL`, `RPC_URL`, `PAGE_SIZE`,
    /// `PRICE_FEED_ADDRESS` and `REQUEST_TIMEOUT_SECS`, falling back to the
    /// defaults for anything unset.
    pub fn from_env() -> Result<Self> {
        let mut config = Config::default();
        if let Ok(network) = std::env::var("NETWORK") {
            config.network = network;
        }
        config.api_url = std::env::var("API_URL").ok();
        config.rpc_url = std::env::var("RPC_URL").ok();
        if let Ok(page_size) = std::env::var("PAGE_SIZE") {
            config.page_size = page_size.parse().context("PAGE_SIZE must be a positive integer")?;
        }
        if let Ok(feed) = std::env::var("PRICE_FEED_ADDRESS") {
            config.price_feed_address = feed;
        }
        if let Ok(timeout) = std::env::var("REQUEST_TIMEOUT_SECS") {
            config.request_timeout_secs =
                timeout.parse().context("REQUEST_TIMEOUT_SECS must be an integer")?;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn network(&self) -> std::result::Result<Network, ExplorerError> {
        self.network.parse()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn validate(&self) -> Result<()> {
        self.network().context("Invalid network in config")?;
        anyhow::ensure!(self.page_size > 0, "page_size must be greater than zero");
        anyhow::ensure!(
            self.request_timeout_secs > 0,
            "request_timeout_secs must be greater than zero"
        );
        Ok(())
    }
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let content = fs::read_to_string(path).context("Failed to read config file")?;
    let config: Config = toml::from_str(&content).context("Failed to parse config file")?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    fn create_test_config_file(dir: &Path, content: &str) -> std::path::PathBuf {
        let config_path = dir.join("explorer.toml");
        let mut file = File::create(&config_path).expect("Failed to create test config file");
        file.write_all(content.as_bytes()).expect("Failed to write to test config file");
        config_path
    }

    #[test]
    fn test_load_config() {
        let temp_dir = tempdir().expect("Failed to create temp directory");
        let config_content = r#"
            network = "testnet"
            rpc_url = "http://localhost:18545"
            page_size = 50
            price_feed_address = "0x0000000000000000000000000000000000000001"
            request_timeout_secs = 5
        "#;
        let config_path = create_test_config_file(temp_dir.path(), config_content);

        let config = load_config(config_path).expect("Failed to load config");

        assert_eq!(config.network().unwrap(), Network::Testnet);
        assert_eq!(config.api_url, None);
        assert_eq!(config.rpc_url.as_deref(), Some("http://localhost:18545"));
        assert_eq!(config.page_size, 50);
        assert_eq!(config.price_feed_address, "0x0000000000000000000000000000000000000001");
        assert_eq!(config.request_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_config_defaults() {
        let temp_dir = tempdir().expect("Failed to create temp directory");
        let config_path = create_test_config_file(temp_dir.path(), "network = \"mainnet\"\n");

        let config = load_config(config_path).expect("Failed to load config");

        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(config.price_feed_address, DEFAULT_PRICE_FEED);
        assert_eq!(config.request_timeout_secs, DEFAULT_REQUEST_TIMEOUT_SECS);
    }

    #[test]
    fn test_custom_network_url() {
        let temp_dir = tempdir().expect("Failed to create temp directory");
        let config_path = create_test_config_file(
            temp_dir.path(),
            "network = \"http://localhost:16761/api\"\n",
        );

        let config = load_config(config_path).expect("Failed to load config");
        assert_eq!(
            config.network().unwrap(),
            Network::Custom("http://localhost:16761/api".to_owned())
        );
    }

    #[test]
    fn test_error_on_invalid_config() {
        let temp_dir = tempdir().expect("Failed to create temp directory");

        let bad_toml = create_test_config_file(temp_dir.path(), "This is not [valid toml");
        assert!(load_config(bad_toml).is_err());

        let zero_page = create_test_config_file(temp_dir.path(), "network = \"mainnet\"\npage_size = 0\n");
        assert!(load_config(zero_page).is_err());

        let zero_timeout = create_test_config_file(
            temp_dir.path(),
            "network = \"mainnet\"\nrequest_timeout_secs = 0\n",
        );
        let err = load_config(zero_timeout).unwrap_err();
        assert!(err.to_string().contains("request_timeout_secs"));

        let unknown_network = create_test_config_file(temp_dir.path(), "network = \"devnet\"\n");
        assert!(load_config(unknown_network).is_err());
    }

    #[test]
    fn test_error_on_missing_config_file() {
        assert!(load_config("non_existent_config.toml").is_err());
    }
}
