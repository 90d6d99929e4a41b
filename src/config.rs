use std::env;

use url::Url;

pub const DEFAULT_ETHERSCAN_URL: &str = "https://api.etherscan.io";
pub const DEFAULT_COINGECKO_URL: &str = "https://api.coingecko.com";

#[derive(Debug, Clone)]
pub struct Config {
    pub etherscan_api_key: String,
    pub address: String,
    pub etherscan_url: Url,
    pub coingecko_url: Url,
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("missing ETHERSCAN_API_KEY env var")]
    MissingApiKey,
    #[error("missing ADDRESS env var (or --address flag)")]
    MissingAddress,
    #[error("invalid {name} url: {source}")]
    InvalidUrl {
        name: &'static str,
        source: url::ParseError,
    },
}

impl Config {
    /// Reads configuration from the process environment. `address_override`
    /// comes from the CLI and wins over the ADDRESS env var.
    pub fn from_env(address_override: Option<String>) -> Result<Self, ConfigError> {
        let etherscan_api_key =
            env::var("ETHERSCAN_API_KEY").map_err(|_| ConfigError::MissingApiKey)?;
        let address = address_override
            .or_else(|| env::var("ADDRESS").ok())
            .filter(|s| !s.trim().is_empty())
            .ok_or(ConfigError::MissingAddress)?;

        let etherscan_url = parse_url("ETHERSCAN_URL", DEFAULT_ETHERSCAN_URL)?;
        let coingecko_url = parse_url("COINGECKO_URL", DEFAULT_COINGECKO_URL)?;

        Ok(Self {
            etherscan_api_key,
            address,
            etherscan_url,
            coingecko_url,
        })
    }
}

fn parse_url(name: &'static str, default: &str) -> Result<Url, ConfigError> {
    let raw = env::var(name).unwrap_or_else(|_| default.to_string());
    Url::parse(&raw).map_err(|source| ConfigError::InvalidUrl { name, source })
}
