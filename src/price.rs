use anyhow::{bail, Context, Result};
use serde::Deserialize;
use url::Url;

#[derive(Debug, Deserialize)]
struct SimplePriceResponse {
    ethereum: AssetPrice,
}

#[derive(Debug, Deserialize)]
struct AssetPrice {
    usd: f64,
}

#[derive(Clone)]
pub struct PriceClient {
    http: reqwest::Client,
    base_url: Url,
}

impl PriceClient {
    pub fn new(base_url: Url) -> Result<Self> {
        let http = reqwest::Client::builder()
            .build()
            .context("failed to build reqwest client")?;
        Ok(Self { http, base_url })
    }

    pub async fn eth_usd(&self) -> Result<f64> {
        let mut url = self
            .base_url
            .join("api/v3/simple/price")
            .context("invalid coingecko base url")?;
        url.query_pairs_mut()
            .append_pair("ids", "ethereum")
            .append_pair("vs_currencies", "usd");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .context("coingecko request failed")?;
        let status = response.status();
        if !status.is_success() {
            bail!("coingecko returned http {status}");
        }

        let body: SimplePriceResponse = response
            .json()
            .await
            .context("coingecko returned malformed json")?;
        Ok(body.ethereum.usd)
    }
}
