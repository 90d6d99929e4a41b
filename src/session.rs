use anyhow::{Context, Result};

use crate::explorer::{ExplorerClient, BLOCK_2021};
use crate::price::PriceClient;

/// Baseline state for one report run: block boundaries and the spot price.
/// Built once by [`Session::init`] and read-only afterwards, so anything
/// holding a `Session` is initialized by construction.
#[derive(Debug, Clone, Copy)]
pub struct Session {
    pub start_block: u64,
    pub end_block: u64,
    pub eth_usd: f64,
}

impl Session {
    /// Resolves the window-end block and the ETH/USD price. The two calls
    /// have no data dependency, so they run concurrently.
    pub async fn init(explorer: &ExplorerClient, price: &PriceClient) -> Result<Self> {
        let (end_block, eth_usd) = tokio::try_join!(
            explorer.resolve_end_block(),
            price.eth_usd()
        )
        .context("session initialization failed")?;

        tracing::info!(
            start_block = BLOCK_2021,
            end_block,
            eth_usd,
            "session initialized"
        );

        Ok(Self {
            start_block: BLOCK_2021,
            end_block,
            eth_usd,
        })
    }
}
