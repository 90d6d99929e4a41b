use anyhow::Context;
use clap::Parser;

use eth_gas_report::cli::Cli;
use eth_gas_report::config::Config;
use eth_gas_report::explorer::ExplorerClient;
use eth_gas_report::price::PriceClient;
use eth_gas_report::session::Session;
use eth_gas_report::{aggregate, report};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let config = Config::from_env(cli.address).context("failed to load configuration")?;

    let explorer = ExplorerClient::new(config.etherscan_url, config.etherscan_api_key)?;
    let price = PriceClient::new(config.coingecko_url)?;

    let session = Session::init(&explorer, &price).await?;
    let gas_report = aggregate::total_gas_spend(&explorer, &session, &config.address).await?;
    report::print(&gas_report);

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();
}
