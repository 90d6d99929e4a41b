use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "eth-gas-report",
    version,
    about = "Report an address's 2021 gas spend in USD"
)]
pub struct Cli {
    /// Wallet address to report on; overrides the ADDRESS env var
    #[arg(long)]
    pub address: Option<String>,
}
