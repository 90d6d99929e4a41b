use crate::models::GasReport;

pub fn print(report: &GasReport) {
    println!("You have spent {:.2} USD in gas", report.spend_usd);
    println!("Address: {}", report.address);
    println!("2021 block number: {}", report.start_block);
    println!("2022 block number: {}", report.end_block);
    println!("Ethereum price: {} USD", report.eth_usd);
    println!("Total transactions: {}", report.total_txns);
    println!("Successful transactions: {}", report.successful_txns);
    println!("Gas used: {} gwei", report.gas_gwei);
}
