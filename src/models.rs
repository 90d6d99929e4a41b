use serde::{Deserialize, Serialize};

/// One row of an Etherscan `txlist` response. Every field arrives as a
/// string and is kept verbatim; only `gas_used` and `gas_price` are ever
/// parsed, and that happens at aggregation time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(rename = "blockNumber")]
    pub block_number: String,
    #[serde(rename = "timeStamp")]
    pub timestamp: String,
    pub hash: String,
    pub nonce: String,
    #[serde(rename = "blockHash")]
    pub block_hash: String,
    #[serde(rename = "transactionIndex")]
    pub transaction_index: String,
    pub from: String,
    pub to: String,
    pub value: String,
    pub gas: String,
    #[serde(rename = "gasPrice")]
    pub gas_price: String,
    #[serde(rename = "isError")]
    pub is_error: String,
    #[serde(rename = "txreceipt_status")]
    pub receipt_status: String,
    pub input: String,
    #[serde(rename = "contractAddress")]
    pub contract_address: String,
    #[serde(rename = "cumulativeGasUsed")]
    pub cumulative_gas_used: String,
    #[serde(rename = "gasUsed")]
    pub gas_used: String,
    pub confirmations: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct GasReport {
    pub address: String,
    pub start_block: u64,
    pub end_block: u64,
    pub eth_usd: f64,
    pub total_txns: usize,
    pub successful_txns: usize,
    pub gas_gwei: f64,
    pub spend_usd: f64,
}

#[cfg(test)]
impl Transaction {
    /// A filled-in row for tests; callers override the fields they care about.
    pub fn sample() -> Self {
        Self {
            block_number: "11600000".to_string(),
            timestamp: "1610000000".to_string(),
            hash: "0xaaa1".to_string(),
            nonce: "0".to_string(),
            block_hash: "0xblock".to_string(),
            transaction_index: "0".to_string(),
            from: "0x1111111111111111111111111111111111111111".to_string(),
            to: "0x2222222222222222222222222222222222222222".to_string(),
            value: "0".to_string(),
            gas: "21000".to_string(),
            gas_price: "50000000000".to_string(),
            is_error: "0".to_string(),
            receipt_status: "1".to_string(),
            input: "0x".to_string(),
            contract_address: String::new(),
            cumulative_gas_used: "21000".to_string(),
            gas_used: "21000".to_string(),
            confirmations: "100".to_string(),
        }
    }
}
