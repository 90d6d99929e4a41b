use anyhow::{Context, Result};

use crate::explorer::ExplorerClient;
use crate::models::{GasReport, Transaction};
use crate::session::Session;

/// Gwei per ETH and wei per gwei share the same 10^9 factor.
const GWEI_SCALE: f64 = 1_000_000_000.0;

/// Keeps transactions sent by `address` that landed successfully. Addresses
/// can come back in mixed-case checksum form, so the comparison folds case.
pub fn filter_successful_outgoing(txns: &[Transaction], address: &str) -> Vec<Transaction> {
    txns.iter()
        .filter(|txn| txn.from.eq_ignore_ascii_case(address) && txn.receipt_status == "1")
        .cloned()
        .collect()
}

/// Total gas cost of `txns` in gwei: Σ gasUsed × gasPrice, accumulated
/// exactly in wei before the single divide.
pub fn sum_gas_gwei(txns: &[Transaction]) -> Result<f64> {
    let mut wei: u128 = 0;
    for txn in txns {
        let gas_used: u128 = txn
            .gas_used
            .parse()
            .with_context(|| format!("tx {}: invalid gasUsed {:?}", txn.hash, txn.gas_used))?;
        let gas_price: u128 = txn
            .gas_price
            .parse()
            .with_context(|| format!("tx {}: invalid gasPrice {:?}", txn.hash, txn.gas_price))?;
        wei += gas_used * gas_price;
    }
    Ok(wei as f64 / GWEI_SCALE)
}

/// USD value of a gwei gas total, rounded half-away-from-zero to cents.
pub fn to_usd(gas_gwei: f64, eth_usd: f64) -> f64 {
    let amount = gas_gwei / GWEI_SCALE * eth_usd;
    (amount * 100.0).round() / 100.0
}

/// Full pipeline for one address: fetch the window's transactions, keep the
/// successful outgoing ones, sum their gas and price it in USD.
pub async fn total_gas_spend(
    explorer: &ExplorerClient,
    session: &Session,
    address: &str,
) -> Result<GasReport> {
    let txns = explorer
        .fetch_transactions(address, session.start_block, session.end_block)
        .await?;
    tracing::info!(count = txns.len(), "fetched transactions");

    let successful = filter_successful_outgoing(&txns, address);
    let gas_gwei = sum_gas_gwei(&successful)?;
    let spend_usd = to_usd(gas_gwei, session.eth_usd);

    Ok(GasReport {
        address: address.to_string(),
        start_block: session.start_block,
        end_block: session.end_block,
        eth_usd: session.eth_usd,
        total_txns: txns.len(),
        successful_txns: successful.len(),
        gas_gwei,
        spend_usd,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADDR: &str = "0x1111111111111111111111111111111111111111";

    #[test]
    fn filter_drops_failed_and_incoming() {
        let mut failed = Transaction::sample();
        failed.hash = "0xfail".to_string();
        failed.receipt_status = "0".to_string();

        let mut incoming = Transaction::sample();
        incoming.hash = "0xin".to_string();
        incoming.from = "0x3333333333333333333333333333333333333333".to_string();
        incoming.to = ADDR.to_string();

        let ok = Transaction::sample();

        let kept = filter_successful_outgoing(&[failed, incoming, ok], ADDR);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].hash, "0xaaa1");
    }

    #[test]
    fn filter_matches_checksum_cased_sender() {
        let mut txn = Transaction::sample();
        txn.from = "0xAbCdEf1234567890aBcDeF1234567890abCDef12".to_string();
        let kept =
            filter_successful_outgoing(&[txn], "0xabcdef1234567890abcdef1234567890abcdef12");
        assert_eq!(kept.len(), 1);
    }

    #[test]
    fn filter_never_grows_the_set() {
        let mut failed = Transaction::sample();
        failed.receipt_status = "0".to_string();
        let mut incoming = Transaction::sample();
        incoming.from = "0x9999999999999999999999999999999999999999".to_string();
        let txns = vec![Transaction::sample(), failed, Transaction::sample(), incoming];

        let kept = filter_successful_outgoing(&txns, ADDR);
        assert_eq!(kept.len(), 2);
        assert!(kept.len() < txns.len());
    }

    #[test]
    fn sum_of_empty_set_is_zero() {
        assert_eq!(sum_gas_gwei(&[]).unwrap(), 0.0);
    }

    #[test]
    fn sum_is_order_independent() {
        let mut a = Transaction::sample();
        a.gas_used = "21000".to_string();
        a.gas_price = "50000000000".to_string();
        let mut b = Transaction::sample();
        b.gas_used = "63000".to_string();
        b.gas_price = "120000000000".to_string();

        let forward = sum_gas_gwei(&[a.clone(), b.clone()]).unwrap();
        let reverse = sum_gas_gwei(&[b, a]).unwrap();
        assert_eq!(forward, reverse);
    }

    #[test]
    fn sum_rejects_non_numeric_gas_fields() {
        let mut txn = Transaction::sample();
        txn.gas_used = "not-a-number".to_string();
        let err = sum_gas_gwei(&[txn]).unwrap_err();
        assert!(err.to_string().contains("gasUsed"));
    }

    #[test]
    fn zero_gas_converts_to_zero_usd() {
        assert_eq!(to_usd(0.0, 4200.0), 0.0);
    }

    #[test]
    fn rounding_is_half_away_from_zero() {
        // 1.125 and 2.375 are exact in binary, so the .5 boundary is real.
        assert_eq!(to_usd(1.125 * GWEI_SCALE, 1.0), 1.13);
        assert_eq!(to_usd(2.375 * GWEI_SCALE, 1.0), 2.38);
        // Below the boundary rounds down.
        assert_eq!(to_usd(1.1049 * GWEI_SCALE, 1.0), 1.10);
    }

    #[test]
    fn end_to_end_arithmetic_chain() {
        let mut failed = Transaction::sample();
        failed.receipt_status = "0".to_string();
        let mut incoming = Transaction::sample();
        incoming.from = "0x9999999999999999999999999999999999999999".to_string();
        let ok = Transaction::sample(); // gasUsed 21000, gasPrice 50 gwei

        let kept = filter_successful_outgoing(&[failed, incoming, ok], ADDR);
        assert_eq!(kept.len(), 1);

        let gwei = sum_gas_gwei(&kept).unwrap();
        assert_eq!(gwei, 1_050_000.0);

        // 0.00105 ETH at 2000 USD/ETH.
        assert_eq!(to_usd(gwei, 2000.0), 2.10);
    }
}
