//! Contains the [TxReport] type, a printable summary of a transaction.

use alloy_primitives::{hex, U256};
use kona_tx_data::{SignedRecoverable, TxData, TxEnvelope};
use std::fmt;

/// A printable summary of a transaction, built through the [TxData] interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TxReport {
    lines: Vec<(&'static str, String)>,
}

impl TxReport {
    /// Builds a report for `tx`. `base_fee` is used for the effective gas price.
    pub(crate) fn new(tx: &TxEnvelope, base_fee: Option<U256>) -> Self {
        let mut lines = vec![
            ("type", tx.tx_type().to_string()),
            ("chain id", tx.chain_id().to_string()),
            ("nonce", tx.nonce().to_string()),
            ("gas", tx.gas().to_string()),
            ("gas price", tx.gas_price().to_string()),
            ("gas tip cap", tx.gas_tip_cap().to_string()),
            ("gas fee cap", tx.gas_fee_cap().to_string()),
        ];

        let mut effective = U256::ZERO;
        tx.effective_gas_price(&mut effective, base_fee);
        lines.push(("effective gas price", effective.to_string()));

        lines.push(("value", tx.value().to_string()));
        lines.push((
            "to",
            tx.to().map_or_else(|| "contract creation".to_string(), |to| to.to_string()),
        ));
        lines.push(("data", hex::encode_prefixed(tx.data())));
        lines.push(("access list entries", tx.access_list().len().to_string()));

        let sig = tx.raw_signature_values();
        lines.push(("v", sig.v.to_string()));
        lines.push(("r", format!("{:#x}", sig.r)));
        lines.push(("s", format!("{:#x}", sig.s)));

        lines.push(("hash", tx.tx_hash().map_or_else(|e| e.to_string(), |h| h.to_string())));
        lines.push((
            "sender",
            tx.recover_sender().map_or_else(|e| e.to_string(), |a| a.to_string()),
        ));

        if let Some(combo) = tx.as_combo() {
            let optional = |v: Option<String>| v.unwrap_or_else(|| "none".to_string());
            lines.push(("block hash", optional(combo.block_hash.map(|h| h.to_string()))));
            lines.push(("block number", combo.block_number.to_string()));
            lines.push(("transaction index", combo.transaction_index.to_string()));
            lines.push(("source hash", optional(combo.source_hash.map(|h| h.to_string()))));
            lines.push(("mint", combo.mint_value().to_string()));
        }

        Self { lines }
    }
}

impl fmt::Display for TxReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, value) in &self.lines {
            writeln!(f, "{key}: {value}")?;
        }
        Ok(())
    }
}
