//! Module for the CLI.

use crate::report::TxReport;
use alloy_primitives::{hex, U256};
use anyhow::{anyhow, Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use kona_tx_data::{ComboTx, TxData, TxEnvelope};
use std::path::PathBuf;
use tracing::Level;

/// Main CLI
#[derive(Parser, Clone, Debug)]
#[command(author, version, about, long_about = None)]
pub(crate) struct Cli {
    /// Verbosity level (0-4)
    #[arg(long, short, help = "Verbosity level (0-4)", action = ArgAction::Count)]
    pub v: u8,
    /// The subcommand to run.
    #[clap(subcommand)]
    pub subcommand: TxInspectSubcommand,
}

/// Subcommands for the CLI.
#[derive(Debug, Clone, Subcommand)]
pub(crate) enum TxInspectSubcommand {
    /// Decode an EIP-2718 encoded transaction.
    Decode(DecodeCfg),
    /// Load a transaction record imported from an external source.
    Import(ImportCfg),
}

/// Configuration for the `decode` subcommand.
#[derive(Debug, Clone, Args)]
pub(crate) struct DecodeCfg {
    /// Hex encoded transaction, with or without a `0x` prefix.
    #[clap(env = "TXINSPECT_RAW_TX")]
    pub raw: String,
    /// Base fee used to compute the effective gas price.
    #[clap(long, env = "TXINSPECT_BASE_FEE")]
    pub base_fee: Option<u64>,
}

/// Configuration for the `import` subcommand.
#[derive(Debug, Clone, Args)]
pub(crate) struct ImportCfg {
    /// Path to the JSON transaction record.
    #[clap(env = "TXINSPECT_RECORD")]
    pub path: PathBuf,
    /// Base fee used to compute the effective gas price.
    #[clap(long, env = "TXINSPECT_BASE_FEE")]
    pub base_fee: Option<u64>,
    /// Also print the deep copy of the record, as handed to pooling and execution.
    #[clap(long, help = "Print the deep copy of the imported record")]
    pub show_copy: bool,
}

impl Cli {
    /// Initializes telemetry for the application.
    pub(crate) fn init_telemetry(self) -> Result<Self> {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(match self.v {
                0 => Level::ERROR,
                1 => Level::WARN,
                2 => Level::INFO,
                3 => Level::DEBUG,
                _ => Level::TRACE,
            })
            .finish();
        tracing::subscriber::set_global_default(subscriber).map_err(|e| anyhow!(e))?;
        Ok(self)
    }

    /// Parse the CLI arguments and run the command
    pub(crate) fn run(&self) -> Result<()> {
        let reports = match &self.subcommand {
            TxInspectSubcommand::Decode(cfg) => decode(cfg)?,
            TxInspectSubcommand::Import(cfg) => import(cfg)?,
        };
        for report in reports {
            println!("{report}");
        }
        Ok(())
    }
}

/// Decodes the raw transaction in `cfg` into a report.
pub(crate) fn decode(cfg: &DecodeCfg) -> Result<Vec<TxReport>> {
    let bytes = hex::decode(cfg.raw.trim()).context("raw transaction is not valid hex")?;
    let mut buf = bytes.as_slice();
    let tx = TxEnvelope::decode_2718(&mut buf)?;
    if !buf.is_empty() {
        tracing::warn!(target: "txinspect", "{} trailing bytes after transaction", buf.len());
    }
    tracing::info!(target: "txinspect", "decoded {} transaction", tx.tx_type());

    Ok(vec![TxReport::new(&tx, cfg.base_fee.map(U256::from))])
}

/// Loads the imported record in `cfg` into a report.
pub(crate) fn import(cfg: &ImportCfg) -> Result<Vec<TxReport>> {
    let json = std::fs::read_to_string(&cfg.path)
        .with_context(|| format!("failed to read {}", cfg.path.display()))?;
    let record = parse_record(&json)?;
    if !record.is_attached() {
        tracing::warn!(target: "txinspect", "imported record is not attached to a block");
    }

    let base_fee = cfg.base_fee.map(U256::from);
    let tx = TxEnvelope::from(record);
    let mut reports = vec![TxReport::new(&tx, base_fee)];
    if cfg.show_copy {
        reports.push(TxReport::new(&tx.deep_copy(), base_fee));
    }
    Ok(reports)
}

/// Parses an imported transaction record from JSON.
pub(crate) fn parse_record(json: &str) -> Result<ComboTx> {
    let record: ComboTx = serde_json::from_str(json).context("invalid transaction record")?;
    tracing::debug!(
        target: "txinspect",
        "imported record at block {} index {}",
        record.block_number,
        record.transaction_index
    );
    Ok(record)
}

#[cfg(test)]
mod test {
    use super::*;

    const EIP155_EXAMPLE: &str = "0xf86c098504a817c800825208943535353535353535353535353535353535353535880de0b6b3a76400008025a028ef61340bd939bc2195fe537567866003e1a15d3c71ff63e1590620aa636276a067cbe9d8997f761aecb703304b3800ccf555c9f3dc64214b297fb1966a3b6d83";

    #[test]
    fn test_cli_parses_decode() {
        let cli = Cli::try_parse_from(["txinspect", "-vv", "decode", "0x00", "--base-fee", "7"])
            .unwrap();
        assert_eq!(cli.v, 2);
        let TxInspectSubcommand::Decode(cfg) = cli.subcommand else {
            panic!("expected decode subcommand");
        };
        assert_eq!(cfg.raw, "0x00");
        assert_eq!(cfg.base_fee, Some(7));
    }

    #[test]
    fn test_cli_parses_import() {
        let cli =
            Cli::try_parse_from(["txinspect", "import", "record.json", "--show-copy"]).unwrap();
        let TxInspectSubcommand::Import(cfg) = cli.subcommand else {
            panic!("expected import subcommand");
        };
        assert_eq!(cfg.path, PathBuf::from("record.json"));
        assert!(cfg.show_copy);
    }

    #[test]
    fn test_decode_eip155_example() {
        let cfg = DecodeCfg { raw: EIP155_EXAMPLE.to_string(), base_fee: None };
        let reports = decode(&cfg).unwrap();
        let report = reports[0].to_string();
        assert!(report.contains("type: legacy"));
        assert!(report.contains("chain id: 1"));
        assert!(report.to_lowercase().contains("0x9d8a62f656a8d1615c1294fd71e9cfb3e4855a4f"));
    }

    #[test]
    fn test_decode_rejects_combo_type() {
        let cfg = DecodeCfg { raw: "0x7fc0".to_string(), base_fee: None };
        assert!(decode(&cfg).is_err());
    }

    #[test]
    fn test_parse_record() {
        let record = parse_record(
            r#"{
                "blockNumber": "0x10",
                "transactionIndex": "0x2",
                "nonce": "0x5",
                "gas": "0x5208",
                "gasPrice": "0xa",
                "value": "0x64",
                "v": "0x25",
                "mint": "0x1"
            }"#,
        )
        .unwrap();
        assert_eq!(record.block_number, 16);
        assert_eq!(record.transaction_index, 2);

        let report = TxReport::new(&TxEnvelope::from(record), None).to_string();
        assert!(report.contains("type: combo"));
        assert!(report.contains("mint: 1"));
    }

    #[test]
    fn test_parse_record_rejects_garbage() {
        assert!(parse_record("not json").is_err());
    }
}
