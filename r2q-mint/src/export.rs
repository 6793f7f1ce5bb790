//! Normalize -> filter -> write, in one call.

use chrono::NaiveDate;
use r2q_core::{MalformedDateError, RawDividendRecord, RawTradeRecord};
use std::path::PathBuf;
use thiserror::Error;
use tracing::info;

use crate::filter::filter_after;
use crate::normalize::normalize;
use crate::writer::MintCsvWriter;

pub const DEFAULT_OUTPUT: &str = "robinhood_output.csv";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    MalformedDate(#[from] MalformedDateError),

    #[error("output path {} must end with the {expected} extension", path.display())]
    OutputPath { path: PathBuf, expected: String },

    #[error("layout header {found:?} does not match row columns {expected:?}")]
    Layout {
        found: Vec<String>,
        expected: Vec<String>,
    },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// What to export and where.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportOptions {
    /// Include executed trades (default: true)
    pub include_trades: bool,
    /// Include settled dividends (default: true)
    pub include_dividends: bool,
    /// Only rows dated strictly after this day (default: none)
    pub cutoff: Option<NaiveDate>,
    /// Destination file (default: robinhood_output.csv)
    pub output: PathBuf,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            include_trades: true,
            include_dividends: true,
            cutoff: None,
            output: PathBuf::from(DEFAULT_OUTPUT),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub normalized: usize,
    pub written: usize,
    pub path: PathBuf,
}

/// Run the export over already-fetched records.
///
/// Record kinds switched off in `options` are ignored even if passed in.
/// Nothing is written unless every row converts cleanly.
pub fn export(
    trades: &[RawTradeRecord],
    dividends: &[RawDividendRecord],
    options: &ExportOptions,
    writer: &MintCsvWriter,
) -> Result<ExportSummary, ExportError> {
    writer.check_path(&options.output)?;

    let trades: &[RawTradeRecord] = if options.include_trades { trades } else { &[] };
    let dividends: &[RawDividendRecord] = if options.include_dividends { dividends } else { &[] };

    let rows = normalize(trades, dividends)?;
    let normalized = rows.len();

    let rows = match options.cutoff {
        Some(cutoff) => filter_after(rows, cutoff)?,
        None => rows,
    };
    info!(normalized, kept = rows.len(), "normalized rows");

    let path = writer.write(&rows, &options.output)?;
    Ok(ExportSummary {
        normalized,
        written: rows.len(),
        path,
    })
}
