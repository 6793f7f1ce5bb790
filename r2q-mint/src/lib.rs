//! r2q-mint: Mint-format rows, the normalizer, date filter, CSV writer and the export pipeline

pub mod export;
pub mod filter;
pub mod normalize;
pub mod row;
pub mod writer;

pub use export::{ExportError, ExportOptions, ExportSummary, export};
pub use filter::filter_after;
pub use normalize::normalize;
pub use row::{OutputRow, TransactionType};
pub use writer::{CsvLayout, MINT_HEADERS, MintCsvWriter};
