//! r2q-core: brokerage record types and date helpers shared by the fetcher and the Mint exporter

pub mod dates;
pub mod records;

pub use dates::{MalformedDateError, iso_to_mint, mint_to_iso, parse_mint_date};
pub use records::{RawDividendRecord, RawTradeRecord, Side};
