//! Wire types for the Robinhood REST endpoints this tool reads.
//!
//! Only the fields the exporter needs are modelled; everything else in the
//! payloads is ignored by serde.

use r2q_core::Side;
use rust_decimal::Decimal;
use serde::Deserialize;

/// Paged list envelope used by `/orders/` and `/dividends/`
#[derive(Debug, Clone, Deserialize)]
pub struct Page<T> {
    pub results: Vec<T>,
    #[serde(default)]
    pub next: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Order {
    /// Instrument URL, resolved to a symbol with a second request
    pub instrument: String,
    pub side: Side,
    #[serde(default)]
    pub executions: Vec<Execution>,
}

/// A single fill of an order
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Execution {
    pub quantity: Decimal,
    pub price: Decimal,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Dividend {
    pub instrument: String,
    pub amount: Decimal,
    pub payable_date: String,
    #[serde(default)]
    pub paid_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Instrument {
    pub symbol: String,
}
