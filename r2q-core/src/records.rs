//! Raw brokerage records, as pulled from the account API before any Mint formatting

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of a trade order
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Side {
    #[serde(rename = "buy")]
    Buy,
    #[serde(rename = "sell")]
    Sell,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Buy => "buy",
            Side::Sell => "sell",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One executed trade: the first fill of an order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RawTradeRecord {
    /// Resolved ticker symbol (AAPL, MSFT, ...)
    pub ticker: String,
    pub side: Side,
    pub quantity: Decimal,
    pub price: Decimal,
    /// Execution timestamp as received: YYYY-MM-DD, optionally followed by a `T...` time part
    pub executed_date: String,
}

impl RawTradeRecord {
    pub fn new(
        ticker: impl Into<String>,
        side: Side,
        quantity: Decimal,
        price: Decimal,
        executed_date: impl Into<String>,
    ) -> Self {
        Self {
            ticker: ticker.into(),
            side,
            quantity,
            price,
            executed_date: executed_date.into(),
        }
    }

    /// Total cost of the fill (price × quantity), unrounded
    pub fn cost(&self) -> Decimal {
        self.price * self.quantity
    }
}

/// A dividend payment record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RawDividendRecord {
    pub ticker: String,
    pub amount: Decimal,
    /// Payable date (YYYY-MM-DD)
    pub payable_date: String,
    /// Set once the dividend has actually been paid out
    pub paid_at: Option<String>,
}

impl RawDividendRecord {
    pub fn new(
        ticker: impl Into<String>,
        amount: Decimal,
        payable_date: impl Into<String>,
        paid_at: Option<String>,
    ) -> Self {
        Self {
            ticker: ticker.into(),
            amount,
            payable_date: payable_date.into(),
            paid_at,
        }
    }

    /// Only settled dividends are eligible for export
    pub fn is_settled(&self) -> bool {
        self.paid_at.is_some()
    }
}
