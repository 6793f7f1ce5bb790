//! The unified Mint transaction row

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Mint "Transaction Type" column. The export only ever writes credits.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum TransactionType {
    #[default]
    #[serde(rename = "credit")]
    Credit,
}

/// One row of the Mint CSV. Field order is column order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutputRow {
    /// MM/DD/YYYY
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Description Original")]
    pub description_original: String,
    #[serde(rename = "Description")]
    pub description: String,
    /// Non-negative, exactly two decimal places
    #[serde(rename = "Amount")]
    pub amount: Decimal,
    #[serde(rename = "Transaction Type")]
    pub transaction_type: TransactionType,
    #[serde(rename = "Category")]
    pub category: Option<String>,
    #[serde(rename = "Account Name")]
    pub account_name: Option<String>,
    #[serde(rename = "Labels")]
    pub labels: Option<String>,
    #[serde(rename = "Notes")]
    pub notes: Option<String>,
}

impl OutputRow {
    pub const COLUMN_COUNT: usize = 9;
}

/// Round half away from zero to cents, drop the sign, always keep two decimals.
pub fn mint_amount(value: Decimal) -> Decimal {
    let mut rounded = value
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .abs();
    rounded.rescale(2);
    rounded
}
