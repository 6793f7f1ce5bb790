//! Cutoff-date filter over Mint rows

use chrono::NaiveDate;
use r2q_core::{MalformedDateError, parse_mint_date};

use crate::row::OutputRow;

/// Keep rows dated strictly after `cutoff`, preserving order.
pub fn filter_after(
    rows: Vec<OutputRow>,
    cutoff: NaiveDate,
) -> Result<Vec<OutputRow>, MalformedDateError> {
    let mut kept = Vec::with_capacity(rows.len());
    for row in rows {
        if parse_mint_date(&row.date)? > cutoff {
            kept.push(row);
        }
    }
    Ok(kept)
}
