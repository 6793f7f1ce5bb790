//! Map raw trades and dividends onto Mint rows.

use r2q_core::{MalformedDateError, RawDividendRecord, RawTradeRecord, iso_to_mint};

use crate::row::{OutputRow, TransactionType, mint_amount};

pub const DIVIDEND_DESCRIPTION: &str = "Investments:Dividend Income";

impl OutputRow {
    pub fn from_trade(trade: &RawTradeRecord) -> Result<Self, MalformedDateError> {
        Ok(Self {
            date: iso_to_mint(&trade.executed_date)?,
            description_original: trade.ticker.clone(),
            description: format!("Investments:{}", trade.side),
            amount: mint_amount(trade.cost()),
            transaction_type: TransactionType::Credit,
            category: Some(trade.side.to_string()),
            account_name: None,
            labels: Some(trade.quantity.to_string()),
            notes: Some(trade.price.to_string()),
        })
    }

    pub fn from_dividend(dividend: &RawDividendRecord) -> Result<Self, MalformedDateError> {
        Ok(Self {
            date: iso_to_mint(&dividend.payable_date)?,
            description_original: dividend.ticker.clone(),
            description: DIVIDEND_DESCRIPTION.to_string(),
            amount: mint_amount(dividend.amount),
            transaction_type: TransactionType::Credit,
            category: None,
            account_name: None,
            labels: None,
            notes: None,
        })
    }
}

/// Trades first, then settled dividends, each in source order.
///
/// A single malformed date fails the whole batch.
pub fn normalize(
    trades: &[RawTradeRecord],
    dividends: &[RawDividendRecord],
) -> Result<Vec<OutputRow>, MalformedDateError> {
    let mut rows = Vec::with_capacity(trades.len() + dividends.len());
    for trade in trades {
        rows.push(OutputRow::from_trade(trade)?);
    }
    for dividend in dividends.iter().filter(|d| d.is_settled()) {
        rows.push(OutputRow::from_dividend(dividend)?);
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use r2q_core::Side;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn aapl_buy() -> RawTradeRecord {
        RawTradeRecord::new("AAPL", Side::Buy, dec("10"), dec("150.005"), "2020-01-15T00:00:00")
    }

    fn msft_dividend() -> RawDividendRecord {
        RawDividendRecord::new(
            "MSFT",
            dec("5.04"),
            "2017-05-18",
            Some("2017-05-18T00:00:00".into()),
        )
    }

    #[test]
    fn test_trade_row() {
        let row = OutputRow::from_trade(&aapl_buy()).unwrap();
        assert_eq!(row.date, "01/15/2020");
        assert_eq!(row.description_original, "AAPL");
        assert_eq!(row.description, "Investments:buy");
        assert_eq!(row.amount, dec("1500.05"));
        assert_eq!(row.transaction_type, TransactionType::Credit);
        assert_eq!(row.category.as_deref(), Some("buy"));
        assert_eq!(row.account_name, None);
        assert_eq!(row.labels.as_deref(), Some("10"));
        assert_eq!(row.notes.as_deref(), Some("150.005"));
    }

    #[test]
    fn test_trade_amount_has_no_float_noise() {
        let trade = RawTradeRecord::new("X", Side::Sell, dec("2"), dec("12.345"), "2019-02-01");
        let row = OutputRow::from_trade(&trade).unwrap();
        assert_eq!(row.amount.to_string(), "24.69");
        assert_eq!(row.description, "Investments:sell");
    }

    #[test]
    fn test_dividend_row() {
        let row = OutputRow::from_dividend(&msft_dividend()).unwrap();
        assert_eq!(row.date, "05/18/2017");
        assert_eq!(row.description_original, "MSFT");
        assert_eq!(row.description, "Investments:Dividend Income");
        assert_eq!(row.amount.to_string(), "5.04");
        assert_eq!(row.category, None);
        assert_eq!(row.labels, None);
        assert_eq!(row.notes, None);
    }

    #[test]
    fn test_trades_come_before_dividends() {
        let later = RawTradeRecord::new("TSLA", Side::Buy, dec("1"), dec("300"), "2021-06-01");
        let rows = normalize(&[aapl_buy(), later], &[msft_dividend()]).unwrap();
        let tickers: Vec<_> = rows.iter().map(|r| r.description_original.as_str()).collect();
        assert_eq!(tickers, ["AAPL", "TSLA", "MSFT"]);
    }

    #[test]
    fn test_unsettled_dividends_never_emit() {
        let pending = RawDividendRecord::new("KO", dec("0.39"), "2018-04-02", None);
        let rows = normalize(&[], &[pending, msft_dividend()]).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].description_original, "MSFT");
    }

    #[test]
    fn test_malformed_date_fails_batch() {
        let bad = RawTradeRecord::new("AAPL", Side::Buy, dec("1"), dec("1"), "15/01/2020");
        let err = normalize(&[aapl_buy(), bad], &[]).unwrap_err();
        assert_eq!(err.input, "15/01/2020");
    }
}
