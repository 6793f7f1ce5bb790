//! Pull trades and dividends from an account and turn them into raw records.

use r2q_core::{RawDividendRecord, RawTradeRecord};
use std::collections::HashMap;
use tracing::{debug, info};

use crate::client::AccountApi;
use crate::error::ApiError;

/// Reads raw records from an already logged-in account.
///
/// Instrument URLs are resolved to tickers once each; the cache is shared by
/// `trades()` and `dividends()`.
pub struct Fetcher<'a, A: AccountApi + ?Sized> {
    api: &'a A,
    tickers: HashMap<String, String>,
}

impl<'a, A: AccountApi + ?Sized> Fetcher<'a, A> {
    pub fn new(api: &'a A) -> Self {
        Self {
            api,
            tickers: HashMap::new(),
        }
    }

    fn ticker(&mut self, instrument: &str) -> Result<String, ApiError> {
        if let Some(symbol) = self.tickers.get(instrument) {
            return Ok(symbol.clone());
        }
        let symbol = self.api.resolve_instrument(instrument)?.symbol;
        debug!(instrument, %symbol, "resolved ticker");
        self.tickers.insert(instrument.to_string(), symbol.clone());
        Ok(symbol)
    }

    /// One record per order that has at least one execution, built from the first fill.
    pub fn trades(&mut self) -> Result<Vec<RawTradeRecord>, ApiError> {
        let orders = self.api.order_history()?;
        let total = orders.len();
        let mut out = Vec::new();

        for order in orders {
            let Some(first) = order.executions.into_iter().next() else {
                continue;
            };
            let ticker = self.ticker(&order.instrument)?;
            out.push(RawTradeRecord::new(
                ticker,
                order.side,
                first.quantity,
                first.price,
                first.timestamp,
            ));
        }

        info!(orders = total, trades = out.len(), "fetched order history");
        Ok(out)
    }

    /// Settled dividends only (non-null `paid_at`).
    pub fn dividends(&mut self) -> Result<Vec<RawDividendRecord>, ApiError> {
        let dividends = self.api.dividends()?;
        let total = dividends.len();
        let mut out = Vec::new();

        for dividend in dividends {
            if dividend.paid_at.is_none() {
                continue;
            }
            let ticker = self.ticker(&dividend.instrument)?;
            out.push(RawDividendRecord::new(
                ticker,
                dividend.amount,
                dividend.payable_date,
                dividend.paid_at,
            ));
        }

        info!(dividends = total, settled = out.len(), "fetched dividends");
        Ok(out)
    }
}
