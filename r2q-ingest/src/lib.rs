//! r2q-ingest: Robinhood account access and raw trade/dividend extraction.

pub mod client;
pub mod error;
pub mod fetcher;
pub mod types;

pub use client::{AccountApi, Credentials, RobinhoodClient, DEFAULT_BASE_URL, DEFAULT_CLIENT_ID};
pub use error::ApiError;
pub use fetcher::Fetcher;
pub use types::{Dividend, Execution, Instrument, Order, Page};
