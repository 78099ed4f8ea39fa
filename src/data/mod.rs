//! Market-data access.
//!
//! The remote source is an external collaborator: it either returns rows,
//! returns nothing usable, or fails. That three-way outcome is the contract
//! this module exposes, so callers can skip an instrument without aborting
//! the rest of the run.

use crate::domain::{DateRange, PriceSeries};

pub mod yahoo;

pub use yahoo::MarketClient;

/// Successful call outcome: either a non-empty series or "no data".
#[derive(Debug, Clone)]
pub enum FetchOutcome {
    Series(PriceSeries),
    NoData,
}

/// A failed source call. Recoverable: the instrument is skipped, the error
/// text is surfaced to the user.
#[derive(Debug, Clone)]
pub enum FetchError {
    /// Transport-level failure (connect, TLS, timeout, non-2xx status).
    Http(String),
    /// The response body could not be decoded.
    Decode(String),
    /// The source answered with an explicit error payload.
    Api(String),
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::Http(msg) => write!(f, "request failed: {msg}"),
            FetchError::Decode(msg) => write!(f, "bad response: {msg}"),
            FetchError::Api(msg) => write!(f, "source error: {msg}"),
        }
    }
}

impl std::error::Error for FetchError {}

/// Why an instrument was left out of the comparison.
#[derive(Debug, Clone)]
pub struct SkipReason {
    pub symbol: String,
    pub detail: SkipDetail,
}

#[derive(Debug, Clone)]
pub enum SkipDetail {
    /// The source returned no usable closing prices for the range.
    NoData,
    /// The source call errored; carries the underlying error text.
    FetchFailed(String),
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.detail {
            SkipDetail::NoData => {
                write!(f, "No data available for {} in the selected period.", self.symbol)
            }
            SkipDetail::FetchFailed(err) => {
                write!(f, "Failed to load data for {}: {err}", self.symbol)
            }
        }
    }
}

/// Seam for the external time-series source.
///
/// The production implementation is [`MarketClient`]; tests substitute a
/// canned source to exercise the skip/accumulate pipeline offline.
pub trait PriceSource {
    /// Fetch daily closes for `symbol` over the inclusive `range`.
    fn fetch_closes(&self, symbol: &str, range: &DateRange) -> Result<FetchOutcome, FetchError>;
}
