//! Yahoo Finance chart-API integration for daily closing prices.
//!
//! One GET per instrument against the v8 chart endpoint; no API key is
//! required. The response nests closes under `chart.result[0].indicators
//! .quote[0].close`, with `null` entries on non-trading or unpriced days.

use chrono::{DateTime, NaiveDate, NaiveTime};
use reqwest::blocking::Client;
use serde::Deserialize;

use crate::data::{FetchError, FetchOutcome, PriceSource};
use crate::domain::{DateRange, PriceSeries};
use crate::error::AppError;

const BASE_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";

// The endpoint rejects requests without a browser-ish user agent.
const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) fin-compare/0.1";

pub struct MarketClient {
    client: Client,
    base_url: String,
}

impl MarketClient {
    pub fn new() -> Result<Self, AppError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| AppError::new(2, format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            base_url: BASE_URL.to_string(),
        })
    }

    fn chart_url(&self, symbol: &str) -> String {
        format!("{}/{symbol}", self.base_url)
    }
}

impl PriceSource for MarketClient {
    fn fetch_closes(&self, symbol: &str, range: &DateRange) -> Result<FetchOutcome, FetchError> {
        // period2 is exclusive on the source side; push it one day past the
        // inclusive range end.
        let period1 = unix_midnight(range.start());
        let period2 = unix_midnight(
            range
                .end()
                .checked_add_days(chrono::Days::new(1))
                .unwrap_or(range.end()),
        );

        let resp = self
            .client
            .get(self.chart_url(symbol))
            .query(&[
                ("period1", period1.to_string().as_str()),
                ("period2", period2.to_string().as_str()),
                ("interval", "1d"),
                ("events", "history"),
            ])
            .send()
            .map_err(|e| FetchError::Http(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(FetchError::Http(format!("status {}", resp.status())));
        }

        let body: ChartResponse = resp.json().map_err(|e| FetchError::Decode(e.to_string()))?;
        extract_closes(symbol, body, range)
    }
}

fn unix_midnight(date: NaiveDate) -> i64 {
    date.and_time(NaiveTime::MIN).and_utc().timestamp()
}

/// Turn a decoded chart payload into the three-way fetch outcome.
fn extract_closes(
    symbol: &str,
    body: ChartResponse,
    range: &DateRange,
) -> Result<FetchOutcome, FetchError> {
    if let Some(err) = body.chart.error {
        return Err(FetchError::Api(format!("{}: {}", err.code, err.description)));
    }

    let Some(result) = body.chart.result.and_then(|mut r| {
        if r.is_empty() { None } else { Some(r.remove(0)) }
    }) else {
        return Ok(FetchOutcome::NoData);
    };

    let timestamps = result.timestamp.unwrap_or_default();
    let closes = result
        .indicators
        .quote
        .into_iter()
        .next()
        .and_then(|q| q.close)
        .unwrap_or_default();

    let mut points: Vec<(NaiveDate, f64)> = Vec::with_capacity(timestamps.len());
    for (ts, close) in timestamps.into_iter().zip(closes) {
        let Some(value) = close.filter(|v| v.is_finite()) else {
            continue;
        };
        let Some(date) = DateTime::from_timestamp(ts, 0).map(|dt| dt.date_naive()) else {
            continue;
        };
        // The source occasionally pads a bar just outside the window.
        if !range.contains(date) {
            continue;
        }
        points.push((date, value));
    }

    // Keep dates strictly increasing; on duplicate dates the last bar wins.
    points.sort_by_key(|&(d, _)| d);
    points.dedup_by_key(|&mut (d, _)| d);

    if points.is_empty() {
        return Ok(FetchOutcome::NoData);
    }

    Ok(FetchOutcome::Series(PriceSeries {
        symbol: symbol.to_string(),
        points,
    }))
}

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    result: Option<Vec<ChartResult>>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<Quote>,
}

#[derive(Debug, Deserialize)]
struct Quote {
    close: Option<Vec<Option<f64>>>,
}
