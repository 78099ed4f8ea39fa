//! Base-100 normalization.
//!
//! Rescaling each series so its first observation is 100 puts assets with
//! very different price scales (an ounce of gold vs. EUR/USD) on one axis
//! while preserving relative movement.

use crate::domain::{NormalizedSeries, PriceSeries};

/// Rescale `series` so its first value is exactly 100.
///
/// Preconditions (enforced by the fetch pipeline, which classifies both as
/// "no data"): the series is non-empty and its first price is non-zero.
pub fn normalize_base100(series: &PriceSeries) -> NormalizedSeries {
    debug_assert!(!series.points.is_empty(), "normalize called on empty series");
    let first = series.points[0].1;
    debug_assert!(first != 0.0, "normalize called with zero first price");

    let points = series
        .points
        .iter()
        .map(|&(date, price)| (date, price / first * 100.0))
        .collect();

    NormalizedSeries { points }
}
