//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during a comparison run
//! - exported to CSV
//! - rendered by either the CLI or the TUI front-end

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Earliest selectable start date for a comparison.
pub const DATE_FLOOR: NaiveDate = match NaiveDate::from_ymd_opt(2000, 1, 1) {
    Some(d) => d,
    None => panic!("invalid date floor"),
};

/// Latest selectable end date for a comparison.
pub const DATE_CEILING: NaiveDate = match NaiveDate::from_ymd_opt(2030, 12, 31) {
    Some(d) => d,
    None => panic!("invalid date ceiling"),
};

/// An inclusive calendar date range with `start <= end`, clamped to the
/// absolute floor/ceiling above.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Build a range from two dates, applying the clamping rules:
    /// start not before [`DATE_FLOOR`], end not after [`DATE_CEILING`],
    /// and `start <= end` (the end is pulled up to the start if needed).
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        let start = start.clamp(DATE_FLOOR, DATE_CEILING);
        let end = end.clamp(start, DATE_CEILING);
        Self { start, end }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Closed-interval containment test.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Raw daily closing prices for one instrument, dates strictly increasing.
///
/// May be empty: an empty series is the "no data" case and must be filtered
/// out before normalization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceSeries {
    pub symbol: String,
    pub points: Vec<(NaiveDate, f64)>,
}

impl PriceSeries {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// First closing price, if any.
    pub fn first_price(&self) -> Option<f64> {
        self.points.first().map(|&(_, p)| p)
    }
}

/// A price series rescaled so its first value is exactly 100.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizedSeries {
    pub points: Vec<(NaiveDate, f64)>,
}

impl NormalizedSeries {
    pub fn first_value(&self) -> Option<f64> {
        self.points.first().map(|&(_, v)| v)
    }

    pub fn last_value(&self) -> Option<f64> {
        self.points.last().map(|&(_, v)| v)
    }

    /// Value at `date`, if the series has an observation for it.
    ///
    /// Points are date-sorted, so a binary search suffices.
    pub fn value_on(&self, date: NaiveDate) -> Option<f64> {
        self.points
            .binary_search_by_key(&date, |&(d, _)| d)
            .ok()
            .map(|i| self.points[i].1)
    }

    pub fn max_value(&self) -> Option<f64> {
        self.points
            .iter()
            .map(|&(_, v)| v)
            .fold(None, |acc, v| Some(acc.map_or(v, |m: f64| m.max(v))))
    }
}

/// One named column of the comparison.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableEntry {
    pub display_name: String,
    pub series: NormalizedSeries,
}

/// The comparison result: display name -> normalized series, in selection
/// (insertion) order.
///
/// Invariant: every entry has non-empty data. Instruments that failed to
/// fetch are skipped upstream, never zero-filled.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComparisonTable {
    entries: Vec<TableEntry>,
}

impl ComparisonTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column. Empty series are rejected by the caller, not here;
    /// a `debug_assert` documents the invariant.
    pub fn insert(&mut self, display_name: impl Into<String>, series: NormalizedSeries) {
        debug_assert!(!series.points.is_empty(), "empty series in ComparisonTable");
        self.entries.push(TableEntry {
            display_name: display_name.into(),
            series,
        });
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn entries(&self) -> &[TableEntry] {
        &self.entries
    }

    /// Maximum normalized value across all columns. `None` when the table is
    /// empty (overlay placement is undefined in that case).
    pub fn max_value(&self) -> Option<f64> {
        self.entries
            .iter()
            .filter_map(|e| e.series.max_value())
            .fold(None, |acc, v| Some(acc.map_or(v, |m: f64| m.max(v))))
    }

    /// Sorted union of all observation dates, used as the export row index.
    pub fn date_index(&self) -> Vec<NaiveDate> {
        let mut dates: Vec<NaiveDate> = self
            .entries
            .iter()
            .flat_map(|e| e.series.points.iter().map(|&(d, _)| d))
            .collect();
        dates.sort_unstable();
        dates.dedup();
        dates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn date_range_clamps_to_floor_and_ceiling() {
        let r = DateRange::new(d(1990, 1, 1), d(2040, 1, 1));
        assert_eq!(r.start(), DATE_FLOOR);
        assert_eq!(r.end(), DATE_CEILING);
    }

    #[test]
    fn date_range_orders_endpoints() {
        let r = DateRange::new(d(2020, 6, 1), d(2020, 1, 1));
        assert_eq!(r.start(), d(2020, 6, 1));
        assert_eq!(r.end(), d(2020, 6, 1));
        assert!(r.start() <= r.end());
    }

    #[test]
    fn date_range_contains_is_closed() {
        let r = DateRange::new(d(2020, 1, 1), d(2020, 12, 31));
        assert!(r.contains(d(2020, 1, 1)));
        assert!(r.contains(d(2020, 12, 31)));
        assert!(!r.contains(d(2019, 12, 31)));
        assert!(!r.contains(d(2021, 1, 1)));
    }

    #[test]
    fn table_preserves_insertion_order_and_max() {
        let mut table = ComparisonTable::new();
        table.insert(
            "Gold",
            NormalizedSeries {
                points: vec![(d(2020, 1, 1), 100.0), (d(2020, 1, 2), 140.0)],
            },
        );
        table.insert(
            "Silver",
            NormalizedSeries {
                points: vec![(d(2020, 1, 1), 100.0), (d(2020, 1, 3), 90.0)],
            },
        );

        let names: Vec<&str> = table
            .entries()
            .iter()
            .map(|e| e.display_name.as_str())
            .collect();
        assert_eq!(names, vec!["Gold", "Silver"]);
        assert_eq!(table.max_value(), Some(140.0));
        assert_eq!(
            table.date_index(),
            vec![d(2020, 1, 1), d(2020, 1, 2), d(2020, 1, 3)]
        );
    }

    #[test]
    fn value_on_finds_exact_dates_only() {
        let s = NormalizedSeries {
            points: vec![(d(2020, 1, 1), 100.0), (d(2020, 1, 3), 110.0)],
        };
        assert_eq!(s.value_on(d(2020, 1, 3)), Some(110.0));
        assert_eq!(s.value_on(d(2020, 1, 2)), None);
    }
}
