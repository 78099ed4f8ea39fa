//! Shared comparison pipeline used by both CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! resolve selection -> fetch each instrument -> normalize -> overlays ->
//! returns. The CLI and the TUI then focus on presentation (printing vs
//! widgets).
//!
//! Fetch failures never cross the per-instrument boundary: each instrument
//! either contributes a table column or a skip reason, and the run always
//! completes.

use crate::analysis::{normalize_base100, total_returns};
use crate::data::{FetchError, FetchOutcome, PriceSource, SkipDetail, SkipReason};
use crate::domain::{refdata, ComparisonTable, DateRange};
use crate::error::AppError;
use crate::overlay::{plan_overlays, OverlayPlan};

/// A resolved selection entry: symbol plus the name shown on the chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedAsset {
    pub symbol: String,
    pub display_name: String,
}

impl SelectedAsset {
    /// Resolve a symbol, falling back to the symbol itself when it has no
    /// catalog entry.
    pub fn from_symbol(symbol: &str) -> Self {
        Self {
            symbol: symbol.to_string(),
            display_name: refdata::display_name_for(symbol)
                .map(str::to_string)
                .unwrap_or_else(|| symbol.to_string()),
        }
    }
}

/// Resolve `--asset` tokens (symbol or display name) and `--category` names
/// into a deduplicated selection, preserving first-seen order.
///
/// A symbol is never fetched twice even if selected through both a category
/// and an explicit token.
pub fn resolve_selection(assets: &[String], categories: &[String]) -> Result<Vec<SelectedAsset>, AppError> {
    let mut out: Vec<SelectedAsset> = Vec::new();
    let mut push = |sel: SelectedAsset| {
        if !out.iter().any(|s| s.symbol == sel.symbol) {
            out.push(sel);
        }
    };

    for name in categories {
        let category = refdata::find_category(name).ok_or_else(|| {
            AppError::new(2, format!("Unknown category '{name}'. See `fc assets` for the catalog."))
        })?;
        for asset in category.assets {
            push(SelectedAsset {
                symbol: asset.symbol.to_string(),
                display_name: asset.display_name.to_string(),
            });
        }
    }

    for token in assets {
        match refdata::find_asset(token) {
            Some(asset) => push(SelectedAsset {
                symbol: asset.symbol.to_string(),
                display_name: asset.display_name.to_string(),
            }),
            // Not in the catalog: treat the token as a raw ticker symbol.
            None => push(SelectedAsset::from_symbol(token)),
        }
    }

    Ok(out)
}

/// All computed outputs of a single comparison run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub range: DateRange,
    pub table: ComparisonTable,
    pub skips: Vec<SkipReason>,
    pub overlays: OverlayPlan,
    pub returns: Vec<(String, f64)>,
}

impl RunOutput {
    /// Every attempted instrument ended in no-data or a fetch failure.
    pub fn no_valid_selection(&self) -> bool {
        self.table.is_empty()
    }
}

/// Fetch and normalize each selected instrument, accumulating skips.
///
/// `status` receives one user-visible progress message per attempt.
pub fn build_table<S: PriceSource, F: FnMut(&str)>(
    source: &S,
    selection: &[SelectedAsset],
    range: &DateRange,
    mut status: F,
) -> (ComparisonTable, Vec<SkipReason>) {
    let mut table = ComparisonTable::new();
    let mut skips: Vec<SkipReason> = Vec::new();

    for asset in selection {
        status(&format!("Loading data for {}...", asset.symbol));

        let outcome = source.fetch_closes(&asset.symbol, range);
        match classify(&asset.symbol, outcome) {
            Ok(series) => {
                status(&format!(
                    "Loaded {} closes for {}.",
                    series.points.len(),
                    asset.symbol
                ));
                table.insert(&asset.display_name, normalize_base100(&series));
            }
            Err(skip) => {
                status(&skip.to_string());
                skips.push(skip);
            }
        }
    }

    (table, skips)
}

/// Collapse the three-way fetch outcome into series-or-skip.
///
/// A zero first price would make base-100 normalization divide by zero, so
/// it is classified as no-data here, at the fetch boundary.
fn classify(
    symbol: &str,
    outcome: Result<FetchOutcome, FetchError>,
) -> Result<crate::domain::PriceSeries, SkipReason> {
    match outcome {
        Ok(FetchOutcome::Series(series)) => {
            if series.first_price() == Some(0.0) {
                Err(SkipReason {
                    symbol: symbol.to_string(),
                    detail: SkipDetail::NoData,
                })
            } else {
                Ok(series)
            }
        }
        Ok(FetchOutcome::NoData) => Err(SkipReason {
            symbol: symbol.to_string(),
            detail: SkipDetail::NoData,
        }),
        Err(err) => Err(SkipReason {
            symbol: symbol.to_string(),
            detail: SkipDetail::FetchFailed(err.to_string()),
        }),
    }
}

/// Execute the full comparison pipeline.
pub fn run_compare<S: PriceSource, F: FnMut(&str)>(
    source: &S,
    selection: &[SelectedAsset],
    range: &DateRange,
    show_events: bool,
    status: F,
) -> RunOutput {
    let (table, skips) = build_table(source, selection, range, status);

    // Overlay placement needs the data maximum; skip planning entirely when
    // nothing was fetched.
    let overlays = match table.max_value() {
        Some(max_value) => plan_overlays(range, max_value, show_events),
        None => OverlayPlan::default(),
    };
    let returns = total_returns(&table);

    RunOutput {
        range: *range,
        table,
        skips,
        overlays,
        returns,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PriceSeries;
    use chrono::NaiveDate;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn sel(symbols: &[&str]) -> Vec<SelectedAsset> {
        symbols.iter().map(|s| SelectedAsset::from_symbol(s)).collect()
    }

    /// Canned source: per-symbol scripted outcomes.
    struct FakeSource;

    impl PriceSource for FakeSource {
        fn fetch_closes(&self, symbol: &str, _range: &DateRange) -> Result<FetchOutcome, FetchError> {
            match symbol {
                "UP" => Ok(FetchOutcome::Series(PriceSeries {
                    symbol: symbol.to_string(),
                    points: vec![(d(2020, 1, 1), 50.0), (d(2020, 1, 2), 60.0)],
                })),
                "FLAT" => Ok(FetchOutcome::Series(PriceSeries {
                    symbol: symbol.to_string(),
                    points: vec![(d(2020, 1, 1), 10.0)],
                })),
                "ZERO" => Ok(FetchOutcome::Series(PriceSeries {
                    symbol: symbol.to_string(),
                    points: vec![(d(2020, 1, 1), 0.0), (d(2020, 1, 2), 5.0)],
                })),
                "EMPTY" => Ok(FetchOutcome::NoData),
                other => Err(FetchError::Http(format!("no route to {other}"))),
            }
        }
    }

    fn range() -> DateRange {
        DateRange::new(d(2020, 1, 1), d(2020, 12, 31))
    }

    #[test]
    fn mixed_success_keeps_only_successful_instruments() {
        let run = run_compare(&FakeSource, &sel(&["UP", "EMPTY"]), &range(), true, |_| {});
        assert_eq!(run.table.len(), 1);
        assert_eq!(run.table.entries()[0].display_name, "UP");
        assert_eq!(run.skips.len(), 1);
        assert!(matches!(run.skips[0].detail, SkipDetail::NoData));
    }

    #[test]
    fn fetch_failure_is_isolated_and_carries_error_text() {
        let run = run_compare(&FakeSource, &sel(&["BOOM", "UP"]), &range(), true, |_| {});
        assert_eq!(run.table.len(), 1);
        match &run.skips[0].detail {
            SkipDetail::FetchFailed(msg) => assert!(msg.contains("no route to BOOM")),
            other => panic!("expected FetchFailed, got {other:?}"),
        }
    }

    #[test]
    fn empty_selection_is_no_valid_selection() {
        let run = run_compare(&FakeSource, &[], &range(), true, |_| {});
        assert!(run.no_valid_selection());
        assert!(run.overlays.bands.is_empty());
        assert!(run.returns.is_empty());
    }

    #[test]
    fn all_skipped_is_no_valid_selection() {
        let run = run_compare(&FakeSource, &sel(&["EMPTY", "BOOM"]), &range(), true, |_| {});
        assert!(run.no_valid_selection());
        assert_eq!(run.skips.len(), 2);
    }

    #[test]
    fn zero_first_price_is_treated_as_no_data() {
        let run = run_compare(&FakeSource, &sel(&["ZERO"]), &range(), true, |_| {});
        assert!(run.no_valid_selection());
        assert!(matches!(run.skips[0].detail, SkipDetail::NoData));
    }

    #[test]
    fn normalized_table_starts_at_100() {
        let run = run_compare(&FakeSource, &sel(&["UP"]), &range(), true, |_| {});
        let series = &run.table.entries()[0].series;
        assert_eq!(series.first_value(), Some(100.0));
        assert_eq!(run.returns, vec![("UP".to_string(), 20.0)]);
    }

    #[test]
    fn status_reports_one_message_per_attempt_at_least() {
        let mut messages = Vec::new();
        run_compare(&FakeSource, &sel(&["UP", "EMPTY"]), &range(), true, |m| {
            messages.push(m.to_string())
        });
        assert!(messages.iter().any(|m| m.contains("Loading data for UP")));
        assert!(messages.iter().any(|m| m.contains("No data available for EMPTY")));
    }

    #[test]
    fn resolve_selection_dedupes_across_category_and_token() {
        let selection = resolve_selection(
            &["GC=F".to_string(), "gold".to_string()],
            &["Precious metals".to_string()],
        )
        .unwrap();
        let symbols: Vec<&str> = selection.iter().map(|s| s.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["GC=F", "SI=F", "HG=F"]);
    }

    #[test]
    fn resolve_selection_falls_back_to_raw_symbol() {
        let selection = resolve_selection(&["^GSPC".to_string()], &[]).unwrap();
        assert_eq!(selection[0].display_name, "^GSPC");
    }

    #[test]
    fn resolve_selection_rejects_unknown_category() {
        assert!(resolve_selection(&[], &["Krypto".to_string()]).is_err());
    }
}
