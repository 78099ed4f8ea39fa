//! Chart assembly.
//!
//! The assembler is a pure transform: it merges the comparison table and the
//! overlay plan into one render-ready description. Both front-ends (the
//! Plotters TUI widget and the ASCII plot) consume the same `ChartSpec`, so
//! trace/band/marker semantics live here and the renderers stay dumb.
//!
//! Callers must short-circuit an empty comparison table ("no valid data")
//! before assembling; the spec assumes at least one trace.

use chrono::{Datelike, NaiveDate};

use crate::domain::{ComparisonTable, DateRange};
use crate::overlay::{EventMarker, OverlayPlan, RecessionBand};

/// Series palette, applied in trace order (wraps around).
pub const PALETTE: &[(u8, u8, u8)] = &[
    (0, 255, 255),  // cyan
    (255, 200, 0),  // amber
    (0, 255, 0),    // green
    (255, 80, 255), // magenta
    (80, 140, 255), // blue
    (255, 255, 255),// white
    (255, 120, 0),  // orange
    (120, 255, 180),// mint
];

pub fn palette_color(index: usize) -> (u8, u8, u8) {
    PALETTE[index % PALETTE.len()]
}

/// One line trace: x = date, y = normalized value.
#[derive(Debug, Clone)]
pub struct SeriesTrace {
    pub name: String,
    pub points: Vec<(NaiveDate, f64)>,
}

/// Fixed layout metadata.
#[derive(Debug, Clone)]
pub struct ChartLayout {
    pub title: &'static str,
    pub x_label: &'static str,
    pub y_label: &'static str,
}

/// A fully assembled chart description.
#[derive(Debug, Clone)]
pub struct ChartSpec {
    pub traces: Vec<SeriesTrace>,
    pub bands: Vec<RecessionBand>,
    pub markers: Vec<EventMarker>,
    pub layout: ChartLayout,
    pub x_bounds: [NaiveDate; 2],
    pub y_bounds: [f64; 2],
}

/// Merge traces, bands, and markers into one chart description.
///
/// The y-window is pinned to `[0, max * 1.1]` (plus a hairline pad) so the
/// recession bands span the full height, matching the band extent the
/// overlay planner produced.
pub fn assemble(table: &ComparisonTable, plan: &OverlayPlan, range: &DateRange) -> ChartSpec {
    debug_assert!(!table.is_empty(), "assemble called with empty table");

    let traces = table
        .entries()
        .iter()
        .map(|e| SeriesTrace {
            name: e.display_name.clone(),
            points: e.series.points.clone(),
        })
        .collect();

    let max_value = table.max_value().unwrap_or(100.0);
    let y_top = (max_value * 1.1).max(1.0);

    ChartSpec {
        traces,
        bands: plan.bands.clone(),
        markers: plan.markers.clone(),
        layout: ChartLayout {
            title: "Normalized performance of selected assets",
            x_label: "date",
            y_label: "index (base 100)",
        },
        x_bounds: [range.start(), range.end()],
        y_bounds: [0.0, y_top * 1.005],
    }
}

/// Map a date onto the numeric x-axis (days since CE, matching Plotters'
/// f64 cartesian coordinates).
pub fn date_to_x(date: NaiveDate) -> f64 {
    date.num_days_from_ce() as f64
}

/// Inverse of [`date_to_x`], for tick labeling.
pub fn x_to_date(x: f64) -> Option<NaiveDate> {
    NaiveDate::from_num_days_from_ce_opt(x.round() as i32)
}

/// Tick label formatter for the x axis.
pub fn fmt_axis_date(x: f64) -> String {
    x_to_date(x)
        .map(|d| d.format("%Y-%m").to_string())
        .unwrap_or_else(|| "?".to_string())
}

/// Tick label formatter for the y axis.
pub fn fmt_axis_value(v: f64) -> String {
    format!("{v:.0}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NormalizedSeries;
    use crate::overlay::plan_overlays_from;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn table_with(max: f64) -> ComparisonTable {
        let mut table = ComparisonTable::new();
        table.insert(
            "Gold",
            NormalizedSeries {
                points: vec![(d(2020, 1, 1), 100.0), (d(2020, 2, 1), max)],
            },
        );
        table
    }

    #[test]
    fn one_trace_per_table_entry() {
        let mut table = table_with(120.0);
        table.insert(
            "Silver",
            NormalizedSeries {
                points: vec![(d(2020, 1, 1), 100.0)],
            },
        );
        let range = DateRange::new(d(2020, 1, 1), d(2020, 12, 31));
        let plan = plan_overlays_from(&[], &[], &range, 120.0, true);
        let spec = assemble(&table, &plan, &range);

        assert_eq!(spec.traces.len(), 2);
        assert_eq!(spec.traces[0].name, "Gold");
        assert_eq!(spec.traces[1].name, "Silver");
        assert_eq!(spec.x_bounds, [d(2020, 1, 1), d(2020, 12, 31)]);
    }

    #[test]
    fn y_window_covers_band_extent() {
        let table = table_with(200.0);
        let range = DateRange::new(d(2020, 1, 1), d(2020, 12, 31));
        let plan = crate::overlay::plan_overlays(&range, 200.0, false);
        let spec = assemble(&table, &plan, &range);

        assert_eq!(spec.y_bounds[0], 0.0);
        for band in &spec.bands {
            assert!(band.y1 <= spec.y_bounds[1]);
        }
    }

    #[test]
    fn date_axis_round_trips() {
        let date = d(2013, 7, 19);
        assert_eq!(x_to_date(date_to_x(date)), Some(date));
        assert_eq!(fmt_axis_date(date_to_x(date)), "2013-07");
    }
}
