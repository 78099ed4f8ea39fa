//! Overlay planning: which recession bands and historical-event markers are
//! visible for a date range, and where they sit vertically.
//!
//! Placement rules:
//!
//! - a recession band spans `[max(period.start, range.start),
//!   min(period.end, range.end)]`, from y = 0 up to `max_value * 1.1`, with
//!   its label at `max_value * 1.05` above the clamped start
//! - an event marker is a vertical line at its date with the label at
//!   `max_value * 0.95`
//!
//! Overlays are emitted in the declaration order of the reference data; no
//! date sorting is applied. Callers must not invoke the planner with an
//! empty comparison table (`max_value` is undefined there).

use chrono::NaiveDate;

use crate::domain::{DateRange, HistoricalEvent, RecessionPeriod, HISTORICAL_EVENTS, RECESSIONS};

/// A shaded recession rectangle, clamped to the visible range.
#[derive(Debug, Clone, PartialEq)]
pub struct RecessionBand {
    pub x0: NaiveDate,
    pub x1: NaiveDate,
    pub y0: f64,
    pub y1: f64,
    pub label: &'static str,
    pub label_x: NaiveDate,
    pub label_y: f64,
}

/// A vertical event line with a label.
#[derive(Debug, Clone, PartialEq)]
pub struct EventMarker {
    pub date: NaiveDate,
    pub label: &'static str,
    pub label_y: f64,
}

/// All overlays visible for one comparison run.
#[derive(Debug, Clone, Default)]
pub struct OverlayPlan {
    pub bands: Vec<RecessionBand>,
    pub markers: Vec<EventMarker>,
}

/// Plan overlays from the static reference data.
pub fn plan_overlays(range: &DateRange, max_value: f64, show_events: bool) -> OverlayPlan {
    plan_overlays_from(RECESSIONS, HISTORICAL_EVENTS, range, max_value, show_events)
}

/// Same as [`plan_overlays`] but over explicit reference data.
pub fn plan_overlays_from(
    recessions: &[RecessionPeriod],
    events: &[HistoricalEvent],
    range: &DateRange,
    max_value: f64,
    show_events: bool,
) -> OverlayPlan {
    let bands = recessions
        .iter()
        .filter_map(|p| band_for(p, range, max_value))
        .collect();

    let markers = if show_events {
        events
            .iter()
            .filter_map(|e| marker_for(e, range, max_value))
            .collect()
    } else {
        Vec::new()
    };

    OverlayPlan { bands, markers }
}

/// Interval-overlap inclusion: visible iff
/// `period.start <= range.end && period.end >= range.start`.
fn band_for(period: &RecessionPeriod, range: &DateRange, max_value: f64) -> Option<RecessionBand> {
    if period.start > range.end() || period.end < range.start() {
        return None;
    }
    let x0 = period.start.max(range.start());
    let x1 = period.end.min(range.end());
    Some(RecessionBand {
        x0,
        x1,
        y0: 0.0,
        y1: max_value * 1.1,
        label: period.label,
        label_x: x0,
        label_y: max_value * 1.05,
    })
}

/// Closed-interval inclusion: visible iff
/// `range.start <= event.date <= range.end`.
fn marker_for(event: &HistoricalEvent, range: &DateRange, max_value: f64) -> Option<EventMarker> {
    if !range.contains(event.date) {
        return None;
    }
    Some(EventMarker {
        date: event.date,
        label: event.label,
        label_y: max_value * 0.95,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn period(start: NaiveDate, end: NaiveDate) -> RecessionPeriod {
        RecessionPeriod {
            start,
            end,
            label: "test recession",
        }
    }

    #[test]
    fn fully_contained_period_is_included_unclamped() {
        let range = DateRange::new(d(2019, 1, 1), d(2021, 1, 1));
        let band = band_for(&period(d(2020, 2, 1), d(2020, 6, 30)), &range, 100.0).unwrap();
        assert_eq!(band.x0, d(2020, 2, 1));
        assert_eq!(band.x1, d(2020, 6, 30));
    }

    #[test]
    fn disjoint_period_is_excluded() {
        let range = DateRange::new(d(2015, 1, 1), d(2016, 1, 1));
        assert!(band_for(&period(d(2020, 2, 1), d(2020, 6, 30)), &range, 100.0).is_none());
        assert!(band_for(&period(d(2007, 12, 1), d(2009, 6, 30)), &range, 100.0).is_none());
    }

    #[test]
    fn partial_overlap_is_clamped_to_the_range() {
        // Great Recession vs a 2008-only window.
        let range = DateRange::new(d(2008, 1, 1), d(2008, 12, 31));
        let band = band_for(&period(d(2007, 12, 1), d(2009, 6, 30)), &range, 100.0).unwrap();
        assert_eq!(band.x0, d(2008, 1, 1));
        assert_eq!(band.x1, d(2008, 12, 31));
        assert_eq!(band.label_x, d(2008, 1, 1));
    }

    #[test]
    fn band_vertical_placement_scales_with_max_value() {
        let range = DateRange::new(d(2008, 1, 1), d(2008, 12, 31));
        let band = band_for(&period(d(2008, 3, 1), d(2008, 4, 1)), &range, 240.0).unwrap();
        assert_eq!(band.y0, 0.0);
        assert!((band.y1 - 264.0).abs() < 1e-9);
        assert!((band.label_y - 252.0).abs() < 1e-9);
    }

    #[test]
    fn event_bounds_are_inclusive() {
        let range = DateRange::new(d(2017, 1, 20), d(2017, 5, 17));
        let on_start = HistoricalEvent { label: "start", date: d(2017, 1, 20) };
        let on_end = HistoricalEvent { label: "end", date: d(2017, 5, 17) };
        let before = HistoricalEvent { label: "before", date: d(2017, 1, 19) };
        let after = HistoricalEvent { label: "after", date: d(2017, 5, 18) };

        assert!(marker_for(&on_start, &range, 100.0).is_some());
        assert!(marker_for(&on_end, &range, 100.0).is_some());
        assert!(marker_for(&before, &range, 100.0).is_none());
        assert!(marker_for(&after, &range, 100.0).is_none());
    }

    #[test]
    fn markers_suppressed_when_events_disabled() {
        let range = DateRange::new(d(2000, 1, 1), d(2030, 1, 1));
        let plan = plan_overlays(&range, 100.0, false);
        assert!(plan.markers.is_empty());
        // Bands are unaffected by the events flag.
        assert!(!plan.bands.is_empty());
    }

    #[test]
    fn overlays_emit_in_declaration_order() {
        // Declare out of date order on purpose.
        let recessions = [
            period(d(2020, 2, 1), d(2020, 6, 30)),
            period(d(2007, 12, 1), d(2009, 6, 30)),
        ];
        let events = [
            HistoricalEvent { label: "late", date: d(2017, 5, 17) },
            HistoricalEvent { label: "early", date: d(2002, 5, 16) },
        ];
        let range = DateRange::new(d(2000, 1, 1), d(2030, 1, 1));
        let plan = plan_overlays_from(&recessions, &events, &range, 100.0, true);

        assert_eq!(plan.bands[0].x0, d(2020, 2, 1));
        assert_eq!(plan.bands[1].x0, d(2007, 12, 1));
        assert_eq!(plan.markers[0].label, "late");
        assert_eq!(plan.markers[1].label, "early");
    }

    #[test]
    fn marker_label_height_scales_with_max_value() {
        let range = DateRange::new(d(2017, 1, 1), d(2017, 12, 31));
        let e = HistoricalEvent { label: "x", date: d(2017, 5, 17) };
        let marker = marker_for(&e, &range, 200.0).unwrap();
        assert!((marker.label_y - 190.0).abs() < 1e-9);
    }
}
