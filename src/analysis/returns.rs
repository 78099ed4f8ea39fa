//! Total percentage return per asset over the selected period.

use crate::domain::ComparisonTable;

/// Per-asset total returns, in table (selection) order.
///
/// An asset contributes an entry only when both its first and last
/// normalized values are defined and non-zero; anything else is silently
/// omitted. An empty result is the "no computable return" case, reported by
/// the caller as an informational message.
pub fn total_returns(table: &ComparisonTable) -> Vec<(String, f64)> {
    let mut out = Vec::with_capacity(table.len());
    for entry in table.entries() {
        let (Some(first), Some(last)) = (entry.series.first_value(), entry.series.last_value())
        else {
            continue;
        };
        if first == 0.0 || last == 0.0 || !first.is_finite() || !last.is_finite() {
            continue;
        }
        let pct = (last - first) / first * 100.0;
        out.push((entry.display_name.clone(), round2(pct)));
    }
    out
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NormalizedSeries;
    use chrono::NaiveDate;

    fn normalized(values: &[f64]) -> NormalizedSeries {
        let d0 = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        NormalizedSeries {
            points: values
                .iter()
                .enumerate()
                .map(|(i, &v)| (d0 + chrono::Days::new(i as u64), v))
                .collect(),
        }
    }

    #[test]
    fn computes_percentage_return() {
        let mut table = ComparisonTable::new();
        table.insert("Gold", normalized(&[100.0, 150.0, 80.0]));
        assert_eq!(total_returns(&table), vec![("Gold".to_string(), -20.0)]);
    }

    #[test]
    fn single_point_series_returns_zero() {
        let mut table = ComparisonTable::new();
        table.insert("Gold", normalized(&[100.0]));
        assert_eq!(total_returns(&table), vec![("Gold".to_string(), 0.0)]);
    }

    #[test]
    fn zero_endpoint_is_omitted() {
        let mut table = ComparisonTable::new();
        table.insert("Broken", normalized(&[100.0, 0.0]));
        table.insert("Fine", normalized(&[100.0, 110.0]));
        assert_eq!(total_returns(&table), vec![("Fine".to_string(), 10.0)]);
    }

    #[test]
    fn rounds_to_two_decimals() {
        let mut table = ComparisonTable::new();
        table.insert("A", normalized(&[100.0, 101.2345]));
        assert_eq!(total_returns(&table), vec![("A".to_string(), 1.23)]);
    }

    #[test]
    fn preserves_table_order() {
        let mut table = ComparisonTable::new();
        table.insert("B", normalized(&[100.0, 120.0]));
        table.insert("A", normalized(&[100.0, 90.0]));
        let names: Vec<String> = total_returns(&table).into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["B", "A"]);
    }
}
