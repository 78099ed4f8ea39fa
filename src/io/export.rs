//! Export the comparison table to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream
//! scripts: one date index column, one column per asset in selection order,
//! rows over the sorted union of observation dates, blank cells where an
//! asset has no observation for a date.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use chrono::NaiveDate;

use crate::domain::ComparisonTable;
use crate::error::AppError;

/// Default download name: `financial_comparison_<end_date>.csv`.
pub fn default_export_name(end: NaiveDate) -> String {
    format!("financial_comparison_{end}.csv")
}

/// Render the table as CSV text.
pub fn render_comparison_csv(table: &ComparisonTable) -> String {
    let mut out = String::from("date");
    for entry in table.entries() {
        out.push(',');
        out.push_str(&csv_field(&entry.display_name));
    }
    out.push('\n');

    for date in table.date_index() {
        out.push_str(&date.to_string());
        for entry in table.entries() {
            out.push(',');
            if let Some(value) = entry.series.value_on(date) {
                out.push_str(&format!("{value}"));
            }
        }
        out.push('\n');
    }

    out
}

/// Write the table to `path`.
pub fn write_comparison_csv(path: &Path, table: &ComparisonTable) -> Result<(), AppError> {
    let mut file = File::create(path).map_err(|e| {
        AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display()))
    })?;
    file.write_all(render_comparison_csv(table).as_bytes())
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV: {e}")))?;
    Ok(())
}

/// Quote a header field when it contains CSV metacharacters.
fn csv_field(raw: &str) -> String {
    if raw.contains([',', '"', '\n']) {
        format!("\"{}\"", raw.replace('"', "\"\""))
    } else {
        raw.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NormalizedSeries;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn two_assets_three_dates_give_three_rows_three_columns() {
        let mut table = ComparisonTable::new();
        table.insert(
            "Gold",
            NormalizedSeries {
                points: vec![
                    (d(2020, 1, 1), 100.0),
                    (d(2020, 1, 2), 101.5),
                    (d(2020, 1, 3), 99.0),
                ],
            },
        );
        table.insert(
            "Silver",
            NormalizedSeries {
                points: vec![
                    (d(2020, 1, 1), 100.0),
                    (d(2020, 1, 2), 98.0),
                    (d(2020, 1, 3), 103.0),
                ],
            },
        );

        let csv = render_comparison_csv(&table);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 4); // header + 3 rows
        assert_eq!(lines[0], "date,Gold,Silver");
        assert_eq!(lines[1], "2020-01-01,100,100");
        assert_eq!(lines[2], "2020-01-02,101.5,98");
        assert!(lines.iter().all(|l| l.matches(',').count() == 2));
    }

    #[test]
    fn missing_observations_render_as_blank_cells() {
        let mut table = ComparisonTable::new();
        table.insert(
            "A",
            NormalizedSeries {
                points: vec![(d(2020, 1, 1), 100.0), (d(2020, 1, 3), 110.0)],
            },
        );
        table.insert(
            "B",
            NormalizedSeries {
                points: vec![(d(2020, 1, 2), 100.0)],
            },
        );

        let csv = render_comparison_csv(&table);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[1], "2020-01-01,100,");
        assert_eq!(lines[2], "2020-01-02,,100");
        assert_eq!(lines[3], "2020-01-03,110,");
    }

    #[test]
    fn header_fields_with_commas_are_quoted() {
        let mut table = ComparisonTable::new();
        table.insert(
            "Apple, Inc.",
            NormalizedSeries {
                points: vec![(d(2020, 1, 1), 100.0)],
            },
        );
        let csv = render_comparison_csv(&table);
        assert!(csv.starts_with("date,\"Apple, Inc.\"\n"));
    }

    #[test]
    fn default_name_embeds_the_end_date() {
        assert_eq!(
            default_export_name(d(2024, 3, 31)),
            "financial_comparison_2024-03-31.csv"
        );
    }
}
