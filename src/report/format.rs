//! Text formatting for the CLI front-end and TUI panels.

use crate::app::pipeline::RunOutput;
use crate::data::SkipReason;

/// Aggregate message for the all-instruments-failed case.
pub const NO_VALID_DATA_MSG: &str =
    "No valid data retrieved. Try other assets or a different period.";

/// Informational message when no asset has computable endpoints.
pub const NO_RETURN_MSG: &str = "No computable return for the selected assets.";

/// Format the run header: range, table size, skip count.
pub fn format_run_summary(run: &RunOutput) -> String {
    let mut out = String::new();

    out.push_str("=== fc - Normalized asset comparison (base 100) ===\n");
    out.push_str(&format!(
        "Period: {} -> {}\n",
        run.range.start(),
        run.range.end()
    ));
    out.push_str(&format!(
        "Assets: {} compared, {} skipped\n",
        run.table.len(),
        run.skips.len()
    ));

    for entry in run.table.entries() {
        out.push_str(&format!(
            "  {} ({} observations)\n",
            entry.display_name,
            entry.series.points.len()
        ));
    }

    out
}

/// Format the per-asset total-return listing.
pub fn format_returns(returns: &[(String, f64)]) -> String {
    if returns.is_empty() {
        return format!("{NO_RETURN_MSG}\n");
    }

    let mut out = String::from("Total return (%) over the period:\n");
    let width = returns.iter().map(|(n, _)| n.len()).max().unwrap_or(0);
    for (name, pct) in returns {
        out.push_str(&format!("  {name:<width$}  {pct:>8.2}\n"));
    }
    out
}

/// Format skip warnings, one line per skipped instrument.
pub fn format_skips(skips: &[SkipReason]) -> String {
    let mut out = String::new();
    for skip in skips {
        out.push_str(&format!("warning: {skip}\n"));
    }
    out
}
