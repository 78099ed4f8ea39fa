//! Command-line parsing for the comparison dashboard.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the fetch/transform code.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "fc", version, about = "Normalized asset comparison (base 100)")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch the selection, print the run summary, returns, and a terminal
    /// chart; optionally export the combined series to CSV.
    Compare(CompareArgs),
    /// Print the per-asset total-return listing only (useful for scripting).
    Returns(CompareArgs),
    /// List the asset catalog (categories, display names, symbols).
    Assets,
    /// Launch the interactive TUI.
    ///
    /// This uses the same underlying comparison pipeline as `fc compare`,
    /// but renders results in a terminal UI using Ratatui.
    Tui(CompareArgs),
}

/// Common options for comparing and listing returns.
#[derive(Debug, Parser, Clone)]
pub struct CompareArgs {
    /// Asset to include: a catalog display name (e.g. "Gold") or a raw
    /// ticker symbol (e.g. "GC=F"). Repeatable.
    #[arg(short = 'a', long = "asset")]
    pub assets: Vec<String>,

    /// Include every asset of a catalog category (e.g. "Precious metals").
    /// Repeatable.
    #[arg(short = 'c', long = "category")]
    pub categories: Vec<String>,

    /// Start of the comparison period (YYYY-MM-DD).
    #[arg(long, default_value = "2010-01-01")]
    pub start: NaiveDate,

    /// End of the comparison period (YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    pub end: Option<NaiveDate>,

    /// Show historical-event markers (enabled by default).
    #[arg(long, default_value_t = true)]
    pub events: bool,

    /// Hide historical-event markers.
    #[arg(long)]
    pub no_events: bool,

    /// Render the terminal chart (enabled by default).
    #[arg(long, default_value_t = true)]
    pub plot: bool,

    /// Disable the terminal chart.
    #[arg(long)]
    pub no_plot: bool,

    /// Chart width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Chart height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,

    /// Export the combined series to this CSV path. Pass `-` to use the
    /// default name `financial_comparison_<end_date>.csv`.
    #[arg(long)]
    pub export: Option<PathBuf>,
}

impl CompareArgs {
    pub fn show_events(&self) -> bool {
        self.events && !self.no_events
    }

    pub fn show_plot(&self) -> bool {
        self.plot && !self.no_plot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_assets_and_dates() {
        let cli = Cli::try_parse_from([
            "fc", "compare", "-a", "Gold", "-a", "AAPL", "--start", "2015-06-01", "--end",
            "2020-01-31",
        ])
        .unwrap();
        let Command::Compare(args) = cli.command else {
            panic!("expected compare");
        };
        assert_eq!(args.assets, vec!["Gold", "AAPL"]);
        assert_eq!(args.start, NaiveDate::from_ymd_opt(2015, 6, 1).unwrap());
        assert_eq!(args.end, NaiveDate::from_ymd_opt(2020, 1, 31));
        assert!(args.show_events());
        assert!(args.show_plot());
    }

    #[test]
    fn no_events_flag_wins() {
        let cli = Cli::try_parse_from(["fc", "compare", "-a", "Gold", "--no-events"]).unwrap();
        let Command::Compare(args) = cli.command else {
            panic!("expected compare");
        };
        assert!(!args.show_events());
    }

    #[test]
    fn rejects_malformed_dates() {
        assert!(Cli::try_parse_from(["fc", "compare", "--start", "01/02/2015"]).is_err());
    }
}
