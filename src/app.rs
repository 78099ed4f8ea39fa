//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - resolves the asset selection against the catalog
//! - runs the fetch/normalize pipeline
//! - prints reports/plots
//! - writes optional exports

use std::path::PathBuf;

use chrono::Utc;
use clap::Parser;

use crate::cli::{Command, CompareArgs};
use crate::data::MarketClient;
use crate::domain::{refdata, DateRange};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `fc` binary.
pub fn run() -> Result<(), AppError> {
    // We want bare `fc` and `fc -a Gold` to behave like `fc tui ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of
    // the argv list before parsing. This preserves a clean clap structure
    // while retaining the requested UX.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Compare(args) => handle_compare(args, OutputMode::Full),
        Command::Returns(args) => handle_compare(args, OutputMode::ReturnsOnly),
        Command::Assets => handle_assets(),
        Command::Tui(args) => crate::tui::run(args),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
    Full,
    ReturnsOnly,
}

/// Clamp the requested dates and apply the end-date default (today).
pub fn range_from_args(args: &CompareArgs) -> DateRange {
    let end = args.end.unwrap_or_else(|| Utc::now().date_naive());
    DateRange::new(args.start, end)
}

fn handle_compare(args: CompareArgs, mode: OutputMode) -> Result<(), AppError> {
    let selection = pipeline::resolve_selection(&args.assets, &args.categories)?;
    if selection.is_empty() {
        return Err(AppError::new(
            2,
            "No assets selected. Pass -a/--asset or -c/--category (see `fc assets`).",
        ));
    }

    let range = range_from_args(&args);
    let client = MarketClient::new()?;

    let run = pipeline::run_compare(&client, &selection, &range, args.show_events(), |msg| {
        if mode == OutputMode::Full {
            println!("{msg}");
        }
    });

    if !run.skips.is_empty() {
        eprint!("{}", crate::report::format_skips(&run.skips));
    }

    if run.no_valid_selection() {
        return Err(AppError::new(4, crate::report::NO_VALID_DATA_MSG));
    }

    if mode == OutputMode::Full {
        println!("{}", crate::report::format_run_summary(&run));

        if args.show_plot() {
            let spec = crate::chart::assemble(&run.table, &run.overlays, &run.range);
            println!("{}", crate::plot::render_ascii_chart(&spec, args.width, args.height));
        }
    }

    print!("{}", crate::report::format_returns(&run.returns));

    if let Some(path) = &args.export {
        let path = resolve_export_path(path, &range);
        crate::io::write_comparison_csv(&path, &run.table)?;
        println!("Wrote {}", path.display());
    }

    Ok(())
}

fn handle_assets() -> Result<(), AppError> {
    for category in refdata::CATALOG {
        println!("{}", category.name);
        for asset in category.assets {
            println!("  {:<36} {}", asset.display_name, asset.symbol);
        }
    }
    Ok(())
}

/// `--export -` selects the default download-style filename.
fn resolve_export_path(path: &PathBuf, range: &DateRange) -> PathBuf {
    if path.as_os_str() == "-" {
        PathBuf::from(crate::io::default_export_name(range.end()))
    } else {
        path.clone()
    }
}

/// Rewrite argv so `fc` defaults to `fc tui`.
///
/// Rules:
/// - `fc`                      -> `fc tui`
/// - `fc -a Gold ...`          -> `fc tui -a Gold ...`
/// - `fc --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "compare" | "returns" | "assets" | "tui");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}
