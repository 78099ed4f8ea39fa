//! Static reference data: the asset catalog, recession periods, and
//! historical event markers.
//!
//! All of this is process-wide constant data. The catalog is a nested
//! category -> display name -> ticker symbol table; lookups resolve user
//! selections into fetch requests and map symbols back to display names.

use chrono::NaiveDate;

/// One selectable instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Asset {
    pub display_name: &'static str,
    pub symbol: &'static str,
}

/// A named group of instruments. Symbols are disjoint across categories.
#[derive(Debug, Clone, Copy)]
pub struct AssetCategory {
    pub name: &'static str,
    pub assets: &'static [Asset],
}

/// A known economic recession, shaded on the chart when it intersects the
/// selected date range.
#[derive(Debug, Clone, Copy)]
pub struct RecessionPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub label: &'static str,
}

/// A fixed date of interest, drawn as a vertical marker when inside the
/// selected date range and event display is enabled.
#[derive(Debug, Clone, Copy)]
pub struct HistoricalEvent {
    pub label: &'static str,
    pub date: NaiveDate,
}

const fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    match NaiveDate::from_ymd_opt(y, m, d) {
        Some(date) => date,
        None => panic!("invalid reference date"),
    }
}

pub const CATALOG: &[AssetCategory] = &[
    AssetCategory {
        name: "Precious metals",
        assets: &[
            Asset { display_name: "Gold", symbol: "GC=F" },
            Asset { display_name: "Silver", symbol: "SI=F" },
            Asset { display_name: "Copper", symbol: "HG=F" },
        ],
    },
    AssetCategory {
        name: "US equities",
        assets: &[
            Asset { display_name: "Apple (AAPL)", symbol: "AAPL" },
            Asset { display_name: "Tesla (TSLA)", symbol: "TSLA" },
            Asset { display_name: "Microsoft (MSFT)", symbol: "MSFT" },
        ],
    },
    AssetCategory {
        name: "Bonds",
        assets: &[Asset {
            display_name: "US Long-Term Treasuries (TLT)",
            symbol: "TLT",
        }],
    },
    AssetCategory {
        name: "Currencies",
        assets: &[
            Asset { display_name: "Euro (EUR/USD)", symbol: "EURUSD=X" },
            Asset { display_name: "Pound Sterling (GBP/USD)", symbol: "GBPUSD=X" },
        ],
    },
    AssetCategory {
        name: "Popular ETFs",
        assets: &[
            Asset { display_name: "Vanguard FTSE All-World (VWCE)", symbol: "VEUR.AS" },
            Asset { display_name: "iShares MSCI World (IWDA)", symbol: "IWDA.AS" },
            Asset { display_name: "Vanguard S&P 500 (VUSA)", symbol: "VUSA.AS" },
            Asset { display_name: "iShares Core S&P 500 (CSPX)", symbol: "CSPX.AS" },
        ],
    },
    AssetCategory {
        name: "French equities",
        assets: &[
            Asset { display_name: "Accor", symbol: "AC.PA" },
            Asset { display_name: "Air Liquide", symbol: "AI.PA" },
            Asset { display_name: "Schneider Electric", symbol: "SU.PA" },
            Asset { display_name: "LVMH", symbol: "MC.PA" },
            Asset { display_name: "Hermes", symbol: "RMS.PA" },
            Asset { display_name: "L'Oreal", symbol: "OR.PA" },
            Asset { display_name: "Pernod Ricard", symbol: "RI.PA" },
            Asset { display_name: "Capgemini", symbol: "CAP.PA" },
            Asset { display_name: "Sodexo", symbol: "SW.PA" },
            Asset { display_name: "TotalEnergies", symbol: "TTE.PA" },
            Asset { display_name: "Danone", symbol: "BN.PA" },
        ],
    },
];

/// Default selection when nothing has been chosen yet.
pub const DEFAULT_SYMBOL: &str = "GC=F";

pub const RECESSIONS: &[RecessionPeriod] = &[
    RecessionPeriod {
        start: date(2007, 12, 1),
        end: date(2009, 6, 30),
        label: "Great Recession",
    },
    RecessionPeriod {
        start: date(2020, 2, 1),
        end: date(2020, 6, 30),
        label: "COVID-19 recession",
    },
];

pub const HISTORICAL_EVENTS: &[HistoricalEvent] = &[
    HistoricalEvent { label: "Chirac 2nd term begins", date: date(2002, 5, 16) },
    HistoricalEvent { label: "Sarkozy term begins", date: date(2007, 5, 16) },
    HistoricalEvent { label: "Hollande term begins", date: date(2012, 5, 15) },
    HistoricalEvent { label: "Macron term begins", date: date(2017, 5, 17) },
    HistoricalEvent { label: "Trump 1st term begins", date: date(2017, 1, 20) },
    HistoricalEvent { label: "Trump 2nd term begins", date: date(2025, 1, 20) },
];

/// Resolve a symbol to its catalog display name, if any.
pub fn display_name_for(symbol: &str) -> Option<&'static str> {
    CATALOG
        .iter()
        .flat_map(|c| c.assets.iter())
        .find(|a| a.symbol == symbol)
        .map(|a| a.display_name)
}

/// Resolve a user-supplied token (symbol or display name, case-insensitive
/// for names) to a catalog asset.
pub fn find_asset(token: &str) -> Option<Asset> {
    CATALOG
        .iter()
        .flat_map(|c| c.assets.iter())
        .find(|a| a.symbol == token || a.display_name.eq_ignore_ascii_case(token))
        .copied()
}

/// Find a category by name (case-insensitive).
pub fn find_category(name: &str) -> Option<&'static AssetCategory> {
    CATALOG.iter().find(|c| c.name.eq_ignore_ascii_case(name))
}
