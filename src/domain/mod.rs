//! Domain types and static reference data.
//!
//! This module defines:
//!
//! - the comparison data model (`PriceSeries`, `NormalizedSeries`,
//!   `ComparisonTable`, `DateRange`)
//! - static reference data (asset catalog, recession periods, historical
//!   events)

pub mod refdata;
pub mod types;

pub use refdata::*;
pub use types::*;
