//! Input/output helpers: the combined-series CSV export.

pub mod export;

pub use export::*;
