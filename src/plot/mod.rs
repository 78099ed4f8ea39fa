//! Terminal plotting for one-shot CLI output.

pub mod ascii;

pub use ascii::*;
