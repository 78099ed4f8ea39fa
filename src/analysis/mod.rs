//! Pure series transforms: base-100 normalization and total returns.

pub mod normalize;
pub mod returns;

pub use normalize::*;
pub use returns::*;
