//! nb-sentiment math utilities.

pub mod math;

pub use math::evidence::*;
pub use math::stable::*;
