//! Net Tropical Cyclone activity.
//!
//! - baseline means over reference windows (`baseline`)
//! - per-year normalization into NTC_50 / NTC_40 / NTC_OFCL (`normalize`)

pub mod baseline;
pub mod normalize;

pub use baseline::*;
pub use normalize::*;
