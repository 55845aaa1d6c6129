//! Season aggregation from revised track data.
//!
//! - shared nested-threshold classification (`classify`)
//! - per-season fold over best-track storms (`aggregate`)

pub mod aggregate;
pub mod classify;

pub use aggregate::*;
pub use classify::*;
