//! Operational forecast reconciliation.
//!
//! Official ("cone") forecast records are sparse and irregular. Each cycle is first
//! backfilled from CARQ where its initial entry is missing (`backfill`), then reduced to
//! a single (wind, type) estimate by a fixed priority of fallbacks (`extract`). The
//! estimates are folded into season statistics with the shared classification
//! (`reconcile`).

pub mod backfill;
pub mod extract;
pub mod reconcile;

pub use backfill::*;
pub use extract::*;
pub use reconcile::*;
