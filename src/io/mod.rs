//! Input/output helpers.
//!
//! - result exports (JSON) (`export`)

pub mod export;

pub use export::*;
