//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - storm/forecast records handed over by the data source (`types`)
//! - season statistics, baselines and index results (`stats`)
//! - run configuration and domain constants (`config`)

pub mod config;
pub mod stats;
pub mod types;

pub use config::*;
pub use stats::*;
pub use types::*;
