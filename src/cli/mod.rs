//! Command-line parsing for the NTC report.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! aggregation code. Defaults mirror the domain constants in `domain::config`.

use std::path::PathBuf;

use clap::Parser;

use crate::domain::{FIRST_YEAR, LAST_YEAR, START_PRINTING};

/// Top-level CLI.
#[derive(Debug, Parser, Clone)]
#[command(
    name = "ntc",
    version,
    about = "Annual ACE and Net Tropical Cyclone activity from best-track and operational data"
)]
pub struct Cli {
    /// Track snapshot (JSON file path or http(s) URL). Falls back to NTC_SNAPSHOT.
    #[arg(short, long)]
    pub snapshot: Option<String>,

    /// First year printed in the report.
    #[arg(long, default_value_t = START_PRINTING)]
    pub start_year: i32,

    /// First season aggregated.
    #[arg(long, default_value_t = FIRST_YEAR)]
    pub first_year: i32,

    /// Last season aggregated.
    #[arg(long, default_value_t = LAST_YEAR)]
    pub last_year: i32,

    /// Print operational ACE and NTC columns as well.
    #[arg(long)]
    pub detailed: bool,

    /// Export all per-year results and baselines to JSON.
    #[arg(long, value_name = "JSON")]
    pub export: Option<PathBuf>,

    /// Timeout (seconds) for fetching a remote snapshot.
    #[arg(long, default_value_t = 60)]
    pub timeout_secs: u64,

    /// Log level for progress and diagnostics (RUST_LOG overrides).
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
