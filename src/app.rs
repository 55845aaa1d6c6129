//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments and sets up logging
//! - loads the track snapshot
//! - runs season aggregation, reconciliation and normalization
//! - prints the report
//! - writes the optional export

use std::time::{Duration, Instant};

use clap::Parser;
use tracing::info;

use crate::cli::Cli;
use crate::data::{SnapshotLocation, TrackDataset};
use crate::domain::NtcConfig;
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `ntc` binary.
pub fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    crate::logging::init(&cli.log_level);

    let config = config_from_args(&cli);
    let location = match &cli.snapshot {
        Some(raw) => SnapshotLocation::parse(raw),
        None => SnapshotLocation::from_env()?,
    };
    let dataset = TrackDataset::load(&location, config.fetch_timeout)?;

    let summaries = pipeline::aggregate_years(&dataset, &config)?;

    let started = Instant::now();
    let run = pipeline::index_years(summaries, &config)?;

    let report = if cli.detailed {
        crate::report::format_detailed_report(&run.results, config.start_year)
    } else {
        crate::report::format_report(&run.results, config.start_year)
    };
    print!("{report}");

    if let Some(path) = &cli.export {
        crate::io::write_results_json(path, &run.results, &run.baselines)?;
        info!(path = %path.display(), "wrote export");
    }

    info!("--> Completed code ({})", crate::report::format_elapsed(started.elapsed()));
    Ok(())
}

pub fn config_from_args(cli: &Cli) -> NtcConfig {
    NtcConfig {
        first_year: cli.first_year,
        last_year: cli.last_year,
        start_year: cli.start_year,
        fetch_timeout: Duration::from_secs(cli.timeout_secs),
        ..NtcConfig::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_defaults_match_domain_constants() {
        let cli = Cli::parse_from(["ntc", "--snapshot", "al.json"]);
        let config = config_from_args(&cli);
        assert_eq!(config.first_year, 1950);
        assert_eq!(config.last_year, 2019);
        assert_eq!(config.start_year, 1980);
        assert_eq!(config.fetch_timeout, Duration::from_secs(60));
        assert_eq!(config.excluded_names, vec!["UNNAMED".to_string()]);
        assert!(!cli.detailed);
    }

    #[test]
    fn cli_overrides_years() {
        let cli = Cli::parse_from(["ntc", "--start-year", "1990", "--last-year", "2005", "--detailed"]);
        let config = config_from_args(&cli);
        assert_eq!(config.start_year, 1990);
        assert_eq!(config.last_year, 2005);
        assert_eq!(config.operational_start(), 1990);
        assert!(cli.detailed);
        assert!(cli.snapshot.is_none());
    }
}
