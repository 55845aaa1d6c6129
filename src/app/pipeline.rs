//! Shared aggregation pipeline.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! season aggregation -> operational reconciliation -> baselines -> normalization
//!
//! The binary only adds snapshot loading and presentation on top.

use std::time::Instant;

use tracing::info;

use crate::data::StormSource;
use crate::domain::{NtcConfig, NtcResult, YearSummary};
use crate::error::AppError;
use crate::ntc::{Baselines, baseline_means, log_baseline, normalize};
use crate::operational::reconcile_season;
use crate::report::format_elapsed;
use crate::season::aggregate_season;

/// All computed outputs of a single run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub summaries: Vec<YearSummary>,
    pub baselines: Baselines,
    pub results: Vec<NtcResult>,
}

/// Aggregate every configured season, revised and (where available) operational.
pub fn aggregate_years<S: StormSource + ?Sized>(
    source: &S,
    config: &NtcConfig,
) -> Result<Vec<YearSummary>, AppError> {
    if config.first_year > config.last_year {
        return Err(AppError::new(
            2,
            format!(
                "First year {} is after last year {}.",
                config.first_year, config.last_year
            ),
        ));
    }

    let started = Instant::now();
    let mut summaries = Vec::new();

    for year in config.years() {
        // Every fifth year, or every year once things are slow.
        if started.elapsed().as_secs_f64() > 1.0 || year % 5 == 0 {
            info!("*** {year} ***");
        }

        let season = aggregate_season(source, year, config)?;
        let operational = config
            .has_operational(year)
            .then(|| reconcile_season(source, &season.storms));

        summaries.push(YearSummary {
            year,
            revised: season.stats,
            operational,
        });
    }

    info!("--> Completed processing data ({})", format_elapsed(started.elapsed()));
    Ok(summaries)
}

/// Compute both reference baselines. Fails before any normalization is attempted.
pub fn compute_baselines(summaries: &[YearSummary], config: &NtcConfig) -> Result<Baselines, AppError> {
    let ntc_50 = baseline_means(summaries, config.ntc_50_window)?;
    let ntc_40 = baseline_means(summaries, config.ntc_40_window)?;
    log_baseline("NTC_50", &ntc_50);
    log_baseline("NTC_40", &ntc_40);
    Ok(Baselines { ntc_50, ntc_40 })
}

/// Baselines and normalization over already-aggregated seasons.
pub fn index_years(summaries: Vec<YearSummary>, config: &NtcConfig) -> Result<RunOutput, AppError> {
    let baselines = compute_baselines(&summaries, config)?;
    let results = normalize(&summaries, &baselines, config)?;
    Ok(RunOutput {
        summaries,
        baselines,
        results,
    })
}

/// Execute the full pipeline against a data source.
pub fn run_with_source<S: StormSource + ?Sized>(source: &S, config: &NtcConfig) -> Result<RunOutput, AppError> {
    let summaries = aggregate_years(source, config)?;
    index_years(summaries, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::TrackDataset;
    use crate::domain::YearWindow;
    use serde_json::{Value, json};

    fn observation(year: i32, hour: u32, code: &str, vmax: f64) -> Value {
        json!({
            "time": format!("{year}-08-01T{hour:02}:00:00Z"),
            "type": code,
            "vmax": vmax,
        })
    }

    /// A storm holding `vmax` kt at type `code` for one day (four synoptic points).
    fn steady_storm(year: i32, number: u32, name: &str, code: &str, vmax: f64) -> Value {
        let observations: Vec<Value> = [0, 6, 12, 18]
            .iter()
            .map(|&h| observation(year, h, code, vmax))
            .collect();
        json!({
            "id": format!("AL{number:02}{year}"),
            "name": name,
            "observations": observations,
        })
    }

    fn dataset(storms: Vec<Value>) -> TrackDataset {
        TrackDataset::from_json_str(&json!({ "basin": "AL", "storms": storms }).to_string()).unwrap()
    }

    fn config(first_year: i32, last_year: i32, start_year: i32) -> NtcConfig {
        NtcConfig {
            first_year,
            last_year,
            start_year,
            ..NtcConfig::default()
        }
    }

    #[test]
    fn constant_seasons_score_one_hundred() {
        let source = dataset(vec![
            steady_storm(1950, 1, "ABLE", "TS", 45.0),
            steady_storm(1951, 1, "ABLE", "TS", 50.0),
            steady_storm(1952, 1, "ABLE", "TS", 40.0),
        ]);
        let run = run_with_source(&source, &config(1950, 1952, 1950)).unwrap();

        assert_eq!(run.results.len(), 3);
        assert_eq!(run.baselines.ntc_50.years, 3);
        assert_eq!(run.baselines.ntc_50.means, [1.0, 0.0, 0.0, 1.0, 0.0, 0.0]);
        for r in &run.results {
            assert_eq!(r.revised.ns, 1);
            assert_eq!(r.revised.ns_days, 1.0);
            assert!((r.ntc_50 - 100.0).abs() < 1e-12, "year {} ntc {}", r.year, r.ntc_50);
            assert_eq!(r.ntc_ofcl, 0.0);
            assert!(r.operational.is_none());
        }
    }

    #[test]
    fn unnamed_hurricane_changes_nothing() {
        let source = dataset(vec![
            steady_storm(1950, 1, "ABLE", "TS", 45.0),
            steady_storm(1951, 1, "ABLE", "TS", 50.0),
            steady_storm(1951, 2, "UNNAMED", "HU", 120.0),
            steady_storm(1952, 1, "ABLE", "TS", 40.0),
        ]);
        let run = run_with_source(&source, &config(1950, 1952, 1950)).unwrap();
        let y1951 = &run.results[1];
        assert_eq!(y1951.year, 1951);
        assert_eq!((y1951.revised.ns, y1951.revised.hu, y1951.revised.mh), (1, 0, 0));
        assert!((y1951.ntc_50 - 100.0).abs() < 1e-12);
    }

    #[test]
    fn hand_computed_index() {
        // 1950: one TS day. 1951: one hurricane (64-95 kt) day.
        // Means: NS 1, HU 0.5, MH 0, NS_days 1, HU_days 0.5, MH_days 0.
        let source = dataset(vec![
            steady_storm(1950, 1, "ABLE", "TS", 45.0),
            steady_storm(1951, 1, "BAKER", "HU", 80.0),
        ]);
        let run = run_with_source(&source, &config(1950, 1951, 1950)).unwrap();
        // Neither year has a major hurricane, so both MH fields sit at normal.
        // 1950: (1 + 0 + 1 + 1 + 0 + 1) / 6
        assert!((run.results[0].ntc_50 - 100.0 * 4.0 / 6.0).abs() < 1e-12);
        // 1951: (1 + 2 + 1 + 1 + 2 + 1) / 6
        assert!((run.results[1].ntc_50 - 100.0 * 8.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn operational_estimates_only_after_start_year() {
        let mut storm = steady_storm(1981, 1, "ARLENE", "HU", 70.0);
        storm["operational"] = json!({
            "OFCL": [
                { "init": "1981-08-01T00:00:00Z", "fhr": [12, 24], "vmax": [75, 80], "type": ["HU", "HU"] },
                { "init": "1981-08-01T06:00:00Z", "fhr": [0, 12], "vmax": [70, 75], "type": ["HU", "HU"] }
            ],
            "CARQ": [
                { "init": "1981-08-01T00:00:00Z", "fhr": [-6, 0], "vmax": [65, 70], "type": ["", ""] }
            ]
        });
        let source = dataset(vec![steady_storm(1980, 1, "ALLEN", "HU", 70.0), storm]);
        let run = run_with_source(&source, &config(1980, 1981, 1980)).unwrap();

        assert!(run.results[0].operational.is_none());
        let ops = run.results[1].operational.unwrap();
        assert_eq!((ops.ns, ops.hu, ops.mh), (1, 1, 0));
        assert_eq!(ops.hu_days, 0.5);
        assert!((ops.ace - 2.0 * 1e-4 * 4900.0).abs() < 1e-9);
        // Counts at normal, both day fields at half, MH fields quiet: (1 + 1 + 1 + 0.5 + 0.5 + 1) / 6
        assert!((run.results[1].ntc_ofcl - 100.0 * 5.0 / 6.0).abs() < 1e-9);
    }

    #[test]
    fn empty_baseline_window_is_fatal() {
        let source = dataset(vec![steady_storm(2005, 1, "ARLENE", "TS", 50.0)]);
        let err = run_with_source(&source, &config(2005, 2005, 2005)).unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn major_hurricane_outside_a_quiet_window_is_fatal() {
        let source = dataset(vec![
            steady_storm(1950, 1, "ABLE", "HU", 80.0),
            steady_storm(1951, 1, "ABLE", "HU", 80.0),
            steady_storm(1952, 1, "BAKER", "HU", 120.0),
        ]);
        let mut config = config(1950, 1952, 1950);
        config.ntc_50_window = YearWindow::new(1950, 1951);
        config.ntc_40_window = YearWindow::new(1950, 1951);

        let err = run_with_source(&source, &config).unwrap_err();
        assert_eq!(err.exit_code(), 4);
        assert!(err.to_string().contains("MH"), "{err}");
    }

    #[test]
    fn storm_ids_follow_the_snapshot_basin() {
        let source = TrackDataset::from_json_str(
            &json!({
                "basin": "EP",
                "storms": [{
                    "id": "EP011990",
                    "name": "ALMA",
                    "observations": [
                        { "time": "1990-05-12T00:00:00Z", "type": "HU", "vmax": 80 },
                        { "time": "1990-05-12T06:00:00Z", "type": "HU", "vmax": 80 }
                    ]
                }]
            })
            .to_string(),
        )
        .unwrap();
        let run = run_with_source(&source, &config(1990, 1990, 1990)).unwrap();

        let r = &run.results[0];
        assert_eq!((r.revised.ns, r.revised.hu, r.revised.mh), (1, 1, 0));
        assert_eq!(r.revised.hu_days, 0.5);
        assert!((r.ntc_50 - 100.0).abs() < 1e-12);
    }

    #[test]
    fn inverted_year_range_is_rejected() {
        let source = dataset(vec![]);
        let err = aggregate_years(&source, &config(1990, 1980, 1980)).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
