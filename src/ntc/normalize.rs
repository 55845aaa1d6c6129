//! NTC normalization against baseline means.

use serde::Serialize;

use crate::domain::{BaselineMeans, NTC_FIELD_NAMES, NtcConfig, NtcResult, SeasonStats, YearSummary};
use crate::error::AppError;

/// The two reference baselines.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Baselines {
    /// 1950-2000 window (NTC_50).
    pub ntc_50: BaselineMeans,
    /// 1950-1990 window (NTC_40).
    pub ntc_40: BaselineMeans,
}

/// NTC in percent of normal: 100 × the mean of the six field ratios.
///
/// A field with a zero baseline mean is at normal (ratio 1) while the season has none
/// of it either. Any activity in such a field has no defined ratio and is rejected.
pub fn ntc_index(stats: &SeasonStats, baseline: &BaselineMeans) -> Result<f64, AppError> {
    let mut total = 0.0;
    for ((value, mean), name) in stats
        .ntc_fields()
        .into_iter()
        .zip(baseline.means)
        .zip(NTC_FIELD_NAMES)
    {
        total += if mean > 0.0 {
            value / mean
        } else if value == 0.0 {
            1.0
        } else {
            return Err(AppError::configuration(format!(
                "Baseline window {} has a zero {name} mean but the season recorded {value}.",
                baseline.window
            )));
        };
    }
    Ok(100.0 * total / NTC_FIELD_NAMES.len() as f64)
}

/// Baseline for the operational index of `year`.
///
/// Up to the switch year the 1950-1990 window is used, afterwards 1950-2000.
pub fn operational_baseline<'a>(year: i32, baselines: &'a Baselines, config: &NtcConfig) -> &'a BaselineMeans {
    if year > config.ofcl_baseline_switch {
        &baselines.ntc_50
    } else {
        &baselines.ntc_40
    }
}

/// Normalize every year.
pub fn normalize(
    summaries: &[YearSummary],
    baselines: &Baselines,
    config: &NtcConfig,
) -> Result<Vec<NtcResult>, AppError> {
    summaries
        .iter()
        .map(|summary| -> Result<NtcResult, AppError> {
            let year = summary.year;
            let in_year = |err: AppError| AppError::configuration(format!("{year}: {err}"));
            let operational = summary.operational.filter(|_| config.has_operational(year));
            let ntc_ofcl = match operational {
                Some(ops) => ntc_index(&ops, operational_baseline(year, baselines, config)).map_err(in_year)?,
                None => 0.0,
            };
            Ok(NtcResult {
                year,
                ace: summary.revised.ace,
                revised: summary.revised,
                operational,
                ntc_50: ntc_index(&summary.revised, &baselines.ntc_50).map_err(in_year)?,
                ntc_40: ntc_index(&summary.revised, &baselines.ntc_40).map_err(in_year)?,
                ntc_ofcl,
            })
        })
        .collect()
}
