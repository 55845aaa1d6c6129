//! Multi-year baseline means.

use tracing::info;

use crate::domain::{BaselineMeans, YearSummary, YearWindow};
use crate::error::AppError;

/// Mean of each NTC field over the revised statistics of every year in `window`.
///
/// A window with no aggregated years, or whose means are all zero, cannot normalize
/// anything and is rejected.
pub fn baseline_means(summaries: &[YearSummary], window: YearWindow) -> Result<BaselineMeans, AppError> {
    let in_window: Vec<[f64; 6]> = summaries
        .iter()
        .filter(|s| window.contains(s.year))
        .map(|s| s.revised.ntc_fields())
        .collect();

    if in_window.is_empty() {
        return Err(AppError::configuration(format!(
            "Baseline window {window} contains no aggregated seasons."
        )));
    }

    let n = in_window.len() as f64;
    let sums = in_window.iter().fold([0.0; 6], |mut acc, fields| {
        for (a, v) in acc.iter_mut().zip(fields) {
            *a += v;
        }
        acc
    });
    let means = sums.map(|s| s / n);

    if means.iter().all(|&m| m == 0.0) {
        return Err(AppError::configuration(format!(
            "Baseline window {window} has no recorded activity."
        )));
    }

    Ok(BaselineMeans {
        window,
        years: in_window.len(),
        means,
    })
}

/// Log the means the way the report has always shown them.
pub fn log_baseline(label: &str, baseline: &BaselineMeans) {
    let [ns, hu, mh, ns_days, hu_days, mh_days] = baseline.means;
    info!(
        window = %baseline.window,
        years = baseline.years,
        "{label} averages: {ns:.1},{hu:.1},{mh:.1},{ns_days:.1},{hu_days:.1},{mh_days:.1}"
    );
}
