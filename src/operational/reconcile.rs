//! Season statistics from operational (real-time) forecast data.

use tracing::{debug, info, warn};

use crate::data::StormSource;
use crate::domain::{CycleSet, MODEL_CARQ, MODEL_OFCL, SeasonStats, StormId, StormRecord, TrackPoint};
use crate::operational::backfill::backfill_cycles;
use crate::operational::extract::{CycleOutcome, Estimate, EstimateSource, SkipReason, extract_estimate};
use crate::season::classify::{StormTally, tally_storm};

/// Operational estimates for one storm, one per usable forecast cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct StormEstimates {
    pub id: StormId,
    pub estimates: Vec<Estimate>,
    pub skipped: usize,
}

/// Backfill, then extract one estimate per official cycle in init-time order.
pub fn reconcile_cycles(id: &StormId, ofcl: CycleSet, carq: &CycleSet) -> StormEstimates {
    let cycles = backfill_cycles(ofcl, carq);
    let mut estimates: Vec<Estimate> = Vec::with_capacity(cycles.len());
    let mut skipped = 0;

    for reconciled in &cycles {
        let cycle = &reconciled.cycle;
        if cycle.is_empty() {
            debug!(storm = %id, init = %cycle.init, "official cycle has no entries");
        }
        match extract_estimate(reconciled, estimates.last()) {
            CycleOutcome::Used { estimate, source } => {
                match source {
                    EstimateSource::Initial { disagrees_with_next: true } => warn!(
                        storm = %id,
                        init = %cycle.init,
                        fhr = ?cycle.fhr,
                        vmax = ?cycle.vmax,
                        "0-hour wind differs from the next entry within six hours"
                    ),
                    EstimateSource::CarriedForward => info!(
                        storm = %id,
                        init = %cycle.init,
                        fhr = ?cycle.fhr,
                        wind = ?estimate.wind,
                        "reusing previous cycle estimate"
                    ),
                    _ => {}
                }
                estimates.push(estimate);
            }
            CycleOutcome::Skipped(reason) => {
                skipped += 1;
                match reason {
                    SkipReason::MissingInitialData => {
                        warn!(storm = %id, init = %cycle.init, "data gap: {reason}")
                    }
                    _ => debug!(storm = %id, init = %cycle.init, fhr = ?cycle.fhr, "cycle skipped: {reason}"),
                }
            }
        }
    }

    StormEstimates {
        id: id.clone(),
        estimates,
        skipped,
    }
}

/// Tally estimates through the shared classification; every estimate earns day credit.
///
/// Returns the tally and the operational ACE.
pub fn tally_estimates(estimates: &[Estimate]) -> (StormTally, f64) {
    let points: Vec<TrackPoint> = estimates
        .iter()
        .map(|e| TrackPoint {
            wind: e.wind,
            storm_type: e.storm_type.clone(),
            earns_days: true,
        })
        .collect();

    let ace: f64 = estimates
        .iter()
        .filter(|e| e.storm_type.as_ref().is_some_and(|t| t.accrues_ace()))
        .filter_map(|e| e.wind)
        .filter(|w| !w.is_nan())
        .map(|w| 1e-4 * w * w)
        .sum();

    (tally_storm(&points), ace)
}

/// Operational estimates for one storm, or `None` when its forecasts are unavailable.
pub fn storm_estimates<S: StormSource + ?Sized>(source: &S, storm: &StormRecord) -> Option<StormEstimates> {
    let mut forecasts = match source.operational_forecasts(storm) {
        Ok(forecasts) => forecasts,
        Err(err) => {
            warn!(storm = %storm.id, error = %err, "operational forecasts unavailable; skipping");
            return None;
        }
    };
    let Some(ofcl) = forecasts.remove(MODEL_OFCL) else {
        warn!(storm = %storm.id, "no official forecast cycles; skipping");
        return None;
    };
    let carq = forecasts.remove(MODEL_CARQ).unwrap_or_default();
    Some(reconcile_cycles(&storm.id, ofcl, &carq))
}

/// Operational season statistics over the storms already retrieved for the year.
pub fn reconcile_season<S: StormSource + ?Sized>(source: &S, storms: &[StormRecord]) -> SeasonStats {
    storms
        .iter()
        .filter_map(|storm| {
            let estimates = storm_estimates(source, storm)?;
            let (tally, ace) = tally_estimates(&estimates.estimates);
            debug!(
                storm = %storm.id,
                name = %storm.name,
                cycles = estimates.estimates.len(),
                skipped = estimates.skipped,
                category = ?tally.category,
                ns_days = tally.ns_days,
                hu_days = tally.hu_days,
                mh_days = tally.mh_days,
                ace,
                "operational storm tally"
            );
            if ace < 0.1 {
                debug!(storm = %storm.id, "operational ACE below 0.1");
            }
            Some((tally, ace))
        })
        .fold(SeasonStats::default(), |acc, (tally, ace)| acc.with_storm(&tally, ace))
}
