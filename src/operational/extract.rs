//! Pick the storm's state at issuance time from one official forecast cycle.
//!
//! Priority:
//! 1. the 3-hour entry at index 1
//! 2. the 3-hour entry at index 2 when index 0 is the 0-hour entry
//! 3. the 0-hour entry at index 0 (cycles with more than one entry)
//! 4. index 0 of a cycle backfilled from CARQ
//! 5. the previous cycle's estimate, carried forward
//!
//! A cycle whose 3-hour entry sits anywhere else is skipped.

use crate::domain::StormType;
use crate::operational::backfill::ReconciledCycle;

/// Hour of the operational "current state" in official forecasts.
const ANCHOR_HOUR: i32 = 3;

/// Latest index-1 forecast hour at which a wind change from the 0-hour entry is suspicious.
const CONSISTENCY_WINDOW_HOURS: i32 = 6;

/// Best-estimate (wind, type) for one forecast cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct Estimate {
    pub wind: Option<f64>,
    pub storm_type: Option<StormType>,
}

impl Estimate {
    fn at(reconciled: &ReconciledCycle, index: usize) -> Self {
        Self {
            wind: reconciled.cycle.wind_at(index),
            storm_type: reconciled.cycle.type_at(index),
        }
    }
}

/// Which rule produced an estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EstimateSource {
    /// 3-hour anchor at the given index.
    Anchor(usize),
    /// 0-hour entry. `disagrees_with_next` flags an index-1 wind within six hours that differs.
    Initial { disagrees_with_next: bool },
    /// 0-hour entry spliced in from CARQ.
    Backfilled,
    /// Reused from the previous cycle.
    CarriedForward,
}

/// Why a cycle produced nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// 3-hour entry present but not at a usable index.
    MisplacedAnchor,
    /// 0-hour entry with neither wind nor type.
    MissingInitialData,
    /// No entry to use and nothing to carry forward.
    NoUsableEntry,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::MisplacedAnchor => write!(f, "3-hour entry at an unexpected position"),
            SkipReason::MissingInitialData => write!(f, "0-hour wind and type are both missing"),
            SkipReason::NoUsableEntry => write!(f, "no usable entry"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CycleOutcome {
    Used { estimate: Estimate, source: EstimateSource },
    Skipped(SkipReason),
}

/// Apply the extraction priority to one cycle.
///
/// `previous` is the most recent estimate produced for the same storm.
pub fn extract_estimate(reconciled: &ReconciledCycle, previous: Option<&Estimate>) -> CycleOutcome {
    let cycle = &reconciled.cycle;

    if cycle.has_hour(ANCHOR_HOUR) {
        if cycle.hour_at(1) == Some(ANCHOR_HOUR) {
            return used(Estimate::at(reconciled, 1), EstimateSource::Anchor(1));
        }
        if cycle.hour_at(2) == Some(ANCHOR_HOUR) && cycle.first_hour() == Some(0) {
            return used(Estimate::at(reconciled, 2), EstimateSource::Anchor(2));
        }
        return CycleOutcome::Skipped(SkipReason::MisplacedAnchor);
    }

    if cycle.len() > 1 && cycle.first_hour() == Some(0) {
        let initial = Estimate::at(reconciled, 0);
        if initial.wind.is_none() && initial.storm_type.is_none() {
            return CycleOutcome::Skipped(SkipReason::MissingInitialData);
        }
        let disagrees_with_next = match (initial.wind, cycle.wind_at(1)) {
            (Some(w0), Some(w1)) => {
                w0 != w1 && cycle.hour_at(1).is_some_and(|h| h <= CONSISTENCY_WINDOW_HOURS)
            }
            _ => false,
        };
        return used(initial, EstimateSource::Initial { disagrees_with_next });
    }

    if reconciled.backfilled && !cycle.is_empty() {
        return used(Estimate::at(reconciled, 0), EstimateSource::Backfilled);
    }

    match previous.filter(|p| p.wind != Some(0.0)) {
        Some(prev) => used(prev.clone(), EstimateSource::CarriedForward),
        None => CycleOutcome::Skipped(SkipReason::NoUsableEntry),
    }
}

fn used(estimate: Estimate, source: EstimateSource) -> CycleOutcome {
    CycleOutcome::Used { estimate, source }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CycleEntry, ForecastCycle};
    use chrono::{TimeZone, Utc};

    fn cycle(entries: &[(i32, Option<f64>, &str)], backfilled: bool) -> ReconciledCycle {
        let init = Utc.with_ymd_and_hms(1999, 8, 20, 0, 0, 0).unwrap();
        let cycle = entries.iter().fold(ForecastCycle::new(init), |c, &(fhr, vmax, code)| {
            c.with_entry(CycleEntry {
                fhr,
                lat: None,
                lon: None,
                vmax,
                mslp: None,
                storm_type: StormType::from_code(code),
            })
        });
        ReconciledCycle { cycle, backfilled }
    }

    fn estimate(wind: f64, code: &str) -> Estimate {
        Estimate {
            wind: Some(wind),
            storm_type: StormType::from_code(code),
        }
    }

    #[test]
    fn anchor_at_index_one_wins() {
        let c = cycle(&[(0, Some(50.0), "TS"), (3, Some(55.0), "TS"), (12, Some(65.0), "HU")], true);
        assert_eq!(
            extract_estimate(&c, None),
            CycleOutcome::Used {
                estimate: estimate(55.0, "TS"),
                source: EstimateSource::Anchor(1)
            }
        );
    }

    #[test]
    fn anchor_at_index_two_requires_initial_hour() {
        let c = cycle(&[(0, Some(50.0), "TS"), (0, Some(51.0), "TS"), (3, Some(70.0), "HU")], false);
        assert_eq!(
            extract_estimate(&c, None),
            CycleOutcome::Used {
                estimate: estimate(70.0, "HU"),
                source: EstimateSource::Anchor(2)
            }
        );

        let c = cycle(&[(-6, Some(50.0), "TS"), (0, Some(51.0), "TS"), (3, Some(70.0), "HU")], false);
        assert_eq!(extract_estimate(&c, None), CycleOutcome::Skipped(SkipReason::MisplacedAnchor));
    }

    #[test]
    fn lone_anchor_is_misplaced() {
        let c = cycle(&[(3, Some(50.0), "TS")], false);
        assert_eq!(extract_estimate(&c, None), CycleOutcome::Skipped(SkipReason::MisplacedAnchor));
    }

    #[test]
    fn initial_entry_used_without_anchor() {
        let c = cycle(&[(0, Some(45.0), "TS"), (12, Some(50.0), "TS")], false);
        assert_eq!(
            extract_estimate(&c, None),
            CycleOutcome::Used {
                estimate: estimate(45.0, "TS"),
                source: EstimateSource::Initial { disagrees_with_next: false }
            }
        );
    }

    #[test]
    fn initial_entry_flags_early_wind_change() {
        let c = cycle(&[(0, Some(45.0), "TS"), (6, Some(50.0), "TS")], false);
        match extract_estimate(&c, None) {
            CycleOutcome::Used { source, .. } => {
                assert_eq!(source, EstimateSource::Initial { disagrees_with_next: true })
            }
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[test]
    fn initial_entry_without_data_is_a_gap() {
        let c = cycle(&[(0, None, ""), (12, Some(50.0), "TS")], false);
        let prev = estimate(40.0, "TS");
        assert_eq!(
            extract_estimate(&c, Some(&prev)),
            CycleOutcome::Skipped(SkipReason::MissingInitialData)
        );
    }

    #[test]
    fn single_backfilled_entry_is_used() {
        let c = cycle(&[(0, Some(35.0), "TS")], true);
        assert_eq!(
            extract_estimate(&c, None),
            CycleOutcome::Used {
                estimate: estimate(35.0, "TS"),
                source: EstimateSource::Backfilled
            }
        );
    }

    #[test]
    fn previous_estimate_is_carried_forward() {
        let c = cycle(&[(12, Some(60.0), "TS"), (24, Some(70.0), "HU")], false);
        let prev = estimate(55.0, "TS");
        assert_eq!(
            extract_estimate(&c, Some(&prev)),
            CycleOutcome::Used {
                estimate: prev.clone(),
                source: EstimateSource::CarriedForward
            }
        );
    }

    #[test]
    fn previous_estimate_without_wind_is_carried_forward() {
        let c = cycle(&[(12, Some(60.0), "TS")], false);
        let prev = Estimate {
            wind: None,
            storm_type: Some(StormType::TropicalStorm),
        };
        assert_eq!(
            extract_estimate(&c, Some(&prev)),
            CycleOutcome::Used {
                estimate: prev.clone(),
                source: EstimateSource::CarriedForward
            }
        );
    }

    #[test]
    fn nothing_to_carry_forward_skips() {
        let c = cycle(&[], false);
        assert_eq!(extract_estimate(&c, None), CycleOutcome::Skipped(SkipReason::NoUsableEntry));
        let zero = estimate(0.0, "TS");
        assert_eq!(
            extract_estimate(&c, Some(&zero)),
            CycleOutcome::Skipped(SkipReason::NoUsableEntry)
        );
    }
}
