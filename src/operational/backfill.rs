//! Restore missing initial entries of official forecast cycles from CARQ.
//!
//! Early cone records often start at the 12-hour forecast (or carry nothing at all).
//! The CARQ record issued at the same init time usually holds the 0-hour position and
//! intensity, which is spliced in front of the cycle.

use crate::domain::{CycleSet, ForecastCycle, StormType};

/// An official cycle after the backfill pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ReconciledCycle {
    pub cycle: ForecastCycle,
    /// The 0-hour entry came from CARQ.
    pub backfilled: bool,
}

/// Empty cycles and cycles starting at the 12-hour forecast lack an initial entry.
pub fn needs_backfill(cycle: &ForecastCycle) -> bool {
    cycle.is_empty() || cycle.first_hour() == Some(12)
}

/// Backfill one cycle from the CARQ record at the same init time, if there is one.
pub fn backfill_cycle(mut cycle: ForecastCycle, carq: &CycleSet) -> ReconciledCycle {
    if !needs_backfill(&cycle) {
        return ReconciledCycle {
            cycle,
            backfilled: false,
        };
    }

    let initial = carq
        .get(&cycle.init)
        .and_then(|c| c.index_of_hour(0).and_then(|idx| c.entry(idx)));

    match initial {
        Some(mut entry) => {
            if entry.storm_type.is_none() {
                entry.storm_type = entry.vmax.map(StormType::from_wind);
            }
            cycle.push_front(entry);
            ReconciledCycle {
                cycle,
                backfilled: true,
            }
        }
        None => ReconciledCycle {
            cycle,
            backfilled: false,
        },
    }
}

/// Backfill every official cycle, keeping init-time order.
pub fn backfill_cycles(ofcl: CycleSet, carq: &CycleSet) -> Vec<ReconciledCycle> {
    ofcl.into_values()
        .map(|cycle| backfill_cycle(cycle, carq))
        .collect()
}
