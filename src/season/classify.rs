//! Nested-threshold intensity classification.
//!
//! Single source of truth for both the revised and the operational aggregation:
//! each path turns its data into `TrackPoint`s and folds them through `tally_storm`.
//!
//! Thresholds (kt):
//! - named storm: type TS/SS, 34..=63
//! - hurricane: type HU, 64..=95
//! - major hurricane: type HU, >= 96

use crate::domain::{Category, SeasonStats, StormType, TrackPoint};

/// Day credit per qualifying synoptic point (6-hourly).
pub const DAYS_PER_POINT: f64 = 0.25;

const NS_MIN: f64 = 34.0;
const NS_MAX: f64 = 63.0;
const HU_MIN: f64 = 64.0;
const HU_MAX: f64 = 95.0;
const MH_MIN: f64 = 96.0;

/// Category of a single (wind, type) sample.
pub fn point_category(wind: Option<f64>, storm_type: Option<&StormType>) -> Category {
    let (Some(wind), Some(storm_type)) = (wind, storm_type) else {
        return Category::Uncounted;
    };
    if storm_type.is_named_storm() && (NS_MIN..=NS_MAX).contains(&wind) {
        Category::NamedStorm
    } else if storm_type.is_hurricane() && (HU_MIN..=HU_MAX).contains(&wind) {
        Category::Hurricane
    } else if storm_type.is_hurricane() && wind >= MH_MIN {
        Category::MajorHurricane
    } else {
        Category::Uncounted
    }
}

/// Peak category over a storm's life.
///
/// Uses the maximum non-missing wind together with whether any point carried
/// a hurricane or named-storm type.
pub fn peak_category(points: &[TrackPoint]) -> Category {
    let peak = points
        .iter()
        .filter_map(|p| p.wind)
        .filter(|w| !w.is_nan())
        .fold(None, |acc: Option<f64>, w| Some(acc.map_or(w, |a| a.max(w))));
    let Some(peak) = peak else {
        return Category::Uncounted;
    };

    let any_hurricane = points
        .iter()
        .any(|p| p.storm_type.as_ref().is_some_and(StormType::is_hurricane));
    let any_named = points
        .iter()
        .any(|p| p.storm_type.as_ref().is_some_and(StormType::is_named_storm));

    if any_hurricane && peak >= MH_MIN {
        Category::MajorHurricane
    } else if any_hurricane && (HU_MIN..=HU_MAX).contains(&peak) {
        Category::Hurricane
    } else if any_named && (NS_MIN..=NS_MAX).contains(&peak) {
        Category::NamedStorm
    } else {
        Category::Uncounted
    }
}

/// One storm's contribution to a season, before ACE.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StormTally {
    pub category: Category,
    pub ns_days: f64,
    pub hu_days: f64,
    pub mh_days: f64,
}

/// Classify a storm by peak and credit days per qualifying point.
pub fn tally_storm(points: &[TrackPoint]) -> StormTally {
    let init = StormTally {
        category: peak_category(points),
        ns_days: 0.0,
        hu_days: 0.0,
        mh_days: 0.0,
    };
    points
        .iter()
        .filter(|p| p.earns_days)
        .fold(init, |mut tally, p| {
            let cat = point_category(p.wind, p.storm_type.as_ref());
            if cat.counts_named_storm() {
                tally.ns_days += DAYS_PER_POINT;
            }
            if cat.counts_hurricane() {
                tally.hu_days += DAYS_PER_POINT;
            }
            if cat.counts_major() {
                tally.mh_days += DAYS_PER_POINT;
            }
            tally
        })
}

impl SeasonStats {
    /// Fold step: add one storm's tally and ACE.
    pub fn with_storm(self, tally: &StormTally, ace: f64) -> SeasonStats {
        SeasonStats {
            ns: self.ns + u32::from(tally.category.counts_named_storm()),
            hu: self.hu + u32::from(tally.category.counts_hurricane()),
            mh: self.mh + u32::from(tally.category.counts_major()),
            ns_days: self.ns_days + tally.ns_days,
            hu_days: self.hu_days + tally.hu_days,
            mh_days: self.mh_days + tally.mh_days,
            ace: self.ace + ace,
        }
    }
}
