//! Revised (best-track) season aggregation.

use tracing::{debug, warn};

use crate::data::{SourceError, StormSource};
use crate::domain::{NtcConfig, SeasonStats, StormId, StormRecord};
use crate::season::classify::tally_storm;

/// Revised statistics for one season plus the storms that fed them.
///
/// The storms are handed on to operational reconciliation so nothing is fetched twice.
#[derive(Debug, Clone)]
pub struct SeasonAggregate {
    pub year: i32,
    pub stats: SeasonStats,
    pub storms: Vec<StormRecord>,
}

/// Aggregate one season from revised track data.
///
/// Storms that cannot be retrieved or whose name is excluded are skipped; only a
/// failure to list the season itself is returned as an error.
pub fn aggregate_season<S: StormSource + ?Sized>(
    source: &S,
    year: i32,
    config: &NtcConfig,
) -> Result<SeasonAggregate, SourceError> {
    let summaries = source.season(year)?;
    let listed_ace: f64 = summaries.iter().map(|s| s.ace).sum();
    let count = summaries.len() as u32;

    let storms: Vec<StormRecord> = (1..=count)
        .map(|number| StormId::new(source.basin(), number, year))
        .filter_map(|id| fetch_counted_storm(source, &id, config))
        .collect();

    let stats = storms.iter().fold(SeasonStats::default(), |acc, storm| {
        acc.with_storm(&tally_storm(&storm.track_points()), storm.ace)
    });

    debug!(
        year,
        listed = count,
        counted = storms.len(),
        listed_ace,
        accumulated_ace = stats.ace,
        "revised season aggregated"
    );

    Ok(SeasonAggregate { year, stats, storms })
}

fn fetch_counted_storm<S: StormSource + ?Sized>(
    source: &S,
    id: &StormId,
    config: &NtcConfig,
) -> Option<StormRecord> {
    let storm = match source.storm(id) {
        Ok(storm) => storm,
        Err(err) => {
            warn!(storm = %id, error = %err, "data for storm does not exist; skipping");
            return None;
        }
    };
    if config.is_excluded(&storm.name) {
        debug!(storm = %id, name = %storm.name, "excluded storm name; skipping");
        return None;
    }
    Some(storm)
}
