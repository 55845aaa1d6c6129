//! The storm/forecast query interface the pipeline consumes.

use thiserror::Error;

use crate::domain::{OperationalForecasts, StormId, StormRecord, StormSummary};

/// Failures reported by a storm data source.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SourceError {
    #[error("no record for storm {0}")]
    NotFound(String),

    #[error("malformed record for {id}: {reason}")]
    Malformed { id: String, reason: String },

    #[error("data source unavailable: {0}")]
    Unavailable(String),
}

/// Query interface over decoded storm tracks and operational forecasts.
pub trait StormSource {
    /// Basin code every storm identifier from this source carries.
    fn basin(&self) -> &str;

    /// Storms listed for a season, in storm-number order.
    fn season(&self, year: i32) -> Result<Vec<StormSummary>, SourceError>;

    /// Revised track record for one storm.
    fn storm(&self, id: &StormId) -> Result<StormRecord, SourceError>;

    /// Operational forecasts for one storm, keyed by model code then init time.
    fn operational_forecasts(&self, storm: &StormRecord) -> Result<OperationalForecasts, SourceError>;
}
