//! JSON track snapshot adapter.
//!
//! A snapshot is an already-decoded dump of one basin's best-track records and
//! operational forecast cycles. It can be read from a local file or fetched over
//! HTTP(S); either way it is held in memory and served through `StormSource`.

use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::data::source::{SourceError, StormSource};
use crate::domain::{
    CycleSet, DEFAULT_BASIN, ForecastCycle, Observation, OperationalForecasts, StormId, StormRecord,
    StormSummary,
};
use crate::error::AppError;

/// Environment variable consulted when no snapshot location is given on the command line.
pub const SNAPSHOT_ENV: &str = "NTC_SNAPSHOT";

/// Minimum wind (kt) for an observation to accrue ACE.
const ACE_MIN_WIND: f64 = 34.0;

/// Where a snapshot lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotLocation {
    File(PathBuf),
    Url(String),
}

impl SnapshotLocation {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.starts_with("http://") || raw.starts_with("https://") {
            SnapshotLocation::Url(raw.to_string())
        } else {
            SnapshotLocation::File(PathBuf::from(raw))
        }
    }

    /// Read the location from `NTC_SNAPSHOT` (a `.env` file is honored).
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        let raw = std::env::var(SNAPSHOT_ENV).map_err(|_| {
            AppError::new(
                2,
                format!("No snapshot given: pass --snapshot or set {SNAPSHOT_ENV} (.env)."),
            )
        })?;
        Ok(Self::parse(&raw))
    }
}

impl std::fmt::Display for SnapshotLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SnapshotLocation::File(path) => write!(f, "{}", path.display()),
            SnapshotLocation::Url(url) => f.write_str(url),
        }
    }
}

/// Top-level snapshot document.
#[derive(Debug, Clone, Deserialize)]
pub struct TrackSnapshot {
    #[serde(default = "default_basin")]
    pub basin: String,
    #[serde(default)]
    pub storms: Vec<SnapshotStorm>,
}

/// One storm in a snapshot document.
#[derive(Debug, Clone, Deserialize)]
pub struct SnapshotStorm {
    pub id: StormId,
    #[serde(default)]
    pub name: String,
    /// Total ACE; derived from the observations when absent.
    #[serde(default)]
    pub ace: Option<f64>,
    #[serde(default)]
    pub observations: Vec<Observation>,
    /// Forecast cycles per operational model code.
    #[serde(default)]
    pub operational: HashMap<String, Vec<ForecastCycle>>,
}

fn default_basin() -> String {
    DEFAULT_BASIN.to_string()
}

/// In-memory storm dataset backed by a snapshot.
#[derive(Debug, Clone, Default)]
pub struct TrackDataset {
    basin: String,
    storms: BTreeMap<StormId, SnapshotStorm>,
}

impl TrackDataset {
    pub fn from_snapshot(snapshot: TrackSnapshot) -> Self {
        let basin = match snapshot.basin.trim() {
            "" => default_basin(),
            code => code.to_ascii_uppercase(),
        };
        let mut storms = BTreeMap::new();
        for storm in snapshot.storms {
            if storm.id.basin != basin {
                warn!(storm = %storm.id, basin = %basin, "storm outside the snapshot basin; ignoring");
                continue;
            }
            if storms.contains_key(&storm.id) {
                warn!(storm = %storm.id, "duplicate storm in snapshot; keeping the later record");
            }
            storms.insert(storm.id.clone(), storm);
        }
        Self { basin, storms }
    }

    pub fn from_json_str(json: &str) -> Result<Self, AppError> {
        let snapshot: TrackSnapshot = serde_json::from_str(json)
            .map_err(|e| AppError::new(3, format!("Invalid track snapshot JSON: {e}")))?;
        Ok(Self::from_snapshot(snapshot))
    }

    /// Load a snapshot from a file or URL.
    ///
    /// Remote fetches are bounded by `timeout` so a stalled server fails the run
    /// instead of hanging it.
    pub fn load(location: &SnapshotLocation, timeout: Duration) -> Result<Self, AppError> {
        let snapshot: TrackSnapshot = match location {
            SnapshotLocation::File(path) => {
                let file = File::open(path).map_err(|e| {
                    AppError::new(2, format!("Failed to open snapshot '{}': {e}", path.display()))
                })?;
                serde_json::from_reader(BufReader::new(file))
                    .map_err(|e| AppError::new(3, format!("Invalid track snapshot JSON: {e}")))?
            }
            SnapshotLocation::Url(url) => fetch_snapshot(url, timeout)?,
        };
        let dataset = Self::from_snapshot(snapshot);
        info!(
            location = %location,
            basin = %dataset.basin,
            storms = dataset.len(),
            "loaded track snapshot"
        );
        Ok(dataset)
    }

    pub fn len(&self) -> usize {
        self.storms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storms.is_empty()
    }
}

impl StormSource for TrackDataset {
    fn basin(&self) -> &str {
        &self.basin
    }

    fn season(&self, year: i32) -> Result<Vec<StormSummary>, SourceError> {
        Ok(self
            .storms
            .values()
            .filter(|s| s.id.year == year)
            .map(|s| StormSummary {
                id: s.id.clone(),
                name: s.name.clone(),
                ace: s.ace.unwrap_or_else(|| derive_ace(&s.observations)),
            })
            .collect())
    }

    fn storm(&self, id: &StormId) -> Result<StormRecord, SourceError> {
        let storm = self
            .storms
            .get(id)
            .ok_or_else(|| SourceError::NotFound(id.to_string()))?;
        if storm.observations.is_empty() {
            return Err(SourceError::Malformed {
                id: id.to_string(),
                reason: "no track observations".to_string(),
            });
        }
        let ace = match storm.ace {
            Some(ace) => ace,
            None => {
                debug!(storm = %id, "snapshot has no ACE; deriving from observations");
                derive_ace(&storm.observations)
            }
        };
        Ok(StormRecord {
            id: storm.id.clone(),
            name: storm.name.clone(),
            ace,
            observations: storm.observations.clone(),
        })
    }

    fn operational_forecasts(&self, storm: &StormRecord) -> Result<OperationalForecasts, SourceError> {
        let entry = self
            .storms
            .get(&storm.id)
            .ok_or_else(|| SourceError::NotFound(storm.id.to_string()))?;
        if entry.operational.is_empty() {
            return Err(SourceError::Unavailable(format!("no operational forecasts for {}", storm.id)));
        }
        Ok(entry
            .operational
            .iter()
            .map(|(model, cycles)| {
                let set: CycleSet = cycles.iter().map(|c| (c.init, c.clone())).collect();
                (model.clone(), set)
            })
            .collect())
    }
}

/// ACE from synoptic observations: 1e-4 × vmax² while at tropical-storm strength or above.
pub fn derive_ace(observations: &[Observation]) -> f64 {
    observations
        .iter()
        .filter(|obs| !obs.extra_obs)
        .filter(|obs| obs.storm_type.as_ref().is_some_and(|t| t.accrues_ace()))
        .filter_map(|obs| obs.vmax)
        .filter(|&v| v >= ACE_MIN_WIND)
        .map(|v| 1e-4 * v * v)
        .sum()
}

fn fetch_snapshot(url: &str, timeout: Duration) -> Result<TrackSnapshot, AppError> {
    let client = Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| AppError::new(3, format!("Failed to build HTTP client: {e}")))?;

    let resp = client
        .get(url)
        .send()
        .map_err(|e| AppError::new(3, format!("Snapshot request failed: {e}")))?;

    if !resp.status().is_success() {
        return Err(AppError::new(
            3,
            format!("Snapshot request failed with status {}.", resp.status()),
        ));
    }

    resp.json()
        .map_err(|e| AppError::new(3, format!("Failed to parse snapshot response: {e}")))
}
