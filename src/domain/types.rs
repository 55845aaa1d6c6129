//! Storm and forecast types shared by the aggregation pipeline.
//!
//! These mirror what the storm data source hands us:
//!
//! - storm identifiers and season summaries (`StormId`, `StormSummary`)
//! - revised ("best track") records (`StormRecord`, `Observation`)
//! - operational forecast cycles (`ForecastCycle`, `CycleEntry`)
//!
//! Missing values are `None` throughout; a blank storm-type code is also `None`.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

/// Operational model code for the NHC official forecast (the "cone").
pub const MODEL_OFCL: &str = "OFCL";

/// Operational model code for the CARQ "current position" records.
pub const MODEL_CARQ: &str = "CARQ";

/// Storm-type code as recorded in HURDAT2 / ATCF records.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StormType {
    TropicalStorm,
    SubtropicalStorm,
    Hurricane,
    TropicalDepression,
    SubtropicalDepression,
    Low,
    Extratropical,
    Disturbance,
    Wave,
    /// Any other non-blank code, kept verbatim.
    Other(String),
}

impl StormType {
    /// Parse a type code. Blank codes are missing data and yield `None`.
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim();
        let parsed = match code {
            "" => return None,
            "TS" => StormType::TropicalStorm,
            "SS" => StormType::SubtropicalStorm,
            "HU" => StormType::Hurricane,
            "TD" => StormType::TropicalDepression,
            "SD" => StormType::SubtropicalDepression,
            "LO" => StormType::Low,
            "EX" => StormType::Extratropical,
            "DB" => StormType::Disturbance,
            "WV" => StormType::Wave,
            other => StormType::Other(other.to_string()),
        };
        Some(parsed)
    }

    pub fn code(&self) -> &str {
        match self {
            StormType::TropicalStorm => "TS",
            StormType::SubtropicalStorm => "SS",
            StormType::Hurricane => "HU",
            StormType::TropicalDepression => "TD",
            StormType::SubtropicalDepression => "SD",
            StormType::Low => "LO",
            StormType::Extratropical => "EX",
            StormType::Disturbance => "DB",
            StormType::Wave => "WV",
            StormType::Other(code) => code,
        }
    }

    /// Standard tropical classification from sustained wind alone (kt).
    ///
    /// Used when an operational record carries a wind speed but no type code.
    pub fn from_wind(vmax: f64) -> Self {
        if vmax < 34.0 {
            StormType::TropicalDepression
        } else if vmax < 64.0 {
            StormType::TropicalStorm
        } else {
            StormType::Hurricane
        }
    }

    /// Tropical or subtropical storm (the named-storm type codes).
    pub fn is_named_storm(&self) -> bool {
        matches!(self, StormType::TropicalStorm | StormType::SubtropicalStorm)
    }

    pub fn is_hurricane(&self) -> bool {
        matches!(self, StormType::Hurricane)
    }

    /// Types whose wind contributes to accumulated cyclone energy.
    pub fn accrues_ace(&self) -> bool {
        self.is_named_storm() || self.is_hurricane()
    }
}

impl fmt::Display for StormType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// `{basin}{2-digit number}{4-digit year}`, e.g. `AL031981`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StormId {
    pub basin: String,
    pub number: u32,
    pub year: i32,
}

impl StormId {
    pub fn new(basin: impl Into<String>, number: u32, year: i32) -> Self {
        Self {
            basin: basin.into(),
            number,
            year,
        }
    }
}

impl fmt::Display for StormId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:02}{:04}", self.basin, self.number, self.year)
    }
}

impl FromStr for StormId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.len() != 8 || !s.is_ascii() {
            return Err(format!("invalid storm id '{s}': expected BBNNYYYY"));
        }
        let (basin, rest) = s.split_at(2);
        let (number, year) = rest.split_at(2);
        if !basin.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(format!("invalid basin code in storm id '{s}'"));
        }
        if !number.bytes().all(|b| b.is_ascii_digit()) {
            return Err(format!("invalid storm number in storm id '{s}'"));
        }
        if !year.bytes().all(|b| b.is_ascii_digit()) {
            return Err(format!("invalid year in storm id '{s}'"));
        }
        let number = number
            .parse::<u32>()
            .map_err(|_| format!("invalid storm number in storm id '{s}'"))?;
        let year = year
            .parse::<i32>()
            .map_err(|_| format!("invalid year in storm id '{s}'"))?;
        Ok(StormId::new(basin.to_ascii_uppercase(), number, year))
    }
}

impl<'de> Deserialize<'de> for StormId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// One storm as listed in a season summary.
#[derive(Debug, Clone, PartialEq)]
pub struct StormSummary {
    pub id: StormId,
    pub name: String,
    pub ace: f64,
}

/// One best-track observation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Observation {
    pub time: DateTime<Utc>,
    #[serde(rename = "type", default, deserialize_with = "de_type_code")]
    pub storm_type: Option<StormType>,
    #[serde(default)]
    pub vmax: Option<f64>,
    /// Supplementary (non-synoptic) observation, e.g. a landfall point.
    #[serde(default)]
    pub extra_obs: bool,
}

/// Revised (post-season) storm record.
#[derive(Debug, Clone, PartialEq)]
pub struct StormRecord {
    pub id: StormId,
    pub name: String,
    /// Total ACE over the storm's life.
    pub ace: f64,
    pub observations: Vec<Observation>,
}

impl StormRecord {
    /// Observations as classification points; only synoptic ones earn day credit.
    pub fn track_points(&self) -> Vec<TrackPoint> {
        self.observations
            .iter()
            .map(|obs| TrackPoint {
                wind: obs.vmax,
                storm_type: obs.storm_type.clone(),
                earns_days: !obs.extra_obs,
            })
            .collect()
    }
}

/// A (wind, type) sample fed to the shared classification fold.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackPoint {
    pub wind: Option<f64>,
    pub storm_type: Option<StormType>,
    /// Whether this point contributes 0.25 day to the day counters.
    pub earns_days: bool,
}

/// One forecast-hour entry pulled out of a cycle's parallel sequences.
#[derive(Debug, Clone, PartialEq)]
pub struct CycleEntry {
    pub fhr: i32,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub vmax: Option<f64>,
    pub mslp: Option<f64>,
    pub storm_type: Option<StormType>,
}

/// One operational forecast issuance.
///
/// All sequences are indexed by the same position; `fhr` is authoritative for length.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ForecastCycle {
    pub init: DateTime<Utc>,
    #[serde(default)]
    pub fhr: Vec<i32>,
    #[serde(default)]
    pub vmax: Vec<Option<f64>>,
    #[serde(rename = "type", default, deserialize_with = "de_type_codes")]
    pub storm_type: Vec<Option<StormType>>,
    #[serde(default)]
    pub lat: Vec<Option<f64>>,
    #[serde(default)]
    pub lon: Vec<Option<f64>>,
    #[serde(default)]
    pub mslp: Vec<Option<f64>>,
}

impl ForecastCycle {
    pub fn new(init: DateTime<Utc>) -> Self {
        Self {
            init,
            fhr: Vec::new(),
            vmax: Vec::new(),
            storm_type: Vec::new(),
            lat: Vec::new(),
            lon: Vec::new(),
            mslp: Vec::new(),
        }
    }

    /// Append an entry at the end of every sequence.
    pub fn with_entry(mut self, entry: CycleEntry) -> Self {
        self.fhr.push(entry.fhr);
        self.vmax.push(entry.vmax);
        self.storm_type.push(entry.storm_type);
        self.lat.push(entry.lat);
        self.lon.push(entry.lon);
        self.mslp.push(entry.mslp);
        self
    }

    pub fn len(&self) -> usize {
        self.fhr.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fhr.is_empty()
    }

    pub fn first_hour(&self) -> Option<i32> {
        self.fhr.first().copied()
    }

    pub fn hour_at(&self, index: usize) -> Option<i32> {
        self.fhr.get(index).copied()
    }

    pub fn has_hour(&self, hour: i32) -> bool {
        self.fhr.contains(&hour)
    }

    pub fn index_of_hour(&self, hour: i32) -> Option<usize> {
        self.fhr.iter().position(|&h| h == hour)
    }

    pub fn wind_at(&self, index: usize) -> Option<f64> {
        self.vmax.get(index).copied().flatten()
    }

    pub fn type_at(&self, index: usize) -> Option<StormType> {
        self.storm_type.get(index).cloned().flatten()
    }

    /// Entry at `index`; short parallel sequences read as missing values.
    pub fn entry(&self, index: usize) -> Option<CycleEntry> {
        let fhr = self.hour_at(index)?;
        Some(CycleEntry {
            fhr,
            lat: self.lat.get(index).copied().flatten(),
            lon: self.lon.get(index).copied().flatten(),
            vmax: self.wind_at(index),
            mslp: self.mslp.get(index).copied().flatten(),
            storm_type: self.type_at(index),
        })
    }

    /// Splice an entry in front of every sequence.
    pub fn push_front(&mut self, entry: CycleEntry) {
        self.fhr.insert(0, entry.fhr);
        self.vmax.insert(0, entry.vmax);
        self.storm_type.insert(0, entry.storm_type);
        self.lat.insert(0, entry.lat);
        self.lon.insert(0, entry.lon);
        self.mslp.insert(0, entry.mslp);
    }
}

/// Forecast cycles of one model keyed by initialization time (ordered).
pub type CycleSet = BTreeMap<DateTime<Utc>, ForecastCycle>;

/// All operational models for one storm, keyed by model code.
pub type OperationalForecasts = HashMap<String, CycleSet>;

fn de_type_code<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<StormType>, D::Error> {
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(StormType::from_code))
}

fn de_type_codes<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Vec<Option<StormType>>, D::Error> {
    let raw: Vec<Option<String>> = Vec::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .map(|code| code.as_deref().and_then(StormType::from_code))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn storm_id_round_trips_display() {
        let id: StormId = "AL031981".parse().unwrap();
        assert_eq!(id, StormId::new("AL", 3, 1981));
        assert_eq!(id.to_string(), "AL031981");
        assert!("AL3198".parse::<StormId>().is_err());
        assert!("A1031981".parse::<StormId>().is_err());
    }

    #[test]
    fn storm_id_rejects_signed_fields() {
        assert!("AL+11981".parse::<StormId>().is_err());
        assert!("AL01+981".parse::<StormId>().is_err());
        assert!("AL01-981".parse::<StormId>().is_err());
    }

    #[test]
    fn blank_type_code_is_missing() {
        assert_eq!(StormType::from_code("  "), None);
        assert_eq!(StormType::from_code("HU"), Some(StormType::Hurricane));
        assert_eq!(
            StormType::from_code("XX"),
            Some(StormType::Other("XX".to_string()))
        );
    }

    #[test]
    fn type_from_wind_uses_tropical_thresholds() {
        assert_eq!(StormType::from_wind(33.0), StormType::TropicalDepression);
        assert_eq!(StormType::from_wind(34.0), StormType::TropicalStorm);
        assert_eq!(StormType::from_wind(63.0), StormType::TropicalStorm);
        assert_eq!(StormType::from_wind(64.0), StormType::Hurricane);
    }

    #[test]
    fn cycle_deserializes_nulls_and_blank_types() {
        let json = r#"{
            "init": "1985-08-01T12:00:00Z",
            "fhr": [0, 12],
            "vmax": [45, null],
            "type": ["", "TS"],
            "lat": [25.1, 26.0],
            "lon": [-80.0, -81.2],
            "mslp": [null, 1000]
        }"#;
        let cycle: ForecastCycle = serde_json::from_str(json).unwrap();
        assert_eq!(cycle.init, Utc.with_ymd_and_hms(1985, 8, 1, 12, 0, 0).unwrap());
        assert_eq!(cycle.wind_at(0), Some(45.0));
        assert_eq!(cycle.wind_at(1), None);
        assert_eq!(cycle.type_at(0), None);
        assert_eq!(cycle.type_at(1), Some(StormType::TropicalStorm));
    }

    #[test]
    fn push_front_keeps_sequences_aligned() {
        let init = Utc.with_ymd_and_hms(1990, 9, 1, 0, 0, 0).unwrap();
        let mut cycle = ForecastCycle::new(init).with_entry(CycleEntry {
            fhr: 12,
            lat: Some(20.0),
            lon: Some(-60.0),
            vmax: Some(50.0),
            mslp: None,
            storm_type: Some(StormType::TropicalStorm),
        });
        cycle.push_front(CycleEntry {
            fhr: 0,
            lat: Some(19.5),
            lon: Some(-59.0),
            vmax: Some(45.0),
            mslp: Some(1002.0),
            storm_type: None,
        });
        assert_eq!(cycle.fhr, vec![0, 12]);
        assert_eq!(cycle.lat, vec![Some(19.5), Some(20.0)]);
        assert_eq!(cycle.entry(1).unwrap().vmax, Some(50.0));
        assert_eq!(cycle.entry(2), None);
    }
}
