//! Season statistics and index outputs.

use serde::Serialize;

/// Names of the six NTC fields, in `SeasonStats::ntc_fields` order.
pub const NTC_FIELD_NAMES: [&str; 6] = ["NS", "HU", "MH", "NS_days", "HU_days", "MH_days"];

/// Nested intensity category. Ordering follows intensity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Category {
    Uncounted,
    NamedStorm,
    Hurricane,
    MajorHurricane,
}

impl Category {
    pub fn counts_named_storm(self) -> bool {
        self >= Category::NamedStorm
    }

    pub fn counts_hurricane(self) -> bool {
        self >= Category::Hurricane
    }

    pub fn counts_major(self) -> bool {
        self >= Category::MajorHurricane
    }
}

/// Accumulated statistics for one season from one data source.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct SeasonStats {
    pub ns: u32,
    pub hu: u32,
    pub mh: u32,
    pub ns_days: f64,
    pub hu_days: f64,
    pub mh_days: f64,
    pub ace: f64,
}

impl SeasonStats {
    /// The six fields NTC is built from (ACE excluded).
    pub fn ntc_fields(&self) -> [f64; 6] {
        [
            f64::from(self.ns),
            f64::from(self.hu),
            f64::from(self.mh),
            self.ns_days,
            self.hu_days,
            self.mh_days,
        ]
    }
}

/// Closed year range `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearWindow {
    pub start: i32,
    pub end: i32,
}

impl YearWindow {
    pub const fn new(start: i32, end: i32) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, year: i32) -> bool {
        (self.start..=self.end).contains(&year)
    }
}

impl std::fmt::Display for YearWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Mean of each NTC field over a baseline window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BaselineMeans {
    pub window: YearWindow,
    /// Number of aggregated years that fell inside the window.
    pub years: usize,
    pub means: [f64; 6],
}

/// Both aggregations for one year.
#[derive(Debug, Clone, PartialEq)]
pub struct YearSummary {
    pub year: i32,
    pub revised: SeasonStats,
    /// Present only for years after the operational-data start year.
    pub operational: Option<SeasonStats>,
}

/// Final per-year index record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NtcResult {
    pub year: i32,
    pub ace: f64,
    pub revised: SeasonStats,
    pub operational: Option<SeasonStats>,
    /// NTC normalized to the 1950-2000 baseline.
    pub ntc_50: f64,
    /// NTC normalized to the 1950-1990 baseline.
    pub ntc_40: f64,
    /// Operational NTC; `0.0` when the year has no operational estimate.
    pub ntc_ofcl: f64,
}

impl NtcResult {
    /// Operational ACE, `0.0` when the year has no operational estimate.
    pub fn ofcl_ace(&self) -> f64 {
        self.operational.map(|s| s.ace).unwrap_or(0.0)
    }
}
