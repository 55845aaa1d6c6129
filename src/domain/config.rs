//! Run configuration and the fixed domain constants behind its defaults.

use std::time::Duration;

use crate::domain::YearWindow;

/// First season aggregated.
pub const FIRST_YEAR: i32 = 1950;
/// Last season aggregated.
pub const LAST_YEAR: i32 = 2019;
/// First season printed in the report.
pub const START_PRINTING: i32 = 1980;
/// Operational cone records do not exist before this season.
pub const OPERATIONAL_FLOOR: i32 = 1954;
/// Storm names that never count toward any statistic.
pub const EXCLUDED_NAMES: [&str; 1] = ["UNNAMED"];
/// NTC_50 baseline window.
pub const WINDOW_1950_2000: YearWindow = YearWindow::new(1950, 2000);
/// NTC_40 baseline window.
pub const WINDOW_1950_1990: YearWindow = YearWindow::new(1950, 1990);
/// Operational NTC uses the 1950-1990 baseline up to and including this season.
pub const OFCL_BASELINE_SWITCH: i32 = 2001;
/// Basin assumed when a snapshot does not name one.
pub const DEFAULT_BASIN: &str = "AL";

#[derive(Debug, Clone)]
pub struct NtcConfig {
    pub first_year: i32,
    pub last_year: i32,
    pub start_year: i32,
    pub excluded_names: Vec<String>,
    pub ntc_50_window: YearWindow,
    pub ntc_40_window: YearWindow,
    pub ofcl_baseline_switch: i32,
    /// Timeout for remote snapshot fetches.
    pub fetch_timeout: Duration,
}

impl Default for NtcConfig {
    fn default() -> Self {
        Self {
            first_year: FIRST_YEAR,
            last_year: LAST_YEAR,
            start_year: START_PRINTING,
            excluded_names: EXCLUDED_NAMES.iter().map(|s| s.to_string()).collect(),
            ntc_50_window: WINDOW_1950_2000,
            ntc_40_window: WINDOW_1950_1990,
            ofcl_baseline_switch: OFCL_BASELINE_SWITCH,
            fetch_timeout: Duration::from_secs(60),
        }
    }
}

impl NtcConfig {
    /// Operational reconciliation runs only for seasons strictly after this year.
    pub fn operational_start(&self) -> i32 {
        self.start_year.max(OPERATIONAL_FLOOR)
    }

    pub fn has_operational(&self, year: i32) -> bool {
        year > self.operational_start()
    }

    pub fn is_excluded(&self, name: &str) -> bool {
        self.excluded_names.iter().any(|n| n == name)
    }

    pub fn years(&self) -> std::ops::RangeInclusive<i32> {
        self.first_year..=self.last_year
    }
}
