//! Text report formatting.
//!
//! We keep formatting code in one place so:
//! - the aggregation code stays free of presentation concerns
//! - the committed line shape (`year,ACE,NTC_50`) is pinned by tests

use std::time::Duration;

use crate::domain::NtcResult;

/// Header of the standard report.
pub const REPORT_HEADER: &str = "year,ACE,NTC_50";

/// Header of the detailed report.
pub const DETAILED_HEADER: &str = "year,ACE,OFCL_ACE,NTC_50,NTC_OFCL";

/// `year,ACE,NTC_50` for every year from `start_year` on.
pub fn format_report(results: &[NtcResult], start_year: i32) -> String {
    let mut out = String::new();
    out.push_str(REPORT_HEADER);
    out.push('\n');
    for r in results.iter().filter(|r| r.year >= start_year) {
        out.push_str(&format!("{},{:.1},{:.1}\n", r.year, r.ace, r.ntc_50));
    }
    out
}

/// `year,ACE,OFCL_ACE,NTC_50,NTC_OFCL`; NTC_OFCL reads `--` without operational data.
pub fn format_detailed_report(results: &[NtcResult], start_year: i32) -> String {
    let mut out = String::new();
    out.push_str(DETAILED_HEADER);
    out.push('\n');
    for r in results.iter().filter(|r| r.year >= start_year) {
        let ntc_ofcl = match r.operational {
            Some(_) => format!("{:.1}", r.ntc_ofcl),
            None => "--".to_string(),
        };
        out.push_str(&format!(
            "{},{:.1},{:.1},{:.1},{}\n",
            r.year,
            r.ace,
            r.ofcl_ace(),
            r.ntc_50,
            ntc_ofcl
        ));
    }
    out
}

/// `12.34 seconds`, or `m:ss.ss minutes` past one minute.
pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs_f64();
    if secs > 60.0 {
        let minutes = (secs / 60.0).floor();
        let rest = secs - minutes * 60.0;
        format!("{minutes:.0}:{rest:05.2} minutes")
    } else {
        format!("{secs:.2} seconds")
    }
}
