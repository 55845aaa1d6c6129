//! Export per-year index results to JSON.
//!
//! The export carries everything the text report drops (raw season statistics,
//! operational statistics, NTC_40, both baselines) for downstream scripts.

use std::fs::File;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::NtcResult;
use crate::error::AppError;
use crate::ntc::Baselines;

#[derive(Debug, Serialize)]
struct ExportFile<'a> {
    tool: &'static str,
    generated: DateTime<Utc>,
    baselines: &'a Baselines,
    years: &'a [NtcResult],
}

/// Write all results plus the baselines as pretty JSON.
pub fn write_results_json(path: &Path, results: &[NtcResult], baselines: &Baselines) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export JSON '{}': {e}", path.display())))?;

    let export = ExportFile {
        tool: "ntc",
        generated: Utc::now(),
        baselines,
        years: results,
    };

    serde_json::to_writer_pretty(file, &export)
        .map_err(|e| AppError::new(2, format!("Failed to write export JSON: {e}")))?;

    Ok(())
}
