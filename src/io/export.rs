//! Export an estimate to JSON.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream scripts.

use std::fs::File;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::app::pipeline::Estimate;
use crate::breakdown::ILLUSTRATIVE_NOTICE;
use crate::error::AppError;

#[derive(Debug, Serialize)]
struct EstimateExport<'a> {
    tool: &'static str,
    generated_at: DateTime<Utc>,
    model: &'a str,
    #[serde(flatten)]
    estimate: &'a Estimate,
    #[serde(skip_serializing_if = "Option::is_none")]
    breakdown_notice: Option<&'static str>,
}

/// Write an estimate as pretty JSON.
pub fn write_estimate_json(path: &Path, estimate: &Estimate, model_name: &str) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(1, format!("Failed to create export JSON '{}': {e}", path.display())))?;

    let export = EstimateExport {
        tool: "medinsure",
        generated_at: Utc::now(),
        model: model_name,
        estimate,
        breakdown_notice: estimate.breakdown.as_ref().map(|_| ILLUSTRATIVE_NOTICE),
    };

    serde_json::to_writer_pretty(file, &export)
        .map_err(|e| AppError::new(1, format!("Failed to write export JSON: {e}")))?;

    Ok(())
}
