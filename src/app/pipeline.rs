//! Shared "estimate" logic used by both CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the workflow:
//! validate -> predict -> (optional) illustrative breakdown
//!
//! The CLI and the TUI can then focus on presentation (printing vs widgets).

use serde::Serialize;

use crate::breakdown::{CostBreakdown, illustrative_breakdown};
use crate::domain::{PredictionResult, Profile};
use crate::error::PredictError;
use crate::service::PredictionService;

/// Everything computed for one submitted profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Estimate {
    pub profile: Profile,
    pub prediction: PredictionResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<CostBreakdown>,
}

pub fn run_estimate(
    service: &PredictionService,
    profile: &Profile,
    include_breakdown: bool,
) -> Result<Estimate, PredictError> {
    let prediction = service.predict(profile)?;

    // The breakdown is computed from the profile alone, after the prediction
    // succeeded, so it is never shown next to a failed estimate.
    let breakdown = include_breakdown.then(|| illustrative_breakdown(profile));

    Ok(Estimate {
        profile: *profile,
        prediction,
        breakdown,
    })
}
