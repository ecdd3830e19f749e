//! Illustrative cost-factor breakdown.
//!
//! This is plain arithmetic on the profile with fixed, hand-picked
//! coefficients. It is not derived from the model and carries no predictive
//! meaning; every surface that shows it must also show [`ILLUSTRATIVE_NOTICE`].

use serde::Serialize;

use crate::domain::{Profile, Sex, Smoker};

pub const ILLUSTRATIVE_NOTICE: &str =
    "Illustrative only: fixed example coefficients, not derived from the model.";

const AGE_PER_YEAR: f64 = 100.0;
const BMI_REFERENCE: f64 = 25.0;
const BMI_PER_POINT: f64 = 150.0;
const SMOKER_FLAT: f64 = 8000.0;
const PER_DEPENDENT: f64 = 500.0;
const MALE_FLAT: f64 = 300.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CostFactor {
    Age,
    Bmi,
    Smoking,
    Dependents,
    Gender,
    Region,
}

impl CostFactor {
    pub const ALL: [CostFactor; 6] = [
        CostFactor::Age,
        CostFactor::Bmi,
        CostFactor::Smoking,
        CostFactor::Dependents,
        CostFactor::Gender,
        CostFactor::Region,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            CostFactor::Age => "Age",
            CostFactor::Bmi => "BMI",
            CostFactor::Smoking => "Smoking",
            CostFactor::Dependents => "Dependents",
            CostFactor::Gender => "Gender",
            CostFactor::Region => "Region",
        }
    }

    pub fn impact(self, p: &Profile) -> f64 {
        match self {
            CostFactor::Age => f64::from(p.age) * AGE_PER_YEAR,
            CostFactor::Bmi => (p.bmi - BMI_REFERENCE) * BMI_PER_POINT,
            CostFactor::Smoking => match p.smoker {
                Smoker::Yes => SMOKER_FLAT,
                Smoker::No => 0.0,
            },
            CostFactor::Dependents => f64::from(p.dependents) * PER_DEPENDENT,
            CostFactor::Gender => match p.sex {
                Sex::Male => MALE_FLAT,
                Sex::Female => 0.0,
            },
            CostFactor::Region => 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FactorImpact {
    pub factor: CostFactor,
    pub impact: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostBreakdown {
    pub illustrative: bool,
    pub factors: Vec<FactorImpact>,
}

impl CostBreakdown {
    pub fn get(&self, factor: CostFactor) -> Option<f64> {
        self.factors
            .iter()
            .find(|f| f.factor == factor)
            .map(|f| f.impact)
    }
}

/// Compute the illustrative breakdown for a profile.
pub fn illustrative_breakdown(profile: &Profile) -> CostBreakdown {
    CostBreakdown {
        illustrative: true,
        factors: CostFactor::ALL
            .iter()
            .map(|&factor| FactorImpact {
                factor,
                impact: factor.impact(profile),
            })
            .collect(),
    }
}
