//! The single-row feature record handed to the model.
//!
//! The model was trained on a table with the columns
//! `age, sex, bmi, children, smoker, region` in that order. A `FeatureRecord`
//! can only be built from a validated `Profile`, and its accessors always walk
//! the columns in that order, so no caller can assemble a row with swapped
//! columns.
//!
//! Numeric models see the encoded form: continuous columns pass through and the
//! categoricals are expanded the way the training pipeline's encoder did it
//! (`sex_male`, `smoker_yes`, and one indicator per region).

use crate::domain::{Profile, Region, Sex, Smoker};
use crate::error::PredictError;

/// Raw columns in trained order.
pub const RAW_COLUMNS: [&str; 6] = ["age", "sex", "bmi", "children", "smoker", "region"];

/// Encoded columns in trained order.
pub const ENCODED_COLUMNS: [&str; 9] = [
    "age",
    "sex_male",
    "bmi",
    "children",
    "smoker_yes",
    "region_northeast",
    "region_northwest",
    "region_southeast",
    "region_southwest",
];

/// One raw cell of the record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FeatureValue {
    Int(u32),
    Float(f64),
    Category(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureRecord {
    age: u32,
    sex: Sex,
    bmi: f64,
    children: u32,
    smoker: Smoker,
    region: Region,
}

impl FeatureRecord {
    pub fn from_profile(profile: &Profile) -> Result<Self, PredictError> {
        profile.validate()?;
        Ok(Self {
            age: profile.age,
            sex: profile.sex,
            bmi: profile.bmi,
            children: profile.dependents,
            smoker: profile.smoker,
            region: profile.region,
        })
    }

    /// `(column, value)` pairs in trained order.
    pub fn columns(&self) -> [(&'static str, FeatureValue); 6] {
        [
            (RAW_COLUMNS[0], FeatureValue::Int(self.age)),
            (RAW_COLUMNS[1], FeatureValue::Category(self.sex.as_str())),
            (RAW_COLUMNS[2], FeatureValue::Float(self.bmi)),
            (RAW_COLUMNS[3], FeatureValue::Int(self.children)),
            (RAW_COLUMNS[4], FeatureValue::Category(self.smoker.as_str())),
            (RAW_COLUMNS[5], FeatureValue::Category(self.region.as_str())),
        ]
    }

    pub fn encode(&self) -> EncodedRow {
        let flag = |b: bool| if b { 1.0 } else { 0.0 };
        EncodedRow {
            values: [
                f64::from(self.age),
                flag(self.sex == Sex::Male),
                self.bmi,
                f64::from(self.children),
                flag(self.smoker == Smoker::Yes),
                flag(self.region == Region::Northeast),
                flag(self.region == Region::Northwest),
                flag(self.region == Region::Southeast),
                flag(self.region == Region::Southwest),
            ],
        }
    }
}

/// Numeric row aligned with [`ENCODED_COLUMNS`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EncodedRow {
    values: [f64; 9],
}

impl EncodedRow {
    pub fn names(&self) -> &'static [&'static str] {
        &ENCODED_COLUMNS
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn get(&self, column: &str) -> Option<f64> {
        ENCODED_COLUMNS
            .iter()
            .position(|c| *c == column)
            .map(|i| self.values[i])
    }
}
