//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - read from profile JSON files and CLI flags
//! - edited field by field in the TUI form
//! - exported alongside an estimate

use std::ops::RangeInclusive;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::PredictError;

pub const AGE_RANGE: RangeInclusive<u32> = 18..=100;
pub const BMI_RANGE: RangeInclusive<f64> = 15.0..=40.0;
pub const DEPENDENTS_RANGE: RangeInclusive<u32> = 0..=5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Smoker {
    Yes,
    No,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    Southwest,
    Southeast,
    Northwest,
    Northeast,
}

impl Sex {
    pub const ALL: [Sex; 2] = [Sex::Male, Sex::Female];

    pub fn as_str(self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            Sex::Male => Sex::Female,
            Sex::Female => Sex::Male,
        }
    }
}

impl Smoker {
    pub const ALL: [Smoker; 2] = [Smoker::No, Smoker::Yes];

    pub fn as_str(self) -> &'static str {
        match self {
            Smoker::Yes => "yes",
            Smoker::No => "no",
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            Smoker::Yes => Smoker::No,
            Smoker::No => Smoker::Yes,
        }
    }
}

impl Region {
    /// Form order (the order regions are offered to the user).
    pub const ALL: [Region; 4] = [
        Region::Southwest,
        Region::Southeast,
        Region::Northwest,
        Region::Northeast,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Region::Southwest => "southwest",
            Region::Southeast => "southeast",
            Region::Northwest => "northwest",
            Region::Northeast => "northeast",
        }
    }

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|r| *r == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|r| *r == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

fn parse_choice<T: Copy>(
    field: &'static str,
    raw: &str,
    choices: &[T],
    name: fn(T) -> &'static str,
) -> Result<T, PredictError> {
    let wanted = raw.trim();
    choices
        .iter()
        .copied()
        .find(|c| name(*c).eq_ignore_ascii_case(wanted))
        .ok_or_else(|| {
            let allowed: Vec<&str> = choices.iter().map(|c| name(*c)).collect();
            PredictError::invalid(
                field,
                format!("'{wanted}' is not one of {}", allowed.join(", ")),
            )
        })
}

impl FromStr for Sex {
    type Err = PredictError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_choice("sex", s, &Sex::ALL, Sex::as_str)
    }
}

impl FromStr for Smoker {
    type Err = PredictError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_choice("smoker", s, &Smoker::ALL, Smoker::as_str)
    }
}

impl FromStr for Region {
    type Err = PredictError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_choice("region", s, &Region::ALL, Region::as_str)
    }
}

/// The six attributes describing a person seeking an estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub age: u32,
    pub sex: Sex,
    pub bmi: f64,
    pub dependents: u32,
    pub smoker: Smoker,
    pub region: Region,
}

impl Default for Profile {
    /// The form's starting values.
    fn default() -> Self {
        Self {
            age: 30,
            sex: Sex::Male,
            bmi: 25.0,
            dependents: 0,
            smoker: Smoker::No,
            region: Region::Southwest,
        }
    }
}

impl Profile {
    /// Check every field against its domain.
    pub fn validate(&self) -> Result<(), PredictError> {
        if !AGE_RANGE.contains(&self.age) {
            return Err(PredictError::invalid(
                "age",
                format!(
                    "{} is outside {}..={}",
                    self.age,
                    AGE_RANGE.start(),
                    AGE_RANGE.end()
                ),
            ));
        }
        // NaN fails `contains`, so it is rejected here too.
        if !BMI_RANGE.contains(&self.bmi) {
            return Err(PredictError::invalid(
                "bmi",
                format!(
                    "{} is outside {:.1}..={:.1}",
                    self.bmi,
                    BMI_RANGE.start(),
                    BMI_RANGE.end()
                ),
            ));
        }
        if !DEPENDENTS_RANGE.contains(&self.dependents) {
            return Err(PredictError::invalid(
                "dependents",
                format!(
                    "{} is outside {}..={}",
                    self.dependents,
                    DEPENDENTS_RANGE.start(),
                    DEPENDENTS_RANGE.end()
                ),
            ));
        }
        Ok(())
    }
}

/// A possibly incomplete profile as it arrives from a file or from flags.
///
/// Enumerations stay as free text here so an unknown spelling is reported as
/// an invalid field rather than a parse failure of the whole document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileInput {
    #[serde(default)]
    pub age: Option<i64>,
    #[serde(default)]
    pub sex: Option<String>,
    #[serde(default)]
    pub bmi: Option<f64>,
    #[serde(default, alias = "children")]
    pub dependents: Option<i64>,
    #[serde(default)]
    pub smoker: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
}

impl ProfileInput {
    /// Fill fields from `other` where it has a value.
    pub fn override_with(mut self, other: ProfileInput) -> Self {
        self.age = other.age.or(self.age);
        self.sex = other.sex.or(self.sex);
        self.bmi = other.bmi.or(self.bmi);
        self.dependents = other.dependents.or(self.dependents);
        self.smoker = other.smoker.or(self.smoker);
        self.region = other.region.or(self.region);
        self
    }

    /// Require all six fields and check their domains.
    pub fn into_profile(self) -> Result<Profile, PredictError> {
        let age = self.age.ok_or_else(|| missing("age"))?;
        let sex = self.sex.ok_or_else(|| missing("sex"))?;
        let bmi = self.bmi.ok_or_else(|| missing("bmi"))?;
        let dependents = self.dependents.ok_or_else(|| missing("dependents"))?;
        let smoker = self.smoker.ok_or_else(|| missing("smoker"))?;
        let region = self.region.ok_or_else(|| missing("region"))?;

        let profile = Profile {
            age: narrow("age", age, AGE_RANGE)?,
            sex: sex.parse()?,
            bmi,
            dependents: narrow("dependents", dependents, DEPENDENTS_RANGE)?,
            smoker: smoker.parse()?,
            region: region.parse()?,
        };
        profile.validate()?;
        Ok(profile)
    }
}

impl From<Profile> for ProfileInput {
    fn from(p: Profile) -> Self {
        Self {
            age: Some(i64::from(p.age)),
            sex: Some(p.sex.as_str().to_string()),
            bmi: Some(p.bmi),
            dependents: Some(i64::from(p.dependents)),
            smoker: Some(p.smoker.as_str().to_string()),
            region: Some(p.region.as_str().to_string()),
        }
    }
}

fn missing(field: &'static str) -> PredictError {
    PredictError::invalid(field, "missing")
}

fn narrow(field: &'static str, value: i64, range: RangeInclusive<u32>) -> Result<u32, PredictError> {
    u32::try_from(value)
        .ok()
        .filter(|v| range.contains(v))
        .ok_or_else(|| {
            PredictError::invalid(
                field,
                format!("{value} is outside {}..={}", range.start(), range.end()),
            )
        })
}

/// Estimated annual cost for one profile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub annual_cost: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with(f: impl FnOnce(&mut Profile)) -> Profile {
        let mut p = Profile::default();
        f(&mut p);
        p
    }

    #[test]
    fn boundary_values_are_accepted() {
        for p in [
            with(|p| p.age = 18),
            with(|p| p.age = 100),
            with(|p| p.bmi = 15.0),
            with(|p| p.bmi = 40.0),
            with(|p| p.dependents = 0),
            with(|p| p.dependents = 5),
        ] {
            assert!(p.validate().is_ok(), "{p:?}");
        }
    }

    #[test]
    fn just_outside_boundaries_is_rejected() {
        let cases = [
            (with(|p| p.age = 17), "age"),
            (with(|p| p.age = 101), "age"),
            (with(|p| p.bmi = 14.9), "bmi"),
            (with(|p| p.bmi = 40.1), "bmi"),
            (with(|p| p.bmi = f64::NAN), "bmi"),
            (with(|p| p.dependents = 6), "dependents"),
        ];
        for (p, expected) in cases {
            match p.validate() {
                Err(PredictError::InvalidInput { field, .. }) => assert_eq!(field, expected),
                other => panic!("expected InvalidInput for {expected}, got {other:?}"),
            }
        }
    }

    #[test]
    fn enums_parse_case_insensitively() {
        assert_eq!(" Male ".parse::<Sex>().unwrap(), Sex::Male);
        assert_eq!("YES".parse::<Smoker>().unwrap(), Smoker::Yes);
        assert_eq!("northEast".parse::<Region>().unwrap(), Region::Northeast);
        assert!(matches!(
            "midwest".parse::<Region>(),
            Err(PredictError::InvalidInput { field: "region", .. })
        ));
    }

    #[test]
    fn region_cycles_in_form_order() {
        let mut r = Region::Southwest;
        for _ in 0..Region::ALL.len() {
            r = r.next();
        }
        assert_eq!(r, Region::Southwest);
        assert_eq!(Region::Southwest.prev(), Region::Northeast);
    }

    #[test]
    fn input_reports_missing_field() {
        let mut input = ProfileInput::from(Profile::default());
        input.smoker = None;
        assert_eq!(input.into_profile(), Err(PredictError::invalid("smoker", "missing")));
    }

    #[test]
    fn input_rejects_negative_age_without_wrapping() {
        let mut input = ProfileInput::from(Profile::default());
        input.age = Some(-20);
        assert!(matches!(
            input.into_profile(),
            Err(PredictError::InvalidInput { field: "age", .. })
        ));
    }

    #[test]
    fn input_accepts_children_alias() {
        let json = r#"{"age": 40, "sex": "female", "bmi": 31.2, "children": 2,
                       "smoker": "no", "region": "northwest"}"#;
        let input: ProfileInput = serde_json::from_str(json).unwrap();
        let p = input.into_profile().unwrap();
        assert_eq!(p.dependents, 2);
        assert_eq!(p.sex, Sex::Female);
    }

    #[test]
    fn override_prefers_later_values() {
        let base = ProfileInput::from(Profile::default());
        let flags = ProfileInput {
            age: Some(55),
            ..ProfileInput::default()
        };
        let p = base.override_with(flags).into_profile().unwrap();
        assert_eq!(p.age, 55);
        assert_eq!(p.region, Region::Southwest);
    }
}
