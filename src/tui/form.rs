//! Form state for the six profile fields.
//!
//! Kept apart from rendering so the editing rules can be tested without a
//! terminal. Values are clamped to their domains while editing, so the form can
//! only ever hold a valid profile.

use crate::domain::{AGE_RANGE, BMI_RANGE, DEPENDENTS_RANGE, Profile};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Age,
    Sex,
    Bmi,
    Dependents,
    Smoker,
    Region,
}

impl Field {
    pub const ALL: [Field; 6] = [
        Field::Age,
        Field::Sex,
        Field::Bmi,
        Field::Dependents,
        Field::Smoker,
        Field::Region,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Field::Age => "Age",
            Field::Sex => "Gender",
            Field::Bmi => "BMI",
            Field::Dependents => "Dependents",
            Field::Smoker => "Smoker",
            Field::Region => "Region",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProfileForm {
    pub profile: Profile,
    selected: usize,
}

impl Default for ProfileForm {
    fn default() -> Self {
        Self {
            profile: Profile::default(),
            selected: 0,
        }
    }
}

impl ProfileForm {
    /// Row index of the selected field, always within `Field::ALL`.
    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_field(&self) -> Field {
        Field::ALL.get(self.selected).copied().unwrap_or(Field::Age)
    }

    pub fn select(&mut self, field: Field) {
        self.selected = Field::ALL.iter().position(|f| *f == field).unwrap_or(0);
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < Field::ALL.len() {
            self.selected += 1;
        }
    }

    /// Step the selected field by one notch in the direction of `delta`.
    pub fn adjust(&mut self, delta: i32) {
        let field = self.selected_field();
        let p = &mut self.profile;
        let up = delta >= 0;
        match field {
            Field::Age => p.age = step_u32(p.age, up, *AGE_RANGE.start(), *AGE_RANGE.end()),
            Field::Sex => p.sex = p.sex.toggle(),
            Field::Bmi => {
                // Work in tenths so repeated steps don't accumulate float error.
                let tenths = (p.bmi * 10.0).round() + if up { 1.0 } else { -1.0 };
                p.bmi = (tenths / 10.0).clamp(*BMI_RANGE.start(), *BMI_RANGE.end());
            }
            Field::Dependents => {
                p.dependents = step_u32(
                    p.dependents,
                    up,
                    *DEPENDENTS_RANGE.start(),
                    *DEPENDENTS_RANGE.end(),
                )
            }
            Field::Smoker => p.smoker = p.smoker.toggle(),
            Field::Region => p.region = if up { p.region.next() } else { p.region.prev() },
        }
    }

    pub fn value_text(&self, field: Field) -> String {
        let p = &self.profile;
        match field {
            Field::Age => p.age.to_string(),
            Field::Sex => p.sex.as_str().to_string(),
            Field::Bmi => format!("{:.1}", p.bmi),
            Field::Dependents => p.dependents.to_string(),
            Field::Smoker => p.smoker.as_str().to_string(),
            Field::Region => p.region.as_str().to_string(),
        }
    }
}

fn step_u32(value: u32, up: bool, min: u32, max: u32) -> u32 {
    let next = if up {
        value.saturating_add(1)
    } else {
        value.saturating_sub(1)
    };
    next.clamp(min, max)
}
