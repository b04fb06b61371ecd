use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::OutcomeError;

/// Youngest supported age at discharge
pub const MIN_AGE: u32 = 45;
/// Oldest supported age at discharge
pub const MAX_AGE: u32 = 90;

/// Patient sex, coded 1 for male in every regression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    Female,
    Male,
}

impl Sex {
    /// Regression indicator (0 = female, 1 = male)
    pub fn indicator(&self) -> f64 {
        match self {
            Sex::Female => 0.0,
            Sex::Male => 1.0,
        }
    }

    pub fn code(&self) -> u8 {
        match self {
            Sex::Female => 0,
            Sex::Male => 1,
        }
    }
}

impl TryFrom<u8> for Sex {
    type Error = OutcomeError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Sex::Female),
            1 => Ok(Sex::Male),
            other => Err(OutcomeError::InvalidPatient {
                field: "sex",
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sex::Female => write!(f, "female"),
            Sex::Male => write!(f, "male"),
        }
    }
}

/// A patient at discharge
///
/// The mRS is not part of the patient: the engine evaluates the same patient
/// at every mRS to fill the comparison tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Patient {
    age: u32,
    sex: Sex,
}

impl Patient {
    /// Create a patient, checking the age lies in the supported range
    pub fn new(age: u32, sex: Sex) -> Result<Self, OutcomeError> {
        if !(MIN_AGE..=MAX_AGE).contains(&age) {
            return Err(OutcomeError::InvalidPatient {
                field: "age",
                value: age.to_string(),
            });
        }
        Ok(Self { age, sex })
    }

    /// Create a patient from raw codes (`sex` 1 = male)
    pub fn from_codes(age: u32, sex: u8) -> Result<Self, OutcomeError> {
        Self::new(age, Sex::try_from(sex)?)
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn sex(&self) -> Sex {
        self.sex
    }

    pub(crate) fn age_f64(&self) -> f64 {
        self.age as f64
    }
}
