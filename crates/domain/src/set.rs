use chrono::{DateTime, Utc};
use derive_more::{Display, Into};

use crate::{ValidationError, WeightUnit};

/// One recorded performance within an exercise of a workout.
///
/// `set` is the 1-based position of the entry inside its exercise and is
/// renumbered whenever an earlier entry is removed.
#[derive(Debug, Clone, PartialEq)]
pub struct SetEntry {
    pub set: u32,
    pub weight: Weight,
    pub reps: Reps,
    pub notes: String,
    pub timestamp: DateTime<Utc>,
}

/// Validated user input for a new set.
#[derive(Debug, Clone, PartialEq)]
pub struct SetInput {
    pub weight: Weight,
    pub reps: Reps,
    pub notes: String,
}

impl SetInput {
    pub fn parse(weight: &str, reps: &str, notes: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            weight: Weight::try_from(weight)?,
            reps: Reps::try_from(reps)?,
            notes: notes.trim().to_string(),
        })
    }
}

#[derive(Debug, Default, Display, Clone, Copy, Into, PartialEq, PartialOrd)]
pub struct Weight(f32);

impl Weight {
    pub fn new(value: f32) -> Result<Self, WeightError> {
        if !value.is_finite() {
            return Err(WeightError::ParseError);
        }

        if value < 0.0 {
            return Err(WeightError::Negative);
        }

        Ok(Self(value))
    }

    #[must_use]
    pub fn format(&self, unit: WeightUnit) -> String {
        format!("{self} {}", unit.symbol())
    }
}

impl TryFrom<&str> for Weight {
    type Error = WeightError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let value = value.trim();

        if value.is_empty() {
            return Err(WeightError::Empty);
        }

        match value.replace(',', ".").parse::<f32>() {
            Ok(parsed_value) => Weight::new(parsed_value),
            Err(_) => Err(WeightError::ParseError),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum WeightError {
    #[error("Weight must be entered")]
    Empty,
    #[error("Weight must not be negative")]
    Negative,
    #[error("Weight must be a decimal")]
    ParseError,
}

#[derive(Debug, Default, Display, Clone, Copy, Into, PartialEq, Eq, PartialOrd, Ord)]
pub struct Reps(u32);

impl Reps {
    #[must_use]
    pub fn new(value: u32) -> Self {
        Self(value)
    }
}

impl TryFrom<&str> for Reps {
    type Error = RepsError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let value = value.trim();

        if value.is_empty() {
            return Err(RepsError::Empty);
        }

        match value.parse::<u32>() {
            Ok(parsed_value) => Ok(Reps::new(parsed_value)),
            Err(_) => Err(RepsError::ParseError),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum RepsError {
    #[error("Reps must be entered")]
    Empty,
    #[error("Reps must be an integer")]
    ParseError,
}
