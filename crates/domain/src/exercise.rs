use derive_more::{Deref, Display};
use uuid::Uuid;

use crate::{DeleteError, Name, ReadError, UpdateError, ValidationError};

/// Muscle groups offered as suggestions when defining an exercise.
pub const MUSCLE_GROUPS: [&str; 10] = [
    "Chest",
    "Back",
    "Legs",
    "Shoulders",
    "Biceps",
    "Triceps",
    "Abs",
    "Cardio",
    "Full body",
    "Other",
];

#[allow(async_fn_in_trait)]
pub trait ExerciseService {
    async fn get_exercises(&self) -> Result<Vec<Exercise>, ReadError>;
    /// Create a new exercise, or replace the exercise with `editing_id` in place.
    ///
    /// Replacing an exercise that no longer exists changes nothing.
    async fn save_exercise(
        &self,
        input: ExerciseInput,
        editing_id: Option<&ExerciseID>,
    ) -> Result<Exercise, UpdateError>;
    async fn delete_exercise(&self, id: &ExerciseID) -> Result<ExerciseID, DeleteError>;
}

#[allow(async_fn_in_trait)]
pub trait ExerciseRepository {
    async fn read_exercises(&self) -> Result<Vec<Exercise>, ReadError>;
    async fn write_exercises(&self, exercises: &[Exercise]) -> Result<(), UpdateError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exercise {
    pub id: ExerciseID,
    pub name: Name,
    pub muscle_group: String,
    pub description: String,
}

impl Exercise {
    pub fn new(id: ExerciseID, input: ExerciseInput) -> Result<Self, ValidationError> {
        Ok(Self {
            id,
            name: Name::new(&input.name)?,
            muscle_group: input.muscle_group.trim().to_string(),
            description: input.description.trim().to_string(),
        })
    }
}

/// Unvalidated form content for creating or editing an exercise.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ExerciseInput {
    pub name: String,
    pub muscle_group: String,
    pub description: String,
}

#[derive(Deref, Display, Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct ExerciseID(String);

impl ExerciseID {
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl From<&str> for ExerciseID {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ExerciseID {
    fn from(value: String) -> Self {
        Self(value)
    }
}
