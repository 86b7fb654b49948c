use std::cmp::Reverse;

use chrono::{DateTime, Duration, Utc};
use derive_more::{Deref, Display};
use uuid::Uuid;

use crate::{
    DeleteError, Exercise, ExerciseID, HistoryOrder, Name, ReadError, SetEntry, SetInput,
    UpdateError,
};

#[allow(async_fn_in_trait)]
pub trait CurrentWorkoutRepository {
    async fn read_current_workout(&self) -> Result<Option<Workout>, ReadError>;
    async fn write_current_workout(&self, workout: &Workout) -> Result<(), UpdateError>;
    async fn clear_current_workout(&self) -> Result<(), DeleteError>;
}

#[allow(async_fn_in_trait)]
pub trait WorkoutHistoryService {
    async fn get_workout_history(&self) -> Result<Vec<Workout>, ReadError>;
    async fn clear_workout_history(&self) -> Result<(), DeleteError>;
}

#[allow(async_fn_in_trait)]
pub trait WorkoutHistoryRepository {
    async fn read_workout_history(&self) -> Result<Vec<Workout>, ReadError>;
    async fn write_workout_history(&self, workouts: &[Workout]) -> Result<(), UpdateError>;
    async fn clear_workout_history(&self) -> Result<(), DeleteError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct Workout {
    pub id: WorkoutID,
    /// ID the workout had while it was in progress, set when it is archived.
    pub source_id: Option<WorkoutID>,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub exercises: Vec<WorkoutExercise>,
}

impl Workout {
    #[must_use]
    pub fn new(start_time: DateTime<Utc>) -> Self {
        Self {
            id: WorkoutID::random(),
            source_id: None,
            start_time,
            end_time: None,
            exercises: vec![],
        }
    }

    #[must_use]
    pub fn exercise(&self, id: &ExerciseID) -> Option<&WorkoutExercise> {
        self.exercises.iter().find(|e| e.id == *id)
    }

    #[must_use]
    pub fn contains_exercise(&self, id: &ExerciseID) -> bool {
        self.exercise(id).is_some()
    }

    /// Append a snapshot of `exercise` unless the workout already contains it.
    ///
    /// Returns whether the workout was changed.
    pub fn add_exercise(&mut self, exercise: &Exercise) -> bool {
        if self.contains_exercise(&exercise.id) {
            return false;
        }
        self.exercises.push(WorkoutExercise::from(exercise));
        true
    }

    pub fn remove_exercise(&mut self, id: &ExerciseID) -> Option<WorkoutExercise> {
        let index = self.exercises.iter().position(|e| e.id == *id)?;
        Some(self.exercises.remove(index))
    }

    pub fn add_set(
        &mut self,
        exercise_id: &ExerciseID,
        input: SetInput,
        timestamp: DateTime<Utc>,
    ) -> Option<&SetEntry> {
        let exercise = self.exercises.iter_mut().find(|e| e.id == *exercise_id)?;
        Some(exercise.add_set(input, timestamp))
    }

    pub fn delete_set(&mut self, exercise_id: &ExerciseID, index: usize) -> Option<SetEntry> {
        self.exercises
            .iter_mut()
            .find(|e| e.id == *exercise_id)?
            .delete_set(index)
    }

    #[must_use]
    pub fn num_sets(&self) -> usize {
        self.exercises.iter().map(|e| e.sets.len()).sum()
    }

    #[must_use]
    pub fn has_sets(&self) -> bool {
        self.exercises.iter().any(|e| !e.sets.is_empty())
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.end_time.is_some()
    }

    /// Copy of this workout as it is stored in the history.
    #[must_use]
    pub fn archive(&self, end_time: DateTime<Utc>) -> Workout {
        Workout {
            id: WorkoutID::random(),
            source_id: Some(self.id.clone()),
            start_time: self.start_time,
            end_time: Some(end_time),
            exercises: self.exercises.clone(),
        }
    }

    #[must_use]
    pub fn duration(&self) -> Option<Duration> {
        let duration = self.end_time? - self.start_time;
        if duration < Duration::zero() {
            return None;
        }
        Some(duration)
    }
}

#[must_use]
pub fn format_duration(duration: Duration) -> String {
    let minutes = duration.num_minutes();
    let hours = minutes / 60;
    if hours > 0 {
        format!("{hours} h {} min", minutes % 60)
    } else {
        format!("{minutes} min")
    }
}

pub fn sort_workouts(workouts: &mut [Workout], order: HistoryOrder) {
    match order {
        HistoryOrder::NewestFirst => workouts.sort_by_key(|w| Reverse(w.start_time)),
        HistoryOrder::OldestFirst => workouts.sort_by_key(|w| w.start_time),
    }
}

#[derive(Deref, Display, Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct WorkoutID(String);

impl WorkoutID {
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl From<&str> for WorkoutID {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for WorkoutID {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Snapshot of an exercise definition together with the sets performed.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutExercise {
    pub id: ExerciseID,
    pub name: Name,
    pub muscle_group: String,
    pub sets: Vec<SetEntry>,
}

impl WorkoutExercise {
    fn add_set(&mut self, input: SetInput, timestamp: DateTime<Utc>) -> &SetEntry {
        self.sets.push(SetEntry {
            set: set_number(self.sets.len()),
            weight: input.weight,
            reps: input.reps,
            notes: input.notes,
            timestamp,
        });
        &self.sets[self.sets.len() - 1]
    }

    fn delete_set(&mut self, index: usize) -> Option<SetEntry> {
        if index >= self.sets.len() {
            return None;
        }
        let removed = self.sets.remove(index);
        for (i, set) in self.sets.iter_mut().enumerate() {
            set.set = set_number(i);
        }
        Some(removed)
    }
}

impl From<&Exercise> for WorkoutExercise {
    fn from(value: &Exercise) -> Self {
        Self {
            id: value.id.clone(),
            name: value.name.clone(),
            muscle_group: value.muscle_group.clone(),
            sets: vec![],
        }
    }
}

fn set_number(index: usize) -> u32 {
    u32::try_from(index + 1).unwrap_or(u32::MAX)
}
