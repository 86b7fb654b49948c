use chrono::Utc;
use log::{debug, info};

use crate::{
    CurrentWorkoutRepository, DeleteError, Exercise, ExerciseID, ReadError, SetInput,
    UpdateError, ValidationError, Workout, WorkoutExercise, WorkoutHistoryRepository,
};

/// Owner of the workout in progress.
///
/// The manager keeps the current workout in memory and writes every change
/// through the repository before exposing it. The active exercise, which
/// receives the next added set, is not persisted.
///
/// Finishing a workout archives it into the history and then clears the
/// current workout. Archiving is skipped if the history already contains the
/// workout, so a finish that failed after archiving can simply be retried. A
/// stored workout that is found in the history when a session is opened is
/// discarded.
pub struct SessionManager<R> {
    repository: R,
    workout: Option<Workout>,
    active_exercise: Option<ExerciseID>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Finished {
    /// The workout was added to the history.
    Archived(Workout),
    /// The workout contained no sets and was dropped.
    Discarded,
}

impl<R> SessionManager<R>
where
    R: CurrentWorkoutRepository + WorkoutHistoryRepository,
{
    pub fn new(repository: R) -> Self {
        Self {
            repository,
            workout: None,
            active_exercise: None,
        }
    }

    #[must_use]
    pub fn workout(&self) -> Option<&Workout> {
        self.workout.as_ref()
    }

    #[must_use]
    pub fn active_exercise(&self) -> Option<&WorkoutExercise> {
        self.workout.as_ref()?.exercise(self.active_exercise.as_ref()?)
    }

    pub fn set_active_exercise(&mut self, id: &ExerciseID) -> bool {
        if self.workout.as_ref().is_some_and(|w| w.contains_exercise(id)) {
            self.active_exercise = Some(id.clone());
            true
        } else {
            false
        }
    }

    /// Resume the stored workout, or start a new one if there is none or `force_new` is set.
    pub async fn open_session(&mut self, force_new: bool) -> Result<&Workout, UpdateError> {
        if !force_new {
            if let Some(workout) = self.stored_workout().await {
                debug!("resuming workout {}", workout.id);
                self.active_exercise = workout.exercises.first().map(|e| e.id.clone());
                self.workout = Some(workout);
                return self.current();
            }
        }

        let workout = Workout::new(Utc::now());
        debug!("starting workout {}", workout.id);
        self.save(workout).await?;
        self.active_exercise = None;
        self.current()
    }

    pub async fn select_exercise(&mut self, exercise: &Exercise) -> Result<&Workout, UpdateError> {
        let workout = self.current()?;

        if !workout.contains_exercise(&exercise.id) {
            let mut workout = workout.clone();
            workout.add_exercise(exercise);
            self.save(workout).await?;
        }

        self.active_exercise = Some(exercise.id.clone());
        self.current()
    }

    pub async fn add_set(&mut self, input: SetInput) -> Result<&Workout, UpdateError> {
        let mut workout = self.current()?.clone();
        let exercise_id = self
            .active_exercise
            .as_ref()
            .ok_or(ValidationError::NoActiveExercise)?;

        if workout.add_set(exercise_id, input, Utc::now()).is_none() {
            return Err(ValidationError::NoActiveExercise.into());
        }

        self.save(workout).await?;
        self.current()
    }

    pub async fn delete_set(
        &mut self,
        exercise_id: &ExerciseID,
        index: usize,
    ) -> Result<&Workout, UpdateError> {
        let mut workout = self.current()?.clone();

        if workout.delete_set(exercise_id, index).is_none() {
            debug!("set {index} of exercise {exercise_id} not found, nothing to delete");
            return self.current();
        }

        self.save(workout).await?;
        self.current()
    }

    pub async fn remove_exercise(
        &mut self,
        exercise_id: &ExerciseID,
    ) -> Result<&Workout, UpdateError> {
        let mut workout = self.current()?.clone();

        if workout.remove_exercise(exercise_id).is_none() {
            debug!("exercise {exercise_id} not in workout, nothing to remove");
            return self.current();
        }

        let first_exercise = workout.exercises.first().map(|e| e.id.clone());
        self.save(workout).await?;

        if self.active_exercise.as_ref() == Some(exercise_id) {
            self.active_exercise = first_exercise;
        }
        self.current()
    }

    /// Archive the current workout if it contains at least one set, and close the session.
    pub async fn finish_session(&mut self) -> Result<Finished, UpdateError> {
        let workout = self.current()?.clone();

        if !workout.has_sets() {
            self.clear().await?;
            info!("discarded workout {} without sets", workout.id);
            return Ok(Finished::Discarded);
        }

        let archived = self.archive(&workout).await?;
        self.clear().await?;
        info!("archived workout {} as {}", workout.id, archived.id);
        Ok(Finished::Archived(archived))
    }

    /// Drop the current workout without archiving it.
    pub async fn cancel_session(&mut self) -> Result<(), DeleteError> {
        self.clear().await?;
        info!("cancelled workout");
        Ok(())
    }

    fn current(&self) -> Result<&Workout, UpdateError> {
        Ok(self.workout.as_ref().ok_or(ValidationError::NoWorkout)?)
    }

    async fn stored_workout(&self) -> Option<Workout> {
        let workout = log_on_error!(
            self.repository.read_current_workout(),
            ReadError,
            "get",
            "current workout"
        )
        .ok()??;

        if let Ok(history) = log_on_error!(
            self.repository.read_workout_history(),
            ReadError,
            "get",
            "workout history"
        ) {
            if history
                .iter()
                .any(|w| w.source_id.as_ref() == Some(&workout.id))
            {
                info!("workout {} has already been archived", workout.id);
                return None;
            }
        }

        Some(workout)
    }

    async fn save(&mut self, workout: Workout) -> Result<(), UpdateError> {
        log_on_error!(
            self.repository.write_current_workout(&workout),
            UpdateError,
            "save",
            "current workout"
        )?;
        self.workout = Some(workout);
        Ok(())
    }

    async fn archive(&self, workout: &Workout) -> Result<Workout, UpdateError> {
        let mut history = log_on_error!(
            self.repository.read_workout_history(),
            ReadError,
            "get",
            "workout history"
        )?;

        if let Some(archived) = history
            .iter()
            .find(|w| w.source_id.as_ref() == Some(&workout.id))
        {
            debug!("workout {} has already been archived", workout.id);
            return Ok(archived.clone());
        }

        let archived = workout.archive(Utc::now());
        history.push(archived.clone());
        log_on_error!(
            self.repository.write_workout_history(&history),
            UpdateError,
            "archive",
            "workout"
        )?;
        Ok(archived)
    }

    async fn clear(&mut self) -> Result<(), DeleteError> {
        log_on_error!(
            self.repository.clear_current_workout(),
            DeleteError,
            "clear",
            "current workout"
        )?;
        self.workout = None;
        self.active_exercise = None;
        Ok(())
    }
}
