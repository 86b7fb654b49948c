use log::debug;

use crate::{
    DeleteError, Exercise, ExerciseID, ExerciseInput, ExerciseRepository, ExerciseService,
    ReadError, Settings, SettingsRepository, SettingsService, UpdateError, Workout,
    WorkoutHistoryRepository, WorkoutHistoryService, sort_workouts,
};

pub struct Service<R> {
    repository: R,
}

impl<R> Service<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

impl<R: ExerciseRepository> ExerciseService for Service<R> {
    async fn get_exercises(&self) -> Result<Vec<Exercise>, ReadError> {
        log_on_error!(
            self.repository.read_exercises(),
            ReadError,
            "get",
            "exercises"
        )
    }

    async fn save_exercise(
        &self,
        input: ExerciseInput,
        editing_id: Option<&ExerciseID>,
    ) -> Result<Exercise, UpdateError> {
        let exercise = Exercise::new(
            editing_id.cloned().unwrap_or_else(ExerciseID::random),
            input,
        )?;
        let mut exercises = self.get_exercises().await?;

        if editing_id.is_some() {
            let Some(entry) = exercises.iter_mut().find(|e| e.id == exercise.id) else {
                debug!("exercise {} not found, nothing to replace", exercise.id);
                return Ok(exercise);
            };
            *entry = exercise.clone();
        } else {
            exercises.push(exercise.clone());
        }

        log_on_error!(
            self.repository.write_exercises(&exercises),
            UpdateError,
            "save",
            "exercise"
        )?;
        Ok(exercise)
    }

    async fn delete_exercise(&self, id: &ExerciseID) -> Result<ExerciseID, DeleteError> {
        let mut exercises = self.get_exercises().await?;
        let len = exercises.len();
        exercises.retain(|e| e.id != *id);

        if exercises.len() == len {
            debug!("exercise {id} not found, nothing to delete");
            return Ok(id.clone());
        }

        log_on_error!(
            self.repository.write_exercises(&exercises),
            UpdateError,
            "delete",
            "exercise"
        )?;
        Ok(id.clone())
    }
}

impl<R: WorkoutHistoryRepository + SettingsRepository> WorkoutHistoryService for Service<R> {
    async fn get_workout_history(&self) -> Result<Vec<Workout>, ReadError> {
        let mut workouts = log_on_error!(
            self.repository.read_workout_history(),
            ReadError,
            "get",
            "workout history"
        )?;
        let settings = self.get_settings().await.unwrap_or_default();
        sort_workouts(&mut workouts, settings.history_order);
        Ok(workouts)
    }

    async fn clear_workout_history(&self) -> Result<(), DeleteError> {
        log_on_error!(
            self.repository.clear_workout_history(),
            DeleteError,
            "clear",
            "workout history"
        )
    }
}

impl<R: SettingsRepository> SettingsService for Service<R> {
    async fn get_settings(&self) -> Result<Settings, ReadError> {
        log_on_error!(
            self.repository.read_settings(),
            ReadError,
            "get",
            "settings"
        )
    }

    async fn set_settings(&self, settings: Settings) -> Result<Settings, UpdateError> {
        log_on_error!(
            self.repository.write_settings(settings),
            UpdateError,
            "set",
            "settings"
        )
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;

    use crate::{
        HistoryOrder, Name, NameError, StorageError, ValidationError, WeightUnit,
        tests::{
            data::{BENCH_PRESS, DEADLIFT, SQUAT, finished_workout},
            repository::MockRepository,
        },
    };

    use super::*;

    fn input(name: &str, muscle_group: &str, description: &str) -> ExerciseInput {
        ExerciseInput {
            name: name.to_string(),
            muscle_group: muscle_group.to_string(),
            description: description.to_string(),
        }
    }

    #[test]
    fn test_get_exercises_empty() {
        let service = Service::new(MockRepository::default());
        assert!(block_on(service.get_exercises()).unwrap().is_empty());
    }

    #[test]
    fn test_get_exercises_corrupted() {
        let repository = MockRepository::default();
        repository.state().failures.read_exercises = true;
        let service = Service::new(repository);
        assert!(matches!(
            block_on(service.get_exercises()),
            Err(ReadError::Storage(StorageError::Corrupted(_)))
        ));
    }

    #[test]
    fn test_save_exercise_create() {
        let repository = MockRepository::with_exercises(&[SQUAT.clone()]);
        let service = Service::new(repository.clone());

        let exercise =
            block_on(service.save_exercise(input(" Row ", " Back ", " Barbell row "), None))
                .unwrap();

        assert_eq!(exercise.name, Name::new("Row").unwrap());
        assert_eq!(exercise.muscle_group, "Back");
        assert_eq!(exercise.description, "Barbell row");
        assert_ne!(exercise.id, SQUAT.id);
        assert_eq!(
            block_on(service.get_exercises()).unwrap(),
            vec![SQUAT.clone(), exercise]
        );
    }

    #[test]
    fn test_save_exercise_create_unique_ids() {
        let repository = MockRepository::default();
        let service = Service::new(repository.clone());

        for _ in 0..10 {
            block_on(service.save_exercise(input("Curl", "", ""), None)).unwrap();
        }

        let mut ids = repository
            .state()
            .exercises
            .iter()
            .map(|e| e.id.clone())
            .collect::<Vec<_>>();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 10);
    }

    #[test]
    fn test_save_exercise_empty_name() {
        let repository = MockRepository::with_exercises(&[SQUAT.clone()]);
        let service = Service::new(repository.clone());

        assert!(matches!(
            block_on(service.save_exercise(input("  ", "Legs", ""), None)),
            Err(UpdateError::Validation(ValidationError::Name(NameError::Empty)))
        ));
        assert!(matches!(
            block_on(service.save_exercise(input("", "Legs", ""), Some(&SQUAT.id))),
            Err(UpdateError::Validation(ValidationError::Name(NameError::Empty)))
        ));
        assert_eq!(repository.state().exercises, vec![SQUAT.clone()]);
        assert_eq!(repository.state().writes, 0);
    }

    #[test]
    fn test_save_exercise_update_in_place() {
        let repository = MockRepository::with_exercises(&[
            SQUAT.clone(),
            BENCH_PRESS.clone(),
            DEADLIFT.clone(),
        ]);
        let service = Service::new(repository.clone());

        let exercise = block_on(service.save_exercise(
            input("Incline Bench Press", "Chest", "30 degrees"),
            Some(&BENCH_PRESS.id),
        ))
        .unwrap();

        assert_eq!(exercise.id, BENCH_PRESS.id);
        assert_eq!(
            repository.state().exercises,
            vec![SQUAT.clone(), exercise, DEADLIFT.clone()]
        );
    }

    #[test]
    fn test_save_exercise_update_missing() {
        let repository = MockRepository::with_exercises(&[SQUAT.clone()]);
        let service = Service::new(repository.clone());

        let exercise =
            block_on(service.save_exercise(input("Dip", "", ""), Some(&"missing".into())))
                .unwrap();

        assert_eq!(exercise.id, ExerciseID::from("missing"));
        assert_eq!(repository.state().exercises, vec![SQUAT.clone()]);
        assert_eq!(repository.state().writes, 0);
    }

    #[test]
    fn test_save_exercise_write_failure() {
        let repository = MockRepository::with_exercises(&[SQUAT.clone()]);
        repository.state().failures.write_exercises = true;
        let service = Service::new(repository.clone());

        assert!(matches!(
            block_on(service.save_exercise(input("Dip", "", ""), None)),
            Err(UpdateError::Storage(_))
        ));
        assert_eq!(repository.state().exercises, vec![SQUAT.clone()]);
    }

    #[test]
    fn test_delete_exercise() {
        let repository = MockRepository::with_exercises(&[SQUAT.clone(), BENCH_PRESS.clone()]);
        let service = Service::new(repository.clone());

        assert_eq!(
            block_on(service.delete_exercise(&SQUAT.id)).unwrap(),
            SQUAT.id
        );
        assert_eq!(repository.state().exercises, vec![BENCH_PRESS.clone()]);
    }

    #[test]
    fn test_delete_exercise_missing() {
        let repository = MockRepository::with_exercises(&[SQUAT.clone()]);
        let service = Service::new(repository.clone());

        assert_eq!(
            block_on(service.delete_exercise(&BENCH_PRESS.id)).unwrap(),
            BENCH_PRESS.id
        );
        assert_eq!(repository.state().exercises, vec![SQUAT.clone()]);
        assert_eq!(repository.state().writes, 0);
    }

    #[test]
    fn test_delete_exercise_keeps_workouts() {
        let workout = finished_workout(1, &[("100", "5")]);
        let repository = MockRepository::with_exercises(&[SQUAT.clone()]);
        repository.state().history = vec![workout.clone()];
        let service = Service::new(repository.clone());

        block_on(service.delete_exercise(&SQUAT.id)).unwrap();

        assert_eq!(repository.state().history, vec![workout]);
    }

    #[test]
    fn test_get_workout_history_order() {
        let repository = MockRepository::default();
        repository.state().history = vec![
            finished_workout(1, &[("100", "5")]),
            finished_workout(3, &[("100", "5")]),
            finished_workout(2, &[("100", "5")]),
        ];
        let service = Service::new(repository.clone());

        let days = |workouts: Vec<Workout>| {
            workouts
                .iter()
                .map(|w| w.start_time.format("%d").to_string())
                .collect::<Vec<_>>()
        };

        assert_eq!(
            days(block_on(service.get_workout_history()).unwrap()),
            vec!["03", "02", "01"]
        );

        block_on(service.set_settings(Settings {
            history_order: HistoryOrder::OldestFirst,
            ..Settings::default()
        }))
        .unwrap();

        assert_eq!(
            days(block_on(service.get_workout_history()).unwrap()),
            vec!["01", "02", "03"]
        );
    }

    #[test]
    fn test_clear_workout_history() {
        let repository = MockRepository::default();
        repository.state().history = vec![finished_workout(1, &[("100", "5")])];
        let service = Service::new(repository.clone());

        block_on(service.clear_workout_history()).unwrap();

        assert!(block_on(service.get_workout_history()).unwrap().is_empty());
    }

    #[test]
    fn test_settings() {
        let service = Service::new(MockRepository::default());
        assert_eq!(
            block_on(service.get_settings()).unwrap(),
            Settings::default()
        );

        let settings = Settings {
            weight_unit: WeightUnit::Pound,
            history_order: HistoryOrder::OldestFirst,
        };
        assert_eq!(block_on(service.set_settings(settings)).unwrap(), settings);
        assert_eq!(block_on(service.get_settings()).unwrap(), settings);
    }
}
