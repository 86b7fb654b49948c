use serde::{Serialize, de::DeserializeOwned};
use trainlog_domain as domain;

use crate::{Collection, KeyValueStore, model};

/// Domain repositories on top of a key-value store.
///
/// Every collection is stored as a single JSON document under its own key.
/// A missing key reads as the empty value of the collection.
#[derive(Clone, Debug, Default)]
pub struct JsonStorage<S> {
    store: S,
}

impl<S: KeyValueStore> JsonStorage<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub(crate) fn read<T: DeserializeOwned>(
        &self,
        collection: Collection,
    ) -> Result<Option<T>, domain::StorageError> {
        let Some(value) = self
            .store
            .get(collection.as_ref())
            .map_err(|err| domain::StorageError::Other(Box::new(err)))?
        else {
            return Ok(None);
        };
        serde_json::from_str(&value)
            .map(Some)
            .map_err(|err| corrupted(collection, &err))
    }

    pub(crate) fn write<T: Serialize + ?Sized>(
        &self,
        collection: Collection,
        value: &T,
    ) -> Result<(), domain::StorageError> {
        let value =
            serde_json::to_string(value).map_err(|err| domain::StorageError::Other(Box::new(err)))?;
        self.store
            .set(collection.as_ref(), &value)
            .map_err(|err| domain::StorageError::Other(Box::new(err)))
    }

    fn remove(&self, collection: Collection) -> Result<(), domain::StorageError> {
        self.store
            .remove(collection.as_ref())
            .map_err(|err| domain::StorageError::Other(Box::new(err)))
    }
}

fn corrupted(collection: Collection, err: &dyn std::fmt::Display) -> domain::StorageError {
    domain::StorageError::Corrupted(format!("{}: {err}", collection.as_ref()))
}

impl<S: KeyValueStore> domain::ExerciseRepository for JsonStorage<S> {
    async fn read_exercises(&self) -> Result<Vec<domain::Exercise>, domain::ReadError> {
        self.read::<Vec<model::Exercise>>(Collection::Exercises)?
            .unwrap_or_default()
            .into_iter()
            .map(domain::Exercise::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err| corrupted(Collection::Exercises, &err).into())
    }

    async fn write_exercises(
        &self,
        exercises: &[domain::Exercise],
    ) -> Result<(), domain::UpdateError> {
        let exercises = exercises
            .iter()
            .map(model::Exercise::from)
            .collect::<Vec<_>>();
        Ok(self.write(Collection::Exercises, &exercises)?)
    }
}

impl<S: KeyValueStore> domain::CurrentWorkoutRepository for JsonStorage<S> {
    async fn read_current_workout(&self) -> Result<Option<domain::Workout>, domain::ReadError> {
        self.read::<Option<model::Workout>>(Collection::CurrentWorkout)?
            .flatten()
            .map(domain::Workout::try_from)
            .transpose()
            .map_err(|err| corrupted(Collection::CurrentWorkout, &err).into())
    }

    async fn write_current_workout(
        &self,
        workout: &domain::Workout,
    ) -> Result<(), domain::UpdateError> {
        Ok(self.write(Collection::CurrentWorkout, &model::Workout::from(workout))?)
    }

    async fn clear_current_workout(&self) -> Result<(), domain::DeleteError> {
        Ok(self.remove(Collection::CurrentWorkout)?)
    }
}

impl<S: KeyValueStore> domain::WorkoutHistoryRepository for JsonStorage<S> {
    async fn read_workout_history(&self) -> Result<Vec<domain::Workout>, domain::ReadError> {
        self.read::<Vec<model::Workout>>(Collection::WorkoutHistory)?
            .unwrap_or_default()
            .into_iter()
            .map(domain::Workout::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err| corrupted(Collection::WorkoutHistory, &err).into())
    }

    async fn write_workout_history(
        &self,
        workouts: &[domain::Workout],
    ) -> Result<(), domain::UpdateError> {
        let workouts = workouts
            .iter()
            .map(model::Workout::from)
            .collect::<Vec<_>>();
        Ok(self.write(Collection::WorkoutHistory, &workouts)?)
    }

    async fn clear_workout_history(&self) -> Result<(), domain::DeleteError> {
        Ok(self.remove(Collection::WorkoutHistory)?)
    }
}

impl<S: KeyValueStore> domain::SettingsRepository for JsonStorage<S> {
    async fn read_settings(&self) -> Result<domain::Settings, domain::ReadError> {
        Ok(self
            .read::<model::Settings>(Collection::Settings)?
            .unwrap_or_default()
            .into())
    }

    async fn write_settings(
        &self,
        settings: domain::Settings,
    ) -> Result<domain::Settings, domain::UpdateError> {
        self.write(Collection::Settings, &model::Settings::from(settings))?;
        Ok(settings)
    }
}
