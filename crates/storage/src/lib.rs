#![warn(clippy::pedantic)]

use strum::AsRefStr;

pub mod file;
#[cfg(target_arch = "wasm32")]
#[allow(clippy::module_name_repetitions)]
pub mod local_storage;
pub mod log;
pub mod memory;
mod model;
mod repository;

pub use repository::JsonStorage;

/// Store of string values under string keys.
///
/// Each call reads or replaces exactly one value and either takes effect
/// completely or not at all.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, Error>;
    fn set(&self, key: &str, value: &str) -> Result<(), Error>;
    /// Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), Error>;
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Backend(String),
}

#[derive(AsRefStr, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    #[strum(serialize = "defined exercises")]
    Exercises,
    #[strum(serialize = "current workout")]
    CurrentWorkout,
    #[strum(serialize = "workout history")]
    WorkoutHistory,
    #[strum(serialize = "settings")]
    Settings,
    #[strum(serialize = "log")]
    Log,
}

#[cfg(test)]
mod tests {
    pub mod data;
}
