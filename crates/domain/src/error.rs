use crate::{NameError, RepsError, WeightError};

#[derive(thiserror::Error, Debug)]
pub enum ReadError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error>),
}

#[derive(thiserror::Error, Debug)]
pub enum UpdateError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error>),
}

impl From<ReadError> for UpdateError {
    fn from(value: ReadError) -> Self {
        match value {
            ReadError::Storage(storage) => UpdateError::Storage(storage),
            ReadError::Other(other) => UpdateError::Other(other),
        }
    }
}

impl From<DeleteError> for UpdateError {
    fn from(value: DeleteError) -> Self {
        match value {
            DeleteError::Storage(storage) => UpdateError::Storage(storage),
            DeleteError::Other(other) => UpdateError::Other(other),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum DeleteError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error>),
}

impl From<UpdateError> for DeleteError {
    fn from(value: UpdateError) -> Self {
        match value {
            UpdateError::Storage(storage) => DeleteError::Storage(storage),
            UpdateError::Validation(validation) => DeleteError::Other(Box::new(validation)),
            UpdateError::Other(other) => DeleteError::Other(other),
        }
    }
}

impl From<ReadError> for DeleteError {
    fn from(value: ReadError) -> Self {
        match value {
            ReadError::Storage(storage) => DeleteError::Storage(storage),
            ReadError::Other(other) => DeleteError::Other(other),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum StorageError {
    #[error("corrupted data: {0}")]
    Corrupted(String),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error>),
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ValidationError {
    #[error(transparent)]
    Name(#[from] NameError),
    #[error(transparent)]
    Weight(#[from] WeightError),
    #[error(transparent)]
    Reps(#[from] RepsError),
    #[error("No workout in progress")]
    NoWorkout,
    #[error("Select an exercise first")]
    NoActiveExercise,
}
