use std::collections::VecDeque;

use chrono::Utc;
use log::{Level, LevelFilter, Metadata, Record, SetLoggerError};
use serde::{Deserialize, Serialize};

use crate::{Collection, JsonStorage, KeyValueStore};

pub const MAX_ENTRIES: usize = 100;

#[allow(clippy::missing_errors_doc)]
pub trait Repository: Send + Sync + 'static {
    fn read_entries(&self) -> Result<VecDeque<Entry>, Error>;
    fn write_entry(&self, entry: Entry) -> Result<(), Error>;
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("{0}")]
    Unknown(String),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub time: String,
    #[serde(with = "LevelDef")]
    pub level: Level,
    pub message: String,
}

#[derive(Serialize, Deserialize)]
#[serde(remote = "Level")]
enum LevelDef {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Install a logger that persists all records up to `level`.
///
/// # Errors
///
/// Returns an error if a logger has already been initialized.
pub fn init(repository: impl Repository, level: LevelFilter) -> Result<(), SetLoggerError> {
    log::set_boxed_logger(Box::new(Logger::new(repository, level)))
        .map(|()| log::set_max_level(level))
}

pub struct Logger<R> {
    repository: R,
    level: LevelFilter,
}

impl<R: Repository> Logger<R> {
    pub fn new(repository: R, level: LevelFilter) -> Self {
        Self { repository, level }
    }
}

impl<R: Repository> log::Log for Logger<R> {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            // A failing log store must not affect the caller.
            let _ = self.repository.write_entry(Entry {
                time: Utc::now().format("%b %d %H:%M:%S").to_string(),
                level: record.level(),
                message: record.args().to_string(),
            });
        }
    }

    fn flush(&self) {}
}

impl<S: KeyValueStore + Send + Sync + 'static> Repository for JsonStorage<S> {
    fn read_entries(&self) -> Result<VecDeque<Entry>, Error> {
        Ok(self
            .read::<VecDeque<Entry>>(Collection::Log)
            .map_err(|err| Error::Unknown(err.to_string()))?
            .unwrap_or_default())
    }

    fn write_entry(&self, entry: Entry) -> Result<(), Error> {
        let mut entries = self.read_entries().unwrap_or_default();
        entries.push_front(entry);
        entries.truncate(MAX_ENTRIES);
        self.write(Collection::Log, &entries)
            .map_err(|err| Error::Unknown(err.to_string()))
    }
}
