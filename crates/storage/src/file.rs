use std::{
    fs, io,
    path::{Path, PathBuf},
};

use crate::{Error, KeyValueStore};

/// Store keeping each value in a JSON file of its own inside a directory.
///
/// Values are written to a temporary file which then replaces the previous
/// file, so a failed write leaves the old value in place.
#[derive(Clone, Debug)]
pub struct FileStore {
    directory: PathBuf,
}

impl FileStore {
    /// Open the store in `directory`, creating the directory if necessary.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn new(directory: impl Into<PathBuf>) -> Result<Self, Error> {
        let directory = directory.into();
        fs::create_dir_all(&directory)?;
        Ok(Self { directory })
    }

    #[must_use]
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn path(&self, key: &str) -> PathBuf {
        let file_name = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .collect::<String>();
        self.directory.join(format!("{file_name}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, Error> {
        match fs::read_to_string(self.path(key)) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Error> {
        let path = self.path(key);
        let temporary_path = path.with_extension("json.tmp");
        fs::write(&temporary_path, value)?;
        fs::rename(&temporary_path, &path)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), Error> {
        match fs::remove_file(self.path(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_file_store() {
        let directory = tempfile::tempdir().unwrap();
        let store = FileStore::new(directory.path()).unwrap();
        assert_eq!(store.get("current workout").unwrap(), None);

        store.set("current workout", "{}").unwrap();
        assert_eq!(
            store.get("current workout").unwrap(),
            Some("{}".to_string())
        );
        assert!(directory.path().join("current_workout.json").exists());
        assert!(!directory.path().join("current_workout.json.tmp").exists());

        store.set("current workout", "null").unwrap();
        assert_eq!(
            store.get("current workout").unwrap(),
            Some("null".to_string())
        );

        store.remove("current workout").unwrap();
        store.remove("current workout").unwrap();
        assert_eq!(store.get("current workout").unwrap(), None);
    }

    #[test]
    fn test_file_store_persists() {
        let directory = tempfile::tempdir().unwrap();
        FileStore::new(directory.path())
            .unwrap()
            .set("settings", "{}")
            .unwrap();

        let store = FileStore::new(directory.path()).unwrap();
        assert_eq!(store.directory(), directory.path());
        assert_eq!(store.get("settings").unwrap(), Some("{}".to_string()));
    }

    #[test]
    fn test_file_store_creates_directory() {
        let directory = tempfile::tempdir().unwrap();
        let store = FileStore::new(directory.path().join("a").join("b")).unwrap();
        store.set("log", "[]").unwrap();
        assert_eq!(store.get("log").unwrap(), Some("[]".to_string()));
    }
}
