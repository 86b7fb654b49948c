use gloo_storage::Storage as _;

use crate::{Error, KeyValueStore};

/// Browser local storage.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorage;

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, Error> {
        gloo_storage::LocalStorage::raw()
            .get_item(key)
            .map_err(|err| Error::Backend(format!("{err:?}")))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Error> {
        gloo_storage::LocalStorage::raw()
            .set_item(key, value)
            .map_err(|err| Error::Backend(format!("{err:?}")))
    }

    fn remove(&self, key: &str) -> Result<(), Error> {
        gloo_storage::LocalStorage::raw()
            .remove_item(key)
            .map_err(|err| Error::Backend(format!("{err:?}")))
    }
}
