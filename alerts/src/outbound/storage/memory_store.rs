//! Mutex-guarded in-memory store for tests and ephemeral runs.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::domain::ports::{KeyValueStore, KeyValueStoreError, is_valid_key};

/// Store keeping every document in process memory.
#[derive(Debug, Default)]
pub struct InMemoryKeyValueStore {
    documents: Mutex<HashMap<String, String>>,
}

impl InMemoryKeyValueStore {
    fn documents(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.documents.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn checked(key: &str) -> Result<&str, KeyValueStoreError> {
    if is_valid_key(key) {
        Ok(key)
    } else {
        Err(KeyValueStoreError::invalid_key(key))
    }
}

impl KeyValueStore for InMemoryKeyValueStore {
    fn load(&self, key: &str) -> Result<Option<String>, KeyValueStoreError> {
        let key = checked(key)?;
        Ok(self.documents().get(key).cloned())
    }

    fn save(&self, key: &str, json: &str) -> Result<(), KeyValueStoreError> {
        let key = checked(key)?;
        self.documents().insert(key.to_owned(), json.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), KeyValueStoreError> {
        let key = checked(key)?;
        self.documents().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn saves_loads_and_removes() {
        let store = InMemoryKeyValueStore::default();
        assert_eq!(store.load("session").expect("load"), None);
        store.save("session", "{}").expect("save");
        assert_eq!(store.load("session").expect("load").as_deref(), Some("{}"));
        store.remove("session").expect("remove");
        store.remove("session").expect("removing twice is fine");
        assert_eq!(store.load("session").expect("load"), None);
    }

    #[rstest]
    fn rejects_path_like_keys() {
        let store = InMemoryKeyValueStore::default();
        let error = store.save("../session", "{}").expect_err("invalid key");
        assert_eq!(error, KeyValueStoreError::invalid_key("../session"));
    }
}
