//! In-memory key-value store.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use crate::domain::ports::{KeyValueStore, KeyValueStoreError, StorageKey};

/// Key-value store kept in process memory. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    values: Mutex<BTreeMap<StorageKey, String>>,
}

impl MemoryKeyValueStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, BTreeMap<StorageKey, String>>, KeyValueStoreError> {
        self.values
            .lock()
            .map_err(|_| KeyValueStoreError::unavailable("memory store lock poisoned"))
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &StorageKey) -> Result<Option<String>, KeyValueStoreError> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &StorageKey, value: &str) -> Result<(), KeyValueStoreError> {
        self.lock()?.insert(key.clone(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &StorageKey) -> Result<(), KeyValueStoreError> {
        self.lock()?.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn set_get_remove() {
        let store = MemoryKeyValueStore::new();
        assert_eq!(store.get(&StorageKey::SESSION).expect("get"), None);

        store.set(&StorageKey::SESSION, "a").expect("set");
        store.set(&StorageKey::SESSION, "b").expect("overwrite");
        assert_eq!(store.get(&StorageKey::SESSION).expect("get").as_deref(), Some("b"));

        store.remove(&StorageKey::SESSION).expect("remove");
        store.remove(&StorageKey::SESSION).expect("remove absent");
        assert_eq!(store.get(&StorageKey::SESSION).expect("get"), None);
    }

    #[rstest]
    fn keys_are_independent() {
        let store = MemoryKeyValueStore::new();
        store.set(&StorageKey::SESSION, "user").expect("set");
        assert_eq!(store.get(&StorageKey::TICKETS).expect("get"), None);
    }
}
