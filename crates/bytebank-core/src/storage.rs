//! Key-value persistence boundary used by the services.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use serde::{de::DeserializeOwned, Serialize};

use crate::CoreError;

/// Abstraction over blob stores that keep one text document per key.
///
/// Writes overwrite whatever was stored under the key. There is no
/// coordination between writers: the last write wins.
pub trait KeyValueStore: Send + Sync {
    fn get_raw(&self, key: &str) -> Result<Option<String>, CoreError>;
    fn set_raw(&self, key: &str, value: &str) -> Result<(), CoreError>;
    /// Returns whether anything was stored under `key`.
    fn remove(&self, key: &str) -> Result<bool, CoreError>;
}

/// Volatile store backed by a map, for tests and throwaway sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, CoreError> {
        self.entries
            .lock()
            .map_err(|_| CoreError::Storage("memory store lock poisoned".into()))
    }
}

impl KeyValueStore for MemoryStore {
    fn get_raw(&self, key: &str) -> Result<Option<String>, CoreError> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set_raw(&self, key: &str, value: &str) -> Result<(), CoreError> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool, CoreError> {
        Ok(self.lock()?.remove(key).is_some())
    }
}

/// Typed JSON access on top of a [`KeyValueStore`].
pub struct StorageService {
    store: Box<dyn KeyValueStore>,
}

impl StorageService {
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryStore::new()))
    }

    /// Deserializes the document stored under `key`, or `None` when nothing is stored.
    pub fn get_item<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CoreError> {
        match self.store.get_raw(key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    pub fn set_item<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), CoreError> {
        let raw = serde_json::to_string(value)?;
        self.store.set_raw(key, &raw)
    }

    pub fn remove_item(&self, key: &str) -> Result<bool, CoreError> {
        self.store.remove(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Prefs {
        visible: bool,
    }

    #[test]
    fn missing_key_yields_none() {
        let storage = StorageService::in_memory();
        let value: Option<Prefs> = storage.get_item("absent").unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn set_overwrites_previous_value() {
        let storage = StorageService::in_memory();
        storage.set_item("prefs", &Prefs { visible: true }).unwrap();
        storage.set_item("prefs", &Prefs { visible: false }).unwrap();

        let value: Option<Prefs> = storage.get_item("prefs").unwrap();
        assert_eq!(value, Some(Prefs { visible: false }));

        assert!(storage.remove_item("prefs").unwrap());
        assert!(storage.get_item::<Prefs>("prefs").unwrap().is_none());
    }

    #[test]
    fn malformed_blob_surfaces_serde_error() {
        let store = MemoryStore::new();
        store.set_raw("prefs", "{not json").unwrap();
        let storage = StorageService::new(Box::new(store));

        let err = storage
            .get_item::<Prefs>("prefs")
            .expect_err("malformed data must not load");
        assert!(matches!(err, CoreError::Serde(_)), "unexpected error: {err:?}");
    }

    #[test]
    fn clones_share_the_same_entries() {
        let store = MemoryStore::new();
        let observer = store.clone();
        store.set_raw("k", "1").unwrap();
        assert_eq!(observer.get_raw("k").unwrap().as_deref(), Some("1"));
        assert!(observer.remove("k").unwrap());
        assert!(!store.remove("k").unwrap());
    }
}
