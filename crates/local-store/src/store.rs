//! Mutex-guarded key→JSON store with an optional file backing.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

/// Errors surfaced by [`LocalStore`] write operations. Loads never fail; an
/// undecodable value is treated as absent.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A value could not be encoded as JSON.
    #[error("failed to encode value for key {key}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    /// The backing file could not be written.
    #[error("failed to write store file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The lock guarding the store data has been poisoned.
    #[error("lock on local store data has been poisoned")]
    PoisonedLock,
}

/// Key→JSON store shared by every engine.
///
/// All operations acquire a single mutex, so a store handle can be shared
/// across engines (typically behind an `Arc`). When opened with a backing
/// file, every mutation writes the full map back to disk.
#[derive(Debug)]
pub struct LocalStore {
    entries: Mutex<HashMap<String, Value>>,
    path: Option<PathBuf>,
}

impl LocalStore {
    /// Store with no backing file; contents live for the process only.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            path: None,
        }
    }

    /// Store backed by a JSON file. A missing or unreadable file starts the
    /// store empty; read problems are logged and otherwise ignored.
    #[must_use]
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(entries) => entries,
                Err(err) => {
                    tracing::debug!("Discarding unreadable store file {}: {}", path.display(), err);
                    HashMap::new()
                }
            },
            Err(err) => {
                if err.kind() != std::io::ErrorKind::NotFound {
                    tracing::debug!("Could not read store file {}: {}", path.display(), err);
                }
                HashMap::new()
            }
        };
        Self {
            entries: Mutex::new(entries),
            path: Some(path),
        }
    }

    /// Encode `value` as JSON and store it under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when encoding fails, the backing file cannot be
    /// written, or the internal lock is poisoned. A failed save leaves the
    /// in-memory state as it was.
    pub fn save<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let encoded = serde_json::to_value(value).map_err(|source| StoreError::Encode {
            key: key.to_string(),
            source,
        })?;
        let mut entries = self.entries.lock().map_err(|_| StoreError::PoisonedLock)?;
        let previous = entries.insert(key.to_string(), encoded);
        if let Err(err) = self.flush(&entries) {
            match previous {
                Some(value) => entries.insert(key.to_string(), value),
                None => entries.remove(key),
            };
            return Err(err);
        }
        Ok(())
    }

    /// Decode the value stored under `key`, or `None` when the key is absent
    /// or the stored blob does not decode as `T`.
    #[must_use]
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let entries = match self.entries.lock() {
            Ok(entries) => entries,
            Err(_) => {
                tracing::debug!("Store lock poisoned while loading {key}");
                return None;
            }
        };
        let value = entries.get(key)?.clone();
        drop(entries);
        match serde_json::from_value(value) {
            Ok(decoded) => Some(decoded),
            Err(err) => {
                tracing::debug!("Treating undecodable value at {key} as absent: {err}");
                None
            }
        }
    }

    /// Remove `key` if present.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the backing file cannot be rewritten or
    /// the internal lock is poisoned. A failed removal leaves the entry in
    /// place.
    pub fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().map_err(|_| StoreError::PoisonedLock)?;
        let Some(previous) = entries.remove(key) else {
            return Ok(());
        };
        if let Err(err) = self.flush(&entries) {
            entries.insert(key.to_string(), previous);
            return Err(err);
        }
        Ok(())
    }

    /// Whether a value is stored under `key`.
    #[must_use]
    pub fn exists(&self, key: &str) -> bool {
        self.entries
            .lock()
            .map(|entries| entries.contains_key(key))
            .unwrap_or(false)
    }

    /// Remove every key starting with `prefix`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the backing file cannot be rewritten or
    /// the internal lock is poisoned. A failed clear leaves every entry in
    /// place.
    pub fn clear_prefix(&self, prefix: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().map_err(|_| StoreError::PoisonedLock)?;
        let removed: Vec<(String, Value)> = entries
            .iter()
            .filter(|(key, _)| key.starts_with(prefix))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        if removed.is_empty() {
            return Ok(());
        }
        for (key, _) in &removed {
            entries.remove(key);
        }
        if let Err(err) = self.flush(&entries) {
            entries.extend(removed);
            return Err(err);
        }
        Ok(())
    }

    fn flush(&self, entries: &HashMap<String, Value>) -> Result<(), StoreError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let contents = serde_json::to_string_pretty(entries).map_err(|source| {
            StoreError::Encode {
                key: path.display().to_string(),
                source,
            }
        })?;
        fs::write(path, contents).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use learn_domain::{Card, StreakInfo};
    use uuid::Uuid;

    #[test]
    fn save_then_load_round_trips_domain_values() {
        let store = LocalStore::in_memory();
        let card = Card::new(Uuid::new_v4(), "front", "back");
        store.save("educationai.test.card", &card).expect("save");
        let loaded: Card = store.load("educationai.test.card").expect("load");
        assert_eq!(loaded, card);
    }

    #[test]
    fn load_of_missing_key_is_none() {
        let store = LocalStore::in_memory();
        assert!(store.load::<StreakInfo>("educationai.missing").is_none());
    }

    #[test]
    fn load_with_wrong_type_is_treated_as_absent() {
        let store = LocalStore::in_memory();
        store.save("educationai.test.n", &42u32).expect("save");
        assert!(store.load::<StreakInfo>("educationai.test.n").is_none());
        // The blob itself is untouched.
        assert_eq!(store.load::<u32>("educationai.test.n"), Some(42));
    }

    #[test]
    fn remove_and_exists() {
        let store = LocalStore::in_memory();
        store.save("educationai.test.k", &1u8).expect("save");
        assert!(store.exists("educationai.test.k"));
        store.remove("educationai.test.k").expect("remove");
        assert!(!store.exists("educationai.test.k"));
    }

    #[test]
    fn clear_prefix_spares_foreign_keys() {
        let store = LocalStore::in_memory();
        store.save("educationai.gamification.totalXP", &10u64).expect("save");
        store.save("educationai.progress", &5u64).expect("save");
        store.save("other.app.value", &7u64).expect("save");
        store.clear_prefix("educationai.gamification.").expect("clear");
        assert!(!store.exists("educationai.gamification.totalXP"));
        assert!(store.exists("educationai.progress"));
        assert!(store.exists("other.app.value"));
    }

    #[test]
    fn file_backed_store_survives_reopen() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("store.json");
        {
            let store = LocalStore::open(&path);
            store.save("educationai.test.value", &"hello").expect("save");
        }
        let reopened = LocalStore::open(&path);
        assert_eq!(
            reopened.load::<String>("educationai.test.value"),
            Some("hello".to_string())
        );
    }

    #[test]
    fn failed_save_leaves_memory_untouched() {
        let dir = tempfile::tempdir().expect("tempdir");
        // Parent directory is missing, so every flush fails.
        let store = LocalStore::open(dir.path().join("missing").join("store.json"));

        let err = store.save("educationai.test.value", &1u8).expect_err("save fails");
        assert!(matches!(err, StoreError::Io { .. }));
        assert!(!store.exists("educationai.test.value"));
        assert!(store.load::<u8>("educationai.test.value").is_none());
    }

    #[test]
    fn failed_removal_keeps_the_entry() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("store.json");
        {
            let store = LocalStore::open(&path);
            store.save("educationai.test.value", &1u8).expect("save");
        }

        // Reopen, then pull the backing directory out from under the store.
        let store = LocalStore::open(&path);
        std::fs::remove_dir_all(dir.path()).expect("drop backing dir");

        assert!(store.remove("educationai.test.value").is_err());
        assert!(store.exists("educationai.test.value"));
        assert!(store.clear_prefix("educationai.").is_err());
        assert!(store.exists("educationai.test.value"));
    }

    #[test]
    fn corrupt_backing_file_starts_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("store.json");
        std::fs::write(&path, "{ not json").expect("write");
        let store = LocalStore::open(&path);
        assert!(!store.exists("educationai.test.value"));
        // The store is still usable and overwrites the corrupt file.
        store.save("educationai.test.value", &1u8).expect("save");
        let reopened = LocalStore::open(&path);
        assert!(reopened.exists("educationai.test.value"));
    }
}
