//! Key-value persistence for serialized blobs.
//!
//! Every collection is stored as one JSON string under a fixed key and is
//! always read and written whole.

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::io::Write;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::{ChoresError, Result};

/// Synchronous string blob storage.
pub trait KeyValueStore {
    /// Read the blob under `key`, or `None` if absent.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the blob under `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Remove the blob under `key`. Removing an absent key is not an error.
    fn remove(&mut self, key: &str) -> Result<()>;
}

// =============================================================================
// Typed Helpers
// =============================================================================

/// Decode the blob under `key`, falling back to `T::default()` when absent.
pub fn read_blob<T, S>(store: &S, key: &str) -> Result<T>
where
    T: DeserializeOwned + Default,
    S: KeyValueStore + ?Sized,
{
    match read_optional_blob(store, key)? {
        Some(value) => Ok(value),
        None => Ok(T::default()),
    }
}

/// Decode the blob under `key` if present.
pub fn read_optional_blob<T, S>(store: &S, key: &str) -> Result<Option<T>>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    let Some(raw) = store.get(key)? else {
        tracing::debug!(key, "blob absent");
        return Ok(None);
    };
    tracing::debug!(key, bytes = raw.len(), "blob read");
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|source| ChoresError::Corrupted {
            key: key.to_string(),
            source,
        })
}

/// Encode `value` and store it under `key`.
pub fn write_blob<T, S>(store: &mut S, key: &str, value: &T) -> Result<()>
where
    T: Serialize + ?Sized,
    S: KeyValueStore + ?Sized,
{
    let raw = serde_json::to_string(value).map_err(|e| ChoresError::Storage {
        key: key.to_string(),
        message: format!("Failed to serialize: {}", e),
    })?;
    tracing::debug!(key, bytes = raw.len(), "blob written");
    store.set(key, &raw)
}

// =============================================================================
// In-Memory Store
// =============================================================================

/// Volatile store, useful for embedding and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    blobs: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.blobs.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.blobs.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.blobs.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.blobs.remove(key);
        Ok(())
    }
}

// =============================================================================
// File Store
// =============================================================================

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// One `<key>.json` file per blob inside a data directory.
///
/// Writes go through a temporary file and a rename, so a blob is never
/// observed half-written. There is no locking across processes.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(ChoresError::InvalidInput(format!(
                "Invalid storage key '{}'",
                key
            )));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }

    fn storage_error(key: &str, action: &str, err: std::io::Error) -> ChoresError {
        ChoresError::Storage {
            key: key.to_string(),
            message: format!("Failed to {}: {}", action, err),
        }
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Self::storage_error(key, "read", e)),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;

        std::fs::create_dir_all(&self.dir)
            .map_err(|e| Self::storage_error(key, "create data dir", e))?;

        let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
        let tmp_path = self
            .dir
            .join(format!(".{}.tmp.{}.{}", key, std::process::id(), counter));

        let written = std::fs::File::create(&tmp_path).and_then(|mut file| {
            file.write_all(value.as_bytes())?;
            file.sync_all()
        });
        if let Err(e) = written {
            let _ = std::fs::remove_file(&tmp_path);
            return Err(Self::storage_error(key, "write", e));
        }

        if let Err(e) = std::fs::rename(&tmp_path, &path) {
            let _ = std::fs::remove_file(&tmp_path);
            return Err(Self::storage_error(key, "replace", e));
        }

        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Self::storage_error(key, "remove", e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("k").unwrap(), None);

        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));

        store.remove("k").unwrap();
        store.remove("k").unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_file_store_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().join("data");

        let mut store = FileStore::new(&data_dir);
        store.set("hcm_users", r#"{"a":1}"#).unwrap();

        let reopened = FileStore::new(&data_dir);
        assert_eq!(
            reopened.get("hcm_users").unwrap().as_deref(),
            Some(r#"{"a":1}"#)
        );
        assert!(data_dir.join("hcm_users.json").exists());
    }

    #[test]
    fn test_file_store_overwrite_leaves_no_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path());

        store.set("slot", "1").unwrap();
        store.set("slot", "2").unwrap();

        assert_eq!(store.get("slot").unwrap().as_deref(), Some("2"));
        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_file_store_remove_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path());

        store.remove("never_written").unwrap();
        store.set("slot", "x").unwrap();
        store.remove("slot").unwrap();
        assert_eq!(store.get("slot").unwrap(), None);
    }

    #[test]
    fn test_file_store_rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path());
        assert!(store.set("../escape", "x").is_err());
        assert!(store.get("").is_err());
    }

    #[test]
    fn test_corrupted_blob_is_reported() {
        let mut store = MemoryStore::new();
        store.set("hcm_workers", "not json").unwrap();

        let result: Result<Vec<String>> = read_blob(&store, "hcm_workers");
        assert!(matches!(result, Err(ChoresError::Corrupted { .. })));
    }

    #[test]
    fn test_absent_blob_reads_as_default() {
        let store = MemoryStore::new();
        let ids: Vec<String> = read_blob(&store, "hcm_workers").unwrap();
        assert!(ids.is_empty());
    }
}
