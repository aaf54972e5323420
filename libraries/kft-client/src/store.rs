//! Session storage.
//!
//! The session lives in a flat string key-value store, one entry per key,
//! the way a browser's local storage holds it. [`SessionStore`] is the seam;
//! [`MemoryStore`] backs tests and short-lived processes, [`FileStore`]
//! persists entries across runs.
//!
//! Entries are written one at a time. There is no cross-entry transaction.

use crate::error::{ClientError, Result};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use tracing::warn;

/// String key-value storage for session entries.
#[cfg_attr(test, mockall::automock)]
pub trait SessionStore: Send + Sync {
    /// Read an entry.
    fn get(&self, key: &str) -> Option<String>;

    /// Write an entry, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove an entry. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}

/// In-memory session store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
        Ok(())
    }
}

/// File-backed session store.
///
/// All entries live in one JSON object file. Every write rewrites the file
/// through a temporary sibling and a rename, so a reader never sees a
/// half-written file. A missing or unreadable file reads as empty.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> BTreeMap<String, String> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(_) => return BTreeMap::new(),
        };

        serde_json::from_str(&contents).unwrap_or_else(|e| {
            warn!(path = %self.path.display(), error = %e, "Ignoring unreadable session file");
            BTreeMap::new()
        })
    }

    fn save(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| ClientError::Storage(format!("{}: {e}", parent.display())))?;
            }
        }

        let json = serde_json::to_string_pretty(entries)
            .map_err(|e| ClientError::Storage(e.to_string()))?;

        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, json)
            .map_err(|e| ClientError::Storage(format!("{}: {e}", tmp.display())))?;
        std::fs::rename(&tmp, &self.path)
            .map_err(|e| ClientError::Storage(format!("{}: {e}", self.path.display())))
    }
}

impl SessionStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        self.load().remove(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut entries = self.load();
        entries.insert(key.to_string(), value.to_string());
        self.save(&entries)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut entries = self.load();
        if entries.remove(key).is_none() {
            return Ok(());
        }
        self.save(&entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_set_get_remove() {
        let store = MemoryStore::new();
        assert!(store.is_empty());

        store.set("accessToken", "abc").unwrap();
        assert_eq!(store.get("accessToken").as_deref(), Some("abc"));

        store.set("accessToken", "def").unwrap();
        assert_eq!(store.get("accessToken").as_deref(), Some("def"));
        assert_eq!(store.len(), 1);

        store.remove("accessToken").unwrap();
        store.remove("accessToken").unwrap();
        assert!(store.get("accessToken").is_none());
    }

    #[test]
    fn test_file_store_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");

        let store = FileStore::new(&path);
        store.set("adminAccessToken", "token").unwrap();
        store.set("adminUser", r#"{"id":1}"#).unwrap();

        let reopened = FileStore::new(&path);
        assert_eq!(reopened.get("adminAccessToken").as_deref(), Some("token"));
        assert_eq!(reopened.get("adminUser").as_deref(), Some(r#"{"id":1}"#));

        reopened.remove("adminAccessToken").unwrap();
        assert!(store.get("adminAccessToken").is_none());
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn test_file_store_missing_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("absent.json"));

        assert!(store.get("user").is_none());
        store.remove("user").unwrap();
        assert!(!store.path().exists());
    }

    #[test]
    fn test_file_store_corrupt_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{not json").unwrap();

        let store = FileStore::new(&path);
        assert!(store.get("user").is_none());

        store.set("user", "bob").unwrap();
        assert_eq!(store.get("user").as_deref(), Some("bob"));
    }
}
