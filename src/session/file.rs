//! FileStorage: a JSON file standing in for browser localStorage (native)
//!
//! The whole scope is one JSON object of string values. Each call reads the
//! file again, so the store never serves a stale copy; writes go to a sibling
//! temp file and are renamed over the original.

use super::backend::StorageBackend;
use super::{StoreError, StoreResult};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

type Entries = BTreeMap<String, String>;

#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStorage {
    /// Open (or lazily create) the storage file at `path`.
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                StoreError::unavailable(format!("cannot create {}: {}", parent.display(), e))
            })?;
        }
        tracing::debug!(path = %path.display(), "opened file storage");
        Ok(Self { path, lock: Mutex::new(()) })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> StoreResult<Entries> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Entries::new()),
            Err(e) => {
                return Err(StoreError::unavailable(format!(
                    "cannot read {}: {}",
                    self.path.display(),
                    e
                )))
            }
        };
        if text.trim().is_empty() {
            return Ok(Entries::new());
        }
        serde_json::from_str(&text).map_err(|e| {
            StoreError::unavailable(format!(
                "{} is not a storage map: {}",
                self.path.display(),
                e
            ))
        })
    }

    fn save(&self, entries: &Entries) -> StoreResult<()> {
        let text = serde_json::to_string_pretty(entries)
            .map_err(|e| StoreError::unavailable(e.to_string()))?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, text)
            .and_then(|_| std::fs::rename(&tmp, &self.path))
            .map_err(|e| {
                StoreError::unavailable(format!("cannot write {}: {}", self.path.display(), e))
            })
    }

    fn modify(&self, f: impl FnOnce(&mut Entries)) -> StoreResult<()> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| StoreError::unavailable("file storage lock poisoned"))?;
        let mut entries = self.load()?;
        f(&mut entries);
        self.save(&entries)
    }
}

impl StorageBackend for FileStorage {
    fn get_item(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.load()?.remove(key))
    }

    fn set_item(&self, key: &str, value: &str) -> StoreResult<()> {
        self.modify(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    fn remove_item(&self, key: &str) -> StoreResult<()> {
        self.modify(|entries| {
            entries.remove(key);
        })
    }

    fn clear(&self) -> StoreResult<()> {
        self.modify(|entries| entries.clear())
    }

    fn keys(&self) -> StoreResult<Vec<String>> {
        Ok(self.load()?.into_keys().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_reads_as_empty() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::open(dir.path().join("storage.json")).unwrap();
        assert_eq!(storage.get_item("session").unwrap(), None);
        assert!(storage.keys().unwrap().is_empty());
    }

    #[test]
    fn entries_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/storage.json");
        {
            let storage = FileStorage::open(&path).unwrap();
            storage.set_item("isConnected", "true").unwrap();
        }
        let storage = FileStorage::open(&path).unwrap();
        assert_eq!(storage.get_item("isConnected").unwrap().as_deref(), Some("true"));
    }

    #[test]
    fn corrupt_file_is_unavailable() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, "[1, 2").unwrap();
        let storage = FileStorage::open(&path).unwrap();
        let err = storage.get_item("session").unwrap_err();
        assert!(matches!(err, StoreError::StorageUnavailable(_)));
    }

    #[test]
    fn clear_removes_everything() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::open(dir.path().join("storage.json")).unwrap();
        storage.set_item("a", "1").unwrap();
        storage.set_item("b", "2").unwrap();
        storage.clear().unwrap();
        assert!(storage.keys().unwrap().is_empty());
    }
}
