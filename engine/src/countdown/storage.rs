// Key-value backends for the countdown store
use crate::error::{EngineError, Result};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// String-to-string storage in the shape of browser local storage.
pub trait KeyValueStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<()>;
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// A JSON object on disk mapping keys to string values. A missing file reads
/// as an empty store; every write rewrites the whole file.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<Map<String, Value>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(e.into()),
        };
        if raw.trim().is_empty() {
            return Ok(Map::new());
        }
        match serde_json::from_str(&raw)? {
            Value::Object(map) => Ok(map),
            _ => Err(EngineError::StorageError(format!(
                "'{}' does not hold a JSON object",
                self.path.display()
            ))),
        }
    }
}

impl KeyValueStorage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let items = self.read_all()?;
        Ok(items.get(key).and_then(Value::as_str).map(str::to_string))
    }

    /// A file that does not hold a JSON object is replaced rather than
    /// blocking every later write.
    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        let mut items = match self.read_all() {
            Ok(items) => items,
            Err(e @ (EngineError::SerializationError { .. } | EngineError::StorageError(_))) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Storage file unreadable, starting afresh");
                Map::new()
            }
            Err(e) => return Err(e),
        };
        items.insert(key.to_string(), Value::String(value.to_string()));

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(&Value::Object(items))?)?;
        tracing::debug!(path = %self.path.display(), key, "Storage file written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::countdown::store::CountdownStore;
    use tempfile::tempdir;

    #[test]
    fn test_memory_storage_round_trip() {
        let mut storage = MemoryStorage::new();
        assert_eq!(storage.get_item("k").unwrap(), None);
        storage.set_item("k", "v").unwrap();
        assert_eq!(storage.get_item("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn test_file_storage_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("absent.json"));
        assert_eq!(storage.get_item("countdowns").unwrap(), None);
    }

    #[test]
    fn test_file_storage_keeps_other_keys() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("store.json");
        let mut storage = FileStorage::new(&path);
        storage.set_item("theme", "dark").unwrap();
        storage.set_item("countdowns", "[]").unwrap();

        let reopened = FileStorage::new(&path);
        assert_eq!(reopened.get_item("theme").unwrap().as_deref(), Some("dark"));
        assert_eq!(reopened.get_item("countdowns").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_file_storage_rejects_non_object() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, "[1,2]").unwrap();
        let storage = FileStorage::new(&path);
        assert!(matches!(storage.get_item("x"), Err(EngineError::StorageError(_))));
    }

    #[test]
    fn test_file_storage_write_replaces_unreadable_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("store.json");
        for corrupt in ["{\"oops", "[1,2]"] {
            fs::write(&path, corrupt).unwrap();
            let mut storage = FileStorage::new(&path);
            storage.set_item("k", "v").unwrap();
            assert_eq!(storage.get_item("k").unwrap().as_deref(), Some("v"));
        }
    }

    #[test]
    fn test_corrupt_file_recovers_on_next_add() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, "{\"oops").unwrap();

        let mut store = CountdownStore::new(FileStorage::new(&path));
        assert!(store.list().is_empty());
        let created = store.add("X", "2999-01-01T00:00").unwrap();
        assert_eq!(store.list(), vec![created]);
    }
}
