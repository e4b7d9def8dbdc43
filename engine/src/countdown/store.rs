// Persistent list of countdowns on top of a key-value backend
use super::storage::KeyValueStorage;
use crate::error::{EngineError, Result};
use chrono::{SecondsFormat, Utc};
use shared::models::{Countdown, CountdownUpdate};
use uuid::Uuid;

pub const STORAGE_KEY: &str = "countdowns";
pub const MAX_COUNTDOWNS: usize = 10;

/// Sole owner of the persisted countdown collection.
///
/// The collection is stored as one JSON array under [`STORAGE_KEY`]; every
/// mutation reads it whole and writes it back whole.
pub struct CountdownStore<S: KeyValueStorage> {
    storage: S,
}

impl<S: KeyValueStorage> CountdownStore<S> {
    pub fn new(storage: S) -> Self {
        CountdownStore { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// All countdowns in insertion order. Unavailable or unreadable storage
    /// reads as an empty list.
    pub fn list(&self) -> Vec<Countdown> {
        let raw = match self.storage.get_item(STORAGE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "Countdown storage unavailable, treating as empty");
                return Vec::new();
            }
        };
        serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Stored countdowns are unreadable, treating as empty");
            Vec::new()
        })
    }

    pub fn get(&self, id: &str) -> Option<Countdown> {
        self.list().into_iter().find(|c| c.id == id)
    }

    pub fn add(&mut self, name: &str, target_date: &str) -> Result<Countdown> {
        let mut countdowns = self.list();
        if countdowns.len() >= MAX_COUNTDOWNS {
            tracing::warn!(count = countdowns.len(), "Countdown limit reached");
            return Err(EngineError::CapacityExceeded { limit: MAX_COUNTDOWNS });
        }

        let countdown = Countdown {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            target_date: target_date.to_string(),
            created_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        };
        countdowns.push(countdown.clone());
        self.save(&countdowns)?;
        tracing::info!(id = %countdown.id, name = %countdown.name, "Countdown added");
        Ok(countdown)
    }

    /// Merges `changes` into the countdown with `id`. Unknown ids are ignored.
    pub fn update(&mut self, id: &str, changes: CountdownUpdate) -> Result<()> {
        let mut countdowns = self.list();
        let Some(existing) = countdowns.iter_mut().find(|c| c.id == id) else {
            tracing::debug!(id, "Update for unknown countdown ignored");
            return Ok(());
        };

        if let Some(name) = changes.name {
            existing.name = name;
        }
        if let Some(target_date) = changes.target_date {
            existing.target_date = target_date;
        }
        self.save(&countdowns)?;
        tracing::info!(id, "Countdown updated");
        Ok(())
    }

    pub fn delete(&mut self, id: &str) -> Result<()> {
        let countdowns: Vec<Countdown> = self.list().into_iter().filter(|c| c.id != id).collect();
        self.save(&countdowns)?;
        tracing::info!(id, remaining = countdowns.len(), "Countdown deleted");
        Ok(())
    }

    fn save(&mut self, countdowns: &[Countdown]) -> Result<()> {
        let raw = serde_json::to_string(countdowns)?;
        self.storage.set_item(STORAGE_KEY, &raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::countdown::storage::MemoryStorage;

    fn store() -> CountdownStore<MemoryStorage> {
        CountdownStore::new(MemoryStorage::new())
    }

    struct BrokenStorage;

    impl KeyValueStorage for BrokenStorage {
        fn get_item(&self, _key: &str) -> Result<Option<String>> {
            Err(EngineError::StorageError("unavailable".to_string()))
        }

        fn set_item(&mut self, _key: &str, _value: &str) -> Result<()> {
            Err(EngineError::StorageError("unavailable".to_string()))
        }
    }

    #[test]
    fn test_empty_store_lists_nothing() {
        assert!(store().list().is_empty());
    }

    #[test]
    fn test_add_assigns_id_and_creation_time() {
        let mut store = store();
        let created = store.add("Launch", "2999-01-01T00:00:00Z").unwrap();
        assert!(!created.id.is_empty());
        assert_eq!(created.name, "Launch");
        assert_eq!(created.target_date, "2999-01-01T00:00:00Z");
        assert!(created.created_at.ends_with('Z'));
        assert_eq!(store.list(), vec![created]);
    }

    #[test]
    fn test_ids_are_unique_and_order_is_kept() {
        let mut store = store();
        let first = store.add("one", "2999-01-01T00:00:00Z").unwrap();
        let second = store.add("two", "2999-01-02T00:00:00Z").unwrap();
        assert_ne!(first.id, second.id);
        let names: Vec<String> = store.list().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["one", "two"]);
    }

    #[test]
    fn test_eleventh_countdown_is_rejected() {
        let mut store = store();
        for i in 0..MAX_COUNTDOWNS {
            store.add(&format!("timer {}", i), "2999-01-01T00:00:00Z").unwrap();
        }
        let before = store.list();

        let err = store.add("one too many", "2999-01-01T00:00:00Z").unwrap_err();
        assert!(matches!(err, EngineError::CapacityExceeded { limit: 10 }));
        assert_eq!(store.list(), before);
    }

    #[test]
    fn test_update_merges_fields_in_place() {
        let mut store = store();
        let a = store.add("a", "2999-01-01T00:00:00Z").unwrap();
        let b = store.add("b", "2999-01-01T00:00:00Z").unwrap();

        store
            .update(&a.id, CountdownUpdate { name: Some("renamed".to_string()), target_date: None })
            .unwrap();

        let list = store.list();
        assert_eq!(list[0].id, a.id);
        assert_eq!(list[0].name, "renamed");
        assert_eq!(list[0].target_date, a.target_date);
        assert_eq!(list[0].created_at, a.created_at);
        assert_eq!(list[1], b);
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let mut store = store();
        store.add("a", "2999-01-01T00:00:00Z").unwrap();
        let before = store.list();
        store
            .update("missing", CountdownUpdate { name: Some("x".to_string()), target_date: None })
            .unwrap();
        assert_eq!(store.list(), before);
    }

    #[test]
    fn test_delete() {
        let mut store = store();
        let a = store.add("a", "2999-01-01T00:00:00Z").unwrap();
        let b = store.add("b", "2999-01-01T00:00:00Z").unwrap();
        store.delete(&a.id).unwrap();
        assert_eq!(store.list(), vec![b.clone()]);

        store.delete("missing").unwrap();
        assert_eq!(store.list(), vec![b]);
        assert!(store.storage().get_item(STORAGE_KEY).unwrap().is_some());
    }

    #[test]
    fn test_persisted_layout_is_flat_camel_case_array() {
        let mut store = store();
        let created = store.add("a", "2999-01-01T00:00").unwrap();
        let raw = store.storage().get_item(STORAGE_KEY).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(
            value,
            serde_json::json!([{
                "id": created.id,
                "name": "a",
                "targetDate": "2999-01-01T00:00",
                "createdAt": created.created_at,
            }])
        );
    }

    #[test]
    fn test_unavailable_storage_lists_empty_and_fails_writes() {
        let mut store = CountdownStore::new(BrokenStorage);
        assert!(store.list().is_empty());
        assert!(matches!(store.add("a", "2999-01-01T00:00:00Z"), Err(EngineError::StorageError(_))));
    }

    #[test]
    fn test_corrupt_payload_lists_empty() {
        let mut storage = MemoryStorage::new();
        storage.set_item(STORAGE_KEY, "{not json").unwrap();
        assert!(CountdownStore::new(storage).list().is_empty());
    }
}
