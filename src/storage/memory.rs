//! In-memory storage backends.

use std::sync::Arc;

use dashmap::DashMap;
use serde_json::Value;

use crate::storage::backend::{StorageBackend, StorageError, StoredEntry};

/// Thread-safe in-memory store.
///
/// Backs both the session kind (entries live for the process) and the
/// expiring kind (entries honor their expiry timestamp). Clones share the
/// same map.
#[derive(Clone, Default)]
pub struct MemoryBackend {
    entries: Arc<DashMap<String, StoredEntry>>,
    honor_expiry: bool,
}

impl MemoryBackend {
    /// Session store: expiry timestamps are ignored.
    pub fn session() -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
            honor_expiry: false,
        }
    }

    /// Expiring store: entries disappear once their expiry passes.
    pub fn expiring() -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
            honor_expiry: true,
        }
    }

    /// Number of live entries (expired ones included until next read).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl StorageBackend for MemoryBackend {
    fn set_value(
        &self,
        key: &str,
        value: &Value,
        expires_at: Option<u64>,
    ) -> Result<(), StorageError> {
        let entry = StoredEntry {
            value: serde_json::to_string(value)?,
            expires_at: if self.honor_expiry { expires_at } else { None },
        };
        self.entries.insert(key.to_string(), entry);
        Ok(())
    }

    fn get_value(&self, key: &str) -> Result<Option<Value>, StorageError> {
        let Some(entry) = self.entries.get(key).map(|r| r.value().clone()) else {
            return Ok(None);
        };
        if entry.is_expired() {
            self.entries.remove(key);
            return Ok(None);
        }
        Ok(Some(serde_json::from_str(&entry.value)?))
    }

    fn remove_value(&self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::backend::now_secs;
    use serde_json::json;

    #[test]
    fn set_get_remove_round_trip() {
        let backend = MemoryBackend::session();

        assert!(backend.get_value("user").unwrap().is_none());

        backend.set_value("user", &json!({"name": "Jack"}), None).unwrap();
        assert_eq!(
            backend.get_value("user").unwrap(),
            Some(json!({"name": "Jack"}))
        );

        backend.remove_value("user").unwrap();
        assert!(backend.get_value("user").unwrap().is_none());

        // Removing again is fine.
        backend.remove_value("user").unwrap();
    }

    #[test]
    fn session_store_ignores_expiry() {
        let backend = MemoryBackend::session();
        backend
            .set_value("k", &json!(1), Some(now_secs().saturating_sub(60)))
            .unwrap();
        assert_eq!(backend.get_value("k").unwrap(), Some(json!(1)));
    }

    #[test]
    fn expiring_store_honors_expiry() {
        let backend = MemoryBackend::expiring();

        backend.set_value("fresh", &json!(1), Some(now_secs() + 60)).unwrap();
        assert_eq!(backend.get_value("fresh").unwrap(), Some(json!(1)));

        backend
            .set_value("stale", &json!(1), Some(now_secs().saturating_sub(60)))
            .unwrap();
        assert!(backend.get_value("stale").unwrap().is_none());
        // The expired entry was dropped on read.
        assert_eq!(backend.len(), 1);
    }

    #[test]
    fn clones_share_state() {
        let backend = MemoryBackend::session();
        let alias = backend.clone();

        backend.set_value("k", &json!("v"), None).unwrap();
        assert_eq!(alias.get_value("k").unwrap(), Some(json!("v")));
    }
}
