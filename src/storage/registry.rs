//! Kind-name → backend registry.

use std::path::PathBuf;
use std::sync::{Arc, OnceLock};

use dashmap::DashMap;

use crate::storage::backend::{StorageBackend, StorageError, StorageKind};
use crate::storage::file::FileBackend;
use crate::storage::memory::MemoryBackend;

/// Maps storage kind names to backends.
///
/// Clones share the same map; use [`StorageRegistry::fork`] to customize
/// without touching the original.
#[derive(Clone)]
pub struct StorageRegistry {
    backends: Arc<DashMap<String, Arc<dyn StorageBackend>>>,
}

impl StorageRegistry {
    /// Registry with the in-memory builtin kinds (session, expiring).
    /// The persistent kind needs a path; see [`StorageRegistry::with_persistent`].
    pub fn new() -> Self {
        let backends: DashMap<String, Arc<dyn StorageBackend>> = DashMap::new();
        backends.insert(
            StorageKind::Session.as_str().to_string(),
            Arc::new(MemoryBackend::session()) as Arc<dyn StorageBackend>,
        );
        backends.insert(
            StorageKind::Expiring.as_str().to_string(),
            Arc::new(MemoryBackend::expiring()) as Arc<dyn StorageBackend>,
        );
        Self {
            backends: Arc::new(backends),
        }
    }

    /// The process-wide default registry. Facades built without an explicit
    /// registry share it, and with it the builtin stores.
    pub fn shared() -> StorageRegistry {
        static SHARED: OnceLock<StorageRegistry> = OnceLock::new();
        SHARED.get_or_init(StorageRegistry::new).clone()
    }

    /// Register the persistent kind backed by the given file.
    pub fn with_persistent(self, path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let backend = FileBackend::open(path)?;
        self.register(StorageKind::Persistent.as_str(), Arc::new(backend));
        Ok(self)
    }

    /// Register a backend under a kind name. Re-registering an existing
    /// kind logs a warning; the new backend wins.
    pub fn register(&self, kind: &str, backend: Arc<dyn StorageBackend>) {
        if self
            .backends
            .insert(kind.to_string(), backend)
            .is_some()
        {
            tracing::warn!(kind = %kind, "storage kind already registered, overwriting");
        }
    }

    /// Resolve a kind name to its backend.
    pub fn get(&self, kind: &str) -> Option<Arc<dyn StorageBackend>> {
        self.backends.get(kind).map(|r| Arc::clone(r.value()))
    }

    /// Independent copy of the registry: same backends, separate map, so
    /// later registrations do not leak into the original.
    pub fn fork(&self) -> Self {
        let backends: DashMap<String, Arc<dyn StorageBackend>> = DashMap::new();
        for entry in self.backends.iter() {
            backends.insert(entry.key().clone(), Arc::clone(entry.value()));
        }
        Self {
            backends: Arc::new(backends),
        }
    }
}

impl Default for StorageRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn builtin_kinds_are_registered() {
        let registry = StorageRegistry::new();
        assert!(registry.get("session").is_some());
        assert!(registry.get("expiring").is_some());
        assert!(registry.get("persistent").is_none());
    }

    #[test]
    fn custom_kind_registration() {
        let registry = StorageRegistry::new();
        registry.register("scratch", Arc::new(MemoryBackend::session()));

        let backend = registry.get("scratch").unwrap();
        backend.set_value("k", &json!(1), None).unwrap();
        assert_eq!(backend.get_value("k").unwrap(), Some(json!(1)));
    }

    #[test]
    fn overwrite_wins() {
        let registry = StorageRegistry::new();
        let replacement = MemoryBackend::session();
        replacement.set_value("marker", &json!(true), None).unwrap();

        registry.register("session", Arc::new(replacement));

        let backend = registry.get("session").unwrap();
        assert_eq!(backend.get_value("marker").unwrap(), Some(json!(true)));
    }

    #[test]
    fn fork_is_independent() {
        let registry = StorageRegistry::new();
        let fork = registry.fork();

        fork.register("custom", Arc::new(MemoryBackend::session()));
        assert!(fork.get("custom").is_some());
        assert!(registry.get("custom").is_none());

        // Shared backends still point at the same store.
        let original = registry.get("session").unwrap();
        original.set_value("k", &json!("v"), None).unwrap();
        let forked = fork.get("session").unwrap();
        assert_eq!(forked.get_value("k").unwrap(), Some(json!("v")));
    }
}
