//! The storage facade.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;

use crate::observability::metrics;
use crate::storage::backend::{now_secs, StorageBackend, StorageError};
use crate::storage::registry::StorageRegistry;

/// Default entry lifetime for expiry-aware kinds: roughly six months.
const DEFAULT_EXPIRY: Duration = Duration::from_secs(182 * 24 * 60 * 60);

fn default_expiry_secs() -> u64 {
    now_secs() + DEFAULT_EXPIRY.as_secs()
}

/// Simple interface over one storage kind.
///
/// The facade resolves its kind through a registry on every call, so a
/// backend registered later is picked up without rebuilding the facade.
#[derive(Clone)]
pub struct Storage {
    kind: String,
    registry: StorageRegistry,
}

impl Storage {
    /// Facade over a kind in the process-wide shared registry.
    pub fn new(kind: impl AsRef<str>) -> Self {
        Self::with_registry(kind, StorageRegistry::shared())
    }

    /// Facade over a kind in an explicit registry.
    pub fn with_registry(kind: impl AsRef<str>, registry: StorageRegistry) -> Self {
        Self {
            kind: kind.as_ref().to_string(),
            registry,
        }
    }

    /// Facade over an explicit backend, registered under the kind name in a
    /// fork of the shared registry.
    pub fn with_backend(kind: impl AsRef<str>, backend: Arc<dyn StorageBackend>) -> Self {
        let registry = StorageRegistry::shared().fork();
        registry.register(kind.as_ref(), backend);
        Self::with_registry(kind, registry)
    }

    /// The kind this facade operates on.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    fn backend(&self) -> Result<Arc<dyn StorageBackend>, StorageError> {
        self.registry
            .get(&self.kind)
            .ok_or_else(|| StorageError::UnknownKind(self.kind.clone()))
    }

    /// Store a value with the default expiry (six months from now).
    /// Kinds without expiry semantics keep the value indefinitely.
    pub fn set_value(&self, key: &str, value: &Value) -> Result<(), StorageError> {
        self.set_value_with_expiry(key, value, default_expiry_secs())
    }

    /// Store a value with an explicit expiry (seconds since epoch).
    pub fn set_value_with_expiry(
        &self,
        key: &str,
        value: &Value,
        expires_at: u64,
    ) -> Result<(), StorageError> {
        metrics::record_storage_op("set", &self.kind);
        self.backend()?.set_value(key, value, Some(expires_at))
    }

    /// Read a value, or `None` when absent or expired.
    pub fn get_value(&self, key: &str) -> Result<Option<Value>, StorageError> {
        metrics::record_storage_op("get", &self.kind);
        self.backend()?.get_value(key)
    }

    /// Remove a value.
    pub fn remove_value(&self, key: &str) -> Result<(), StorageError> {
        metrics::record_storage_op("remove", &self.kind);
        self.backend()?.remove_value(key)
    }
}

/// Probe whether a storage kind is usable: write a test key and remove it.
pub fn can_use_storage(kind: impl AsRef<str>, registry: &StorageRegistry) -> bool {
    let storage = Storage::with_registry(kind, registry.clone());
    let probe_key = "__storage_probe__";
    match storage.set_value(probe_key, &Value::from(1)) {
        Ok(()) => storage.remove_value(probe_key).is_ok(),
        Err(_) => false,
    }
}
