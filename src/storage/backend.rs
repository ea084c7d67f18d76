//! Storage backend seam.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Error type for storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("unknown storage kind '{0}'")]
    UnknownKind(String),

    #[error("backend error: {0}")]
    Backend(String),
}

/// Built-in storage kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKind {
    /// File-backed, survives restarts.
    Persistent,
    /// In-memory, process lifetime.
    Session,
    /// In-memory with per-entry expiry (six months by default).
    Expiring,
}

impl StorageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageKind::Persistent => "persistent",
            StorageKind::Session => "session",
            StorageKind::Expiring => "expiring",
        }
    }
}

impl std::fmt::Display for StorageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for StorageKind {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// A single stored entry: the stringified value plus optional expiry
/// (seconds since epoch).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct StoredEntry {
    pub value: String,
    pub expires_at: Option<u64>,
}

impl StoredEntry {
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expiry) => expiry <= now_secs(),
            None => false,
        }
    }
}

/// Seconds since the Unix epoch.
pub(crate) fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

/// The pluggable storage primitive: set/get/remove for one kind of store.
pub trait StorageBackend: Send + Sync {
    /// Store a value, stringified. `expires_at` is seconds since epoch;
    /// backends without expiry semantics ignore it.
    fn set_value(&self, key: &str, value: &Value, expires_at: Option<u64>)
        -> Result<(), StorageError>;

    /// Read a value back, or `None` when absent or expired.
    fn get_value(&self, key: &str) -> Result<Option<Value>, StorageError>;

    /// Remove a value; removing an absent key is not an error.
    fn remove_value(&self, key: &str) -> Result<(), StorageError>;
}
