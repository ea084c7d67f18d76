//! File-backed persistent storage.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use dashmap::DashMap;
use serde_json::Value;

use crate::storage::backend::{StorageBackend, StorageError, StoredEntry};

/// Persistent store: a JSON file on disk, rewritten after every mutation.
///
/// Entries never expire; persistence is the point of this kind.
#[derive(Clone)]
pub struct FileBackend {
    path: PathBuf,
    entries: Arc<DashMap<String, StoredEntry>>,
}

impl FileBackend {
    /// Open a store, loading existing entries if the file is present.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let entries = Arc::new(DashMap::new());

        if Path::new(&path).exists() {
            let file = File::open(&path)?;
            let reader = BufReader::new(file);
            let map: HashMap<String, StoredEntry> = serde_json::from_reader(reader)?;
            for (k, v) in map {
                entries.insert(k, v);
            }
            tracing::info!(path = %path.display(), entries = entries.len(), "loaded storage file");
        }

        Ok(Self { path, entries })
    }

    fn save(&self) -> Result<(), StorageError> {
        let file = File::create(&self.path)?;
        let writer = BufWriter::new(file);

        let map: HashMap<_, _> = self
            .entries
            .iter()
            .map(|r| (r.key().clone(), r.value().clone()))
            .collect();
        serde_json::to_writer(writer, &map)?;
        Ok(())
    }
}

impl StorageBackend for FileBackend {
    fn set_value(
        &self,
        key: &str,
        value: &Value,
        _expires_at: Option<u64>,
    ) -> Result<(), StorageError> {
        let entry = StoredEntry {
            value: serde_json::to_string(value)?,
            expires_at: None,
        };
        self.entries.insert(key.to_string(), entry);
        self.save()
    }

    fn get_value(&self, key: &str) -> Result<Option<Value>, StorageError> {
        match self.entries.get(key) {
            Some(entry) => Ok(Some(serde_json::from_str(&entry.value)?)),
            None => Ok(None),
        }
    }

    fn remove_value(&self, key: &str) -> Result<(), StorageError> {
        if self.entries.remove(key).is_some() {
            self.save()?;
        }
        Ok(())
    }
}
