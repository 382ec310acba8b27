//! File-backed key-value store
//!
//! All keys live in one JSON document at `.reorder/store.json`:
//!
//! ```json
//! {
//!   "entries": {
//!     "reorder.widgets": { "value": "[...]", "updated_at": "2026-01-01T00:00:00Z" }
//!   }
//! }
//! ```
//!
//! Writes take an exclusive lock on a sidecar `store.json.lock` for the whole
//! read-modify-write, then replace the document atomically (temp file + rename).

use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};

use super::kv::{check_quota, KeyValueStore, StoreError};

/// A stored value with its last write time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredValue {
    pub value: String,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreDocument {
    #[serde(default)]
    entries: BTreeMap<String, StoredValue>,
}

impl StoreDocument {
    fn used_bytes(&self) -> usize {
        self.entries
            .iter()
            .map(|(k, v)| k.len() + v.value.len())
            .sum()
    }
}

/// Key-value store persisted as a single JSON file
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    quota: Option<usize>,
}

impl FileStore {
    /// Creates a store at the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            quota: None,
        }
    }

    /// Creates the default store for a project
    pub fn for_project(project_root: &Path) -> Self {
        Self::new(project_root.join(".reorder").join("store.json"))
    }

    /// Limits total key and value bytes
    pub fn with_quota(mut self, quota: Option<usize>) -> Self {
        self.quota = quota;
        self
    }

    /// Returns the path to the store file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads every entry with its timestamp
    pub fn entries(&self) -> Result<BTreeMap<String, StoredValue>, StoreError> {
        Ok(self.read_document()?.entries)
    }

    fn lock_path(&self) -> PathBuf {
        self.path.with_extension("json.lock")
    }

    fn read_document(&self) -> Result<StoreDocument, StoreError> {
        if !self.path.exists() {
            return Ok(StoreDocument::default());
        }

        let file = File::open(&self.path)?;

        // Acquire shared lock for reading
        file.lock_shared()?;

        let content = std::io::read_to_string(&file)?;
        if content.trim().is_empty() {
            return Ok(StoreDocument::default());
        }

        // Lock is released when file is dropped
        serde_json::from_str(&content).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    fn write_document(&self, document: &StoreDocument) -> Result<(), StoreError> {
        let temp_path = self.path.with_extension("json.tmp");

        {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)?;

            file.lock_exclusive()?;

            let mut writer = BufWriter::new(&file);
            serde_json::to_writer_pretty(&mut writer, document)?;
            writeln!(writer)?;
            writer.flush()?;
        }

        // Atomic rename
        fs::rename(&temp_path, &self.path)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.read_document()?.entries.remove(key).map(|v| v.value))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let lock = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(self.lock_path())?;
        lock.lock_exclusive()?;

        let mut document = self.read_document()?;
        let replaced = document
            .entries
            .get(key)
            .map(|v| key.len() + v.value.len())
            .unwrap_or(0);
        check_quota(self.quota, document.used_bytes() - replaced, key, value)?;

        document.entries.insert(
            key.to_string(),
            StoredValue {
                value: value.to_string(),
                updated_at: Utc::now(),
            },
        );
        self.write_document(&document)?;

        tracing::trace!(key, path = %self.path.display(), "wrote store entry");
        Ok(())
    }
}
