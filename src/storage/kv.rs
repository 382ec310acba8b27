//! Key-value persistence adapter
//!
//! The manager persists through [`KeyValueStore`] and never touches a
//! global store directly. Semantics follow browser local storage: string
//! keys and values, no transactions, last write wins.

use std::collections::BTreeMap;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Storage quota exceeded: writing {requested} bytes would pass the {quota} byte limit")]
    QuotaExceeded { requested: usize, quota: usize },

    #[error("Store file is corrupt: {}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// String key-value storage
pub trait KeyValueStore {
    /// Returns the value stored under `key`, if any
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Stores `value` under `key`, replacing any previous value
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}

/// Fails when adding `key` and `value` to `used` bytes would pass `quota`
pub(crate) fn check_quota(
    quota: Option<usize>,
    used: usize,
    key: &str,
    value: &str,
) -> Result<(), StoreError> {
    let Some(quota) = quota else {
        return Ok(());
    };

    let requested = used + key.len() + value.len();
    if requested > quota {
        return Err(StoreError::QuotaExceeded { requested, quota });
    }
    Ok(())
}

/// In-memory store with an optional byte quota
///
/// The quota counts key and value bytes across all entries, the way
/// browsers account for local storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
    quota: Option<usize>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that rejects writes beyond `quota` bytes
    pub fn with_quota(quota: usize) -> Self {
        Self {
            quota: Some(quota),
            ..Self::default()
        }
    }

    /// Number of successful `set` calls
    pub fn write_count(&self) -> usize {
        self.writes
    }

    /// Total bytes held (keys plus values)
    pub fn used_bytes(&self) -> usize {
        self.entries.iter().map(|(k, v)| k.len() + v.len()).sum()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let replaced = self.entries.get(key).map(|v| key.len() + v.len()).unwrap_or(0);
        check_quota(self.quota, self.used_bytes() - replaced, key, value)?;

        self.entries.insert(key.to_string(), value.to_string());
        self.writes += 1;
        Ok(())
    }
}
