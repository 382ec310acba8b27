//! Item identifiers
//!
//! Item IDs are opaque, non-empty strings. Callers may bring their own
//! (e.g. `daily-inspiration`) or generate one:
//!
//! - Generated IDs: `i-{7-char-hash}` (e.g., `i-7f2b4c1`)
//!
//! The hash is derived from name + creation timestamp + sequence, so two
//! items created in the same batch with the same name still get distinct IDs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum IdError {
    #[error("Item ID must not be empty")]
    Empty,
}

/// Generates a 7-character hash from name, timestamp and batch sequence
fn generate_hash(name: &str, timestamp: DateTime<Utc>, sequence: usize) -> String {
    let input = format!(
        "{}{}{}",
        name,
        timestamp.timestamp_nanos_opt().unwrap_or(0),
        sequence
    );
    let hash = blake3::hash(input.as_bytes());
    let hex = hash.to_hex();
    hex[..7].to_string()
}

/// Opaque identifier of an item taking part in manual ordering
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ItemId(String);

impl ItemId {
    /// Wraps a caller-supplied identifier
    pub fn new(value: impl Into<String>) -> Result<Self, IdError> {
        let value = value.into();
        if value.is_empty() {
            return Err(IdError::Empty);
        }
        Ok(Self(value))
    }

    /// Generates a fresh `i-` prefixed ID for the item at `sequence` in a batch
    pub fn generate(name: &str, timestamp: DateTime<Utc>, sequence: usize) -> Self {
        Self(format!("i-{}", generate_hash(name, timestamp, sequence)))
    }

    /// Returns the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ItemId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.trim())
    }
}

impl TryFrom<String> for ItemId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ItemId> for String {
    fn from(id: ItemId) -> Self {
        id.0
    }
}

impl AsRef<str> for ItemId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ItemId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for ItemId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ItemId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
