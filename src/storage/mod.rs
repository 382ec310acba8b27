//! # Storage Layer
//!
//! Persistence for reorder. The ordering manager only ever sees the
//! [`KeyValueStore`] trait; this module provides the implementations.
//!
//! ## Stores
//!
//! | Store | Backing | Use |
//! |-------|---------|-----|
//! | [`MemoryStore`] | `BTreeMap` | tests, embedding, quota simulation |
//! | [`FileStore`] | `.reorder/store.json` | the CLI |
//!
//! ## Concurrency Safety
//!
//! - [`FileStore`] holds an exclusive `fs2` lock for each read-modify-write
//! - All file writes are atomic (temp file + rename)
//! - Stores are last-write-wins; two writers on one key is unsupported
//!
//! ## Project Structure
//!
//! ```text
//! .reorder/
//! ├── store.json      # Key-value store (current orders and defaults)
//! ├── config.toml     # Project configuration
//! └── .gitignore      # Ignores scratch files
//! ```

mod kv;
mod file_store;
mod config;
mod project;

pub use kv::{KeyValueStore, MemoryStore, StoreError};
pub use file_store::{FileStore, StoredValue};
pub use config::{Config, ConfigError, GlobalConfig, OutputFormat, ProjectConfig};
pub use project::{Project, ProjectError};
