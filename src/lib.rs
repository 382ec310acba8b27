//! reorder - drag-and-drop ordering for item collections
//!
//! An [`OrderedCollectionManager`] tracks one drag gesture at a time,
//! computes the new order when an item is dropped and persists it through
//! any [`KeyValueStore`]. The `reorder` binary manages named collections
//! in a local `.reorder/` project directory on top of the same primitive.

pub mod domain;
pub mod storage;
pub mod manager;
pub mod logging;
pub mod cli;

pub use domain::{DragEvent, DragSession, DragState, DropEffect, Item, ItemId, Orderable};
pub use manager::{DropOutcome, NoOpReason, OrderedCollectionManager, PersistError};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StoreError};
