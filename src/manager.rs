//! Ordered collection manager
//!
//! Turns a stream of drag-and-drop events into a new, normalized item order
//! and optionally persists it through a [`KeyValueStore`].
//!
//! The manager does not own the list. Every [`drop`](OrderedCollectionManager::drop)
//! receives the current items and returns the next ones; the manager only
//! keeps the [`DragSession`] of the gesture in progress.
//!
//! ```text
//! IDLE --begin_drag--> DRAGGING
//! DRAGGING --drag_over--> DRAGGING      (hover target updated)
//! DRAGGING --cancel_drag--> DRAGGING    (hover target cleared)
//! DRAGGING --drop / end_drag--> IDLE    (whatever the drop outcome)
//! ```
//!
//! A gesture that never terminates stays in DRAGGING until the next
//! `begin_drag` overwrites it.

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::domain::reorder;
use crate::domain::{DragEvent, DragSession, DropEffect, ItemId, Orderable};
use crate::storage::{KeyValueStore, StoreError};

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("Failed to write order under '{key}'")]
    Write {
        key: String,
        #[source]
        source: StoreError,
    },

    #[error("Failed to read order under '{key}'")]
    Read {
        key: String,
        #[source]
        source: StoreError,
    },

    #[error("Stored order under '{key}' is not a valid item list")]
    Malformed {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize items")]
    Serialize(#[from] serde_json::Error),
}

/// Why a drop left the list untouched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoOpReason {
    /// No drag was in progress
    NotDragging,
    /// The item was dropped onto itself
    DroppedOnSelf,
    /// The dragged item is not in the list
    DraggedMissing,
    /// The drop target is not in the list
    TargetMissing,
    /// The dragged item or the target is locked
    Locked,
}

impl NoOpReason {
    pub fn describe(&self) -> &'static str {
        match self {
            NoOpReason::NotDragging => "no drag in progress",
            NoOpReason::DroppedOnSelf => "item dropped onto itself",
            NoOpReason::DraggedMissing => "dragged item not found",
            NoOpReason::TargetMissing => "drop target not found",
            NoOpReason::Locked => "item is locked",
        }
    }
}

/// Result of a drop
#[derive(Debug, Clone, PartialEq)]
pub enum DropOutcome<T> {
    /// The list changed; hand it to whatever owns the canonical list
    Reordered(Vec<T>),
    /// A guard failed; `items` is the input list, untouched
    Unchanged { items: Vec<T>, reason: NoOpReason },
}

impl<T> DropOutcome<T> {
    pub fn is_reordered(&self) -> bool {
        matches!(self, DropOutcome::Reordered(_))
    }

    pub fn items(&self) -> &[T] {
        match self {
            DropOutcome::Reordered(items) => items,
            DropOutcome::Unchanged { items, .. } => items,
        }
    }

    pub fn into_items(self) -> Vec<T> {
        match self {
            DropOutcome::Reordered(items) => items,
            DropOutcome::Unchanged { items, .. } => items,
        }
    }

    pub fn no_op_reason(&self) -> Option<NoOpReason> {
        match self {
            DropOutcome::Reordered(_) => None,
            DropOutcome::Unchanged { reason, .. } => Some(*reason),
        }
    }
}

/// Drag-and-drop reorder state machine with optional persistence
#[derive(Debug)]
pub struct OrderedCollectionManager<S> {
    store: S,
    storage_key: Option<String>,
    session: DragSession,
}

impl<S: KeyValueStore> OrderedCollectionManager<S> {
    /// Creates a manager that never persists
    pub fn new(store: S) -> Self {
        Self {
            store,
            storage_key: None,
            session: DragSession::new(),
        }
    }

    /// Creates a manager that persists every reorder under `key`
    pub fn with_storage_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            storage_key: Some(key.into()),
            session: DragSession::new(),
        }
    }

    pub fn storage_key(&self) -> Option<&str> {
        self.storage_key.as_deref()
    }

    pub fn session(&self) -> &DragSession {
        &self.session
    }

    pub fn dragged_id(&self) -> Option<&ItemId> {
        self.session.dragged_id.as_ref()
    }

    pub fn drag_over_id(&self) -> Option<&ItemId> {
        self.session.drag_over_id.as_ref()
    }

    /// True if `id` is the item being dragged
    pub fn is_dragging(&self, id: &ItemId) -> bool {
        self.dragged_id() == Some(id)
    }

    /// True if `id` is the current hover target
    pub fn is_drag_over(&self, id: &ItemId) -> bool {
        self.drag_over_id() == Some(id)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Starts dragging `id`
    ///
    /// The ID is not checked against any list; an unknown ID simply makes
    /// the eventual drop a no-op.
    pub fn begin_drag(&mut self, id: ItemId) -> DropEffect {
        tracing::debug!(dragged = %id, "drag started");
        self.session.start(id);
        DropEffect::Move
    }

    /// Records `id` as the current hover target
    pub fn drag_over(&mut self, id: ItemId) {
        if self.drag_over_id() != Some(&id) {
            tracing::trace!(over = %id, "drag over");
        }
        self.session.hover(id);
    }

    /// Pointer left a drop zone: clears the hover target, keeps the drag
    pub fn cancel_drag(&mut self) {
        self.session.leave();
    }

    /// Gesture ended without a drop
    pub fn end_drag(&mut self) {
        if !self.session.is_idle() {
            tracing::debug!("drag ended without drop");
        }
        self.session.clear();
    }

    /// Drops the dragged item onto `target`
    ///
    /// The dragged item is removed and re-inserted at the target's former
    /// index, then every `order` is set to its position. If a storage key is
    /// configured the new list is written before returning. The session is
    /// cleared on every path, including a failed write.
    pub fn drop<T>(&mut self, items: &[T], target: &ItemId) -> Result<DropOutcome<T>, PersistError>
    where
        T: Orderable + Serialize + Clone,
    {
        let (from, to) = match self.resolve(items, target) {
            Ok(positions) => positions,
            Err(reason) => {
                tracing::debug!(drop_target = %target, reason = reason.describe(), "drop ignored");
                self.session.clear();
                return Ok(DropOutcome::Unchanged {
                    items: items.to_vec(),
                    reason,
                });
            }
        };

        let mut next = items.to_vec();
        reorder::move_to(&mut next, from, to);
        reorder::normalize(&mut next);

        let written = self.persist(&next);
        self.session.clear();
        written?;

        tracing::debug!(from, to, drop_target = %target, "items reordered");
        Ok(DropOutcome::Reordered(next))
    }

    /// Dispatches one input-surface event
    ///
    /// Returns the drop outcome for [`DragEvent::Drop`], `None` otherwise.
    pub fn apply<T>(
        &mut self,
        items: &[T],
        event: DragEvent,
    ) -> Result<Option<DropOutcome<T>>, PersistError>
    where
        T: Orderable + Serialize + Clone,
    {
        match event {
            DragEvent::DragStart { id } => {
                self.begin_drag(id);
            }
            DragEvent::DragOver { id } => self.drag_over(id),
            DragEvent::DragLeave => self.cancel_drag(),
            DragEvent::DragEnd => self.end_drag(),
            DragEvent::Drop { target } => return self.drop(items, &target).map(Some),
        }
        Ok(None)
    }

    /// Loads the persisted order, falling back to `defaults`
    pub fn load<T: DeserializeOwned>(&self, defaults: Vec<T>) -> Result<Vec<T>, PersistError> {
        let Some(key) = self.storage_key.as_deref() else {
            return Ok(defaults);
        };

        let stored = self.store.get(key).map_err(|source| PersistError::Read {
            key: key.to_string(),
            source,
        })?;

        match stored {
            Some(json) => serde_json::from_str(&json).map_err(|source| PersistError::Malformed {
                key: key.to_string(),
                source,
            }),
            None => Ok(defaults),
        }
    }

    /// Replaces the persisted order wholesale
    pub fn save<T: Serialize>(&mut self, items: &[T]) -> Result<(), PersistError> {
        self.persist(items)
    }

    /// Normalizes `defaults`, persists them and returns them
    pub fn reset<T>(&mut self, mut defaults: Vec<T>) -> Result<Vec<T>, PersistError>
    where
        T: Orderable + Serialize,
    {
        reorder::normalize(&mut defaults);
        self.persist(&defaults)?;
        Ok(defaults)
    }

    /// Checks the guards and returns (dragged index, target index)
    fn resolve<T: Orderable>(
        &self,
        items: &[T],
        target: &ItemId,
    ) -> Result<(usize, usize), NoOpReason> {
        let dragged = self.dragged_id().ok_or(NoOpReason::NotDragging)?;
        if dragged == target {
            return Err(NoOpReason::DroppedOnSelf);
        }

        let from = reorder::position_of(items, dragged).ok_or(NoOpReason::DraggedMissing)?;
        let to = reorder::position_of(items, target).ok_or(NoOpReason::TargetMissing)?;

        if items[from].is_locked() || items[to].is_locked() {
            return Err(NoOpReason::Locked);
        }

        Ok((from, to))
    }

    fn persist<T: Serialize>(&mut self, items: &[T]) -> Result<(), PersistError> {
        let Some(key) = self.storage_key.as_deref() else {
            return Ok(());
        };

        let json = serde_json::to_string(items)?;
        self.store.set(key, &json).map_err(|source| PersistError::Write {
            key: key.to_string(),
            source,
        })?;

        tracing::info!(key, bytes = json.len(), "order persisted");
        Ok(())
    }
}
