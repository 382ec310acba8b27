//! Orderable items
//!
//! Anything shown in a manually ordered list implements [`Orderable`].
//! [`Item`] is the concrete record used by the CLI and the persisted
//! snapshots.

use serde::{Deserialize, Serialize};

use super::id::ItemId;

/// An entity that takes part in manual ordering
pub trait Orderable {
    /// Unique identifier within its collection
    fn id(&self) -> &ItemId;

    /// Display position
    fn order(&self) -> u32;

    /// Overwrites the display position
    fn set_order(&mut self, order: u32);

    /// Locked items can be neither dragged nor dropped onto
    fn is_locked(&self) -> bool {
        false
    }
}

/// A named, orderable entry in a collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,

    pub order: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "is_false")]
    pub locked: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl Item {
    /// Creates an unnamed, unlocked item
    pub fn new(id: ItemId, order: u32) -> Self {
        Self {
            id,
            order,
            name: None,
            locked: false,
        }
    }

    /// Sets the display name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Marks the item as locked
    pub fn locked(mut self) -> Self {
        self.locked = true;
        self
    }
}

impl Orderable for Item {
    fn id(&self) -> &ItemId {
        &self.id
    }

    fn order(&self) -> u32 {
        self.order
    }

    fn set_order(&mut self, order: u32) {
        self.order = order;
    }

    fn is_locked(&self) -> bool {
        self.locked
    }
}
