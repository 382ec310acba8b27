//! Drag session state
//!
//! A session spans one pointer gesture: drag-start, any number of
//! drag-over/drag-leave events, then exactly one drop or drag-end.

use serde::Serialize;

use super::id::ItemId;

/// Coarse state of a drag session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DragState {
    Idle,
    Dragging,
}

/// Transient state owned by the manager for one gesture
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DragSession {
    /// Item currently being dragged
    pub dragged_id: Option<ItemId>,

    /// Item currently hovered as a drop target
    pub drag_over_id: Option<ItemId>,
}

impl DragSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DragState {
        if self.dragged_id.is_some() {
            DragState::Dragging
        } else {
            DragState::Idle
        }
    }

    pub fn is_idle(&self) -> bool {
        self.state() == DragState::Idle
    }

    /// Starts a gesture, overwriting any stale one
    pub fn start(&mut self, id: ItemId) {
        self.dragged_id = Some(id);
    }

    pub fn hover(&mut self, id: ItemId) {
        self.drag_over_id = Some(id);
    }

    /// Clears the hover target only
    pub fn leave(&mut self) {
        self.drag_over_id = None;
    }

    /// Returns to idle
    pub fn clear(&mut self) {
        self.dragged_id = None;
        self.drag_over_id = None;
    }
}
