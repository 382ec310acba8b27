//! Input surface events
//!
//! Semantic versions of the native drag events. Scripts for
//! `reorder replay` are JSONL files of these, one per line:
//!
//! ```text
//! {"event":"drag_start","id":"w3"}
//! {"event":"drag_over","id":"w1"}
//! {"event":"drop","target":"w1"}
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use super::id::ItemId;

/// One event from the render/input surface
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum DragEvent {
    DragStart { id: ItemId },
    DragOver { id: ItemId },
    DragLeave,
    Drop { target: ItemId },
    DragEnd,
}

impl DragEvent {
    pub fn name(&self) -> &'static str {
        match self {
            DragEvent::DragStart { .. } => "drag_start",
            DragEvent::DragOver { .. } => "drag_over",
            DragEvent::DragLeave => "drag_leave",
            DragEvent::Drop { .. } => "drop",
            DragEvent::DragEnd => "drag_end",
        }
    }
}

impl fmt::Display for DragEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DragEvent::DragStart { id } | DragEvent::DragOver { id } => {
                write!(f, "{} {}", self.name(), id)
            }
            DragEvent::Drop { target } => write!(f, "{} {}", self.name(), target),
            DragEvent::DragLeave | DragEvent::DragEnd => f.write_str(self.name()),
        }
    }
}

/// Transfer intent signalled to the input surface when a drag begins
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DropEffect {
    Move,
}
