//! Domain models for reorder
//!
//! Contains the ordering logic without any I/O concerns.

mod id;
mod item;
mod session;
mod event;
pub mod reorder;

pub use id::{ItemId, IdError};
pub use item::{Item, Orderable};
pub use session::{DragSession, DragState};
pub use event::{DragEvent, DropEffect};
