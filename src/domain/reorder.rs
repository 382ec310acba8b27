//! List reordering primitives
//!
//! Pure functions over slices of [`Orderable`] items. Nothing here does I/O
//! or knows about drag sessions; see [`crate::manager`] for that.
//!
//! When a caller supplies duplicate IDs, lookups resolve to the first
//! matching index. Use [`first_duplicate`] to detect that case up front.

use std::collections::HashSet;

use super::id::ItemId;
use super::item::Orderable;

/// Returns the index of the first item with the given ID
pub fn position_of<T: Orderable>(items: &[T], id: &ItemId) -> Option<usize> {
    items.iter().position(|item| item.id() == id)
}

/// Moves the element at `from` so it lands at index `to`
///
/// The element is removed first and then inserted at `to`, which shifts
/// everything between the two positions by one. This is a move, not a swap.
/// Panics if either index is out of bounds.
pub fn move_to<T>(items: &mut Vec<T>, from: usize, to: usize) {
    let moved = items.remove(from);
    items.insert(to, moved);
}

/// Reassigns `order = index` for every item
pub fn normalize<T: Orderable>(items: &mut [T]) {
    for (index, item) in items.iter_mut().enumerate() {
        item.set_order(index as u32);
    }
}

/// Returns true if every item's `order` matches its position
pub fn is_normalized<T: Orderable>(items: &[T]) -> bool {
    items
        .iter()
        .enumerate()
        .all(|(index, item)| item.order() as usize == index)
}

/// Returns the first ID that appears more than once
pub fn first_duplicate<T: Orderable>(items: &[T]) -> Option<&ItemId> {
    let mut seen = HashSet::new();
    items.iter().map(|item| item.id()).find(|id| !seen.insert(*id))
}
