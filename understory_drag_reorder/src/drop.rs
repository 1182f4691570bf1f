// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drop resolution and the drop-handler override.

use crate::collection::ReorderCollection;
use crate::effects::DragEffects;

/// Arguments of a drop handed to a caller-supplied handler.
///
/// A handler fully owns the mutation: the controller does not touch `items`
/// when a handler is installed.
pub struct ProcessDrop<'a, I> {
    /// Collection backing the list that received the drop.
    pub items: &'a mut dyn ReorderCollection<I>,
    /// The dropped item.
    pub item: &'a I,
    /// Current position of the item in `items`, or `None` if it comes from elsewhere.
    pub old_index: Option<usize>,
    /// Resolved target position.
    pub new_index: usize,
    /// Effects the drag source allows.
    pub allowed_effects: DragEffects,
}

impl<I> core::fmt::Debug for ProcessDrop<'_, I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ProcessDrop")
            .field("len", &self.items.len())
            .field("old_index", &self.old_index)
            .field("new_index", &self.new_index)
            .field("allowed_effects", &self.allowed_effects)
            .finish_non_exhaustive()
    }
}

/// Caller-supplied drop handler; returns the effect it performed.
pub type DropHandler<I> = dyn FnMut(&mut ProcessDrop<'_, I>) -> DragEffects;

/// Resolve the target index of a drop.
///
/// - `len`: length of the collection.
/// - `old_index`: position of the dropped item, `None` for a foreign item.
/// - `under_cursor`: index of the row under the cursor, if any.
///
/// With no row under the cursor, an empty collection takes the item at 0 and a
/// foreign item is appended. A native item dropped onto empty space is rejected
/// (`None`), as is a target outside the collection.
pub fn resolve_drop_target(
    len: usize,
    old_index: Option<usize>,
    under_cursor: Option<usize>,
) -> Option<usize> {
    let target = match (under_cursor, old_index) {
        (Some(index), _) => index,
        (None, _) if len == 0 => 0,
        (None, None) => len,
        (None, Some(_)) => return None,
    };
    let in_bounds = match old_index {
        Some(_) => target < len,
        None => target <= len,
    };
    in_bounds.then_some(target)
}
