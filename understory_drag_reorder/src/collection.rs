// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The ordered collection a reorder drop mutates.
//!
//! The controller only needs an ordered, index-addressable sequence that can
//! locate an item by identity, move an item, and insert one. [`ReorderCollection`]
//! captures that; it is implemented for `Vec` and for [`ObservableList`], which
//! additionally records change notifications for the list widget.
//!
//! Items are compared by identity ([`ItemRef::same_item`]), never by value: two
//! rules that happen to render identically must remain distinguishable.

use alloc::rc::Rc;
use alloc::sync::Arc;
use alloc::vec::Vec;

/// A cheap handle to a list item with identity semantics.
pub trait ItemRef: Clone {
    /// Returns `true` if `self` and `other` refer to the same item.
    fn same_item(&self, other: &Self) -> bool;
}

impl<T: ?Sized> ItemRef for Rc<T> {
    fn same_item(&self, other: &Self) -> bool {
        Self::ptr_eq(self, other)
    }
}

impl<T: ?Sized> ItemRef for Arc<T> {
    fn same_item(&self, other: &Self) -> bool {
        Self::ptr_eq(self, other)
    }
}

impl<T: ?Sized> ItemRef for &T {
    fn same_item(&self, other: &Self) -> bool {
        core::ptr::eq(*self, *other)
    }
}

macro_rules! impl_item_ref_for_ids {
    ($($t:ty),*) => {
        $(
            impl ItemRef for $t {
                fn same_item(&self, other: &Self) -> bool {
                    self == other
                }
            }
        )*
    };
}

// Integer keys are identities in their own right.
impl_item_ref_for_ids!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

/// An ordered, index-addressable collection that a drop can reorder.
pub trait ReorderCollection<I> {
    /// Number of items.
    fn len(&self) -> usize;

    /// Returns `true` if there are no items.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The item at `index`.
    fn get(&self, index: usize) -> Option<&I>;

    /// Position of `item`, or `None` if it is not a member.
    fn index_of(&self, item: &I) -> Option<usize>;

    /// Move the item at `from` so that it ends up at `to`.
    ///
    /// The length is unchanged and every other item keeps its relative order.
    ///
    /// # Panics
    ///
    /// Panics if `from` or `to` is out of bounds.
    fn move_item(&mut self, from: usize, to: usize);

    /// Insert `item` at `index`, shifting later items back.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    fn insert(&mut self, index: usize, item: I);
}

fn move_in_slice<I>(items: &mut [I], from: usize, to: usize) {
    if from < to {
        items[from..=to].rotate_left(1);
    } else if to < from {
        items[to..=from].rotate_right(1);
    }
}

impl<I: ItemRef> ReorderCollection<I> for Vec<I> {
    fn len(&self) -> usize {
        Self::len(self)
    }

    fn get(&self, index: usize) -> Option<&I> {
        self.as_slice().get(index)
    }

    fn index_of(&self, item: &I) -> Option<usize> {
        self.iter().position(|candidate| candidate.same_item(item))
    }

    fn move_item(&mut self, from: usize, to: usize) {
        move_in_slice(self, from, to);
    }

    fn insert(&mut self, index: usize, item: I) {
        Self::insert(self, index, item);
    }
}

/// A structural change recorded by [`ObservableList`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CollectionChange {
    /// An item moved from one index to another.
    Moved {
        /// Index before the move.
        from: usize,
        /// Index after the move.
        to: usize,
    },
    /// An item was inserted at an index.
    Inserted {
        /// Index of the new item.
        index: usize,
    },
}

/// A `Vec`-backed list that records structural changes for its observers.
///
/// The list widget drains [`ObservableList::take_changes`] after each drop to
/// update its rows incrementally.
#[derive(Clone, Debug)]
pub struct ObservableList<I> {
    items: Vec<I>,
    changes: Vec<CollectionChange>,
}

impl<I> Default for ObservableList<I> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            changes: Vec::new(),
        }
    }
}

impl<I> From<Vec<I>> for ObservableList<I> {
    fn from(items: Vec<I>) -> Self {
        Self {
            items,
            changes: Vec::new(),
        }
    }
}

impl<I> ObservableList<I> {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `item`, recording an insertion.
    pub fn push(&mut self, item: I) {
        self.changes.push(CollectionChange::Inserted {
            index: self.items.len(),
        });
        self.items.push(item);
    }

    /// The items in order.
    pub fn as_slice(&self) -> &[I] {
        &self.items
    }

    /// Iterate over the items in order.
    pub fn iter(&self) -> core::slice::Iter<'_, I> {
        self.items.iter()
    }

    /// Changes recorded since the last call, oldest first.
    pub fn take_changes(&mut self) -> Vec<CollectionChange> {
        core::mem::take(&mut self.changes)
    }

    /// Consume the list and return its items.
    pub fn into_inner(self) -> Vec<I> {
        self.items
    }
}

impl<I: ItemRef> ReorderCollection<I> for ObservableList<I> {
    fn len(&self) -> usize {
        self.items.len()
    }

    fn get(&self, index: usize) -> Option<&I> {
        self.items.get(index)
    }

    fn index_of(&self, item: &I) -> Option<usize> {
        self.items.index_of(item)
    }

    fn move_item(&mut self, from: usize, to: usize) {
        move_in_slice(&mut self.items, from, to);
        self.changes.push(CollectionChange::Moved { from, to });
    }

    fn insert(&mut self, index: usize, item: I) {
        self.items.insert(index, item);
        self.changes.push(CollectionChange::Inserted { index });
    }
}

/// Move `source` to the position currently held by `target`.
///
/// This is the row-level "drop onto an item" reorder. Returns `true` if the
/// collection changed. Nothing happens when both refer to the same item or when
/// either is not a member.
pub fn move_by_identity<I: ItemRef, C: ReorderCollection<I> + ?Sized>(
    collection: &mut C,
    source: &I,
    target: &I,
) -> bool {
    if source.same_item(target) {
        return false;
    }
    match (collection.index_of(source), collection.index_of(target)) {
        (Some(from), Some(to)) => {
            collection.move_item(from, to);
            true
        }
        _ => false,
    }
}
