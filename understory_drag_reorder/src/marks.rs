// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-row drag markers, kept in a side table owned by the controller.
//!
//! Rendering reads [`RowMarks::get`] to style the row being dragged and the row
//! currently under the drag cursor. Marks live outside the application's data,
//! so setting them never touches the items themselves.
//!
//! Rows whose marks changed are queued and can be drained with
//! [`RowMarks::take_changed`] to repaint only those rows.

use core::hash::Hash;

use hashbrown::HashMap;
use smallvec::SmallVec;

bitflags::bitflags! {
    /// Drag-related state of a single row.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct RowDragState: u8 {
        /// The row is the source of the active drag.
        const DRAGGED     = 0b0000_0001;
        /// The drag cursor is over the row.
        const DROP_TARGET = 0b0000_0010;
    }
}

/// Side table from row identity to [`RowDragState`].
#[derive(Clone, Debug)]
pub struct RowMarks<R> {
    states: HashMap<R, RowDragState>,
    changed: SmallVec<[R; 4]>,
}

impl<R> Default for RowMarks<R> {
    fn default() -> Self {
        Self {
            states: HashMap::new(),
            changed: SmallVec::new(),
        }
    }
}

impl<R: Copy + Eq + Hash> RowMarks<R> {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state of `row`; unmarked rows report an empty state.
    pub fn get(&self, row: R) -> RowDragState {
        self.states.get(&row).copied().unwrap_or_default()
    }

    /// Set or clear `flag` on `row`. Returns `true` if the state changed.
    pub fn set(&mut self, row: R, flag: RowDragState, value: bool) -> bool {
        let before = self.get(row);
        let mut after = before;
        after.set(flag, value);
        if after == before {
            return false;
        }
        if after.is_empty() {
            self.states.remove(&row);
        } else {
            self.states.insert(row, after);
        }
        if !self.changed.contains(&row) {
            self.changed.push(row);
        }
        true
    }

    /// Rows that currently carry `flag`.
    pub fn rows_with(&self, flag: RowDragState) -> impl Iterator<Item = R> + '_ {
        self.states
            .iter()
            .filter(move |(_, state)| state.contains(flag))
            .map(|(row, _)| *row)
    }

    /// Returns `true` if no row carries any mark.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Rows whose state changed since the last call, in first-change order.
    pub fn take_changed(&mut self) -> SmallVec<[R; 4]> {
        core::mem::take(&mut self.changed)
    }

    /// Clear every mark, queueing the affected rows as changed.
    pub fn clear(&mut self) {
        for row in self.states.keys() {
            if !self.changed.contains(row) {
                self.changed.push(*row);
            }
        }
        self.states.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_reports_only_real_changes() {
        let mut marks: RowMarks<u32> = RowMarks::new();
        assert!(marks.set(1, RowDragState::DROP_TARGET, true));
        assert!(!marks.set(1, RowDragState::DROP_TARGET, true));
        assert!(marks.set(1, RowDragState::DRAGGED, true));
        assert_eq!(
            marks.get(1),
            RowDragState::DRAGGED | RowDragState::DROP_TARGET
        );
        assert!(marks.set(1, RowDragState::DROP_TARGET, false));
        assert_eq!(marks.get(1), RowDragState::DRAGGED);
        assert!(!marks.set(2, RowDragState::DRAGGED, false));
        assert_eq!(marks.get(2), RowDragState::empty());
    }

    #[test]
    fn changed_rows_are_queued_once() {
        let mut marks: RowMarks<u32> = RowMarks::new();
        marks.set(3, RowDragState::DRAGGED, true);
        marks.set(5, RowDragState::DROP_TARGET, true);
        marks.set(3, RowDragState::DROP_TARGET, true);
        assert_eq!(marks.take_changed().as_slice(), &[3, 5]);
        assert!(marks.take_changed().is_empty());
    }

    #[test]
    fn cleared_rows_drop_out_of_the_table() {
        let mut marks: RowMarks<u32> = RowMarks::new();
        marks.set(7, RowDragState::DROP_TARGET, true);
        marks.set(8, RowDragState::DRAGGED, true);
        let _ = marks.take_changed();

        assert_eq!(
            marks.rows_with(RowDragState::DRAGGED).collect::<alloc::vec::Vec<_>>(),
            [8]
        );
        marks.clear();
        assert!(marks.is_empty());
        let mut changed = marks.take_changed();
        changed.sort_unstable();
        assert_eq!(changed.as_slice(), &[7, 8]);
    }
}
