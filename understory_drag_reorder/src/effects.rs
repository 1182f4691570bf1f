// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag-and-drop effects.

bitflags::bitflags! {
    /// Outcome classification of a drag-and-drop operation.
    ///
    /// The same set is used for the effects a drag source allows, the effect a
    /// target proposes during drag-over, and the effect a drop reports back.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct DragEffects: u8 {
        /// The data is copied to the target.
        const COPY   = 0b0000_0001;
        /// The data is moved to the target.
        const MOVE   = 0b0000_0010;
        /// The data is linked from the target.
        const LINK   = 0b0000_0100;
        /// The target scrolls while the drag hovers it.
        const SCROLL = 0b1000_0000;
    }
}

impl DragEffects {
    /// Nothing happened: the drop was rejected or the drag was cancelled.
    pub const NONE: Self = Self::empty();

    /// Effects offered by a reorder drag: the row can be moved or linked.
    pub const REORDER: Self = Self::MOVE.union(Self::LINK);

    /// Returns `true` if the drop had no effect.
    #[must_use]
    pub const fn is_none(self) -> bool {
        self.is_empty()
    }
}

impl Default for DragEffects {
    fn default() -> Self {
        Self::NONE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reorder_offers_move_and_link() {
        assert!(DragEffects::REORDER.contains(DragEffects::MOVE));
        assert!(DragEffects::REORDER.contains(DragEffects::LINK));
        assert!(!DragEffects::REORDER.contains(DragEffects::COPY));
    }

    #[test]
    fn default_is_none() {
        assert!(DragEffects::default().is_none());
        assert!(!DragEffects::MOVE.is_none());
    }
}
