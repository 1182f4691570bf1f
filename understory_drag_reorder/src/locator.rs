// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mapping between list indices, data items, and realized rows.
//!
//! Lists typically realize a visual container ("row") per data item lazily.
//! [`RowLocator`] wraps the host's [`ContainerGenerator`] and answers `None`
//! whenever the containers are not fully realized, for example in the middle of
//! a layout pass. Callers treat `None` as "unknown, retry later" rather than as
//! "no such row".

use core::hash::Hash;

use kurbo::{Point, Rect};

use crate::collection::ItemRef;
use crate::geometry;

/// Realization status of a list's row containers.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GeneratorStatus {
    /// No containers have been generated yet.
    NotStarted,
    /// Containers are being generated or laid out.
    Generating,
    /// All containers for the current items are realized and laid out.
    Realized,
    /// Container generation failed.
    Error,
}

/// Host-side container generation for a list.
pub trait ContainerGenerator {
    /// Data item type stored in the list.
    type Item: ItemRef + 'static;
    /// Identity of a realized row container.
    type Row: Copy + Eq + Hash;

    /// Current realization status.
    fn status(&self) -> GeneratorStatus;

    /// Number of data items in the list.
    fn item_count(&self) -> usize;

    /// The realized row for the item at `index`, if any.
    fn container_from_index(&self, index: usize) -> Option<Self::Row>;

    /// The realized row displaying `item`, if any.
    fn container_from_item(&self, item: &Self::Item) -> Option<Self::Row>;

    /// Bounds of `row` in list-local coordinates.
    fn row_bounds(&self, row: Self::Row) -> Rect;
}

/// Stateless row lookup over a [`ContainerGenerator`].
#[derive(Debug)]
pub struct RowLocator<'a, G: ?Sized> {
    generator: &'a G,
}

impl<G: ?Sized> Clone for RowLocator<'_, G> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<G: ?Sized> Copy for RowLocator<'_, G> {}

impl<'a, G: ContainerGenerator + ?Sized> RowLocator<'a, G> {
    /// Create a locator over `generator`.
    pub fn new(generator: &'a G) -> Self {
        Self { generator }
    }

    fn realized(&self) -> bool {
        self.generator.status() == GeneratorStatus::Realized
    }

    /// The row at `index`, or `None` if it is not realized (yet).
    pub fn row_at_index(&self, index: usize) -> Option<G::Row> {
        if !self.realized() {
            return None;
        }
        self.generator.container_from_index(index)
    }

    /// The row displaying `item`, or `None` if it is not realized (yet).
    pub fn row_for_item(&self, item: &G::Item) -> Option<G::Row> {
        if !self.realized() {
            return None;
        }
        self.generator.container_from_item(item)
    }

    /// Bounds of the row at `index` in list-local coordinates.
    pub fn bounds_at_index(&self, index: usize) -> Option<Rect> {
        self.row_at_index(index)
            .map(|row| self.generator.row_bounds(row))
    }

    /// Index of the first realized row (in visual order) whose bounds contain `point`.
    ///
    /// Rows that are not realized are skipped. This is a linear scan; lists of the
    /// size users reorder by hand are small enough that it never shows up.
    pub fn index_under_point(&self, point: Point) -> Option<usize> {
        (0..self.generator.item_count()).find(|&index| {
            self.bounds_at_index(index)
                .is_some_and(|bounds| geometry::is_pointer_over_visual(bounds, point))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    struct Rows {
        status: GeneratorStatus,
        items: Vec<&'static str>,
        // `None` marks a virtualized row with no container.
        rows: Vec<Option<Rect>>,
    }

    impl ContainerGenerator for Rows {
        type Item = &'static str;
        type Row = usize;

        fn status(&self) -> GeneratorStatus {
            self.status
        }

        fn item_count(&self) -> usize {
            self.items.len()
        }

        fn container_from_index(&self, index: usize) -> Option<usize> {
            self.rows.get(index).copied().flatten().map(|_| index)
        }

        fn container_from_item(&self, item: &&'static str) -> Option<usize> {
            let index = self.items.iter().position(|i| core::ptr::eq(*i, *item))?;
            self.container_from_index(index)
        }

        fn row_bounds(&self, row: usize) -> Rect {
            self.rows[row].unwrap_or(Rect::ZERO)
        }
    }

    fn stacked(n: usize) -> Rows {
        Rows {
            status: GeneratorStatus::Realized,
            items: ["a", "b", "c", "d", "e"][..n].to_vec(),
            rows: (0..n)
                .map(|i| {
                    let y = i as f64 * 20.0;
                    Some(Rect::new(0.0, y, 100.0, y + 20.0))
                })
                .collect(),
        }
    }

    #[test]
    fn lookups_fail_until_realized() {
        let mut rows = stacked(3);
        rows.status = GeneratorStatus::Generating;
        let locator = RowLocator::new(&rows);
        assert_eq!(locator.row_at_index(0), None);
        assert_eq!(locator.row_for_item(&rows.items[1]), None);
        assert_eq!(locator.index_under_point(Point::new(5.0, 5.0)), None);

        rows.status = GeneratorStatus::Realized;
        let locator = RowLocator::new(&rows);
        assert_eq!(locator.row_at_index(0), Some(0));
        assert_eq!(locator.row_for_item(&rows.items[1]), Some(1));
    }

    #[test]
    fn index_under_point_prefers_first_row_on_shared_edge() {
        let rows = stacked(3);
        let locator = RowLocator::new(&rows);
        assert_eq!(locator.index_under_point(Point::new(5.0, 25.0)), Some(1));
        // y = 20 is the bottom edge of row 0 and the top edge of row 1.
        assert_eq!(locator.index_under_point(Point::new(5.0, 20.0)), Some(0));
        assert_eq!(locator.index_under_point(Point::new(5.0, 75.0)), None);
        assert_eq!(locator.index_under_point(Point::new(150.0, 5.0)), None);
    }

    #[test]
    fn unrealized_rows_are_skipped() {
        let mut rows = stacked(3);
        rows.rows[0] = None;
        let locator = RowLocator::new(&rows);
        assert_eq!(locator.row_at_index(0), None);
        assert_eq!(locator.index_under_point(Point::new(5.0, 5.0)), None);
        assert_eq!(locator.index_under_point(Point::new(5.0, 45.0)), Some(2));
    }
}
