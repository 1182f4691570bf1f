// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The contract a list widget fulfils to be managed by the controller.

use kurbo::{Point, Rect, Size};

use crate::collection::ReorderCollection;
use crate::config::DEFAULT_DRAG_DISTANCE;
use crate::geometry::VisualTree;
use crate::locator::ContainerGenerator;
use crate::proxy::ProxyLayer;

/// A list widget whose rows can be reordered by dragging.
///
/// Coordinates are in the list's local space. The supertraits cover hit testing
/// ([`VisualTree`]), row realization ([`ContainerGenerator`]), and the floating
/// proxy layer ([`ProxyLayer`]); this trait adds pointer, selection, and
/// collection access.
pub trait ListHost:
    VisualTree + ContainerGenerator + ProxyLayer<<Self as ContainerGenerator>::Row>
{
    /// Current pointer position in list-local coordinates.
    ///
    /// This is queried directly, not taken from event arguments, because some
    /// platforms report stale positions from inside a native drag loop.
    fn pointer_position(&self) -> Point;

    /// Returns `true` while the primary pointer button is held.
    fn is_primary_button_pressed(&self) -> bool;

    /// Bounds of the list itself in list-local coordinates.
    fn list_bounds(&self) -> Rect;

    /// The platform's minimum drag distance.
    fn system_drag_distance(&self) -> Size {
        DEFAULT_DRAG_DISTANCE
    }

    /// The data item at `index`.
    fn item_at(&self, index: usize) -> Option<Self::Item>;

    /// Index of the selected item, if any.
    fn selected_index(&self) -> Option<usize>;

    /// Select the item at `index`.
    fn select_index(&mut self, index: usize);

    /// The selected data item, if any.
    fn selected_item(&self) -> Option<Self::Item>;

    /// Select `item`.
    fn select_item(&mut self, item: &Self::Item);

    /// The collection backing the list, or `None` if it cannot be reordered.
    fn items_source(&mut self) -> Option<&mut dyn ReorderCollection<Self::Item>>;

    /// Allow or refuse drops on the list.
    fn set_allow_drop(&mut self, allow: bool);
}

/// Drag proxy type of a [`ListHost`].
pub type ProxyOf<L> = <L as ProxyLayer<<L as ContainerGenerator>::Row>>::Proxy;
