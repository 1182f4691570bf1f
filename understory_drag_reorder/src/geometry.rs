// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geometric queries used to start and track a drag.
//!
//! Everything here is stateless. Bounds and points are expected in one shared
//! coordinate space, typically the local space of the list widget.
//!
//! ## Threshold
//!
//! A press becomes a drag once the pointer leaves a rectangle centered on the
//! press point. Its width is twice the horizontal drag distance. Its height is
//! twice the smaller of the vertical drag distance and the press point's
//! distance to the nearer edge of the pressed row. Pressing close to a row edge
//! therefore shrinks the vertical dead zone, so a quick move into the adjacent
//! row starts a drag instead of being swallowed.
//!
//! ```
//! use kurbo::{Point, Rect, Size};
//! use understory_drag_reorder::geometry;
//!
//! let row = Rect::new(0.0, 0.0, 200.0, 20.0);
//! let press = Point::new(50.0, 2.0);
//! let size = geometry::drag_threshold(row, press, Size::new(4.0, 4.0));
//! assert_eq!(size, Size::new(8.0, 4.0));
//!
//! assert!(!geometry::has_crossed_threshold(press, Point::new(53.0, 3.0), size));
//! assert!(geometry::has_crossed_threshold(press, Point::new(50.0, 5.0), size));
//! ```

use kurbo::{Point, Rect, Size};

/// Hit-test chain of the host toolkit, used to detect presses on scrollbars.
pub trait VisualTree {
    /// Handle to a visual element.
    type Visual: Copy;

    /// Topmost visual under `point`, or `None` if nothing is hit.
    fn hit_test(&self, point: Point) -> Option<Self::Visual>;

    /// Parent of `visual`, or `None` at the root.
    fn parent_of(&self, visual: Self::Visual) -> Option<Self::Visual>;

    /// Returns `true` if `visual` is a scrollbar (or a scrollbar part that the
    /// toolkit reports as such).
    fn is_scrollbar(&self, visual: Self::Visual) -> bool;
}

/// Returns `true` if `point` lies inside `bounds`, edges included.
#[must_use]
pub fn is_pointer_over_visual(bounds: Rect, point: Point) -> bool {
    point.x >= bounds.x0 && point.x <= bounds.x1 && point.y >= bounds.y0 && point.y <= bounds.y1
}

/// Returns `true` if the visual hit at `point` is a scrollbar or has a scrollbar ancestor.
pub fn is_pointer_over_scrollbar<T: VisualTree + ?Sized>(tree: &T, point: Point) -> bool {
    let mut current = tree.hit_test(point);
    while let Some(visual) = current {
        if tree.is_scrollbar(visual) {
            return true;
        }
        current = tree.parent_of(visual);
    }
    false
}

/// Size of the threshold rectangle for a press at `press` inside `row`.
///
/// `distance` is the minimum horizontal and vertical drag distance. An infinite
/// component yields an infinite extent, which disables that axis.
#[must_use]
pub fn drag_threshold(row: Rect, press: Point, distance: Size) -> Size {
    let to_top = (press.y - row.y0).abs();
    let to_bottom = (row.y1 - press.y).abs();
    let vertical = distance.height.min(to_top.min(to_bottom));
    Size::new(distance.width * 2.0, vertical * 2.0)
}

/// The threshold rectangle: `size` centered on `press`.
#[must_use]
pub fn threshold_rect(press: Point, size: Size) -> Rect {
    Rect::from_center_size(press, size)
}

/// Returns `true` once `current` lies outside the threshold rectangle around `press`.
///
/// Points on the rectangle's edge are still inside.
#[must_use]
pub fn has_crossed_threshold(press: Point, current: Point, size: Size) -> bool {
    let half_w = size.width / 2.0;
    let half_h = size.height / 2.0;
    (current.x - press.x).abs() > half_w || (current.y - press.y).abs() > half_h
}
