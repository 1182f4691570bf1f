// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Floating drag proxy ("adorner") that mirrors the dragged row.
//!
//! The controller creates one proxy when a drag starts, moves it on every
//! drag-over, hides it when the pointer leaves the list, and destroys it when
//! the drag ends. A proxy never touches model state.

use kurbo::{Point, Size, Vec2};

/// A floating visual owned by the controller for the lifetime of one drag.
pub trait DragVisualProxy {
    /// Move the proxy to `offset`, relative to the list's origin.
    fn set_offset(&mut self, offset: Vec2);

    /// Show or hide the proxy without destroying it.
    fn set_visible(&mut self, visible: bool);

    /// Returns `true` if the proxy is currently shown.
    fn is_visible(&self) -> bool;

    /// Remove the proxy from its layer.
    fn destroy(self);
}

/// Factory for drag proxies, provided by the host's floating visual layer.
pub trait ProxyLayer<R> {
    /// Proxy type created by this layer.
    type Proxy: DragVisualProxy;

    /// Create a visible proxy mirroring `source`, `size` large, drawn at `opacity`.
    fn create_proxy(&mut self, source: R, size: Size, opacity: f64) -> Self::Proxy;
}

/// Offset of the proxy for the current pointer position.
///
/// The horizontal offset follows the pointer's horizontal delta since the press.
/// The vertical offset stays locked to the dragged row's origin plus the
/// pointer's vertical delta, so the proxy does not jump when the drag starts.
#[must_use]
pub fn proxy_offset(row_origin: Point, press: Point, pointer: Point) -> Vec2 {
    Vec2::new(pointer.x - press.x, row_origin.y + pointer.y - press.y)
}
