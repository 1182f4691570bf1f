// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_drag_reorder --heading-base-level=0

//! Understory Drag Reorder: drag-to-reorder for list-like UI.
//!
//! [`DragReorderController`] attaches to a list widget and lets the user reorder
//! its items by dragging rows. It owns the interaction state machine:
//!
//! - A press on a realized row (and not on a scrollbar) arms the controller.
//! - Moving past a drag threshold starts the host's native drag loop, with a
//!   semi-transparent proxy of the row following the pointer.
//! - While dragging, the row under the cursor carries a drop-target marker and
//!   the dragged row a dragged marker ([`RowDragState`]).
//! - A drop resolves to a target index and moves the item in the list's
//!   [`ReorderCollection`], unless a handler installed with
//!   [`DragReorderController::set_drop_handler`] takes over.
//!
//! The widget toolkit is abstracted behind [`ListHost`], which covers hit testing,
//! row realization, selection, the proxy layer, and the items source. The modal
//! drag loop is a [`DragLoop`] that reports drag events back through a
//! [`DragSession`].
//!
//! ## Drop resolution
//!
//! ```rust
//! use understory_drag_reorder::resolve_drop_target;
//!
//! // Dropping onto the row at index 0 of a four-item list.
//! assert_eq!(resolve_drop_target(4, Some(2), Some(0)), Some(0));
//! // A foreign item dropped onto empty space is appended.
//! assert_eq!(resolve_drop_target(4, None, None), Some(4));
//! // An item from this list dropped onto empty space is rejected.
//! assert_eq!(resolve_drop_target(4, Some(2), None), None);
//! ```
//!
//! Items are compared by identity, so the collection can hold handles such as
//! `Rc<T>`:
//!
//! ```rust
//! use std::rc::Rc;
//! use understory_drag_reorder::{ObservableList, CollectionChange, move_by_identity};
//!
//! let [a, b, c, d] = ["A", "B", "C", "D"].map(Rc::<str>::from);
//! let mut list = ObservableList::from(vec![a.clone(), b, c.clone(), d]);
//! assert!(move_by_identity(&mut list, &c, &a));
//!
//! let order: Vec<&str> = list.iter().map(|item| &**item).collect();
//! assert_eq!(order, ["C", "A", "B", "D"]);
//! assert_eq!(list.take_changes(), [CollectionChange::Moved { from: 2, to: 0 }]);
//! ```
//!
//! ## Features
//!
//! - `std` *(default)*: enables `std` in dependencies that support it.
//! - `libm`: `no_std` float support for `kurbo`.
//! - `tracing`: emit phase transitions and drop resolution as `tracing` events.

#![no_std]

extern crate alloc;

#[cfg(test)]
extern crate std;

mod collection;
mod config;
mod controller;
mod drop;
mod effects;
mod error;
pub mod geometry;
mod host;
mod locator;
mod marks;
mod proxy;
mod session;

#[cfg(test)]
mod test_host;

pub use collection::{
    CollectionChange, ItemRef, ObservableList, ReorderCollection, move_by_identity,
};
pub use config::{DEFAULT_DRAG_DISTANCE, DragReorderConfig};
pub use controller::{DragPhase, DragReorderController};
pub use drop::{DropHandler, ProcessDrop, resolve_drop_target};
pub use effects::DragEffects;
pub use error::{DragReorderError, UsageError};
pub use geometry::VisualTree;
pub use host::{ListHost, ProxyOf};
pub use locator::{ContainerGenerator, GeneratorStatus, RowLocator};
pub use marks::{RowDragState, RowMarks};
pub use proxy::{DragVisualProxy, ProxyLayer, proxy_offset};
pub use session::{DragLoop, DragSession};
