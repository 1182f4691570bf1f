// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The modal drag loop and the handle it uses to call back into the controller.
//!
//! Platform drag-and-drop is usually modal: the call that starts a drag only
//! returns once the drop or cancellation has happened, and drag-enter,
//! drag-over, drag-leave, and drop are dispatched from inside that call. The
//! controller models this as a single synchronous [`DragLoop::run`]. The host
//! implements the loop and re-enters the controller through [`DragSession`].
//!
//! A cancelled drag simply returns [`DragEffects::NONE`] from the loop; the
//! controller tears the drag down the same way in every case.

use core::any::Any;

use crate::controller::DragReorderController;
use crate::effects::DragEffects;
use crate::error::DragReorderError;
use crate::host::ListHost;

/// The host's native drag-and-drop loop.
pub trait DragLoop<L: ListHost> {
    /// Run a drag carrying `payload` until it is dropped or cancelled.
    ///
    /// Pointer updates are reported by calling the [`DragSession`] callbacks in
    /// the order the platform delivers them. Returns the final effect of the
    /// operation, [`DragEffects::NONE`] if it was cancelled or rejected.
    fn run(
        &mut self,
        session: &mut DragSession<'_, L>,
        payload: &L::Item,
        allowed: DragEffects,
    ) -> DragEffects;
}

/// Callback surface of an active drag.
///
/// The controller hands one to [`DragLoop::run`] for drags that start on its own
/// list. A list that only receives a drag started elsewhere gets one from
/// [`DragReorderController::drop_target`]; dropping that session clears the
/// drop-target marker however the drag ended.
#[derive(Debug)]
pub struct DragSession<'a, L: ListHost> {
    controller: &'a mut DragReorderController<L>,
}

impl<'a, L: ListHost> DragSession<'a, L> {
    pub(crate) fn new(controller: &'a mut DragReorderController<L>) -> Self {
        Self { controller }
    }

    /// The pointer entered the list.
    pub fn drag_enter(&mut self) {
        self.controller.handle_drag_enter();
    }

    /// The pointer moved over the list. Returns the proposed effect.
    pub fn drag_over(&mut self) -> DragEffects {
        self.controller.handle_drag_over()
    }

    /// The pointer left the list (or one of its parts).
    pub fn drag_leave(&mut self) {
        self.controller.handle_drag_leave();
    }

    /// The payload was dropped on the list.
    ///
    /// `payload` is whatever the drag source offered; anything other than the
    /// list's item type is ignored. Returns the effect performed.
    ///
    /// An error is also reported from the
    /// [`on_pointer_move`](DragReorderController::on_pointer_move) call that started
    /// the drag, once the drag has been torn down.
    pub fn drop(
        &mut self,
        payload: Option<&dyn Any>,
        allowed: DragEffects,
    ) -> Result<DragEffects, DragReorderError> {
        self.controller.handle_drop(payload, allowed)
    }

    /// The list receiving the drag events.
    pub fn list(&self) -> Option<&L> {
        self.controller.list()
    }

    /// Mutable access to the list, for platforms that update pointer state through it.
    pub fn list_mut(&mut self) -> Option<&mut L> {
        self.controller.list_mut()
    }

    /// The controller running this drag.
    ///
    /// Changing drag-affecting settings through it fails with
    /// [`UsageError::DragInProgress`](crate::UsageError::DragInProgress).
    pub fn controller(&mut self) -> &mut DragReorderController<L> {
        self.controller
    }
}

impl<L: ListHost> Drop for DragSession<'_, L> {
    // A native drag is torn down by the controller once its loop returns.
    fn drop(&mut self) {
        self.controller.end_foreign_drag();
    }
}
