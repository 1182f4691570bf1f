// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The drag-reorder state machine.
//!
//! ```text
//! Idle ──pointer down on a row──▶ Armed ──move past threshold──▶ Dragging
//!   ▲                               │                               │
//!   └────────── pointer down elsewhere, drop, or cancel ◀───────────┘
//! ```
//!
//! Session state resets on every pointer-down and after every drag. The
//! configuration persists until changed, and cannot change while dragging.

use alloc::boxed::Box;
use core::any::Any;
use core::fmt;

use kurbo::Point;
use smallvec::SmallVec;

use crate::collection::ItemRef;
use crate::config::{self, DragReorderConfig};
use crate::drop::{self, DropHandler, ProcessDrop};
use crate::effects::DragEffects;
use crate::error::{DragReorderError, UsageError};
use crate::geometry;
use crate::host::{ListHost, ProxyOf};
use crate::locator::RowLocator;
use crate::marks::{RowDragState, RowMarks};
use crate::proxy::{DragVisualProxy, proxy_offset};
use crate::session::{DragLoop, DragSession};

/// Gesture phase of a [`DragReorderController`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DragPhase {
    /// No press is being tracked.
    Idle,
    /// A row was pressed; waiting for the pointer to leave the threshold.
    Armed,
    /// The native drag loop is running.
    Dragging,
}

struct Session<I, R> {
    armed: bool,
    candidate: Option<usize>,
    press_point: Point,
    dragging: bool,
    row_under_cursor: Option<I>,
    payload: Option<I>,
    dragged_row: Option<R>,
}

impl<I, R> Default for Session<I, R> {
    fn default() -> Self {
        Self {
            armed: false,
            candidate: None,
            press_point: Point::ZERO,
            dragging: false,
            row_under_cursor: None,
            payload: None,
            dragged_row: None,
        }
    }
}

type Precondition = dyn FnMut(Point) -> bool;
type DragOverRowHandler<I> = dyn FnMut(&I, &I);

/// Lets the user reorder a list by dragging its rows.
///
/// Feed pointer-down and pointer-move events from the list to
/// [`on_pointer_down`](Self::on_pointer_down) and
/// [`on_pointer_move`](Self::on_pointer_move). Once a press moves past the drag
/// threshold, the controller runs the host's [`DragLoop`] and resolves the drop
/// into a move (or insert) on the list's items source, or hands it to the
/// handler installed with [`set_drop_handler`](Self::set_drop_handler).
pub struct DragReorderController<L: ListHost> {
    list: Option<L>,
    config: DragReorderConfig,
    drag_precondition: Option<Box<Precondition>>,
    drop_handler: Option<Box<DropHandler<L::Item>>>,
    drag_over_row_handler: Option<Box<DragOverRowHandler<L::Item>>>,
    session: Session<L::Item, L::Row>,
    proxy: Option<ProxyOf<L>>,
    marks: RowMarks<L::Row>,
    pending_error: Option<DragReorderError>,
}

impl<L: ListHost> fmt::Debug for DragReorderController<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DragReorderController")
            .field("attached", &self.list.is_some())
            .field("config", &self.config)
            .field("phase", &self.phase())
            .field("candidate", &self.session.candidate)
            .field("press_point", &self.session.press_point)
            .field("has_proxy", &self.proxy.is_some())
            .field("has_drop_handler", &self.drop_handler.is_some())
            .finish_non_exhaustive()
    }
}

impl<L: ListHost> Default for DragReorderController<L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: ListHost> DragReorderController<L> {
    /// Create a controller with the default configuration and no list.
    pub fn new() -> Self {
        Self {
            list: None,
            config: DragReorderConfig::default(),
            drag_precondition: None,
            drop_handler: None,
            drag_over_row_handler: None,
            session: Session::default(),
            proxy: None,
            marks: RowMarks::new(),
            pending_error: None,
        }
    }

    /// Create a controller managing `list`.
    pub fn with_list(list: L) -> Self {
        let mut controller = Self::new();
        controller.bind(list);
        controller
    }

    /// Create a controller managing `list` with `config`.
    pub fn with_config(list: L, config: DragReorderConfig) -> Result<Self, UsageError> {
        config.validate()?;
        let mut controller = Self::with_list(list);
        controller.config = config;
        Ok(controller)
    }

    // --- Binding ---

    /// Manage `list`, returning the previously attached list.
    ///
    /// The list is told to accept drops.
    pub fn attach(&mut self, list: L) -> Result<Option<L>, UsageError> {
        self.ensure_idle("list")?;
        let previous = self.list.take();
        self.bind(list);
        Ok(previous)
    }

    /// Stop managing the attached list and return it.
    ///
    /// Detaching with no list attached is a no-op returning `Ok(None)`.
    pub fn detach(&mut self) -> Result<Option<L>, UsageError> {
        self.ensure_idle("list")?;
        self.reset_session();
        self.marks.clear();
        Ok(self.list.take())
    }

    fn bind(&mut self, mut list: L) {
        list.set_allow_drop(true);
        self.list = Some(list);
        self.reset_session();
        // Row ids of the previous list mean nothing to the new one.
        self.marks.clear();
    }

    /// The attached list.
    pub fn list(&self) -> Option<&L> {
        self.list.as_ref()
    }

    /// Mutable access to the attached list.
    pub fn list_mut(&mut self) -> Option<&mut L> {
        self.list.as_mut()
    }

    /// Receive drag events for a drag that started outside this list.
    ///
    /// Drops of items the list does not contain are inserted at the row under
    /// the cursor, or appended when dropped onto empty space.
    pub fn drop_target(&mut self) -> Result<DragSession<'_, L>, UsageError> {
        if self.list.is_none() {
            return Err(UsageError::NotAttached);
        }
        Ok(DragSession::new(self))
    }

    // --- Configuration ---

    fn ensure_idle(&self, property: &'static str) -> Result<(), UsageError> {
        if self.session.dragging {
            Err(UsageError::DragInProgress { property })
        } else {
            Ok(())
        }
    }

    /// Current configuration.
    pub fn config(&self) -> &DragReorderConfig {
        &self.config
    }

    /// Replace the whole configuration.
    pub fn set_config(&mut self, config: DragReorderConfig) -> Result<(), UsageError> {
        self.ensure_idle("config")?;
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// Set the proxy opacity, in `[0, 1]`. The default is `0.7`.
    pub fn set_adorner_opacity(&mut self, opacity: f64) -> Result<(), UsageError> {
        self.ensure_idle("adorner_opacity")?;
        config::validate_opacity(opacity)?;
        self.config.adorner_opacity = opacity;
        Ok(())
    }

    /// Show or hide the proxy that follows the pointer. The default is `true`.
    pub fn set_show_adorner(&mut self, show: bool) -> Result<(), UsageError> {
        self.ensure_idle("show_adorner")?;
        self.config.show_adorner = show;
        Ok(())
    }

    /// Override the horizontal drag distance; `None` restores the system default.
    pub fn set_min_horizontal_drag_distance(
        &mut self,
        distance: Option<f64>,
    ) -> Result<(), UsageError> {
        self.ensure_idle("min_horizontal_drag_distance")?;
        config::validate_distance(distance)?;
        self.config.min_horizontal_drag_distance = distance;
        Ok(())
    }

    /// Override the vertical drag distance; `None` restores the system default.
    pub fn set_min_vertical_drag_distance(
        &mut self,
        distance: Option<f64>,
    ) -> Result<(), UsageError> {
        self.ensure_idle("min_vertical_drag_distance")?;
        config::validate_distance(distance)?;
        self.config.min_vertical_drag_distance = distance;
        Ok(())
    }

    /// Only start drags whose press point (list-local) satisfies `precondition`.
    pub fn set_drag_precondition(
        &mut self,
        precondition: impl FnMut(Point) -> bool + 'static,
    ) -> Result<(), UsageError> {
        self.ensure_idle("drag_precondition")?;
        self.drag_precondition = Some(Box::new(precondition));
        Ok(())
    }

    /// Remove the drag precondition.
    pub fn clear_drag_precondition(&mut self) -> Result<(), UsageError> {
        self.ensure_idle("drag_precondition")?;
        self.drag_precondition = None;
        Ok(())
    }

    /// Handle drops with `handler` instead of the default move/insert.
    ///
    /// The handler is responsible for mutating the collection and returns the
    /// effect it performed.
    pub fn set_drop_handler(
        &mut self,
        handler: impl FnMut(&mut ProcessDrop<'_, L::Item>) -> DragEffects + 'static,
    ) -> Result<(), UsageError> {
        self.ensure_idle("drop_handler")?;
        self.drop_handler = Some(Box::new(handler));
        Ok(())
    }

    /// Restore the default drop behavior.
    pub fn clear_drop_handler(&mut self) -> Result<(), UsageError> {
        self.ensure_idle("drop_handler")?;
        self.drop_handler = None;
        Ok(())
    }

    /// Call `handler(dragged, target)` whenever the drag cursor moves onto a new row.
    pub fn set_drag_over_row_handler(
        &mut self,
        handler: impl FnMut(&L::Item, &L::Item) + 'static,
    ) -> Result<(), UsageError> {
        self.ensure_idle("drag_over_row_handler")?;
        self.drag_over_row_handler = Some(Box::new(handler));
        Ok(())
    }

    // --- Status ---

    /// Returns `true` while the drag loop is running.
    pub fn is_drag_in_progress(&self) -> bool {
        self.session.dragging
    }

    /// Current gesture phase.
    pub fn phase(&self) -> DragPhase {
        if self.session.dragging {
            DragPhase::Dragging
        } else if self.session.armed {
            DragPhase::Armed
        } else {
            DragPhase::Idle
        }
    }

    /// Index of the pressed row, while armed or dragging.
    pub fn candidate_index(&self) -> Option<usize> {
        self.session.candidate
    }

    /// Where the tracked press happened, in list-local coordinates.
    pub fn press_point(&self) -> Option<Point> {
        self.session.candidate.map(|_| self.session.press_point)
    }

    /// The item whose row is under the drag cursor.
    pub fn row_under_cursor(&self) -> Option<&L::Item> {
        self.session.row_under_cursor.as_ref()
    }

    /// Drag markers of `row`, for rendering.
    pub fn row_state(&self, row: L::Row) -> RowDragState {
        self.marks.get(row)
    }

    /// Rows whose drag markers changed since the last call.
    pub fn take_changed_rows(&mut self) -> SmallVec<[L::Row; 4]> {
        self.marks.take_changed()
    }

    /// The drag proxy, while one exists.
    pub fn proxy(&self) -> Option<&ProxyOf<L>> {
        self.proxy.as_ref()
    }

    // --- Pointer input ---

    /// Handle a primary-button press on the list.
    ///
    /// Arms the controller if the press lands on a realized row and not on a
    /// scrollbar. Ignored while a drag runs.
    pub fn on_pointer_down(&mut self) -> Result<DragPhase, UsageError> {
        if self.session.dragging {
            return Ok(DragPhase::Dragging);
        }
        self.reset_session();
        let list = self.list.as_ref().ok_or(UsageError::NotAttached)?;
        let point = list.pointer_position();

        if geometry::is_pointer_over_scrollbar(list, point) {
            #[cfg(feature = "tracing")]
            tracing::trace!(x = point.x, y = point.y, "press on scrollbar ignored");
            return Ok(DragPhase::Idle);
        }

        let Some(index) = RowLocator::new(list).index_under_point(point) else {
            return Ok(DragPhase::Idle);
        };
        self.session.armed = true;
        self.session.candidate = Some(index);
        self.session.press_point = point;
        #[cfg(feature = "tracing")]
        tracing::debug!(index, x = point.x, y = point.y, "drag armed");
        Ok(DragPhase::Armed)
    }

    /// Handle pointer movement over the list.
    ///
    /// Once the armed press has moved past the threshold, this starts the drag
    /// and runs `drag_loop` to completion before returning. Returns the effect
    /// of the drag, or `None` if no drag started.
    ///
    /// A [`DragReorderError::ConfigurationMismatch`] raised by the drop is
    /// returned here, after the drag has been torn down.
    pub fn on_pointer_move<D: DragLoop<L> + ?Sized>(
        &mut self,
        drag_loop: &mut D,
    ) -> Result<Option<DragEffects>, DragReorderError> {
        if self.list.is_none() {
            return Err(UsageError::NotAttached.into());
        }
        if self.session.dragging || !self.can_start_drag() {
            return Ok(None);
        }
        let Some(item) = self.begin_drag() else {
            return Ok(None);
        };

        let mut session = DragSession::new(self);
        let effects = drag_loop.run(&mut session, &item, DragEffects::REORDER);
        drop(session);

        if !effects.is_none()
            && let Some(list) = self.list.as_mut()
        {
            list.select_item(&item);
        }
        self.finish_drag();
        #[cfg(feature = "tracing")]
        tracing::debug!(effects = ?effects, "drag finished");
        match self.pending_error.take() {
            Some(err) => Err(err),
            None => Ok(Some(effects)),
        }
    }

    fn can_start_drag(&mut self) -> bool {
        let Some(list) = self.list.as_ref() else {
            return false;
        };
        if !list.is_primary_button_pressed() || !self.session.armed {
            return false;
        }
        let Some(index) = self.session.candidate else {
            return false;
        };
        let press = self.session.press_point;
        if let Some(precondition) = self.drag_precondition.as_mut()
            && !precondition(press)
        {
            return false;
        }
        let Some(row_bounds) = RowLocator::new(list).bounds_at_index(index) else {
            return false;
        };
        let distance = self.config.drag_distance(list.system_drag_distance());
        let size = geometry::drag_threshold(row_bounds, press, distance);
        geometry::has_crossed_threshold(press, list.pointer_position(), size)
    }

    /// Select the pressed row, create the proxy, and enter `Dragging`.
    ///
    /// Returns `None`, staying armed, if the item or its row is not available yet.
    fn begin_drag(&mut self) -> Option<L::Item> {
        let index = self.session.candidate?;
        let list = self.list.as_mut()?;
        if list.selected_index() != Some(index) {
            list.select_index(index);
        }
        let item = list.selected_item()?;
        let row = RowLocator::new(&*list).row_at_index(index)?;

        if self.config.shows_proxy() {
            let bounds = list.row_bounds(row);
            let opacity = self.config.adorner_opacity;
            let mut proxy = list.create_proxy(row, bounds.size(), opacity);
            proxy.set_offset(proxy_offset(
                bounds.origin(),
                self.session.press_point,
                list.pointer_position(),
            ));
            self.proxy = Some(proxy);
        }

        self.session.dragging = true;
        self.session.armed = false;
        self.session.dragged_row = Some(row);
        self.session.payload = Some(item.clone());
        self.marks.set(row, RowDragState::DRAGGED, true);
        self.pending_error = None;
        #[cfg(feature = "tracing")]
        tracing::debug!(index, proxy = self.proxy.is_some(), "drag started");
        Some(item)
    }

    /// Tear down a drag. Runs after every drag, whatever its outcome.
    fn finish_drag(&mut self) {
        if let Some(row) = self.session.dragged_row.take() {
            self.marks.set(row, RowDragState::DRAGGED, false);
        }
        self.session.dragging = false;
        self.set_row_under_cursor(None);
        if let Some(proxy) = self.proxy.take() {
            proxy.destroy();
        }
        self.reset_session();
    }

    fn reset_session(&mut self) {
        self.session = Session::default();
    }

    // --- Drag callbacks, re-entered from the drag loop ---

    /// Clear the drop-target state left by a drag that started elsewhere.
    pub(crate) fn end_foreign_drag(&mut self) {
        if !self.session.dragging {
            self.set_row_under_cursor(None);
        }
    }

    pub(crate) fn handle_drag_enter(&mut self) {
        let hidden = self.proxy.as_ref().is_some_and(|proxy| !proxy.is_visible());
        if hidden {
            self.update_proxy_location();
            if let Some(proxy) = self.proxy.as_mut() {
                proxy.set_visible(true);
            }
        }
    }

    pub(crate) fn handle_drag_over(&mut self) -> DragEffects {
        if self.config.shows_proxy() {
            self.update_proxy_location();
        }
        let item = self.list.as_ref().and_then(|list| {
            let pointer = list.pointer_position();
            let index = RowLocator::new(list).index_under_point(pointer)?;
            list.item_at(index)
        });
        self.set_row_under_cursor(item);
        DragEffects::MOVE
    }

    pub(crate) fn handle_drag_leave(&mut self) {
        let Some(list) = self.list.as_ref() else {
            return;
        };
        let pointer = list.pointer_position();
        if geometry::is_pointer_over_visual(list.list_bounds(), pointer) {
            return;
        }
        self.set_row_under_cursor(None);
        if let Some(proxy) = self.proxy.as_mut() {
            proxy.set_visible(false);
        }
    }

    pub(crate) fn handle_drop(
        &mut self,
        payload: Option<&dyn Any>,
        allowed: DragEffects,
    ) -> Result<DragEffects, DragReorderError> {
        let result = self.resolve_drop(payload, allowed);
        if let Err(err) = &result {
            self.pending_error = Some(err.clone());
        }
        result
    }

    fn resolve_drop(
        &mut self,
        payload: Option<&dyn Any>,
        allowed: DragEffects,
    ) -> Result<DragEffects, DragReorderError> {
        self.set_row_under_cursor(None);

        let Some(item) = payload
            .and_then(|payload| payload.downcast_ref::<L::Item>())
            .cloned()
        else {
            #[cfg(feature = "tracing")]
            tracing::debug!("drop ignored: payload is not a list item");
            return Ok(DragEffects::NONE);
        };

        let list = self.list.as_mut().ok_or(UsageError::NotAttached)?;
        let pointer = list.pointer_position();
        let under_cursor = RowLocator::new(&*list).index_under_point(pointer);
        let items = list
            .items_source()
            .ok_or(DragReorderError::ConfigurationMismatch)?;
        let old_index = items.index_of(&item);

        let target = drop::resolve_drop_target(items.len(), old_index, under_cursor);
        let Some(new_index) = target else {
            #[cfg(feature = "tracing")]
            tracing::debug!(?old_index, ?under_cursor, "drop rejected: no target row");
            return Ok(DragEffects::NONE);
        };

        if old_index == Some(new_index) {
            return Ok(DragEffects::MOVE);
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(?old_index, new_index, "drop resolved");

        if let Some(handler) = self.drop_handler.as_mut() {
            let mut args = ProcessDrop {
                items,
                item: &item,
                old_index,
                new_index,
                allowed_effects: allowed,
            };
            return Ok(handler(&mut args));
        }

        match old_index {
            Some(old_index) => items.move_item(old_index, new_index),
            None => items.insert(new_index, item),
        }
        Ok(DragEffects::MOVE)
    }

    fn update_proxy_location(&mut self) {
        let (Some(proxy), Some(list), Some(index)) =
            (self.proxy.as_mut(), self.list.as_ref(), self.session.candidate)
        else {
            return;
        };
        let Some(bounds) = RowLocator::new(list).bounds_at_index(index) else {
            return;
        };
        proxy.set_offset(proxy_offset(
            bounds.origin(),
            self.session.press_point,
            list.pointer_position(),
        ));
    }

    /// Move the drop-target marker to `item`'s row. No-op if `item` is already current.
    fn set_row_under_cursor(&mut self, item: Option<L::Item>) {
        let unchanged = match (&self.session.row_under_cursor, &item) {
            (None, None) => true,
            (Some(current), Some(next)) => current.same_item(next),
            _ => false,
        };
        if unchanged {
            return;
        }

        let previous: SmallVec<[L::Row; 2]> =
            self.marks.rows_with(RowDragState::DROP_TARGET).collect();
        for row in previous {
            self.marks.set(row, RowDragState::DROP_TARGET, false);
        }

        if let (Some(next), Some(list)) = (&item, self.list.as_ref()) {
            if let Some(row) = RowLocator::new(list).row_for_item(next) {
                self.marks.set(row, RowDragState::DROP_TARGET, true);
            }
            if let (Some(handler), Some(dragged)) = (
                self.drag_over_row_handler.as_mut(),
                self.session.payload.as_ref(),
            ) {
                handler(dragged, next);
            }
        }
        #[cfg(feature = "tracing")]
        tracing::trace!(has_target = item.is_some(), "row under drag cursor changed");
        self.session.row_under_cursor = item;
    }
}
