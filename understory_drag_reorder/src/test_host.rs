// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Headless list host and scripted drag loop shared by the controller tests.
//!
//! The list is 100 × 200 with 20-pixel rows stacked from the top. A vertical
//! scrollbar covers `x >= 90`; its thumb is a child of the scrollbar, so only
//! an ancestor walk recognizes it.

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::any::Any;
use core::cell::RefCell;

use kurbo::{Point, Rect, Size, Vec2};

use crate::collection::{ObservableList, ReorderCollection};
use crate::effects::DragEffects;
use crate::error::DragReorderError;
use crate::geometry::VisualTree;
use crate::host::ListHost;
use crate::locator::{ContainerGenerator, GeneratorStatus};
use crate::proxy::{DragVisualProxy, ProxyLayer};
use crate::session::{DragLoop, DragSession};

pub(crate) type Item = Rc<str>;

const ROW_HEIGHT: f64 = 20.0;
pub(crate) const LIST_BOUNDS: Rect = Rect::new(0.0, 0.0, 100.0, 200.0);
const SCROLLBAR: Rect = Rect::new(90.0, 0.0, 100.0, 200.0);

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Visual {
    List,
    Row,
    Scrollbar,
    Thumb,
}

/// What the proxy layer has been asked to do.
#[derive(Clone, Debug, Default)]
pub(crate) struct ProxyLog {
    pub(crate) created: usize,
    pub(crate) destroyed: usize,
    pub(crate) visible: bool,
    pub(crate) offset: Vec2,
    pub(crate) size: Size,
    pub(crate) opacity: f64,
    pub(crate) source: Option<usize>,
}

#[derive(Debug)]
pub(crate) struct TestProxy {
    log: Rc<RefCell<ProxyLog>>,
}

impl DragVisualProxy for TestProxy {
    fn set_offset(&mut self, offset: Vec2) {
        self.log.borrow_mut().offset = offset;
    }

    fn set_visible(&mut self, visible: bool) {
        self.log.borrow_mut().visible = visible;
    }

    fn is_visible(&self) -> bool {
        self.log.borrow().visible
    }

    fn destroy(self) {
        let mut log = self.log.borrow_mut();
        log.destroyed += 1;
        log.visible = false;
    }
}

#[derive(Debug)]
pub(crate) struct TestList {
    pub(crate) items: ObservableList<Item>,
    pub(crate) has_items_source: bool,
    pub(crate) status: GeneratorStatus,
    pub(crate) pointer: Point,
    pub(crate) button: bool,
    pub(crate) selected: Option<usize>,
    pub(crate) allow_drop: bool,
    pub(crate) proxy_log: Rc<RefCell<ProxyLog>>,
}

impl TestList {
    pub(crate) fn new(names: &[&str]) -> Self {
        Self {
            items: names.iter().map(|name| Item::from(*name)).collect::<Vec<_>>().into(),
            has_items_source: true,
            status: GeneratorStatus::Realized,
            pointer: Point::ZERO,
            button: false,
            selected: None,
            allow_drop: false,
            proxy_log: Rc::new(RefCell::new(ProxyLog::default())),
        }
    }

    pub(crate) fn abcd() -> Self {
        Self::new(&["A", "B", "C", "D"])
    }

    pub(crate) fn names(&self) -> Vec<&str> {
        self.items.iter().map(|item| &**item).collect()
    }
}

/// Center-left point of the row at `index`.
pub(crate) fn on_row(index: usize) -> Point {
    Point::new(40.0, index as f64 * ROW_HEIGHT + ROW_HEIGHT / 2.0)
}

impl VisualTree for TestList {
    type Visual = Visual;

    fn hit_test(&self, point: Point) -> Option<Visual> {
        if SCROLLBAR.contains(point) {
            return Some(Visual::Thumb);
        }
        if !LIST_BOUNDS.contains(point) {
            return None;
        }
        if point.y < self.items.len() as f64 * ROW_HEIGHT {
            Some(Visual::Row)
        } else {
            Some(Visual::List)
        }
    }

    fn parent_of(&self, visual: Visual) -> Option<Visual> {
        match visual {
            Visual::List => None,
            Visual::Row | Visual::Scrollbar => Some(Visual::List),
            Visual::Thumb => Some(Visual::Scrollbar),
        }
    }

    fn is_scrollbar(&self, visual: Visual) -> bool {
        visual == Visual::Scrollbar
    }
}

impl ContainerGenerator for TestList {
    type Item = Item;
    type Row = usize;

    fn status(&self) -> GeneratorStatus {
        self.status
    }

    fn item_count(&self) -> usize {
        self.items.len()
    }

    fn container_from_index(&self, index: usize) -> Option<usize> {
        (index < self.items.len()).then_some(index)
    }

    fn container_from_item(&self, item: &Item) -> Option<usize> {
        self.items.index_of(item)
    }

    fn row_bounds(&self, row: usize) -> Rect {
        let y = row as f64 * ROW_HEIGHT;
        Rect::new(0.0, y, LIST_BOUNDS.x1, y + ROW_HEIGHT)
    }
}

impl ProxyLayer<usize> for TestList {
    type Proxy = TestProxy;

    fn create_proxy(&mut self, source: usize, size: Size, opacity: f64) -> TestProxy {
        let mut log = self.proxy_log.borrow_mut();
        log.created += 1;
        log.visible = true;
        log.size = size;
        log.opacity = opacity;
        log.source = Some(source);
        TestProxy {
            log: self.proxy_log.clone(),
        }
    }
}

impl ListHost for TestList {
    fn pointer_position(&self) -> Point {
        self.pointer
    }

    fn is_primary_button_pressed(&self) -> bool {
        self.button
    }

    fn list_bounds(&self) -> Rect {
        LIST_BOUNDS
    }

    fn item_at(&self, index: usize) -> Option<Item> {
        self.items.get(index).cloned()
    }

    fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    fn select_index(&mut self, index: usize) {
        self.selected = Some(index);
    }

    fn selected_item(&self) -> Option<Item> {
        self.item_at(self.selected?)
    }

    fn select_item(&mut self, item: &Item) {
        self.selected = self.items.index_of(item);
    }

    fn items_source(&mut self) -> Option<&mut dyn ReorderCollection<Item>> {
        if !self.has_items_source {
            return None;
        }
        let items: &mut dyn ReorderCollection<Item> = &mut self.items;
        Some(items)
    }

    fn set_allow_drop(&mut self, allow: bool) {
        self.allow_drop = allow;
    }
}

pub(crate) type Session<'a> = DragSession<'a, TestList>;

/// One event of a scripted drag.
pub(crate) enum Step {
    /// Pointer enters the list at a point.
    Enter(Point),
    /// Pointer moves over the list.
    Over(Point),
    /// Pointer leaves the list (or one of its children) at a point.
    Leave(Point),
    /// The dragged item is dropped at a point.
    Drop(Point),
    /// An item that did not come from this drag is dropped at a point.
    DropForeign(Point, Item),
    /// Inspect or poke the session mid-drag.
    Check(fn(&mut Session<'_>)),
    /// The user cancels the drag.
    Cancel,
}

/// A [`DragLoop`] that replays a fixed list of steps.
#[derive(Default)]
pub(crate) struct Script {
    steps: Vec<Step>,
    pub(crate) runs: usize,
    pub(crate) allowed: Option<DragEffects>,
    pub(crate) over_effects: Vec<DragEffects>,
    pub(crate) drop_result: Option<Result<DragEffects, DragReorderError>>,
}

impl Script {
    pub(crate) fn new(steps: impl IntoIterator<Item = Step>) -> Self {
        Self {
            steps: steps.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Replay the steps against `session`, returning the final effect.
    pub(crate) fn replay(
        &mut self,
        session: &mut Session<'_>,
        payload: Option<&Item>,
    ) -> DragEffects {
        for step in core::mem::take(&mut self.steps) {
            match step {
                Step::Enter(point) => {
                    point_at(session, point);
                    session.drag_enter();
                }
                Step::Over(point) => {
                    point_at(session, point);
                    self.over_effects.push(session.drag_over());
                }
                Step::Leave(point) => {
                    point_at(session, point);
                    session.drag_leave();
                }
                Step::Drop(point) => {
                    point_at(session, point);
                    let payload = payload.map(|item| item as &dyn Any);
                    return self.finish(session.drop(payload, DragEffects::REORDER));
                }
                Step::DropForeign(point, item) => {
                    point_at(session, point);
                    let result = session.drop(Some(&item as &dyn Any), DragEffects::REORDER);
                    return self.finish(result);
                }
                Step::Check(check) => check(session),
                Step::Cancel => return DragEffects::NONE,
            }
        }
        DragEffects::NONE
    }

    fn finish(&mut self, result: Result<DragEffects, DragReorderError>) -> DragEffects {
        let effects = result.clone().unwrap_or(DragEffects::NONE);
        self.drop_result = Some(result);
        effects
    }
}

impl DragLoop<TestList> for Script {
    fn run(
        &mut self,
        session: &mut Session<'_>,
        payload: &Item,
        allowed: DragEffects,
    ) -> DragEffects {
        self.runs += 1;
        self.allowed = Some(allowed);
        self.replay(session, Some(payload))
    }
}

fn point_at(session: &mut Session<'_>, point: Point) {
    if let Some(list) = session.list_mut() {
        list.pointer = point;
    }
}
