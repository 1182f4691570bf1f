// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reordering a ranked rules list by dragging.
//!
//! This example drives a [`DragReorderController`] over a headless list of
//! firewall-style rules. Each rule carries a rank; a custom drop handler moves
//! the dragged rule and renumbers every rank so they always match the order.
//!
//! The pointer path is scripted: press on the last rule, drag it over the rows
//! above, and drop it on the first one.
//!
//! Run:
//! - `RUST_LOG=understory_drag_reorder=trace cargo run -p understory_drag_reorder_demos --example reorder_rules`

use std::any::Any;
use std::cell::Cell;
use std::rc::Rc;

use kurbo::{Point, Rect, Size, Vec2};
use tracing_subscriber::EnvFilter;
use understory_drag_reorder::{
    ContainerGenerator, DragEffects, DragLoop, DragReorderController, DragSession,
    DragVisualProxy, GeneratorStatus, ListHost, ObservableList, ProcessDrop, ProxyLayer,
    ReorderCollection, VisualTree,
};

const ROW_HEIGHT: f64 = 24.0;
const WIDTH: f64 = 320.0;

#[derive(Debug)]
struct Rule {
    name: &'static str,
    rank: Cell<usize>,
}

type RuleRef = Rc<Rule>;

/// Stand-in for a floating overlay; prints instead of drawing.
#[derive(Debug)]
struct Overlay {
    label: &'static str,
    visible: bool,
}

impl DragVisualProxy for Overlay {
    fn set_offset(&mut self, offset: Vec2) {
        tracing::trace!(label = self.label, x = offset.x, y = offset.y, "overlay moved");
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn destroy(self) {
        tracing::trace!(label = self.label, "overlay removed");
    }
}

#[derive(Debug)]
struct RulesPane {
    rules: ObservableList<RuleRef>,
    pointer: Point,
    button: bool,
    selected: Option<usize>,
}

impl RulesPane {
    fn new(names: &[&'static str]) -> Self {
        let rules = names
            .iter()
            .copied()
            .enumerate()
            .map(|(index, name)| {
                Rc::new(Rule {
                    name,
                    rank: Cell::new(index + 1),
                })
            })
            .collect::<Vec<_>>();
        Self {
            rules: rules.into(),
            pointer: Point::ZERO,
            button: false,
            selected: None,
        }
    }

    fn print(&self, heading: &str) {
        println!("{heading}");
        for rule in self.rules.iter() {
            println!("  {:>2}. {}", rule.rank.get(), rule.name);
        }
    }
}

fn row_center(index: usize) -> Point {
    Point::new(WIDTH / 2.0, (index as f64 + 0.5) * ROW_HEIGHT)
}

impl VisualTree for RulesPane {
    // The pane has no scrollbar; every hit is the pane itself.
    type Visual = ();

    fn hit_test(&self, point: Point) -> Option<()> {
        self.list_bounds().contains(point).then_some(())
    }

    fn parent_of(&self, _: ()) -> Option<()> {
        None
    }

    fn is_scrollbar(&self, _: ()) -> bool {
        false
    }
}

impl ContainerGenerator for RulesPane {
    type Item = RuleRef;
    type Row = usize;

    fn status(&self) -> GeneratorStatus {
        GeneratorStatus::Realized
    }

    fn item_count(&self) -> usize {
        self.rules.len()
    }

    fn container_from_index(&self, index: usize) -> Option<usize> {
        (index < self.rules.len()).then_some(index)
    }

    fn container_from_item(&self, item: &RuleRef) -> Option<usize> {
        self.rules.index_of(item)
    }

    fn row_bounds(&self, row: usize) -> Rect {
        let y = row as f64 * ROW_HEIGHT;
        Rect::new(0.0, y, WIDTH, y + ROW_HEIGHT)
    }
}

impl ProxyLayer<usize> for RulesPane {
    type Proxy = Overlay;

    fn create_proxy(&mut self, source: usize, size: Size, opacity: f64) -> Overlay {
        let label = self.rules.as_slice()[source].name;
        tracing::debug!(
            label,
            width = size.width,
            height = size.height,
            opacity,
            "overlay created"
        );
        Overlay {
            label,
            visible: true,
        }
    }
}

impl ListHost for RulesPane {
    fn pointer_position(&self) -> Point {
        self.pointer
    }

    fn is_primary_button_pressed(&self) -> bool {
        self.button
    }

    fn list_bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, WIDTH, 10.0 * ROW_HEIGHT)
    }

    fn item_at(&self, index: usize) -> Option<RuleRef> {
        self.rules.get(index).cloned()
    }

    fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    fn select_index(&mut self, index: usize) {
        self.selected = Some(index);
    }

    fn selected_item(&self) -> Option<RuleRef> {
        self.item_at(self.selected?)
    }

    fn select_item(&mut self, item: &RuleRef) {
        self.selected = self.rules.index_of(item);
    }

    fn items_source(&mut self) -> Option<&mut dyn ReorderCollection<RuleRef>> {
        let rules: &mut dyn ReorderCollection<RuleRef> = &mut self.rules;
        Some(rules)
    }

    fn set_allow_drop(&mut self, _: bool) {}
}

/// Replays a pointer path, then drops at its last point.
struct PointerPath(Vec<Point>);

impl DragLoop<RulesPane> for PointerPath {
    fn run(
        &mut self,
        session: &mut DragSession<'_, RulesPane>,
        payload: &RuleRef,
        allowed: DragEffects,
    ) -> DragEffects {
        session.drag_enter();
        for &point in &self.0 {
            if let Some(pane) = session.list_mut() {
                pane.pointer = point;
            }
            session.drag_over();
        }
        match session.drop(Some(payload as &dyn Any), allowed) {
            Ok(effects) => effects,
            Err(err) => {
                tracing::warn!(%err, "drop failed");
                DragEffects::NONE
            }
        }
    }
}

/// Move or insert as the controller would, then renumber ranks by position.
fn renumbering_drop(drop: &mut ProcessDrop<'_, RuleRef>) -> DragEffects {
    match drop.old_index {
        Some(old_index) => drop.items.move_item(old_index, drop.new_index),
        None => drop.items.insert(drop.new_index, drop.item.clone()),
    }
    for index in 0..drop.items.len() {
        if let Some(rule) = drop.items.get(index) {
            rule.rank.set(index + 1);
        }
    }
    DragEffects::MOVE
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("understory_drag_reorder=debug")),
        )
        .init();

    let pane = RulesPane::new(&[
        "allow loopback",
        "allow established",
        "deny telnet",
        "allow ssh from office",
    ]);
    pane.print("before:");

    let mut controller = DragReorderController::with_list(pane);
    controller.set_drop_handler(renumbering_drop)?;
    controller.set_drag_over_row_handler(|dragged: &RuleRef, target: &RuleRef| {
        println!("  dragging {:?} over {:?}", dragged.name, target.name);
    })?;

    // Press on the last rule.
    let press = row_center(3);
    if let Some(pane) = controller.list_mut() {
        pane.pointer = press;
        pane.button = true;
    }
    controller.on_pointer_down()?;

    // The first move past the threshold starts the drag and runs it to completion.
    if let Some(pane) = controller.list_mut() {
        pane.pointer = press - Vec2::new(0.0, 8.0);
    }
    let mut path = PointerPath(vec![row_center(2), row_center(1), row_center(0)]);
    let effects = controller.on_pointer_move(&mut path)?;
    println!("drag finished with {effects:?}");

    if let Some(pane) = controller.list_mut() {
        pane.button = false;
        pane.print("after:");
        println!("changes: {:?}", pane.rules.take_changes());
    }
    Ok(())
}
