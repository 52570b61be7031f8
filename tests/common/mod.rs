//! Common test utilities for integration tests.

#![allow(dead_code)]

pub mod harness;

use node_canvas::{ConnectorKind, GraphNode, NodeEditor, NodeId};
use slint::platform::PointerEventButton;
use std::cell::RefCell;
use std::rc::Rc;

/// Tracks callback invocations coming out of the compiled UI.
///
/// Each field records calls to the corresponding callback with their arguments.
#[derive(Default, Clone)]
pub struct CallbackTracker {
    /// (button, x, y, shift)
    pub pointer_down: Rc<RefCell<Vec<(PointerEventButton, f32, f32, bool)>>>,
    /// (button, x, y)
    pub pointer_up: Rc<RefCell<Vec<(PointerEventButton, f32, f32)>>>,
    /// (x, y, delta_y)
    pub scrolled: Rc<RefCell<Vec<(f32, f32, f32)>>>,
    /// Key event texts
    pub key_down: Rc<RefCell<Vec<String>>>,
    /// Menu item indices
    pub menu_item_activated: Rc<RefCell<Vec<i32>>>,
    /// Count of add_node_clicked calls
    pub add_node_clicked: Rc<RefCell<usize>>,
}

impl CallbackTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all recorded callbacks.
    pub fn clear(&self) {
        self.pointer_down.borrow_mut().clear();
        self.pointer_up.borrow_mut().clear();
        self.scrolled.borrow_mut().clear();
        self.key_down.borrow_mut().clear();
        self.menu_item_activated.borrow_mut().clear();
        *self.add_node_clicked.borrow_mut() = 0;
    }
}

// === Controller-level helpers ===

pub const LEFT: PointerEventButton = PointerEventButton::Left;
pub const RIGHT: PointerEventButton = PointerEventButton::Right;
pub const MIDDLE: PointerEventButton = PointerEventButton::Middle;

/// Editor seeded with two default-sized nodes: A at (100, 100) and B at (400, 200).
pub fn two_node_editor() -> (NodeEditor, NodeId, NodeId) {
    let editor = NodeEditor::new();
    let a = editor.add_node(100.0, 100.0);
    let b = editor.add_node(400.0, 200.0);
    (editor, a, b)
}

/// Screen position of a node's connector center.
pub fn connector_screen(editor: &NodeEditor, node: NodeId, kind: ConnectorKind) -> (f32, f32) {
    let n: GraphNode = editor.node(node).expect("node exists");
    let p = editor.viewport().world_to_screen(n.connector_center(kind));
    (p.x, p.y)
}

/// Screen position of a node's center.
pub fn node_center_screen(editor: &NodeEditor, node: NodeId) -> (f32, f32) {
    let n = editor.node(node).expect("node exists");
    let p = editor.viewport().world_to_screen(n.bounds().center());
    (p.x, p.y)
}

pub fn click(editor: &NodeEditor, button: PointerEventButton, (x, y): (f32, f32)) {
    editor.pointer_pressed(x, y, button, false);
    editor.pointer_released(x, y, button);
}

pub fn drag(editor: &NodeEditor, button: PointerEventButton, from: (f32, f32), to: (f32, f32)) {
    editor.pointer_pressed(from.0, from.1, button, false);
    editor.pointer_moved((from.0 + to.0) / 2.0, (from.1 + to.1) / 2.0);
    editor.pointer_moved(to.0, to.1);
    editor.pointer_released(to.0, to.1, button);
}

/// Key event text as Slint delivers it.
pub fn key_text(key: slint::platform::Key) -> slint::SharedString {
    key.into()
}
