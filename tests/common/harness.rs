//! Test harness for the canvas window.
//!
//! Provides a complete setup mirroring `demos/canvas/src/main.rs` with
//! callback tracking and helper methods for simulating user interactions.

#![allow(dead_code)]

use super::CallbackTracker;
use node_canvas::{NodeEditor, Overlay, RenderedLine, RenderedNode};
use slint::{
    platform::{Key, PointerEventButton, WindowEvent},
    ComponentHandle, LogicalPosition, LogicalSize, Model, ModelRc, SharedString, VecModel,
};
use std::rc::Rc;

// Include the compiled UI from build.rs
slint::include_modules!();

/// Initialize the testing backend for this thread.
/// With init_no_event_loop(), each test thread can have its own backend instance.
/// Uses thread_local to ensure each thread only initializes once.
fn init_testing_backend() {
    use std::cell::Cell;
    thread_local! {
        static INITIALIZED: Cell<bool> = const { Cell::new(false) };
    }

    INITIALIZED.with(|init| {
        if !init.get() {
            i_slint_backend_testing::init_no_event_loop();
            init.set(true);
        }
    });
}

pub fn node_view(n: &RenderedNode) -> NodeView {
    NodeView {
        id: n.id,
        title: n.title.clone(),
        x: n.x,
        y: n.y,
        width: n.width,
        height: n.height,
        fill: n.fill,
        stroke: n.stroke,
        title_color: n.title_color,
        input_x: n.input.x,
        input_y: n.input.y,
        input_width: n.input.width,
        input_height: n.input.height,
        input_color: n.input.color,
        output_x: n.output.x,
        output_y: n.output.y,
        output_width: n.output.width,
        output_height: n.output.height,
        output_color: n.output.color,
    }
}

pub fn line_view(l: &RenderedLine) -> LineView {
    LineView {
        id: l.id,
        commands: l.commands.clone(),
        color: l.color,
        width: l.width,
    }
}

fn apply_overlay(w: &MainWindow, overlay: &Overlay) {
    w.set_canvas_background(overlay.background);
    w.set_selection_stroke(overlay.selection_stroke);
    w.set_selection_fill(overlay.selection_fill);
    match overlay.selection_box {
        Some(rect) => {
            w.set_selection_x(rect.x);
            w.set_selection_y(rect.y);
            w.set_selection_width(rect.width);
            w.set_selection_height(rect.height);
            w.set_selection_visible(true);
        }
        None => w.set_selection_visible(false),
    }
    w.set_menu_visible(overlay.menu.visible);
    w.set_menu_x(overlay.menu.x);
    w.set_menu_y(overlay.menu.y);
    let labels: Vec<SharedString> = overlay.menu.labels.clone();
    w.set_menu_labels(ModelRc::from(Rc::new(VecModel::from(labels))));
    w.set_cursor_shape(overlay.cursor.index());
}

/// Test harness for the canvas window.
///
/// Wires every UI callback into a [`NodeEditor`] and binds the node, line
/// and overlay views back to the window.
pub struct CanvasHarness {
    pub window: MainWindow,
    pub editor: NodeEditor,
    pub nodes: Rc<VecModel<NodeView>>,
    pub lines: Rc<VecModel<LineView>>,
    pub tracker: CallbackTracker,
}

impl CanvasHarness {
    /// Create a harness with nodes A at (100, 100) and B at (400, 200).
    pub fn new() -> Self {
        let harness = Self::empty();
        harness.editor.add_node(100.0, 100.0);
        harness.editor.add_node(400.0, 200.0);
        harness
    }

    /// Create a harness around an editor with no nodes.
    pub fn empty() -> Self {
        Self::with_editor(NodeEditor::new())
    }

    pub fn with_editor(editor: NodeEditor) -> Self {
        init_testing_backend();
        let window = MainWindow::new().unwrap();
        window.window().set_size(LogicalSize::new(800.0, 600.0));
        window.show().unwrap();
        let tracker = CallbackTracker::new();
        let w = window.as_weak();

        let nodes = Rc::new(VecModel::<NodeView>::default());
        window.set_nodes(ModelRc::from(nodes.clone()));
        editor.bind_nodes(nodes.clone(), node_view);

        let lines = Rc::new(VecModel::<LineView>::default());
        window.set_lines(ModelRc::from(lines.clone()));
        editor.bind_lines(lines.clone(), line_view);

        editor.bind_overlay({
            let w = w.clone();
            move |overlay| {
                if let Some(w) = w.upgrade() {
                    apply_overlay(&w, overlay);
                }
            }
        });

        window.on_pointer_down({
            let editor = editor.clone();
            let tracker = tracker.clone();
            move |button, x, y, shift| {
                tracker.pointer_down.borrow_mut().push((button, x, y, shift));
                editor.pointer_pressed(x, y, button, shift);
            }
        });

        window.on_pointer_up({
            let editor = editor.clone();
            let tracker = tracker.clone();
            move |button, x, y| {
                tracker.pointer_up.borrow_mut().push((button, x, y));
                editor.pointer_released(x, y, button);
            }
        });

        window.on_pointer_move({
            let editor = editor.clone();
            move |x, y| {
                editor.pointer_moved(x, y);
            }
        });

        window.on_pointer_enter({
            let editor = editor.clone();
            move || editor.pointer_entered()
        });

        window.on_pointer_exit({
            let editor = editor.clone();
            move || editor.pointer_exited()
        });

        window.on_scrolled({
            let editor = editor.clone();
            let tracker = tracker.clone();
            move |x, y, delta_y| {
                tracker.scrolled.borrow_mut().push((x, y, delta_y));
                editor.scrolled(x, y, delta_y);
            }
        });

        window.on_key_down({
            let editor = editor.clone();
            let tracker = tracker.clone();
            move |text| {
                tracker.key_down.borrow_mut().push(text.to_string());
                editor.key_pressed(&text)
            }
        });

        window.on_key_up({
            let editor = editor.clone();
            move |text| editor.key_released(&text)
        });

        window.on_focus_lost({
            let editor = editor.clone();
            move || editor.focus_lost()
        });

        window.on_menu_item_activated({
            let editor = editor.clone();
            let tracker = tracker.clone();
            move |index| {
                tracker.menu_item_activated.borrow_mut().push(index);
                if let Ok(index) = usize::try_from(index) {
                    editor.activate_menu_item(index);
                }
            }
        });

        window.on_add_node_clicked({
            let editor = editor.clone();
            let tracker = tracker.clone();
            move || {
                *tracker.add_node_clicked.borrow_mut() += 1;
                editor.add_node_at_screen(200.0, 150.0);
            }
        });

        Self {
            window,
            editor,
            nodes,
            lines,
            tracker,
        }
    }

    /// Process all pending events and render a frame.
    pub fn pump_events(&self) {
        slint::platform::update_timers_and_animations();
    }

    /// Get the node row shown for an id.
    pub fn node_view(&self, node_id: i32) -> Option<NodeView> {
        self.nodes.iter().find(|n| n.id == node_id)
    }

    /// Screen center of a rendered node.
    pub fn node_center(&self, node_id: i32) -> Option<(f32, f32)> {
        let n = self.node_view(node_id)?;
        Some((n.x + n.width / 2.0, n.y + n.height / 2.0))
    }

    // === Mouse event helpers ===

    /// Simulate mouse down at the given position.
    pub fn mouse_down(&self, x: f32, y: f32) {
        self.mouse_down_button(x, y, PointerEventButton::Left);
    }

    /// Simulate mouse down with a specific button.
    pub fn mouse_down_button(&self, x: f32, y: f32, button: PointerEventButton) {
        self.window
            .window()
            .dispatch_event(WindowEvent::PointerPressed {
                position: LogicalPosition::new(x, y),
                button,
            });
        self.pump_events();
    }

    /// Simulate mouse move to the given position.
    pub fn mouse_move(&self, x: f32, y: f32) {
        self.window
            .window()
            .dispatch_event(WindowEvent::PointerMoved {
                position: LogicalPosition::new(x, y),
            });
        self.pump_events();
    }

    /// Simulate mouse up at the given position.
    pub fn mouse_up(&self, x: f32, y: f32) {
        self.mouse_up_button(x, y, PointerEventButton::Left);
    }

    /// Simulate mouse up with a specific button.
    pub fn mouse_up_button(&self, x: f32, y: f32, button: PointerEventButton) {
        self.window
            .window()
            .dispatch_event(WindowEvent::PointerReleased {
                position: LogicalPosition::new(x, y),
                button,
            });
        self.pump_events();
    }

    /// Simulate a complete click (down + up) at the given position.
    pub fn click(&self, x: f32, y: f32) {
        self.mouse_down(x, y);
        self.mouse_up(x, y);
    }

    /// Simulate a complete click with a specific button.
    pub fn click_button(&self, x: f32, y: f32, button: PointerEventButton) {
        self.mouse_down_button(x, y, button);
        self.mouse_up_button(x, y, button);
    }

    /// Simulate a complete drag from start to end.
    pub fn drag(&self, start_x: f32, start_y: f32, end_x: f32, end_y: f32) {
        self.mouse_down(start_x, start_y);
        self.mouse_move((start_x + end_x) / 2.0, (start_y + end_y) / 2.0);
        self.mouse_move(end_x, end_y);
        self.mouse_up(end_x, end_y);
    }

    /// Simulate scroll (for zoom).
    pub fn scroll(&self, x: f32, y: f32, delta_y: f32) {
        self.window
            .window()
            .dispatch_event(WindowEvent::PointerScrolled {
                position: LogicalPosition::new(x, y),
                delta_x: 0.0,
                delta_y,
            });
        self.pump_events();
    }

    // === Keyboard event helpers ===

    /// Simulate a key press.
    pub fn key_press(&self, key: Key) {
        self.window.window().dispatch_event(WindowEvent::KeyPressed {
            text: key.into(),
        });
        self.pump_events();
    }

    /// Simulate a key release.
    pub fn key_release(&self, key: Key) {
        self.window.window().dispatch_event(WindowEvent::KeyReleased {
            text: key.into(),
        });
        self.pump_events();
    }

    /// Simulate text input.
    pub fn text_input(&self, text: &str) {
        self.window.window().dispatch_event(WindowEvent::KeyPressed {
            text: text.into(),
        });
        self.pump_events();
    }
}

impl Default for CanvasHarness {
    fn default() -> Self {
        Self::new()
    }
}
