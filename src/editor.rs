//! High-level controller that routes pointer and key events.
//!
//! [`NodeEditor`] owns the graph, the connections, the selection, the
//! rubber-band box, the two context menus and the viewport. The UI forwards
//! raw events in screen coordinates. The editor hit-tests them in the order
//! open menu → connector → node → empty canvas, then republishes a
//! [`Scene`] to every bound model.
//!
//! # Example
//!
//! ```ignore
//! use node_canvas::NodeEditor;
//!
//! slint::include_modules!();
//!
//! fn main() {
//!     let window = MainWindow::new().unwrap();
//!     let editor = NodeEditor::new();
//!
//!     window.on_pointer_down({
//!         let editor = editor.clone();
//!         move |button, x, y, shift| { editor.pointer_pressed(x, y, button, shift); }
//!     });
//!     window.on_pointer_move({
//!         let editor = editor.clone();
//!         move |x, y| { editor.pointer_moved(x, y); }
//!     });
//!     // pointer_up, scrolled, key_down, key_up, menu_item_activated ...
//!
//!     editor.bind_nodes(nodes_model, |n| NodeView { /* ... */ });
//!     window.run().unwrap();
//! }
//! ```

use crate::config::EditorConfig;
use crate::connections::{Connection, ConnectionId, ConnectionManager};
use crate::error::{EditorError, Result};
use crate::geometry::{Point, Rect, Segment};
use crate::graph::Graph;
use crate::menu::{key_from_text, ContextMenu, MenuHandler, MenuItem};
use crate::node::{ConnectorKind, ConnectorRef, GraphNode, NodeId};
use crate::path::{dashed_line_path, line_path};
use crate::scene::{
    CursorShape, LineKind, LineModelSyncer, NodeModelSyncer, Overlay, OverlaySyncer,
    RenderedConnector, RenderedLine, RenderedMenu, RenderedNode, Scene, SceneSyncer,
};
use crate::selection::SelectionManager;
use crate::selection_box::SelectionBox;
use crate::style::Theme;
use crate::viewport::Viewport;
use log::{debug, trace};
use slint::platform::{Key, PointerEventButton};
use slint::VecModel;
use std::cell::RefCell;
use std::rc::Rc;

/// Line ids for the transient lines, kept clear of connection ids.
pub const DRAG_LINE_ID: i32 = -1;
pub const SWEEP_LINE_ID: i32 = -2;

/// Scroll distance Slint reports for one mouse-wheel notch.
const WHEEL_NOTCH: f32 = 60.0;

/// What a context-menu entry does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorAction {
    AddNode,
    DeleteSelected,
}

/// The pointer gesture currently in progress.
#[derive(Debug, Clone, PartialEq)]
enum Gesture {
    Idle,
    Panning { last: Point },
    /// Primary press on a connector that has not yet moved far enough to drag.
    ConnectorPress { connector: ConnectorRef, origin: Point },
    ConnectionDrag,
    NodeDrag { press: Point, originals: Vec<(NodeId, Point)> },
    SelectionBox,
    Sweep,
}

impl Gesture {
    /// Button whose release ends this gesture.
    fn button(&self) -> Option<PointerEventButton> {
        match self {
            Gesture::Idle => None,
            Gesture::Panning { .. } => Some(PointerEventButton::Middle),
            Gesture::Sweep => Some(PointerEventButton::Right),
            _ => Some(PointerEventButton::Left),
        }
    }
}

struct EditorState {
    config: EditorConfig,
    theme: Theme,
    graph: Graph,
    connections: ConnectionManager,
    selection: SelectionManager,
    selection_box: SelectionBox,
    viewport: Viewport,
    canvas_menu: MenuHandler<EditorAction>,
    node_menu: MenuHandler<EditorAction>,
    gesture: Gesture,
    cursor: CursorShape,
}

impl EditorState {
    fn new(config: EditorConfig, add_node_keys: Vec<char>) -> Self {
        let canvas_menu = MenuHandler::builder(ContextMenu::new(vec![MenuItem::new(
            "Add Node",
            EditorAction::AddNode,
        )]))
        .required_keys(add_node_keys)
        .build();

        let node_menu = MenuHandler::builder(ContextMenu::new(vec![MenuItem::new(
            "Delete Node",
            EditorAction::DeleteSelected,
        )]))
        .use_right_click(true)
        .use_keys(false)
        .build();

        Self {
            connections: ConnectionManager::new()
                .with_self_connections(config.allow_self_connections),
            selection_box: SelectionBox::new(
                config.selection_start_margin,
                config.selection_min_size,
            ),
            config,
            theme: Theme::default(),
            graph: Graph::new(),
            selection: SelectionManager::new(),
            viewport: Viewport::default(),
            canvas_menu,
            node_menu,
            gesture: Gesture::Idle,
            cursor: CursorShape::Default,
        }
    }

    fn any_menu_showing(&self) -> bool {
        self.canvas_menu.menu().is_showing() || self.node_menu.menu().is_showing()
    }

    fn hide_menus(&mut self) {
        self.canvas_menu.hide();
        self.node_menu.hide();
    }

    fn node_template(&self, x: f32, y: f32) -> GraphNode {
        GraphNode::new(0, "", x, y)
            .with_size(self.config.node_width, self.config.node_height)
            .with_connector_size(self.config.connector_width, self.config.connector_height)
            .with_max_connections(self.config.default_max_connections)
    }

    fn add_node(&mut self, world: Point) -> NodeId {
        let template = self.node_template(world.x, world.y);
        let id = self.graph.add_node(template);
        debug!("node {} added at ({}, {})", id, world.x, world.y);
        id
    }

    fn delete_selected(&mut self) -> Vec<NodeId> {
        let ids = self.selection.sorted_ids();
        for &id in &ids {
            self.connections.remove_connections_for_node(id);
            self.graph.remove_node(id);
        }
        self.selection.clear();
        if matches!(self.gesture, Gesture::NodeDrag { .. }) {
            self.gesture = Gesture::Idle;
        }
        if !ids.is_empty() {
            debug!("deleted nodes {:?}", ids);
        }
        ids
    }

    fn cancel_gestures(&mut self) {
        self.connections.cancel_drag();
        self.connections.cancel_sweep();
        self.selection_box.cancel();
        self.gesture = Gesture::Idle;
        self.cursor = CursorShape::Default;
    }

    fn run_action(&mut self, action: EditorAction) {
        match action {
            EditorAction::AddNode => {
                let world = self.viewport.screen_to_world(self.canvas_menu.last_mouse());
                self.add_node(world);
            }
            EditorAction::DeleteSelected => {
                self.delete_selected();
            }
        }
    }

    // === Pointer routing ===

    fn pointer_pressed(&mut self, screen: Point, button: PointerEventButton, shift: bool) -> bool {
        let world = self.viewport.screen_to_world(screen);
        self.canvas_menu.pointer_entered();
        self.canvas_menu.pointer_moved(screen);

        if self.gesture != Gesture::Idle {
            // A second button while one is held: drop the running gesture
            trace!("press with {:?} interrupts {:?}", button, self.gesture);
            self.cancel_gestures();
        }

        if self.any_menu_showing() {
            let auto_hide =
                self.canvas_menu.menu().auto_hide() || self.node_menu.menu().auto_hide();
            if auto_hide {
                trace!("press at {:?} dismissed menu", screen);
                self.hide_menus();
                return true;
            }
        }

        match button {
            PointerEventButton::Middle => {
                self.gesture = Gesture::Panning { last: screen };
                self.cursor = CursorShape::Grabbing;
                true
            }
            PointerEventButton::Left => {
                self.primary_pressed(screen, world, shift);
                true
            }
            PointerEventButton::Right => {
                self.secondary_pressed(screen, world);
                true
            }
            _ => false,
        }
    }

    fn primary_pressed(&mut self, screen: Point, world: Point, shift: bool) {
        if let Some(connector) = self.graph.connector_at(world) {
            trace!("press on connector {:?}", connector);
            self.connections.handle_connector_click(connector, &self.graph);
            self.gesture = Gesture::ConnectorPress { connector, origin: screen };
            return;
        }

        if let Some(node) = self.graph.node_at(world) {
            trace!("press on node {}", node);
            if shift {
                self.selection.handle_interaction(node, true);
            } else if !self.selection.contains(node) {
                self.selection.select(node);
            }
            if !self.selection.contains(node) {
                // Shift-click just deselected it
                return;
            }
            let originals = self
                .selection
                .sorted_ids()
                .into_iter()
                .filter_map(|id| self.graph.node(id).map(|n| (id, Point::new(n.x, n.y))))
                .collect();
            self.gesture = Gesture::NodeDrag { press: world, originals };
            self.cursor = CursorShape::Grabbing;
            return;
        }

        trace!("press on empty canvas at {:?}", screen);
        self.selection.clear();
        self.selection_box.begin(screen);
        self.gesture = Gesture::SelectionBox;
        self.cursor = CursorShape::Hand;
    }

    fn secondary_pressed(&mut self, screen: Point, world: Point) {
        if self.graph.connector_at(world).is_some() {
            return;
        }

        if let Some(node) = self.graph.node_at(world) {
            if !self.selection.contains(node) {
                self.selection.select(node);
            }
            self.canvas_menu.hide();
            self.node_menu.secondary_clicked(screen);
            return;
        }

        self.connections.begin_sweep(world);
        self.gesture = Gesture::Sweep;
        self.cursor = CursorShape::Hand;
    }

    fn pointer_moved(&mut self, screen: Point) -> bool {
        self.canvas_menu.pointer_entered();
        self.canvas_menu.pointer_moved(screen);
        self.node_menu.pointer_moved(screen);
        let world = self.viewport.screen_to_world(screen);

        match &mut self.gesture {
            Gesture::Idle => false,
            Gesture::Panning { last } => {
                let (dx, dy) = (screen.x - last.x, screen.y - last.y);
                *last = screen;
                self.viewport.pan_by(dx, dy);
                true
            }
            Gesture::ConnectorPress { connector, origin } => {
                if screen.distance_to(*origin) < self.config.drag_threshold {
                    return false;
                }
                let connector = *connector;
                self.connections.start_connection(connector, &self.graph);
                self.connections.drag_to(world);
                self.gesture = Gesture::ConnectionDrag;
                self.cursor = CursorShape::Hand;
                true
            }
            Gesture::ConnectionDrag => {
                self.connections.drag_to(world);
                true
            }
            Gesture::Sweep => {
                self.connections.sweep_to(world);
                true
            }
            Gesture::NodeDrag { press, originals } => {
                let (dx, dy) = (world.x - press.x, world.y - press.y);
                for (id, original) in originals.iter() {
                    self.graph.set_position(*id, original.x + dx, original.y + dy);
                }
                self.connections.update_connections(&self.graph);
                true
            }
            Gesture::SelectionBox => self.selection_box.update(screen),
        }
    }

    fn pointer_released(&mut self, screen: Point, button: PointerEventButton) -> bool {
        if self.gesture.button() != Some(button) {
            return false;
        }
        let world = self.viewport.screen_to_world(screen);

        match std::mem::replace(&mut self.gesture, Gesture::Idle) {
            Gesture::Sweep => {
                self.connections.finish_sweep();
            }
            Gesture::ConnectionDrag => {
                let target = self.graph.connector_at(world);
                self.connections.finish_drag(target, &self.graph);
            }
            Gesture::SelectionBox => {
                if let Some(rect) = self.selection_box.finish() {
                    let world_rect = self.viewport.screen_rect_to_world(&rect);
                    let hits = self.graph.nodes_in_rect(&world_rect);
                    debug!("box selected {:?}", hits);
                    self.selection.select_multiple(hits);
                }
            }
            Gesture::NodeDrag { originals, .. } => {
                trace!("moved {} nodes", originals.len());
            }
            Gesture::Panning { .. } | Gesture::ConnectorPress { .. } | Gesture::Idle => {}
        }
        self.cursor = CursorShape::Default;
        true
    }

    fn key_pressed(&mut self, key: char) -> bool {
        if self.canvas_menu.key_pressed(key) {
            self.node_menu.hide();
            return true;
        }

        if key == char::from(Key::Delete) || key == char::from(Key::Backspace) {
            self.delete_selected();
            true
        } else if key == char::from(Key::Escape) {
            self.selection.clear();
            self.hide_menus();
            self.cancel_gestures();
            true
        } else {
            false
        }
    }

    // === Rendering ===

    fn render_connector(&self, node: &GraphNode, node_rect: &Rect, kind: ConnectorKind) -> RenderedConnector {
        let r = self.viewport.world_rect_to_screen(&node.connector_bounds(kind));
        RenderedConnector {
            x: r.x - node_rect.x,
            y: r.y - node_rect.y,
            width: r.width,
            height: r.height,
            color: match kind {
                ConnectorKind::Input => self.theme.input_connector,
                ConnectorKind::Output => self.theme.output_connector,
            },
        }
    }

    fn render_line(&self, id: i32, kind: LineKind, segment: &Segment) -> RenderedLine {
        let screen = self.viewport.world_segment_to_screen(segment);
        let (commands, color) = match kind {
            LineKind::Connection => (line_path(&screen), self.theme.connection),
            LineKind::Drag => (line_path(&screen), self.theme.drag_line),
            LineKind::Sweep => (
                dashed_line_path(&screen, self.config.sweep_dash, self.config.sweep_gap),
                self.theme.sweep_line,
            ),
        };
        RenderedLine {
            id,
            kind,
            commands: commands.into(),
            color,
            width: self.theme.line_width,
        }
    }

    fn scene(&self) -> Scene {
        let nodes = self
            .graph
            .nodes()
            .map(|node| {
                let rect = self.viewport.world_rect_to_screen(&node.bounds());
                let selected = self.selection.contains(node.id);
                RenderedNode {
                    id: node.id,
                    title: node.title.as_str().into(),
                    x: rect.x,
                    y: rect.y,
                    width: rect.width,
                    height: rect.height,
                    selected,
                    fill: self.theme.node_fill,
                    stroke: self.theme.node_stroke(selected),
                    title_color: self.theme.node_title,
                    input: self.render_connector(node, &rect, ConnectorKind::Input),
                    output: self.render_connector(node, &rect, ConnectorKind::Output),
                }
            })
            .collect();

        let mut lines: Vec<RenderedLine> = self
            .connections
            .connections()
            .iter()
            .map(|c| self.render_line(c.id, LineKind::Connection, &c.line))
            .collect();
        if let Some(drag) = self.connections.drag_line() {
            lines.push(self.render_line(DRAG_LINE_ID, LineKind::Drag, &drag));
        }
        if let Some(sweep) = self.connections.sweep_line() {
            lines.push(self.render_line(SWEEP_LINE_ID, LineKind::Sweep, &sweep));
        }

        let showing = [&self.canvas_menu, &self.node_menu]
            .into_iter()
            .map(|h| h.menu())
            .find(|m| m.is_showing());
        let menu = match showing {
            Some(m) => RenderedMenu {
                visible: true,
                x: m.position().x,
                y: m.position().y,
                labels: m.items().iter().map(|i| i.label.as_str().into()).collect(),
            },
            None => RenderedMenu::default(),
        };

        Scene {
            nodes,
            lines,
            overlay: Overlay {
                selection_box: self
                    .selection_box
                    .is_visible()
                    .then(|| self.selection_box.rect()),
                selection_stroke: self.theme.selection_stroke,
                selection_fill: self.theme.selection_fill,
                background: self.theme.background,
                menu,
                cursor: self.cursor,
                zoom: self.viewport.zoom,
            },
        }
    }
}

/// Controller that manages editor state and provides event handlers.
///
/// Clone this controller to share it across callbacks.
#[derive(Clone)]
pub struct NodeEditor {
    state: Rc<RefCell<EditorState>>,
    syncers: Rc<RefCell<Vec<Box<dyn SceneSyncer>>>>,
}

impl Default for NodeEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeEditor {
    /// Create an editor with the default configuration.
    pub fn new() -> Self {
        Self::from_state(EditorState::new(
            EditorConfig::default(),
            vec![char::from(Key::Shift), 'a'],
        ))
    }

    /// Create an editor from a configuration; fails on out-of-range values
    /// or an unparseable chord.
    pub fn with_config(config: EditorConfig) -> Result<Self> {
        config.validate()?;
        let keys = config.add_node_keys()?;
        Ok(Self::from_state(EditorState::new(config, keys)))
    }

    fn from_state(state: EditorState) -> Self {
        Self {
            state: Rc::new(RefCell::new(state)),
            syncers: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn set_theme(&self, theme: Theme) {
        self.state.borrow_mut().theme = theme;
        self.refresh();
    }

    pub fn config(&self) -> EditorConfig {
        self.state.borrow().config.clone()
    }

    // === Model bindings ===

    /// Keep `model` in sync with the rendered nodes.
    pub fn bind_nodes<P, F>(&self, model: Rc<VecModel<P>>, constructor: F)
    where
        P: Clone + 'static,
        F: Fn(&RenderedNode) -> P + 'static,
    {
        self.syncers
            .borrow_mut()
            .push(Box::new(NodeModelSyncer { model, constructor }));
        self.refresh();
    }

    /// Keep `model` in sync with connection, drag and sweep lines.
    pub fn bind_lines<P, F>(&self, model: Rc<VecModel<P>>, constructor: F)
    where
        P: Clone + 'static,
        F: Fn(&RenderedLine) -> P + 'static,
    {
        self.syncers
            .borrow_mut()
            .push(Box::new(LineModelSyncer { model, constructor }));
        self.refresh();
    }

    /// Call `apply` with the overlay state after every change.
    pub fn bind_overlay<F>(&self, apply: F)
    where
        F: Fn(&Overlay) + 'static,
    {
        self.syncers.borrow_mut().push(Box::new(OverlaySyncer { apply }));
        self.refresh();
    }

    /// Rebuild the scene and push it to every binding.
    pub fn refresh(&self) {
        let scene = self.state.borrow().scene();
        for syncer in self.syncers.borrow().iter() {
            syncer.sync(&scene);
        }
    }

    pub fn scene(&self) -> Scene {
        self.state.borrow().scene()
    }

    fn update<R>(&self, f: impl FnOnce(&mut EditorState) -> R) -> R {
        let result = f(&mut self.state.borrow_mut());
        self.refresh();
        result
    }

    // === Event handlers ===

    /// Handle a pointer press in screen coordinates. Returns whether it was consumed.
    pub fn pointer_pressed(&self, x: f32, y: f32, button: PointerEventButton, shift: bool) -> bool {
        self.update(|s| s.pointer_pressed(Point::new(x, y), button, shift))
    }

    pub fn pointer_moved(&self, x: f32, y: f32) -> bool {
        let changed = self.state.borrow_mut().pointer_moved(Point::new(x, y));
        if changed {
            self.refresh();
        }
        changed
    }

    pub fn pointer_released(&self, x: f32, y: f32, button: PointerEventButton) -> bool {
        self.update(|s| s.pointer_released(Point::new(x, y), button))
    }

    pub fn pointer_entered(&self) {
        self.state.borrow_mut().canvas_menu.pointer_entered();
    }

    pub fn pointer_exited(&self) {
        self.state.borrow_mut().canvas_menu.pointer_exited();
    }

    /// Zoom around the pointer. Positive `delta_y` zooms in.
    pub fn scrolled(&self, x: f32, y: f32, delta_y: f32) -> bool {
        self.update(|s| {
            let factor = s.config.zoom_step.powf(delta_y / WHEEL_NOTCH);
            let (min, max) = (s.config.zoom_min, s.config.zoom_max);
            s.viewport.zoom_at(Point::new(x, y), factor, min, max)
        })
    }

    /// Handle a key press given the key event text. Returns whether it was consumed.
    pub fn key_pressed(&self, text: &str) -> bool {
        let Some(key) = key_from_text(text) else {
            return false;
        };
        self.update(|s| s.key_pressed(key))
    }

    pub fn key_released(&self, text: &str) {
        if let Some(key) = key_from_text(text) {
            self.state.borrow_mut().canvas_menu.key_released(key);
        }
    }

    /// Forget held keys once the canvas loses keyboard focus, since their
    /// releases will not be delivered.
    pub fn focus_lost(&self) {
        self.state.borrow_mut().canvas_menu.release_all_keys();
    }

    /// Run the action behind item `index` of whichever menu is showing.
    pub fn activate_menu_item(&self, index: usize) -> Option<EditorAction> {
        self.update(|s| {
            let action = if s.canvas_menu.menu().is_showing() {
                s.canvas_menu.activate(index)
            } else {
                s.node_menu.activate(index)
            }?;
            debug!("menu action {:?}", action);
            s.run_action(action);
            Some(action)
        })
    }

    // === Direct operations ===

    /// Add a node with its top-left corner at a world position.
    pub fn add_node(&self, x: f32, y: f32) -> NodeId {
        self.update(|s| s.add_node(Point::new(x, y)))
    }

    /// Add a node with its top-left corner under a screen position.
    pub fn add_node_at_screen(&self, x: f32, y: f32) -> NodeId {
        self.update(|s| {
            let world = s.viewport.screen_to_world(Point::new(x, y));
            s.add_node(world)
        })
    }

    /// Insert a fully specified node, e.g. when seeding a canvas. Fails if
    /// the id is already taken.
    pub fn insert_node(&self, node: GraphNode) -> Result<NodeId> {
        self.update(|s| s.graph.insert_node(node))
    }

    /// Connect two connectors programmatically.
    pub fn connect(&self, a: ConnectorRef, b: ConnectorRef) -> Result<ConnectionId> {
        self.update(|s| {
            s.connections
                .complete_connection(a, b, &s.graph)
                .map_err(EditorError::from)
        })
    }

    pub fn delete_selected_nodes(&self) -> Vec<NodeId> {
        self.update(|s| s.delete_selected())
    }

    pub fn select_node(&self, id: NodeId) -> Result<()> {
        self.update(|s| {
            if s.graph.node(id).is_none() {
                return Err(EditorError::UnknownNode(id));
            }
            s.selection.select(id);
            Ok(())
        })
    }

    pub fn clear_selection(&self) {
        self.update(|s| s.selection.clear())
    }

    pub fn set_viewport(&self, viewport: Viewport) {
        self.update(|s| s.viewport = viewport)
    }

    // === Queries ===

    pub fn viewport(&self) -> Viewport {
        self.state.borrow().viewport
    }

    pub fn zoom(&self) -> f32 {
        self.state.borrow().viewport.zoom
    }

    pub fn node(&self, id: NodeId) -> Option<GraphNode> {
        self.state.borrow().graph.node(id).cloned()
    }

    pub fn node_ids(&self) -> Vec<NodeId> {
        self.state.borrow().graph.nodes().map(|n| n.id).collect()
    }

    pub fn node_count(&self) -> usize {
        self.state.borrow().graph.len()
    }

    pub fn connections(&self) -> Vec<Connection> {
        self.state.borrow().connections.connections().to_vec()
    }

    pub fn connection_count(&self) -> usize {
        self.state.borrow().connections.len()
    }

    pub fn connection_exists(&self, from: NodeId, to: NodeId) -> bool {
        self.state.borrow().connections.connection_exists(from, to)
    }

    /// Connector remembered by click-to-connect or an active drag.
    pub fn pending_connector(&self) -> Option<ConnectorRef> {
        self.state.borrow().connections.start_point()
    }

    pub fn drag_line(&self) -> Option<Segment> {
        self.state.borrow().connections.drag_line()
    }

    pub fn sweep_line(&self) -> Option<Segment> {
        self.state.borrow().connections.sweep_line()
    }

    pub fn selected_ids(&self) -> Vec<NodeId> {
        self.state.borrow().selection.sorted_ids()
    }

    pub fn is_selected(&self, id: NodeId) -> bool {
        self.state.borrow().selection.contains(id)
    }

    /// Visible rubber-band rectangle in screen space.
    pub fn selection_rect(&self) -> Option<Rect> {
        let state = self.state.borrow();
        state.selection_box.is_visible().then(|| state.selection_box.rect())
    }

    pub fn is_menu_showing(&self) -> bool {
        self.state.borrow().any_menu_showing()
    }

    /// Labels and screen position of the open menu.
    pub fn open_menu(&self) -> Option<RenderedMenu> {
        let menu = self.state.borrow().scene().overlay.menu;
        menu.visible.then_some(menu)
    }

    pub fn cursor(&self) -> CursorShape {
        self.state.borrow().cursor
    }
}
