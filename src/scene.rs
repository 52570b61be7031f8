//! Screen-space render snapshot of the editor, and its sync into Slint models.
//!
//! The library never sees the structs generated from `.slint` files, so
//! bindings take a constructor closure that turns each rendered item into the
//! application's row type:
//!
//! ```ignore
//! let nodes = Rc::new(VecModel::<NodeView>::default());
//! window.set_nodes(ModelRc::from(nodes.clone()));
//! editor.bind_nodes(nodes, |n| NodeView { id: n.id, title: n.title.clone(), /* ... */ });
//! ```
//!
//! After each handled event the editor rebuilds the [`Scene`] and pushes it
//! through every binding.

use crate::geometry::Rect;
use slint::{Color, Model, SharedString, VecModel};
use std::rc::Rc;

/// Pointer cursor the canvas should display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorShape {
    #[default]
    Default,
    Hand,
    Grabbing,
}

impl CursorShape {
    /// Stable index used by the `.slint` side to pick a `MouseCursor`.
    pub fn index(self) -> i32 {
        match self {
            CursorShape::Default => 0,
            CursorShape::Hand => 1,
            CursorShape::Grabbing => 2,
        }
    }
}

/// Connector geometry relative to its node's top-left corner.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedConnector {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedNode {
    pub id: i32,
    pub title: SharedString,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub selected: bool,
    pub fill: Color,
    pub stroke: Color,
    pub title_color: Color,
    pub input: RenderedConnector,
    pub output: RenderedConnector,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Connection,
    Drag,
    Sweep,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedLine {
    /// Connection id, or a negative id for the transient drag/sweep lines.
    pub id: i32,
    pub kind: LineKind,
    pub commands: SharedString,
    pub color: Color,
    pub width: f32,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RenderedMenu {
    pub visible: bool,
    pub x: f32,
    pub y: f32,
    pub labels: Vec<SharedString>,
}

/// Everything that is not a per-row model item.
#[derive(Debug, Clone, PartialEq)]
pub struct Overlay {
    pub selection_box: Option<Rect>,
    pub selection_stroke: Color,
    pub selection_fill: Color,
    pub background: Color,
    pub menu: RenderedMenu,
    pub cursor: CursorShape,
    pub zoom: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub nodes: Vec<RenderedNode>,
    pub lines: Vec<RenderedLine>,
    pub overlay: Overlay,
}

pub(crate) trait SceneSyncer {
    fn sync(&self, scene: &Scene);
}

/// Update rows in place, append new ones and drop the excess.
pub fn sync_rows<T, P, F>(model: &VecModel<P>, items: &[T], constructor: F)
where
    P: Clone + 'static,
    F: Fn(&T) -> P,
{
    for (i, item) in items.iter().enumerate() {
        let row = constructor(item);
        if i < model.row_count() {
            model.set_row_data(i, row);
        } else {
            model.push(row);
        }
    }
    while model.row_count() > items.len() {
        model.remove(model.row_count() - 1);
    }
}

pub(crate) struct NodeModelSyncer<P, F> {
    pub model: Rc<VecModel<P>>,
    pub constructor: F,
}

impl<P, F> SceneSyncer for NodeModelSyncer<P, F>
where
    P: Clone + 'static,
    F: Fn(&RenderedNode) -> P,
{
    fn sync(&self, scene: &Scene) {
        sync_rows(&self.model, &scene.nodes, &self.constructor);
    }
}

pub(crate) struct LineModelSyncer<P, F> {
    pub model: Rc<VecModel<P>>,
    pub constructor: F,
}

impl<P, F> SceneSyncer for LineModelSyncer<P, F>
where
    P: Clone + 'static,
    F: Fn(&RenderedLine) -> P,
{
    fn sync(&self, scene: &Scene) {
        sync_rows(&self.model, &scene.lines, &self.constructor);
    }
}

pub(crate) struct OverlaySyncer<F> {
    pub apply: F,
}

impl<F> SceneSyncer for OverlaySyncer<F>
where
    F: Fn(&Overlay),
{
    fn sync(&self, scene: &Scene) {
        (self.apply)(&scene.overlay);
    }
}
