//! Graph nodes and their connector points.

use crate::geometry::{NodeGeometry, Point, Rect};

pub type NodeId = i32;

/// Direction of a connector point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectorKind {
    Input,
    Output,
}

/// Identifies one connector: the node that owns it and which side it sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectorRef {
    pub node: NodeId,
    pub kind: ConnectorKind,
}

impl ConnectorRef {
    pub const fn new(node: NodeId, kind: ConnectorKind) -> Self {
        Self { node, kind }
    }

    pub const fn input(node: NodeId) -> Self {
        Self::new(node, ConnectorKind::Input)
    }

    pub const fn output(node: NodeId) -> Self {
        Self::new(node, ConnectorKind::Output)
    }
}

/// A box on the canvas with one input connector on its left edge and one
/// output connector on its right edge.
///
/// Position is the top-left corner in world coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphNode {
    pub id: NodeId,
    pub title: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub connector_width: f32,
    pub connector_height: f32,
    /// Maximum number of incoming connections; 0 means unlimited.
    pub max_connections: u32,
}

impl GraphNode {
    pub fn new(id: NodeId, title: impl Into<String>, x: f32, y: f32) -> Self {
        Self {
            id,
            title: title.into(),
            x,
            y,
            width: 120.0,
            height: 60.0,
            connector_width: 10.0,
            connector_height: 20.0,
            max_connections: 0,
        }
    }

    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_connector_size(mut self, width: f32, height: f32) -> Self {
        self.connector_width = width;
        self.connector_height = height;
        self
    }

    pub fn with_max_connections(mut self, max_connections: u32) -> Self {
        self.max_connections = max_connections;
        self
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn contains(&self, p: Point) -> bool {
        self.bounds().contains(p)
    }

    /// Centre of a connector, used as the endpoint of connection lines.
    pub fn connector_center(&self, kind: ConnectorKind) -> Point {
        let cy = self.y + self.height / 2.0;
        match kind {
            ConnectorKind::Input => Point::new(self.x, cy),
            ConnectorKind::Output => Point::new(self.x + self.width, cy),
        }
    }

    /// Hit area of a connector; straddles the node edge.
    pub fn connector_bounds(&self, kind: ConnectorKind) -> Rect {
        let c = self.connector_center(kind);
        Rect::new(
            c.x - self.connector_width / 2.0,
            c.y - self.connector_height / 2.0,
            self.connector_width,
            self.connector_height,
        )
    }

    /// Which connector, if any, lies under `p`.
    pub fn connector_at(&self, p: Point) -> Option<ConnectorKind> {
        [ConnectorKind::Output, ConnectorKind::Input]
            .into_iter()
            .find(|&kind| self.connector_bounds(kind).contains(p))
    }

    /// Whether another incoming connection fits, given `current` incoming ones.
    pub fn allows_more_connections(&self, current: usize) -> bool {
        self.max_connections == 0 || current < self.max_connections as usize
    }

    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.x += dx;
        self.y += dy;
    }
}

impl NodeGeometry for &GraphNode {
    fn id(&self) -> i32 {
        self.id
    }

    fn rect(&self) -> Rect {
        self.bounds()
    }
}
