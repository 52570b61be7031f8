//! Ordered node storage with hit testing.
//!
//! Insertion order doubles as z-order: the last node is drawn on top and is
//! the first one hit-tested.

use crate::error::{EditorError, Result};
use crate::geometry::{nodes_in_selection_box, Point, Rect};
use crate::node::{ConnectorRef, GraphNode, NodeId};

#[derive(Debug, Clone)]
pub struct Graph {
    nodes: Vec<GraphNode>,
    next_id: NodeId,
    created: u32,
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

impl Graph {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            next_id: 1,
            created: 0,
        }
    }

    /// Create a node with the next free id and a generated title.
    pub fn add_node(&mut self, template: GraphNode) -> NodeId {
        let id = self.free_id();
        let title = format!("Node {}", self.created);
        self.push(GraphNode { id, title, ..template });
        id
    }

    /// Insert a fully specified node. Ids handed out later skip past it.
    pub fn insert_node(&mut self, node: GraphNode) -> Result<NodeId> {
        let id = node.id;
        if self.node(id).is_some() {
            return Err(EditorError::DuplicateNode(id));
        }
        self.push(node);
        Ok(id)
    }

    fn push(&mut self, node: GraphNode) {
        self.next_id = self.next_id.max(node.id.saturating_add(1));
        self.created += 1;
        self.nodes.push(node);
    }

    /// `next_id`, unless the counter has saturated onto a taken id.
    fn free_id(&self) -> NodeId {
        if self.node(self.next_id).is_none() {
            return self.next_id;
        }
        (1..NodeId::MAX)
            .find(|id| self.node(*id).is_none())
            .unwrap_or(self.next_id)
    }

    pub fn remove_node(&mut self, id: NodeId) -> Option<GraphNode> {
        let index = self.nodes.iter().position(|n| n.id == id)?;
        Some(self.nodes.remove(index))
    }

    pub fn node(&self, id: NodeId) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut GraphNode> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &GraphNode> {
        self.nodes.iter()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Topmost node whose body contains `p`.
    pub fn node_at(&self, p: Point) -> Option<NodeId> {
        self.nodes.iter().rev().find(|n| n.contains(p)).map(|n| n.id)
    }

    /// Topmost connector containing `p`.
    pub fn connector_at(&self, p: Point) -> Option<ConnectorRef> {
        self.nodes
            .iter()
            .rev()
            .find_map(|n| n.connector_at(p).map(|kind| ConnectorRef::new(n.id, kind)))
    }

    /// Ids of nodes intersecting a world-space rectangle.
    pub fn nodes_in_rect(&self, rect: &Rect) -> Vec<NodeId> {
        nodes_in_selection_box(rect, self.nodes.iter())
    }

    pub fn set_position(&mut self, id: NodeId, x: f32, y: f32) -> bool {
        match self.node_mut(id) {
            Some(node) => {
                node.x = x;
                node.y = y;
                true
            }
            None => false,
        }
    }

    pub fn translate(&mut self, id: NodeId, dx: f32, dy: f32) -> bool {
        match self.node_mut(id) {
            Some(node) => {
                node.translate(dx, dy);
                true
            }
            None => false,
        }
    }
}
