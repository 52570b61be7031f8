//! Connections between nodes, and the gestures that create and delete them.
//!
//! A connection always runs from the node owning the OUTPUT end to the node
//! owning the INPUT end, regardless of which connector the user started on.
//! Its line is cached in world space and recomputed with
//! [`ConnectionManager::update_connections`] whenever nodes move.
//!
//! Connections are created in two ways:
//!
//! - **click-to-connect**: [`ConnectionManager::handle_connector_click`] remembers the first
//!   connector and completes on the second;
//! - **drag-to-connect**: [`ConnectionManager::start_connection`] draws a
//!   drag line that follows the pointer until [`ConnectionManager::finish_drag`].
//!
//! A secondary-button drag over empty canvas draws a sweep line; every
//! connection it crosses is removed on release.

use crate::error::ConnectionError;
use crate::geometry::{segments_intersect, Point, Segment};
use crate::graph::Graph;
use crate::node::{ConnectorKind, ConnectorRef, NodeId};
use log::{debug, warn};

pub type ConnectionId = i32;

#[derive(Debug, Clone, PartialEq)]
pub struct Connection {
    pub id: ConnectionId,
    pub from: NodeId,
    pub to: NodeId,
    pub line: Segment,
}

#[derive(Debug, Clone)]
pub struct ConnectionManager {
    connections: Vec<Connection>,
    next_id: ConnectionId,
    start_point: Option<ConnectorRef>,
    drag_line: Option<Segment>,
    sweep_line: Option<Segment>,
    allow_self_connections: bool,
}

impl Default for ConnectionManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConnectionManager {
    pub fn new() -> Self {
        Self {
            connections: Vec::new(),
            next_id: 1,
            start_point: None,
            drag_line: None,
            sweep_line: None,
            allow_self_connections: true,
        }
    }

    pub fn with_self_connections(mut self, allow: bool) -> Self {
        self.allow_self_connections = allow;
        self
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn connection(&self, id: ConnectionId) -> Option<&Connection> {
        self.connections.iter().find(|c| c.id == id)
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }

    /// Connector remembered from a click or a drag start.
    pub fn start_point(&self) -> Option<ConnectorRef> {
        self.start_point
    }

    pub fn drag_line(&self) -> Option<Segment> {
        self.drag_line
    }

    pub fn sweep_line(&self) -> Option<Segment> {
        self.sweep_line
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_line.is_some()
    }

    pub fn is_sweeping(&self) -> bool {
        self.sweep_line.is_some()
    }

    pub fn connection_exists(&self, from: NodeId, to: NodeId) -> bool {
        self.connections.iter().any(|c| c.from == from && c.to == to)
    }

    /// Number of connections ending at `node`.
    pub fn incoming_count(&self, node: NodeId) -> usize {
        self.connections.iter().filter(|c| c.to == node).count()
    }

    // === Drag-to-connect ===

    /// Begin dragging a new connection out of `from`.
    ///
    /// Any previous drag line is discarded.
    pub fn start_connection(&mut self, from: ConnectorRef, graph: &Graph) {
        let Some(node) = graph.node(from.node) else {
            return;
        };
        self.start_point = Some(from);
        self.drag_line = Some(Segment::at(node.connector_center(from.kind)));
    }

    /// Move the free end of the drag line.
    pub fn drag_to(&mut self, p: Point) {
        if let Some(line) = self.drag_line.as_mut() {
            line.end = p;
        }
    }

    /// Release the drag line over `target`.
    ///
    /// Returns `None` if no drag was in progress or nothing was under the
    /// pointer, otherwise the result of trying to connect. The drag line and
    /// the start point are always cleared.
    pub fn finish_drag(
        &mut self,
        target: Option<ConnectorRef>,
        graph: &Graph,
    ) -> Option<Result<ConnectionId, ConnectionError>> {
        self.drag_line.take()?;
        let start = self.start_point.take();
        match (start, target) {
            (Some(start), Some(target)) => Some(self.complete_connection(start, target, graph)),
            _ => None,
        }
    }

    pub fn cancel_drag(&mut self) {
        self.drag_line = None;
        self.start_point = None;
    }

    // === Click-to-connect ===

    /// Handle a press on a connector.
    ///
    /// The first press remembers the connector. A press on the same connector
    /// or one of the same kind resets. A press on a compatible connector
    /// attempts the connection and resets.
    pub fn handle_connector_click(
        &mut self,
        clicked: ConnectorRef,
        graph: &Graph,
    ) -> Option<Result<ConnectionId, ConnectionError>> {
        let Some(start) = self.start_point else {
            self.start_point = Some(clicked);
            return None;
        };

        self.start_point = None;
        if start == clicked || start.kind == clicked.kind {
            return None;
        }
        Some(self.complete_connection(start, clicked, graph))
    }

    /// Connect two connectors, normalising direction to OUTPUT -> INPUT.
    pub fn complete_connection(
        &mut self,
        a: ConnectorRef,
        b: ConnectorRef,
        graph: &Graph,
    ) -> Result<ConnectionId, ConnectionError> {
        let result = self.try_connect(a, b, graph);
        if let Err(err) = &result {
            warn!("connection refused: {}", err);
        }
        result
    }

    fn try_connect(
        &mut self,
        a: ConnectorRef,
        b: ConnectorRef,
        graph: &Graph,
    ) -> Result<ConnectionId, ConnectionError> {
        if a.kind == b.kind {
            return Err(ConnectionError::SameKind);
        }

        let (from, to) = match a.kind {
            ConnectorKind::Output => (a.node, b.node),
            ConnectorKind::Input => (b.node, a.node),
        };

        let from_node = graph.node(from).ok_or(ConnectionError::UnknownNode(from))?;
        let to_node = graph.node(to).ok_or(ConnectionError::UnknownNode(to))?;

        if from == to && !self.allow_self_connections {
            return Err(ConnectionError::SelfConnection(from));
        }

        if self.connection_exists(from, to) {
            return Err(ConnectionError::Duplicate { from, to });
        }

        if !to_node.allows_more_connections(self.incoming_count(to)) {
            return Err(ConnectionError::CapacityReached {
                node: to,
                max: to_node.max_connections,
            });
        }

        let id = self.next_id;
        self.next_id += 1;
        let line = Segment::new(
            from_node.connector_center(ConnectorKind::Output),
            to_node.connector_center(ConnectorKind::Input),
        );
        self.connections.push(Connection { id, from, to, line });
        debug!("connection {} created: node {} -> node {}", id, from, to);
        Ok(id)
    }

    /// Remove every connection touching `node`. Returns the removed ids.
    pub fn remove_connections_for_node(&mut self, node: NodeId) -> Vec<ConnectionId> {
        let removed = self.remove_where(|c| c.from == node || c.to == node);
        if self.start_point.map(|s| s.node) == Some(node) {
            self.cancel_drag();
        }
        removed
    }

    fn remove_where<F>(&mut self, mut predicate: F) -> Vec<ConnectionId>
    where
        F: FnMut(&Connection) -> bool,
    {
        let mut removed = Vec::new();
        self.connections.retain(|c| {
            if predicate(c) {
                removed.push(c.id);
                false
            } else {
                true
            }
        });
        removed
    }

    /// Recompute every line from the current connector positions.
    pub fn update_connections(&mut self, graph: &Graph) {
        for c in &mut self.connections {
            if let (Some(from), Some(to)) = (graph.node(c.from), graph.node(c.to)) {
                c.line = Segment::new(
                    from.connector_center(ConnectorKind::Output),
                    to.connector_center(ConnectorKind::Input),
                );
            }
        }
    }

    // === Sweep deletion ===

    pub fn begin_sweep(&mut self, p: Point) {
        self.sweep_line = Some(Segment::at(p));
    }

    pub fn sweep_to(&mut self, p: Point) {
        if let Some(line) = self.sweep_line.as_mut() {
            line.end = p;
        }
    }

    /// Remove every connection crossed by the sweep line.
    pub fn finish_sweep(&mut self) -> Vec<ConnectionId> {
        let Some(sweep) = self.sweep_line.take() else {
            return Vec::new();
        };
        let removed = self.remove_where(|c| segments_intersect(&sweep, &c.line));
        if !removed.is_empty() {
            debug!("sweep removed connections {:?}", removed);
        }
        removed
    }

    pub fn cancel_sweep(&mut self) {
        self.sweep_line = None;
    }
}
