//! # Node Canvas
//!
//! Interaction core and Slint canvas for a box-and-connector graph editor.
//! Rectangular nodes carry one input connector on the left edge and one
//! output connector on the right edge. Users connect them by clicking or
//! dragging and cut connections with a right-button sweep.
//!
//! ## Layers
//!
//! - A pure-Rust core in world coordinates: [`Graph`], [`ConnectionManager`],
//!   [`SelectionManager`], [`SelectionBox`], [`MenuHandler`] and [`Viewport`].
//! - [`NodeEditor`], a cloneable controller that routes pointer and key
//!   events through the core and publishes a screen-space [`Scene`].
//! - `ui/canvas.slint`, a thin view that draws the scene and forwards events.
//!
//! ## Quick Start
//!
//! ```ignore
//! use node_canvas::NodeEditor;
//! use std::rc::Rc;
//!
//! let editor = NodeEditor::new();
//! let a = editor.add_node(100.0, 100.0);
//! let b = editor.add_node(400.0, 200.0);
//! editor.connect(ConnectorRef::output(a), ConnectorRef::input(b))?;
//!
//! let nodes = Rc::new(slint::VecModel::<NodeView>::default());
//! editor.bind_nodes(nodes.clone(), |n| NodeView { id: n.id, /* ... */ });
//! ```

pub mod config;
pub mod connections;
pub mod editor;
pub mod error;
pub mod geometry;
pub mod graph;
pub mod menu;
pub mod node;
pub mod path;
pub mod scene;
pub mod selection;
pub mod selection_box;
pub mod style;
pub mod viewport;

pub use config::EditorConfig;
pub use connections::{Connection, ConnectionId, ConnectionManager};
pub use editor::{EditorAction, NodeEditor, DRAG_LINE_ID, SWEEP_LINE_ID};
pub use error::{ConnectionError, EditorError, Result};
pub use geometry::{nodes_in_selection_box, segments_intersect, NodeGeometry, Point, Rect, Segment};
pub use graph::Graph;
pub use menu::{ContextMenu, MenuHandler, MenuItem};
pub use node::{ConnectorKind, ConnectorRef, GraphNode, NodeId};
pub use path::{dashed_line_path, line_path};
pub use scene::{
    sync_rows, CursorShape, LineKind, Overlay, RenderedConnector, RenderedLine, RenderedMenu,
    RenderedNode, Scene,
};
pub use selection::SelectionManager;
pub use selection_box::SelectionBox;
pub use style::Theme;
pub use viewport::Viewport;
