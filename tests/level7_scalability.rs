//! Level 7: Scalability Tests
//!
//! These tests verify that the editor handles large scenes (1K-10K nodes and
//! connections) without performance regressions. Tests use generous timing
//! thresholds (2-5x expected) to avoid CI flakiness while still catching
//! O(n²) regressions in the per-event paths.
//!
//! **IMPORTANT:** Run with `cargo test level7 --release` for realistic performance.
//! Debug mode is 10-50x slower and timing assertions will be skipped.

use node_canvas::{
    nodes_in_selection_box, ConnectionManager, ConnectorRef, Graph, GraphNode, NodeEditor, Point,
    Rect, SelectionManager,
};
use slint::platform::PointerEventButton;
use slint::{Model, VecModel};
use std::rc::Rc;
use std::time::{Duration, Instant};

// ============================================================================
// Debug Mode Detection
// ============================================================================

/// Returns true if running in debug mode (without optimizations)
const fn is_debug_mode() -> bool {
    cfg!(debug_assertions)
}

/// Assert that elapsed time is within threshold, but skip in debug mode.
/// In debug mode, prints a warning instead of failing.
macro_rules! assert_timing {
    ($elapsed:expr, $threshold:expr, $($msg:tt)+) => {
        if is_debug_mode() {
            if $elapsed > $threshold {
                eprintln!(
                    "SKIPPED (debug mode): {} - took {:?}, threshold {:?}. Run with --release for accurate timing.",
                    format!($($msg)+),
                    $elapsed,
                    $threshold
                );
            }
        } else {
            assert!(
                $elapsed <= $threshold,
                "{} took {:?}, expected <= {:?}",
                format!($($msg)+),
                $elapsed,
                $threshold
            );
        }
    };
}

// ============================================================================
// Constants
// ============================================================================

/// Small scale: 1,000 items
const SCALE_SMALL: usize = 1_000;

/// Large scale: 10,000 items
const SCALE_LARGE: usize = 10_000;

// ============================================================================
// Timing Thresholds (generous to avoid CI flakiness)
// ============================================================================

mod thresholds {
    use super::*;

    /// Maximum time for building a 1K node chain with connections
    pub const BUILD_CHAIN_1K: Duration = Duration::from_millis(200);

    /// Maximum time for a single connector hit test against 10K nodes
    pub const CONNECTOR_HIT_10K: Duration = Duration::from_millis(20);

    /// Maximum time for box selection with 10K nodes (full canvas)
    pub const BOX_SELECT_10K: Duration = Duration::from_millis(100);

    /// Maximum time for one sweep across 1K connections
    pub const SWEEP_1K: Duration = Duration::from_millis(50);

    /// Maximum time for one drag tick moving 1K selected nodes
    pub const GROUP_DRAG_TICK_1K: Duration = Duration::from_millis(100);

    /// Maximum time for building and syncing a scene of 1K nodes and links
    pub const SCENE_SYNC_1K: Duration = Duration::from_millis(100);

    /// Maximum time for selection replace with 10K items
    pub const SELECTION_REPLACE_10K: Duration = Duration::from_millis(50);
}

// ============================================================================
// Data Generators
// ============================================================================

/// Generate a grid of nodes with predictable layout.
fn generate_node_grid(count: usize, spacing: f32) -> Graph {
    let cols = (count as f32).sqrt().ceil() as usize;
    let mut graph = Graph::new();
    for i in 0..count {
        let row = i / cols;
        let col = i % cols;
        graph
            .insert_node(GraphNode::new(
                i as i32 + 1,
                format!("Node {}", i),
                col as f32 * spacing,
                row as f32 * spacing,
            ))
            .unwrap();
    }
    graph
}

/// Editor holding a horizontal chain of nodes, each output wired to the next input.
fn chain_editor(count: usize) -> NodeEditor {
    let editor = NodeEditor::new();
    for i in 0..count {
        editor.add_node(i as f32 * 200.0, 100.0);
    }
    for id in 1..count as i32 {
        editor
            .connect(ConnectorRef::output(id), ConnectorRef::input(id + 1))
            .unwrap();
    }
    editor
}

// ============================================================================
// Tests
// ============================================================================

#[test]
fn test_build_chain_1k() {
    let start = Instant::now();
    let editor = chain_editor(SCALE_SMALL);
    let elapsed = start.elapsed();

    assert_eq!(editor.node_count(), SCALE_SMALL);
    assert_eq!(editor.connection_count(), SCALE_SMALL - 1);
    assert_timing!(elapsed, thresholds::BUILD_CHAIN_1K, "building 1K chain");
}

#[test]
fn test_connector_hit_10k() {
    let graph = generate_node_grid(SCALE_LARGE, 200.0);

    let start = Instant::now();
    // Output connector of the last node: bottom-right of the grid
    let hit = graph.connector_at(Point::new(99.0 * 200.0 + 120.0, 99.0 * 200.0 + 30.0));
    let elapsed = start.elapsed();

    assert_eq!(hit, Some(ConnectorRef::output(SCALE_LARGE as i32)));
    assert_timing!(elapsed, thresholds::CONNECTOR_HIT_10K, "connector hit over 10K nodes");
}

#[test]
fn test_box_select_10k() {
    let graph = generate_node_grid(SCALE_LARGE, 200.0);
    let everything = Rect::new(-10.0, -10.0, 100.0 * 200.0, 100.0 * 200.0);

    let start = Instant::now();
    let ids = nodes_in_selection_box(&everything, graph.nodes());
    let elapsed = start.elapsed();

    assert_eq!(ids.len(), SCALE_LARGE);
    assert_timing!(elapsed, thresholds::BOX_SELECT_10K, "box select over 10K nodes");
}

#[test]
fn test_sweep_across_1k_connections() {
    let editor = chain_editor(SCALE_SMALL);
    let right = SCALE_SMALL as f32 * 200.0;

    // Horizontal sweep above the nodes misses everything
    let start = Instant::now();
    editor.pointer_pressed(-50.0, 20.0, PointerEventButton::Right, false);
    editor.pointer_moved(right, 20.0);
    editor.pointer_released(right, 20.0, PointerEventButton::Right);
    let elapsed = start.elapsed();

    assert_eq!(editor.connection_count(), SCALE_SMALL - 1);
    assert_timing!(elapsed, thresholds::SWEEP_1K, "sweep across 1K connections");

    // Collinear with every link, so it cuts them all
    editor.pointer_pressed(-50.0, 130.0, PointerEventButton::Right, false);
    editor.pointer_moved(right, 130.0);
    editor.pointer_released(right, 130.0, PointerEventButton::Right);
    assert_eq!(editor.connection_count(), 0);
}

#[test]
fn test_group_drag_tick_1k() {
    let editor = chain_editor(SCALE_SMALL);
    let right = SCALE_SMALL as f32 * 200.0;
    editor.pointer_pressed(10.0, 50.0, PointerEventButton::Left, false);
    editor.pointer_moved(right, 200.0);
    editor.pointer_released(right, 200.0, PointerEventButton::Left);
    assert_eq!(editor.selected_ids().len(), SCALE_SMALL);

    editor.pointer_pressed(60.0, 130.0, PointerEventButton::Left, false);
    let start = Instant::now();
    editor.pointer_moved(60.0, 180.0);
    let elapsed = start.elapsed();
    editor.pointer_released(60.0, 180.0, PointerEventButton::Left);

    assert_eq!(editor.node(SCALE_SMALL as i32).unwrap().y, 150.0);
    let last = editor.connections().last().unwrap().line;
    assert_eq!(last.end.y, 180.0);
    assert_timing!(elapsed, thresholds::GROUP_DRAG_TICK_1K, "drag tick with 1K selected");
}

#[test]
fn test_scene_sync_1k() {
    let editor = chain_editor(SCALE_SMALL);
    let nodes: Rc<VecModel<i32>> = Rc::new(VecModel::default());
    let lines: Rc<VecModel<i32>> = Rc::new(VecModel::default());

    let start = Instant::now();
    editor.bind_nodes(nodes.clone(), |n| n.id);
    editor.bind_lines(lines.clone(), |l| l.id);
    let elapsed = start.elapsed();

    assert_eq!(nodes.row_count(), SCALE_SMALL);
    assert_eq!(lines.row_count(), SCALE_SMALL - 1);
    assert_timing!(elapsed, thresholds::SCENE_SYNC_1K, "scene sync of 1K nodes");
}

#[test]
fn test_selection_replace_10k() {
    let mut selection = SelectionManager::new();

    let start = Instant::now();
    selection.replace_selection(1..=SCALE_LARGE as i32);
    let elapsed = start.elapsed();

    assert_eq!(selection.len(), SCALE_LARGE);
    assert_timing!(elapsed, thresholds::SELECTION_REPLACE_10K, "replacing 10K selection");
}

#[test]
fn test_remove_node_with_many_connections() {
    let mut graph = Graph::new();
    let hub = graph.insert_node(GraphNode::new(1, "Hub", 0.0, 0.0)).unwrap();
    for i in 0..SCALE_SMALL as i32 {
        graph
            .insert_node(GraphNode::new(i + 2, "Leaf", 300.0, i as f32 * 80.0))
            .unwrap();
    }
    let mut connections = ConnectionManager::new();
    for i in 0..SCALE_SMALL as i32 {
        connections
            .complete_connection(ConnectorRef::output(hub), ConnectorRef::input(i + 2), &graph)
            .unwrap();
    }

    let removed = connections.remove_connections_for_node(hub);

    assert_eq!(removed.len(), SCALE_SMALL);
    assert!(connections.is_empty());
}
