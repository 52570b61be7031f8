use crate::node::NodeId;
use log::trace;
use slint::{Model, VecModel};
use std::collections::HashSet;

/// The set of currently selected nodes.
#[derive(Debug, Default, Clone)]
pub struct SelectionManager {
    selected: HashSet<NodeId>,
}

impl SelectionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `id` the only selected node.
    pub fn select(&mut self, id: NodeId) {
        self.selected.clear();
        self.selected.insert(id);
        trace!("selected node {}", id);
    }

    /// Add nodes to the selection without clearing it first.
    pub fn select_multiple<I>(&mut self, ids: I)
    where
        I: IntoIterator<Item = NodeId>,
    {
        self.selected.extend(ids);
        trace!("selection now holds {} nodes", self.selected.len());
    }

    /// Handle a click on a node based on interaction modifiers
    pub fn handle_interaction(&mut self, id: NodeId, shift_held: bool) {
        if shift_held {
            if !self.selected.remove(&id) {
                self.selected.insert(id);
            }
        } else {
            if self.selected.len() == 1 && self.selected.contains(&id) {
                return;
            }
            self.select(id);
        }
    }

    /// Clear the current selection
    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Replace the current selection with a new set of IDs
    pub fn replace_selection<I>(&mut self, ids: I)
    where
        I: IntoIterator<Item = NodeId>,
    {
        self.selected.clear();
        self.selected.extend(ids);
    }

    pub fn remove(&mut self, id: NodeId) -> bool {
        self.selected.remove(&id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.selected.contains(&id)
    }

    pub fn iter(&self) -> std::collections::hash_set::Iter<'_, NodeId> {
        self.selected.iter()
    }

    /// Selected ids in ascending order.
    pub fn sorted_ids(&self) -> Vec<NodeId> {
        let mut ids: Vec<NodeId> = self.selected.iter().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Sync the internal selection set to a Slint VecModel
    pub fn sync_to_model(&self, model: &VecModel<i32>) {
        while model.row_count() > 0 {
            model.remove(0);
        }
        for id in self.sorted_ids() {
            model.push(id);
        }
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }
}
