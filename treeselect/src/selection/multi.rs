//! Multi-select: every node toggles on its own.

use crate::node::Node;
use crate::registry::NodeRegistry;

use super::{SelectionBehavior, SelectionState, known_ids};

/// Independent multi selection. `effectively_selected_ids` mirrors `selected_ids`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MultiSelection;

impl SelectionBehavior for MultiSelection {
    fn sync_selected(&self, selected_ids: &[String], registry: &NodeRegistry) -> SelectionState {
        sync_independent(selected_ids, registry)
    }

    fn compute_selected(
        &self,
        node: &Node,
        select: bool,
        state: &SelectionState,
        _registry: &NodeRegistry,
    ) -> SelectionState {
        toggle_independent(node, select, state)
    }

    fn compute_all_selected(
        &self,
        select: bool,
        state: &SelectionState,
        registry: &NodeRegistry,
    ) -> SelectionState {
        all_independent(select, state, registry)
    }
}

/// Build a non-propagating selection from ids.
pub(super) fn sync_independent(selected_ids: &[String], registry: &NodeRegistry) -> SelectionState {
    let selected_ids: std::collections::HashSet<String> =
        known_ids(selected_ids, registry).cloned().collect();
    SelectionState {
        effectively_selected_ids: selected_ids.clone(),
        selected_ids,
        ..Default::default()
    }
}

/// Flip one node without touching any other.
pub(super) fn toggle_independent(
    node: &Node,
    select: bool,
    state: &SelectionState,
) -> SelectionState {
    if node.disabled {
        return state.clone();
    }

    let mut next = state.clone();
    if select {
        next.selected_ids.insert(node.id.clone());
        next.effectively_selected_ids.insert(node.id.clone());
    } else {
        next.selected_ids.remove(&node.id);
        next.effectively_selected_ids.remove(&node.id);
    }
    next
}

/// Select or deselect every enabled node; disabled nodes keep their status.
pub(super) fn all_independent(
    select: bool,
    state: &SelectionState,
    registry: &NodeRegistry,
) -> SelectionState {
    let mut next = state.clone();
    for node in registry.iter().filter(|n| !n.disabled) {
        if select {
            next.selected_ids.insert(node.id.clone());
        } else {
            next.selected_ids.remove(&node.id);
        }
    }
    next.effectively_selected_ids = next.selected_ids.clone();
    next
}
