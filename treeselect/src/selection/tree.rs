//! Hierarchical tree-select.

use std::collections::HashSet;

use crate::node::Node;
use crate::registry::NodeRegistry;

use super::{SelectionBehavior, SelectionState, known_ids};

/// Hierarchical selection.
///
/// Selecting a node selects its enabled descendants. After every change the
/// affected root is recomputed bottom-up: an internal node is selected iff all
/// of its children are, effectively selected iff all of its children are
/// effectively selected, and partially selected when it is enabled, not
/// selected and has some selected descendant. A disabled leaf is always
/// effectively selected.
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeSelection;

/// Result of recomputing one node.
#[derive(Debug, Clone, Copy)]
struct Recomputed {
    selected: bool,
    effective: bool,
    /// The node or any of its descendants is selected.
    any_selected: bool,
}

impl TreeSelection {
    /// Set the membership of a node and its enabled descendants.
    ///
    /// Disabled nodes keep their own membership but are walked through, so
    /// enabled nodes below them follow the toggle.
    fn set_subtree(
        node: &Node,
        select: bool,
        selected_ids: &mut HashSet<String>,
        registry: &NodeRegistry,
    ) {
        if !node.disabled {
            if select {
                selected_ids.insert(node.id.clone());
            } else {
                selected_ids.remove(&node.id);
            }
        }
        for child in registry.children(&node.id) {
            Self::set_subtree(child, select, selected_ids, registry);
        }
    }

    /// Post-order recompute of the subtree rooted at `id`.
    fn recompute(id: &str, state: &mut SelectionState, registry: &NodeRegistry) -> Recomputed {
        let Some(node) = registry.get(id) else {
            return Recomputed {
                selected: false,
                effective: false,
                any_selected: false,
            };
        };

        state.effectively_selected_ids.remove(id);
        state.partially_selected_ids.remove(id);
        state.some_descendant_selected_ids.remove(id);

        if node.is_leaf() {
            let selected = state.selected_ids.contains(id);
            let effective = selected || node.disabled;
            if effective {
                state.effectively_selected_ids.insert(node.id.clone());
            }
            return Recomputed {
                selected,
                effective,
                any_selected: selected,
            };
        }

        let mut all_selected = true;
        let mut all_effective = true;
        let mut some_descendant = false;
        for child_id in &node.children_ids {
            let child = Self::recompute(child_id, state, registry);
            all_selected &= child.selected;
            all_effective &= child.effective;
            some_descendant |= child.any_selected;
        }

        if all_selected {
            state.selected_ids.insert(node.id.clone());
        } else {
            state.selected_ids.remove(id);
        }
        if all_effective {
            state.effectively_selected_ids.insert(node.id.clone());
        }
        if some_descendant {
            state.some_descendant_selected_ids.insert(node.id.clone());
            if !node.disabled && !all_selected {
                state.partially_selected_ids.insert(node.id.clone());
            }
        }

        Recomputed {
            selected: all_selected,
            effective: all_effective,
            any_selected: all_selected || some_descendant,
        }
    }

    fn recompute_all(state: &mut SelectionState, registry: &NodeRegistry) {
        for root in registry.roots() {
            Self::recompute(root, state, registry);
        }
    }
}

impl SelectionBehavior for TreeSelection {
    fn sync_selected(&self, selected_ids: &[String], registry: &NodeRegistry) -> SelectionState {
        let mut state = SelectionState::new();
        for id in known_ids(selected_ids, registry) {
            let Some(node) = registry.get(id) else {
                continue;
            };
            // Ids fed from outside are honoured even for disabled nodes.
            state.selected_ids.insert(node.id.clone());
            Self::set_subtree(node, true, &mut state.selected_ids, registry);
        }
        Self::recompute_all(&mut state, registry);
        state
    }

    fn compute_selected(
        &self,
        node: &Node,
        select: bool,
        state: &SelectionState,
        registry: &NodeRegistry,
    ) -> SelectionState {
        if node.disabled {
            return state.clone();
        }

        let mut next = state.clone();
        Self::set_subtree(node, select, &mut next.selected_ids, registry);
        let root = registry.root_of(&node.id);
        Self::recompute(root, &mut next, registry);
        log::trace!(
            "TreeSelection: {} '{}' (root '{}'), {} selected",
            if select { "select" } else { "deselect" },
            node.id,
            root,
            next.selected_ids.len()
        );
        next
    }

    fn compute_all_selected(
        &self,
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
        Self::recompute_all(&mut next, registry);
        next
    }
}
