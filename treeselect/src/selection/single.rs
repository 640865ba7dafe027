//! Single-select.

use std::collections::HashSet;

use crate::node::Node;
use crate::registry::NodeRegistry;

use super::{SelectionBehavior, SelectionState, known_ids};

/// At most one selected node.
///
/// When every currently selected node is disabled the selection is locked:
/// neither selecting another node nor deselecting changes it.
#[derive(Debug, Clone, Copy, Default)]
pub struct SingleSelection;

impl SingleSelection {
    fn is_locked(state: &SelectionState, registry: &NodeRegistry) -> bool {
        !state.selected_ids.is_empty()
            && state
                .selected_ids
                .iter()
                .all(|id| registry.get(id).is_some_and(|n| n.disabled))
    }

    fn only(id: Option<&String>) -> SelectionState {
        let selected_ids: HashSet<String> = id.into_iter().cloned().collect();
        SelectionState {
            effectively_selected_ids: selected_ids.clone(),
            selected_ids,
            ..Default::default()
        }
    }
}

impl SelectionBehavior for SingleSelection {
    fn sync_selected(&self, selected_ids: &[String], registry: &NodeRegistry) -> SelectionState {
        Self::only(known_ids(selected_ids, registry).next())
    }

    fn compute_selected(
        &self,
        node: &Node,
        select: bool,
        state: &SelectionState,
        registry: &NodeRegistry,
    ) -> SelectionState {
        if node.disabled || Self::is_locked(state, registry) {
            return state.clone();
        }

        if select {
            Self::only(Some(&node.id))
        } else if state.is_selected(&node.id) {
            Self::only(None)
        } else {
            state.clone()
        }
    }

    fn compute_all_selected(
        &self,
        _select: bool,
        state: &SelectionState,
        _registry: &NodeRegistry,
    ) -> SelectionState {
        state.clone()
    }
}
