//! Flat tree-select: nested display, multi-select semantics.

use crate::node::Node;
use crate::registry::NodeRegistry;

use super::multi::{all_independent, sync_independent, toggle_independent};
use super::{SelectionBehavior, SelectionState};

/// Selection for nested data where a parent and its children are selected
/// independently. The registry registers these nodes without a selection
/// parent, so nothing propagates; display nesting is unaffected.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlatTreeSelection;

impl SelectionBehavior for FlatTreeSelection {
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
