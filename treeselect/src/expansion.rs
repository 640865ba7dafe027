//! Expansion state and behaviours.
//!
//! Expansion is purely a display concern. The persistent set is what the user
//! (or the caller) curated; the search set only exists while a filter is
//! active and is never merged into the persistent one, so clearing a search
//! restores the user's expansion exactly.

use std::collections::HashSet;

use crate::node::Node;
use crate::selection::SelectionMode;

/// Expanded node ids of one snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExpansionState {
    /// Persistent, user or caller controlled.
    pub expanded_ids: HashSet<String>,
    /// Transient, only used while searching.
    pub search_expanded_ids: HashSet<String>,
}

impl ExpansionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The set that drives display in the given mode.
    pub fn effective(&self, is_search_mode: bool) -> &HashSet<String> {
        if is_search_mode {
            &self.search_expanded_ids
        } else {
            &self.expanded_ids
        }
    }

    pub fn is_expanded(&self, id: &str, is_search_mode: bool) -> bool {
        self.effective(is_search_mode).contains(id)
    }
}

/// Expansion semantics of a tree mode.
pub trait ExpansionBehavior: std::fmt::Debug + Send + Sync {
    /// Install controlled ids into the set of the current mode.
    fn sync_expanded(
        &self,
        expanded_ids: &[String],
        is_search_mode: bool,
        state: &ExpansionState,
    ) -> ExpansionState {
        let mut next = state.clone();
        let ids = expanded_ids.iter().cloned().collect();
        if is_search_mode {
            next.search_expanded_ids = ids;
        } else {
            next.expanded_ids = ids;
        }
        next
    }

    /// Expand or collapse one node. Nodes that cannot expand are ignored.
    fn compute_expanded(
        &self,
        node: &Node,
        expand: bool,
        is_search_mode: bool,
        state: &ExpansionState,
    ) -> ExpansionState {
        if !node.is_expandable() {
            return state.clone();
        }

        let mut next = state.clone();
        let set = if is_search_mode {
            &mut next.search_expanded_ids
        } else {
            &mut next.expanded_ids
        };
        if expand {
            set.insert(node.id.clone());
        } else {
            set.remove(&node.id);
        }
        next
    }
}

/// Expansion for hierarchical tree-select.
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeExpansion;

impl ExpansionBehavior for TreeExpansion {}

/// Expansion for flat tree-select. Display nesting comes from the registry's
/// children links, which flat mode keeps, so the semantics are the same.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlatTreeExpansion;

impl ExpansionBehavior for FlatTreeExpansion {}

/// Pick the behaviour for a mode. List modes have no expansion.
pub fn expansion_behavior(mode: SelectionMode) -> Option<Box<dyn ExpansionBehavior>> {
    match mode {
        SelectionMode::TreeSelect => Some(Box::new(TreeExpansion)),
        SelectionMode::TreeSelectFlat => Some(Box::new(FlatTreeExpansion)),
        SelectionMode::MultiSelect | SelectionMode::Select => None,
    }
}
