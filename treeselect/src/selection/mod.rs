//! Selection state and the selection behaviours.
//!
//! Each [`SelectionMode`] maps to one [`SelectionBehavior`], chosen once per
//! registry snapshot. Behaviours are pure: they take the previous
//! [`SelectionState`] and return a new one.

mod flat;
mod multi;
mod single;
mod tree;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::node::Node;
use crate::registry::NodeRegistry;

pub use flat::FlatTreeSelection;
pub use multi::MultiSelection;
pub use single::SingleSelection;
pub use tree::TreeSelection;

/// How selection propagates through the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SelectionMode {
    /// Hierarchical tree selection (parents follow their children).
    #[default]
    TreeSelect,
    /// Nested display, independent selection per node.
    TreeSelectFlat,
    /// Flat list, any number of items.
    MultiSelect,
    /// Flat list, at most one item.
    Select,
}

impl SelectionMode {
    /// Whether nodes are displayed nested (and can expand).
    pub fn is_tree(self) -> bool {
        matches!(self, Self::TreeSelect | Self::TreeSelectFlat)
    }

    /// Whether more than one node can be selected.
    pub fn is_multi(self) -> bool {
        !matches!(self, Self::Select)
    }
}

/// Selection aggregate across the whole forest, driving a "select all" control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SelectionAggregateState {
    /// Everything is selected.
    All,
    /// Everything is selected or disabled.
    EffectiveAll,
    /// Some nodes are selected.
    Partial,
    /// Nothing is selected.
    #[default]
    None,
}

impl SelectionAggregateState {
    /// Whether a "select all" toggle should now deselect.
    pub fn is_all(self) -> bool {
        matches!(self, Self::All | Self::EffectiveAll)
    }
}

/// Node-id sets describing the selection of one snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectionState {
    pub selected_ids: HashSet<String>,
    /// Selected, disabled leaf, or internal node whose children are all effectively selected.
    pub effectively_selected_ids: HashSet<String>,
    /// Non-disabled internal nodes with some but not all descendants selected.
    pub partially_selected_ids: HashSet<String>,
    /// Internal bookkeeping: nodes with at least one selected descendant.
    pub some_descendant_selected_ids: HashSet<String>,
}

impl SelectionState {
    /// Create an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected_ids.contains(id)
    }

    pub fn is_effectively_selected(&self, id: &str) -> bool {
        self.effectively_selected_ids.contains(id)
    }

    pub fn is_partially_selected(&self, id: &str) -> bool {
        self.partially_selected_ids.contains(id)
    }
}

/// Selection semantics of one mode.
pub trait SelectionBehavior: std::fmt::Debug + Send + Sync {
    /// Recompute the full state from an externally supplied set of ids.
    ///
    /// Unknown ids are dropped. Pure and idempotent.
    fn sync_selected(&self, selected_ids: &[String], registry: &NodeRegistry) -> SelectionState;

    /// Select or deselect one node. Disabled nodes leave the state unchanged.
    fn compute_selected(
        &self,
        node: &Node,
        select: bool,
        state: &SelectionState,
        registry: &NodeRegistry,
    ) -> SelectionState;

    /// Select or deselect every non-disabled node.
    fn compute_all_selected(
        &self,
        select: bool,
        state: &SelectionState,
        registry: &NodeRegistry,
    ) -> SelectionState;
}

/// Pick the behaviour for a mode.
pub fn selection_behavior(mode: SelectionMode) -> Box<dyn SelectionBehavior> {
    match mode {
        SelectionMode::TreeSelect => Box::new(TreeSelection),
        SelectionMode::TreeSelectFlat => Box::new(FlatTreeSelection),
        SelectionMode::MultiSelect => Box::new(MultiSelection),
        SelectionMode::Select => Box::new(SingleSelection),
    }
}

/// Summarise a selection over the forest.
pub fn aggregate_state(
    state: &SelectionState,
    registry: &NodeRegistry,
    mode: SelectionMode,
) -> SelectionAggregateState {
    if state.selected_ids.is_empty() || registry.is_empty() {
        return SelectionAggregateState::None;
    }

    let (all, effective_all) = match mode {
        SelectionMode::TreeSelect => {
            let roots = registry.roots();
            (
                roots.iter().all(|id| state.is_selected(id)),
                roots.iter().all(|id| state.is_effectively_selected(id)),
            )
        }
        _ => (
            registry.iter().all(|n| state.is_selected(&n.id)),
            registry
                .iter()
                .all(|n| n.disabled || state.is_selected(&n.id)),
        ),
    };

    if all {
        SelectionAggregateState::All
    } else if effective_all {
        SelectionAggregateState::EffectiveAll
    } else {
        SelectionAggregateState::Partial
    }
}

/// Keep only ids the registry knows, preserving input order.
fn known_ids<'a>(
    selected_ids: &'a [String],
    registry: &'a NodeRegistry,
) -> impl Iterator<Item = &'a String> {
    selected_ids.iter().filter(|id| registry.contains(id))
}
