//! Snapshot, event and row types of the composition root.

use crate::focus::FocusTarget;
use crate::node::Node;
use crate::selection::SelectionAggregateState;

/// Snapshot returned by [`TreeSelect::get_state`](super::TreeSelect::get_state).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeSelectState {
    /// Selected ids in depth-first order.
    pub selected_ids: Vec<String>,
    /// Ids currently driving display (search expansion while searching).
    pub expanded_ids: Vec<String>,
    pub aggregate_state: SelectionAggregateState,
    pub input_value: String,
    pub is_dropdown_open: bool,
    pub focus_id: Option<FocusTarget>,
}

/// Outgoing notifications, drained with
/// [`TreeSelect::drain_events`](super::TreeSelect::drain_events).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeSelectEvent {
    /// A node's selection changed.
    NodeChange {
        node: Node,
        selected_ids: Vec<String>,
    },
    /// A node was expanded or collapsed.
    NodeToggle {
        node: Node,
        expanded_ids: Vec<String>,
    },
    /// The field's clear-all control was used.
    ClearAll {
        selected_ids: Vec<String>,
        aggregate_state: SelectionAggregateState,
    },
    /// Everything was selected or deselected at once.
    SelectAllChange {
        selected_ids: Vec<String>,
        aggregate_state: SelectionAggregateState,
    },
    DropdownToggle {
        is_open: bool,
    },
    /// The dropdown rendered its last row; the hook for pagination.
    DropdownLastItemReached {
        input_value: String,
        displayed_nodes: Vec<Node>,
    },
}

/// A node as currently displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayedNode {
    pub id: String,
    pub depth: usize,
    pub is_expanded: bool,
}

/// One row of the dropdown list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropdownRow {
    /// Pinned search input.
    Input,
    /// Pinned "select all" row.
    SelectAll,
    Node(DisplayedNode),
    /// Placeholder for an empty forest.
    NoData,
    /// Placeholder for a search without results.
    NoMatches,
}

impl DropdownRow {
    /// Whether the row is pinned outside virtualization.
    pub fn is_sticky(&self) -> bool {
        matches!(self, Self::Input | Self::SelectAll)
    }

    pub fn focus_target(&self) -> Option<FocusTarget> {
        match self {
            Self::Input => Some(FocusTarget::DropdownInput),
            Self::SelectAll => Some(FocusTarget::SelectAll),
            Self::Node(node) => Some(FocusTarget::Node(node.id.clone())),
            Self::NoData | Self::NoMatches => None,
        }
    }
}
