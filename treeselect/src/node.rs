//! Input records and registry nodes.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// One record of the input forest.
///
/// This is what callers hand to the engine (directly or as JSON). Ids must be
/// unique across the whole forest; duplicates are a caller error and the
/// resulting behaviour is undefined.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeNodeData {
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub children: Vec<TreeNodeData>,
    #[serde(default)]
    pub disabled: bool,
    /// Children exist but have not been loaded yet.
    #[serde(default)]
    pub has_children: bool,
    #[serde(default)]
    pub skip_dropdown_virtual_focus: bool,
}

impl TreeNodeData {
    /// Create a record with an id and label.
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            ..Default::default()
        }
    }

    /// Set the children.
    pub fn children(mut self, children: Vec<TreeNodeData>) -> Self {
        self.children = children;
        self
    }

    /// Mark the record as disabled.
    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    /// Mark the record as having children that are loaded on demand.
    pub fn has_children(mut self) -> Self {
        self.has_children = true;
        self
    }

    /// Exclude the record from dropdown virtual focus.
    pub fn skip_dropdown_virtual_focus(mut self) -> Self {
        self.skip_dropdown_virtual_focus = true;
        self
    }

    /// Parse a forest from JSON.
    pub fn forest_from_json(json: &str) -> Result<Vec<TreeNodeData>> {
        Ok(serde_json::from_str(json)?)
    }
}

/// A node of one registry snapshot.
///
/// Nodes never own each other: relations are ids resolved through the
/// [`NodeRegistry`](crate::registry::NodeRegistry). They are immutable once
/// built; selection and expansion state lives beside them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub id: String,
    pub label: String,
    /// Selection parent. Always `None` for flat tree-select.
    pub parent_id: Option<String>,
    /// Display children, in input order.
    pub children_ids: Vec<String>,
    /// Depth in the display tree (0 = root).
    pub depth: usize,
    pub disabled: bool,
    pub has_children: bool,
    pub skip_dropdown_virtual_focus: bool,
}

impl Node {
    /// Whether the node can be expanded (loaded or not-yet-loaded children).
    pub fn is_expandable(&self) -> bool {
        !self.children_ids.is_empty() || self.has_children
    }

    /// Whether the node has no loaded children.
    pub fn is_leaf(&self) -> bool {
        self.children_ids.is_empty()
    }

    /// Whether the children still have to be fetched.
    pub fn needs_children(&self) -> bool {
        self.has_children && self.children_ids.is_empty()
    }
}
