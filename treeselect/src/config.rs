//! Configuration and controlled/uncontrolled inputs.

use serde::{Deserialize, Serialize};

use crate::selection::SelectionMode;

/// Behaviour of a tree select instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TreeSelectConfig {
    /// Selection semantics.
    pub mode: SelectionMode,
    /// Typing filters the nodes.
    pub is_searchable: bool,
    /// Show a pinned "select all" row (multi modes only).
    pub with_select_all: bool,
    /// Offer a clear-all control in the field.
    pub with_clear_all: bool,
    /// Show the search input as a pinned dropdown row instead of in the field.
    pub with_dropdown_input: bool,
    /// Close the dropdown after a node's selection changes.
    pub close_dropdown_on_node_change: bool,
    /// Dropdown virtualization.
    pub dropdown: VirtualListConfig,
}

impl Default for TreeSelectConfig {
    fn default() -> Self {
        Self {
            mode: SelectionMode::TreeSelect,
            is_searchable: true,
            with_select_all: false,
            with_clear_all: true,
            with_dropdown_input: false,
            close_dropdown_on_node_change: false,
            dropdown: VirtualListConfig::default(),
        }
    }
}

impl TreeSelectConfig {
    /// Create a config for the given mode.
    pub fn new(mode: SelectionMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    pub fn searchable(mut self, is_searchable: bool) -> Self {
        self.is_searchable = is_searchable;
        self
    }

    pub fn with_select_all(mut self) -> Self {
        self.with_select_all = true;
        self
    }

    pub fn with_clear_all(mut self, with_clear_all: bool) -> Self {
        self.with_clear_all = with_clear_all;
        self
    }

    pub fn with_dropdown_input(mut self) -> Self {
        self.with_dropdown_input = true;
        self
    }

    pub fn close_dropdown_on_node_change(mut self) -> Self {
        self.close_dropdown_on_node_change = true;
        self
    }

    pub fn dropdown(mut self, dropdown: VirtualListConfig) -> Self {
        self.dropdown = dropdown;
        self
    }
}

/// Virtualized list settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VirtualListConfig {
    /// Viewport height.
    pub height: u32,
    /// Height assumed for items that have not been measured.
    pub item_height_estimate: u32,
    /// Extra items rendered on each side of the viewport.
    pub overscan: usize,
    /// When false every item is rendered.
    pub is_virtualized: bool,
}

impl Default for VirtualListConfig {
    fn default() -> Self {
        Self {
            height: 300,
            item_height_estimate: 32,
            overscan: 2,
            is_virtualized: true,
        }
    }
}

impl VirtualListConfig {
    pub fn new(height: u32, item_height_estimate: u32) -> Self {
        Self {
            height,
            item_height_estimate,
            ..Default::default()
        }
    }

    pub fn overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self
    }

    pub fn virtualized(mut self, is_virtualized: bool) -> Self {
        self.is_virtualized = is_virtualized;
        self
    }
}

/// Controlled values and one-shot defaults.
///
/// A `Some` value makes that piece of state controlled: the engine reports
/// changes as events but only adopts them once the caller feeds the new value
/// back. Defaults are read once, at construction, for uncontrolled state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeSelectProps {
    pub selected_ids: Option<Vec<String>>,
    pub expanded_ids: Option<Vec<String>>,
    pub is_dropdown_open: Option<bool>,
    pub default_selected_ids: Vec<String>,
    pub default_expanded_ids: Vec<String>,
    pub default_is_dropdown_open: bool,
}

impl TreeSelectProps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected_ids = Some(ids.into_iter().map(Into::into).collect());
        self
    }

    pub fn expanded_ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.expanded_ids = Some(ids.into_iter().map(Into::into).collect());
        self
    }

    pub fn dropdown_open(mut self, is_open: bool) -> Self {
        self.is_dropdown_open = Some(is_open);
        self
    }

    pub fn default_selected_ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.default_selected_ids = ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn default_expanded_ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.default_expanded_ids = ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn default_dropdown_open(mut self, is_open: bool) -> Self {
        self.default_is_dropdown_open = is_open;
        self
    }
}
