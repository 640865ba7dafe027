//! The tree select composition root.
//!
//! [`TreeSelect`] owns one registry snapshot together with the behaviours
//! picked for its mode, the selection and expansion states, the search
//! filter, the dropdown's virtual list, virtual focus and in-flight loads.
//! It is the only object callers mutate; every action computes a new state
//! from the previous one and reports what changed as [`TreeSelectEvent`]s.
//!
//! # Example
//!
//! ```
//! use treeselect::prelude::*;
//!
//! let data = vec![TreeNodeData::new("a", "A").children(vec![
//!     TreeNodeData::new("a1", "A1"),
//!     TreeNodeData::new("a2", "A2"),
//! ])];
//! let mut tree = TreeSelect::new(data, TreeSelectConfig::default(), TreeSelectProps::new());
//!
//! tree.select_node(Some("a"));
//! assert_eq!(tree.get_state().selected_ids, vec!["a", "a1", "a2"]);
//! ```

mod actions;
mod dropdown;
mod loading;
mod state;

use std::collections::HashSet;
use std::sync::Arc;

pub use state::{DisplayedNode, DropdownRow, TreeSelectEvent, TreeSelectState};

use crate::config::{TreeSelectConfig, TreeSelectProps};
use crate::expansion::{ExpansionBehavior, ExpansionState, expansion_behavior};
use crate::filter::{FilterResult, filter_tree};
use crate::focus::FocusTarget;
use crate::loader::{PendingLoads, TreeLoader};
use crate::node::{Node, TreeNodeData};
use crate::registry::NodeRegistry;
use crate::selection::{
    SelectionAggregateState, SelectionBehavior, SelectionMode, SelectionState, aggregate_state,
    selection_behavior,
};
use crate::virtual_list::{ScrollRequest, VirtualList};

/// Selection/expansion engine of one tree select instance.
pub struct TreeSelect {
    config: TreeSelectConfig,
    props: TreeSelectProps,
    /// Input forest, including everything merged in by loaders.
    data: Vec<TreeNodeData>,
    registry: NodeRegistry,
    selection_behavior: Box<dyn SelectionBehavior>,
    expansion_behavior: Option<Box<dyn ExpansionBehavior>>,
    selection: SelectionState,
    expansion: ExpansionState,
    input_value: String,
    filter: FilterResult,
    is_dropdown_open: bool,
    focus: Option<FocusTarget>,
    /// Flattened displayed nodes (rebuilt after every change).
    displayed: Vec<DisplayedNode>,
    dropdown_list: VirtualList,
    /// The dropdown currently shows a NoData/NoMatches row.
    placeholder_shown: bool,
    scroll_request: Option<ScrollRequest>,
    loader: Option<Arc<dyn TreeLoader>>,
    pending: PendingLoads,
    pages_loaded: usize,
    events: Vec<TreeSelectEvent>,
    dirty: bool,
}

impl std::fmt::Debug for TreeSelect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TreeSelect")
            .field("mode", &self.config.mode)
            .field("nodes", &self.registry.len())
            .field("selected", &self.selection.selected_ids.len())
            .field("input_value", &self.input_value)
            .field("is_dropdown_open", &self.is_dropdown_open)
            .field("focus", &self.focus)
            .field("pending_loads", &self.pending.len())
            .finish()
    }
}

impl TreeSelect {
    /// Create an instance. Defaults in `props` are read here and never again.
    pub fn new(data: Vec<TreeNodeData>, config: TreeSelectConfig, props: TreeSelectProps) -> Self {
        let mode = config.mode;
        let registry = NodeRegistry::build(&data, mode);
        let selection_behavior = selection_behavior(mode);
        let expansion_behavior = expansion_behavior(mode);

        let selected_seed = props
            .selected_ids
            .clone()
            .unwrap_or_else(|| props.default_selected_ids.clone());
        let selection = selection_behavior.sync_selected(&selected_seed, &registry);

        let expanded_seed = props
            .expanded_ids
            .clone()
            .unwrap_or_else(|| props.default_expanded_ids.clone());
        let expansion = expansion_behavior
            .as_ref()
            .map(|b| b.sync_expanded(&expanded_seed, false, &ExpansionState::new()))
            .unwrap_or_default();

        let is_dropdown_open = props
            .is_dropdown_open
            .unwrap_or(props.default_is_dropdown_open);
        let dropdown_list = VirtualList::new(config.dropdown, 0, 0);

        let mut tree = Self {
            config,
            props,
            data,
            registry,
            selection_behavior,
            expansion_behavior,
            selection,
            expansion,
            input_value: String::new(),
            filter: FilterResult::default(),
            is_dropdown_open,
            focus: None,
            displayed: Vec::new(),
            dropdown_list,
            placeholder_shown: false,
            scroll_request: None,
            loader: None,
            pending: PendingLoads::new(),
            pages_loaded: 0,
            events: Vec::new(),
            dirty: false,
        };
        tree.refresh();
        tree
    }

    /// Install a loader collaborator.
    pub fn with_loader(mut self, loader: impl TreeLoader + 'static) -> Self {
        self.loader = Some(Arc::new(loader));
        self
    }

    /// Install or replace the loader collaborator.
    pub fn set_loader(&mut self, loader: Arc<dyn TreeLoader>) {
        self.loader = Some(loader);
    }

    // -------------------------------------------------------------------------
    // Structural changes
    // -------------------------------------------------------------------------

    /// Replace the input forest. Rebuilds the snapshot and invalidates loads.
    pub fn set_data(&mut self, data: Vec<TreeNodeData>) {
        self.data = data;
        self.pending.reset();
        self.pages_loaded = 0;
        self.rebuild();
    }

    /// Switch the selection mode. Rebuilds the snapshot and invalidates loads.
    pub fn set_mode(&mut self, mode: SelectionMode) {
        if mode == self.config.mode {
            return;
        }
        log::debug!("TreeSelect mode {:?} -> {:?}", self.config.mode, mode);
        self.config.mode = mode;
        self.selection_behavior = selection_behavior(mode);
        self.expansion_behavior = expansion_behavior(mode);
        if self.expansion_behavior.is_none() {
            self.expansion = ExpansionState::new();
        }
        self.pending.reset();
        self.rebuild();
    }

    /// Rebuild the registry from `data` and resync both states.
    fn rebuild(&mut self) {
        let selected_seed = match &self.props.selected_ids {
            Some(ids) => ids.clone(),
            None => self.ordered(&self.selection.selected_ids),
        };
        self.registry = NodeRegistry::build(&self.data, self.config.mode);
        self.selection = self
            .selection_behavior
            .sync_selected(&selected_seed, &self.registry);

        if self.is_search_mode() {
            self.filter = filter_tree(&self.input_value, &self.registry);
            self.expansion
                .search_expanded_ids
                .extend(self.filter.search_expanded_ids.iter().cloned());
        }
        self.refresh();
    }

    // -------------------------------------------------------------------------
    // Controlled values
    // -------------------------------------------------------------------------

    /// Feed a selection from outside (the controlled value or a programmatic sync).
    pub fn set_selected_ids(&mut self, ids: Vec<String>) {
        self.selection = self.selection_behavior.sync_selected(&ids, &self.registry);
        if self.props.selected_ids.is_some() {
            self.props.selected_ids = Some(ids);
        }
        self.refresh();
    }

    /// Feed expanded ids from outside. While searching they populate the
    /// search set and leave the persistent set alone.
    pub fn set_expanded_ids(&mut self, ids: Vec<String>) {
        let Some(behavior) = &self.expansion_behavior else {
            return;
        };
        self.expansion = behavior.sync_expanded(&ids, self.is_search_mode(), &self.expansion);
        if self.props.expanded_ids.is_some() {
            self.props.expanded_ids = Some(ids);
        }
        self.refresh();
    }

    /// Feed the dropdown open state from outside.
    pub fn set_dropdown_open(&mut self, is_open: bool) {
        if self.props.is_dropdown_open.is_some() {
            self.props.is_dropdown_open = Some(is_open);
        }
        if self.is_dropdown_open != is_open {
            self.is_dropdown_open = is_open;
            self.refresh();
        }
    }

    fn is_selection_controlled(&self) -> bool {
        self.props.selected_ids.is_some()
    }

    fn is_expansion_controlled(&self) -> bool {
        self.props.expanded_ids.is_some()
    }

    fn is_dropdown_controlled(&self) -> bool {
        self.props.is_dropdown_open.is_some()
    }

    // -------------------------------------------------------------------------
    // Search
    // -------------------------------------------------------------------------

    /// Update the search input. Ignored unless the instance is searchable.
    ///
    /// A non-empty value enters search mode: nodes are filtered by label and
    /// ancestors of matches are expanded in the search set. Clearing the value
    /// drops the search set; the persistent expansion is untouched.
    pub fn set_input_value(&mut self, value: impl Into<String>) {
        if !self.config.is_searchable {
            return;
        }
        let value = value.into();
        if value == self.input_value {
            return;
        }
        self.input_value = value;

        if self.is_search_mode() {
            self.filter = filter_tree(&self.input_value, &self.registry);
            if let Some(behavior) = &self.expansion_behavior {
                self.expansion =
                    behavior.sync_expanded(&self.filter.search_expanded_ids, true, &self.expansion);
            }
            if !self.is_dropdown_open {
                self.open_dropdown();
            }
        } else {
            self.filter = FilterResult::default();
            self.expansion.search_expanded_ids.clear();
        }

        let scrolled = self.dropdown_list.scroll_top() != 0;
        self.dropdown_list.cancel_pending_scroll();
        self.dropdown_list.set_scroll_top(0);
        self.refresh();
        if scrolled {
            self.scroll_request = Some(ScrollRequest {
                index: self.top_item_count(),
                scroll_top: 0,
            });
        }
    }

    /// Whether a search filter is active.
    pub fn is_search_mode(&self) -> bool {
        self.config.is_searchable && !self.input_value.is_empty()
    }

    pub fn input_value(&self) -> &str {
        &self.input_value
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// Snapshot of the current state.
    pub fn get_state(&self) -> TreeSelectState {
        TreeSelectState {
            selected_ids: self.ordered(&self.selection.selected_ids),
            expanded_ids: self.ordered(self.expansion.effective(self.is_search_mode())),
            aggregate_state: self.aggregate_state(),
            input_value: self.input_value.clone(),
            is_dropdown_open: self.is_dropdown_open,
            focus_id: self.focus.clone(),
        }
    }

    /// Look up a node.
    pub fn get_by_id(&self, id: &str) -> Option<&Node> {
        self.registry.get(id)
    }

    pub fn config(&self) -> &TreeSelectConfig {
        &self.config
    }

    pub fn mode(&self) -> SelectionMode {
        self.config.mode
    }

    pub fn registry(&self) -> &NodeRegistry {
        &self.registry
    }

    pub fn data(&self) -> &[TreeNodeData] {
        &self.data
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn expansion(&self) -> &ExpansionState {
        &self.expansion
    }

    pub fn aggregate_state(&self) -> SelectionAggregateState {
        aggregate_state(&self.selection, &self.registry, self.config.mode)
    }

    pub fn is_dropdown_open(&self) -> bool {
        self.is_dropdown_open
    }

    pub fn focus_id(&self) -> Option<&FocusTarget> {
        self.focus.as_ref()
    }

    /// Nodes in display order.
    pub fn displayed_nodes(&self) -> &[DisplayedNode] {
        &self.displayed
    }

    /// Take every event emitted since the last call.
    pub fn drain_events(&mut self) -> Vec<TreeSelectEvent> {
        std::mem::take(&mut self.events)
    }

    // -------------------------------------------------------------------------
    // Dirty tracking
    // -------------------------------------------------------------------------

    /// Check if anything changed since the last render.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clear the dirty flag.
    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    /// Ids of `set` in depth-first order; ids unknown to the registry are dropped.
    fn ordered(&self, set: &HashSet<String>) -> Vec<String> {
        self.registry
            .ids()
            .iter()
            .filter(|id| set.contains(*id))
            .cloned()
            .collect()
    }

    fn emit(&mut self, event: TreeSelectEvent) {
        log::trace!("TreeSelect event: {:?}", event);
        self.events.push(event);
    }

    /// Recompute everything derived from the states.
    fn refresh(&mut self) {
        let search = self.is_search_mode();
        let mut displayed = Vec::new();
        self.collect_displayed(self.registry.roots(), search, &mut displayed);
        self.displayed = displayed;

        self.sync_dropdown_list();
        let focus_lost = self
            .focus
            .as_ref()
            .is_some_and(|f| !self.focusable(f.region()).contains(f));
        if focus_lost {
            self.focus = None;
        }
        self.dirty = true;
    }

    fn collect_displayed(&self, ids: &[String], search: bool, out: &mut Vec<DisplayedNode>) {
        for id in ids {
            let Some(node) = self.registry.get(id) else {
                continue;
            };
            if search && !self.filter.is_visible(id) {
                continue;
            }
            let is_expanded = node.is_expandable() && self.expansion.is_expanded(id, search);
            out.push(DisplayedNode {
                id: node.id.clone(),
                depth: node.depth,
                is_expanded,
            });
            if is_expanded {
                self.collect_displayed(&node.children_ids, search, out);
            }
        }
    }
}
