//! Imperative actions: selection, expansion and the dropdown.
//!
//! Id-addressed actions are silent no-ops when the id is unknown, when the
//! action does not apply to the mode, or when the node is disabled. `None`
//! addresses the node holding virtual focus; with focus on the select-all row
//! node selection actions apply to every node.

use crate::focus::FocusTarget;
use crate::loader::LoadKey;
use crate::selection::{SelectionMode, SelectionState, aggregate_state};

use super::{TreeSelect, TreeSelectEvent};

impl TreeSelect {
    // -------------------------------------------------------------------------
    // Node selection
    // -------------------------------------------------------------------------

    pub fn select_node(&mut self, id: Option<&str>) {
        self.change_node_selection(id, Some(true));
    }

    pub fn deselect_node(&mut self, id: Option<&str>) {
        self.change_node_selection(id, Some(false));
    }

    pub fn toggle_node_selection(&mut self, id: Option<&str>) {
        self.change_node_selection(id, None);
    }

    fn change_node_selection(&mut self, id: Option<&str>, select: Option<bool>) {
        if id.is_none() && self.focus == Some(FocusTarget::SelectAll) {
            match select {
                Some(true) => self.select_all(),
                Some(false) => self.deselect_all(),
                None => self.toggle_all_selection(),
            }
            return;
        }
        let Some(id) = id.map(str::to_string).or_else(|| self.focused_node_id()) else {
            return;
        };
        let Some(node) = self.registry.get(&id) else {
            return;
        };
        let select = select.unwrap_or_else(|| !self.selection.is_selected(&id));

        let next =
            self.selection_behavior
                .compute_selected(node, select, &self.selection, &self.registry);
        if next == self.selection {
            return;
        }

        let node = node.clone();
        let selected_ids = self.ordered(&next.selected_ids);
        self.emit(TreeSelectEvent::NodeChange { node, selected_ids });
        self.adopt_selection(next);

        if self.config.close_dropdown_on_node_change {
            self.close_dropdown();
        }
    }

    fn adopt_selection(&mut self, next: SelectionState) {
        if self.is_selection_controlled() {
            return;
        }
        self.selection = next;
        self.refresh();
    }

    // -------------------------------------------------------------------------
    // Bulk selection
    // -------------------------------------------------------------------------

    /// Select every enabled node.
    pub fn select_all(&mut self) {
        self.change_all_selection(true);
    }

    /// Deselect every enabled node.
    pub fn deselect_all(&mut self) {
        self.change_all_selection(false);
    }

    /// Deselect when everything is (effectively) selected, select otherwise.
    pub fn toggle_all_selection(&mut self) {
        let select = !self.aggregate_state().is_all();
        self.change_all_selection(select);
    }

    fn change_all_selection(&mut self, select: bool) {
        if !self.config.mode.is_multi() {
            return;
        }
        let next = self
            .selection_behavior
            .compute_all_selected(select, &self.selection, &self.registry);
        if next == self.selection {
            return;
        }

        let selected_ids = self.ordered(&next.selected_ids);
        let aggregate_state = aggregate_state(&next, &self.registry, self.config.mode);
        self.emit(TreeSelectEvent::SelectAllChange {
            selected_ids,
            aggregate_state,
        });
        self.adopt_selection(next);
    }

    /// Clear the selection from the field's clear-all control.
    ///
    /// Disabled nodes keep their selection; a locked single selection stays.
    pub fn clear_all(&mut self) {
        let next = match self.config.mode {
            SelectionMode::Select => {
                let selected = self.ordered(&self.selection.selected_ids);
                match selected.first().and_then(|id| self.registry.get(id)) {
                    Some(node) => self.selection_behavior.compute_selected(
                        node,
                        false,
                        &self.selection,
                        &self.registry,
                    ),
                    None => return,
                }
            }
            _ => self
                .selection_behavior
                .compute_all_selected(false, &self.selection, &self.registry),
        };
        if next == self.selection {
            return;
        }

        let selected_ids = self.ordered(&next.selected_ids);
        let aggregate_state = aggregate_state(&next, &self.registry, self.config.mode);
        self.emit(TreeSelectEvent::ClearAll {
            selected_ids,
            aggregate_state,
        });
        self.adopt_selection(next);
    }

    // -------------------------------------------------------------------------
    // Expansion
    // -------------------------------------------------------------------------

    pub fn expand_node(&mut self, id: Option<&str>) {
        self.change_node_expansion(id, Some(true));
    }

    pub fn collapse_node(&mut self, id: Option<&str>) {
        self.change_node_expansion(id, Some(false));
    }

    pub fn toggle_node_expansion(&mut self, id: Option<&str>) {
        self.change_node_expansion(id, None);
    }

    fn change_node_expansion(&mut self, id: Option<&str>, expand: Option<bool>) {
        let Some(behavior) = &self.expansion_behavior else {
            return;
        };
        let Some(id) = id.map(str::to_string).or_else(|| self.focused_node_id()) else {
            return;
        };
        let Some(node) = self.registry.get(&id) else {
            return;
        };
        let search = self.is_search_mode();
        let expand = expand.unwrap_or_else(|| !self.expansion.is_expanded(&id, search));

        let next = behavior.compute_expanded(node, expand, search, &self.expansion);
        if next == self.expansion {
            return;
        }

        let node = node.clone();
        if expand && node.needs_children() && self.loader.is_some() {
            log::debug!("Queueing children load for '{}'", node.id);
            self.pending.enqueue(LoadKey::Children(node.id.clone()));
        }

        let expanded_ids = self.ordered(next.effective(search));
        self.emit(TreeSelectEvent::NodeToggle { node, expanded_ids });
        if !self.is_expansion_controlled() {
            self.expansion = next;
            self.refresh();
        }
    }

    // -------------------------------------------------------------------------
    // Dropdown
    // -------------------------------------------------------------------------

    pub fn open_dropdown(&mut self) {
        self.change_dropdown(true);
    }

    pub fn close_dropdown(&mut self) {
        self.change_dropdown(false);
    }

    pub fn toggle_dropdown(&mut self) {
        self.change_dropdown(!self.is_dropdown_open);
    }

    fn change_dropdown(&mut self, is_open: bool) {
        if is_open == self.is_dropdown_open {
            return;
        }
        self.emit(TreeSelectEvent::DropdownToggle { is_open });
        if self.is_dropdown_controlled() {
            return;
        }
        self.is_dropdown_open = is_open;
        if !is_open {
            self.dropdown_list.cancel_pending_scroll();
        }
        self.refresh();
    }
}
