//! Dropdown rows, field chips, virtual focus and dropdown virtualization.

use crate::focus::{FocusMove, FocusRegion, FocusTarget, step};
use crate::node::Node;
use crate::selection::SelectionMode;
use crate::virtual_list::{ScrollRequest, VisibleWindow};

use super::{DropdownRow, TreeSelect, TreeSelectEvent};

impl TreeSelect {
    // -------------------------------------------------------------------------
    // Rows
    // -------------------------------------------------------------------------

    fn has_dropdown_input(&self) -> bool {
        self.config.is_searchable && self.config.with_dropdown_input
    }

    fn has_select_all(&self) -> bool {
        self.config.with_select_all
            && self.config.mode.is_multi()
            && !self.is_search_mode()
            && !self.displayed.is_empty()
    }

    /// Number of pinned rows at the top of the dropdown (0, 1 or 2).
    pub fn top_item_count(&self) -> usize {
        usize::from(self.has_dropdown_input()) + usize::from(self.has_select_all())
    }

    /// Every dropdown row in order: pinned rows, then nodes or a placeholder.
    pub fn dropdown_rows(&self) -> Vec<DropdownRow> {
        let mut rows = Vec::with_capacity(self.displayed.len() + 2);
        if self.has_dropdown_input() {
            rows.push(DropdownRow::Input);
        }
        if self.has_select_all() {
            rows.push(DropdownRow::SelectAll);
        }
        if self.displayed.is_empty() {
            rows.push(if self.is_search_mode() {
                DropdownRow::NoMatches
            } else {
                DropdownRow::NoData
            });
        } else {
            rows.extend(self.displayed.iter().cloned().map(DropdownRow::Node));
        }
        rows
    }

    /// Row at a dropdown index.
    pub fn dropdown_row(&self, index: usize) -> Option<DropdownRow> {
        self.dropdown_rows().into_iter().nth(index)
    }

    fn row_index_of(&self, target: &FocusTarget) -> Option<usize> {
        self.dropdown_rows()
            .iter()
            .position(|row| row.focus_target().as_ref() == Some(target))
    }

    pub(super) fn sync_dropdown_list(&mut self) {
        let total = self.dropdown_rows().len();
        self.dropdown_list.set_top_item_count(self.top_item_count());
        self.dropdown_list.set_total_count(total);

        let placeholder = self.displayed.is_empty();
        if self.placeholder_shown && !placeholder {
            log::trace!("Dropdown placeholder replaced by nodes, resetting row heights");
            if let Some(request) = self.dropdown_list.reset_measurements() {
                self.scroll_request = Some(request);
            }
        }
        self.placeholder_shown = placeholder;
    }

    // -------------------------------------------------------------------------
    // Chips
    // -------------------------------------------------------------------------

    /// Selected nodes shown in the field, in depth-first order.
    ///
    /// In hierarchical mode a node whose parent is selected is covered by the
    /// parent's chip.
    pub fn chips(&self) -> Vec<&Node> {
        self.registry
            .iter()
            .filter(|node| self.selection.is_selected(&node.id))
            .filter(|node| {
                self.config.mode != SelectionMode::TreeSelect
                    || node
                        .parent_id
                        .as_deref()
                        .is_none_or(|parent| !self.selection.is_selected(parent))
            })
            .collect()
    }

    // -------------------------------------------------------------------------
    // Virtual focus
    // -------------------------------------------------------------------------

    /// Focus targets of a region, in navigation order.
    pub fn focusable(&self, region: FocusRegion) -> Vec<FocusTarget> {
        match region {
            FocusRegion::Field => {
                let mut items: Vec<FocusTarget> = self
                    .chips()
                    .into_iter()
                    .map(|node| FocusTarget::Chip(node.id.clone()))
                    .collect();
                if self.config.is_searchable && !self.config.with_dropdown_input {
                    items.push(FocusTarget::FieldInput);
                }
                if self.config.with_clear_all && !self.selection.selected_ids.is_empty() {
                    items.push(FocusTarget::ClearAll);
                }
                items
            }
            FocusRegion::Dropdown => {
                if !self.is_dropdown_open {
                    return Vec::new();
                }
                self.dropdown_rows()
                    .iter()
                    .filter(|row| match row {
                        DropdownRow::Node(node) => self
                            .registry
                            .get(&node.id)
                            .is_some_and(|n| !n.skip_dropdown_virtual_focus),
                        _ => true,
                    })
                    .filter_map(DropdownRow::focus_target)
                    .collect()
            }
        }
    }

    fn default_region(&self) -> FocusRegion {
        if self.is_dropdown_open {
            FocusRegion::Dropdown
        } else {
            FocusRegion::Field
        }
    }

    fn move_focus(&mut self, region: Option<FocusRegion>, direction: FocusMove) {
        let region = region.unwrap_or_else(|| self.default_region());
        let items = self.focusable(region);
        let current = self.focus.as_ref().filter(|f| f.region() == region);
        let Some(target) = step(&items, current, direction) else {
            return;
        };
        self.focus_target(target);
    }

    /// Focus a specific target. Dropdown rows are scrolled into view.
    pub fn focus_target(&mut self, target: FocusTarget) {
        if !self.focusable(target.region()).contains(&target) {
            return;
        }
        if target.region() == FocusRegion::Dropdown
            && let Some(index) = self.row_index_of(&target)
        {
            self.scroll_request = self.dropdown_list.scroll_into_view(index);
        }
        if self.focus.as_ref() != Some(&target) {
            self.focus = Some(target);
            self.dirty = true;
        }
    }

    /// Drop virtual focus.
    pub fn blur(&mut self) {
        if self.focus.take().is_some() {
            self.dirty = true;
        }
    }

    pub fn focus_first_item(&mut self, region: Option<FocusRegion>) {
        self.move_focus(region, FocusMove::First);
    }

    pub fn focus_last_item(&mut self, region: Option<FocusRegion>) {
        self.move_focus(region, FocusMove::Last);
    }

    pub fn focus_prev_item(&mut self, region: Option<FocusRegion>) {
        self.move_focus(region, FocusMove::Prev);
    }

    pub fn focus_next_item(&mut self, region: Option<FocusRegion>) {
        self.move_focus(region, FocusMove::Next);
    }

    /// Node addressed by the current focus.
    pub(super) fn focused_node_id(&self) -> Option<String> {
        self.focus
            .as_ref()
            .and_then(FocusTarget::node_id)
            .map(str::to_string)
    }

    // -------------------------------------------------------------------------
    // Virtualization
    // -------------------------------------------------------------------------

    /// Rows to materialize for the current scroll offset.
    ///
    /// Emits [`TreeSelectEvent::DropdownLastItemReached`] whenever the window
    /// reaches the last row.
    pub fn dropdown_window(&mut self) -> VisibleWindow {
        let window = self.dropdown_list.visible_window();
        if window.last_item_reached && self.is_dropdown_open {
            let displayed_nodes = self
                .displayed
                .iter()
                .filter_map(|d| self.registry.get(&d.id).cloned())
                .collect();
            self.emit(TreeSelectEvent::DropdownLastItemReached {
                input_value: self.input_value.clone(),
                displayed_nodes,
            });
        }
        window
    }

    /// Report a materialized row's measured height.
    pub fn report_row_height(&mut self, index: usize, height: u32) {
        if let Some(request) = self.dropdown_list.report_height(index, height) {
            self.scroll_request = Some(request);
        }
    }

    /// Report the dropdown's scroll offset.
    pub fn set_dropdown_scroll_top(&mut self, scroll_top: u32) {
        self.scroll_request = self.dropdown_list.set_scroll_top(scroll_top);
    }

    /// Take the scroll the rendering layer should apply to the dropdown.
    pub fn take_scroll_request(&mut self) -> Option<ScrollRequest> {
        self.scroll_request.take()
    }

    /// The dropdown's virtual list.
    pub fn dropdown_list(&self) -> &crate::virtual_list::VirtualList {
        &self.dropdown_list
    }
}
