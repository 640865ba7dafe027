//! Virtualized list engine.
//!
//! Renders only the slice of a long, variable-height list that intersects the
//! viewport, plus overscan. The first `top_item_count` items are pinned: they
//! are always rendered, never virtualized, and their combined height is a
//! fixed offset at the top of the viewport.
//!
//! The engine is headless. The rendering layer feeds it the scroll offset and
//! measured item heights and applies the scroll requests it returns.

mod positions;

use std::ops::Range;

pub use positions::{ItemPosition, PositionTable};

use crate::config::VirtualListConfig;

/// Scroll the viewport to `scroll_top` so that `index` becomes visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollRequest {
    pub index: usize,
    pub scroll_top: u32,
}

/// Indices to materialize for the current scroll offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibleWindow {
    /// Pinned items, always rendered.
    pub pinned: Range<usize>,
    /// Overscanned range of regular items.
    pub range: Range<usize>,
    /// The overscanned range reaches the end of the list.
    pub last_item_reached: bool,
}

impl VisibleWindow {
    /// Every index to render, pinned items first.
    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.pinned.clone().chain(self.range.clone())
    }

    pub fn contains(&self, index: usize) -> bool {
        self.pinned.contains(&index) || self.range.contains(&index)
    }
}

/// Virtualization state of one list.
#[derive(Debug, Clone)]
pub struct VirtualList {
    config: VirtualListConfig,
    total_count: usize,
    top_item_count: usize,
    positions: PositionTable,
    /// Items whose height was reported by the renderer.
    measured: Vec<bool>,
    /// Height learned from the first regular item, used for unmeasured items.
    learned_height: Option<u32>,
    scroll_top: u32,
    /// Item waiting to be confirmed inside the viewport.
    pending_scroll: Option<usize>,
}

impl VirtualList {
    /// Create a list with `total_count` items, the first `top_item_count` pinned.
    pub fn new(config: VirtualListConfig, total_count: usize, top_item_count: usize) -> Self {
        let mut list = Self {
            config,
            total_count: 0,
            top_item_count,
            positions: PositionTable::new(),
            measured: Vec::new(),
            learned_height: None,
            scroll_top: 0,
            pending_scroll: None,
        };
        list.set_total_count(total_count);
        list
    }

    pub fn config(&self) -> VirtualListConfig {
        self.config
    }

    pub fn total_count(&self) -> usize {
        self.total_count
    }

    pub fn top_item_count(&self) -> usize {
        self.top_item_count.min(self.slot_count())
    }

    /// Rendered slots. An empty list still reserves one for a placeholder.
    pub fn slot_count(&self) -> usize {
        self.total_count.max(1)
    }

    pub fn scroll_top(&self) -> u32 {
        self.scroll_top
    }

    pub fn position(&self, index: usize) -> Option<ItemPosition> {
        self.positions.get(index)
    }

    pub fn total_height(&self) -> u32 {
        self.positions.total_height()
    }

    /// Largest meaningful scroll offset.
    pub fn max_scroll_top(&self) -> u32 {
        self.total_height().saturating_sub(self.config.height)
    }

    /// Combined height of the pinned items.
    pub fn pinned_height(&self) -> u32 {
        self.positions.offset_of(self.top_item_count())
    }

    /// Index waiting for a scroll-into-view confirmation.
    pub fn pending_scroll(&self) -> Option<usize> {
        self.pending_scroll
    }

    /// Height assumed for an unmeasured item.
    fn estimate_for(&self, index: usize) -> u32 {
        if index < self.top_item_count() {
            self.config.item_height_estimate
        } else {
            self.learned_height
                .unwrap_or(self.config.item_height_estimate)
        }
    }

    /// Change the number of items. Known heights of kept items are preserved.
    pub fn set_total_count(&mut self, total_count: usize) {
        let was_empty = self.total_count == 0;
        self.total_count = total_count;
        let slots = self.slot_count();
        let top = self.top_item_count();
        let estimate = self.config.item_height_estimate;
        let regular = self.learned_height.unwrap_or(estimate);
        self.positions
            .resize(slots, |i| if i < top { estimate } else { regular });
        self.measured.resize(slots, false);

        if self.pending_scroll.is_some_and(|i| i >= slots) {
            self.pending_scroll = None;
        }
        // The placeholder slot's height says nothing about real rows.
        if was_empty && total_count > 0 {
            self.reset_measurements();
        }
    }

    /// Forget the learned row height and every regular item's measurement.
    ///
    /// Pinned items keep their heights.
    pub fn reset_measurements(&mut self) -> Option<ScrollRequest> {
        self.learned_height = None;
        let top = self.top_item_count();
        let estimate = self.config.item_height_estimate;
        for measured in self.measured.iter_mut().skip(top) {
            *measured = false;
        }
        let len = self.positions.len();
        if self.positions.set_heights((top..len).map(|i| (i, estimate))) {
            self.evaluate_pending()
        } else {
            None
        }
    }

    /// Change how many leading items are pinned.
    pub fn set_top_item_count(&mut self, top_item_count: usize) {
        self.top_item_count = top_item_count;
    }

    /// Replace the settings. Unmeasured items follow a new estimate.
    pub fn set_config(&mut self, config: VirtualListConfig) -> Option<ScrollRequest> {
        let estimate_changed = config.item_height_estimate != self.config.item_height_estimate;
        self.config = config;
        if estimate_changed {
            let updates: Vec<(usize, u32)> = (0..self.positions.len())
                .filter(|&i| !self.measured[i])
                .map(|i| (i, self.estimate_for(i)))
                .collect();
            self.positions.set_heights(updates);
        }
        self.evaluate_pending()
    }

    /// Record the viewport's scroll offset.
    pub fn set_scroll_top(&mut self, scroll_top: u32) -> Option<ScrollRequest> {
        self.scroll_top = scroll_top;
        self.evaluate_pending()
    }

    /// Record the measured height of a materialized item.
    ///
    /// The first regular item's height is applied to every regular item that
    /// has not been measured yet; later reports override single items.
    pub fn report_height(&mut self, index: usize, height: u32) -> Option<ScrollRequest> {
        if index >= self.positions.len() {
            return None;
        }

        let top = self.top_item_count();
        let mut updates = vec![(index, height)];
        if index == top && self.learned_height.is_none() {
            self.learned_height = Some(height);
            updates.extend(
                (top..self.positions.len())
                    .filter(|&i| i != index && !self.measured[i])
                    .map(|i| (i, height)),
            );
            log::trace!("VirtualList: learned row height {}", height);
        }
        self.measured[index] = true;

        if self.positions.set_heights(updates) {
            self.evaluate_pending()
        } else {
            None
        }
    }

    /// Compute the window to materialize for the current scroll offset.
    pub fn visible_window(&self) -> VisibleWindow {
        let slots = self.slot_count();
        let top = self.top_item_count();

        let range = if self.config.is_virtualized {
            let view_top = self.scroll_top.saturating_add(self.pinned_height());
            let view_bottom = self.scroll_top.saturating_add(self.config.height);
            let start = self.positions.start_index(view_top, top);
            let end = self.positions.end_index(start, view_bottom);
            top.max(start.saturating_sub(self.config.overscan))
                ..slots.min(end + self.config.overscan)
        } else {
            top..slots
        };

        VisibleWindow {
            pinned: 0..top,
            last_item_reached: self.total_count > 0 && range.end == self.total_count,
            range,
        }
    }

    /// Bring an item into view.
    ///
    /// Returns the scroll to apply, if one is needed. The request stays pending
    /// and is re-evaluated on every height or scroll change until the item is
    /// confirmed inside the viewport, since its real height may only be known
    /// once it has been rendered.
    pub fn scroll_into_view(&mut self, index: usize) -> Option<ScrollRequest> {
        if index >= self.slot_count() {
            return None;
        }
        self.pending_scroll = Some(index);
        self.evaluate_pending()
    }

    /// Forget a pending scroll-into-view.
    pub fn cancel_pending_scroll(&mut self) {
        self.pending_scroll = None;
    }

    fn evaluate_pending(&mut self) -> Option<ScrollRequest> {
        let index = self.pending_scroll?;
        if index < self.top_item_count() {
            self.pending_scroll = None;
            return None;
        }
        let Some(item) = self.positions.get(index) else {
            self.pending_scroll = None;
            return None;
        };

        let pinned = self.pinned_height();
        let view_top = self.scroll_top.saturating_add(pinned);
        let view_bottom = self.scroll_top.saturating_add(self.config.height);
        let fits = item.height <= self.config.height.saturating_sub(pinned);

        let inside = item.top >= view_top
            && (item.bottom() <= view_bottom || (!fits && item.top == view_top));
        if inside {
            self.pending_scroll = None;
            return None;
        }

        let target = if fits && item.bottom() > view_bottom {
            item.bottom() - self.config.height
        } else {
            item.top - pinned
        };
        let target = target.min(self.max_scroll_top());
        if target == self.scroll_top {
            return None;
        }
        log::trace!("VirtualList: scroll item {} into view at {}", index, target);
        Some(ScrollRequest {
            index,
            scroll_top: target,
        })
    }
}
