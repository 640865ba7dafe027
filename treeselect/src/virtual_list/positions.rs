//! Cumulative offset table for variable-height items.

/// Offset and height of one item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ItemPosition {
    pub top: u32,
    pub height: u32,
}

impl ItemPosition {
    pub fn bottom(&self) -> u32 {
        self.top + self.height
    }
}

/// Prefix-summed item positions. `top` is non-decreasing by construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PositionTable {
    positions: Vec<ItemPosition>,
}

impl PositionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from item heights.
    pub fn from_heights(heights: impl IntoIterator<Item = u32>) -> Self {
        let mut table = Self::new();
        let mut top = 0;
        for height in heights {
            table.positions.push(ItemPosition { top, height });
            top += height;
        }
        table
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<ItemPosition> {
        self.positions.get(index).copied()
    }

    /// Sum of all heights.
    pub fn total_height(&self) -> u32 {
        self.positions.last().map(ItemPosition::bottom).unwrap_or(0)
    }

    /// Offset of an item, or the total height past the end.
    pub fn offset_of(&self, index: usize) -> u32 {
        self.positions
            .get(index)
            .map(|p| p.top)
            .unwrap_or_else(|| self.total_height())
    }

    /// Grow or shrink to `len` items. New items get `height_of(index)`.
    pub fn resize(&mut self, len: usize, height_of: impl Fn(usize) -> u32) {
        if len <= self.positions.len() {
            self.positions.truncate(len);
            return;
        }
        let mut top = self.total_height();
        for index in self.positions.len()..len {
            let height = height_of(index);
            self.positions.push(ItemPosition { top, height });
            top += height;
        }
    }

    /// Apply height updates and re-sum from the first changed item.
    ///
    /// Returns whether anything changed.
    pub fn set_heights(&mut self, updates: impl IntoIterator<Item = (usize, u32)>) -> bool {
        let mut first_changed: Option<usize> = None;
        for (index, height) in updates {
            let Some(position) = self.positions.get_mut(index) else {
                continue;
            };
            if position.height != height {
                position.height = height;
                first_changed = Some(first_changed.map_or(index, |i| i.min(index)));
            }
        }

        let Some(from) = first_changed else {
            return false;
        };
        let mut top = self.positions[from].top;
        for position in &mut self.positions[from..] {
            position.top = top;
            top += position.height;
        }
        true
    }

    /// Set one item's height. Returns whether it changed.
    pub fn set_height(&mut self, index: usize, height: u32) -> bool {
        self.set_heights([(index, height)])
    }

    /// Smallest index `i >= from` whose bottom lies below `offset`, by binary search.
    ///
    /// Returns `len()` when every item ends at or above `offset`.
    pub fn start_index(&self, offset: u32, from: usize) -> usize {
        let from = from.min(self.positions.len());
        from + self.positions[from..].partition_point(|p| p.bottom() <= offset)
    }

    /// First index at or after `start` whose top is at or below `bottom`.
    pub fn end_index(&self, start: usize, bottom: u32) -> usize {
        let mut end = start.min(self.positions.len());
        while end < self.positions.len() && self.positions[end].top < bottom {
            end += 1;
        }
        end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_sums() {
        let table = PositionTable::from_heights([10, 20, 30]);
        assert_eq!(table.get(0), Some(ItemPosition { top: 0, height: 10 }));
        assert_eq!(table.get(2), Some(ItemPosition { top: 30, height: 30 }));
        assert_eq!(table.total_height(), 60);
        assert_eq!(table.offset_of(3), 60);
    }

    #[test]
    fn test_set_height_shifts_following_items() {
        let mut table = PositionTable::from_heights([10, 10, 10, 10]);
        assert!(table.set_height(1, 25));
        assert_eq!(table.offset_of(2), 35);
        assert_eq!(table.offset_of(3), 45);
        assert_eq!(table.offset_of(1), 10);
        assert!(!table.set_height(1, 25));
        assert!(!table.set_height(9, 5));
    }

    #[test]
    fn test_start_index_binary_search() {
        let table = PositionTable::from_heights([10, 10, 10, 10]);
        assert_eq!(table.start_index(0, 0), 0);
        assert_eq!(table.start_index(9, 0), 0);
        assert_eq!(table.start_index(10, 0), 1);
        assert_eq!(table.start_index(35, 0), 3);
        assert_eq!(table.start_index(40, 0), 4);
        assert_eq!(table.start_index(0, 2), 2);
    }

    #[test]
    fn test_end_index_covers_bottom() {
        let table = PositionTable::from_heights([10, 10, 10, 10]);
        assert_eq!(table.end_index(0, 25), 3);
        assert_eq!(table.end_index(1, 20), 2);
        assert_eq!(table.end_index(0, 100), 4);
    }

    #[test]
    fn test_resize() {
        let mut table = PositionTable::from_heights([10, 10]);
        table.resize(4, |i| i as u32);
        assert_eq!(table.get(3), Some(ItemPosition { top: 22, height: 3 }));
        table.resize(1, |_| 0);
        assert_eq!(table.len(), 1);
        assert_eq!(table.total_height(), 10);
    }
}
