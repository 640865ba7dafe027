use treeselect::prelude::*;

fn list(total: usize, top: usize) -> VirtualList {
    VirtualList::new(VirtualListConfig::new(100, 10).overscan(2), total, top)
}

// ============================================================================
// Visible window
// ============================================================================

#[test]
fn test_window_at_top() {
    let list = list(100, 0);
    let window = list.visible_window();
    assert_eq!(window.pinned, 0..0);
    assert_eq!(window.range, 0..12);
    assert!(!window.last_item_reached);
}

#[test]
fn test_window_in_the_middle() {
    let mut list = list(100, 0);
    list.set_scroll_top(500);
    let window = list.visible_window();
    assert_eq!(window.range, 48..62);
    assert!(!window.last_item_reached);
}

#[test]
fn test_window_at_bottom_reaches_last_item() {
    let mut list = list(100, 0);
    list.set_scroll_top(list.max_scroll_top());
    let window = list.visible_window();
    assert_eq!(window.range, 88..100);
    assert!(window.last_item_reached);
}

#[test]
fn test_window_with_pinned_items() {
    let list = list(100, 2);
    assert_eq!(list.pinned_height(), 20);

    let window = list.visible_window();
    assert_eq!(window.pinned, 0..2);
    assert_eq!(window.range, 2..12);
    assert!(window.contains(0));
    assert!(window.contains(1));
    assert_eq!(window.indices().next(), Some(0));
}

#[test]
fn test_window_bounds_for_every_offset() {
    let mut list = list(50, 2);
    for i in 2..50 {
        list.report_height(i, 5 + (i as u32 * 7) % 30);
    }

    let max = list.max_scroll_top();
    for scroll_top in (0..=max).step_by(7) {
        list.set_scroll_top(scroll_top);
        let window = list.visible_window();
        assert_eq!(window.pinned, 0..2, "offset {}", scroll_top);
        assert!(window.range.start >= 2, "offset {}", scroll_top);
        assert!(window.range.end <= 50, "offset {}", scroll_top);

        let view_top = scroll_top + list.pinned_height();
        let view_bottom = scroll_top + 100;
        for i in 2..50 {
            let item = list.position(i).unwrap();
            if item.bottom() > view_top && item.top < view_bottom {
                assert!(window.contains(i), "item {} at offset {}", i, scroll_top);
            }
        }
    }
}

#[test]
fn test_short_list_reaches_last_item() {
    let list = list(5, 0);
    let window = list.visible_window();
    assert_eq!(window.range, 0..5);
    assert!(window.last_item_reached);
}

#[test]
fn test_not_virtualized_renders_everything() {
    let config = VirtualListConfig::new(100, 10).virtualized(false);
    let mut list = VirtualList::new(config, 500, 1);
    list.set_scroll_top(1000);
    let window = list.visible_window();
    assert_eq!(window.pinned, 0..1);
    assert_eq!(window.range, 1..500);
    assert!(window.last_item_reached);
}

#[test]
fn test_empty_list_keeps_one_slot() {
    let list = list(0, 0);
    assert_eq!(list.slot_count(), 1);
    let window = list.visible_window();
    assert_eq!(window.range, 0..1);
    assert!(!window.last_item_reached);
}

// ============================================================================
// Heights
// ============================================================================

#[test]
fn test_first_regular_height_is_learned() {
    let mut list = list(10, 0);
    assert_eq!(list.total_height(), 100);

    list.report_height(0, 30);
    assert_eq!(list.total_height(), 300);

    list.report_height(3, 50);
    assert_eq!(list.total_height(), 320);

    // Items added later use the learned height.
    list.set_total_count(12);
    assert_eq!(list.total_height(), 380);
}

#[test]
fn test_pinned_heights_are_not_learned() {
    let mut list = list(10, 1);
    list.report_height(0, 40);
    assert_eq!(list.total_height(), 130);

    list.report_height(1, 20);
    assert_eq!(list.total_height(), 220);
    assert_eq!(list.pinned_height(), 40);
}

#[test]
fn test_estimate_change_only_moves_unmeasured_items() {
    let mut list = list(4, 0);
    list.report_height(1, 25);
    list.set_config(VirtualListConfig::new(100, 20));
    assert_eq!(list.position(1).unwrap().height, 25);
    assert_eq!(list.total_height(), 20 + 25 + 20 + 20);
}

// ============================================================================
// Scroll into view
// ============================================================================

#[test]
fn test_scroll_into_view_below_aligns_bottom() {
    let mut list = list(100, 0);
    let request = list.scroll_into_view(50);
    assert_eq!(
        request,
        Some(ScrollRequest {
            index: 50,
            scroll_top: 410
        })
    );
    assert_eq!(list.pending_scroll(), Some(50));

    assert_eq!(list.set_scroll_top(410), None);
    assert_eq!(list.pending_scroll(), None);
}

#[test]
fn test_scroll_into_view_above_aligns_top() {
    let mut list = list(100, 0);
    list.set_scroll_top(600);
    let request = list.scroll_into_view(10);
    assert_eq!(request.map(|r| r.scroll_top), Some(100));
}

#[test]
fn test_scroll_into_view_accounts_for_pinned_items() {
    let mut list = list(100, 2);
    list.set_scroll_top(500);
    let request = list.scroll_into_view(30);
    assert_eq!(request.map(|r| r.scroll_top), Some(280));

    assert_eq!(list.set_scroll_top(280), None);
    assert_eq!(list.pending_scroll(), None);
}

#[test]
fn test_scroll_into_view_retries_after_remeasure() {
    let mut list = list(100, 0);
    assert_eq!(list.scroll_into_view(50).map(|r| r.scroll_top), Some(410));

    // Real heights arrive before the scroll was applied.
    let retry = list.report_height(0, 20);
    assert_eq!(
        retry,
        Some(ScrollRequest {
            index: 50,
            scroll_top: 920
        })
    );
    assert_eq!(list.pending_scroll(), Some(50));

    assert_eq!(list.set_scroll_top(920), None);
    assert_eq!(list.pending_scroll(), None);
}

#[test]
fn test_scroll_into_view_oversize_item_aligns_top() {
    let mut list = list(20, 0);
    list.report_height(0, 10);
    list.report_height(5, 250);

    assert_eq!(list.scroll_into_view(5).map(|r| r.scroll_top), Some(50));
    assert_eq!(list.set_scroll_top(50), None);
    assert_eq!(list.pending_scroll(), None);
}

#[test]
fn test_scroll_into_view_visible_or_pinned_is_noop() {
    let mut list = list(100, 2);
    assert_eq!(list.scroll_into_view(1), None);
    assert_eq!(list.pending_scroll(), None);

    assert_eq!(list.scroll_into_view(3), None);
    assert_eq!(list.pending_scroll(), None);

    assert_eq!(list.scroll_into_view(500), None);
    assert_eq!(list.pending_scroll(), None);
}

#[test]
fn test_shrinking_list_drops_pending_scroll() {
    let mut list = list(100, 0);
    list.scroll_into_view(80);
    list.set_total_count(50);
    assert_eq!(list.pending_scroll(), None);
}

// ============================================================================
// Boundaries
// ============================================================================

#[test]
fn test_huge_scroll_offset_saturates() {
    let mut list = VirtualList::new(VirtualListConfig::new(300, 30), 10, 0);
    assert_eq!(list.set_scroll_top(u32::MAX - 10), None);

    let window = list.visible_window();
    assert_eq!(window.range, 8..10);
    assert!(window.last_item_reached);

    assert_eq!(
        list.scroll_into_view(3),
        Some(ScrollRequest {
            index: 3,
            scroll_top: 0
        })
    );
}

#[test]
fn test_placeholder_height_is_not_learned_for_items() {
    let mut list = list(0, 0);
    list.report_height(0, 50);
    assert_eq!(list.total_height(), 50);

    list.set_total_count(5);
    assert_eq!(list.total_height(), 50);

    list.report_height(0, 20);
    assert_eq!(list.total_height(), 100);
}
