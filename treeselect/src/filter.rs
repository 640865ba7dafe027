//! Label filtering for search mode, using nucleo-matcher.

use std::collections::HashSet;

use nucleo_matcher::pattern::{AtomKind, CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Config, Matcher, Utf32Str};

use crate::registry::NodeRegistry;

/// Result of filtering a registry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterResult {
    /// Nodes that stay displayed: matches, their ancestors and their descendants.
    pub visible_ids: HashSet<String>,
    /// Nodes with at least one matching descendant, in depth-first order.
    /// These are expanded automatically while searching.
    pub search_expanded_ids: Vec<String>,
}

impl FilterResult {
    pub fn is_visible(&self, id: &str) -> bool {
        self.visible_ids.contains(id)
    }
}

/// Case-insensitive substring matcher for node labels.
///
/// Every whitespace-separated word of the query has to occur in the label.
pub struct LabelMatcher {
    matcher: Matcher,
    pattern: Pattern,
    buf: Vec<char>,
}

impl LabelMatcher {
    pub fn new(query: &str) -> Self {
        Self {
            matcher: Matcher::new(Config::DEFAULT),
            pattern: Pattern::new(
                query,
                CaseMatching::Ignore,
                Normalization::Smart,
                AtomKind::Substring,
            ),
            buf: Vec::new(),
        }
    }

    pub fn matches(&mut self, label: &str) -> bool {
        let haystack = Utf32Str::new(label, &mut self.buf);
        self.pattern.score(haystack, &mut self.matcher).is_some()
    }
}

/// Filter the display tree by label.
///
/// An empty query keeps everything visible and expands nothing.
pub fn filter_tree(query: &str, registry: &NodeRegistry) -> FilterResult {
    let mut result = FilterResult::default();
    if query.is_empty() {
        result.visible_ids = registry.ids().iter().cloned().collect();
        return result;
    }

    let mut matcher = LabelMatcher::new(query);
    for root in registry.roots() {
        visit(root, false, registry, &mut matcher, &mut result);
    }
    log::trace!(
        "filter '{}': {} visible, {} auto-expanded",
        query,
        result.visible_ids.len(),
        result.search_expanded_ids.len()
    );
    result
}

/// Returns whether the subtree at `id` contains a match.
fn visit(
    id: &str,
    ancestor_matched: bool,
    registry: &NodeRegistry,
    matcher: &mut LabelMatcher,
    result: &mut FilterResult,
) -> bool {
    let Some(node) = registry.get(id) else {
        return false;
    };

    let matched = matcher.matches(&node.label);
    // Reserve our slot so ancestors precede descendants.
    let slot = result.search_expanded_ids.len();
    let mut descendant_matched = false;
    for child in &node.children_ids {
        descendant_matched |= visit(child, ancestor_matched || matched, registry, matcher, result);
    }

    if matched || ancestor_matched || descendant_matched {
        result.visible_ids.insert(node.id.clone());
    }
    if descendant_matched {
        result.search_expanded_ids.insert(slot, node.id.clone());
    }
    matched || descendant_matched
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::TreeNodeData;
    use crate::selection::SelectionMode;

    fn registry() -> NodeRegistry {
        let forest = vec![
            TreeNodeData::new("fruit", "Fruit").children(vec![
                TreeNodeData::new("apple", "Apple"),
                TreeNodeData::new("citrus", "Citrus").children(vec![
                    TreeNodeData::new("lemon", "Lemon"),
                    TreeNodeData::new("orange", "Orange"),
                ]),
            ]),
            TreeNodeData::new("veg", "Vegetables")
                .children(vec![TreeNodeData::new("carrot", "Carrot")]),
        ];
        NodeRegistry::build(&forest, SelectionMode::TreeSelect)
    }

    #[test]
    fn test_empty_query_keeps_everything() {
        let registry = registry();
        let result = filter_tree("", &registry);
        assert_eq!(result.visible_ids.len(), registry.len());
        assert!(result.search_expanded_ids.is_empty());
    }

    #[test]
    fn test_match_keeps_ancestors_and_expands_them() {
        let result = filter_tree("LEM", &registry());
        assert!(result.is_visible("lemon"));
        assert!(result.is_visible("citrus"));
        assert!(result.is_visible("fruit"));
        assert!(!result.is_visible("orange"));
        assert!(!result.is_visible("apple"));
        assert!(!result.is_visible("veg"));
        assert_eq!(result.search_expanded_ids, vec!["fruit", "citrus"]);
    }

    #[test]
    fn test_match_keeps_descendants() {
        let result = filter_tree("citrus", &registry());
        assert!(result.is_visible("lemon"));
        assert!(result.is_visible("orange"));
        assert_eq!(result.search_expanded_ids, vec!["fruit"]);
    }

    #[test]
    fn test_no_matches() {
        let result = filter_tree("xyz", &registry());
        assert!(result.visible_ids.is_empty());
    }

    #[test]
    fn test_substring_not_fuzzy() {
        let mut matcher = LabelMatcher::new("ape");
        assert!(!matcher.matches("Apple"));
        assert!(matcher.matches("Grape"));
    }
}
