//! Node registry: the single owner of node identity for one tree snapshot.

use std::collections::HashMap;

use crate::node::{Node, TreeNodeData};
use crate::selection::SelectionMode;

/// All nodes of one tree snapshot, addressed by id.
///
/// Built in a single depth-first pass whenever the input forest or the
/// selection mode changes; never patched in place.
#[derive(Debug, Clone, Default)]
pub struct NodeRegistry {
    nodes: HashMap<String, Node>,
    /// Top-level ids in input order.
    roots: Vec<String>,
    /// Every id in depth-first order.
    order: Vec<String>,
}

impl NodeRegistry {
    /// Build the registry for a forest under the given mode.
    ///
    /// - `TreeSelect` registers the full hierarchy.
    /// - `TreeSelectFlat` walks children for depth and display links but
    ///   registers every node with `parent_id = None`.
    /// - `MultiSelect` and `Select` only register top-level records.
    pub fn build(forest: &[TreeNodeData], mode: SelectionMode) -> Self {
        let mut registry = Self::default();
        for data in forest {
            registry.register(data, None, 0, mode);
            registry.roots.push(data.id.clone());
        }
        log::debug!(
            "NodeRegistry built: {} nodes, {} roots ({:?})",
            registry.nodes.len(),
            registry.roots.len(),
            mode
        );
        registry
    }

    fn register(
        &mut self,
        data: &TreeNodeData,
        parent_id: Option<&str>,
        depth: usize,
        mode: SelectionMode,
    ) {
        let walk_children = mode.is_tree();
        let children_ids = if walk_children {
            data.children.iter().map(|c| c.id.clone()).collect()
        } else {
            Vec::new()
        };

        let node = Node {
            id: data.id.clone(),
            label: data.label.clone(),
            parent_id: match mode {
                SelectionMode::TreeSelect => parent_id.map(str::to_string),
                _ => None,
            },
            children_ids,
            depth,
            disabled: data.disabled,
            has_children: walk_children && data.has_children,
            skip_dropdown_virtual_focus: data.skip_dropdown_virtual_focus,
        };

        if self.nodes.insert(data.id.clone(), node).is_some() {
            log::warn!("Duplicate node id '{}' in tree data", data.id);
        }
        self.order.push(data.id.clone());

        if walk_children {
            for child in &data.children {
                self.register(child, Some(&data.id), depth + 1, mode);
            }
        }
    }

    /// Look up a node by id.
    pub fn get(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Check if a node exists.
    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Top-level ids in input order.
    pub fn roots(&self) -> &[String] {
        &self.roots
    }

    /// Number of registered nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the registry has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Every id in depth-first order.
    pub fn ids(&self) -> &[String] {
        &self.order
    }

    /// Every node in depth-first order.
    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.order.iter().filter_map(|id| self.nodes.get(id))
    }

    /// Display children of a node.
    pub fn children(&self, id: &str) -> impl Iterator<Item = &Node> {
        self.nodes
            .get(id)
            .map(|n| n.children_ids.as_slice())
            .unwrap_or_default()
            .iter()
            .filter_map(|child| self.nodes.get(child))
    }

    /// Selection ancestors of a node, nearest first.
    pub fn ancestors(&self, id: &str) -> Vec<&Node> {
        let mut out = Vec::new();
        let mut current = self.get(id).and_then(|n| n.parent_id.as_deref());
        while let Some(parent_id) = current {
            let Some(parent) = self.get(parent_id) else {
                break;
            };
            out.push(parent);
            current = parent.parent_id.as_deref();
        }
        out
    }

    /// The top-most selection ancestor of a node (the node itself for roots).
    pub fn root_of<'a>(&'a self, id: &'a str) -> &'a str {
        self.ancestors(id)
            .last()
            .map(|n| n.id.as_str())
            .unwrap_or(id)
    }

    /// Display descendants of a node in depth-first order (excluding the node).
    pub fn descendants(&self, id: &str) -> Vec<&Node> {
        let mut out = Vec::new();
        self.collect_descendants(id, &mut out);
        out
    }

    fn collect_descendants<'a>(&'a self, id: &str, out: &mut Vec<&'a Node>) {
        for child in self.children(id) {
            out.push(child);
            self.collect_descendants(&child.id, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn forest() -> Vec<TreeNodeData> {
        vec![
            TreeNodeData::new("a", "A").children(vec![
                TreeNodeData::new("a1", "A1"),
                TreeNodeData::new("a2", "A2")
                    .children(vec![TreeNodeData::new("a2x", "A2X").disabled()]),
            ]),
            TreeNodeData::new("b", "B").has_children(),
        ]
    }

    #[test]
    fn test_build_tree_links() {
        let registry = NodeRegistry::build(&forest(), SelectionMode::TreeSelect);
        assert_eq!(registry.len(), 5);
        assert_eq!(registry.roots(), &["a".to_string(), "b".to_string()]);
        assert_eq!(registry.ids(), &["a", "a1", "a2", "a2x", "b"]);

        let a2x = registry.get("a2x").unwrap();
        assert_eq!(a2x.depth, 2);
        assert_eq!(a2x.parent_id.as_deref(), Some("a2"));
        assert!(a2x.disabled);

        assert_eq!(registry.root_of("a2x"), "a");
        assert_eq!(registry.root_of("b"), "b");
        assert!(registry.get("b").unwrap().needs_children());
    }

    #[test]
    fn test_build_flat_decouples_parent() {
        let registry = NodeRegistry::build(&forest(), SelectionMode::TreeSelectFlat);
        let a1 = registry.get("a1").unwrap();
        assert_eq!(a1.parent_id, None);
        assert_eq!(a1.depth, 1);
        assert_eq!(registry.get("a").unwrap().children_ids, vec!["a1", "a2"]);
        assert!(registry.ancestors("a2x").is_empty());
    }

    #[test]
    fn test_build_list_modes_ignore_children() {
        let registry = NodeRegistry::build(&forest(), SelectionMode::MultiSelect);
        assert_eq!(registry.len(), 2);
        assert!(registry.get("a1").is_none());
        assert!(!registry.get("b").unwrap().is_expandable());
    }

    #[test]
    fn test_descendants_depth_first() {
        let registry = NodeRegistry::build(&forest(), SelectionMode::TreeSelect);
        let ids: Vec<&str> = registry
            .descendants("a")
            .iter()
            .map(|n| n.id.as_str())
            .collect();
        assert_eq!(ids, vec!["a1", "a2", "a2x"]);
        assert!(registry.descendants("missing").is_empty());
    }
}
