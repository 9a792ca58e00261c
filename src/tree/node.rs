//! # Tree Nodes
//!
//! A [`TreeNode`] owns its children outright: every child lives under exactly
//! one edge of exactly one parent, so no subtree is ever shared.
//!
//! Two structural rules hold for every node reachable from the root:
//!
//! - No two sibling labels share a first character, so the child to follow is
//!   always determined by the next character of the key.
//! - Edge labels are never empty, and a non-terminal node without children
//!   does not exist (removal compacts it away).

use std::collections::BTreeMap;
use std::ops::Bound;

/// A node in the compressed prefix tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeNode {
    /// True when the path from the root to this node spells a stored word
    pub(crate) terminal: bool,
    /// Edge label -> child, kept sorted so enumeration is lexicographic
    pub(crate) children: BTreeMap<String, TreeNode>,
}

impl TreeNode {
    /// A terminal node with no children
    pub(crate) fn leaf() -> Self {
        Self {
            terminal: true,
            children: BTreeMap::new(),
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    /// Iterate over `(label, child)` edges in label order
    pub fn edges(&self) -> impl Iterator<Item = (&str, &TreeNode)> {
        self.children
            .iter()
            .map(|(label, child)| (label.as_str(), child))
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Find the edge whose label starts with `first`.
    ///
    /// Every label beginning with `first` sorts at or after the one-character
    /// string `first` and before any label with a larger first character, so
    /// the first key in that range is the only candidate.
    pub(crate) fn edge(&self, first: char) -> Option<(&String, &TreeNode)> {
        let mut buf = [0u8; 4];
        let key: &str = first.encode_utf8(&mut buf);
        self.children
            .range::<str, _>((Bound::Included(key), Bound::Unbounded))
            .next()
            .filter(|(label, _)| label.starts_with(first))
    }

    /// Detach the edge whose label starts with `first`, handing back ownership
    /// of both the label and the child.
    pub(crate) fn take_edge(&mut self, first: char) -> Option<(String, TreeNode)> {
        let label = self.edge(first)?.0.clone();
        self.children.remove_entry(&label)
    }

    /// Re-attach a child after a removal below it.
    ///
    /// A non-terminal child without children is dropped. A non-terminal child
    /// with a single child is folded into it, concatenating the two labels.
    pub(crate) fn reattach(&mut self, label: String, mut child: TreeNode) {
        if !child.terminal && child.children.len() == 1 {
            if let Some((tail, grandchild)) = child.children.pop_first() {
                tracing::debug!(edge = %label, tail = %tail, "merging single-child edge");
                self.children.insert(label + &tail, grandchild);
                return;
            }
        }

        if child.terminal || !child.children.is_empty() {
            self.children.insert(label, child);
        } else {
            tracing::debug!(edge = %label, "compacting empty edge");
        }
    }
}

/// Byte length of the longest common prefix of `a` and `b`, always on a
/// `char` boundary of both strings.
pub(crate) fn common_prefix_len(a: &str, b: &str) -> usize {
    a.char_indices()
        .zip(b.chars())
        .take_while(|((_, ca), cb)| ca == cb)
        .last()
        .map_or(0, |((idx, c), _)| idx + c.len_utf8())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_prefix_len() {
        assert_eq!(common_prefix_len("apple", "apt"), 2);
        assert_eq!(common_prefix_len("apple", "apple"), 5);
        assert_eq!(common_prefix_len("apple", "banana"), 0);
        assert_eq!(common_prefix_len("", "abc"), 0);
        assert_eq!(common_prefix_len("ten", "tender"), 3);
    }

    #[test]
    fn test_common_prefix_len_multibyte() {
        // 'é' is two bytes; the result must stay on a char boundary
        assert_eq!(common_prefix_len("café", "cafè"), 3);
        assert_eq!(common_prefix_len("éa", "éb"), 2);
    }

    #[test]
    fn test_edge_lookup_by_first_char() {
        let mut node = TreeNode::default();
        node.children.insert("apple".to_string(), TreeNode::leaf());
        node.children.insert("banana".to_string(), TreeNode::leaf());
        node.children.insert("cherry".to_string(), TreeNode::leaf());

        assert_eq!(node.edge('b').map(|(l, _)| l.as_str()), Some("banana"));
        assert_eq!(node.edge('a').map(|(l, _)| l.as_str()), Some("apple"));
        assert!(node.edge('d').is_none());
        assert!(node.edge('0').is_none());
    }

    #[test]
    fn test_reattach_drops_empty_child() {
        let mut parent = TreeNode::default();
        parent.reattach("gone".to_string(), TreeNode::default());
        assert_eq!(parent.child_count(), 0);
    }

    #[test]
    fn test_reattach_merges_single_child() {
        let mut middle = TreeNode::default();
        middle.children.insert("er".to_string(), TreeNode::leaf());

        let mut parent = TreeNode::default();
        parent.reattach("d".to_string(), middle);

        let labels: Vec<_> = parent.edges().map(|(l, _)| l).collect();
        assert_eq!(labels, vec!["der"]);
        assert!(parent.children["der"].is_terminal());
    }

    #[test]
    fn test_reattach_keeps_terminal_child() {
        let mut child = TreeNode::leaf();
        child.children.insert("s".to_string(), TreeNode::leaf());

        let mut parent = TreeNode::default();
        parent.reattach("cat".to_string(), child);

        assert_eq!(parent.child_count(), 1);
        assert_eq!(parent.children["cat"].child_count(), 1);
    }
}
