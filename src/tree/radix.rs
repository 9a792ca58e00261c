//! # Prefix Tree
//!
//! [`PrefixTree`] is a radix tree over complete words. Edges carry whole
//! character runs instead of single characters, so a chain of nodes with one
//! child each never exists: inserting splits an edge at the first point of
//! divergence, and removing folds edges back together.
//!
//! The tree itself has no side effects beyond its own structure. Usage
//! accounting lives in [`crate::store::WordStore`], which drives the tree.

use crate::tree::distance::{length_gap, levenshtein};
use crate::tree::node::{common_prefix_len, TreeNode};

/// Default edit-distance threshold for [`PrefixTree::suggest`]
pub const DEFAULT_SUGGEST_DISTANCE: usize = 2;

/// A compressed prefix tree of words
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrefixTree {
    root: TreeNode,
    len: usize,
}

impl PrefixTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct words stored
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn root(&self) -> &TreeNode {
        &self.root
    }

    /// Insert `word`. Returns `true` if the word was not already present.
    ///
    /// Inserting a word twice leaves the tree unchanged.
    pub fn insert(&mut self, word: &str) -> bool {
        let added = insert_below(&mut self.root, word);
        if added {
            self.len += 1;
        }
        added
    }

    /// Exact-match lookup
    pub fn search(&self, word: &str) -> bool {
        self.locate(word).is_some_and(TreeNode::is_terminal)
    }

    /// Remove `word`, compacting any edge that no longer leads to a word.
    /// Returns `true` if the word was present.
    pub fn remove(&mut self, word: &str) -> bool {
        let removed = remove_below(&mut self.root, word);
        if removed {
            self.len -= 1;
        }
        removed
    }

    /// Every stored word beginning with `prefix`.
    ///
    /// The walk may stop part-way along the last edge; `"ap"` reaches the
    /// subtree under an `"apple"` edge. A path that diverges before `prefix`
    /// is consumed yields nothing. Results come back in lexicographic order,
    /// though callers should not rely on it.
    pub fn starts_with(&self, prefix: &str) -> Vec<String> {
        let mut words = Vec::new();
        let mut node = &self.root;
        let mut path = String::with_capacity(prefix.len());
        let mut rest = prefix;

        while let Some(first) = rest.chars().next() {
            let Some((label, child)) = node.edge(first) else {
                return words;
            };

            if let Some(after) = rest.strip_prefix(label.as_str()) {
                rest = after;
            } else if label.starts_with(rest) {
                rest = "";
            } else {
                return words;
            }

            path.push_str(label);
            node = child;
        }

        collect_words(node, &mut path, &mut words);
        words
    }

    /// All stored words in lexicographic order
    pub fn words(&self) -> Vec<String> {
        self.starts_with("")
    }

    /// Stored words within `max_distance` edits of `word`, closest first.
    ///
    /// This is a linear scan over every stored word, intended for small
    /// personal word lists.
    pub fn suggest(&self, word: &str, max_distance: usize) -> Vec<String> {
        self.suggest_with_distance(word, max_distance)
            .into_iter()
            .map(|(candidate, _)| candidate)
            .collect()
    }

    /// Like [`PrefixTree::suggest`] but keeps each candidate's distance.
    /// Ties are ordered alphabetically.
    pub fn suggest_with_distance(&self, word: &str, max_distance: usize) -> Vec<(String, usize)> {
        let mut matches: Vec<(String, usize)> = self
            .words()
            .into_iter()
            .filter(|candidate| length_gap(candidate, word) <= max_distance)
            .filter_map(|candidate| {
                let distance = levenshtein(&candidate, word);
                (distance <= max_distance).then_some((candidate, distance))
            })
            .collect();

        matches.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
        matches
    }

    fn locate(&self, word: &str) -> Option<&TreeNode> {
        let mut node = &self.root;
        let mut rest = word;

        while let Some(first) = rest.chars().next() {
            let (label, child) = node.edge(first)?;
            rest = rest.strip_prefix(label.as_str())?;
            node = child;
        }

        Some(node)
    }
}

impl<S: AsRef<str>> FromIterator<S> for PrefixTree {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<S: AsRef<str>> Extend<S> for PrefixTree {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for word in iter {
            self.insert(word.as_ref());
        }
    }
}

fn insert_below(node: &mut TreeNode, suffix: &str) -> bool {
    let Some(first) = suffix.chars().next() else {
        let added = !node.terminal;
        node.terminal = true;
        return added;
    };

    let Some((label, mut child)) = node.take_edge(first) else {
        node.children.insert(suffix.to_string(), TreeNode::leaf());
        return true;
    };

    let common = common_prefix_len(&label, suffix);
    if common < label.len() {
        // Split: the shared head becomes a new intermediate node that owns
        // the old child under the unmatched tail of the label.
        tracing::debug!(edge = %label, at = common, "splitting edge");
        let (head, tail) = label.split_at(common);
        let mut middle = TreeNode::default();
        middle.children.insert(tail.to_string(), child);
        let added = insert_below(&mut middle, &suffix[common..]);
        node.children.insert(head.to_string(), middle);
        added
    } else {
        let added = insert_below(&mut child, &suffix[common..]);
        node.children.insert(label, child);
        added
    }
}

fn remove_below(node: &mut TreeNode, suffix: &str) -> bool {
    let Some(first) = suffix.chars().next() else {
        let removed = node.terminal;
        node.terminal = false;
        return removed;
    };

    let Some((label, mut child)) = node.take_edge(first) else {
        return false;
    };

    let removed = match suffix.strip_prefix(label.as_str()) {
        Some(rest) => remove_below(&mut child, rest),
        None => false,
    };

    node.reattach(label, child);
    removed
}

fn collect_words(node: &TreeNode, path: &mut String, words: &mut Vec<String>) {
    if node.terminal {
        words.push(path.clone());
    }

    for (label, child) in &node.children {
        let len = path.len();
        path.push_str(label);
        collect_words(child, path, words);
        path.truncate(len);
    }
}
