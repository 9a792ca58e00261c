//! # Word Store
//!
//! [`WordStore`] pairs the [`PrefixTree`] with its [`UsageTracker`] and keeps
//! the two in lockstep: every insertion is also a usage event, including a
//! redundant insertion of a word that is already stored.
//!
//! ## Concurrency
//!
//! The store is plain owned data with `&mut self` mutators. A host serving
//! several callers wraps the whole store in one lock so the tree and the
//! tracker are never observed half-updated.
//!
//! ## Update Is Not Atomic
//!
//! [`WordStore::update`] is a removal followed by an insertion. If the
//! process dies between the two steps only the removal is visible; callers
//! needing all-or-nothing semantics must add their own transaction boundary.

use anyhow::Result;
use std::path::Path;

use crate::tree::PrefixTree;
use crate::usage::{UsageRecord, UsageTracker};
use crate::wordlist;

/// In-memory word index plus per-word usage statistics
#[derive(Debug, Clone, Default)]
pub struct WordStore {
    tree: PrefixTree,
    usage: UsageTracker,
}

impl WordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tree(&self) -> &PrefixTree {
        &self.tree
    }

    pub fn usage(&self) -> &UsageTracker {
        &self.usage
    }

    /// Number of stored words
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Store `word` and record a usage event for it
    pub fn insert(&mut self, word: &str) {
        self.tree.insert(word);
        self.usage.record_usage(word);
    }

    /// Exact-match lookup without side effects
    pub fn search(&self, word: &str) -> bool {
        self.tree.search(word)
    }

    /// Exact-match lookup that records a usage event on a hit
    pub fn lookup(&mut self, word: &str) -> bool {
        let found = self.tree.search(word);
        if found {
            self.usage.record_usage(word);
        }
        found
    }

    /// Remove `word` from the tree. Absent words are ignored.
    ///
    /// Usage history for the word is kept, so it can still appear in the
    /// top-N ranking and exports.
    pub fn remove(&mut self, word: &str) {
        if !self.tree.remove(word) {
            tracing::debug!(word, "remove of absent word ignored");
        }
    }

    /// Replace `old_word` with `new_word`: a removal followed by an insertion
    pub fn update(&mut self, old_word: &str, new_word: &str) {
        self.remove(old_word);
        self.insert(new_word);
    }

    pub fn starts_with(&self, prefix: &str) -> Vec<String> {
        self.tree.starts_with(prefix)
    }

    /// Stored words within `max_distance` edits of `word`, closest first
    pub fn suggest(&self, word: &str, max_distance: usize) -> Vec<String> {
        self.tree.suggest(word, max_distance)
    }

    pub fn record_usage(&mut self, word: &str) {
        self.usage.record_usage(word);
    }

    pub fn usage_of(&self, word: &str) -> Option<&UsageRecord> {
        self.usage.get(word)
    }

    /// Most frequently used words, highest first
    pub fn top_n(&self, n: usize) -> Vec<(String, u64)> {
        self.usage.top_n(n)
    }

    /// Batch-insert every token of a word list file or directory.
    ///
    /// Each token goes through [`WordStore::insert`] and so counts as a usage
    /// event. Returns the number of tokens inserted.
    pub fn load_words(&mut self, path: &Path) -> Result<usize> {
        let words = wordlist::read_words(path)?;
        for word in &words {
            self.insert(word);
        }
        tracing::info!(path = %path.display(), count = words.len(), "loaded word list");
        Ok(words.len())
    }

    /// Populate the tree from a word list file without recording usage.
    ///
    /// Used to bring back the store's own saved words at startup, which is
    /// not a usage event. Returns the number of tokens read.
    pub fn restore_words(&mut self, path: &Path) -> Result<usize> {
        let words = wordlist::read_words(path)?;
        Ok(self.restore(&words))
    }

    /// Insert already-read words without recording usage
    pub fn restore<S: AsRef<str>>(&mut self, words: &[S]) -> usize {
        self.tree.extend(words);
        words.len()
    }

    /// Replace all usage statistics with the contents of a stats file
    pub fn load_stats(&mut self, path: &Path) -> Result<()> {
        self.usage.load(path)
    }

    pub fn save_stats(&self, path: &Path) -> Result<()> {
        self.usage.save(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_insert_records_usage() {
        let mut store = WordStore::new();
        store.insert("echo");
        store.insert("echo");
        store.insert("echo");

        assert!(store.search("echo"));
        assert_eq!(store.len(), 1);
        assert_eq!(store.top_n(1), vec![("echo".to_string(), 3)]);
    }

    #[test]
    fn test_search_has_no_side_effects() {
        let mut store = WordStore::new();
        store.insert("apple");
        assert!(store.search("apple"));
        assert!(store.search("apple"));
        assert_eq!(store.usage_of("apple").unwrap().frequency, 1);
    }

    #[test]
    fn test_lookup_records_hits_only() {
        let mut store = WordStore::new();
        store.insert("apple");

        assert!(store.lookup("apple"));
        assert!(!store.lookup("apples"));

        assert_eq!(store.usage_of("apple").unwrap().frequency, 2);
        assert!(store.usage_of("apples").is_none());
    }

    #[test]
    fn test_remove_keeps_usage_history() {
        let mut store = WordStore::new();
        store.insert("car");
        store.insert("cat");
        store.remove("car");

        assert!(!store.search("car"));
        assert!(store.search("cat"));
        assert_eq!(store.usage_of("car").unwrap().frequency, 1);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut store = WordStore::new();
        store.insert("cat");
        store.remove("dog");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_update() {
        let mut store = WordStore::new();
        store.insert("colour");
        store.update("colour", "color");

        assert!(!store.search("colour"));
        assert!(store.search("color"));
        assert_eq!(store.usage_of("color").unwrap().frequency, 1);
    }

    #[test]
    fn test_update_missing_old_word_still_inserts() {
        let mut store = WordStore::new();
        store.update("ghost", "spirit");
        assert!(store.search("spirit"));
    }

    #[test]
    fn test_load_words_counts_usage() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("common.txt");
        fs::write(&path, "alpha\nbeta\nalpha\n").unwrap();

        let mut store = WordStore::new();
        assert_eq!(store.load_words(&path).unwrap(), 3);

        assert_eq!(store.len(), 2);
        assert_eq!(store.usage_of("alpha").unwrap().frequency, 2);
    }

    #[test]
    fn test_restore_words_skips_usage() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("words.txt");
        fs::write(&path, "alpha\nbeta\n").unwrap();

        let mut store = WordStore::new();
        store.restore_words(&path).unwrap();

        assert!(store.search("alpha"));
        assert!(!store.usage().has_usage_data());
    }

    #[test]
    fn test_restore_counts_tokens_not_new_words() {
        let mut store = WordStore::new();
        assert_eq!(store.restore(&["pear", "apple", "pear"]), 3);

        assert_eq!(store.starts_with(""), vec!["apple", "pear"]);
        assert!(!store.usage().has_usage_data());
    }
}
