//! # Session State
//!
//! Everything one run of the application works on, loaded from and saved to
//! the data directory. The session is passed explicitly to every command;
//! there is no process-wide state.

use anyhow::Result;
use std::collections::BTreeSet;
use std::path::Path;

use crate::bookmarks::Bookmarks;
use crate::config::DataPaths;
use crate::store::WordStore;
use crate::wordlist;

#[derive(Debug)]
pub struct Session {
    pub store: WordStore,
    pub bookmarks: Bookmarks,
    pub paths: DataPaths,
    /// Words that came from the base dictionary this run.
    /// They are not written to `words.txt`.
    dictionary: BTreeSet<String>,
}

impl Session {
    /// Load the saved word list, usage stats and bookmarks from `paths`,
    /// plus an optional base dictionary.
    ///
    /// Missing files mean empty state. Unreadable word lists, stats or
    /// bookmarks are reported and replaced by empty state rather than
    /// aborting the run.
    pub fn open(paths: DataPaths, dictionary: Option<&Path>) -> Result<Self> {
        let mut store = WordStore::new();

        let dictionary: BTreeSet<String> = match dictionary {
            Some(path) => {
                let words = read_or_warn(path, "base dictionary");
                let count = store.restore(&words);
                tracing::info!(path = %path.display(), count, "loaded base dictionary");
                words.into_iter().collect()
            }
            None => BTreeSet::new(),
        };

        let saved = read_or_warn(&paths.words, "saved words");
        store.restore(&saved);

        for word in read_or_warn(&paths.removed, "removed words") {
            store.remove(&word);
        }

        if let Err(err) = store.load_stats(&paths.stats) {
            tracing::warn!(error = %err, "ignoring unreadable usage stats");
        }

        let bookmarks = match Bookmarks::load_from(&paths.bookmarks) {
            Ok(bookmarks) => bookmarks,
            Err(err) => {
                tracing::warn!(error = %err, "ignoring unreadable bookmarks");
                Bookmarks::new()
            }
        };

        Ok(Self {
            store,
            bookmarks,
            paths,
            dictionary,
        })
    }

    /// Write words, usage stats and bookmarks back to the data directory.
    ///
    /// Only the difference from the base dictionary is saved: stored words
    /// the dictionary lacks go to `words.txt`, dictionary words no longer
    /// stored go to `removed.txt`.
    pub fn save(&self) -> Result<()> {
        let added: Vec<String> = self
            .store
            .tree()
            .words()
            .into_iter()
            .filter(|word| !self.dictionary.contains(word))
            .collect();
        let removed: Vec<&String> = self
            .dictionary
            .iter()
            .filter(|word| !self.store.search(word))
            .collect();

        wordlist::save_words(&self.paths.words, &added)?;
        wordlist::save_words(&self.paths.removed, &removed)?;
        self.store.save_stats(&self.paths.stats)?;
        self.bookmarks.save_to(&self.paths.bookmarks)?;
        Ok(())
    }
}

fn read_or_warn(path: &Path, what: &str) -> Vec<String> {
    match wordlist::read_words(path) {
        Ok(words) => words,
        Err(err) => {
            tracing::warn!(error = %format!("{:#}", err), what, "ignoring unreadable word list");
            Vec::new()
        }
    }
}
