//! # Bookmarks
//!
//! Words the user wants to come back to, each with an optional free-form
//! note. Stored as one `word|note` pair per line; the note may itself
//! contain `|`.

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

const SEPARATOR: char = '|';

/// Bookmarked words and their notes, ordered by word
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bookmarks {
    entries: BTreeMap<String, String>,
}

impl Bookmarks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bookmark `word`, replacing any previous note
    pub fn add(&mut self, word: &str, note: &str) {
        self.entries.insert(word.to_string(), note.to_string());
    }

    /// Returns `true` if the word was bookmarked
    pub fn remove(&mut self, word: &str) -> bool {
        self.entries.remove(word).is_some()
    }

    pub fn get(&self, word: &str) -> Option<&str> {
        self.entries.get(word).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(word, note)| (word.as_str(), note.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Load bookmarks from disk. A missing file yields an empty set; lines
    /// without a separator are skipped.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read bookmarks file: {}", path.display()))?;

        let entries = content
            .lines()
            .filter_map(|line| {
                let (word, note) = line.split_once(SEPARATOR)?;
                let word = word.trim();
                (!word.is_empty()).then(|| (word.to_string(), note.to_string()))
            })
            .collect();

        Ok(Self { entries })
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create bookmarks directory: {}", parent.display())
            })?;
        }

        let mut out = String::new();
        for (word, note) in &self.entries {
            out.push_str(word);
            out.push(SEPARATOR);
            out.push_str(note);
            out.push('\n');
        }

        fs::write(path, out)
            .with_context(|| format!("Failed to write bookmarks file: {}", path.display()))?;
        Ok(())
    }
}
