//! # Usage Storage
//!
//! Tracks how often each word is used and when it was last touched, and
//! reads/writes that data as a plain text stats file.
//!
//! ## File Format
//!
//! ```text
//! <word> <frequency> <last-access-epoch-seconds>
//! ```
//!
//! One record per line, fields separated by single spaces. A last access of
//! `0` means the word has never been accessed.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Usage statistics for a single word
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UsageRecord {
    /// Number of recorded usage events
    pub frequency: u64,
    /// Seconds since the Unix epoch, `0` when never accessed
    pub last_access: i64,
}

impl UsageRecord {
    /// The last access as a timestamp, or `None` if the word was never accessed
    pub fn last_access_time(&self) -> Option<DateTime<Utc>> {
        if self.last_access == 0 {
            return None;
        }
        DateTime::from_timestamp(self.last_access, 0)
    }
}

/// Per-word usage tracking, keyed by the verbatim word
#[derive(Debug, Clone, Default)]
pub struct UsageTracker {
    records: HashMap<String, UsageRecord>,
}

impl UsageTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a usage event for `word` at the current time
    pub fn record_usage(&mut self, word: &str) {
        self.record_usage_at(word, Utc::now().timestamp());
    }

    /// Record a usage event for `word` at an explicit time
    pub fn record_usage_at(&mut self, word: &str, timestamp: i64) {
        let record = self.records.entry(word.to_string()).or_default();
        record.frequency = record.frequency.saturating_add(1);
        record.last_access = timestamp;
    }

    pub fn get(&self, word: &str) -> Option<&UsageRecord> {
        self.records.get(word)
    }

    /// Tracked words sorted by frequency (descending), truncated to `n`.
    ///
    /// Equal frequencies are ordered alphabetically.
    pub fn top_n(&self, n: usize) -> Vec<(String, u64)> {
        self.top_records(n)
            .into_iter()
            .map(|(word, record)| (word.to_string(), record.frequency))
            .collect()
    }

    /// Same ordering as [`UsageTracker::top_n`] but borrowing full records
    pub fn top_records(&self, n: usize) -> Vec<(&str, &UsageRecord)> {
        let mut entries: Vec<_> = self
            .records
            .iter()
            .map(|(word, record)| (word.as_str(), record))
            .collect();
        entries.sort_by(|a, b| b.1.frequency.cmp(&a.1.frequency).then_with(|| a.0.cmp(b.0)));
        entries.truncate(n);
        entries
    }

    /// Check if there are any recorded usages
    pub fn has_usage_data(&self) -> bool {
        !self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Replace all usage data with the contents of a stats file.
    ///
    /// A missing file leaves the tracker empty. Lines that do not parse are
    /// skipped.
    pub fn load(&mut self, path: &Path) -> Result<()> {
        self.records.clear();

        if !path.exists() {
            tracing::debug!(path = %path.display(), "no stats file, starting empty");
            return Ok(());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read stats file: {}", path.display()))?;
        self.records = parse_stats(&content);

        tracing::debug!(path = %path.display(), words = self.records.len(), "loaded usage stats");
        Ok(())
    }

    /// Write every tracked word to a stats file, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create stats directory: {}", parent.display())
            })?;
        }

        fs::write(path, render_stats(&self.records))
            .with_context(|| format!("Failed to write stats file: {}", path.display()))?;

        tracing::debug!(path = %path.display(), words = self.records.len(), "saved usage stats");
        Ok(())
    }
}

/// Parse stats file content, skipping malformed lines
fn parse_stats(content: &str) -> HashMap<String, UsageRecord> {
    let mut records = HashMap::new();

    for (line_idx, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match parse_stats_line(line) {
            Some((word, record)) => {
                records.insert(word.to_string(), record);
            }
            None => {
                tracing::warn!(line = line_idx + 1, content = line, "skipping malformed stats line");
            }
        }
    }

    records
}

fn parse_stats_line(line: &str) -> Option<(&str, UsageRecord)> {
    let mut fields = line.split_whitespace();
    let word = fields.next()?;
    let frequency = fields.next()?.parse().ok()?;
    let last_access = fields.next()?.parse().ok()?;
    Some((
        word,
        UsageRecord {
            frequency,
            last_access,
        },
    ))
}

/// Render records one per line, sorted by word for stable output
fn render_stats(records: &HashMap<String, UsageRecord>) -> String {
    let mut words: Vec<_> = records.iter().collect();
    words.sort_by(|a, b| a.0.cmp(b.0));

    let mut out = String::new();
    for (word, record) in words {
        out.push_str(&format!(
            "{} {} {}\n",
            word, record.frequency, record.last_access
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_usage_tracker_new() {
        let tracker = UsageTracker::new();
        assert!(!tracker.has_usage_data());
        assert!(tracker.top_n(5).is_empty());
    }

    #[test]
    fn test_record_usage() {
        let mut tracker = UsageTracker::new();

        tracker.record_usage("build");
        assert_eq!(tracker.len(), 1);
        assert_eq!(tracker.get("build").unwrap().frequency, 1);

        tracker.record_usage("build");
        assert_eq!(tracker.get("build").unwrap().frequency, 2);
        assert!(tracker.get("build").unwrap().last_access > 0);

        tracker.record_usage("test");
        assert_eq!(tracker.len(), 2);
        assert_eq!(tracker.get("test").unwrap().frequency, 1);
    }

    #[test]
    fn test_record_usage_at_sets_last_access() {
        let mut tracker = UsageTracker::new();
        tracker.record_usage_at("echo", 100);
        tracker.record_usage_at("echo", 250);

        let record = tracker.get("echo").unwrap();
        assert_eq!(record.frequency, 2);
        assert_eq!(record.last_access, 250);
    }

    #[test]
    fn test_top_n() {
        let mut tracker = UsageTracker::new();

        for _ in 0..10 {
            tracker.record_usage("alpha");
        }
        for _ in 0..5 {
            tracker.record_usage("beta");
        }
        for _ in 0..3 {
            tracker.record_usage("gamma");
        }

        let top = tracker.top_n(2);
        assert_eq!(
            top,
            vec![("alpha".to_string(), 10), ("beta".to_string(), 5)]
        );
    }

    #[test]
    fn test_top_n_more_than_available() {
        let mut tracker = UsageTracker::new();
        tracker.record_usage("one");
        tracker.record_usage("two");

        assert_eq!(tracker.top_n(10).len(), 2);
        assert!(tracker.top_n(0).is_empty());
    }

    #[test]
    fn test_top_n_ties_are_alphabetical() {
        let mut tracker = UsageTracker::new();
        tracker.record_usage("zeta");
        tracker.record_usage("alpha");
        tracker.record_usage("mu");

        let words: Vec<_> = tracker.top_n(3).into_iter().map(|(w, _)| w).collect();
        assert_eq!(words, vec!["alpha", "mu", "zeta"]);
    }

    #[test]
    fn test_last_access_time() {
        let never = UsageRecord::default();
        assert!(never.last_access_time().is_none());

        let seen = UsageRecord {
            frequency: 1,
            last_access: 1_700_000_000,
        };
        assert_eq!(seen.last_access_time().unwrap().timestamp(), 1_700_000_000);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let stats_path = temp_dir.path().join("nested").join("stats.txt");

        let mut tracker = UsageTracker::new();
        tracker.record_usage_at("apple", 1_700_000_000);
        tracker.record_usage_at("apple", 1_700_000_100);
        tracker.record_usage_at("pear", 1_700_000_050);
        tracker.save(&stats_path).unwrap();

        let mut loaded = UsageTracker::new();
        loaded.load(&stats_path).unwrap();

        assert_eq!(loaded.top_n(10), tracker.top_n(10));
        assert_eq!(loaded.get("apple").unwrap().last_access, 1_700_000_100);
    }

    #[test]
    fn test_saved_format() {
        let temp_dir = TempDir::new().unwrap();
        let stats_path = temp_dir.path().join("stats.txt");

        let mut tracker = UsageTracker::new();
        tracker.record_usage_at("pear", 42);
        tracker.record_usage_at("apple", 7);
        tracker.save(&stats_path).unwrap();

        let content = fs::read_to_string(&stats_path).unwrap();
        assert_eq!(content, "apple 1 7\npear 1 42\n");
    }

    #[test]
    fn test_load_replaces_existing_data() {
        let temp_dir = TempDir::new().unwrap();
        let stats_path = temp_dir.path().join("stats.txt");
        fs::write(&stats_path, "kiwi 4 1000\n").unwrap();

        let mut tracker = UsageTracker::new();
        tracker.record_usage("mango");
        tracker.load(&stats_path).unwrap();

        assert!(tracker.get("mango").is_none());
        assert_eq!(tracker.get("kiwi").unwrap().frequency, 4);
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();

        let mut tracker = UsageTracker::new();
        tracker.record_usage("mango");
        tracker
            .load(&temp_dir.path().join("does_not_exist.txt"))
            .unwrap();

        assert!(!tracker.has_usage_data());
    }

    #[test]
    fn test_load_skips_malformed_lines() {
        let temp_dir = TempDir::new().unwrap();
        let stats_path = temp_dir.path().join("stats.txt");
        fs::write(
            &stats_path,
            "good 3 100\nmissing_fields 2\nbad -1 100\nnotanumber x y\n\nalso_good 1 0\n",
        )
        .unwrap();

        let mut tracker = UsageTracker::new();
        tracker.load(&stats_path).unwrap();

        assert_eq!(tracker.len(), 2);
        assert_eq!(tracker.get("good").unwrap().frequency, 3);
        assert_eq!(tracker.get("also_good").unwrap().last_access, 0);
    }

    #[test]
    fn test_frequency_saturates_at_max() {
        let temp_dir = TempDir::new().unwrap();
        let stats_path = temp_dir.path().join("stats.txt");
        fs::write(&stats_path, "w 18446744073709551615 0\n").unwrap();

        let mut tracker = UsageTracker::new();
        tracker.load(&stats_path).unwrap();
        tracker.record_usage_at("w", 42);

        let record = tracker.get("w").unwrap();
        assert_eq!(record.frequency, u64::MAX);
        assert_eq!(record.last_access, 42);
    }
}
