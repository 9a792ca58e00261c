//! CSV export of the usage ranking.
//!
//! The table is a read-only projection of [`UsageTracker`] state:
//!
//! ```text
//! Word,Frequency,LastUsed
//! apple,12,2025-02-18 09:30:00
//! pear,1,N/A
//! ```

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use std::fs;
use std::path::Path;

use crate::usage::{UsageRecord, UsageTracker};

pub const CSV_HEADER: &str = "Word,Frequency,LastUsed";

/// Shown in the `LastUsed` column for words never accessed
pub const NEVER_USED: &str = "N/A";

/// Render every tracked word as CSV, most frequent first
pub fn render_csv(usage: &UsageTracker) -> String {
    let mut out = String::from(CSV_HEADER);
    out.push('\n');

    for (word, record) in usage.top_records(usize::MAX) {
        out.push_str(&format!(
            "{},{},{}\n",
            csv_field(word),
            record.frequency,
            format_last_used(record)
        ));
    }
    out
}

/// Write the CSV table to `path`. Returns the number of rows written.
pub fn export_csv(usage: &UsageTracker, path: &Path) -> Result<usize> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_context(|| {
            format!("Failed to create export directory: {}", parent.display())
        })?;
    }

    fs::write(path, render_csv(usage))
        .with_context(|| format!("Failed to write export file: {}", path.display()))?;

    tracing::info!(path = %path.display(), rows = usage.len(), "exported usage stats");
    Ok(usage.len())
}

/// Format a record's last access in local time
pub fn format_last_used(record: &UsageRecord) -> String {
    record
        .last_access_time()
        .map(|utc| {
            DateTime::<Local>::from(utc)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string()
        })
        .unwrap_or_else(|| NEVER_USED.to_string())
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_render_csv_orders_by_frequency() {
        let mut usage = UsageTracker::new();
        usage.record_usage("pear");
        usage.record_usage("apple");
        usage.record_usage("apple");

        let csv = render_csv(&usage);
        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(lines[0], CSV_HEADER);
        assert!(lines[1].starts_with("apple,2,"));
        assert!(lines[2].starts_with("pear,1,"));
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_format_last_used_never() {
        assert_eq!(format_last_used(&UsageRecord::default()), NEVER_USED);
    }

    #[test]
    fn test_format_last_used_timestamp() {
        let record = UsageRecord {
            frequency: 1,
            last_access: 1_700_000_000,
        };
        let formatted = format_last_used(&record);
        // Local timezone varies; only check the shape
        assert_eq!(formatted.len(), "2023-11-14 22:13:20".len());
        assert!(formatted.starts_with("2023-11-1"));
    }

    #[test]
    fn test_csv_field_quoting() {
        assert_eq!(csv_field("plain"), "plain");
        assert_eq!(csv_field("a,b"), "\"a,b\"");
        assert_eq!(csv_field("say\"hi\""), "\"say\"\"hi\"\"\"");
    }

    #[test]
    fn test_export_csv_writes_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out").join("export.csv");

        let mut usage = UsageTracker::new();
        usage.record_usage("echo");

        assert_eq!(export_csv(&usage, &path).unwrap(), 1);
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("Word,Frequency,LastUsed\necho,1,"));
    }

    #[test]
    fn test_export_empty_tracker() {
        let usage = UsageTracker::new();
        assert_eq!(render_csv(&usage), "Word,Frequency,LastUsed\n");
    }
}
