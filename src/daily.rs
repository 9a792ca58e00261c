//! # Word of the Day
//!
//! Picks one stored word per day and caches the pick in a small file
//! (`word epoch-seconds`) so repeated runs within 24 hours show the same word.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::fs;
use std::path::Path;

use crate::tree::PrefixTree;

/// How long a cached pick stays valid
pub const PICK_TTL_SECS: i64 = 86_400;

/// Return today's word, reusing the cached pick while it is fresh and
/// still stored in `tree`.
///
/// A stale, unreadable or outdated cache is replaced by a new pick taken
/// from `tree`. Returns `None` when there is nothing to reuse and the tree
/// is empty.
pub fn word_of_the_day(
    tree: &PrefixTree,
    cache_path: &Path,
    now: DateTime<Utc>,
) -> Result<Option<String>> {
    if let Some((word, picked_at)) = read_cache(cache_path) {
        if now.timestamp() - picked_at < PICK_TTL_SECS {
            if tree.search(&word) {
                return Ok(Some(word));
            }
            tracing::debug!(word = %word, "cached word of the day is no longer stored");
        }
    }

    let Some(word) = pick_for_day(tree, now) else {
        return Ok(None);
    };

    if let Some(parent) = cache_path.parent() {
        fs::create_dir_all(parent).with_context(|| {
            format!("Failed to create word of the day directory: {}", parent.display())
        })?;
    }
    fs::write(cache_path, format!("{} {}", word, now.timestamp())).with_context(|| {
        format!(
            "Failed to write word of the day file: {}",
            cache_path.display()
        )
    })?;

    tracing::debug!(word = %word, "picked new word of the day");
    Ok(Some(word))
}

/// Deterministic pick: the day number since the epoch indexes the sorted
/// word list.
pub fn pick_for_day(tree: &PrefixTree, now: DateTime<Utc>) -> Option<String> {
    let words = tree.words();
    if words.is_empty() {
        return None;
    }
    let day = now.timestamp().div_euclid(PICK_TTL_SECS).unsigned_abs();
    let index = (day % words.len() as u64) as usize;
    words.into_iter().nth(index)
}

fn read_cache(path: &Path) -> Option<(String, i64)> {
    let content = fs::read_to_string(path).ok()?;
    let mut fields = content.split_whitespace();
    let word = fields.next()?.to_string();
    let picked_at = fields.next()?.parse().ok()?;
    Some((word, picked_at))
}
