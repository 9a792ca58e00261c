//! # Usage Tracking Module
//!
//! This module tracks how often each stored word is used and when it was last
//! accessed, independently of the tree that stores the words.
//!
//! ## Overview
//!
//! Every insertion into the word store counts as a usage event, as does every
//! successful lookup. The tracker feeds the "top N" ranking and the CSV
//! export, and is persisted between runs as a stats file.
//!
//! ## Data Format
//!
//! ```text
//! apple 12 1739870400
//! echo 3 1739956800
//! ```
//!
//! Each line is `word frequency last-access-epoch-seconds`.

mod storage;

pub use storage::{UsageRecord, UsageTracker};

/// Number of entries shown by the "top words" view when not configured
pub const DEFAULT_TOP_N: usize = 5;
