//! Wordtree - a personal word store
//!
//! This library provides a compressed prefix tree for exact, prefix and
//! approximate word lookup, per-word usage analytics, and the flat-file
//! persistence and commands built around them.

pub mod bookmarks;
pub mod cli;
pub mod config;
pub mod daily;
pub mod export;
pub mod session;
pub mod store;
pub mod tree;
pub mod usage;
pub mod wordlist;
