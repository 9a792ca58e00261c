//! # Tree Module
//!
//! The compressed prefix tree (radix tree) that indexes the word store.
//!
//! ## Components
//!
//! - [`PrefixTree`] - insert, exact search, removal with edge compaction,
//!   prefix enumeration and edit-distance suggestions
//! - [`TreeNode`] - a node and its exclusively owned children
//! - [`levenshtein`] - the edit distance used by suggestions
//!
//! ## Shape
//!
//! ```text
//! insert "tender", "ten", "tent"
//!
//! (root)
//!   └── "ten" ●
//!         ├── "der" ●
//!         └── "t" ●
//! ```
//!
//! `●` marks a terminal node: the path from the root spells a stored word.

pub mod distance;
pub mod node;
pub mod radix;

pub use distance::levenshtein;
pub use node::TreeNode;
pub use radix::{PrefixTree, DEFAULT_SUGGEST_DISTANCE};
