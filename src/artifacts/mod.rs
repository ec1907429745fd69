//! Core data structures and algorithms
//!
//! - `log`: commit history traversal with blob-level change detection
//! - `objects`: read-only git object types (commit, tree, blob hashing)

pub mod log;
pub mod objects;
