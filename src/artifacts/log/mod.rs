//! Commit history traversal
//!
//! - `rev_list`: reverse-chronological commit iteration over the commit DAG
//! - `path_finder`: nested tree descent from a snapshot root to one path
//! - `walker`: the path-filtered log walk built on both

use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::id::ObjectId;
use derive_new::new;
use std::path::PathBuf;

pub mod path_finder;
pub mod rev_list;
pub mod walker;

/// One walk request. Consumed by [`walker::LogWalker::new`]; a query holds
/// no state of its own and two identical queries over an unchanged store
/// yield identical results.
#[derive(Debug, Clone)]
pub struct LogQuery {
    /// Commit to start walking from, typically the resolved HEAD.
    pub start: ObjectId,
    /// When set, only surface commits where this path's content id changed.
    pub path: Option<PathBuf>,
    /// Maximum number of entries to yield; `None` is unbounded.
    pub max_count: Option<usize>,
}

impl LogQuery {
    pub fn new(start: ObjectId) -> Self {
        LogQuery {
            start,
            path: None,
            max_count: None,
        }
    }
}

/// A commit surfaced by a walk, paired with its id.
///
/// Downstream formatters consume `{hash, short hash, tree hash}` to build
/// source hyperlinks; the remaining commit metadata is carried for display.
#[derive(Debug, Clone, new)]
pub struct LogEntry {
    oid: ObjectId,
    commit: Commit,
}

impl LogEntry {
    pub fn oid(&self) -> &ObjectId {
        &self.oid
    }

    pub fn short_oid(&self) -> String {
        self.oid.to_short_oid()
    }

    pub fn tree_oid(&self) -> &ObjectId {
        self.commit.tree_oid()
    }

    pub fn commit(&self) -> &Commit {
        &self.commit
    }
}
