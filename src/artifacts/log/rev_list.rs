//! Reverse-chronological commit iteration
//!
//! Commits reachable from a start id are yielded newest-first: a max-heap
//! keyed by committer timestamp (insertion order breaks ties) with a
//! seen-set so merge diamonds surface each commit once. Parents are
//! enqueued first-parent-first as each commit is popped, which bounds
//! read-ahead to the current frontier and keeps the iteration lazy enough
//! for callers to abandon mid-walk.
//!
//! The commit graph is acyclic by construction, so iteration terminates
//! once every reachable commit has been popped.

use crate::artifacts::log::LogEntry;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::id::ObjectId;
use crate::artifacts::objects::ObjectSource;
use crate::errors::ResolveError;
use std::collections::{BinaryHeap, HashSet};

struct QueuedCommit {
    timestamp: chrono::DateTime<chrono::FixedOffset>,
    seq: u64,
    oid: ObjectId,
    commit: Commit,
}

impl PartialEq for QueuedCommit {
    fn eq(&self, other: &Self) -> bool {
        self.timestamp == other.timestamp && self.seq == other.seq
    }
}

impl Eq for QueuedCommit {}

impl PartialOrd for QueuedCommit {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueuedCommit {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // newest timestamp pops first; among equal timestamps the commit
        // enqueued earlier wins, keeping the order stable
        self.timestamp
            .cmp(&other.timestamp)
            .then(other.seq.cmp(&self.seq))
    }
}

pub struct RevList<'s, S: ObjectSource> {
    source: &'s S,
    queue: BinaryHeap<QueuedCommit>,
    seen: HashSet<ObjectId>,
    next_seq: u64,
    poisoned: bool,
}

impl<'s, S: ObjectSource> RevList<'s, S> {
    /// Start a walk at `start`. The start commit is loaded eagerly so an
    /// unknown id fails at construction, not on the first pull.
    pub fn new(source: &'s S, start: ObjectId) -> Result<Self, ResolveError> {
        let commit = source.load_commit(&start)?;

        let mut rev_list = RevList {
            source,
            queue: BinaryHeap::new(),
            seen: HashSet::from([start.clone()]),
            next_seq: 0,
            poisoned: false,
        };
        rev_list.enqueue(start, commit);

        Ok(rev_list)
    }

    fn enqueue(&mut self, oid: ObjectId, commit: Commit) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(QueuedCommit {
            timestamp: commit.committer().timestamp(),
            seq,
            oid,
            commit,
        });
    }

    /// Load a parent encountered mid-walk. A missing parent means the
    /// store lost an object that reachable history still references.
    fn load_parent(&self, oid: &ObjectId) -> Result<Commit, ResolveError> {
        match self.source.load_commit(oid) {
            Ok(commit) => Ok(commit),
            Err(ResolveError::ObjectNotFound(missing)) => {
                Err(ResolveError::StoreCorruption(missing))
            }
            Err(error) => Err(ResolveError::Traversal {
                oid: oid.clone(),
                source: Box::new(error),
            }),
        }
    }
}

impl<S: ObjectSource> Iterator for RevList<'_, S> {
    type Item = Result<LogEntry, ResolveError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.poisoned {
            return None;
        }

        let current = self.queue.pop()?;

        for parent in current.commit.parents() {
            if !self.seen.insert(parent.clone()) {
                continue;
            }
            match self.load_parent(parent) {
                Ok(commit) => self.enqueue(parent.clone(), commit),
                Err(error) => {
                    self.poisoned = true;
                    return Some(Err(error));
                }
            }
        }

        tracing::trace!(oid = %current.oid, "visiting commit");
        Some(Ok(LogEntry::new(current.oid, current.commit)))
    }
}
