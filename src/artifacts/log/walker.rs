//! Path-filtered log walk
//!
//! The walk surfaces the commits at which a path's recorded content id
//! changed, holding each candidate one iteration behind the cursor: when
//! the id resolved in the commit now under inspection differs from the one
//! resolved in the previously visited (newer) commit, the previous commit
//! is the one that introduced the newer content, and it is emitted.
//!
//! The held state is an explicit machine (`Empty` → `Tracking` → `Done`)
//! owned by a single walk, so independent queries share nothing. Exits
//! differ deliberately: exhausting the commit stream emits the pending
//! tracked entry one final time, while running out of budget or losing the
//! path does not.

use crate::artifacts::log::path_finder::PathFinder;
use crate::artifacts::log::rev_list::RevList;
use crate::artifacts::log::{LogEntry, LogQuery};
use crate::artifacts::objects::id::ObjectId;
use crate::artifacts::objects::ObjectSource;
use crate::errors::ResolveError;
use std::path::{Path, PathBuf};

enum TrackState {
    /// No commit visited yet.
    Empty,
    /// `previous` is the newest commit whose emission is still pending;
    /// `previous_oid` is the content id the filtered path resolved to in
    /// its snapshot.
    Tracking {
        previous: LogEntry,
        previous_oid: Option<ObjectId>,
    },
    /// The walk is over; no further pulls touch the store.
    Done,
}

/// Lazy iterator over the commits matching one [`LogQuery`].
///
/// Entries are produced on demand with no read-ahead beyond the commit
/// under inspection, so dropping the iterator cancels the query. After the
/// first `Err` the walk is over: partial results past a store failure
/// would be misleading.
pub struct LogWalker<'s, S: ObjectSource> {
    rev_list: RevList<'s, S>,
    finder: PathFinder<'s, S>,
    path: Option<PathBuf>,
    remaining: usize,
    state: TrackState,
}

impl<'s, S: ObjectSource> LogWalker<'s, S> {
    pub fn new(source: &'s S, query: LogQuery) -> Result<Self, ResolveError> {
        tracing::debug!(start = %query.start, path = ?query.path, "starting log walk");

        Ok(LogWalker {
            rev_list: RevList::new(source, query.start)?,
            finder: PathFinder::new(source),
            path: query.path,
            remaining: query.max_count.unwrap_or(usize::MAX),
            state: TrackState::Empty,
        })
    }

    fn next_unfiltered(&mut self) -> Option<Result<LogEntry, ResolveError>> {
        match self.rev_list.next() {
            None => {
                self.state = TrackState::Done;
                None
            }
            Some(Err(error)) => {
                self.state = TrackState::Done;
                Some(Err(error))
            }
            Some(Ok(entry)) => {
                self.remaining -= 1;
                Some(Ok(entry))
            }
        }
    }

    fn next_filtered(&mut self, path: &Path) -> Option<Result<LogEntry, ResolveError>> {
        loop {
            let entry = match self.rev_list.next() {
                None => {
                    // stream exhausted: the tracked entry, if any, is the
                    // oldest state boundary and goes out once
                    let state = std::mem::replace(&mut self.state, TrackState::Done);
                    return match state {
                        TrackState::Tracking { previous, .. } => Some(Ok(previous)),
                        _ => None,
                    };
                }
                Some(Err(error)) => {
                    self.state = TrackState::Done;
                    return Some(Err(error));
                }
                Some(Ok(entry)) => entry,
            };

            let current_oid = match self.finder.find(entry.tree_oid(), path) {
                Ok(found) => found.map(|found| found.oid),
                Err(error) => {
                    self.state = TrackState::Done;
                    return Some(Err(error));
                }
            };
            let absent = current_oid.is_none();

            match std::mem::replace(&mut self.state, TrackState::Done) {
                TrackState::Empty => {
                    if absent {
                        // the path is already gone at the start commit
                        return None;
                    }
                    self.state = TrackState::Tracking {
                        previous: entry,
                        previous_oid: current_oid,
                    };
                }
                TrackState::Tracking {
                    previous,
                    previous_oid,
                } => {
                    if current_oid != previous_oid {
                        self.remaining -= 1;
                        if !absent && self.remaining > 0 {
                            self.state = TrackState::Tracking {
                                previous: entry,
                                previous_oid: current_oid,
                            };
                        }
                        return Some(Ok(previous));
                    }
                    if absent {
                        return None;
                    }
                    self.state = TrackState::Tracking {
                        previous: entry,
                        previous_oid: current_oid,
                    };
                }
                TrackState::Done => return None,
            }
        }
    }
}

impl<S: ObjectSource> Iterator for LogWalker<'_, S> {
    type Item = Result<LogEntry, ResolveError>;

    fn next(&mut self) -> Option<Self::Item> {
        if matches!(self.state, TrackState::Done) || self.remaining == 0 {
            self.state = TrackState::Done;
            return None;
        }

        match self.path.clone() {
            None => self.next_unfiltered(),
            Some(path) => self.next_filtered(&path),
        }
    }
}
