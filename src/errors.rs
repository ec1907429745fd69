//! Error taxonomy for history resolution.
//!
//! Absence of a path inside a snapshot is not an error: tree lookups return
//! `Ok(None)` so a history walk can treat "file did not exist in this
//! commit" as a normal outcome. The variants here cover everything else,
//! from per-call failures a caller may recover from (`HeadParse`,
//! `RefNotFound`) to conditions that abort a whole query (`StoreCorruption`,
//! `Traversal`). A query must never be silently truncated: the walker
//! surfaces these instead of returning a shortened result.

use crate::artifacts::objects::id::ObjectId;
use crate::artifacts::objects::kind::ObjectKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResolveError {
    /// No object with this id exists in the object database.
    #[error("object {0} not found in the object database")]
    ObjectNotFound(ObjectId),

    /// The object exists but is not the kind the caller asked for.
    #[error("object {oid} is a {actual}, expected a {expected}")]
    TypeMismatch {
        oid: ObjectId,
        expected: ObjectKind,
        actual: ObjectKind,
    },

    /// The head pointer matches neither a raw object id nor `ref: <name>`,
    /// or a named ref introduces a second level of symbolic indirection.
    #[error("unable to parse head pointer {0:?}")]
    HeadParse(String),

    /// A symbolic reference names a ref file that does not exist.
    #[error("reference {0:?} does not exist")]
    RefNotFound(String),

    /// An object referenced by already-read history is missing from the
    /// store. The whole query aborts: a gap here would otherwise read as
    /// "file unchanged".
    #[error("object {0} referenced by history is missing, repository is incomplete")]
    StoreCorruption(ObjectId),

    /// The commit stream itself failed mid-iteration.
    #[error("commit traversal failed at {oid}")]
    Traversal {
        oid: ObjectId,
        #[source]
        source: Box<ResolveError>,
    },

    /// Object bytes that cannot be decoded as the advertised kind.
    #[error("malformed object {oid}")]
    CorruptObject {
        oid: ObjectId,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ResolveError {
    /// True for conditions that invalidate an entire in-flight query, as
    /// opposed to a single lookup.
    pub fn is_fatal_for_query(&self) -> bool {
        matches!(
            self,
            ResolveError::StoreCorruption(_) | ResolveError::Traversal { .. }
        )
    }
}
