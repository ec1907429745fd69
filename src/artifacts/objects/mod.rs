//! Git object types read by the resolver.
//!
//! All content is addressed by SHA-1: identical bytes always produce the
//! same id, which is what lets the history walker reduce change detection
//! to an id comparison between consecutive tree snapshots. Three kinds are
//! read here:
//!
//! - **Commit**: snapshot pointer with parent linkage and metadata
//! - **Tree**: directory snapshot mapping entry names to (mode, id)
//! - **Blob**: file content, touched only to hash the working copy
//!
//! On disk every object is `<kind> <size>\0<payload>`, zlib-deflated.
//! This crate only decodes commits and trees; blob payloads are never read
//! through the store.

use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::id::ObjectId;
use crate::artifacts::objects::kind::ObjectKind;
use crate::artifacts::objects::tree::Tree;
use crate::errors::ResolveError;

pub mod blob;
pub mod commit;
pub mod id;
pub mod kind;
pub mod mode;
pub mod tree;

/// Length of a SHA-1 hash in hexadecimal form
pub const OBJECT_ID_LENGTH: usize = 40;

/// Read capability over a content-addressed object store.
///
/// This is the seam between storage layout and traversal logic: the commit
/// walker and tree path resolver are generic over it, so they run
/// unmodified against the on-disk database or an in-memory fixture. History
/// is immutable, so implementations never need invalidation and `&self`
/// reads require no cross-query coordination.
pub trait ObjectSource {
    /// Load the commit at `oid`, failing with
    /// [`ResolveError::TypeMismatch`] if the object is some other kind.
    fn load_commit(&self, oid: &ObjectId) -> Result<Commit, ResolveError>;

    /// Load the tree at `oid`, failing with
    /// [`ResolveError::TypeMismatch`] if the object is some other kind.
    fn load_tree(&self, oid: &ObjectId) -> Result<Tree, ResolveError>;

    /// Determine the kind of the object at `oid` without decoding its
    /// payload. This is as deep as the resolver ever inspects blobs.
    fn object_kind(&self, oid: &ObjectId) -> Result<ObjectKind, ResolveError>;
}
