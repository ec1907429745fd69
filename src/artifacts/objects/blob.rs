//! Working-copy blob hashing
//!
//! The dirty check never reads blob bytes through the object store; it
//! hashes the on-disk file with the store's own content-addressing scheme
//! (`blob <len>\0<bytes>` under SHA-1) so the result is directly comparable
//! with the id recorded in the HEAD tree.

use crate::artifacts::objects::id::ObjectId;
use bytes::Bytes;
use derive_new::new;
use sha1::{Digest, Sha1};

#[derive(Debug, Clone, new)]
pub struct Blob {
    content: Bytes,
}

impl Blob {
    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// Content-addressed id of this blob, as the store would assign it.
    pub fn object_id(&self) -> ObjectId {
        let mut hasher = Sha1::new();
        hasher.update(format!("blob {}\0", self.content.len()).as_bytes());
        hasher.update(&self.content);
        ObjectId::from_digest(&hasher.finalize())
    }
}
