//! Loose object database
//!
//! Reads zlib-deflated loose objects from `.git/objects`, addressed by
//! their content id. The three typed reads distinguish "no such object"
//! from "object of the wrong kind" so callers can tell a missing path
//! apart from unusual repository content. No caching happens here; history
//! is immutable, so a memoizing layer above would be safe but is not
//! needed for correctness.

use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::id::ObjectId;
use crate::artifacts::objects::kind::ObjectKind;
use crate::artifacts::objects::tree::Tree;
use crate::artifacts::objects::ObjectSource;
use crate::errors::ResolveError;
use bytes::Bytes;
use derive_new::new;
use std::io::{Cursor, Read};
use std::path::Path;

#[derive(Debug, new)]
pub struct Database {
    /// Path to the objects directory (typically `.git/objects`)
    path: Box<Path>,
}

impl Database {
    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    /// Read and inflate the loose object file for `oid`.
    fn read_object(&self, oid: &ObjectId) -> Result<Bytes, ResolveError> {
        let object_path = self.path.join(oid.to_path());

        let compressed = match std::fs::read(&object_path) {
            Ok(bytes) => bytes,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
                return Err(ResolveError::ObjectNotFound(oid.clone()));
            }
            Err(error) => return Err(ResolveError::Io(error)),
        };

        let mut decoder = flate2::read::ZlibDecoder::new(compressed.as_slice());
        let mut content = Vec::new();
        decoder
            .read_to_end(&mut content)
            .map_err(|error| ResolveError::CorruptObject {
                oid: oid.clone(),
                source: Box::new(error),
            })?;

        Ok(content.into())
    }

    /// Inflate `oid` and consume its header, leaving the reader at the
    /// start of the payload. Validates the advertised payload size.
    fn read_payload(&self, oid: &ObjectId) -> Result<(ObjectKind, Cursor<Bytes>), ResolveError> {
        let content = self.read_object(oid)?;
        let mut reader = Cursor::new(content);

        let (kind, size) =
            ObjectKind::parse_header(&mut reader).map_err(|error| self.corrupt(oid, error))?;

        let remaining = reader.get_ref().len() as u64 - reader.position();
        if remaining != size as u64 {
            return Err(self.corrupt(
                oid,
                anyhow::anyhow!("payload is {remaining} bytes, header advertises {size}"),
            ));
        }

        tracing::trace!(%oid, kind = %kind, size, "read loose object");
        Ok((kind, reader))
    }

    fn corrupt(&self, oid: &ObjectId, error: anyhow::Error) -> ResolveError {
        ResolveError::CorruptObject {
            oid: oid.clone(),
            source: error.into(),
        }
    }

    fn mismatch(&self, oid: &ObjectId, expected: ObjectKind, actual: ObjectKind) -> ResolveError {
        ResolveError::TypeMismatch {
            oid: oid.clone(),
            expected,
            actual,
        }
    }
}

impl ObjectSource for Database {
    fn load_commit(&self, oid: &ObjectId) -> Result<Commit, ResolveError> {
        let (kind, reader) = self.read_payload(oid)?;
        match kind {
            ObjectKind::Commit => Commit::decode(reader).map_err(|error| self.corrupt(oid, error)),
            actual => Err(self.mismatch(oid, ObjectKind::Commit, actual)),
        }
    }

    fn load_tree(&self, oid: &ObjectId) -> Result<Tree, ResolveError> {
        let (kind, reader) = self.read_payload(oid)?;
        match kind {
            ObjectKind::Tree => Tree::decode(reader).map_err(|error| self.corrupt(oid, error)),
            actual => Err(self.mismatch(oid, ObjectKind::Tree, actual)),
        }
    }

    fn object_kind(&self, oid: &ObjectId) -> Result<ObjectKind, ResolveError> {
        let (kind, _) = self.read_payload(oid)?;
        Ok(kind)
    }
}
