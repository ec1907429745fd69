//! Working copy reads
//!
//! The only thing the resolver needs from the checked-out tree is the raw
//! bytes of a single tracked file, for hashing against the id recorded in
//! the HEAD snapshot. Reads go through the `WorkingCopyReader` capability
//! so the dirty check is testable without a real checkout.

use crate::errors::ResolveError;
use bytes::Bytes;
use derive_new::new;
use std::path::Path;

/// Read capability over the checked-out working copy.
pub trait WorkingCopyReader {
    /// Bytes of the file at `path` relative to the workspace root, or
    /// `None` when no regular file exists there.
    fn read_file(&self, path: &Path) -> Result<Option<Bytes>, ResolveError>;
}

#[derive(Debug, new)]
pub struct Workspace {
    /// Path to the workspace root (the directory holding `.git`)
    path: Box<Path>,
}

impl Workspace {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl WorkingCopyReader for Workspace {
    fn read_file(&self, path: &Path) -> Result<Option<Bytes>, ResolveError> {
        let file_path = self.path.join(path);

        if file_path.is_dir() {
            return Ok(None);
        }

        match std::fs::read(&file_path) {
            Ok(bytes) => Ok(Some(bytes.into())),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(ResolveError::Io(error)),
        }
    }
}
