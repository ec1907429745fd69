//! Composition root
//!
//! Wires the object database, reference files and working copy of one
//! repository together and exposes the resolver operations: head
//! resolution, history walks and the dirty check. The repository is opened
//! read-only; no operation here creates, mutates or deletes anything.

use crate::areas::database::Database;
use crate::areas::refs::{HeadInfo, Refs};
use crate::areas::workspace::{Workspace, WorkingCopyReader};
use crate::artifacts::log::path_finder::PathFinder;
use crate::artifacts::log::walker::LogWalker;
use crate::artifacts::log::LogQuery;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::id::ObjectId;
use crate::artifacts::objects::ObjectSource;
use crate::errors::ResolveError;
use std::cell::{RefCell, RefMut};
use std::path::Path;

pub struct Repository {
    path: Box<Path>,
    writer: RefCell<Box<dyn std::io::Write>>,
    database: Database,
    workspace: Workspace,
    refs: Refs,
}

impl Repository {
    /// Open the repository rooted at `path`. Fails when the directory does
    /// not exist; a directory without repository metadata only fails later,
    /// on the first read that needs it.
    pub fn new(path: &str, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let path = Path::new(path).canonicalize()?;

        let database = Database::new(path.join(".git").join("objects").into_boxed_path());
        let workspace = Workspace::new(path.clone().into_boxed_path());
        let refs = Refs::new(path.join(".git").into_boxed_path());

        Ok(Repository {
            path: path.into_boxed_path(),
            writer: RefCell::new(writer),
            database,
            workspace,
            refs,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    /// Hash of the current branch tip.
    pub fn resolve_head(&self) -> Result<ObjectId, ResolveError> {
        self.refs.resolve_head()
    }

    /// Branch tip together with the branch name, when not detached.
    pub fn head_info(&self) -> Result<HeadInfo, ResolveError> {
        self.refs.head_info()
    }

    /// Start a lazy history walk for `query`.
    pub fn log(&self, query: LogQuery) -> Result<LogWalker<'_, Database>, ResolveError> {
        LogWalker::new(&self.database, query)
    }

    /// Whether the working-copy file at `path` differs from the content
    /// recorded for it in the HEAD commit's tree. Untracked files and
    /// tracked files missing from the working copy are dirty; the
    /// comparison is id-to-id, so no blob is ever read from the store.
    pub fn is_dirty(&self, path: &Path) -> Result<bool, ResolveError> {
        let head = self.refs.resolve_head()?;
        let commit = self.database.load_commit(&head)?;

        let finder = PathFinder::new(&self.database);
        let Some(tracked) = finder.find(commit.tree_oid(), path)? else {
            return Ok(true);
        };

        let Some(content) = self.workspace.read_file(path)? else {
            return Ok(true);
        };

        let working_oid = Blob::new(content).object_id();
        tracing::debug!(
            path = %path.display(),
            tracked = %tracked.oid,
            working = %working_oid,
            "dirty check"
        );

        Ok(working_oid != tracked.oid)
    }
}
