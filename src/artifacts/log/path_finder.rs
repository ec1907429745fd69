//! Nested tree descent
//!
//! Resolves a slash-separated path inside one committed snapshot to the
//! (mode, id) entry recorded there. Absence is a normal outcome during
//! history walks, so lookups fail softly with `Ok(None)` whenever a
//! component is missing or not a subtree. Only a tree object that history
//! references but the store cannot produce is a hard error: that gap would
//! otherwise be indistinguishable from "file unchanged".

use crate::artifacts::objects::id::ObjectId;
use crate::artifacts::objects::tree::{Tree, TreeEntry};
use crate::artifacts::objects::ObjectSource;
use crate::errors::ResolveError;
use derive_new::new;
use std::path::{Component, Path};

#[derive(new)]
pub struct PathFinder<'s, S: ObjectSource> {
    source: &'s S,
}

impl<S: ObjectSource> PathFinder<'_, S> {
    /// Resolve `path` against the snapshot rooted at `root_tree`.
    ///
    /// Every component except the last must name a subtree; the last is
    /// looked up directly, whatever its kind. The exact nested path is
    /// followed and nothing else: an entry of the same name elsewhere in
    /// the snapshot never matches.
    pub fn find(
        &self,
        root_tree: &ObjectId,
        path: &Path,
    ) -> Result<Option<TreeEntry>, ResolveError> {
        let mut components = Vec::new();
        for component in path.components() {
            match component {
                Component::Normal(name) => match name.to_str() {
                    Some(name) => components.push(name),
                    // a non-UTF-8 name cannot appear in a decoded tree
                    None => return Ok(None),
                },
                Component::CurDir => continue,
                // absolute or parent-relative paths never address a snapshot
                _ => return Ok(None),
            }
        }

        let Some((last, intermediate)) = components.split_last() else {
            return Ok(None);
        };

        let mut tree = match self.load_subtree(root_tree)? {
            Some(tree) => tree,
            None => return Ok(None),
        };

        for name in intermediate {
            let next_oid = match tree.entry(name) {
                Some(entry) if entry.is_tree() => entry.oid.clone(),
                _ => return Ok(None),
            };
            tree = match self.load_subtree(&next_oid)? {
                Some(subtree) => subtree,
                None => return Ok(None),
            };
        }

        Ok(tree.entry(last).cloned())
    }

    /// Load a tree that reachable history points at. A kind mismatch is
    /// folded into absence; a missing object is store corruption.
    fn load_subtree(&self, oid: &ObjectId) -> Result<Option<Tree>, ResolveError> {
        match self.source.load_tree(oid) {
            Ok(tree) => Ok(Some(tree)),
            Err(ResolveError::TypeMismatch { .. }) => Ok(None),
            Err(ResolveError::ObjectNotFound(missing)) => {
                Err(ResolveError::StoreCorruption(missing))
            }
            Err(error) => Err(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::log::memory::{oid, MemoryStore};
    use std::path::PathBuf;

    #[test]
    fn finds_entry_at_the_snapshot_root() {
        let mut store = MemoryStore::new();
        let blob = store.add_blob(1);
        let root = store.add_tree(100, &[("readme.md", blob.clone(), false)]);

        let finder = PathFinder::new(&store);
        let entry = finder
            .find(&root, &PathBuf::from("readme.md"))
            .unwrap()
            .unwrap();
        assert_eq!(entry.oid, blob);
    }

    #[test]
    fn descends_nested_subtrees() {
        let mut store = MemoryStore::new();
        let blob = store.add_blob(1);
        let leaf = store.add_tree(101, &[("c.rs", blob.clone(), false)]);
        let middle = store.add_tree(102, &[("b", leaf, true)]);
        let root = store.add_tree(103, &[("a", middle, true)]);

        let finder = PathFinder::new(&store);
        let entry = finder
            .find(&root, &PathBuf::from("a/b/c.rs"))
            .unwrap()
            .unwrap();
        assert_eq!(entry.oid, blob);
    }

    #[test]
    fn missing_component_is_absent_not_an_error() {
        let mut store = MemoryStore::new();
        let blob = store.add_blob(1);
        let root = store.add_tree(100, &[("readme.md", blob, false)]);

        let finder = PathFinder::new(&store);
        assert!(finder.find(&root, &PathBuf::from("missing.md")).unwrap().is_none());
        assert!(finder.find(&root, &PathBuf::from("a/b/c")).unwrap().is_none());
    }

    #[test]
    fn intermediate_blob_is_absent_even_if_the_leaf_name_exists_elsewhere() {
        let mut store = MemoryStore::new();
        let blob = store.add_blob(1);
        let c_blob = store.add_blob(2);
        let elsewhere = store.add_tree(101, &[("c", c_blob, false)]);
        // "a" is a blob, not a subtree; a file named "c" lives under "d"
        let root = store.add_tree(
            102,
            &[("a", blob, false), ("d", elsewhere, true)],
        );

        let finder = PathFinder::new(&store);
        assert!(finder.find(&root, &PathBuf::from("a/b/c")).unwrap().is_none());
    }

    #[test]
    fn subtree_entry_pointing_at_a_blob_object_is_absent() {
        let mut store = MemoryStore::new();
        let blob = store.add_blob(1);
        // the entry claims to be a directory but the object is a blob
        let root = store.add_tree(100, &[("a", blob, true)]);

        let finder = PathFinder::new(&store);
        assert!(finder.find(&root, &PathBuf::from("a/b")).unwrap().is_none());
    }

    #[test]
    fn missing_tree_object_is_store_corruption() {
        let mut store = MemoryStore::new();
        // subtree 55 is referenced but never inserted
        let root = store.add_tree(100, &[("src", oid(55), true)]);

        let finder = PathFinder::new(&store);
        match finder.find(&root, &PathBuf::from("src/lib.rs")) {
            Err(ResolveError::StoreCorruption(missing)) => assert_eq!(missing, oid(55)),
            other => panic!("expected store corruption, got {other:?}"),
        }
    }

    #[test]
    fn empty_and_escaping_paths_are_absent() {
        let mut store = MemoryStore::new();
        let blob = store.add_blob(1);
        let root = store.add_tree(100, &[("readme.md", blob, false)]);

        let finder = PathFinder::new(&store);
        assert!(finder.find(&root, &PathBuf::from("")).unwrap().is_none());
        assert!(finder.find(&root, &PathBuf::from("/readme.md")).unwrap().is_none());
        assert!(finder.find(&root, &PathBuf::from("../readme.md")).unwrap().is_none());
    }
}
