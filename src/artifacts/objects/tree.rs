//! Git tree object
//!
//! A tree is one directory level of a snapshot: a mapping from entry name
//! to (mode, object id). Entry names are unique within a tree; traversal
//! correctness does not depend on their ordering, so entries are kept in a
//! plain name-keyed map. The resolver reads trees and never builds them.
//!
//! ## Format
//!
//! Payload is a sequence of `<mode> <name>\0<20-byte-sha1>` records with no
//! separators.

use crate::artifacts::objects::id::ObjectId;
use crate::artifacts::objects::mode::EntryMode;
use anyhow::Context;
use derive_new::new;
use std::collections::BTreeMap;
use std::io::BufRead;

/// One (mode, id) record inside a tree.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct TreeEntry {
    pub oid: ObjectId,
    pub mode: EntryMode,
}

impl TreeEntry {
    pub fn is_tree(&self) -> bool {
        self.mode.is_tree()
    }
}

/// One directory level of a committed snapshot.
#[derive(Debug, Clone, Default, new)]
pub struct Tree {
    entries: BTreeMap<String, TreeEntry>,
}

impl Tree {
    /// Decode a tree payload, header already consumed.
    pub fn decode(mut reader: impl BufRead) -> anyhow::Result<Self> {
        let mut entries = BTreeMap::new();

        let mut mode_bytes = Vec::new();
        let mut name_bytes = Vec::new();

        loop {
            mode_bytes.clear();
            let read = reader.read_until(b' ', &mut mode_bytes)?;
            if read == 0 {
                break; // clean EOF between entries
            }
            if mode_bytes.pop() != Some(b' ') {
                anyhow::bail!("unexpected EOF in tree entry mode");
            }
            let mode = EntryMode::from_octal_str(std::str::from_utf8(&mode_bytes)?)?;

            name_bytes.clear();
            let read = reader.read_until(b'\0', &mut name_bytes)?;
            if read == 0 || name_bytes.pop() != Some(b'\0') {
                anyhow::bail!("unexpected EOF in tree entry name");
            }
            let name = std::str::from_utf8(&name_bytes)?.to_owned();

            let oid =
                ObjectId::read_binary_from(&mut reader).context("unexpected EOF in tree entry id")?;

            entries.insert(name, TreeEntry::new(oid, mode));
        }

        Ok(Tree { entries })
    }

    /// Look up a direct child by exact name. No globbing, no recursion.
    pub fn entry(&self, name: &str) -> Option<&TreeEntry> {
        self.entries.get(name)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&String, &TreeEntry)> {
        self.entries.iter()
    }
}
