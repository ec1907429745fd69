//! On-disk repository builder for integration tests.
//!
//! Writes loose objects, ref files and working-copy files directly in the
//! format the resolver reads, so tests control every hash and timestamp
//! without shelling out to an installed git.

use flate2::write::ZlibEncoder;
use flate2::Compression;
use sha1::{Digest, Sha1};
use std::io::Write;
use std::path::{Path, PathBuf};

pub const FIXTURE_AUTHOR: &str = "Doc Fixture <docs@example.com>";

pub struct RepoFixture {
    root: PathBuf,
}

impl RepoFixture {
    /// Lay out an empty repository skeleton under `root`.
    pub fn init(root: &Path) -> Self {
        std::fs::create_dir_all(root.join(".git").join("objects"))
            .expect("Failed to create objects directory");
        std::fs::create_dir_all(root.join(".git").join("refs").join("heads"))
            .expect("Failed to create refs directory");

        RepoFixture {
            root: root.to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn write_blob(&self, content: &str) -> String {
        self.store_object("blob", content.as_bytes())
    }

    /// Store a tree from (mode, name, oid) triples; entries are sorted by
    /// name the way canonical trees are.
    pub fn write_tree(&self, entries: &[(&str, &str, &str)]) -> String {
        let mut entries = entries.to_vec();
        entries.sort_by_key(|(_, name, _)| name.to_string());

        let mut payload = Vec::new();
        for (mode, name, oid) in entries {
            payload.extend_from_slice(mode.as_bytes());
            payload.push(b' ');
            payload.extend_from_slice(name.as_bytes());
            payload.push(0);
            payload.extend_from_slice(&hex_to_bytes(oid));
        }

        self.store_object("tree", &payload)
    }

    pub fn write_commit(
        &self,
        tree: &str,
        parents: &[&str],
        timestamp: i64,
        message: &str,
    ) -> String {
        let mut lines = vec![format!("tree {tree}")];
        for parent in parents {
            lines.push(format!("parent {parent}"));
        }
        lines.push(format!("author {FIXTURE_AUTHOR} {timestamp} +0000"));
        lines.push(format!("committer {FIXTURE_AUTHOR} {timestamp} +0000"));
        lines.push(String::new());
        lines.push(message.to_string());

        self.store_object("commit", lines.join("\n").as_bytes())
    }

    pub fn set_branch(&self, name: &str, oid: &str) {
        let path = self
            .root
            .join(".git")
            .join("refs")
            .join("heads")
            .join(name);
        std::fs::write(path, format!("{oid}\n")).expect("Failed to write branch ref");
    }

    pub fn set_head_to_branch(&self, name: &str) {
        self.set_head_raw(&format!("ref: refs/heads/{name}\n"));
    }

    pub fn set_head_detached(&self, oid: &str) {
        self.set_head_raw(&format!("{oid}\n"));
    }

    pub fn set_head_raw(&self, content: &str) {
        std::fs::write(self.root.join(".git").join("HEAD"), content)
            .expect("Failed to write HEAD");
    }

    pub fn write_workfile(&self, relative: &str, content: &str) {
        let path = self.root.join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create workfile directory");
        }
        std::fs::write(path, content).expect("Failed to write working-copy file");
    }

    pub fn remove_workfile(&self, relative: &str) {
        std::fs::remove_file(self.root.join(relative)).expect("Failed to remove workfile");
    }

    /// Delete a loose object to simulate an incomplete store.
    pub fn remove_object(&self, oid: &str) {
        let (dir, file) = oid.split_at(2);
        let path = self.root.join(".git").join("objects").join(dir).join(file);
        std::fs::remove_file(path).expect("Failed to remove object");
    }

    fn store_object(&self, kind: &str, payload: &[u8]) -> String {
        let mut bytes = format!("{kind} {}\0", payload.len()).into_bytes();
        bytes.extend_from_slice(payload);

        let mut hasher = Sha1::new();
        hasher.update(&bytes);
        let oid: String = hasher
            .finalize()
            .iter()
            .map(|byte| format!("{byte:02x}"))
            .collect();

        let (dir, file) = oid.split_at(2);
        let object_dir = self.root.join(".git").join("objects").join(dir);
        std::fs::create_dir_all(&object_dir).expect("Failed to create object directory");

        let object_path = object_dir.join(file);
        if !object_path.exists() {
            let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
            encoder.write_all(&bytes).expect("Failed to compress object");
            let compressed = encoder.finish().expect("Failed to finish compression");
            std::fs::write(object_path, compressed).expect("Failed to write object");
        }

        oid
    }
}

fn hex_to_bytes(oid: &str) -> Vec<u8> {
    assert_eq!(oid.len(), 40, "object id {oid:?} is not 40 hex characters");
    (0..oid.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&oid[i..i + 2], 16).expect("valid hex pair"))
        .collect()
}

/// A three-commit repository on branch `main` where `notes.txt` changes
/// content in every commit.
pub struct LinearHistory {
    pub fixture: RepoFixture,
    pub root_commit: String,
    pub middle_commit: String,
    pub head_commit: String,
}

pub fn linear_history(root: &Path) -> LinearHistory {
    let fixture = RepoFixture::init(root);

    let blob_one = fixture.write_blob("version one");
    let blob_two = fixture.write_blob("version two");
    let blob_three = fixture.write_blob("version three");

    let tree_one = fixture.write_tree(&[("100644", "notes.txt", &blob_one)]);
    let tree_two = fixture.write_tree(&[("100644", "notes.txt", &blob_two)]);
    let tree_three = fixture.write_tree(&[("100644", "notes.txt", &blob_three)]);

    let root_commit = fixture.write_commit(&tree_one, &[], 1_700_000_100, "create notes");
    let middle_commit =
        fixture.write_commit(&tree_two, &[&root_commit], 1_700_000_200, "revise notes");
    let head_commit =
        fixture.write_commit(&tree_three, &[&middle_commit], 1_700_000_300, "final notes");

    fixture.set_branch("main", &head_commit);
    fixture.set_head_to_branch("main");

    LinearHistory {
        fixture,
        root_commit,
        middle_commit,
        head_commit,
    }
}
