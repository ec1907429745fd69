//! Head pointer and named references
//!
//! The head pointer is a single line of text: either exactly an object id
//! (detached) or `ref: <relative-ref-path>` naming a file that itself
//! contains an object id. Indirection depth is exactly 0 or 1; a symbolic
//! ref chaining to another symbolic ref is unsupported and fails as a
//! parse error. Anything else in the pointer is a parse error too, fatal
//! for the call but isolated: callers fall back to a no-link mode rather
//! than aborting a whole documentation build.
//!
//! ## File format
//!
//! - `HEAD`: `<40-hex-sha1>` or `ref: refs/heads/<branch>`
//! - `refs/heads/<branch>`: `<40-hex-sha1>`

use crate::artifacts::objects::id::ObjectId;
use crate::artifacts::objects::OBJECT_ID_LENGTH;
use crate::errors::ResolveError;
use derive_new::new;
use std::path::Path;

/// Regex for the symbolic form of a head pointer line
const SYMREF_REGEX: &str = r"^ref:\s*(.+)$";

/// Name of the head pointer file
pub const HEAD_REF_NAME: &str = "HEAD";

const BRANCH_REF_PREFIX: &str = "refs/heads/";

/// A reference name relative to the repository metadata directory,
/// e.g. `refs/heads/main`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, new)]
pub struct SymRefName(String);

impl SymRefName {
    pub fn as_ref_path(&self) -> &str {
        &self.0
    }

    /// Short branch name when this ref lives under `refs/heads/`.
    pub fn branch_name(&self) -> Option<&str> {
        self.0.strip_prefix(BRANCH_REF_PREFIX)
    }
}

impl std::fmt::Display for SymRefName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Parsed content of the head pointer file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeadPointer {
    /// The pointer holds a raw object id.
    Detached(ObjectId),
    /// The pointer names another reference, to be read once.
    Symbolic(SymRefName),
}

impl HeadPointer {
    pub fn parse(line: &str) -> Result<Self, ResolveError> {
        let line = line.trim();

        if line.len() == OBJECT_ID_LENGTH && line.chars().all(|c| c.is_ascii_hexdigit()) {
            let oid = ObjectId::try_parse(line.to_string())
                .map_err(|_| ResolveError::HeadParse(line.to_string()))?;
            return Ok(HeadPointer::Detached(oid));
        }

        let symref = regex::Regex::new(SYMREF_REGEX).expect("symref pattern is valid");
        if let Some(captures) = symref.captures(line) {
            return Ok(HeadPointer::Symbolic(SymRefName::new(
                captures[1].to_string(),
            )));
        }

        Err(ResolveError::HeadParse(line.to_string()))
    }
}

/// The branch tip the head resolves to, with the branch name when the
/// head is not detached. Formatters substitute the branch name into links
/// for dirty files instead of permalinking a stale commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadInfo {
    pub oid: ObjectId,
    pub branch: Option<String>,
}

/// Read capability over the reference files, so head resolution carries no
/// dependency on filesystem layout and runs against in-memory fixtures.
pub trait HeadSource {
    /// The raw head pointer line.
    fn head_pointer(&self) -> Result<String, ResolveError>;

    /// The raw first line of the named ref file, or `None` when the ref
    /// does not exist (a dangling symbolic ref).
    fn named_ref(&self, name: &SymRefName) -> Result<Option<String>, ResolveError>;
}

/// Resolve the head pointer to the current branch tip, following at most
/// one level of symbolic indirection.
pub fn head_info(source: &impl HeadSource) -> Result<HeadInfo, ResolveError> {
    let pointer = source.head_pointer()?;

    match HeadPointer::parse(&pointer)? {
        HeadPointer::Detached(oid) => {
            tracing::debug!(%oid, "head is detached");
            Ok(HeadInfo { oid, branch: None })
        }
        HeadPointer::Symbolic(name) => {
            let target = source
                .named_ref(&name)?
                .ok_or_else(|| ResolveError::RefNotFound(name.as_ref_path().to_string()))?;

            // the named ref must hold a raw id: one indirection, no more
            match HeadPointer::parse(&target)? {
                HeadPointer::Detached(oid) => {
                    tracing::debug!(%oid, symref = %name, "head resolved through symbolic ref");
                    Ok(HeadInfo {
                        oid,
                        branch: name.branch_name().map(str::to_string),
                    })
                }
                HeadPointer::Symbolic(_) => {
                    Err(ResolveError::HeadParse(target.trim().to_string()))
                }
            }
        }
    }
}

/// On-disk reference files under the repository metadata directory.
#[derive(Debug, new)]
pub struct Refs {
    /// Path to the refs root (typically `.git`)
    path: Box<Path>,
}

impl Refs {
    pub fn resolve_head(&self) -> Result<ObjectId, ResolveError> {
        self.head_info().map(|info| info.oid)
    }

    pub fn head_info(&self) -> Result<HeadInfo, ResolveError> {
        head_info(self)
    }

    pub fn head_path(&self) -> Box<Path> {
        self.path.join(HEAD_REF_NAME).into_boxed_path()
    }
}

impl HeadSource for Refs {
    fn head_pointer(&self) -> Result<String, ResolveError> {
        Ok(std::fs::read_to_string(self.head_path())?)
    }

    fn named_ref(&self, name: &SymRefName) -> Result<Option<String>, ResolveError> {
        let ref_path = self.path.join(name.as_ref_path());
        if !ref_path.exists() {
            return Ok(None);
        }
        Ok(Some(std::fs::read_to_string(ref_path)?))
    }
}
