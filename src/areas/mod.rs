//! Storage areas of an on-disk repository
//!
//! - `database`: the content-addressed loose object store under
//!   `.git/objects`
//! - `refs`: the head pointer and named references under `.git`
//! - `workspace`: the checked-out working copy next to `.git`
//! - `repository`: composition root wiring the three together
//!
//! Everything here is read-only; the resolver never mutates a repository.

pub mod database;
pub mod refs;
pub mod repository;
pub mod workspace;
