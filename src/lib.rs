//! Read-only git history resolution for documentation source links.
//!
//! Given a repository on disk, this crate resolves the current branch tip,
//! walks commit history with optional blob-level change detection for a
//! single path, and answers working-copy dirty checks. It never writes to
//! the repository: every operation is a read over immutable, content
//! addressed storage, so independent queries may run concurrently without
//! coordination.
//!
//! The main entry point is [`areas::repository::Repository`].

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod errors;
