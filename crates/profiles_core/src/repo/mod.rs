//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the key/value snapshot contract the profile store commits to.
//! - Isolate SQLite query details from store orchestration.
//!
//! # Invariants
//! - A save fully replaces the value stored under its key.

pub mod snapshot_repo;
