//! Domain model for the profile directory.
//!
//! # Responsibility
//! - Define the canonical record and the shapes clients may submit.
//!
//! # Invariants
//! - Every profile is identified by a stable `ProfileId`.
//! - Deletion is permanent; there are no tombstoned records.

pub mod profile;
