//! Canonical profile record set.
//!
//! # Responsibility
//! - Own the authoritative list of profiles for the process lifetime.
//! - Commit the full set through a snapshot repository after every mutation.
//! - Bootstrap a fixed sample set when nothing usable was persisted.
//!
//! # Invariants
//! - The in-memory set is the source of truth; persistence is best-effort.
//! - All reads and writes are serialized through one lock.

pub mod profile_store;
mod seed;

pub use profile_store::{ProfileStore, StoreError, StoreResult, PROFILES_SNAPSHOT_KEY};
pub use seed::bootstrap_profiles;
