//! Profile search entry points.
//!
//! # Responsibility
//! - Normalize free-text queries and match them against profile fields.
//! - Keep matching rules in one place for the store and its tests.

pub mod matcher;
