//! Core domain logic for the profile directory.
//! This crate is the single source of truth for profile invariants.

pub mod config;
pub mod controller;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;
pub mod store;

pub use config::{AppConfig, LogSettings};
pub use controller::{
    ActiveForm, AppController, ControllerState, DeletePrompt, Notification, NotificationKind,
    NotificationQueue,
};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::profile::{Profile, ProfileId, ProfileInput, ProfilePatch, ProfileValidationError};
pub use repo::snapshot_repo::{RepoError, RepoResult, SnapshotRepository, SqliteSnapshotRepository};
pub use search::matcher::ProfileQuery;
pub use service::profile_service::{LatencyProfile, ProfileService, ServiceError, ServiceResult};
pub use service::response::ApiResponse;
pub use store::{ProfileStore, StoreError, StoreResult, PROFILES_SNAPSHOT_KEY};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
