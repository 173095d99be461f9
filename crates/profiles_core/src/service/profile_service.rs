//! Profile use-case service.
//!
//! # Responsibility
//! - Provide the async entry points the controller depends on.
//! - Wrap store outcomes in [`ApiResponse`] envelopes.
//! - Simulate request latency and transport faults.
//!
//! # Invariants
//! - Unknown ids and rejected input become `success = false` envelopes.
//! - Only transport faults are returned as `Err`.
//! - The store is never touched while the service is offline.
//! - Mutations commit to SQLite on the blocking pool, never on a runtime worker.

use crate::model::profile::{Profile, ProfileInput, ProfilePatch};
use crate::service::response::ApiResponse;
use crate::store::{ProfileStore, StoreError};
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

pub type ServiceResult<T> = Result<ApiResponse<T>, ServiceError>;

/// Fault raised when a call is rejected before it reaches the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    Transport(String),
    /// The blocking store task panicked or was cancelled.
    Worker(String),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport(message) => write!(f, "transport fault: {message}"),
            Self::Worker(message) => write!(f, "store worker failed: {message}"),
        }
    }
}

impl Error for ServiceError {}

/// Artificial delay applied before each call returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatencyProfile {
    pub list: Duration,
    pub get: Duration,
    pub create: Duration,
    pub update: Duration,
    pub delete: Duration,
    pub search: Duration,
}

impl LatencyProfile {
    /// No delay at all; used by tests and when simulation is disabled.
    pub const fn none() -> Self {
        Self {
            list: Duration::ZERO,
            get: Duration::ZERO,
            create: Duration::ZERO,
            update: Duration::ZERO,
            delete: Duration::ZERO,
            search: Duration::ZERO,
        }
    }
}

impl Default for LatencyProfile {
    fn default() -> Self {
        Self {
            list: Duration::from_millis(300),
            get: Duration::from_millis(200),
            create: Duration::from_millis(500),
            update: Duration::from_millis(500),
            delete: Duration::from_millis(400),
            search: Duration::from_millis(250),
        }
    }
}

/// Service facade over a shared [`ProfileStore`].
pub struct ProfileService {
    store: Arc<ProfileStore>,
    latency: LatencyProfile,
    offline: AtomicBool,
}

impl ProfileService {
    /// Creates a service with the default simulated latency.
    pub fn new(store: Arc<ProfileStore>) -> Self {
        Self::with_latency(store, LatencyProfile::default())
    }

    /// Creates a service with an explicit latency profile.
    pub fn with_latency(store: Arc<ProfileStore>, latency: LatencyProfile) -> Self {
        Self {
            store,
            latency,
            offline: AtomicBool::new(false),
        }
    }

    /// Switches transport fault simulation on or off.
    ///
    /// While offline every call fails with [`ServiceError::Transport`].
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
        info!(
            "event=service_transport module=service status=ok offline={}",
            offline
        );
    }

    pub fn is_offline(&self) -> bool {
        self.offline.load(Ordering::SeqCst)
    }

    /// Returns the shared store handle.
    pub fn store(&self) -> &Arc<ProfileStore> {
        &self.store
    }

    /// Lists every profile.
    pub async fn get_all_profiles(&self) -> ServiceResult<Vec<Profile>> {
        self.round_trip("list", self.latency.list).await?;
        Ok(ApiResponse::ok(
            self.store.list(),
            "Profiles retrieved successfully",
        ))
    }

    /// Looks up one profile; `data` is `None` when the id is unknown.
    pub async fn get_profile_by_id(&self, id: &str) -> ServiceResult<Option<Profile>> {
        self.round_trip("get", self.latency.get).await?;
        Ok(match self.store.get_by_id(id) {
            Some(profile) => ApiResponse::ok(Some(profile), "Profile found"),
            None => ApiResponse::failure(None, NOT_FOUND_MESSAGE),
        })
    }

    /// Creates a profile from form input.
    pub async fn create_profile(&self, input: ProfileInput) -> ServiceResult<Option<Profile>> {
        self.round_trip("create", self.latency.create).await?;
        let result = self
            .blocking("create", move |store| store.create(input))
            .await?;
        Ok(envelope(result, "Profile created successfully"))
    }

    /// Merges `patch` over the profile with `id`.
    pub async fn update_profile(
        &self,
        id: &str,
        patch: ProfilePatch,
    ) -> ServiceResult<Option<Profile>> {
        self.round_trip("update", self.latency.update).await?;
        let id = id.to_string();
        let result = self
            .blocking("update", move |store| store.update(&id, patch))
            .await?;
        Ok(envelope(result, "Profile updated successfully"))
    }

    /// Deletes the profile with `id`; `data` reports whether it existed.
    pub async fn delete_profile(&self, id: &str) -> ServiceResult<bool> {
        self.round_trip("delete", self.latency.delete).await?;
        let id = id.to_string();
        let result = self
            .blocking("delete", move |store| store.delete(&id))
            .await?;
        Ok(match result {
            Ok(()) => ApiResponse::ok(true, "Profile deleted successfully"),
            Err(err) => ApiResponse::failure(false, failure_message(&err)),
        })
    }

    /// Searches name, email, location and bio.
    pub async fn search_profiles(&self, query: &str) -> ServiceResult<Vec<Profile>> {
        self.round_trip("search", self.latency.search).await?;
        let hits = self.store.search(query);
        let message = format!("Found {} profiles", hits.len());
        Ok(ApiResponse::ok(hits, message))
    }

    async fn round_trip(&self, operation: &'static str, delay: Duration) -> Result<(), ServiceError> {
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        if self.is_offline() {
            warn!(
                "event=service_call module=service status=error op={} error_code=transport_fault",
                operation
            );
            return Err(ServiceError::Transport(format!(
                "{operation} request could not reach the profile backend"
            )));
        }
        Ok(())
    }

    /// Runs a committing store call on tokio's blocking pool.
    async fn blocking<T, F>(&self, operation: &'static str, call: F) -> Result<T, ServiceError>
    where
        F: FnOnce(&ProfileStore) -> T + Send + 'static,
        T: Send + 'static,
    {
        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || call(&*store))
            .await
            .map_err(|err| {
                error!(
                    "event=service_call module=service status=error op={} error_code=worker_failed error={}",
                    operation, err
                );
                ServiceError::Worker(format!("{operation} task did not complete: {err}"))
            })
    }
}

const NOT_FOUND_MESSAGE: &str = "Profile not found";

fn envelope(
    result: Result<Profile, StoreError>,
    success_message: &str,
) -> ApiResponse<Option<Profile>> {
    match result {
        Ok(profile) => ApiResponse::ok(Some(profile), success_message),
        Err(err) => ApiResponse::failure(None, failure_message(&err)),
    }
}

fn failure_message(err: &StoreError) -> String {
    match err {
        StoreError::NotFound(_) => NOT_FOUND_MESSAGE.to_string(),
        StoreError::Validation(validation) => validation.to_string(),
    }
}
