//! Application controller for the profile directory.
//!
//! # Responsibility
//! - Load, search, create, edit and delete profiles through [`ProfileService`].
//! - Drive the form and delete-confirmation state machines.
//! - Turn every command outcome into a notification.
//!
//! # Invariants
//! - The state lock is never held across an await, so independent commands
//!   can be in flight at the same time.
//! - A blank search query shows `all_profiles` without calling the service.
//! - A search response is applied only if no newer reconciliation started
//!   after it; only the newest one clears `is_search_loading`.
//! - Form: Closed -> Create | Edit(profile) -> Closed on success or cancel.
//! - Delete prompt: Hidden -> Confirming(profile) -> Hidden on confirm or
//!   cancel, whatever the outcome.

use crate::controller::notification::{NotificationKind, NotificationQueue};
use crate::model::profile::{Profile, ProfileInput};
use crate::service::profile_service::{ProfileService, ServiceResult};
use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// Modal form region.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ActiveForm {
    #[default]
    Closed,
    Create,
    Edit(Profile),
}

/// Delete confirmation prompt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DeletePrompt {
    #[default]
    Hidden,
    Confirming(Profile),
}

/// Everything a renderer needs to draw the directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControllerState {
    pub all_profiles: Vec<Profile>,
    /// May briefly lag `all_profiles` while a search is in flight.
    pub filtered_profiles: Vec<Profile>,
    pub is_list_loading: bool,
    pub is_form_submitting: bool,
    pub is_search_loading: bool,
    pub search_query: String,
    pub active_form: ActiveForm,
    pub pending_delete: DeletePrompt,
    pub notifications: NotificationQueue,
}

#[derive(Default)]
struct ControllerInner {
    state: ControllerState,
    search_generation: u64,
}

impl ControllerInner {
    fn notify(&mut self, kind: NotificationKind, message: impl Into<String>) {
        self.state
            .notifications
            .enqueue(kind, message, None, Utc::now());
    }
}

/// Search reconciliation ticket taken before the service call.
struct SearchTicket {
    generation: u64,
    query: String,
}

/// Orchestrates service calls and owns UI-visible state.
pub struct AppController {
    service: Arc<ProfileService>,
    inner: Mutex<ControllerInner>,
}

impl AppController {
    pub fn new(service: Arc<ProfileService>) -> Self {
        Self {
            service,
            inner: Mutex::new(ControllerInner::default()),
        }
    }

    pub fn service(&self) -> &Arc<ProfileService> {
        &self.service
    }

    /// Returns a copy of the current state.
    pub fn snapshot(&self) -> ControllerState {
        self.lock().state.clone()
    }

    /// Reloads `all_profiles` from the service, then reconciles the
    /// filtered view.
    ///
    /// Used for the initial load and after every successful mutation.
    pub async fn load_profiles(&self) {
        self.lock().state.is_list_loading = true;

        let outcome = self.service.get_all_profiles().await;
        let loaded = {
            let mut inner = self.lock();
            inner.state.is_list_loading = false;
            match outcome {
                Ok(response) if response.success => {
                    info!(
                        "event=controller_load module=controller status=ok count={}",
                        response.data.len()
                    );
                    inner.state.all_profiles = response.data;
                    true
                }
                Ok(response) => {
                    warn!(
                        "event=controller_load module=controller status=error message={}",
                        response.message
                    );
                    inner.notify(NotificationKind::Error, "Failed to load profiles");
                    false
                }
                Err(err) => {
                    warn!(
                        "event=controller_load module=controller status=error error={}",
                        err
                    );
                    inner.notify(NotificationKind::Error, "Error loading profiles");
                    false
                }
            }
        };

        if loaded {
            self.reconcile_search().await;
        }
    }

    /// Sets the search query and reconciles the filtered view.
    pub async fn set_search_query(&self, query: impl Into<String>) {
        self.lock().state.search_query = query.into();
        self.reconcile_search().await;
    }

    /// Recomputes `filtered_profiles` for the current query.
    pub async fn reconcile_search(&self) {
        let Some(ticket) = self.begin_search() else {
            return;
        };
        let outcome = self.service.search_profiles(&ticket.query).await;
        self.finish_search(ticket.generation, outcome);
    }

    fn begin_search(&self) -> Option<SearchTicket> {
        let mut inner = self.lock();
        inner.search_generation += 1;

        let query = inner.state.search_query.trim().to_string();
        if query.is_empty() {
            inner.state.filtered_profiles = inner.state.all_profiles.clone();
            inner.state.is_search_loading = false;
            return None;
        }

        inner.state.is_search_loading = true;
        Some(SearchTicket {
            generation: inner.search_generation,
            query,
        })
    }

    fn finish_search(&self, generation: u64, outcome: ServiceResult<Vec<Profile>>) {
        let mut inner = self.lock();
        let current = inner.search_generation == generation;
        if current {
            inner.state.is_search_loading = false;
        }

        match outcome {
            Ok(response) if response.success => {
                if current {
                    inner.state.filtered_profiles = response.data;
                } else {
                    debug!(
                        "event=controller_search module=controller status=superseded generation={}",
                        generation
                    );
                }
            }
            Ok(response) => inner.notify(NotificationKind::Error, response.message),
            Err(err) => {
                warn!(
                    "event=controller_search module=controller status=error error={}",
                    err
                );
                inner.notify(NotificationKind::Error, "Error searching profiles");
            }
        }
    }

    /// Opens an empty form for a new profile.
    pub fn open_create_form(&self) {
        self.lock().state.active_form = ActiveForm::Create;
    }

    /// Opens the form pre-filled with `profile`.
    pub fn open_edit_form(&self, profile: Profile) {
        self.lock().state.active_form = ActiveForm::Edit(profile);
    }

    pub fn cancel_form(&self) {
        self.lock().state.active_form = ActiveForm::Closed;
    }

    /// Submits the open form as a create or a full edit.
    ///
    /// On success the list is reloaded and the form closes. On any failure
    /// the form stays open. Returns whether the submit succeeded.
    pub async fn submit_form(&self, input: ProfileInput) -> bool {
        let edit_target = {
            let mut inner = self.lock();
            inner.state.is_form_submitting = true;
            match &inner.state.active_form {
                ActiveForm::Edit(profile) => Some(profile.id.clone()),
                ActiveForm::Create | ActiveForm::Closed => None,
            }
        };

        let outcome = match &edit_target {
            Some(id) => self.service.update_profile(id, input.into()).await,
            None => self.service.create_profile(input).await,
        };

        let succeeded = match outcome {
            Ok(response) if response.success => {
                self.load_profiles().await;
                let mut inner = self.lock();
                inner.state.active_form = ActiveForm::Closed;
                inner.notify(NotificationKind::Success, response.message);
                true
            }
            Ok(response) => {
                self.lock()
                    .notify(NotificationKind::Error, response.message);
                false
            }
            Err(err) => {
                warn!(
                    "event=controller_submit module=controller status=error edit={} error={}",
                    edit_target.is_some(),
                    err
                );
                let message = if edit_target.is_some() {
                    "Error updating profile"
                } else {
                    "Error creating profile"
                };
                self.lock().notify(NotificationKind::Error, message);
                false
            }
        };

        self.lock().state.is_form_submitting = false;
        succeeded
    }

    /// Opens the confirmation prompt for deleting `profile`.
    pub fn request_delete(&self, profile: Profile) {
        self.lock().state.pending_delete = DeletePrompt::Confirming(profile);
    }

    pub fn cancel_delete(&self) {
        self.lock().state.pending_delete = DeletePrompt::Hidden;
    }

    /// Deletes the pending candidate, if any.
    ///
    /// The prompt closes whatever the outcome. Returns whether a profile was
    /// deleted.
    pub async fn confirm_delete(&self) -> bool {
        let candidate_id = match &self.lock().state.pending_delete {
            DeletePrompt::Confirming(profile) => profile.id.clone(),
            DeletePrompt::Hidden => return false,
        };

        let succeeded = match self.service.delete_profile(&candidate_id).await {
            Ok(response) if response.success => {
                self.load_profiles().await;
                self.lock()
                    .notify(NotificationKind::Success, response.message);
                true
            }
            Ok(response) => {
                self.lock()
                    .notify(NotificationKind::Error, response.message);
                false
            }
            Err(err) => {
                warn!(
                    "event=controller_delete module=controller status=error id={} error={}",
                    candidate_id, err
                );
                self.lock()
                    .notify(NotificationKind::Error, "Error deleting profile");
                false
            }
        };

        self.lock().state.pending_delete = DeletePrompt::Hidden;
        succeeded
    }

    /// Appends a notification and returns its id.
    pub fn enqueue(
        &self,
        kind: NotificationKind,
        message: impl Into<String>,
        duration: Option<Duration>,
    ) -> String {
        self.lock()
            .state
            .notifications
            .enqueue(kind, message, duration, Utc::now())
    }

    /// Removes a notification by id. Returns whether one was removed.
    pub fn dismiss(&self, id: &str) -> bool {
        self.lock().state.notifications.dismiss(id)
    }

    /// Drops notifications whose duration has elapsed at `now`.
    pub fn expire_notifications(&self, now: DateTime<Utc>) -> usize {
        self.lock().state.notifications.expire(now)
    }

    fn lock(&self) -> MutexGuard<'_, ControllerInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::AppController;
    use crate::model::profile::Profile;
    use crate::repo::snapshot_repo::SqliteSnapshotRepository;
    use crate::service::profile_service::{LatencyProfile, ProfileService};
    use crate::service::response::ApiResponse;
    use crate::store::ProfileStore;
    use std::sync::Arc;

    fn controller() -> AppController {
        let store = ProfileStore::open(SqliteSnapshotRepository::in_memory().unwrap());
        let service = ProfileService::with_latency(Arc::new(store), LatencyProfile::none());
        AppController::new(Arc::new(service))
    }

    fn names(profiles: &[Profile]) -> Vec<&str> {
        profiles.iter().map(|p| p.full_name.as_str()).collect()
    }

    #[test]
    fn superseded_search_response_is_discarded() {
        let controller = controller();
        let store = controller.service().store().clone();

        controller.lock().state.search_query = "sarah".to_string();
        let stale = controller.begin_search().unwrap();
        controller.lock().state.search_query = "michael".to_string();
        let fresh = controller.begin_search().unwrap();

        controller.finish_search(
            fresh.generation,
            Ok(ApiResponse::ok(store.search(&fresh.query), "fresh")),
        );
        assert!(!controller.snapshot().is_search_loading);

        controller.finish_search(
            stale.generation,
            Ok(ApiResponse::ok(store.search(&stale.query), "stale")),
        );

        let state = controller.snapshot();
        assert_eq!(names(&state.filtered_profiles), vec!["Michael Chen"]);
        assert!(!state.is_search_loading);
    }

    #[test]
    fn blank_query_invalidates_in_flight_search() {
        let controller = controller();
        let store = controller.service().store().clone();
        controller.lock().state.all_profiles = store.list();

        controller.lock().state.search_query = "kim".to_string();
        let pending = controller.begin_search().unwrap();
        controller.lock().state.search_query = "  ".to_string();
        assert!(controller.begin_search().is_none());

        controller.finish_search(
            pending.generation,
            Ok(ApiResponse::ok(store.search(&pending.query), "late")),
        );
        assert_eq!(controller.snapshot().filtered_profiles.len(), 4);
    }
}
