//! Profile store over a snapshot repository.
//!
//! # Responsibility
//! - Provide list/get/create/update/delete/search over the canonical set.
//! - Persist the full set as one JSON array after each successful mutation.
//!
//! # Invariants
//! - Write paths validate before mutating; a rejected write changes nothing.
//! - `updated_at` strictly advances on every successful update.
//! - A failed commit is logged and never rolls back the in-memory mutation.
//! - Reads return owned copies; callers cannot alias stored records.

use crate::model::profile::{
    Profile, ProfileId, ProfileInput, ProfilePatch, ProfileValidationError,
};
use crate::repo::snapshot_repo::{RepoError, RepoResult, SnapshotRepository};
use crate::search::matcher::ProfileQuery;
use crate::store::seed::bootstrap_profiles;
use chrono::{DateTime, Duration, Utc};
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::{Mutex, MutexGuard, PoisonError};
use uuid::Uuid;

/// Fixed key under which the serialized record set is stored.
pub const PROFILES_SNAPSHOT_KEY: &str = "userProfiles";

pub type StoreResult<T> = Result<T, StoreError>;

/// Expected, non-fatal outcomes of store write paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    NotFound(ProfileId),
    Validation(ProfileValidationError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "profile not found: {id}"),
            Self::Validation(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NotFound(_) => None,
            Self::Validation(err) => Some(err),
        }
    }
}

impl From<ProfileValidationError> for StoreError {
    fn from(value: ProfileValidationError) -> Self {
        Self::Validation(value)
    }
}

struct StoreInner {
    records: Vec<Profile>,
    repo: Box<dyn SnapshotRepository + Send>,
    persist_failures: u64,
}

/// Authoritative, persisted set of profiles.
///
/// Construct one per process and share it behind an `Arc`.
pub struct ProfileStore {
    inner: Mutex<StoreInner>,
}

impl ProfileStore {
    /// Opens the store, loading the persisted set or seeding a fresh one.
    ///
    /// A missing, unreadable, or undecodable snapshot is replaced by the
    /// bootstrap set, which is committed immediately.
    pub fn open<R>(repo: R) -> Self
    where
        R: SnapshotRepository + Send + 'static,
    {
        let mut inner = StoreInner {
            records: Vec::new(),
            repo: Box::new(repo),
            persist_failures: 0,
        };

        match load_snapshot(&*inner.repo) {
            Ok(Some(records)) => {
                info!(
                    "event=store_load module=store status=ok source=snapshot count={}",
                    records.len()
                );
                inner.records = records;
            }
            Ok(None) => {
                info!("event=store_load module=store status=ok source=bootstrap reason=empty");
                inner.records = bootstrap_profiles(Utc::now());
                commit(&mut inner);
            }
            Err(err) => {
                warn!(
                    "event=store_load module=store status=error source=bootstrap error={}",
                    err
                );
                inner.records = bootstrap_profiles(Utc::now());
                commit(&mut inner);
            }
        }

        Self {
            inner: Mutex::new(inner),
        }
    }

    /// Returns all live records in insertion order.
    pub fn list(&self) -> Vec<Profile> {
        self.lock().records.clone()
    }

    /// Returns one record by id.
    pub fn get_by_id(&self, id: &str) -> Option<Profile> {
        self.lock()
            .records
            .iter()
            .find(|profile| profile.id == id)
            .cloned()
    }

    /// Returns the number of live records.
    pub fn len(&self) -> usize {
        self.lock().records.len()
    }

    /// Returns whether no records are live.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns how many commits have failed since the store opened.
    pub fn persist_failure_count(&self) -> u64 {
        self.lock().persist_failures
    }

    /// Creates a record with a fresh id and equal creation/update timestamps.
    ///
    /// # Errors
    /// - `Validation` when `full_name` or `email` is blank.
    pub fn create(&self, input: ProfileInput) -> StoreResult<Profile> {
        let mut inner = self.lock();
        let id = fresh_id(&inner.records);
        let profile = Profile::from_input(id, input, Utc::now());
        profile.validate()?;

        inner.records.push(profile.clone());
        commit(&mut inner);
        info!(
            "event=profile_create module=store status=ok id={} count={}",
            profile.id,
            inner.records.len()
        );
        Ok(profile)
    }

    /// Merges `patch` over an existing record.
    ///
    /// # Errors
    /// - `NotFound` when `id` is not live.
    /// - `Validation` when the merged record has a blank required field.
    pub fn update(&self, id: &str, patch: ProfilePatch) -> StoreResult<Profile> {
        let mut inner = self.lock();
        let Some(index) = inner.records.iter().position(|profile| profile.id == id) else {
            return Err(StoreError::NotFound(id.to_string()));
        };

        let mut updated = inner.records[index].clone();
        updated.apply_patch(patch);
        updated.validate()?;
        updated.updated_at = advance_timestamp(updated.updated_at, Utc::now());

        inner.records[index] = updated.clone();
        commit(&mut inner);
        info!("event=profile_update module=store status=ok id={}", id);
        Ok(updated)
    }

    /// Permanently removes a record.
    ///
    /// # Errors
    /// - `NotFound` when `id` is not live; the set is left unchanged.
    pub fn delete(&self, id: &str) -> StoreResult<()> {
        let mut inner = self.lock();
        let Some(index) = inner.records.iter().position(|profile| profile.id == id) else {
            return Err(StoreError::NotFound(id.to_string()));
        };

        inner.records.remove(index);
        commit(&mut inner);
        info!(
            "event=profile_delete module=store status=ok id={} count={}",
            id,
            inner.records.len()
        );
        Ok(())
    }

    /// Returns records whose searchable fields contain `query`.
    ///
    /// Matching is case-insensitive on the trimmed query. A blank query
    /// returns every record.
    pub fn search(&self, query: &str) -> Vec<Profile> {
        let query = ProfileQuery::new(query);
        query.filter(self.lock().records.iter())
    }

    fn lock(&self) -> MutexGuard<'_, StoreInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn load_snapshot(repo: &dyn SnapshotRepository) -> RepoResult<Option<Vec<Profile>>> {
    let Some(text) = repo.load(PROFILES_SNAPSHOT_KEY)? else {
        return Ok(None);
    };
    let records = serde_json::from_str::<Vec<Profile>>(&text)?;
    Ok(Some(records))
}

fn commit(inner: &mut StoreInner) {
    let result = serde_json::to_string(&inner.records)
        .map_err(RepoError::from)
        .and_then(|text| inner.repo.save(PROFILES_SNAPSHOT_KEY, &text));

    if let Err(err) = result {
        inner.persist_failures += 1;
        error!(
            "event=store_persist module=store status=error count={} error={}",
            inner.records.len(),
            err
        );
    }
}

fn fresh_id(records: &[Profile]) -> ProfileId {
    loop {
        let candidate = Uuid::new_v4().to_string();
        if records.iter().all(|profile| profile.id != candidate) {
            return candidate;
        }
    }
}

/// Returns `now`, or one millisecond past `previous` when the clock has not
/// moved beyond it.
fn advance_timestamp(previous: DateTime<Utc>, now: DateTime<Utc>) -> DateTime<Utc> {
    if now > previous {
        now
    } else {
        previous + Duration::milliseconds(1)
    }
}

#[cfg(test)]
mod tests {
    use super::advance_timestamp;
    use chrono::{Duration, Utc};

    #[test]
    fn advance_timestamp_uses_clock_when_ahead() {
        let previous = Utc::now() - Duration::seconds(5);
        let now = Utc::now();
        assert_eq!(advance_timestamp(previous, now), now);
    }

    #[test]
    fn advance_timestamp_bumps_when_clock_stalls() {
        let previous = Utc::now();
        let advanced = advance_timestamp(previous, previous);
        assert!(advanced > previous);
    }
}
