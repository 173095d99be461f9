use chrono::NaiveDate;
use profiles_core::{
    ProfileInput, ProfilePatch, ProfileStore, ProfileValidationError, RepoError, RepoResult,
    SnapshotRepository, SqliteSnapshotRepository, StoreError, PROFILES_SNAPSHOT_KEY,
};
use std::sync::{Arc, Mutex};

fn memory_store() -> ProfileStore {
    ProfileStore::open(SqliteSnapshotRepository::in_memory().unwrap())
}

fn ada() -> ProfileInput {
    ProfileInput::new("Ada Lovelace", "ada@example.com")
}

/// In-memory repository whose writes can be switched to fail.
#[derive(Clone, Default)]
struct SharedRepo {
    value: Arc<Mutex<Option<String>>>,
    fail_saves: Arc<Mutex<bool>>,
}

impl SnapshotRepository for SharedRepo {
    fn load(&self, _key: &str) -> RepoResult<Option<String>> {
        Ok(self.value.lock().unwrap().clone())
    }

    fn save(&self, _key: &str, value: &str) -> RepoResult<()> {
        if *self.fail_saves.lock().unwrap() {
            return Err(RepoError::from(rusqlite::Error::QueryReturnedNoRows));
        }
        *self.value.lock().unwrap() = Some(value.to_string());
        Ok(())
    }
}

#[test]
fn first_run_bootstraps_four_sample_profiles() {
    let store = memory_store();

    let profiles = store.list();
    assert_eq!(profiles.len(), 4);
    let ids: Vec<&str> = profiles.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2", "3", "4"]);
    assert_eq!(profiles[0].full_name, "Sarah Johnson");
    assert_eq!(
        profiles[0].date_of_birth,
        NaiveDate::from_ymd_opt(1990, 3, 15)
    );
}

#[test]
fn bootstrap_set_is_persisted_immediately() {
    let repo = SharedRepo::default();
    let _store = ProfileStore::open(repo.clone());

    let persisted = repo.value.lock().unwrap().clone().unwrap();
    let decoded: Vec<serde_json::Value> = serde_json::from_str(&persisted).unwrap();
    assert_eq!(decoded.len(), 4);
    assert_eq!(decoded[1]["fullName"], "Michael Chen");
}

#[test]
fn create_then_get_returns_input_plus_assigned_fields() {
    let store = memory_store();

    let created = store.create(ada()).unwrap();
    assert!(!created.id.is_empty());
    assert_eq!(created.created_at, created.updated_at);
    assert_eq!(created.full_name, "Ada Lovelace");
    assert_eq!(created.phone_number, None);

    let loaded = store.get_by_id(&created.id).unwrap();
    assert_eq!(loaded, created);
    assert_eq!(store.len(), 5);
    assert_eq!(store.list().last().unwrap().id, created.id);
}

#[test]
fn created_ids_are_unique() {
    let store = memory_store();
    let first = store.create(ada()).unwrap();
    let second = store.create(ada()).unwrap();
    assert_ne!(first.id, second.id);
}

#[test]
fn update_merges_only_supplied_fields_and_advances_updated_at() {
    let store = memory_store();
    let mut input = ada();
    input.phone_number = Some("+44 20 7946 0000".to_string());
    input.bio = Some("Wrote the first published algorithm.".to_string());
    input.avatar_url = Some("https://example.com/ada.png".to_string());
    input.date_of_birth = NaiveDate::from_ymd_opt(1815, 12, 10);
    input.location = Some("Marylebone".to_string());
    let created = store.create(input).unwrap();

    let updated = store
        .update(
            &created.id,
            ProfilePatch {
                location: Some(Some("London".to_string())),
                ..ProfilePatch::default()
            },
        )
        .unwrap();

    assert_eq!(updated.location.as_deref(), Some("London"));
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.full_name, created.full_name);
    assert_eq!(updated.email, created.email);
    assert_eq!(updated.phone_number, created.phone_number);
    assert_eq!(updated.bio, created.bio);
    assert_eq!(updated.avatar_url, created.avatar_url);
    assert_eq!(updated.date_of_birth, created.date_of_birth);
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at > created.updated_at);
    assert_eq!(store.get_by_id(&created.id).unwrap(), updated);
}

#[test]
fn padded_text_is_stored_verbatim() {
    let store = memory_store();
    let mut input = ProfileInput::new(" Ada Lovelace", "ada@example.com ");
    input.bio = Some(String::new());

    let created = store.create(input.clone()).unwrap();
    let loaded = store.get_by_id(&created.id).unwrap();
    assert_eq!(loaded.full_name, input.full_name);
    assert_eq!(loaded.email, input.email);
    assert_eq!(loaded.bio, input.bio);
    assert_eq!(loaded.phone_number, None);

    store
        .update(
            &created.id,
            ProfilePatch {
                location: Some(Some(" London ".to_string())),
                ..ProfilePatch::default()
            },
        )
        .unwrap();
    assert_eq!(
        store.get_by_id(&created.id).unwrap().location.as_deref(),
        Some(" London ")
    );
}

#[test]
fn consecutive_updates_keep_advancing_updated_at() {
    let store = memory_store();
    let created = store.create(ada()).unwrap();

    let first = store.update(&created.id, ProfilePatch::default()).unwrap();
    let second = store.update(&created.id, ProfilePatch::default()).unwrap();
    assert!(first.updated_at > created.updated_at);
    assert!(second.updated_at > first.updated_at);
}

#[test]
fn update_unknown_id_returns_not_found() {
    let store = memory_store();
    let before = store.list();

    let err = store.update("missing", ProfilePatch::default()).unwrap_err();
    assert_eq!(err, StoreError::NotFound("missing".to_string()));
    assert_eq!(store.list(), before);
}

#[test]
fn delete_removes_record_and_second_delete_fails() {
    let store = memory_store();
    let created = store.create(ada()).unwrap();

    store.delete(&created.id).unwrap();
    assert!(store.get_by_id(&created.id).is_none());

    let before = store.list();
    let err = store.delete(&created.id).unwrap_err();
    assert!(matches!(err, StoreError::NotFound(id) if id == created.id));
    assert_eq!(store.list(), before);
}

#[test]
fn blank_required_fields_are_rejected_without_mutation() {
    let store = memory_store();

    let err = store
        .create(ProfileInput::new("   ", "nobody@example.com"))
        .unwrap_err();
    assert_eq!(
        err,
        StoreError::Validation(ProfileValidationError::EmptyFullName)
    );
    assert_eq!(store.len(), 4);

    let before = store.get_by_id("1").unwrap();
    let err = store
        .update(
            "1",
            ProfilePatch {
                email: Some(String::new()),
                ..ProfilePatch::default()
            },
        )
        .unwrap_err();
    assert_eq!(err, StoreError::Validation(ProfileValidationError::EmptyEmail));
    assert_eq!(store.get_by_id("1").unwrap(), before);
}

#[test]
fn list_returns_detached_copies() {
    let store = memory_store();
    let mut listed = store.list();
    listed[0].full_name = "Changed".to_string();
    listed.clear();

    assert_eq!(store.len(), 4);
    assert_eq!(store.get_by_id("1").unwrap().full_name, "Sarah Johnson");
}

#[test]
fn reopening_file_database_restores_last_persisted_set() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("profiles.sqlite3");

    let (ada_id, expected) = {
        let store = ProfileStore::open(SqliteSnapshotRepository::open(&path).unwrap());
        let ada = store.create(ada()).unwrap();
        store
            .update(
                &ada.id,
                ProfilePatch {
                    location: Some(Some("London".to_string())),
                    ..ProfilePatch::default()
                },
            )
            .unwrap();
        store.delete("2").unwrap();
        (ada.id, store.list())
    };

    let reopened = ProfileStore::open(SqliteSnapshotRepository::open(&path).unwrap());
    assert_eq!(reopened.list(), expected);
    assert_eq!(
        reopened.get_by_id(&ada_id).unwrap().location.as_deref(),
        Some("London")
    );
}

#[test]
fn persisted_empty_set_is_not_reseeded() {
    let repo = SharedRepo::default();
    *repo.value.lock().unwrap() = Some("[]".to_string());

    let store = ProfileStore::open(repo);
    assert!(store.is_empty());
}

#[test]
fn corrupt_snapshot_is_replaced_by_bootstrap_set() {
    let repo = SharedRepo::default();
    *repo.value.lock().unwrap() = Some("{not json".to_string());

    let store = ProfileStore::open(repo.clone());
    assert_eq!(store.len(), 4);

    let persisted = repo.value.lock().unwrap().clone().unwrap();
    assert!(persisted.starts_with('['));
}

#[test]
fn corrupt_sqlite_row_is_replaced_by_bootstrap_set() {
    let repo = SqliteSnapshotRepository::in_memory().unwrap();
    repo.save(PROFILES_SNAPSHOT_KEY, "[{\"id\": 7}]").unwrap();

    let store = ProfileStore::open(repo);
    assert_eq!(store.len(), 4);
}

#[test]
fn persistence_failure_keeps_in_memory_mutation() {
    let repo = SharedRepo::default();
    let store = ProfileStore::open(repo.clone());
    let persisted_before = repo.value.lock().unwrap().clone();
    *repo.fail_saves.lock().unwrap() = true;

    let created = store.create(ada()).unwrap();
    store.delete("1").unwrap();

    assert_eq!(store.persist_failure_count(), 2);
    assert!(store.get_by_id(&created.id).is_some());
    assert!(store.get_by_id("1").is_none());
    assert_eq!(*repo.value.lock().unwrap(), persisted_before);

    *repo.fail_saves.lock().unwrap() = false;
    store.delete("2").unwrap();
    let restarted = ProfileStore::open(repo);
    assert_eq!(restarted.list(), store.list());
}

#[test]
fn concurrent_writers_do_not_lose_updates() {
    let store = Arc::new(memory_store());

    let handles: Vec<_> = (0..8)
        .map(|n| {
            let store = Arc::clone(&store);
            std::thread::spawn(move || {
                store
                    .create(ProfileInput::new(format!("Writer {n}"), "w@example.com"))
                    .unwrap();
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(store.len(), 12);
}

#[test]
fn scenario_ada_lifecycle() {
    let store = memory_store();

    let ada = store.create(ada()).unwrap();
    assert_eq!(ada.full_name, "Ada Lovelace");
    assert_eq!(ada.phone_number, None);

    let moved = store
        .update(
            &ada.id,
            ProfilePatch {
                location: Some(Some("London".to_string())),
                ..ProfilePatch::default()
            },
        )
        .unwrap();
    assert_eq!(moved.full_name, "Ada Lovelace");
    assert_eq!(moved.location.as_deref(), Some("London"));

    let lower = store.search("london");
    assert!(lower.iter().any(|p| p.id == ada.id));
    assert_eq!(store.search("LONDON"), lower);

    store.delete(&ada.id).unwrap();
    assert!(store.get_by_id(&ada.id).is_none());
    assert!(matches!(
        store.delete(&ada.id),
        Err(StoreError::NotFound(_))
    ));
}
