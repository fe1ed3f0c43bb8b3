//! Session Store: persistence laws over the in-memory and file backends
//!
//! These tests verify:
//! 1. update-then-get returns the input for every field
//! 2. fresh storage and cleared storage both read as absent
//! 3. clear_owned_fields leaves foreign keys alone; clear_storage does not
//! 4. malformed text and full backends surface as typed errors
//! 5. file-backed state survives reopening

use azguard_demo::{MemoryStorage, Session, SessionStore, StorageBackend, StoreError};
use serde_json::json;

fn fresh() -> (SessionStore<MemoryStorage>, MemoryStorage) {
    let storage = MemoryStorage::new();
    (SessionStore::new(storage.clone()), storage)
}

fn accounts(ids: &[&str]) -> Vec<String> {
    ids.iter().map(|s| s.to_string()).collect()
}

/// Test: each field reads back what was written
#[test]
fn update_then_get_returns_input() {
    let (store, _) = fresh();

    let sessions = [
        json!({"topic": "9f2c", "peer": {"name": "Azguard"}, "expiry": 1_700_000_000u64}),
        json!("opaque-string-session"),
        json!([1, 2, 3]),
        json!(0),
    ];
    for value in sessions {
        let session = Session::new(value);
        store.update_session(&session).unwrap();
        assert_eq!(store.get_session().unwrap(), Some(session));
    }

    for list in [accounts(&[]), accounts(&["0x1"]), accounts(&["b", "a", "c"])] {
        store.update_accounts(&list).unwrap();
        assert_eq!(store.get_accounts().unwrap(), Some(list));
    }

    for status in [true, false] {
        store.update_connection_status(status).unwrap();
        assert_eq!(store.get_connection_status().unwrap(), Some(status));
    }
}

/// Test: account order is preserved exactly
#[test]
fn accounts_keep_order() {
    let (store, _) = fresh();
    let list = accounts(&[
        "0xabc0000000000000000000000000000000000000000000000000000000000001",
        "0xdef0000000000000000000000000000000000000000000000000000000000002",
    ]);
    store.update_accounts(&list).unwrap();
    let read = store.get_accounts().unwrap().unwrap();
    assert_eq!(read.len(), 2);
    assert_eq!(read, list);
}

/// Test: no prior writes means absent, not an error
#[test]
fn fresh_storage_is_absent() {
    let (store, _) = fresh();
    assert_eq!(store.get_session().unwrap(), None);
    assert_eq!(store.get_accounts().unwrap(), None);
    assert_eq!(store.get_connection_status().unwrap(), None);
    assert!(!store.snapshot().unwrap().is_connected());
}

/// Test: clear_storage wipes the three fields and everything else
#[test]
fn clear_storage_wipes_scope() {
    let (store, storage) = fresh();
    storage.set_item("theme", "\"dark\"").unwrap();
    store
        .record_connection(&Session::new(json!({"id": 7})), &accounts(&["0x1", "0x2"]))
        .unwrap();

    store.clear_storage().unwrap();

    assert_eq!(store.get_session().unwrap(), None);
    assert_eq!(store.get_accounts().unwrap(), None);
    assert_eq!(store.get_connection_status().unwrap(), None);
    assert!(storage.is_empty());
}

/// Test: clear_owned_fields removes only the three owned keys
#[test]
fn clear_owned_fields_spares_foreign_keys() {
    let (store, storage) = fresh();
    storage.set_item("theme", "\"dark\"").unwrap();
    store.update_connection_status(true).unwrap();
    store.update_accounts(&accounts(&["0x1"])).unwrap();

    store.clear_owned_fields().unwrap();

    assert!(store.snapshot().unwrap().is_empty());
    assert_eq!(storage.keys().unwrap(), vec!["theme".to_string()]);
}

/// Test: fields are independent; writing one does not touch the others
#[test]
fn fields_are_independent() {
    let (store, _) = fresh();
    store.update_connection_status(true).unwrap();
    let snapshot = store.snapshot().unwrap();
    assert_eq!(snapshot.is_connected, Some(true));
    assert_eq!(snapshot.session, None);
    assert_eq!(snapshot.accounts, None);
}

/// Test: tampered values fail loudly, except through the mount helper
#[test]
fn tampered_values_are_malformed() {
    let (store, storage) = fresh();
    storage.set_item("accounts", "{\"0\": \"0xabc\"}").unwrap();

    match store.get_accounts() {
        Err(StoreError::MalformedPersistedData { key, .. }) => assert_eq!(key, "accounts"),
        other => panic!("expected malformed data, got {other:?}"),
    }
    assert!(store.snapshot_or_disconnected().is_empty());
}

/// Test: a full backend reports StorageUnavailable and keeps the old value
#[test]
fn full_backend_is_unavailable() {
    let storage = MemoryStorage::with_quota(32);
    let store = SessionStore::new(storage.clone());
    store.update_connection_status(true).unwrap();

    let err = store.update_accounts(&accounts(&["0x0123456789abcdef0123456789"])).unwrap_err();
    assert!(matches!(err, StoreError::StorageUnavailable(_)));
    assert_eq!(store.get_accounts().unwrap(), None);
    assert_eq!(store.get_connection_status().unwrap(), Some(true));
}

/// Test: file-backed state survives a reopen (page reload)
#[cfg(feature = "native")]
#[test]
fn file_storage_survives_reopen() {
    use azguard_demo::FileStorage;
    use tempfile::TempDir;

    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("storage.json");
    {
        let store = SessionStore::new(FileStorage::open(&path).expect("open"));
        store
            .record_connection(&Session::new(json!({"topic": "t"})), &accounts(&["0xabc", "0xdef"]))
            .expect("write");
    }

    let store = SessionStore::new(FileStorage::open(&path).expect("reopen"));
    let snapshot = store.snapshot().expect("snapshot");
    assert_eq!(snapshot.session, Some(Session::new(json!({"topic": "t"}))));
    assert_eq!(snapshot.accounts, Some(accounts(&["0xabc", "0xdef"])));
    assert!(snapshot.is_connected());

    store.record_disconnection().expect("disconnect");
    let store = SessionStore::new(FileStorage::open(&path).expect("reopen"));
    assert!(store.snapshot().expect("snapshot").is_empty());
}
