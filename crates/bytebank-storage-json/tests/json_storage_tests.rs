use std::{fs, sync::Arc};

use bytebank_core::{
    AccountService, CoreError, FixedClock, KeyValueStore, StorageService, ACCOUNT_KEY,
};
use bytebank_domain::TransactionType;
use bytebank_storage_json::JsonFileStore;
use chrono::{TimeZone, Utc};
use tempfile::tempdir;

fn account_service(store: JsonFileStore) -> AccountService {
    let now = Utc.with_ymd_and_hms(2025, 8, 1, 9, 0, 0).unwrap();
    AccountService::with_clock(StorageService::new(Box::new(store)), Arc::new(FixedClock(now)))
}

#[test]
fn json_store_persists_account_across_instances() {
    let dir = tempdir().expect("tempdir");
    let store = JsonFileStore::new(dir.path().join("data")).expect("create store");

    let written = account_service(store.clone())
        .add_transaction_now(TransactionType::Payment, -89.9, Some("Luz".into()))
        .expect("add transaction");

    let reopened = JsonFileStore::new(dir.path().join("data")).expect("reopen store");
    let loaded = account_service(reopened)
        .get_account_data()
        .expect("load account");

    assert_eq!(loaded, written);
    assert_eq!(loaded.balance, 2500.0 - 89.9);
    let path = store.path_for(ACCOUNT_KEY);
    assert_eq!(path.extension().and_then(|ext| ext.to_str()), Some("json"));
    assert!(path.exists());
}

#[test]
fn json_store_writes_readable_documents() {
    let dir = tempdir().expect("tempdir");
    let store = JsonFileStore::new(dir.path().to_path_buf()).expect("create store");

    account_service(store.clone())
        .get_account_data()
        .expect("seed account");

    let raw = fs::read_to_string(store.path_for(ACCOUNT_KEY)).expect("read file");
    let document: serde_json::Value = serde_json::from_str(&raw).expect("valid json");
    assert_eq!(document["balance"], 2500.0);
    assert_eq!(document["transactions"].as_array().map(Vec::len), Some(4));
    assert_eq!(document["transactions"][0]["type"], "Transfer");
    assert!(raw.contains('\n'), "documents are pretty-printed");
    assert!(dir.path().join("%40bytebank%2Faccount-data.json").exists());
}

#[test]
fn json_store_rejects_non_json_values() {
    let dir = tempdir().expect("tempdir");
    let store = JsonFileStore::new(dir.path().to_path_buf()).expect("create store");

    let err = store.set_raw("notes", "plain text").unwrap_err();
    assert!(matches!(err, CoreError::Serde(_)));
    assert!(store.get_raw("notes").unwrap().is_none());
}

#[test]
fn json_store_removes_keys() {
    let dir = tempdir().expect("tempdir");
    let store = JsonFileStore::new(dir.path().to_path_buf()).expect("create store");

    store.set_raw("prefs", r#"{"visible":true}"#).unwrap();
    assert!(store.remove("prefs").unwrap());
    assert!(!store.remove("prefs").unwrap());
    assert!(!store.path_for("prefs").exists());
}

#[test]
fn similar_keys_never_share_a_file() {
    let dir = tempdir().expect("tempdir");
    let store = JsonFileStore::new(dir.path().to_path_buf()).expect("create store");

    store.set_raw("@bytebank/alice", r#"{"who":"alice"}"#).unwrap();
    store.set_raw("@bytebank.alice", r#"{"who":"bob"}"#).unwrap();
    store.set_raw("@Bytebank/alice", r#"{"who":"carol"}"#).unwrap();

    let who = |key: &str| -> serde_json::Value {
        let raw = store.get_raw(key).unwrap().expect("stored");
        serde_json::from_str::<serde_json::Value>(&raw).unwrap()["who"].clone()
    };
    assert_eq!(who("@bytebank/alice"), "alice");
    assert_eq!(who("@bytebank.alice"), "bob");
    assert_eq!(who("@Bytebank/alice"), "carol");

    assert!(store.remove("@bytebank.alice").unwrap());
    assert_eq!(who("@bytebank/alice"), "alice");
}

#[test]
fn corrupted_file_surfaces_on_load() {
    let dir = tempdir().expect("tempdir");
    let store = JsonFileStore::new(dir.path().to_path_buf()).expect("create store");
    fs::write(store.path_for(ACCOUNT_KEY), "{ truncated").expect("write file");

    let err = account_service(store).get_account_data().unwrap_err();
    assert!(matches!(err, CoreError::Serde(_)), "unexpected error: {err:?}");
}
