use kvstore::{drivers, testutil, Error, KvStore};
use std::fs;
use std::sync::Arc;
use std::thread;
use tempfile::TempDir;

#[test]
fn required_api() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("conformance.redb");
    let info = path.to_str().unwrap();

    testutil::run_required_api(drivers(), "redb", info, || {
        let _ = fs::remove_file(&path);
    });
}

#[test]
fn empty_value_round_trips() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("kvs.redb");
    let store = KvStore::new("redb", path.to_str().unwrap()).unwrap();

    store.set("k", Vec::new()).unwrap();
    assert!(store.get("k").unwrap().is_empty());
}

#[test]
fn open_error_is_not_rewritten() {
    let err = KvStore::new("redb", "").unwrap_err();
    assert!(matches!(err, Error::InvalidInfo(_)));
}

#[test]
fn open_on_directory_fails() {
    let dir = TempDir::new().unwrap();
    let err = KvStore::new("redb", dir.path().to_str().unwrap()).unwrap_err();
    assert!(!err.is_not_found());
}

#[test]
fn persists_across_stores() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("kvs.redb");
    let info = path.to_str().unwrap();

    let store = KvStore::new("redb", info).unwrap();
    store.set("key1", "value1").unwrap();
    store.close().unwrap();

    let store = KvStore::new("redb", info).unwrap();
    assert_eq!(&store.get("key1").unwrap()[..], b"value1");
    store.delete("key1").unwrap();
    assert!(store.get("key1").unwrap_err().is_not_found());
}

#[test]
fn concurrent_writers() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("kvs.redb");
    let store = Arc::new(KvStore::new("redb", path.to_str().unwrap()).unwrap());

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let store = store.clone();
            thread::spawn(move || {
                for j in 0..20 {
                    let key = format!("key{}-{}", i, j);
                    store.set(&key, format!("value{}", j)).unwrap();
                    let _ = store.get(&key).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(&store.get("key3-19").unwrap()[..], b"value19");
}
