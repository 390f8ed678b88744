//! Helpers to check that a driver behaves the way [`KvStore`] expects.
//!
//! As a driver author, call [`run_required_api`] from a test:
//!
//! ```rust
//! use kvstore::{drivers, testutil};
//!
//! testutil::run_required_api(drivers(), "memory", "", || {});
//! ```
//!
//! Checks report failures by panicking, so they work inside any `#[test]`.

use crate::{Error, KvStore, Registry};

pub const MEGABYTE: usize = 1024 * 1024;

/// A single conformance check.
pub type Check = fn(&KvStore);

/// Every check run by [`run_required_api`].
pub const CHECKS: &[(&str, Check)] = &[
    ("set_get_delete", set_get_delete),
    ("set_override", set_override),
    ("get_not_found", get_not_found),
    ("delete_not_found", delete_not_found),
];

/// Run every check in [`CHECKS`] against the driver registered as `name`.
///
/// Each check gets a store freshly opened with `info`; the store is closed
/// and `teardown` is called afterwards, so the caller can wipe whatever the
/// driver persisted between checks.
pub fn run_required_api(registry: &Registry, name: &str, info: &str, mut teardown: impl FnMut()) {
    for (check_name, check) in CHECKS {
        let store = match registry.open(name, info) {
            Ok(store) => store,
            Err(err) => panic!("{}: open {:?} failed: {}", check_name, name, err),
        };
        check(&store);
        if let Err(err) = store.close() {
            panic!("{}: close failed: {}", check_name, err);
        }
        teardown();
    }
}

/// Set a value, get it back, delete it, then expect [`Error::NotFound`].
///
/// Covers the sizes every driver must accept: keys of 256 bytes and values
/// from empty up to 1 MiB.
pub fn set_get_delete(kv: &KvStore) {
    let tests = [
        ("key1".to_owned(), b"value1".to_vec()),
        ("key2".to_owned(), byte_string(b'V', MEGABYTE)),
        (string(b'K', 256), b"value3".to_vec()),
        ("key4".to_owned(), Vec::new()),
    ];

    for (key, val) in tests {
        kv.set(&key, val.clone())
            .unwrap_or_else(|err| panic!("set {} failed: {}", truncate(key.as_bytes()), err));

        let got = kv
            .get(&key)
            .unwrap_or_else(|err| panic!("get {} failed: {}", truncate(key.as_bytes()), err));
        assert!(
            got[..] == val[..],
            "get {} got {}, want {}",
            truncate(key.as_bytes()),
            truncate(&got),
            truncate(&val)
        );

        kv.delete(&key)
            .unwrap_or_else(|err| panic!("delete {} failed: {}", truncate(key.as_bytes()), err));

        match kv.get(&key) {
            Err(Error::NotFound) => {}
            Err(err) => panic!(
                "invalid error for key {} not found: {}",
                truncate(key.as_bytes()),
                err
            ),
            Ok(got) => panic!(
                "get {} after delete should fail, found {}",
                truncate(key.as_bytes()),
                truncate(&got)
            ),
        }
    }
}

/// `set` overrides the value of an existing key.
pub fn set_override(kv: &KvStore) {
    kv.set("key", "value1").expect("first set");
    kv.set("key", "value2").expect("second set");

    let got = kv.get("key").expect("get");
    assert_eq!(&got[..], b"value2");
}

/// `get` on a key that was never set fails with [`Error::NotFound`].
pub fn get_not_found(kv: &KvStore) {
    match kv.get("key") {
        Err(Error::NotFound) => {}
        Err(err) => panic!("invalid error: {}", err),
        Ok(got) => panic!("got {}, want NotFound", truncate(&got)),
    }
}

/// `delete` on a missing key succeeds.
pub fn delete_not_found(kv: &KvStore) {
    if let Err(err) = kv.delete("something") {
        panic!("delete of a missing key failed: {}", err);
    }
}

/// `size` copies of `ch`.
pub fn byte_string(ch: u8, size: usize) -> Vec<u8> {
    vec![ch; size]
}

/// A string of `size` copies of the ASCII byte `ch`.
pub fn string(ch: u8, size: usize) -> String {
    assert!(ch.is_ascii(), "string needs an ASCII byte");
    char::from(ch).to_string().repeat(size)
}

/// A readable rendering of `s` showing at most 10 bytes.
pub fn truncate(s: &[u8]) -> String {
    const MAX: usize = 10;
    if s.len() <= MAX {
        return format!("{:?}", s);
    }
    format!("{:?} (truncated, size {})", &s[..MAX], s.len())
}
