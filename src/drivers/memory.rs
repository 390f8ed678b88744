//! In-memory driver, registered as `"memory"`.

use crate::drivers::{Conn, Driver};
use crate::{Error, Result};
use bytes::Bytes;
use parking_lot::RwLock;
use std::collections::HashMap;

pub const NAME: &str = "memory";

/// Opens [`MemoryConn`]s. The driver info is ignored.
#[derive(Debug, Default, Clone, Copy)]
pub struct MemoryDriver;

impl Driver for MemoryDriver {
    fn open(&self, _info: &str) -> Result<Box<dyn Conn>> {
        Ok(Box::new(MemoryConn::new()))
    }
}

/// A `HashMap` behind a reader/writer lock.
///
/// Reads run concurrently; `set` and `delete` exclude everything else.
#[derive(Debug, Default)]
pub struct MemoryConn {
    data: RwLock<HashMap<String, Bytes>>,
}

impl MemoryConn {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Conn for MemoryConn {
    fn set(&self, key: &str, value: Bytes) -> Result<()> {
        self.data.write().insert(key.to_owned(), value);
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Bytes> {
        self.data.read().get(key).cloned().ok_or(Error::NotFound)
    }

    fn delete(&self, key: &str) -> Result<()> {
        self.data.write().remove(key);
        Ok(())
    }

    fn close(self: Box<Self>) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_delete() {
        let conn = MemoryConn::new();
        conn.set("lang", Bytes::from_static(b"rust")).unwrap();
        assert_eq!(conn.get("lang").unwrap(), Bytes::from_static(b"rust"));

        conn.delete("lang").unwrap();
        assert!(conn.get("lang").unwrap_err().is_not_found());
    }

    #[test]
    fn delete_missing_key_is_noop() {
        let conn = MemoryConn::new();
        conn.delete("foo").unwrap();
    }

    #[test]
    fn each_open_is_independent() {
        let a = MemoryDriver.open("").unwrap();
        let b = MemoryDriver.open("").unwrap();
        a.set("foo", Bytes::from_static(b"bar")).unwrap();
        assert!(b.get("foo").unwrap_err().is_not_found());
        a.close().unwrap();
        b.close().unwrap();
    }
}
