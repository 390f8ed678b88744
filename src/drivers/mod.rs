use crate::Result;
use bytes::Bytes;

pub mod memory;
pub mod redb;

/// A storage backend able to open connections.
///
/// A driver is registered once under a name and lives for the rest of the
/// process. It holds no per-connection state: every call to [`Driver::open`]
/// returns a fresh, independent [`Conn`].
pub trait Driver: Send + Sync {
    /// Open a new connection. The meaning of `info` is driver dependent
    /// (ignored by `memory`, a file path for `redb`).
    fn open(&self, info: &str) -> Result<Box<dyn Conn>>;
}

/// A live connection to a driver's storage.
///
/// Every driver must accept keys of at least 256 bytes and values of at
/// least 1 MiB. Connections are shared across threads through `&self`, so
/// implementations carry their own locking.
pub trait Conn: Send + Sync {
    /// Set the value of `key`, overriding any existing value.
    fn set(&self, key: &str, value: Bytes) -> Result<()>;

    /// Return the value of `key`, or [`crate::Error::NotFound`] if absent.
    fn get(&self, key: &str) -> Result<Bytes>;

    /// Remove `key`. Removing an absent key is not an error.
    fn delete(&self, key: &str) -> Result<()>;

    /// Release the connection's resources.
    fn close(self: Box<Self>) -> Result<()>;
}
