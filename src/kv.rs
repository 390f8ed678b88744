use crate::drivers::Conn;
use crate::registry::{drivers, Registry};
use crate::{Error, Result};
use bytes::Bytes;
use log::{debug, trace};
use std::fmt;

/// The `KvStore` saves arbitrary byte values under string keys.
///
/// Persistence is left to a driver chosen by name; the store forwards every
/// call to the connection the driver opened and hands back whatever the
/// driver returns, errors included.
///
/// A store is `Send + Sync`. Whether concurrent calls are safe is up to the
/// driver; the built-in ones lock internally.
///
/// # Example
///
/// ```rust
/// use kvstore::KvStore;
///
/// // The memory driver is a plain map and takes no info. Other drivers
/// // may require connection information.
/// let store = KvStore::new("memory", "")?;
/// store.set("foo", "bar")?;
/// assert_eq!(&store.get("foo")?[..], b"bar");
/// store.close()?;
/// # Ok::<(), kvstore::Error>(())
/// ```
pub struct KvStore {
    driver: String,
    conn: Box<dyn Conn>,
}

impl KvStore {
    /// Create a store with the driver registered as `name` in the
    /// process-wide registry, passing `info` to the driver's `open`.
    ///
    /// Returns [`Error::UnknownDriver`] if nothing is registered under
    /// `name`, or the driver's own error if `open` fails.
    pub fn new(name: &str, info: &str) -> Result<KvStore> {
        Self::open(drivers(), name, info)
    }

    /// Like [`KvStore::new`], resolving `name` in `registry`.
    pub fn open(registry: &Registry, name: &str, info: &str) -> Result<KvStore> {
        let driver = registry
            .resolve(name)
            .ok_or_else(|| Error::UnknownDriver(name.to_owned()))?;

        debug!("opening {} store", name);
        let conn = driver.open(info)?;

        Ok(KvStore {
            driver: name.to_owned(),
            conn,
        })
    }

    /// Name of the driver backing this store.
    pub fn driver(&self) -> &str {
        &self.driver
    }

    /// Set the value associated with `key`, overriding any existing value.
    ///
    /// Errors are driver dependent.
    pub fn set(&self, key: &str, value: impl Into<Bytes>) -> Result<()> {
        self.conn.set(key, value.into())
    }

    /// Get the value associated with `key`.
    ///
    /// Returns [`Error::NotFound`] if the key doesn't exist.
    pub fn get(&self, key: &str) -> Result<Bytes> {
        self.conn.get(key)
    }

    /// Delete `key`. If the key is not found it's a no-op.
    pub fn delete(&self, key: &str) -> Result<()> {
        self.conn.delete(key)
    }

    /// Close the underlying connection.
    ///
    /// The store is consumed whatever the outcome. Dropping a store without
    /// closing it drops the connection, which releases what it holds but
    /// discards any error.
    pub fn close(self) -> Result<()> {
        trace!("closing {} store", self.driver);
        self.conn.close()
    }
}

impl fmt::Debug for KvStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KvStore")
            .field("driver", &self.driver)
            .finish_non_exhaustive()
    }
}
