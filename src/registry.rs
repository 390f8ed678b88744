use crate::drivers::memory::{self, MemoryDriver};
use crate::drivers::redb::{self, RedbDriver};
use crate::drivers::Driver;
use crate::{KvStore, Result};
use log::debug;
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// A name -> driver mapping.
///
/// Registration is insert-only: a name, once taken, keeps its driver for the
/// lifetime of the registry. Both insert and lookup go through one lock, so a
/// registry may be shared between threads, though the expected pattern is to
/// register everything at startup and only resolve afterwards.
#[derive(Default)]
pub struct Registry {
    drivers: Mutex<HashMap<String, Arc<dyn Driver>>>,
}

impl Registry {
    /// An empty registry, independent of the process-wide one.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `driver` under `name`.
    ///
    /// # Panics
    ///
    /// Panics if `driver` is `None` or if `name` is already registered.
    /// Both are wiring mistakes that must stop the program at startup.
    pub fn register(&self, name: impl Into<String>, driver: Option<Arc<dyn Driver>>) {
        let name = name.into();
        let Some(driver) = driver else {
            panic!("kvstore: Register driver is nil");
        };

        let mut drivers = self.drivers.lock();
        if drivers.contains_key(&name) {
            // release the lock so the registry stays usable after a caught panic
            drop(drivers);
            panic!("kvstore: Register called twice for driver {}", name);
        }
        debug!("registered driver {:?}", name);
        drivers.insert(name, driver);
    }

    /// Shorthand for [`Registry::register`] with a concrete driver.
    pub fn register_driver<D: Driver + 'static>(&self, name: impl Into<String>, driver: D) {
        self.register(name, Some(Arc::new(driver)));
    }

    pub fn resolve(&self, name: &str) -> Option<Arc<dyn Driver>> {
        self.drivers.lock().get(name).cloned()
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.drivers.lock().keys().cloned().collect();
        names.sort();
        names
    }

    /// Open a store with the driver registered as `name`.
    ///
    /// See [`KvStore::open`].
    pub fn open(&self, name: &str, info: &str) -> Result<KvStore> {
        KvStore::open(self, name, info)
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("drivers", &self.names())
            .finish()
    }
}

static DRIVERS: Lazy<Registry> = Lazy::new(|| {
    let registry = Registry::new();
    registry.register_driver(memory::NAME, MemoryDriver);
    registry.register_driver(redb::NAME, RedbDriver);
    registry
});

/// The process-wide registry, with the built-in drivers already registered.
pub fn drivers() -> &'static Registry {
    &DRIVERS
}

/// Register `driver` under `name` in the process-wide registry.
///
/// # Panics
///
/// Same as [`Registry::register`].
pub fn register(name: impl Into<String>, driver: Option<Arc<dyn Driver>>) {
    drivers().register(name, driver);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::Conn;
    use crate::Error;

    struct NopDriver;

    impl Driver for NopDriver {
        fn open(&self, _info: &str) -> Result<Box<dyn Conn>> {
            Err(Error::backend("nop"))
        }
    }

    #[test]
    fn resolve_registered() {
        let registry = Registry::new();
        assert!(registry.resolve("nop").is_none());

        registry.register_driver("nop", NopDriver);
        assert!(registry.resolve("nop").is_some());
        assert!(registry.resolve("other").is_none());
    }

    #[test]
    #[should_panic(expected = "kvstore: Register called twice for driver mock")]
    fn register_duplicate_panics() {
        let registry = Registry::new();
        registry.register_driver("mock", NopDriver);
        registry.register_driver("mock", NopDriver);
    }

    #[test]
    #[should_panic(expected = "kvstore: Register driver is nil")]
    fn register_none_panics() {
        Registry::new().register("mock", None);
    }

    #[test]
    fn duplicate_keeps_first_driver() {
        let registry = Registry::new();
        let first: Arc<dyn Driver> = Arc::new(NopDriver);
        registry.register("mock", Some(first.clone()));

        let dup = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            registry.register_driver("mock", MemoryDriver);
        }));
        assert!(dup.is_err());
        assert!(Arc::ptr_eq(&registry.resolve("mock").unwrap(), &first));
    }

    #[test]
    fn builtin_drivers_registered() {
        let names = drivers().names();
        assert!(names.contains(&"memory".to_owned()));
        assert!(names.contains(&"redb".to_owned()));
    }
}
