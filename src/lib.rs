//! A key-value store with pluggable drivers
//!
//! Storage is implemented by drivers (implementations of [`Driver`])
//! registered under a name. Built-in drivers:
//!
//!  * `memory`: a map held in process memory
//!  * `redb`: a single-file database, the driver info being its path

pub use drivers::{Conn, Driver};
pub use error::{Error, Result};
pub use kv::KvStore;
pub use registry::{drivers, register, Registry};

pub mod drivers;
mod error;
mod kv;
mod registry;
pub mod testutil;
