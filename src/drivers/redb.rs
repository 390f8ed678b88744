//! File-backed driver on top of [redb], registered as `"redb"`.
//!
//! The driver info is the path of the database file. A database file can be
//! held by one connection at a time; opening it twice fails with a redb error.

use crate::drivers::{Conn, Driver};
use crate::{Error, Result};
use bytes::Bytes;
use redb::{Database, ReadableTable, TableDefinition};
use std::path::Path;

pub const NAME: &str = "redb";

const TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("kvstore");

#[derive(Debug, Default, Clone, Copy)]
pub struct RedbDriver;

impl Driver for RedbDriver {
    fn open(&self, info: &str) -> Result<Box<dyn Conn>> {
        Ok(Box::new(RedbConn::open(info)?))
    }
}

pub struct RedbConn {
    db: Database,
}

impl RedbConn {
    // The path names the redb file itself, not a directory.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(Error::InvalidInfo(
                "redb needs a database file path".to_owned(),
            ));
        }
        if let Some(parent_of_path) = path.parent() {
            std::fs::create_dir_all(parent_of_path)?;
        }

        let db = Database::create(path)?;

        // Create the table up front so reads on a fresh file see NotFound.
        let write_txn = db.begin_write()?;
        write_txn.open_table(TABLE)?;
        write_txn.commit()?;

        Ok(RedbConn { db })
    }
}

impl Conn for RedbConn {
    fn set(&self, key: &str, value: Bytes) -> Result<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(TABLE)?;
            table.insert(key, &value[..])?;
        }
        write_txn.commit()?;

        Ok(())
    }

    fn get(&self, key: &str) -> Result<Bytes> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(TABLE)?;

        // the guard borrows `table`, copy out before it drops
        let value = table
            .get(key)?
            .map(|guard| Bytes::copy_from_slice(guard.value()))
            .ok_or(Error::NotFound);
        value
    }

    fn delete(&self, key: &str) -> Result<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(TABLE)?;
            table.remove(key)?;
        }
        write_txn.commit()?;

        Ok(())
    }

    fn close(self: Box<Self>) -> Result<()> {
        drop(self.db);
        Ok(())
    }
}
