use thiserror::Error;

/// This type represents all possible errors in kvstore lib.
#[derive(Error, Debug)]
pub enum Error {
    /// Returned by `get` when the key is absent. Every driver must use it.
    #[error("kvstore: key not found")]
    NotFound,
    #[error("kvstore: unknown driver {0:?} (forgotten import?)")]
    UnknownDriver(String),
    #[error("kvstore: invalid driver info: {0}")]
    InvalidInfo(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Redb(#[from] redb::Error),
    /// Errors from drivers living outside this crate, displayed as-is.
    #[error(transparent)]
    Backend(Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
    /// Wrap an arbitrary driver error without altering its message.
    pub fn backend(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Error::Backend(err.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound)
    }
}

// redb splits its errors per operation; fold them all into `Error::Redb`.
macro_rules! from_redb {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Error {
                fn from(err: $ty) -> Self {
                    Error::Redb(err.into())
                }
            }
        )*
    };
}

from_redb!(
    redb::DatabaseError,
    redb::TransactionError,
    redb::TableError,
    redb::StorageError,
    redb::CommitError
);

/// Alias for a Result with the error type kvstore::Error
pub type Result<T> = std::result::Result<T, crate::Error>;
