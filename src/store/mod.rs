//! Persistence seam and SQLite implementation.

/// SQLite-backed [`RecordStore`].
pub mod sqlite;

use thiserror::Error;

use crate::record::{Snapshot, UserId, UserRecord};

/// Failure at the persistence boundary.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying SQLite I/O or statement failure.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    /// A record arrived with an empty identity key.
    #[error("record id must be non-empty")]
    EmptyId,
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Durable table of [`UserRecord`]s keyed by id.
///
/// Implementations must make each operation atomic with respect to readers:
/// a concurrent `all` never observes a partially applied mutation.
pub trait RecordStore: Send {
    /// Inserts or replaces the record at `record.id`.
    ///
    /// A duplicate id replaces the non-id fields without error, and the row
    /// keeps its position in the scan order.
    fn upsert(&mut self, record: &UserRecord) -> StoreResult<()>;

    /// Removes the record with `id` if present; absent ids are a no-op.
    fn delete_by_id(&mut self, id: &UserId) -> StoreResult<()>;

    /// Removes every record.
    fn delete_all(&mut self) -> StoreResult<()>;

    /// Full scan in stable insertion order.
    fn all(&mut self) -> StoreResult<Snapshot>;
}
