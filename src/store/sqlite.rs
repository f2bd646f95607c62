//! SQLite-backed user table.

use std::path::Path;

use rusqlite::{Connection, params};

use crate::record::{Snapshot, UserId, UserRecord};

use super::{RecordStore, StoreError, StoreResult};

/// SQLite implementation of [`RecordStore`] over a single `users` table.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Opens or creates the store at `path`.
    ///
    /// Enables WAL mode and sets `synchronous=NORMAL`.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let conn = Connection::open(path)?;
        Self::init_connection(conn)
    }

    /// Opens an in-memory store.
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init_connection(conn)
    }

    fn init_connection(conn: Connection) -> StoreResult<Self> {
        conn.execute_batch(include_str!("schema.sql"))?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        Ok(Self { conn })
    }

    /// Number of rows currently in the table.
    pub fn len(&self) -> StoreResult<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// True when the table holds no rows.
    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }
}

impl RecordStore for SqliteStore {
    fn upsert(&mut self, record: &UserRecord) -> StoreResult<()> {
        if record.id.is_empty() {
            return Err(StoreError::EmptyId);
        }

        // ON CONFLICT DO UPDATE keeps the conflicting row's rowid, so an
        // edited row does not move in the scan order.
        self.conn.execute(
            "INSERT INTO users (ID, Name, Email, Major) VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(ID) DO UPDATE SET
                 Name = excluded.Name,
                 Email = excluded.Email,
                 Major = excluded.Major",
            params![record.id, record.name, record.email, record.major],
        )?;
        Ok(())
    }

    fn delete_by_id(&mut self, id: &UserId) -> StoreResult<()> {
        self.conn
            .execute("DELETE FROM users WHERE ID = ?1", params![id])?;
        Ok(())
    }

    fn delete_all(&mut self) -> StoreResult<()> {
        self.conn.execute("DELETE FROM users", [])?;
        Ok(())
    }

    fn all(&mut self) -> StoreResult<Snapshot> {
        let mut stmt = self
            .conn
            .prepare("SELECT ID, Name, Email, Major FROM users ORDER BY rowid ASC")?;

        let rows = stmt.query_map([], |row| {
            Ok(UserRecord {
                id: row.get(0)?,
                name: row.get(1)?,
                email: row.get(2)?,
                major: row.get(3)?,
            })
        })?;

        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    }
}
