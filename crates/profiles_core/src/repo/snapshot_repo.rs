//! Snapshot repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Load and overwrite serialized record sets under a fixed key.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - `save` is an upsert: one row per key, overwritten on every call.
//! - `load` returns the raw text; decoding is the caller's concern.

use crate::db::{open_db, open_db_in_memory, DbError};
use rusqlite::{params, Connection, OptionalExtension};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

pub type RepoResult<T> = Result<T, RepoError>;

/// Error for snapshot persistence and decoding.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// Stored snapshot text could not be encoded or decoded.
    Serialization(serde_json::Error),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Serialization(err) => write!(f, "invalid snapshot data: {err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Serialization(err) => Some(err),
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization(value)
    }
}

/// Repository interface for whole-value snapshots.
pub trait SnapshotRepository {
    /// Returns the value stored under `key`, or `None` when never saved.
    fn load(&self, key: &str) -> RepoResult<Option<String>>;
    /// Replaces the value stored under `key`.
    fn save(&self, key: &str, value: &str) -> RepoResult<()>;
}

/// SQLite-backed snapshot repository owning its connection.
pub struct SqliteSnapshotRepository {
    conn: Connection,
}

impl SqliteSnapshotRepository {
    /// Wraps an already migrated connection.
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    /// Opens (or creates) the database file at `path`.
    pub fn open(path: impl AsRef<Path>) -> RepoResult<Self> {
        Ok(Self::new(open_db(path)?))
    }

    /// Opens a throwaway in-memory database.
    pub fn in_memory() -> RepoResult<Self> {
        Ok(Self::new(open_db_in_memory()?))
    }

    /// Exposes the underlying connection for diagnostics and tests.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl SnapshotRepository for SqliteSnapshotRepository {
    fn load(&self, key: &str) -> RepoResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_snapshots WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn save(&self, key: &str, value: &str) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO kv_snapshots (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }
}
