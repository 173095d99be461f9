//! SQLite backing for the profile snapshot.
//!
//! One connection per repository; the schema is a single key/value table
//! versioned through `PRAGMA user_version`.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Failures while opening or migrating the snapshot database.
#[derive(Debug)]
pub enum DbError {
    /// The connection itself could not be established.
    Open {
        location: String,
        source: rusqlite::Error,
    },
    /// A pragma, migration or statement failed on an open connection.
    Sqlite(rusqlite::Error),
    /// The file carries a schema written by a newer build.
    SchemaTooNew { found: u32, supported: u32 },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open { location, source } => {
                write!(f, "cannot open snapshot database at {location}: {source}")
            }
            Self::Sqlite(err) => write!(f, "snapshot database error: {err}"),
            Self::SchemaTooNew { found, supported } => write!(
                f,
                "snapshot schema v{found} is newer than this build supports (v{supported})"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Open { source, .. } => Some(source),
            Self::Sqlite(err) => Some(err),
            Self::SchemaTooNew { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
