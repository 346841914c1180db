//! SQLite file backing the hub's key-value slots.
//!
//! Each tool slot (`todos`, `notes`, ...) is one row of `kv_entries`. A
//! connection handed out by [`open_db`] is already on the current schema,
//! so stores never check the version themselves.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Failure to open or upgrade the hub database.
#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// The data directory could not be created.
    Io(std::io::Error),
    /// The file was written by a newer build of the hub.
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "hub database error: {err}"),
            Self::Io(err) => write!(f, "cannot create hub data directory: {err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "hub database uses schema v{db_version}, this build reads up to v{latest_supported}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::Io(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

impl From<std::io::Error> for DbError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}
