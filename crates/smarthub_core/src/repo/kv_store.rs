//! Durable key-value storage contracts and implementations.
//!
//! # Responsibility
//! - Provide a string-keyed document store that tools persist into.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - `set` fully replaces the stored value; there are no partial writes.
//! - Reading an absent key is `Ok(None)`, never an error.

use crate::db::DbError;
use rusqlite::{params, Connection, OptionalExtension};
use std::cell::RefCell;
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Storage-level error for key-value reads and writes.
#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
    Serialize(serde_json::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Serialize(err) => write!(f, "failed to serialize stored value: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Serialize(err) => Some(err),
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}

/// Fixed storage slots, one per tool-owned value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    Todos,
    Notes,
    Polls,
    CalculatorHistory,
    LastSearchedCity,
}

impl StorageKey {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Todos => "todos",
            Self::Notes => "notes",
            Self::Polls => "polls",
            Self::CalculatorHistory => "calculatorHistory",
            Self::LastSearchedCity => "lastSearchedCity",
        }
    }
}

impl Display for StorageKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw string-valued storage, the persistence seam of every tool.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;
    fn remove(&self, key: &str) -> StoreResult<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        (**self).remove(key)
    }
}

/// SQLite-backed store over the `kv_entries` table.
pub struct SqliteKvStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteKvStore<'conn> {
    /// Wraps a connection returned by [`crate::db::open_db`].
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Lists stored keys in lexical order.
    pub fn keys(&self) -> StoreResult<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT key FROM kv_entries ORDER BY key ASC;")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
        let mut keys = Vec::new();
        for key in rows {
            keys.push(key?);
        }
        Ok(keys)
    }
}

impl KeyValueStore for SqliteKvStore<'_> {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO kv_entries (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        self.conn
            .execute("DELETE FROM kv_entries WHERE key = ?1;", [key])?;
        Ok(())
    }
}

/// Process-local store, used for ephemeral sessions and tests.
#[derive(Debug, Default)]
pub struct MemoryKvStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently held.
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryKvStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{KeyValueStore, MemoryKvStore, SqliteKvStore, StorageKey};
    use crate::db::open_db_in_memory;

    #[test]
    fn storage_keys_match_persisted_names() {
        assert_eq!(StorageKey::Todos.as_str(), "todos");
        assert_eq!(StorageKey::CalculatorHistory.as_str(), "calculatorHistory");
        assert_eq!(StorageKey::LastSearchedCity.to_string(), "lastSearchedCity");
    }

    #[test]
    fn sqlite_store_overwrites_and_removes() {
        let conn = open_db_in_memory().expect("in-memory db should open");
        let store = SqliteKvStore::new(&conn);

        assert_eq!(store.get("todos").expect("get should succeed"), None);
        store.set("todos", "[1]").expect("first set should succeed");
        store.set("todos", "[2]").expect("overwrite should succeed");
        assert_eq!(
            store.get("todos").expect("get should succeed").as_deref(),
            Some("[2]")
        );
        assert_eq!(store.keys().expect("keys should list"), vec!["todos"]);

        store.remove("todos").expect("remove should succeed");
        assert_eq!(store.get("todos").expect("get should succeed"), None);
    }

    #[test]
    fn memory_store_is_usable_through_reference() {
        let store = MemoryKvStore::new();
        let by_ref = &store;
        by_ref.set("notes", "[]").expect("set should succeed");
        assert_eq!(store.len(), 1);
        assert_eq!(
            store.get("notes").expect("get should succeed").as_deref(),
            Some("[]")
        );
    }
}
