use rusqlite::Connection;
use smarthub_core::db::migrations::latest_version;
use smarthub_core::db::{open_db, open_db_in_memory, DbError};
use smarthub_core::{KeyValueStore, SqliteKvStore};

fn user_version(conn: &Connection) -> u32 {
    conn.pragma_query_value(None, "user_version", |row| row.get(0))
        .unwrap()
}

fn kv_columns(conn: &Connection) -> Vec<String> {
    let mut stmt = conn.prepare("PRAGMA table_info(kv_entries);").unwrap();
    let names = stmt
        .query_map([], |row| row.get::<_, String>(1))
        .unwrap()
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    names
}

#[test]
fn fresh_memory_db_has_kv_table_at_latest_version() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(user_version(&conn), latest_version());
    assert_eq!(kv_columns(&conn), ["key", "value", "updated_at"]);
}

#[test]
fn slot_values_survive_reopen_of_file_db() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("hub.sqlite3");

    {
        let conn = open_db(&path).unwrap();
        let store = SqliteKvStore::new(&conn);
        store.set("lastSearchedCity", "\"Oslo\"").unwrap();
        store.set("lastSearchedCity", "\"Bergen\"").unwrap();
    }

    let conn = open_db(&path).unwrap();
    let store = SqliteKvStore::new(&conn);
    assert_eq!(
        store.get("lastSearchedCity").unwrap().as_deref(),
        Some("\"Bergen\"")
    );
    let rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM kv_entries;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 1);
}

#[test]
fn unversioned_file_is_upgraded_in_place() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("legacy.sqlite3");
    Connection::open(&path)
        .unwrap()
        .execute_batch("CREATE TABLE scratch (id INTEGER);")
        .unwrap();

    let conn = open_db(&path).unwrap();
    assert_eq!(user_version(&conn), latest_version());
    assert!(SqliteKvStore::new(&conn).keys().unwrap().is_empty());
}

#[test]
fn file_from_newer_build_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite3");
    Connection::open(&path)
        .unwrap()
        .pragma_update(None, "user_version", 42u32)
        .unwrap();

    match open_db(&path) {
        Err(DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        }) => {
            assert_eq!(db_version, 42);
            assert_eq!(latest_supported, latest_version());
        }
        Err(other) => panic!("wrong error: {other}"),
        Ok(_) => panic!("newer schema must not open"),
    }
}
