//! Tests for the DuckDB and SQLite connection adapters.

use super::*;

fn duckdb() -> duckdb::Connection {
    duckdb::Connection::open_in_memory().unwrap()
}

fn sqlite() -> rusqlite::Connection {
    rusqlite::Connection::open_in_memory().unwrap()
}

/// Exercise the full adapter surface against any backend.
fn round_trip(conn: &dyn JournalConnection) {
    conn.execute_batch("CREATE TABLE t (name VARCHAR NOT NULL, note VARCHAR)")
        .unwrap();

    let inserted = conn
        .execute(
            "INSERT INTO t (name, note) VALUES (?, ?)",
            &[Some("a"), Some("first")],
        )
        .unwrap();
    assert_eq!(inserted, 1);
    conn.execute("INSERT INTO t (name, note) VALUES (?, ?)", &[Some("b"), None])
        .unwrap();

    let count = conn
        .query_count("SELECT COUNT(*) FROM t WHERE name = ?", &[Some("a")])
        .unwrap();
    assert_eq!(count, 1);

    let rows = conn
        .query_text_rows("SELECT name, note FROM t ORDER BY name", &[], &[0, 1])
        .unwrap();
    assert_eq!(
        rows,
        vec![
            vec![Some("a".to_string()), Some("first".to_string())],
            vec![Some("b".to_string()), None],
        ]
    );
}

#[test]
fn duckdb_round_trip() {
    let conn = duckdb();
    assert_eq!(JournalConnection::backend(&conn), "duckdb");
    round_trip(&conn);
}

#[test]
fn sqlite_round_trip() {
    let conn = sqlite();
    assert_eq!(JournalConnection::backend(&conn), "sqlite");
    round_trip(&conn);
}

#[test]
fn duckdb_errors_keep_driver_source() {
    let conn = duckdb();
    let err = JournalConnection::execute(&conn, "SELECT * FROM missing_table", &[]).unwrap_err();
    assert!(matches!(err, crate::JournalError::DuckDb(_)));
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn sqlite_errors_keep_driver_source() {
    let conn = sqlite();
    let err = JournalConnection::execute_batch(&conn, "CREATE TABLE (").unwrap_err();
    assert!(matches!(err, crate::JournalError::Sqlite(_)));
}
