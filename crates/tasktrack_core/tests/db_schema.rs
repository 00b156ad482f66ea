use rusqlite::Connection;
use tasktrack_core::db::schema::{ensure_schema, INDEXES, TABLES};
use tasktrack_core::{open_db, open_db_in_memory};

#[test]
fn open_db_in_memory_creates_tables_and_indexes() {
    let conn = open_db_in_memory().unwrap();

    for table in TABLES {
        assert_object_exists(&conn, "table", table);
    }
    for index in INDEXES {
        assert_object_exists(&conn, "index", index);
    }
}

#[test]
fn open_db_enables_foreign_keys() {
    let conn = open_db_in_memory().unwrap();
    let enabled: i64 = conn
        .query_row("PRAGMA foreign_keys;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(enabled, 1);
}

#[test]
fn schema_bootstrap_is_idempotent() {
    let conn = open_db_in_memory().unwrap();
    ensure_schema(&conn).unwrap();
    ensure_schema(&conn).unwrap();
    assert_object_exists(&conn, "table", "tasks");
}

#[test]
fn reopening_file_database_keeps_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.db");

    let conn_first = open_db(&path).unwrap();
    conn_first
        .execute(
            "INSERT INTO projects (name, description, status) VALUES ('Apollo', '', 'active');",
            [],
        )
        .unwrap();
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    let count: i64 = conn_second
        .query_row("SELECT COUNT(*) FROM projects;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn tasks_reference_parents_with_set_null() {
    let conn = open_db_in_memory().unwrap();
    let mut stmt = conn
        .prepare("SELECT \"table\", \"from\", on_delete FROM pragma_foreign_key_list('tasks');")
        .unwrap();
    let mut keys = stmt
        .query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
            ))
        })
        .unwrap()
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    keys.sort();

    assert_eq!(
        keys,
        vec![
            (
                "projects".to_string(),
                "project_id".to_string(),
                "SET NULL".to_string()
            ),
            (
                "users".to_string(),
                "assignee_id".to_string(),
                "SET NULL".to_string()
            ),
        ]
    );
}

fn assert_object_exists(conn: &Connection, kind: &str, name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = ?1 AND name = ?2
            );",
            [kind, name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "{kind} {name} does not exist");
}
