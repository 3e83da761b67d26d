use goaltrack_core::db::migrations::latest_version;
use goaltrack_core::db::{open_db, open_db_in_memory, DbError};
use goaltrack_core::{Cadence, Goal, GoalRepository, SqliteGoalRepository};
use rusqlite::Connection;

#[test]
fn open_applies_latest_schema_version() {
    let conn = open_db_in_memory().unwrap();
    let version: u32 = conn
        .query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(version, latest_version());
    assert!(latest_version() >= 1);
}

#[test]
fn foreign_keys_are_enabled() {
    let conn = open_db_in_memory().unwrap();
    let enabled: i64 = conn
        .query_row("PRAGMA foreign_keys;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(enabled, 1);
}

#[test]
fn reopening_a_file_database_is_idempotent_and_keeps_data() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("goaltrack.db");

    let goal = Goal::new("ada", "Run", "health", Cadence::Weekly, 0);
    {
        let conn = open_db(&db_path).unwrap();
        SqliteGoalRepository::new(&conn).create_goal(&goal).unwrap();
    }

    let conn = open_db(&db_path).unwrap();
    let loaded = SqliteGoalRepository::new(&conn)
        .get_goal(goal.id)
        .unwrap()
        .unwrap();
    assert_eq!(loaded.title, "Run");
}

#[test]
fn future_schema_version_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("future.db");

    {
        let conn = Connection::open(&db_path).unwrap();
        conn.execute_batch("PRAGMA user_version = 99;").unwrap();
    }

    let err = open_db(&db_path).unwrap_err();
    assert!(matches!(
        err,
        DbError::UnsupportedSchemaVersion {
            db_version: 99,
            ..
        }
    ));
}
