use chrono::{DateTime, Duration, TimeZone, Utc};
use goaltrack_core::db::open_db_in_memory;
use goaltrack_core::{
    CreateGoalRequest, GoalService, JournalEntry, JournalRepository, JournalService,
    JournalServiceError, SqliteGoalRepository, SqliteJournalRepository,
};
use rusqlite::Connection;
use uuid::Uuid;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 6, 10, 0, 0).unwrap()
}

fn goal_service(
    conn: &Connection,
) -> GoalService<SqliteGoalRepository<'_>, SqliteJournalRepository<'_>> {
    GoalService::new(
        SqliteGoalRepository::new(conn),
        SqliteJournalRepository::new(conn),
    )
}

fn journal_service(
    conn: &Connection,
) -> JournalService<SqliteGoalRepository<'_>, SqliteJournalRepository<'_>> {
    JournalService::new(
        SqliteGoalRepository::new(conn),
        SqliteJournalRepository::new(conn),
    )
}

fn seed_goal(conn: &Connection, owner: &str, cadence: &str) -> goaltrack_core::Goal {
    goal_service(conn)
        .create_goal(
            &CreateGoalRequest {
                owner: owner.to_string(),
                title: "Run a marathon".to_string(),
                description: String::new(),
                category: "health".to_string(),
                motivation: String::new(),
                cadence: Some(cadence.to_string()),
            },
            now(),
        )
        .unwrap()
}

#[test]
fn log_progress_persists_and_lists_ascending() {
    let conn = open_db_in_memory().unwrap();
    let goal = seed_goal(&conn, "ada", "daily");
    let journal = journal_service(&conn);

    let earlier = now() - Duration::hours(2);
    let first = journal
        .log_progress(goal.id, "ada", "warmup", 20.0, earlier)
        .unwrap();
    let second = journal
        .log_progress(goal.id, "ada", "5k done", 60.0, now())
        .unwrap();

    let entries = journal.list_entries(goal.id).unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].id, first.id);
    assert_eq!(entries[1].id, second.id);
    assert_eq!(entries[1].note, "5k done");
}

#[test]
fn out_of_range_progress_is_rejected_at_creation() {
    let conn = open_db_in_memory().unwrap();
    let goal = seed_goal(&conn, "ada", "daily");
    let journal = journal_service(&conn);

    for bad in [150.0, -5.0, f64::NAN, f64::INFINITY] {
        let err = journal
            .log_progress(goal.id, "ada", "", bad, now())
            .unwrap_err();
        assert!(
            matches!(err, JournalServiceError::ProgressOutOfRange(_)),
            "{bad} should be rejected"
        );
    }
}

#[test]
fn logging_against_a_foreign_goal_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let goal = seed_goal(&conn, "ada", "daily");
    let journal = journal_service(&conn);

    let err = journal
        .log_progress(goal.id, "grace", "not mine", 10.0, now())
        .unwrap_err();
    assert!(matches!(err, JournalServiceError::NotGoalOwner { .. }));
}

#[test]
fn logging_against_a_missing_goal_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let journal = journal_service(&conn);

    let id = Uuid::new_v4();
    let err = journal.log_progress(id, "ada", "", 10.0, now()).unwrap_err();
    assert!(matches!(err, JournalServiceError::GoalNotFound(found) if found == id));
}

#[test]
fn delete_entry_removes_row_and_second_delete_fails() {
    let conn = open_db_in_memory().unwrap();
    let goal = seed_goal(&conn, "ada", "daily");
    let journal = journal_service(&conn);

    let entry = journal
        .log_progress(goal.id, "ada", "", 30.0, now())
        .unwrap();

    journal.delete_entry(entry.id).unwrap();
    assert!(journal.list_entries(goal.id).unwrap().is_empty());

    let err = journal.delete_entry(entry.id).unwrap_err();
    assert!(matches!(err, JournalServiceError::EntryNotFound(id) if id == entry.id));
}

#[test]
fn derived_progress_ignores_entries_from_previous_periods() {
    let conn = open_db_in_memory().unwrap();
    let goal = seed_goal(&conn, "ada", "daily");

    // Yesterday's entry is outside the daily period; write it straight
    // through the repository to control the timestamp.
    let repo = SqliteJournalRepository::new(&conn);
    let yesterday = (now() - Duration::days(1)).timestamp_millis();
    repo.create_entry(&JournalEntry::new(goal.id, "old", 95.0, yesterday))
        .unwrap();

    let view = goal_service(&conn).get_goal(goal.id, now()).unwrap();
    assert_eq!(view.progress, 0);

    repo.create_entry(&JournalEntry::new(
        goal.id,
        "today",
        45.0,
        now().timestamp_millis(),
    ))
    .unwrap();

    let view = goal_service(&conn).get_goal(goal.id, now()).unwrap();
    assert_eq!(view.progress, 45);
}

#[test]
fn derived_progress_clamps_persisted_out_of_range_values() {
    let conn = open_db_in_memory().unwrap();
    let goal = seed_goal(&conn, "ada", "weekly");

    // Simulates a historical row written before creation-path validation.
    let repo = SqliteJournalRepository::new(&conn);
    repo.create_entry(&JournalEntry::new(
        goal.id,
        "",
        150.0,
        now().timestamp_millis(),
    ))
    .unwrap();

    let view = goal_service(&conn).get_goal(goal.id, now()).unwrap();
    assert_eq!(view.progress, 100);
}
