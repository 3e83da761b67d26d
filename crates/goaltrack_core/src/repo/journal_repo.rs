//! Journal repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist and read back immutable journal entries for a goal.
//!
//! # Invariants
//! - Entries have no update path; only create and delete.
//! - Listing is ordered ascending by `created_at` with entry id as the
//!   deterministic tie-break, matching the progress resolver's ordering.

use crate::model::goal::GoalId;
use crate::model::journal::{EntryId, JournalEntry};
use crate::repo::{RepoError, RepoResult};
use rusqlite::{params, Connection, Row};
use uuid::Uuid;

/// Repository interface for journal entry persistence.
pub trait JournalRepository {
    fn create_entry(&self, entry: &JournalEntry) -> RepoResult<EntryId>;
    fn list_entries(&self, goal_id: GoalId) -> RepoResult<Vec<JournalEntry>>;
    fn delete_entry(&self, id: EntryId) -> RepoResult<()>;
}

/// SQLite-backed journal repository.
pub struct SqliteJournalRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteJournalRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl JournalRepository for SqliteJournalRepository<'_> {
    fn create_entry(&self, entry: &JournalEntry) -> RepoResult<EntryId> {
        entry.validate()?;

        self.conn.execute(
            "INSERT INTO journal_entries (id, goal_id, note, progress, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                entry.id.to_string(),
                entry.goal_id.to_string(),
                entry.note.as_str(),
                entry.progress,
                entry.created_at,
            ],
        )?;

        Ok(entry.id)
    }

    fn list_entries(&self, goal_id: GoalId) -> RepoResult<Vec<JournalEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, goal_id, note, progress, created_at
             FROM journal_entries
             WHERE goal_id = ?1
             ORDER BY created_at ASC, id ASC;",
        )?;

        let mut rows = stmt.query([goal_id.to_string()])?;
        let mut entries = Vec::new();
        while let Some(row) = rows.next()? {
            entries.push(parse_entry_row(row)?);
        }

        Ok(entries)
    }

    fn delete_entry(&self, id: EntryId) -> RepoResult<()> {
        let changed = self.conn.execute(
            "DELETE FROM journal_entries WHERE id = ?1;",
            [id.to_string()],
        )?;

        if changed == 0 {
            return Err(RepoError::EntryNotFound(id));
        }

        Ok(())
    }
}

fn parse_entry_row(row: &Row<'_>) -> RepoResult<JournalEntry> {
    let id = parse_uuid_column(row, "id")?;
    let goal_id = parse_uuid_column(row, "goal_id")?;

    let entry = JournalEntry {
        id,
        goal_id,
        note: row.get("note")?,
        progress: row.get("progress")?,
        created_at: row.get("created_at")?,
    };
    entry.validate()?;
    Ok(entry)
}

fn parse_uuid_column(row: &Row<'_>, column: &str) -> RepoResult<Uuid> {
    let text: String = row.get(column)?;
    Uuid::parse_str(&text).map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid uuid value `{text}` in journal_entries.{column}"
        ))
    })
}
