//! Journal use-case service.
//!
//! # Responsibility
//! - Log progress entries against goals the caller owns.
//! - List and delete entries; entries never update.
//!
//! # Invariants
//! - Creation rejects out-of-range or non-finite progress; the read-side
//!   resolver still clamps defensively.
//! - `created_at` is stamped from the caller-supplied `now`.

use crate::model::goal::GoalId;
use crate::model::journal::{EntryId, JournalEntry};
use crate::repo::goal_repo::GoalRepository;
use crate::repo::journal_repo::JournalRepository;
use crate::repo::RepoError;
use chrono::{DateTime, Utc};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for journal use-cases.
#[derive(Debug)]
pub enum JournalServiceError {
    /// Target goal does not exist.
    GoalNotFound(GoalId),
    /// Goal exists but belongs to a different user.
    NotGoalOwner { goal_id: GoalId, username: String },
    /// Target entry does not exist.
    EntryNotFound(EntryId),
    /// Progress outside `0..=100` (or not finite).
    ProgressOutOfRange(f64),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for JournalServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::GoalNotFound(id) => write!(f, "goal not found: {id}"),
            Self::NotGoalOwner { goal_id, username } => {
                write!(f, "goal {goal_id} does not belong to user `{username}`")
            }
            Self::EntryNotFound(id) => write!(f, "journal entry not found: {id}"),
            Self::ProgressOutOfRange(value) => {
                write!(f, "progress must be a number in 0..=100, got {value}")
            }
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for JournalServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for JournalServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::GoalNotFound(id) => Self::GoalNotFound(id),
            RepoError::EntryNotFound(id) => Self::EntryNotFound(id),
            other => Self::Repo(other),
        }
    }
}

/// Journal service facade over repository implementations.
pub struct JournalService<G: GoalRepository, J: JournalRepository> {
    goals: G,
    journal: J,
}

impl<G: GoalRepository, J: JournalRepository> JournalService<G, J> {
    /// Creates a service using the provided repository implementations.
    pub fn new(goals: G, journal: J) -> Self {
        Self { goals, journal }
    }

    /// Logs one progress entry against a goal owned by `username`.
    pub fn log_progress(
        &self,
        goal_id: GoalId,
        username: &str,
        note: &str,
        progress: f64,
        now: DateTime<Utc>,
    ) -> Result<JournalEntry, JournalServiceError> {
        if !progress.is_finite() || !(0.0..=100.0).contains(&progress) {
            return Err(JournalServiceError::ProgressOutOfRange(progress));
        }

        let goal = self
            .goals
            .get_goal(goal_id)?
            .ok_or(JournalServiceError::GoalNotFound(goal_id))?;
        if goal.owner != username {
            return Err(JournalServiceError::NotGoalOwner {
                goal_id,
                username: username.to_string(),
            });
        }

        let entry = JournalEntry::new(goal_id, note, progress, now.timestamp_millis());
        self.journal.create_entry(&entry)?;
        Ok(entry)
    }

    /// Lists a goal's entries, ascending by creation time.
    pub fn list_entries(&self, goal_id: GoalId) -> Result<Vec<JournalEntry>, JournalServiceError> {
        let entries = self.journal.list_entries(goal_id)?;
        Ok(entries)
    }

    /// Deletes one entry by id.
    pub fn delete_entry(&self, id: EntryId) -> Result<(), JournalServiceError> {
        self.journal.delete_entry(id)?;
        Ok(())
    }
}
