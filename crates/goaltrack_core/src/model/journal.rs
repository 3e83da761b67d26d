//! Journal entry domain model.
//!
//! # Responsibility
//! - Define the timestamped progress log row attached to a goal.
//!
//! # Invariants
//! - Entries are immutable once created; there is no update path.
//! - `progress` must be finite. Out-of-range values are a creation-time
//!   concern; the read path clamps defensively.

use crate::model::goal::GoalId;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a journal entry.
pub type EntryId = Uuid;

/// Validation error for journal entry records.
#[derive(Debug, Clone, PartialEq)]
pub enum EntryValidationError {
    /// Progress value is NaN or infinite.
    NonFiniteProgress(f64),
}

impl Display for EntryValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonFiniteProgress(value) => {
                write!(f, "journal progress must be finite, got {value}")
            }
        }
    }
}

impl Error for EntryValidationError {}

/// One progress log row for a goal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Stable global ID, also the deterministic tie-break for entries that
    /// share a `created_at` instant.
    pub id: EntryId,
    /// Owning goal.
    pub goal_id: GoalId,
    /// Free-text note logged with the progress value.
    pub note: String,
    /// Raw logged progress. Nominally 0..=100; the resolver clamps.
    pub progress: f64,
    /// Creation instant in Unix epoch milliseconds.
    pub created_at: i64,
}

impl JournalEntry {
    /// Creates a new entry with a generated stable ID.
    pub fn new(goal_id: GoalId, note: impl Into<String>, progress: f64, created_at: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            goal_id,
            note: note.into(),
            progress,
            created_at,
        }
    }

    /// Checks record-level invariants before persistence.
    pub fn validate(&self) -> Result<(), EntryValidationError> {
        if !self.progress.is_finite() {
            return Err(EntryValidationError::NonFiniteProgress(self.progress));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn validate_rejects_non_finite_progress() {
        let mut entry = JournalEntry::new(Uuid::new_v4(), "ran 5k", 40.0, 0);
        assert!(entry.validate().is_ok());

        entry.progress = f64::NAN;
        assert!(matches!(
            entry.validate(),
            Err(EntryValidationError::NonFiniteProgress(_))
        ));
    }
}
