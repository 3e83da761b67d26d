//! Repository contracts and SQLite implementations.
//!
//! # Responsibility
//! - Provide stable persistence APIs over goal and journal storage.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths must call model `validate()` before SQL mutations.
//! - Read paths must reject invalid persisted state instead of masking it.
//! - Slug unique-constraint violations surface as `RepoError::SlugConflict`
//!   so callers can re-run slug assignment against a fresh oracle.

use crate::db::DbError;
use crate::model::goal::{GoalId, GoalValidationError};
use crate::model::journal::{EntryId, EntryValidationError};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod goal_repo;
pub mod journal_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    GoalValidation(GoalValidationError),
    EntryValidation(EntryValidationError),
    Db(DbError),
    GoalNotFound(GoalId),
    EntryNotFound(EntryId),
    /// A slug committed by a concurrent writer between oracle check and
    /// write. Callers retry assignment with a freshly re-evaluated oracle.
    SlugConflict {
        owner: String,
        slug: String,
    },
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::GoalValidation(err) => write!(f, "{err}"),
            Self::EntryValidation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::GoalNotFound(id) => write!(f, "goal not found: {id}"),
            Self::EntryNotFound(id) => write!(f, "journal entry not found: {id}"),
            Self::SlugConflict { owner, slug } => {
                write!(f, "slug `{slug}` already committed for owner `{owner}`")
            }
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::GoalValidation(err) => Some(err),
            Self::EntryValidation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<GoalValidationError> for RepoError {
    fn from(value: GoalValidationError) -> Self {
        Self::GoalValidation(value)
    }
}

impl From<EntryValidationError> for RepoError {
    fn from(value: EntryValidationError) -> Self {
        Self::EntryValidation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}
