//! Core domain logic for GoalTrack.
//! This crate is the single source of truth for business invariants:
//! cadence period math, on-read progress derivation, and slug assignment.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod slug;
pub mod timeframe;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::goal::{Cadence, Goal, GoalId, GoalValidationError};
pub use model::journal::{EntryId, EntryValidationError, JournalEntry};
pub use repo::goal_repo::{GoalRepository, SqliteGoalRepository};
pub use repo::journal_repo::{JournalRepository, SqliteJournalRepository};
pub use repo::{RepoError, RepoResult};
pub use service::goal_service::{CreateGoalRequest, GoalService, GoalServiceError, GoalView};
pub use service::journal_service::{JournalService, JournalServiceError};
pub use slug::{assign_slug, normalize_slug};
pub use timeframe::{period_start, resolve_progress};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
