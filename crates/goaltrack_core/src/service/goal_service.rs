//! Goal use-case service.
//!
//! # Responsibility
//! - Create/rename/publish goals with collision-free slug assignment.
//! - Assemble read models with progress derived from journal entries.
//! - Track likes on public goals.
//!
//! # Invariants
//! - Displayed progress is recomputed on every read, never stored.
//! - Slug uniqueness is scoped to the owning user on every path; rename
//!   and publish exclude the goal itself from the check.
//! - A slug committed by a concurrent writer between oracle check and
//!   write triggers exactly one re-assignment against a fresh oracle.

use crate::model::goal::{Cadence, Goal, GoalId};
use crate::model::journal::JournalEntry;
use crate::repo::goal_repo::GoalRepository;
use crate::repo::journal_repo::JournalRepository;
use crate::repo::RepoError;
use crate::slug::assign_slug;
use crate::timeframe::resolve_progress;
use chrono::{DateTime, Utc};
use log::warn;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for goal use-cases.
#[derive(Debug)]
pub enum GoalServiceError {
    /// Target goal does not exist.
    GoalNotFound(GoalId),
    /// No public goal under `owner`/`slug`.
    PublicGoalNotFound { owner: String, slug: String },
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for GoalServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::GoalNotFound(id) => write!(f, "goal not found: {id}"),
            Self::PublicGoalNotFound { owner, slug } => {
                write!(f, "no public goal `{slug}` for user `{owner}`")
            }
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for GoalServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for GoalServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::GoalNotFound(id) => Self::GoalNotFound(id),
            other => Self::Repo(other),
        }
    }
}

/// Request model for goal creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateGoalRequest {
    pub owner: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub motivation: String,
    /// Raw cadence tag from the client; absent or unrecognized values
    /// degrade to weekly.
    pub cadence: Option<String>,
}

/// Read model returned to the HTTP layer. `progress` is the derived
/// integer the JSON representation exposes; it never round-trips back
/// into storage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalView {
    #[serde(flatten)]
    pub goal: Goal,
    /// Derived progress for the current cadence period, 0..=100.
    pub progress: u8,
    /// Like count across all users.
    pub likes: u32,
    /// Full journal history, ascending by creation time.
    pub journal: Vec<JournalEntry>,
}

/// Goal service facade over repository implementations.
pub struct GoalService<G: GoalRepository, J: JournalRepository> {
    goals: G,
    journal: J,
}

impl<G: GoalRepository, J: JournalRepository> GoalService<G, J> {
    /// Creates a service using the provided repository implementations.
    pub fn new(goals: G, journal: J) -> Self {
        Self { goals, journal }
    }

    /// Creates a goal, assigning a slug unique among the owner's goals.
    pub fn create_goal(
        &self,
        request: &CreateGoalRequest,
        now: DateTime<Utc>,
    ) -> Result<Goal, GoalServiceError> {
        let cadence = Cadence::parse(request.cadence.as_deref());
        let mut goal = Goal::new(
            request.owner.clone(),
            request.title.clone(),
            request.category.clone(),
            cadence,
            now.timestamp_millis(),
        );
        goal.description = request.description.clone();
        goal.motivation = request.motivation.clone();

        self.retry_once_on_conflict(&mut goal, |service, goal| {
            let slug = assign_slug(&goal.title, |candidate| {
                service.goals.slug_taken_for_owner(&goal.owner, candidate)
            })?;
            goal.slug = Some(slug);
            service.goals.create_goal(goal).map(|_| ())
        })?;

        Ok(goal)
    }

    /// Renames a goal and re-assigns its slug from the new title,
    /// excluding the goal itself from the uniqueness check.
    pub fn rename_goal(&self, id: GoalId, new_title: &str) -> Result<Goal, GoalServiceError> {
        let mut goal = self
            .goals
            .get_goal(id)?
            .ok_or(GoalServiceError::GoalNotFound(id))?;
        goal.title = new_title.to_string();

        self.retry_once_on_conflict(&mut goal, |service, goal| {
            let slug = assign_slug(&goal.title, |candidate| {
                service
                    .goals
                    .slug_taken_for_owner_excluding(&goal.owner, candidate, goal.id)
            })?;
            goal.slug = Some(slug);
            service.goals.update_goal(goal)
        })?;

        Ok(goal)
    }

    /// Toggles public visibility. Publishing assigns a slug when the goal
    /// has none, or re-assigns from `requested_slug` when one is supplied.
    pub fn set_visibility(
        &self,
        id: GoalId,
        public: bool,
        requested_slug: Option<&str>,
    ) -> Result<Goal, GoalServiceError> {
        let mut goal = self
            .goals
            .get_goal(id)?
            .ok_or(GoalServiceError::GoalNotFound(id))?;
        goal.is_public = public;

        let slug_source = if public {
            match requested_slug {
                Some(requested) => Some(requested.to_string()),
                None if goal.slug.is_none() => Some(goal.title.clone()),
                None => None,
            }
        } else {
            None
        };

        self.retry_once_on_conflict(&mut goal, |service, goal| {
            if let Some(source) = &slug_source {
                let slug = assign_slug(source, |candidate| {
                    service
                        .goals
                        .slug_taken_for_owner_excluding(&goal.owner, candidate, goal.id)
                })?;
                goal.slug = Some(slug);
            }
            service.goals.update_goal(goal)
        })?;

        Ok(goal)
    }

    /// Hard-deletes a goal; journal entries and likes cascade.
    pub fn delete_goal(&self, id: GoalId) -> Result<(), GoalServiceError> {
        self.goals.delete_goal(id)?;
        Ok(())
    }

    /// Gets one goal with derived progress and journal history.
    pub fn get_goal(&self, id: GoalId, now: DateTime<Utc>) -> Result<GoalView, GoalServiceError> {
        let goal = self
            .goals
            .get_goal(id)?
            .ok_or(GoalServiceError::GoalNotFound(id))?;
        self.assemble_view(goal, now)
    }

    /// Lists one owner's goals, newest first, with derived progress.
    pub fn list_goals(
        &self,
        owner: &str,
        now: DateTime<Utc>,
    ) -> Result<Vec<GoalView>, GoalServiceError> {
        let goals = self.goals.list_goals(owner)?;
        goals
            .into_iter()
            .map(|goal| self.assemble_view(goal, now))
            .collect()
    }

    /// Public page read: owner + slug, public goals only.
    pub fn get_public_goal(
        &self,
        owner: &str,
        slug: &str,
        now: DateTime<Utc>,
    ) -> Result<GoalView, GoalServiceError> {
        let goal = self.goals.get_public_goal(owner, slug)?.ok_or_else(|| {
            GoalServiceError::PublicGoalNotFound {
                owner: owner.to_string(),
                slug: slug.to_string(),
            }
        })?;
        self.assemble_view(goal, now)
    }

    /// Sets or clears `actor`'s like on a public goal and returns the
    /// resulting like count. Idempotent in both directions.
    pub fn toggle_like(
        &self,
        owner: &str,
        slug: &str,
        actor: &str,
        liked: bool,
        now: DateTime<Utc>,
    ) -> Result<u32, GoalServiceError> {
        let goal = self.goals.get_public_goal(owner, slug)?.ok_or_else(|| {
            GoalServiceError::PublicGoalNotFound {
                owner: owner.to_string(),
                slug: slug.to_string(),
            }
        })?;

        self.goals
            .set_liked(goal.id, actor, liked, now.timestamp_millis())?;
        let likes = self.goals.count_likes(goal.id)?;
        Ok(likes)
    }

    fn assemble_view(
        &self,
        goal: Goal,
        now: DateTime<Utc>,
    ) -> Result<GoalView, GoalServiceError> {
        let journal = self.journal.list_entries(goal.id)?;
        let progress = resolve_progress(goal.cadence, &journal, now);
        let likes = self.goals.count_likes(goal.id)?;
        Ok(GoalView {
            goal,
            progress,
            likes,
            journal,
        })
    }

    /// Runs a slug-assign-and-write closure, retrying exactly once when the
    /// write loses a slug race to a concurrent committer.
    fn retry_once_on_conflict(
        &self,
        goal: &mut Goal,
        mut commit: impl FnMut(&Self, &mut Goal) -> Result<(), RepoError>,
    ) -> Result<(), GoalServiceError> {
        match commit(self, goal) {
            Err(RepoError::SlugConflict { owner, slug }) => {
                warn!(
                    "event=slug_commit module=goal status=retry owner={owner} slug={slug}"
                );
                commit(self, goal).map_err(GoalServiceError::from)
            }
            other => other.map_err(GoalServiceError::from),
        }
    }
}
