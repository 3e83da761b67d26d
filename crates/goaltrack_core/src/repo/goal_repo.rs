//! Goal repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide goal CRUD plus the slug-uniqueness oracles consumed by slug
//!   assignment.
//! - Own like-row persistence for public goals.
//!
//! # Invariants
//! - Slug uniqueness checks are always scoped to the owning user, on both
//!   create and rename paths.
//! - Goal deletion hard-deletes; journal entries and likes cascade via
//!   foreign keys.

use crate::model::goal::{Cadence, Goal, GoalId};
use crate::repo::{RepoError, RepoResult};
use rusqlite::{params, Connection, ErrorCode, Row};
use uuid::Uuid;

const GOAL_SELECT_SQL: &str = "SELECT
    id,
    owner,
    title,
    description,
    category,
    motivation,
    cadence,
    slug,
    is_public,
    created_at
FROM goals";

/// Repository interface for goal persistence.
pub trait GoalRepository {
    fn create_goal(&self, goal: &Goal) -> RepoResult<GoalId>;
    fn get_goal(&self, id: GoalId) -> RepoResult<Option<Goal>>;
    /// Public page lookup: owner + slug, public goals only.
    fn get_public_goal(&self, owner: &str, slug: &str) -> RepoResult<Option<Goal>>;
    /// Lists one owner's goals, newest first.
    fn list_goals(&self, owner: &str) -> RepoResult<Vec<Goal>>;
    fn update_goal(&self, goal: &Goal) -> RepoResult<()>;
    fn delete_goal(&self, id: GoalId) -> RepoResult<()>;
    /// Uniqueness oracle for goal creation.
    fn slug_taken_for_owner(&self, owner: &str, slug: &str) -> RepoResult<bool>;
    /// Uniqueness oracle for rename/publish, ignoring the goal itself.
    fn slug_taken_for_owner_excluding(
        &self,
        owner: &str,
        slug: &str,
        exclude: GoalId,
    ) -> RepoResult<bool>;
    /// Inserts or removes one actor's like row. Idempotent in both
    /// directions.
    fn set_liked(&self, goal_id: GoalId, username: &str, liked: bool, now_ms: i64)
        -> RepoResult<()>;
    fn count_likes(&self, goal_id: GoalId) -> RepoResult<u32>;
}

/// SQLite-backed goal repository.
pub struct SqliteGoalRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteGoalRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl GoalRepository for SqliteGoalRepository<'_> {
    fn create_goal(&self, goal: &Goal) -> RepoResult<GoalId> {
        goal.validate()?;

        self.conn
            .execute(
                "INSERT INTO goals (
                    id,
                    owner,
                    title,
                    description,
                    category,
                    motivation,
                    cadence,
                    slug,
                    is_public,
                    created_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10);",
                params![
                    goal.id.to_string(),
                    goal.owner.as_str(),
                    goal.title.as_str(),
                    goal.description.as_str(),
                    goal.category.as_str(),
                    goal.motivation.as_str(),
                    goal.cadence.as_str(),
                    goal.slug.as_deref(),
                    bool_to_int(goal.is_public),
                    goal.created_at,
                ],
            )
            .map_err(|err| map_slug_constraint(err, goal))?;

        Ok(goal.id)
    }

    fn get_goal(&self, id: GoalId) -> RepoResult<Option<Goal>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{GOAL_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_goal_row(row)?));
        }

        Ok(None)
    }

    fn get_public_goal(&self, owner: &str, slug: &str) -> RepoResult<Option<Goal>> {
        let mut stmt = self.conn.prepare(&format!(
            "{GOAL_SELECT_SQL}
             WHERE owner = ?1
               AND slug = ?2
               AND is_public = 1
             LIMIT 1;"
        ))?;

        let mut rows = stmt.query(params![owner, slug])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_goal_row(row)?));
        }

        Ok(None)
    }

    fn list_goals(&self, owner: &str) -> RepoResult<Vec<Goal>> {
        let mut stmt = self.conn.prepare(&format!(
            "{GOAL_SELECT_SQL}
             WHERE owner = ?1
             ORDER BY created_at DESC, id ASC;"
        ))?;

        let mut rows = stmt.query([owner])?;
        let mut goals = Vec::new();
        while let Some(row) = rows.next()? {
            goals.push(parse_goal_row(row)?);
        }

        Ok(goals)
    }

    fn update_goal(&self, goal: &Goal) -> RepoResult<()> {
        goal.validate()?;

        let changed = self
            .conn
            .execute(
                "UPDATE goals
                 SET
                    title = ?1,
                    description = ?2,
                    category = ?3,
                    motivation = ?4,
                    cadence = ?5,
                    slug = ?6,
                    is_public = ?7
                 WHERE id = ?8;",
                params![
                    goal.title.as_str(),
                    goal.description.as_str(),
                    goal.category.as_str(),
                    goal.motivation.as_str(),
                    goal.cadence.as_str(),
                    goal.slug.as_deref(),
                    bool_to_int(goal.is_public),
                    goal.id.to_string(),
                ],
            )
            .map_err(|err| map_slug_constraint(err, goal))?;

        if changed == 0 {
            return Err(RepoError::GoalNotFound(goal.id));
        }

        Ok(())
    }

    fn delete_goal(&self, id: GoalId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM goals WHERE id = ?1;", [id.to_string()])?;

        if changed == 0 {
            return Err(RepoError::GoalNotFound(id));
        }

        Ok(())
    }

    fn slug_taken_for_owner(&self, owner: &str, slug: &str) -> RepoResult<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM goals WHERE owner = ?1 AND slug = ?2;",
            params![owner, slug],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    fn slug_taken_for_owner_excluding(
        &self,
        owner: &str,
        slug: &str,
        exclude: GoalId,
    ) -> RepoResult<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM goals WHERE owner = ?1 AND slug = ?2 AND id != ?3;",
            params![owner, slug, exclude.to_string()],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    fn set_liked(
        &self,
        goal_id: GoalId,
        username: &str,
        liked: bool,
        now_ms: i64,
    ) -> RepoResult<()> {
        if liked {
            self.conn.execute(
                "INSERT INTO goal_likes (goal_id, username, created_at)
                 VALUES (?1, ?2, ?3)
                 ON CONFLICT (goal_id, username) DO NOTHING;",
                params![goal_id.to_string(), username, now_ms],
            )?;
        } else {
            self.conn.execute(
                "DELETE FROM goal_likes WHERE goal_id = ?1 AND username = ?2;",
                params![goal_id.to_string(), username],
            )?;
        }

        Ok(())
    }

    fn count_likes(&self, goal_id: GoalId) -> RepoResult<u32> {
        let count: u32 = self.conn.query_row(
            "SELECT COUNT(*) FROM goal_likes WHERE goal_id = ?1;",
            [goal_id.to_string()],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}

fn parse_goal_row(row: &Row<'_>) -> RepoResult<Goal> {
    let id_text: String = row.get("id")?;
    let id = Uuid::parse_str(&id_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{id_text}` in goals.id"))
    })?;

    // Unrecognized persisted tags degrade to weekly rather than failing;
    // that is the required cadence default, not data corruption.
    let cadence_text: String = row.get("cadence")?;
    let cadence = Cadence::parse(Some(&cadence_text));

    let is_public = match row.get::<_, i64>("is_public")? {
        0 => false,
        1 => true,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid is_public value `{other}` in goals.is_public"
            )));
        }
    };

    let goal = Goal {
        id,
        owner: row.get("owner")?,
        title: row.get("title")?,
        description: row.get("description")?,
        category: row.get("category")?,
        motivation: row.get("motivation")?,
        cadence,
        slug: row.get("slug")?,
        is_public,
        created_at: row.get("created_at")?,
    };
    goal.validate()?;
    Ok(goal)
}

fn map_slug_constraint(err: rusqlite::Error, goal: &Goal) -> RepoError {
    // SQLite reports unique-index violations by column list, e.g.
    // "UNIQUE constraint failed: goals.owner, goals.slug".
    if let rusqlite::Error::SqliteFailure(code, Some(message)) = &err {
        if code.code == ErrorCode::ConstraintViolation
            && message.contains("goals.owner")
            && message.contains("goals.slug")
        {
            return RepoError::SlugConflict {
                owner: goal.owner.clone(),
                slug: goal.slug.clone().unwrap_or_default(),
            };
        }
    }
    err.into()
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}
