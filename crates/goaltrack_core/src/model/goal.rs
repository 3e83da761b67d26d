//! Goal domain model.
//!
//! # Responsibility
//! - Define the canonical goal record and its tracking cadence.
//! - Validate slug shape and required fields before persistence.
//!
//! # Invariants
//! - `id` is stable and never reused for another goal.
//! - `slug` is either `None` or lowercase ASCII alphanumerics/hyphens with
//!   no leading or trailing hyphen.
//! - Displayed progress is not stored here; it is derived from journal
//!   entries on every read.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a goal.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type GoalId = Uuid;

static SLUG_SHAPE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)*$").expect("valid slug shape regex"));

/// Progress-tracking period granularity for a goal.
///
/// Parsing is total: anything outside the four known tags degrades to
/// `Weekly` instead of failing, matching required default behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cadence {
    /// Period resets at the start of each UTC calendar day.
    Daily,
    /// Period resets each Monday 00:00 UTC (ISO week).
    Weekly,
    /// Period resets on the first of each calendar month.
    Monthly,
    /// Period resets on January 1.
    Yearly,
}

impl Cadence {
    /// Normalizes a raw cadence tag, case-insensitively.
    ///
    /// Absent or unrecognized tags fall back to `Weekly`.
    pub fn parse(tag: Option<&str>) -> Self {
        match tag.map(str::trim).map(str::to_ascii_lowercase).as_deref() {
            Some("daily") => Self::Daily,
            Some("weekly") => Self::Weekly,
            Some("monthly") => Self::Monthly,
            Some("yearly") => Self::Yearly,
            _ => Self::Weekly,
        }
    }

    /// Returns the literal lowercase tag used in storage and JSON.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }
}

impl Default for Cadence {
    fn default() -> Self {
        Self::Weekly
    }
}

/// Validation error for goal records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoalValidationError {
    /// Owner username is empty or whitespace-only.
    EmptyOwner,
    /// Title is empty or whitespace-only.
    EmptyTitle,
    /// Slug is present but does not match the normalized shape.
    MalformedSlug(String),
}

impl Display for GoalValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyOwner => write!(f, "goal owner must not be empty"),
            Self::EmptyTitle => write!(f, "goal title must not be empty"),
            Self::MalformedSlug(slug) => write!(f, "malformed goal slug: `{slug}`"),
        }
    }
}

impl Error for GoalValidationError {}

/// Canonical goal record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    /// Stable global ID used for linking and auditing.
    pub id: GoalId,
    /// Username of the owning user.
    pub owner: String,
    /// Human-readable title; source material for slug assignment.
    pub title: String,
    /// Optional free-text description.
    pub description: String,
    /// User-chosen category label.
    pub category: String,
    /// Optional motivation text shown on the goal page.
    pub motivation: String,
    /// Progress-tracking period granularity.
    pub cadence: Cadence,
    /// URL-safe public identifier, unique within the owner's namespace.
    /// `None` until first assignment.
    pub slug: Option<String>,
    /// Whether the goal is visible on its public page.
    pub is_public: bool,
    /// Creation instant in Unix epoch milliseconds.
    pub created_at: i64,
}

impl Goal {
    /// Creates a new private goal with a generated stable ID and no slug.
    pub fn new(
        owner: impl Into<String>,
        title: impl Into<String>,
        category: impl Into<String>,
        cadence: Cadence,
        created_at: i64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner: owner.into(),
            title: title.into(),
            description: String::new(),
            category: category.into(),
            motivation: String::new(),
            cadence,
            slug: None,
            is_public: false,
            created_at,
        }
    }

    /// Checks record-level invariants before persistence.
    ///
    /// Slug uniqueness is a storage concern and is not checked here.
    pub fn validate(&self) -> Result<(), GoalValidationError> {
        if self.owner.trim().is_empty() {
            return Err(GoalValidationError::EmptyOwner);
        }
        if self.title.trim().is_empty() {
            return Err(GoalValidationError::EmptyTitle);
        }
        if let Some(slug) = &self.slug {
            if !SLUG_SHAPE_RE.is_match(slug) {
                return Err(GoalValidationError::MalformedSlug(slug.clone()));
            }
        }
        Ok(())
    }
}

/// Returns whether `slug` matches the normalized slug shape.
pub fn is_valid_slug(slug: &str) -> bool {
    SLUG_SHAPE_RE.is_match(slug)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cadence_parse_is_case_insensitive_with_weekly_fallback() {
        assert_eq!(Cadence::parse(Some("DAILY")), Cadence::Daily);
        assert_eq!(Cadence::parse(Some(" monthly ")), Cadence::Monthly);
        assert_eq!(Cadence::parse(Some("fortnightly")), Cadence::Weekly);
        assert_eq!(Cadence::parse(None), Cadence::Weekly);
    }

    #[test]
    fn cadence_tags_round_trip_through_serde() {
        let json = serde_json::to_string(&Cadence::Yearly).unwrap();
        assert_eq!(json, "\"yearly\"");
        let parsed: Cadence = serde_json::from_str("\"daily\"").unwrap();
        assert_eq!(parsed, Cadence::Daily);
    }

    #[test]
    fn validate_rejects_malformed_slug() {
        let mut goal = Goal::new("ada", "Run a marathon", "health", Cadence::Weekly, 0);
        goal.slug = Some("Run--Marathon-".to_string());
        assert!(matches!(
            goal.validate(),
            Err(GoalValidationError::MalformedSlug(_))
        ));

        goal.slug = Some("run-a-marathon".to_string());
        assert!(goal.validate().is_ok());
    }
}
