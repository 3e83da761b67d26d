//! Slug normalization and collision-free assignment.
//!
//! # Responsibility
//! - Normalize human titles into URL-safe slugs.
//! - Find a free slug by probing a caller-supplied uniqueness oracle.
//!
//! # Invariants
//! - Normalized slugs are lowercase ASCII alphanumerics and single hyphens
//!   with no leading or trailing hyphen.
//! - The assignment loop is scope-agnostic: the oracle alone decides what
//!   "taken" means (per-owner on create, excluding the goal itself on
//!   rename).
//! - Retrying after a storage-commit conflict belongs to the caller; this
//!   module only resolves in-memory candidate collisions.

use log::warn;
use once_cell::sync::Lazy;
use regex::Regex;

/// Base used when a title normalizes to nothing slug-worthy.
pub const SLUG_FALLBACK_BASE: &str = "goal";

/// Interval of failed candidates at which assignment logs a degradation
/// warning. The loop still continues; termination is guaranteed by the
/// finite backing store.
const SUFFIX_SANITY_THRESHOLD: u64 = 10_000;

static NON_SLUG_RUN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9]+").expect("valid slug strip regex"));

/// Normalizes a title into slug form.
///
/// Lowercases, collapses every run of non-alphanumeric characters
/// (whitespace and punctuation alike) to a single hyphen, and trims edge
/// hyphens. Titles with no usable characters fall back to `"goal"`.
pub fn normalize_slug(title: &str) -> String {
    let lowered = title.to_lowercase();
    let collapsed = NON_SLUG_RUN_RE.replace_all(&lowered, "-");
    let trimmed = collapsed.trim_matches('-');
    if trimmed.is_empty() {
        SLUG_FALLBACK_BASE.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Assigns a unique slug for `title` against the supplied oracle.
///
/// Tries the normalized base first, then `base-1`, `base-2`, … with a
/// strictly increasing suffix until `exists` reports the candidate free.
/// Oracle failures propagate unchanged.
pub fn assign_slug<E>(
    title: &str,
    mut exists: impl FnMut(&str) -> Result<bool, E>,
) -> Result<String, E> {
    let base = normalize_slug(title);
    let mut candidate = base.clone();
    let mut suffix: u64 = 1;

    while exists(&candidate)? {
        // Entering the body with suffix `n` means `n` candidates have
        // failed so far (the base plus suffixes 1..n-1).
        if suffix % SUFFIX_SANITY_THRESHOLD == 0 {
            warn!(
                "event=slug_assign module=slug status=degraded base={base} tried={suffix}"
            );
        }
        candidate = format!("{base}-{suffix}");
        suffix += 1;
    }

    Ok(candidate)
}
