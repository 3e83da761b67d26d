//! Cadence period math and on-read progress derivation.
//!
//! # Responsibility
//! - Compute the UTC-aligned start of the current cadence period.
//! - Derive a goal's displayed progress from its journal entries.
//!
//! # Invariants
//! - `period_start` output is always UTC-midnight-aligned and `<= now`.
//! - Derived progress is always an integer in `0..=100`.
//! - Both functions are pure; `now` is always supplied by the caller so
//!   every computation is reproducible in tests.

use crate::model::goal::Cadence;
use crate::model::journal::JournalEntry;
use chrono::{DateTime, Datelike, Duration, NaiveTime, Utc};

/// Returns the inclusive start boundary of the cadence period containing
/// `now`.
///
/// - `Daily`: start of `now`'s UTC calendar day.
/// - `Weekly`: Monday 00:00 UTC of the ISO week containing `now`.
/// - `Monthly`: first of `now`'s calendar month, 00:00 UTC.
/// - `Yearly`: January 1 of `now`'s calendar year, 00:00 UTC.
pub fn period_start(cadence: Cadence, now: DateTime<Utc>) -> DateTime<Utc> {
    let day_start = now.with_time(NaiveTime::MIN).single().unwrap_or(now);
    let days_back = match cadence {
        Cadence::Daily => 0,
        Cadence::Weekly => i64::from(now.weekday().num_days_from_monday()),
        Cadence::Monthly => i64::from(now.day()) - 1,
        Cadence::Yearly => i64::from(now.ordinal()) - 1,
    };
    day_start - Duration::days(days_back)
}

/// Derives the displayed progress for a goal from its journal entries.
///
/// Entries created at or after the current period start are kept (future
/// timestamps included), ordered ascending by `created_at` with entry id as
/// the deterministic tie-break, and the last one wins. An empty period
/// resolves to `0`.
///
/// Recomputed on every read; never cache the result, since the period
/// boundary advances between reads.
///
/// # Panics
/// Panics when an entry carries a non-finite `progress` value. That is a
/// contract violation by the caller, not a runtime condition to recover
/// from.
pub fn resolve_progress(cadence: Cadence, entries: &[JournalEntry], now: DateTime<Utc>) -> u8 {
    let start_ms = period_start(cadence, now).timestamp_millis();

    let mut in_period: Vec<&JournalEntry> = entries
        .iter()
        .filter(|entry| entry.created_at >= start_ms)
        .collect();
    in_period.sort_by(|a, b| {
        a.created_at
            .cmp(&b.created_at)
            .then_with(|| a.id.cmp(&b.id))
    });

    match in_period.last() {
        None => 0,
        Some(entry) => clamp_progress(entry.progress),
    }
}

/// Bounds a raw progress value into the displayed `0..=100` integer range,
/// rounding half-up.
pub fn clamp_progress(raw: f64) -> u8 {
    assert!(raw.is_finite(), "progress must be finite, got {raw}");
    raw.clamp(0.0, 100.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn clamp_rounds_half_up() {
        assert_eq!(clamp_progress(49.5), 50);
        assert_eq!(clamp_progress(49.4), 49);
    }

    #[test]
    fn weekly_monday_is_its_own_period_start() {
        let monday = Utc.with_ymd_and_hms(2024, 3, 4, 0, 0, 0).unwrap();
        assert_eq!(period_start(Cadence::Weekly, monday), monday);
    }
}
