use chrono::{DateTime, TimeZone, Timelike, Utc};
use goaltrack_core::model::goal::Cadence;
use goaltrack_core::timeframe::period_start;

const ALL_CADENCES: [Cadence; 4] = [
    Cadence::Daily,
    Cadence::Weekly,
    Cadence::Monthly,
    Cadence::Yearly,
];

fn instant(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
}

#[test]
fn daily_returns_start_of_utc_day() {
    let now = instant(2024, 3, 6, 10, 0, 0);
    assert_eq!(period_start(Cadence::Daily, now), instant(2024, 3, 6, 0, 0, 0));
}

#[test]
fn weekly_returns_preceding_monday() {
    // Wednesday maps back to Monday of the same ISO week.
    let wednesday = instant(2024, 3, 6, 10, 0, 0);
    assert_eq!(
        period_start(Cadence::Weekly, wednesday),
        instant(2024, 3, 4, 0, 0, 0)
    );
}

#[test]
fn weekly_sunday_maps_to_monday_six_days_back() {
    let sunday = instant(2024, 3, 10, 23, 59, 59);
    assert_eq!(
        period_start(Cadence::Weekly, sunday),
        instant(2024, 3, 4, 0, 0, 0)
    );
}

#[test]
fn weekly_crosses_month_boundary() {
    // Friday 2024-03-01 belongs to the week starting Monday 2024-02-26.
    let friday = instant(2024, 3, 1, 8, 30, 0);
    assert_eq!(
        period_start(Cadence::Weekly, friday),
        instant(2024, 2, 26, 0, 0, 0)
    );
}

#[test]
fn monthly_returns_first_of_month() {
    let now = instant(2024, 3, 6, 10, 0, 0);
    assert_eq!(
        period_start(Cadence::Monthly, now),
        instant(2024, 3, 1, 0, 0, 0)
    );
}

#[test]
fn yearly_returns_january_first() {
    // 2024 is a leap year; ordinal math must still land on Jan 1.
    let now = instant(2024, 12, 31, 23, 0, 0);
    assert_eq!(
        period_start(Cadence::Yearly, now),
        instant(2024, 1, 1, 0, 0, 0)
    );
}

#[test]
fn period_start_is_idempotent_for_all_cadences() {
    let samples = [
        instant(2024, 3, 6, 10, 0, 0),
        instant(2024, 1, 1, 0, 0, 0),
        instant(2023, 12, 31, 23, 59, 59),
        instant(2024, 2, 29, 12, 0, 0),
    ];

    for cadence in ALL_CADENCES {
        for now in samples {
            let start = period_start(cadence, now);
            assert_eq!(period_start(cadence, start), start, "{cadence:?} {now}");
        }
    }
}

#[test]
fn period_start_never_exceeds_now_and_is_midnight_aligned() {
    let samples = [
        instant(2024, 3, 6, 10, 0, 0),
        instant(2024, 7, 15, 0, 0, 1),
        instant(2025, 1, 1, 0, 0, 0),
    ];

    for cadence in ALL_CADENCES {
        for now in samples {
            let start = period_start(cadence, now);
            assert!(start <= now, "{cadence:?} {now}");
            assert_eq!(start.num_seconds_from_midnight(), 0, "{cadence:?} {now}");
        }
    }
}
