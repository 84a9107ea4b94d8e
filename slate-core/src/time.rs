//! Interval math over instants: day comparisons, deltas, recurring-weekday
//! expansion, free-time computation.
//!
//! Every function takes an explicit `now` where time-relative; nothing in here
//! reads a clock. Calendar-day comparisons use the UTC calendar date of each
//! instant.

use anyhow::Result;
use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, TimeZone, Utc, Weekday};
use chrono_tz::Tz;

/// UTC calendar date of an instant.
pub fn utc_date(instant: DateTime<Utc>) -> NaiveDate {
    instant.date_naive()
}

pub fn is_today(instant: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    utc_date(instant) == utc_date(now)
}

pub fn is_tomorrow(instant: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    utc_date(instant) == utc_date(now) + Duration::days(1)
}

pub fn is_past(instant: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    instant < now
}

/// Signed hours from `now` to `instant`. Fractional, negative for the past.
pub fn hours_until(instant: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    (instant - now).num_seconds() as f64 / 3600.0
}

/// Signed days from `now` to `instant`. Fractional, negative for the past.
pub fn days_until(instant: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    (instant - now).num_seconds() as f64 / 86_400.0
}

pub fn is_within_days(instant: DateTime<Utc>, days: f64, now: DateTime<Utc>) -> bool {
    let away = days_until(instant, now);
    away >= 0.0 && away <= days
}

/// Parse "HH:MM" (24-hour) into minutes since midnight.
pub fn parse_time_to_minutes(time: &str) -> Option<u32> {
    let (h, m) = time.split_once(':')?;
    let h: u32 = h.trim().parse().ok()?;
    let m: u32 = m.trim().parse().ok()?;
    if h > 23 || m > 59 {
        return None;
    }
    Some(h * 60 + m)
}

pub fn format_minutes_to_time(minutes: u32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Half-open interval overlap test for `[a_start, a_end)` and `[b_start, b_end)`.
pub fn ranges_overlap(
    a_start: DateTime<Utc>,
    a_end: DateTime<Utc>,
    b_start: DateTime<Utc>,
    b_end: DateTime<Utc>,
) -> bool {
    a_start < b_end && b_start < a_end
}

/// Build a UTC instant from a calendar date and an "HH:MM" time of day.
pub fn combine_date_and_time(date: NaiveDate, time: &str) -> Option<DateTime<Utc>> {
    let minutes = parse_time_to_minutes(time)?;
    let ndt = date.and_hms_opt(minutes / 60, minutes % 60, 0)?;
    Some(Utc.from_utc_datetime(&ndt))
}

/// Parse a local wall-clock string like "2025-04-28 23:59" in an IANA tz like
/// "America/New_York", returning UTC.
pub fn local_to_utc(local: &str, tz: &str) -> Result<DateTime<Utc>> {
    let tz: Tz = tz
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid timezone: {tz}"))?;

    let ndt = NaiveDateTime::parse_from_str(local, "%Y-%m-%d %H:%M")
        .map_err(|e| anyhow::anyhow!("invalid local datetime '{local}': {e}"))?;

    let local_dt = tz
        .from_local_datetime(&ndt)
        .single()
        .ok_or_else(|| anyhow::anyhow!("ambiguous or invalid local time (DST?): {local} {tz}"))?;

    Ok(local_dt.with_timezone(&Utc))
}

/// Every calendar date in `[start, end]` whose weekday is in `weekdays`,
/// ascending. Finite and recomputable from the same inputs.
pub fn weekly_occurrences(weekdays: &[Weekday], start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let mut dates = Vec::new();
    let mut current = start;
    while current <= end {
        if weekdays.contains(&current.weekday()) {
            dates.push(current);
        }
        current += Duration::days(1);
    }
    dates
}

/// Total minutes in `[window_start, window_end)` not covered by any busy
/// interval. Intervals may be unsorted, overlapping, or nested.
///
/// Sweep with a cursor at the rightmost point consumed so far; only the gap
/// between the cursor and the next interval's start counts as free. Summing
/// interval durations instead would double-subtract overlaps.
pub fn free_minutes(
    busy: &[(DateTime<Utc>, DateTime<Utc>)],
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
) -> i64 {
    let mut sorted: Vec<_> = busy.to_vec();
    sorted.sort_by_key(|(start, _)| *start);

    let mut free_secs: i64 = 0;
    let mut cursor = window_start;

    for (start, end) in sorted {
        if start > cursor {
            free_secs += (start.min(window_end) - cursor).num_seconds().max(0);
        }
        cursor = cursor.max(end);
    }

    if cursor < window_end {
        free_secs += (window_end - cursor).num_seconds();
    }

    (free_secs / 60).max(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    #[test]
    fn test_is_today_same_utc_date() {
        let now = at(2025, 1, 15, 12, 0);
        assert!(is_today(at(2025, 1, 15, 23, 59), now));
        assert!(is_today(at(2025, 1, 15, 0, 1), now));
        assert!(!is_today(at(2025, 1, 16, 0, 1), now));
    }

    #[test]
    fn test_is_tomorrow() {
        let now = at(2025, 1, 15, 12, 0);
        assert!(is_tomorrow(at(2025, 1, 16, 12, 0), now));
        assert!(!is_tomorrow(at(2025, 1, 15, 18, 0), now));
    }

    #[test]
    fn test_hours_until_signed_fractional() {
        let now = at(2025, 1, 15, 12, 0);
        assert_eq!(hours_until(at(2025, 1, 15, 18, 0), now), 6.0);
        assert_eq!(hours_until(at(2025, 1, 15, 10, 0), now), -2.0);
        assert_eq!(hours_until(at(2025, 1, 15, 12, 30), now), 0.5);
    }

    #[test]
    fn test_days_until() {
        let now = at(2025, 1, 15, 12, 0);
        assert_eq!(days_until(at(2025, 1, 17, 12, 0), now), 2.0);
        assert_eq!(days_until(at(2025, 1, 15, 0, 0), now), -0.5);
    }

    #[test]
    fn test_is_within_days_excludes_past() {
        let now = at(2025, 1, 15, 12, 0);
        assert!(is_within_days(at(2025, 1, 16, 12, 0), 2.0, now));
        assert!(!is_within_days(at(2025, 1, 14, 12, 0), 2.0, now));
    }

    #[test]
    fn test_parse_time_to_minutes() {
        assert_eq!(parse_time_to_minutes("09:30"), Some(570));
        assert_eq!(parse_time_to_minutes("14:45"), Some(885));
        assert_eq!(parse_time_to_minutes("00:00"), Some(0));
        assert_eq!(parse_time_to_minutes("25:00"), None);
        assert_eq!(parse_time_to_minutes("nope"), None);
    }

    #[test]
    fn test_format_minutes_to_time() {
        assert_eq!(format_minutes_to_time(570), "09:30");
        assert_eq!(format_minutes_to_time(885), "14:45");
        assert_eq!(format_minutes_to_time(0), "00:00");
    }

    #[test]
    fn test_ranges_overlap() {
        let a = (at(2025, 1, 15, 10, 0), at(2025, 1, 15, 12, 0));
        assert!(ranges_overlap(a.0, a.1, at(2025, 1, 15, 11, 0), at(2025, 1, 15, 13, 0)));
        assert!(!ranges_overlap(a.0, a.1, at(2025, 1, 15, 13, 0), at(2025, 1, 15, 14, 0)));
        // Touching endpoints do not overlap (half-open).
        assert!(!ranges_overlap(a.0, a.1, at(2025, 1, 15, 12, 0), at(2025, 1, 15, 13, 0)));
    }

    #[test]
    fn test_combine_date_and_time() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        assert_eq!(combine_date_and_time(date, "09:00"), Some(at(2025, 1, 15, 9, 0)));
        assert_eq!(combine_date_and_time(date, "junk"), None);
    }

    #[test]
    fn test_local_to_utc_winter_offset() {
        // January is EST (UTC-5).
        let utc = local_to_utc("2025-01-15 23:59", "America/New_York").unwrap();
        assert_eq!(utc, at(2025, 1, 16, 4, 59));
    }

    #[test]
    fn test_local_to_utc_rejects_unknown_tz() {
        assert!(local_to_utc("2025-01-15 23:59", "Mars/Olympus").is_err());
    }

    #[test]
    fn test_weekly_occurrences_mwf() {
        let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(); // Wednesday
        let end = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
        let dates = weekly_occurrences(&[Weekday::Mon, Weekday::Wed, Weekday::Fri], start, end);
        let expected: Vec<NaiveDate> = [1, 3, 6, 8, 10]
            .iter()
            .map(|d| NaiveDate::from_ymd_opt(2025, 1, *d).unwrap())
            .collect();
        assert_eq!(dates, expected);
    }

    #[test]
    fn test_weekly_occurrences_restartable() {
        let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
        let a = weekly_occurrences(&[Weekday::Tue], start, end);
        let b = weekly_occurrences(&[Weekday::Tue], start, end);
        assert_eq!(a, b);
    }

    #[test]
    fn test_free_minutes_empty_window() {
        let free = free_minutes(&[], at(2025, 1, 15, 8, 0), at(2025, 1, 15, 17, 0));
        assert_eq!(free, 540);
    }

    #[test]
    fn test_free_minutes_one_interior_meeting() {
        let busy = vec![(at(2025, 1, 15, 10, 0), at(2025, 1, 15, 12, 0))];
        let free = free_minutes(&busy, at(2025, 1, 15, 8, 0), at(2025, 1, 15, 17, 0));
        assert_eq!(free, 420);
    }

    #[test]
    fn test_free_minutes_overlapping_intervals_do_not_double_subtract() {
        let busy = vec![
            (at(2025, 1, 15, 10, 0), at(2025, 1, 15, 12, 0)),
            (at(2025, 1, 15, 11, 0), at(2025, 1, 15, 13, 0)),
            // Nested inside the first.
            (at(2025, 1, 15, 10, 30), at(2025, 1, 15, 11, 30)),
        ];
        let free = free_minutes(&busy, at(2025, 1, 15, 8, 0), at(2025, 1, 15, 17, 0));
        // 08-10 and 13-17 are free.
        assert_eq!(free, 360);
    }

    #[test]
    fn test_free_minutes_never_exceeds_window_or_goes_negative() {
        let window = (at(2025, 1, 15, 8, 0), at(2025, 1, 15, 17, 0));
        let busy = vec![(at(2025, 1, 15, 6, 0), at(2025, 1, 15, 23, 0))];
        assert_eq!(free_minutes(&busy, window.0, window.1), 0);

        let none: Vec<(DateTime<Utc>, DateTime<Utc>)> = vec![];
        assert!(free_minutes(&none, window.0, window.1) <= 540);
    }
}
