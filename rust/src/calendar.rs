//! Working-day arithmetic. Saturday and Sunday are the only non-working days.

use chrono::{Datelike, NaiveDate, Weekday};

#[inline]
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Count the Saturdays and Sundays among `days` consecutive days starting at `start`.
///
/// `days <= 0` yields 0.
pub fn count_weekend_days(start: NaiveDate, days: i64) -> i64 {
    if days <= 0 {
        return 0;
    }

    // Every run of seven consecutive days holds exactly one weekend, and the
    // tail starts on the same weekday as `start`. No date arithmetic, so any
    // day count is safe.
    let full_weeks = days / 7;
    let remainder = days % 7;
    let first = i64::from(start.weekday().num_days_from_monday());

    let tail_weekend_days = (0..remainder)
        .filter(|offset| (first + offset) % 7 >= 5)
        .count() as i64;
    full_weeks * 2 + tail_weekend_days
}

/// Count working days in the inclusive range `[start, end]`.
///
/// An end before the start is an empty range.
pub fn working_days_between(start: NaiveDate, end: NaiveDate) -> i64 {
    if end < start {
        return 0;
    }
    let span = (end - start).num_days() + 1;
    span - count_weekend_days(start, span)
}

/// Stretch a nominal duration starting at `start` until it also covers every
/// weekend day inside its own span.
///
/// Iterates `extra = count_weekend_days(start, nominal + extra)` to a fixed
/// point. The sequence never decreases and is bounded by the span, so it
/// terminates. The span saturates at `i64::MAX`.
pub fn expand_duration(start: NaiveDate, nominal: i64) -> i64 {
    let nominal = nominal.max(0);
    let mut extra = 0;
    loop {
        let next = count_weekend_days(start, nominal.saturating_add(extra));
        if next == extra {
            return nominal.saturating_add(extra);
        }
        extra = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn monday() -> NaiveDate {
        date(2025, 11, 10)
    }

    #[test]
    fn test_is_weekend() {
        assert!(!is_weekend(monday()));
        assert!(is_weekend(date(2025, 11, 15)));
        assert!(is_weekend(date(2025, 11, 16)));
    }

    #[test]
    fn test_count_weekend_days() {
        assert_eq!(count_weekend_days(monday(), 5), 0);
        assert_eq!(count_weekend_days(monday(), 6), 1);
        assert_eq!(count_weekend_days(monday(), 7), 2);
        assert_eq!(count_weekend_days(monday(), 14), 4);
        // Saturday start: Sat, Sun, Mon
        assert_eq!(count_weekend_days(date(2025, 11, 15), 3), 2);
        // Sunday start, 8 days: Sun .. next Sun
        assert_eq!(count_weekend_days(date(2025, 11, 16), 8), 3);
    }

    #[test]
    fn test_count_weekend_days_non_positive() {
        assert_eq!(count_weekend_days(monday(), 0), 0);
        assert_eq!(count_weekend_days(date(2025, 11, 15), -4), 0);
    }

    #[test]
    fn test_count_matches_day_by_day() {
        let start = date(2025, 12, 24);
        for days in 0..40 {
            let expected = (0..days)
                .filter(|&offset| is_weekend(start + Duration::days(offset)))
                .count() as i64;
            assert_eq!(count_weekend_days(start, days), expected, "days={}", days);
        }
    }

    #[test]
    fn test_working_days_between() {
        let friday = date(2025, 11, 14);
        let sunday = date(2025, 11, 16);
        assert_eq!(working_days_between(monday(), friday), 5);
        assert_eq!(working_days_between(monday(), sunday), 5);
        assert_eq!(working_days_between(monday(), monday()), 1);
        assert_eq!(working_days_between(sunday, sunday), 0);
        assert_eq!(working_days_between(friday, monday()), 0);
        // Two full weeks, Monday to Friday.
        assert_eq!(working_days_between(monday(), date(2025, 11, 21)), 10);
    }

    #[test]
    fn test_expand_duration() {
        // Monday start: no weekend inside five days.
        assert_eq!(expand_duration(monday(), 5), 5);
        // Friday start: Fri + Sat + Sun + Mon..Thu.
        assert_eq!(expand_duration(date(2025, 11, 14), 5), 7);
        // Saturday start: Sat, Sun, Mon.
        assert_eq!(expand_duration(date(2025, 11, 15), 1), 3);
        // Wednesday start, ten days: two weekends.
        assert_eq!(expand_duration(date(2025, 11, 19), 10), 14);
        assert_eq!(expand_duration(monday(), 0), 0);
        assert_eq!(expand_duration(monday(), -2), 0);
    }

    #[test]
    fn test_huge_spans_do_not_overflow() {
        let last = NaiveDate::MAX;
        assert_eq!(count_weekend_days(last, 7 * 1_000_000), 2_000_000);
        assert!(count_weekend_days(monday(), i64::MAX) > 0);
        assert_eq!(expand_duration(monday(), i64::MAX), i64::MAX);
        assert!(expand_duration(last, 3) >= 3);
    }

    #[test]
    fn test_expansion_is_a_fixed_point() {
        let start = date(2025, 11, 14);
        for nominal in 0..30 {
            let actual = expand_duration(start, nominal);
            assert_eq!(nominal + count_weekend_days(start, actual), actual);
        }
    }
}
