//! Week-window utilities for Monday-start calendar weeks.
//!
//! All calendar math runs at day granularity on `NaiveDate`; there is no
//! time-of-day anywhere in the core, which removes the usual off-by-one
//! hazards from residual hours and milliseconds. Functions that reason about
//! "today" take it as an explicit parameter so week-boundary behavior is
//! testable; only the binary resolves the wall clock.

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

/// A Monday-start calendar week, both ends inclusive.
///
/// `start` is the Monday, `end` the following Sunday. A log dated exactly on
/// `end` belongs to this week; one dated the next Monday does not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeekWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl WeekWindow {
    /// True when the date falls within the window, inclusive on both ends.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// Computes the week window at a signed offset from the reference date's
/// week: 0 = the reference week, negative = past, positive = future.
///
/// A Sunday reference is day 7 of the week that started the previous Monday,
/// so it shifts back 6 days rather than forward 1.
pub fn week_range(week_offset: i64, reference: NaiveDate) -> WeekWindow {
    let days_from_monday = reference.weekday().num_days_from_monday() as i64;
    let start = reference - Duration::days(days_from_monday) + Duration::days(week_offset * 7);
    WeekWindow {
        start,
        end: start + Duration::days(6),
    }
}

/// The 7 consecutive calendar dates of the week starting at `start`,
/// ascending.
pub fn week_dates(start: NaiveDate) -> Vec<NaiveDate> {
    (0..7).map(|i| start + Duration::days(i)).collect()
}

/// Dates of the week still ahead: `[max(today, start), start + 6]`
/// inclusive. Empty when the window has fully elapsed.
pub fn remaining_dates(start: NaiveDate, today: NaiveDate) -> Vec<NaiveDate> {
    let end = start + Duration::days(6);
    let from = today.max(start);
    if from > end {
        return Vec::new();
    }
    let mut dates = Vec::new();
    let mut current = from;
    while current <= end {
        dates.push(current);
        current += Duration::days(1);
    }
    dates
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    // 2024-06-05 is a Wednesday.
    const Y: i32 = 2024;

    #[test]
    fn test_week_range_midweek_reference() {
        let window = week_range(0, date(Y, 6, 5));
        assert_eq!(window.start, date(Y, 6, 3)); // Monday
        assert_eq!(window.end, date(Y, 6, 9)); // Sunday
    }

    #[test]
    fn test_week_range_monday_reference() {
        let window = week_range(0, date(Y, 6, 3));
        assert_eq!(window.start, date(Y, 6, 3));
        assert_eq!(window.end, date(Y, 6, 9));
    }

    #[test]
    fn test_week_range_sunday_belongs_to_previous_monday() {
        // 2024-06-09 is a Sunday: day 7 of the week started 2024-06-03,
        // never the first day of a week starting 2024-06-10.
        assert_eq!(date(Y, 6, 9).weekday(), Weekday::Sun);
        let window = week_range(0, date(Y, 6, 9));
        assert_eq!(window.start, date(Y, 6, 3));
        assert_eq!(window.end, date(Y, 6, 9));
    }

    #[test]
    fn test_week_range_spans_seven_days() {
        for offset in -3..=3 {
            let window = week_range(offset, date(Y, 6, 5));
            assert_eq!((window.end - window.start).num_days(), 6);
        }
    }

    #[test]
    fn test_adjacent_week_ranges_are_contiguous() {
        for offset in -3..=3i64 {
            let prev = week_range(offset - 1, date(Y, 6, 5));
            let this = week_range(offset, date(Y, 6, 5));
            assert_eq!(this.start, prev.end + Duration::days(1));
        }
    }

    #[test]
    fn test_week_range_negative_offset() {
        let window = week_range(-2, date(Y, 6, 5));
        assert_eq!(window.start, date(Y, 5, 20));
        assert_eq!(window.end, date(Y, 5, 26));
    }

    #[test]
    fn test_week_dates_seven_ascending_consecutive() {
        let dates = week_dates(date(Y, 6, 3));
        assert_eq!(dates.len(), 7);
        for pair in dates.windows(2) {
            assert_eq!((pair[1] - pair[0]).num_days(), 1);
        }
        assert_eq!(dates[0], date(Y, 6, 3));
        assert_eq!(dates[6], date(Y, 6, 9));
    }

    #[test]
    fn test_remaining_dates_midweek() {
        let dates = remaining_dates(date(Y, 6, 3), date(Y, 6, 6));
        assert_eq!(dates, vec![date(Y, 6, 6), date(Y, 6, 7), date(Y, 6, 8), date(Y, 6, 9)]);
    }

    #[test]
    fn test_remaining_dates_before_week_starts() {
        // Future week: all 7 days remain.
        let dates = remaining_dates(date(Y, 6, 10), date(Y, 6, 6));
        assert_eq!(dates.len(), 7);
        assert_eq!(dates[0], date(Y, 6, 10));
    }

    #[test]
    fn test_remaining_dates_elapsed_week() {
        let dates = remaining_dates(date(Y, 5, 20), date(Y, 6, 6));
        assert!(dates.is_empty());
    }

    #[test]
    fn test_window_boundary_membership() {
        let window = week_range(0, date(Y, 6, 5));
        assert!(window.contains(date(Y, 6, 9))); // Sunday: in
        assert!(window.contains(date(Y, 6, 3))); // Monday: in
        assert!(!window.contains(date(Y, 6, 10))); // next Monday: out
        assert!(!window.contains(date(Y, 6, 2))); // previous Sunday: out
    }
}
