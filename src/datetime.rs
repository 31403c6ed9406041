//! Calendar and wall-clock time helpers.
//!
//! Pure functions for month-grid generation, month navigation and `HH:MM`
//! handling, plus the `TimeRange` triangle that keeps start, end and
//! duration mutually consistent while a task is being edited.
//!
//! All time arithmetic concerns time-of-day only: values wrap modulo 24
//! hours, and dates never enter into it.

use chrono::{Datelike, Duration, Local, NaiveDate, NaiveTime};

/// One cell of the month calendar.
///
/// `in_month` distinguishes padding days borrowed from the adjacent months;
/// it affects styling only, never filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCell {
    pub date: NaiveDate,
    pub in_month: bool,
}

/// First day of the month containing `date`.
pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date)
}

/// Last day of the month containing `date`.
pub fn last_of_month(date: NaiveDate) -> NaiveDate {
    let (y, m) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(y, m, 1)
        .map(|first_of_next| first_of_next - Duration::days(1))
        .unwrap_or(date)
}

/// First day of the month after the one containing `date`.
pub fn next_month(date: NaiveDate) -> NaiveDate {
    last_of_month(date) + Duration::days(1)
}

/// First day of the month before the one containing `date`.
pub fn prev_month(date: NaiveDate) -> NaiveDate {
    first_of_month(first_of_month(date) - Duration::days(1))
}

/// Build the padded calendar for the month containing `month`.
///
/// The sequence runs from the Sunday on or before the 1st to the Saturday on
/// or after the last day, so its length is always a whole number of 7-day
/// weeks and every day of the target month appears tagged `in_month`.
pub fn month_grid(month: NaiveDate) -> Vec<GridCell> {
    let first = first_of_month(month);
    let last = last_of_month(month);

    let lead = first.weekday().num_days_from_sunday() as i64;
    let trail = 6 - last.weekday().num_days_from_sunday() as i64;
    let start = first - Duration::days(lead);
    let end = last + Duration::days(trail);

    let mut cells = Vec::new();
    let mut day = start;
    while day <= end {
        cells.push(GridCell {
            date: day,
            in_month: same_month(day, first),
        });
        day += Duration::days(1);
    }
    cells
}

/// Whether two dates fall in the same calendar month.
pub fn same_month(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

/// Whether `date` is today's local calendar date.
pub fn is_today(date: NaiveDate) -> bool {
    date == Local::now().date_naive()
}

/// Parse a strict 24-hour `HH:MM` string. Returns `None` for anything else;
/// callers keep their previous valid value on `None`.
pub fn parse_hhmm(s: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(s.trim(), "%H:%M").ok()
}

/// Render a time as zero-padded `HH:MM`.
pub fn format_hhmm(t: NaiveTime) -> String {
    t.format("%H:%M").to_string()
}

/// End time reached `minutes` after `start`, wrapping past midnight.
pub fn end_from_duration(start: NaiveTime, minutes: i64) -> NaiveTime {
    start + Duration::minutes(minutes.max(0))
}

/// Minutes from `start` to `end` on the same reference day, clamped to zero
/// when `end` precedes `start`.
pub fn duration_between(start: NaiveTime, end: NaiveTime) -> i64 {
    (end - start).num_minutes().max(0)
}

/// A start/end/duration triple kept internally consistent.
///
/// Editing any one field recomputes exactly one of the other two:
/// start keeps the duration and moves the end; end recomputes the duration;
/// duration moves the end. Malformed input leaves the whole triple untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub duration_min: i64,
}

impl Default for TimeRange {
    /// The form's initial 09:00–10:00 hour.
    fn default() -> Self {
        let start = NaiveTime::from_hms_opt(9, 0, 0).unwrap_or_default();
        TimeRange {
            start,
            end: end_from_duration(start, 60),
            duration_min: 60,
        }
    }
}

impl TimeRange {
    /// Replace the start time from raw input, carrying the duration forward.
    /// Returns false (state unchanged) on malformed input.
    pub fn set_start(&mut self, input: &str) -> bool {
        match parse_hhmm(input) {
            Some(start) => {
                self.start = start;
                self.end = end_from_duration(start, self.duration_min);
                true
            }
            None => false,
        }
    }

    /// Replace the end time from raw input, recomputing the duration
    /// (clamped to zero). Returns false on malformed input.
    pub fn set_end(&mut self, input: &str) -> bool {
        match parse_hhmm(input) {
            Some(end) => {
                self.end = end;
                self.duration_min = duration_between(self.start, end);
                true
            }
            None => false,
        }
    }

    /// Replace the duration in minutes, moving the end time to match.
    pub fn set_duration(&mut self, minutes: i64) {
        self.duration_min = minutes.max(0);
        self.end = end_from_duration(self.start, self.duration_min);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn grid_is_whole_weeks_sunday_to_saturday() {
        for month in [d(2026, 8, 1), d(2026, 2, 14), d(2024, 2, 10), d(2026, 12, 31)] {
            let cells = month_grid(month);
            assert_eq!(cells.len() % 7, 0, "month {month}");
            assert_eq!(cells.first().unwrap().date.weekday(), Weekday::Sun);
            assert_eq!(cells.last().unwrap().date.weekday(), Weekday::Sat);
        }
    }

    #[test]
    fn grid_covers_the_whole_month_in_order() {
        let cells = month_grid(d(2026, 8, 15));
        let in_month: Vec<NaiveDate> = cells
            .iter()
            .filter(|c| c.in_month)
            .map(|c| c.date)
            .collect();
        assert_eq!(in_month.len(), 31);
        assert_eq!(in_month[0], d(2026, 8, 1));
        assert_eq!(*in_month.last().unwrap(), d(2026, 8, 31));
        // Consecutive dates throughout the padded range.
        for pair in cells.windows(2) {
            assert_eq!(pair[1].date - pair[0].date, Duration::days(1));
        }
    }

    #[test]
    fn grid_handles_month_starting_on_sunday() {
        // February 2026 runs Sunday the 1st to Saturday the 28th, so the
        // grid needs no padding at all.
        let cells = month_grid(d(2026, 2, 1));
        assert_eq!(cells.first().unwrap().date, d(2026, 2, 1));
        assert!(cells.first().unwrap().in_month);
        assert_eq!(cells.len(), 28);
    }

    #[test]
    fn month_navigation_wraps_the_year() {
        assert_eq!(next_month(d(2026, 12, 25)), d(2027, 1, 1));
        assert_eq!(prev_month(d(2026, 1, 5)), d(2025, 12, 1));
        assert_eq!(first_of_month(d(2026, 8, 29)), d(2026, 8, 1));
        assert_eq!(last_of_month(d(2024, 2, 2)), d(2024, 2, 29));
    }

    #[test]
    fn same_month_compares_year_and_month_only() {
        assert!(same_month(d(2026, 8, 1), d(2026, 8, 31)));
        assert!(!same_month(d(2026, 8, 1), d(2026, 9, 1)));
        assert!(!same_month(d(2025, 8, 1), d(2026, 8, 1)));
    }

    #[test]
    fn hhmm_parsing_is_strict() {
        assert_eq!(parse_hhmm("09:30"), NaiveTime::from_hms_opt(9, 30, 0));
        assert_eq!(parse_hhmm(" 23:59 "), NaiveTime::from_hms_opt(23, 59, 0));
        assert_eq!(parse_hhmm("24:00"), None);
        assert_eq!(parse_hhmm("12:60"), None);
        assert_eq!(parse_hhmm("noon"), None);
        assert_eq!(parse_hhmm(""), None);
    }

    #[test]
    fn reconciliation_round_trip() {
        let mut range = TimeRange::default();
        assert!(range.set_start("09:00"));
        range.set_duration(60);
        assert_eq!(format_hhmm(range.end), "10:00");

        assert!(range.set_end("09:30"));
        assert_eq!(range.duration_min, 30);

        range.set_duration(90);
        assert_eq!(format_hhmm(range.end), "11:00");
    }

    #[test]
    fn end_before_start_clamps_duration_to_zero() {
        let mut range = TimeRange::default();
        assert!(range.set_start("10:00"));
        assert!(range.set_end("09:00"));
        assert_eq!(range.duration_min, 0);
    }

    #[test]
    fn malformed_input_retains_previous_values() {
        let mut range = TimeRange::default();
        range.set_start("08:15");
        range.set_duration(45);
        let before = range;
        assert!(!range.set_start("8:xx"));
        assert!(!range.set_end("later"));
        assert_eq!(range, before);
    }

    #[test]
    fn duration_wraps_past_midnight_on_the_clock_face() {
        let start = NaiveTime::from_hms_opt(23, 30, 0).unwrap();
        assert_eq!(format_hhmm(end_from_duration(start, 45)), "00:15");
    }
}
