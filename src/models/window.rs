//! Half-open aggregation windows.
//!
//! A [`TimeWindow`] covers `[start, end)` in local wall-clock time. Weeks run
//! from Sunday 00:00 to the following Sunday 00:00.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use super::punch::hours_between;

/// Returns the Sunday that starts the week containing `date`.
///
/// ```
/// use timeclock_engine::models::week_start;
/// use chrono::NaiveDate;
///
/// // 2026-01-15 is a Thursday
/// let thursday = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
/// assert_eq!(week_start(thursday), NaiveDate::from_ymd_opt(2026, 1, 11).unwrap());
///
/// // A Sunday is its own week start
/// let sunday = NaiveDate::from_ymd_opt(2026, 1, 11).unwrap();
/// assert_eq!(week_start(sunday), sunday);
/// ```
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let offset = date.weekday().num_days_from_sunday() as i64;
    date - Duration::days(offset)
}

/// A half-open interval `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeWindow {
    /// Inclusive start.
    pub start: NaiveDateTime,
    /// Exclusive end.
    pub end: NaiveDateTime,
}

impl TimeWindow {
    /// Creates a window; an `end` before `start` yields an empty window at `start`.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            start,
            end: end.max(start),
        }
    }

    /// The calendar day `date`, midnight to midnight.
    pub fn day(date: NaiveDate) -> Self {
        let start = date.and_time(NaiveTime::MIN);
        Self::new(start, start + Duration::days(1))
    }

    /// The Sunday-start week containing `date`.
    ///
    /// ```
    /// use timeclock_engine::models::TimeWindow;
    /// use chrono::NaiveDate;
    ///
    /// let week = TimeWindow::week_containing(NaiveDate::from_ymd_opt(2026, 1, 17).unwrap());
    /// assert_eq!(week.start.to_string(), "2026-01-11 00:00:00");
    /// assert_eq!(week.end.to_string(), "2026-01-18 00:00:00");
    /// ```
    pub fn week_containing(date: NaiveDate) -> Self {
        let start = week_start(date).and_time(NaiveTime::MIN);
        Self::new(start, start + Duration::days(7))
    }

    /// Length of the window in fractional hours.
    pub fn hours(&self) -> f64 {
        hours_between(self.start, self.end)
    }

    /// Splits the window at `at`, clamped into the window.
    pub fn split_at(&self, at: NaiveDateTime) -> (TimeWindow, TimeWindow) {
        let at = at.clamp(self.start, self.end);
        (
            TimeWindow::new(self.start, at),
            TimeWindow::new(at, self.end),
        )
    }

    /// Hours of `[start, end)` that fall inside this window; zero when disjoint.
    pub fn overlap_hours(&self, start: NaiveDateTime, end: NaiveDateTime) -> f64 {
        TimeWindow::new(start.max(self.start), end.min(self.end)).hours()
    }
}
