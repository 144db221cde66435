//! Punch model and related types.
//!
//! This module defines the [`Punch`] record, the atomic unit of time tracking,
//! together with the activity kinds a punch can carry.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const SECONDS_PER_HOUR: f64 = 3600.0;

/// The activity a punch records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PunchKind {
    /// Paid work time.
    Work,
    /// Unpaid meal break.
    MealBreak,
    /// Rest break.
    RestBreak,
}

impl PunchKind {
    /// Returns true for the break kinds.
    pub fn is_break(self) -> bool {
        !matches!(self, PunchKind::Work)
    }

    /// The label used for this kind in exports and listings.
    pub fn label(self) -> &'static str {
        match self {
            PunchKind::Work => "Work",
            PunchKind::MealBreak => "Meal Break",
            PunchKind::RestBreak => "Rest Break",
        }
    }
}

impl fmt::Display for PunchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A named break an employee can start while working.
///
/// Serialized as `meal` and `rest`.
///
/// ```
/// use timeclock_engine::models::{BreakKind, PunchKind};
///
/// let kind: BreakKind = serde_json::from_str("\"meal\"").unwrap();
/// assert_eq!(kind, BreakKind::Meal);
/// assert_eq!(PunchKind::from(kind), PunchKind::MealBreak);
/// assert!(serde_json::from_str::<BreakKind>("\"lunch\"").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreakKind {
    /// Meal break.
    Meal,
    /// Rest break.
    Rest,
}

impl BreakKind {
    /// The configuration label of this break kind.
    pub fn as_str(self) -> &'static str {
        match self {
            BreakKind::Meal => "meal",
            BreakKind::Rest => "rest",
        }
    }
}

impl From<BreakKind> for PunchKind {
    fn from(kind: BreakKind) -> Self {
        match kind {
            BreakKind::Meal => PunchKind::MealBreak,
            BreakKind::Rest => PunchKind::RestBreak,
        }
    }
}

impl fmt::Display for BreakKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A contiguous interval of one activity for one employee.
///
/// Times are local wall-clock instants. A punch without `end_time` is open.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Punch {
    /// Identifier assigned by the store.
    pub id: Uuid,
    /// The owning employee.
    pub employee_id: String,
    /// When the punch began.
    pub start_time: NaiveDateTime,
    /// When the punch ended; `None` while open.
    #[serde(default)]
    pub end_time: Option<NaiveDateTime>,
    /// The activity recorded.
    pub kind: PunchKind,
}

impl Punch {
    /// Returns true while the punch has no end time.
    pub fn is_open(&self) -> bool {
        self.end_time.is_none()
    }

    /// Duration in fractional hours, or `None` while the punch is in progress.
    ///
    /// # Examples
    ///
    /// ```
    /// use timeclock_engine::models::{Punch, PunchKind};
    /// use chrono::NaiveDateTime;
    /// use uuid::Uuid;
    ///
    /// let punch = Punch {
    ///     id: Uuid::new_v4(),
    ///     employee_id: "emp_001".to_string(),
    ///     start_time: NaiveDateTime::parse_from_str("2026-01-15 07:00:00", "%Y-%m-%d %H:%M:%S").unwrap(),
    ///     end_time: Some(NaiveDateTime::parse_from_str("2026-01-15 12:30:00", "%Y-%m-%d %H:%M:%S").unwrap()),
    ///     kind: PunchKind::Work,
    /// };
    /// assert_eq!(punch.duration_hours(), Some(5.5));
    /// ```
    pub fn duration_hours(&self) -> Option<f64> {
        self.end_time.map(|end| hours_between(self.start_time, end))
    }
}

/// The payload for inserting a new, open punch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPunch {
    /// The owning employee.
    pub employee_id: String,
    /// When the punch begins.
    pub start_time: NaiveDateTime,
    /// The activity recorded.
    pub kind: PunchKind,
}

/// Signed difference `end - start` in fractional hours, at millisecond precision.
pub fn hours_between(start: NaiveDateTime, end: NaiveDateTime) -> f64 {
    (end - start).num_milliseconds() as f64 / 1000.0 / SECONDS_PER_HOUR
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_datetime(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn make_punch(start: &str, end: Option<&str>, kind: PunchKind) -> Punch {
        Punch {
            id: Uuid::new_v4(),
            employee_id: "emp_001".to_string(),
            start_time: make_datetime(start),
            end_time: end.map(make_datetime),
            kind,
        }
    }

    #[test]
    fn test_closed_punch_duration() {
        let punch = make_punch(
            "2026-01-15 07:00:00",
            Some("2026-01-15 12:00:00"),
            PunchKind::Work,
        );
        assert!(!punch.is_open());
        assert_eq!(punch.duration_hours(), Some(5.0));
    }

    #[test]
    fn test_open_punch_has_no_duration() {
        let punch = make_punch("2026-01-15 07:00:00", None, PunchKind::Work);
        assert!(punch.is_open());
        assert_eq!(punch.duration_hours(), None);
    }

    #[test]
    fn test_overnight_punch_duration() {
        let punch = make_punch(
            "2026-01-15 22:00:00",
            Some("2026-01-16 06:00:00"),
            PunchKind::Work,
        );
        assert_eq!(punch.duration_hours(), Some(8.0));
    }

    #[test]
    fn test_hours_between_keeps_fractions() {
        let start = make_datetime("2026-01-15 07:00:00");
        let end = make_datetime("2026-01-15 07:20:00");
        let hours = hours_between(start, end);
        assert!((hours - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_kind_labels() {
        assert_eq!(PunchKind::Work.label(), "Work");
        assert_eq!(PunchKind::MealBreak.label(), "Meal Break");
        assert_eq!(PunchKind::RestBreak.label(), "Rest Break");
        assert!(!PunchKind::Work.is_break());
        assert!(PunchKind::RestBreak.is_break());
    }

    #[test]
    fn test_kind_serialization() {
        assert_eq!(
            serde_json::to_string(&PunchKind::MealBreak).unwrap(),
            "\"meal_break\""
        );
        assert_eq!(serde_json::to_string(&BreakKind::Rest).unwrap(), "\"rest\"");
    }

    #[test]
    fn test_punch_deserialization_without_end_time() {
        let json = r#"{
            "id": "7f1c0c8e-5a55-4a8a-9d5e-7d0f8c1f2a10",
            "employee_id": "emp_001",
            "start_time": "2026-01-15T07:00:00",
            "kind": "work"
        }"#;

        let punch: Punch = serde_json::from_str(json).unwrap();
        assert!(punch.is_open());
        assert_eq!(punch.kind, PunchKind::Work);
    }
}
