//! Work and break hour aggregation.
//!
//! Hours are computed for a half-open [`TimeWindow`] by clamping every
//! intersecting punch to the window. Open punches run until the caller's
//! `now`. Results keep full `f64` precision; rounding belongs to presentation.

use chrono::NaiveDateTime;

use crate::models::{BreakTotals, Punch, PunchKind, TimeWindow, WorkTotals};

use super::consistency::check_punches;

/// Hours of `punch` inside `window`, treating an open punch as ending at `now`.
///
/// # Example
///
/// ```
/// use timeclock_engine::calculation::punch_hours_in_window;
/// use timeclock_engine::models::{Punch, PunchKind, TimeWindow};
/// use chrono::{NaiveDate, NaiveDateTime};
/// use uuid::Uuid;
///
/// let at = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap();
/// let overnight = Punch {
///     id: Uuid::new_v4(),
///     employee_id: "emp_001".to_string(),
///     start_time: at("2026-01-14 22:00:00"),
///     end_time: Some(at("2026-01-15 06:00:00")),
///     kind: PunchKind::Work,
/// };
/// let thursday = TimeWindow::day(NaiveDate::from_ymd_opt(2026, 1, 15).unwrap());
///
/// assert_eq!(punch_hours_in_window(&overnight, &thursday, at("2026-01-15 12:00:00")), 6.0);
/// ```
pub fn punch_hours_in_window(punch: &Punch, window: &TimeWindow, now: NaiveDateTime) -> f64 {
    let end = punch.end_time.unwrap_or(now);
    window.overlap_hours(punch.start_time, end)
}

// An open punch keeps accruing inside the window until `now` passes its end.
fn accrues_live(punch: &Punch, window: &TimeWindow, now: NaiveDateTime) -> bool {
    punch.is_open() && punch.start_time < window.end && now < window.end
}

/// Sums work-only hours of one employee over `window`.
///
/// Break punches are excluded entirely. The result flags whether an open work
/// punch made the total depend on `now`, and carries any consistency warnings
/// found in the supplied punches.
///
/// # Example
///
/// ```
/// use timeclock_engine::calculation::calculate_work_hours;
/// use timeclock_engine::models::{Punch, PunchKind, TimeWindow};
/// use chrono::{NaiveDate, NaiveDateTime};
/// use uuid::Uuid;
///
/// let at = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap();
/// let punch = |start: &str, end: Option<&str>, kind| Punch {
///     id: Uuid::new_v4(),
///     employee_id: "emp_001".to_string(),
///     start_time: at(start),
///     end_time: end.map(at),
///     kind,
/// };
/// let punches = vec![
///     punch("2026-01-15 07:00:00", Some("2026-01-15 12:00:00"), PunchKind::Work),
///     punch("2026-01-15 12:00:00", Some("2026-01-15 13:00:00"), PunchKind::MealBreak),
///     punch("2026-01-15 13:00:00", None, PunchKind::Work),
/// ];
/// let day = TimeWindow::day(NaiveDate::from_ymd_opt(2026, 1, 15).unwrap());
///
/// let totals = calculate_work_hours(&punches, "emp_001", day, at("2026-01-15 14:30:00"));
/// assert_eq!(totals.work_hours, 6.5);
/// assert!(totals.includes_open_punch);
/// ```
pub fn calculate_work_hours(
    punches: &[Punch],
    employee_id: &str,
    window: TimeWindow,
    now: NaiveDateTime,
) -> WorkTotals {
    let mut work_hours = 0.0;
    let mut includes_open_punch = false;

    for punch in punches
        .iter()
        .filter(|p| p.employee_id == employee_id && p.kind == PunchKind::Work)
    {
        work_hours += punch_hours_in_window(punch, &window, now);
        includes_open_punch |= accrues_live(punch, &window, now);
    }

    WorkTotals {
        window,
        work_hours,
        includes_open_punch,
        warnings: check_punches(employee_id, punches),
    }
}

/// Sums break hours of one employee over `window`, split by kind.
pub fn calculate_break_hours(
    punches: &[Punch],
    employee_id: &str,
    window: TimeWindow,
    now: NaiveDateTime,
) -> BreakTotals {
    let mut totals = BreakTotals {
        window,
        meal_hours: 0.0,
        rest_hours: 0.0,
        includes_open_punch: false,
    };

    for punch in punches
        .iter()
        .filter(|p| p.employee_id == employee_id && p.kind.is_break())
    {
        let hours = punch_hours_in_window(punch, &window, now);
        match punch.kind {
            PunchKind::MealBreak => totals.meal_hours += hours,
            PunchKind::RestBreak => totals.rest_hours += hours,
            PunchKind::Work => {}
        }
        totals.includes_open_punch |= accrues_live(punch, &window, now);
    }

    totals
}
