//! Schedule progress estimation.
//!
//! Compares hours actually worked with the hours a fixed weekly schedule
//! expects by a given instant. The estimate is advisory and never blocks a
//! punch transition.

use chrono::{Datelike, NaiveDateTime};

use crate::config::ScheduleConfig;
use crate::models::{ProgressReport, WorkTotals, hours_between, week_start};

/// Hours the schedule expects to have been worked on `now`'s day by `now`.
///
/// Zero before the start of day, a linear ramp across the morning, flat over
/// lunch, a second ramp across the afternoon and the full daily total after
/// the end of day. Non-workdays expect nothing.
///
/// # Example
///
/// ```
/// use timeclock_engine::calculation::expected_hours_today;
/// use timeclock_engine::config::ScheduleConfig;
/// use chrono::NaiveDateTime;
///
/// let schedule = ScheduleConfig::default();
/// let at = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap();
///
/// // Thursday, default 07:00-16:00 schedule with lunch 12:00-13:00
/// assert_eq!(expected_hours_today(&schedule, at("2026-01-15 06:30:00")), 0.0);
/// assert_eq!(expected_hours_today(&schedule, at("2026-01-15 09:30:00")), 2.5);
/// assert_eq!(expected_hours_today(&schedule, at("2026-01-15 12:45:00")), 5.0);
/// assert_eq!(expected_hours_today(&schedule, at("2026-01-15 14:00:00")), 6.0);
/// assert_eq!(expected_hours_today(&schedule, at("2026-01-15 20:00:00")), 8.0);
/// ```
pub fn expected_hours_today(schedule: &ScheduleConfig, now: NaiveDateTime) -> f64 {
    if !schedule.is_workday(now.weekday()) {
        return 0.0;
    }

    let date = now.date();
    let time = now.time();

    if time < schedule.start {
        0.0
    } else if time < schedule.lunch_start {
        hours_between(date.and_time(schedule.start), now)
    } else if time < schedule.lunch_end {
        schedule.morning_hours()
    } else if time < schedule.end {
        schedule.morning_hours() + hours_between(date.and_time(schedule.lunch_end), now)
    } else {
        schedule.daily_hours()
    }
}

/// Hours the schedule expects by `now` in the Sunday-start week containing it.
///
/// Every workday strictly before today contributes its full daily total;
/// today contributes [`expected_hours_today`].
pub fn expected_hours_this_week(schedule: &ScheduleConfig, now: NaiveDateTime) -> f64 {
    let today = now.date();
    let full_days: f64 = week_start(today)
        .iter_days()
        .take_while(|day| *day < today)
        .filter(|day| schedule.is_workday(day.weekday()))
        .map(|_| schedule.daily_hours())
        .sum();

    full_days + expected_hours_today(schedule, now)
}

/// Builds a [`ProgressReport`] from today's and this week's work totals.
///
/// Positive deltas mean the employee is ahead of schedule.
pub fn calculate_progress(
    today: &WorkTotals,
    week: &WorkTotals,
    schedule: &ScheduleConfig,
    now: NaiveDateTime,
) -> ProgressReport {
    let expected_today = expected_hours_today(schedule, now);
    let expected_week = expected_hours_this_week(schedule, now);

    ProgressReport {
        actual_today: today.work_hours,
        expected_today,
        delta_today: today.work_hours - expected_today,
        actual_week: week.work_hours,
        expected_week,
        delta_week: week.work_hours - expected_week,
        includes_open_punch: today.includes_open_punch || week.includes_open_punch,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TimeWindow;
    use chrono::{NaiveDate, NaiveTime, Weekday};

    fn make_datetime(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn make_totals(window: TimeWindow, work_hours: f64, open: bool) -> WorkTotals {
        WorkTotals {
            window,
            work_hours,
            includes_open_punch: open,
            warnings: vec![],
        }
    }

    /// PRG-001: morning ramp
    #[test]
    fn test_morning_ramp() {
        let schedule = ScheduleConfig::default();
        assert_eq!(
            expected_hours_today(&schedule, make_datetime("2026-01-15 07:00:00")),
            0.0
        );
        assert_eq!(
            expected_hours_today(&schedule, make_datetime("2026-01-15 08:15:00")),
            1.25
        );
        let almost_lunch = expected_hours_today(&schedule, make_datetime("2026-01-15 11:59:00"));
        assert!((almost_lunch - (5.0 - 1.0 / 60.0)).abs() < 1e-9);
    }

    /// PRG-002: flat across lunch
    #[test]
    fn test_lunch_is_flat() {
        let schedule = ScheduleConfig::default();
        for time in ["12:00:00", "12:30:00", "12:59:59"] {
            let now = make_datetime(&format!("2026-01-15 {}", time));
            assert_eq!(expected_hours_today(&schedule, now), 5.0, "{}", time);
        }
    }

    /// PRG-003: afternoon ramp and end of day
    #[test]
    fn test_afternoon_ramp_and_end_of_day() {
        let schedule = ScheduleConfig::default();
        assert_eq!(
            expected_hours_today(&schedule, make_datetime("2026-01-15 13:00:00")),
            5.0
        );
        assert_eq!(
            expected_hours_today(&schedule, make_datetime("2026-01-15 15:30:00")),
            7.5
        );
        assert_eq!(
            expected_hours_today(&schedule, make_datetime("2026-01-15 16:00:00")),
            8.0
        );
        assert_eq!(
            expected_hours_today(&schedule, make_datetime("2026-01-15 23:59:59")),
            8.0
        );
    }

    #[test]
    fn test_weekend_expects_nothing() {
        let schedule = ScheduleConfig::default();
        // 2026-01-17 is a Saturday, 2026-01-18 a Sunday
        assert_eq!(
            expected_hours_today(&schedule, make_datetime("2026-01-17 10:00:00")),
            0.0
        );
        assert_eq!(
            expected_hours_this_week(&schedule, make_datetime("2026-01-18 10:00:00")),
            0.0
        );
    }

    /// PRG-004: Thursday 09:30 -> Mon..Wed full plus 2.5
    #[test]
    fn test_week_expected_midweek() {
        let schedule = ScheduleConfig::default();
        assert_eq!(
            expected_hours_this_week(&schedule, make_datetime("2026-01-15 09:30:00")),
            24.0 + 2.5
        );
    }

    #[test]
    fn test_week_expected_saturday_is_full_week() {
        let schedule = ScheduleConfig::default();
        assert_eq!(
            expected_hours_this_week(&schedule, make_datetime("2026-01-17 08:00:00")),
            40.0
        );
    }

    #[test]
    fn test_custom_workdays() {
        let schedule = ScheduleConfig {
            workdays: vec![Weekday::Sun, Weekday::Wed],
            start: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
            lunch_start: NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
            lunch_end: NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
        };
        // Thursday: Sunday and Wednesday already complete
        assert_eq!(
            expected_hours_this_week(&schedule, make_datetime("2026-01-15 10:00:00")),
            16.0
        );
        // Wednesday 10:00: Sunday full plus one hour
        assert_eq!(
            expected_hours_this_week(&schedule, make_datetime("2026-01-14 10:00:00")),
            9.0
        );
    }

    #[test]
    fn test_progress_deltas() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
        let today = make_totals(TimeWindow::day(date), 3.0, true);
        let week = make_totals(TimeWindow::week_containing(date), 30.0, true);

        let report = calculate_progress(
            &today,
            &week,
            &ScheduleConfig::default(),
            make_datetime("2026-01-15 09:30:00"),
        );

        assert_eq!(report.expected_today, 2.5);
        assert_eq!(report.delta_today, 0.5);
        assert_eq!(report.expected_week, 26.5);
        assert_eq!(report.delta_week, 3.5);
        assert!(report.includes_open_punch);
    }
}
