//! Property tests for the punch state machine and hours aggregation.

use std::sync::Arc;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use proptest::prelude::*;
use rust_decimal::Decimal;

use timeclock_engine::calculation::{calculate_weekly_pay, split_overtime};
use timeclock_engine::config::{EngineConfig, PayrollConfig};
use timeclock_engine::engine::TimeClock;
use timeclock_engine::models::{BreakKind, Employee, PunchStatus, TimeWindow, Transition};
use timeclock_engine::store::{InMemoryPunchStore, PunchStore};

const EMPLOYEE: &str = "emp_001";

fn monday_morning() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 1, 12)
        .unwrap()
        .and_hms_opt(6, 0, 0)
        .unwrap()
}

fn arb_transition() -> impl Strategy<Value = Transition> {
    prop_oneof![
        Just(Transition::ClockIn),
        Just(Transition::StartBreak {
            kind: BreakKind::Meal
        }),
        Just(Transition::StartBreak {
            kind: BreakKind::Rest
        }),
        Just(Transition::EndBreak),
        Just(Transition::ClockOut),
    ]
}

/// Transitions with the minutes elapsed before each one.
///
/// At most 40 steps of up to three hours keeps every punch inside the week
/// of 2026-01-11.
fn arb_session() -> impl Strategy<Value = Vec<(Transition, i64)>> {
    prop::collection::vec((arb_transition(), 0i64..180), 1..40)
}

/// Replays a session, ignoring rejected transitions, and returns the final instant.
fn replay(clock: &TimeClock, session: &[(Transition, i64)]) -> NaiveDateTime {
    let mut now = monday_morning();
    for (transition, minutes) in session {
        now += Duration::minutes(*minutes);
        let _ = clock.apply(EMPLOYEE, *transition, now);
    }
    now
}

proptest! {
    #[test]
    fn prop_at_most_one_open_punch(session in arb_session()) {
        let store = Arc::new(InMemoryPunchStore::new());
        let clock = TimeClock::new(store.clone(), EngineConfig::default());

        let mut now = monday_morning();
        for (transition, minutes) in &session {
            now += Duration::minutes(*minutes);
            let before = clock.status(EMPLOYEE).unwrap().status;
            let result = clock.apply(EMPLOYEE, *transition, now);

            let open = store.open_punches(EMPLOYEE).unwrap();
            prop_assert!(open.len() <= 1);

            let after = clock.status(EMPLOYEE).unwrap();
            prop_assert!(after.warnings.is_empty());
            match result {
                Ok(report) => {
                    prop_assert_eq!(report.previous, before);
                    prop_assert_eq!(report.current, after.status);
                }
                Err(_) => prop_assert_eq!(after.status, before),
            }
        }
    }

    #[test]
    fn prop_clocked_out_means_nothing_open(session in arb_session()) {
        let store = Arc::new(InMemoryPunchStore::new());
        let clock = TimeClock::new(store.clone(), EngineConfig::default());
        let now = replay(&clock, &session);

        let _ = clock.clock_out(EMPLOYEE, now);
        prop_assert_eq!(clock.status(EMPLOYEE).unwrap().status, PunchStatus::ClockedOut);
        prop_assert!(store.open_punches(EMPLOYEE).unwrap().is_empty());
    }

    #[test]
    fn prop_totals_account_for_every_punch(session in arb_session(), extra in 0i64..120) {
        let store = Arc::new(InMemoryPunchStore::new());
        let clock = TimeClock::new(store.clone(), EngineConfig::default());
        let now = replay(&clock, &session) + Duration::minutes(extra);

        let week = TimeWindow::week_containing(monday_morning().date());
        let work = clock.work_hours(EMPLOYEE, week, now).unwrap();
        let breaks = clock.break_hours(EMPLOYEE, week, now).unwrap();

        let elapsed: f64 = store
            .list_punches(Some(EMPLOYEE), None)
            .unwrap()
            .iter()
            .map(|p| week.overlap_hours(p.start_time, p.end_time.unwrap_or(now)))
            .sum();

        prop_assert!((work.work_hours + breaks.total_hours() - elapsed).abs() < 1e-9);
        prop_assert!(work.work_hours >= 0.0);
    }

    #[test]
    fn prop_days_add_up_to_week(session in arb_session()) {
        let clock = TimeClock::new(Arc::new(InMemoryPunchStore::new()), EngineConfig::default());
        let now = replay(&clock, &session);

        let week_start = NaiveDate::from_ymd_opt(2026, 1, 11).unwrap();
        let days: f64 = week_start
            .iter_days()
            .take(7)
            .map(|date| clock.day_totals(EMPLOYEE, date, now).unwrap().work_hours)
            .sum();
        let week = clock.week_totals(EMPLOYEE, week_start, now).unwrap().work_hours;

        prop_assert!((days - week).abs() < 1e-9);
    }

    #[test]
    fn prop_split_window_is_additive(session in arb_session(), cut in 0i64..(7 * 24 * 60)) {
        let clock = TimeClock::new(Arc::new(InMemoryPunchStore::new()), EngineConfig::default());
        let now = replay(&clock, &session);

        let week = TimeWindow::week_containing(monday_morning().date());
        let (left, right) = week.split_at(week.start + Duration::minutes(cut));

        let whole = clock.work_hours(EMPLOYEE, week, now).unwrap().work_hours;
        let parts = clock.work_hours(EMPLOYEE, left, now).unwrap().work_hours
            + clock.work_hours(EMPLOYEE, right, now).unwrap().work_hours;

        prop_assert!((whole - parts).abs() < 1e-9);
    }

    #[test]
    fn prop_overtime_split_preserves_total(total in 0.0f64..120.0, threshold in 0.0f64..80.0) {
        let (regular, overtime) = split_overtime(total, threshold);
        prop_assert!(regular <= threshold);
        prop_assert!(overtime >= 0.0);
        prop_assert!((regular + overtime - total).abs() < 1e-9);
    }

    #[test]
    fn prop_gross_pay_is_sum_of_parts(quarter_hours in 0u32..400, rate_cents in 1000i64..6000) {
        let employee = Employee {
            id: EMPLOYEE.to_string(),
            name: "Dana Whitfield".to_string(),
            employee_number: 1001,
            hourly_rate: Decimal::new(rate_cents, 2),
            active: true,
        };
        let week_start = NaiveDate::from_ymd_opt(2026, 1, 11).unwrap();
        let hours = f64::from(quarter_hours) / 4.0;

        let report =
            calculate_weekly_pay(&employee, week_start, hours, &PayrollConfig::default()).unwrap();

        prop_assert_eq!(report.gross_pay, report.regular_pay + report.overtime_pay);
        prop_assert!(report.gross_pay.scale() <= 2);
        prop_assert!(report.gross_pay >= Decimal::ZERO);
        if hours <= 40.0 {
            prop_assert_eq!(report.overtime_pay, Decimal::ZERO);
        }
    }
}
