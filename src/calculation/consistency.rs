//! Punch consistency checks.
//!
//! The engine keeps working with imperfect historical data. These checks turn
//! store faults into [`ConsistencyWarning`]s instead of errors: more than one
//! open punch for an employee, and punches that start before an earlier
//! punch ended.

use chrono::NaiveDateTime;

use crate::models::{ConsistencyWarning, Punch};

/// Picks the open punch to act on from an employee's open punches.
///
/// The punch with the latest `start_time` wins (ties broken by the larger id,
/// so the choice never depends on input order). When more than one punch is
/// open a [`ConsistencyWarning::MultipleOpenPunches`] is returned listing them
/// all, latest first.
///
/// # Example
///
/// ```
/// use timeclock_engine::calculation::select_open_punch;
/// use timeclock_engine::models::{Punch, PunchKind};
/// use chrono::NaiveDateTime;
/// use uuid::Uuid;
///
/// let at = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap();
/// let older = Punch {
///     id: Uuid::new_v4(),
///     employee_id: "emp_001".to_string(),
///     start_time: at("2026-01-15 07:00:00"),
///     end_time: None,
///     kind: PunchKind::Work,
/// };
/// let newer = Punch { id: Uuid::new_v4(), start_time: at("2026-01-15 12:00:00"), kind: PunchKind::MealBreak, ..older.clone() };
///
/// let (selected, warning) = select_open_punch("emp_001", vec![older, newer.clone()]);
/// assert_eq!(selected, Some(newer));
/// assert!(warning.is_some());
/// ```
pub fn select_open_punch(
    employee_id: &str,
    mut open: Vec<Punch>,
) -> (Option<Punch>, Option<ConsistencyWarning>) {
    open.retain(|p| p.is_open() && p.employee_id == employee_id);
    open.sort_by(|a, b| b.start_time.cmp(&a.start_time).then(b.id.cmp(&a.id)));

    let warning = (open.len() > 1).then(|| ConsistencyWarning::MultipleOpenPunches {
        employee_id: employee_id.to_string(),
        punch_ids: open.iter().map(|p| p.id).collect(),
        selected: open[0].id,
    });

    (open.into_iter().next(), warning)
}

// How far the punches seen so far extend: up to a known end, or without
// bound while one of them is open (remembering when it started).
#[derive(Debug, Clone, Copy)]
enum Reach {
    Until(NaiveDateTime),
    Open(NaiveDateTime),
}

/// Finds punches of `employee_id` that start before an earlier punch ended.
///
/// Punches are considered in `(start_time, id)` order and each one is
/// compared with every punch before it, not just its neighbour: a long punch
/// can cover several later ones. An open punch never ends, so every punch
/// after it overlaps; its start is then reported as `previous_end`. Touching
/// punches (a break starting at the instant work ended) are in order.
///
/// # Example
///
/// ```
/// use timeclock_engine::calculation::detect_out_of_order;
/// use timeclock_engine::models::{Punch, PunchKind};
/// use chrono::NaiveDateTime;
/// use uuid::Uuid;
///
/// let at = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap();
/// let running = Punch {
///     id: Uuid::new_v4(),
///     employee_id: "emp_001".to_string(),
///     start_time: at("2026-01-15 07:00:00"),
///     end_time: None,
///     kind: PunchKind::Work,
/// };
/// let later = Punch {
///     id: Uuid::new_v4(),
///     start_time: at("2026-01-15 08:00:00"),
///     end_time: Some(at("2026-01-15 09:00:00")),
///     ..running.clone()
/// };
///
/// assert_eq!(detect_out_of_order("emp_001", &[running, later]).len(), 1);
/// ```
pub fn detect_out_of_order(employee_id: &str, punches: &[Punch]) -> Vec<ConsistencyWarning> {
    let mut ordered: Vec<&Punch> = punches
        .iter()
        .filter(|p| p.employee_id == employee_id)
        .collect();
    ordered.sort_by(|a, b| a.start_time.cmp(&b.start_time).then(a.id.cmp(&b.id)));

    let mut warnings = Vec::new();
    let mut reach: Option<Reach> = None;

    for punch in ordered {
        let blocked_until = match reach {
            Some(Reach::Until(end)) if punch.start_time < end => Some(end),
            Some(Reach::Open(since)) => Some(since),
            _ => None,
        };
        if let Some(previous_end) = blocked_until {
            warnings.push(ConsistencyWarning::OutOfOrderPunch {
                employee_id: employee_id.to_string(),
                punch_id: punch.id,
                start_time: punch.start_time,
                previous_end,
            });
        }

        reach = match (reach, punch.end_time) {
            (Some(Reach::Open(since)), _) => Some(Reach::Open(since)),
            (_, None) => Some(Reach::Open(punch.start_time)),
            (Some(Reach::Until(end)), Some(own)) => Some(Reach::Until(end.max(own))),
            (None, Some(own)) => Some(Reach::Until(own)),
        };
    }

    warnings
}

/// Runs every check over an employee's punches.
pub fn check_punches(employee_id: &str, punches: &[Punch]) -> Vec<ConsistencyWarning> {
    let open: Vec<Punch> = punches
        .iter()
        .filter(|p| p.employee_id == employee_id && p.is_open())
        .cloned()
        .collect();

    let mut warnings = Vec::new();
    if let (_, Some(warning)) = select_open_punch(employee_id, open) {
        warnings.push(warning);
    }
    warnings.extend(detect_out_of_order(employee_id, punches));
    warnings
}
