//! Punch state derivation and transition planning.
//!
//! Both functions are pure. [`derive_status`] turns an employee's open
//! punches into a [`StatusSnapshot`]; [`plan_transition`] validates a
//! requested [`Transition`] against that snapshot and describes the writes
//! needed, without performing them.
//!
//! ## Legal transitions
//!
//! | From | Clock in | Start break | End break | Clock out |
//! |---|---|---|---|---|
//! | Clocked Out | open Work | rejected | rejected | `NoOpenPunch` |
//! | Working | rejected | close Work, open break | rejected | close Work |
//! | Meal / Rest Break | rejected | rejected | close break, open Work | close break |

use chrono::NaiveDateTime;

use crate::calculation::select_open_punch;
use crate::config::BreakPolicyConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{Punch, PunchKind, PunchStatus, StatusSnapshot, Transition};

/// Derives an employee's status from their open punches.
///
/// With no open punch the employee is clocked out. Otherwise the open punch
/// with the latest start decides the state, and a warning lists every open
/// punch when there is more than one.
///
/// # Example
///
/// ```
/// use timeclock_engine::engine::derive_status;
/// use timeclock_engine::models::{Punch, PunchKind, PunchStatus};
/// use chrono::NaiveDateTime;
/// use uuid::Uuid;
///
/// let open = Punch {
///     id: Uuid::new_v4(),
///     employee_id: "emp_001".to_string(),
///     start_time: NaiveDateTime::parse_from_str("2026-01-15 12:00:00", "%Y-%m-%d %H:%M:%S").unwrap(),
///     end_time: None,
///     kind: PunchKind::MealBreak,
/// };
///
/// let snapshot = derive_status("emp_001", vec![open]);
/// assert_eq!(snapshot.status, PunchStatus::OnMealBreak);
/// assert!(snapshot.warnings.is_empty());
/// ```
pub fn derive_status(employee_id: &str, open_punches: Vec<Punch>) -> StatusSnapshot {
    let (active_punch, warning) = select_open_punch(employee_id, open_punches);

    StatusSnapshot {
        employee_id: employee_id.to_string(),
        status: PunchStatus::from_open_kind(active_punch.as_ref().map(|p| p.kind)),
        active_punch,
        warnings: warning.into_iter().collect(),
    }
}

/// The writes a validated transition needs.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionPlan {
    /// The employee the plan applies to.
    pub employee_id: String,
    /// The requested transition.
    pub transition: Transition,
    /// The instant every write uses.
    pub at: NaiveDateTime,
    /// Status before the transition.
    pub previous: PunchStatus,
    /// Status once the plan is committed.
    pub next: PunchStatus,
    /// The open punch to close at `at`, if any.
    pub close: Option<Punch>,
    /// The kind of punch to open at `at`, if any.
    pub open: Option<PunchKind>,
}

/// Validates `transition` against `snapshot` and plans its writes.
///
/// # Errors
///
/// - `InvalidTransition` when the transition is not legal from the current
///   state, or a break kind is not enabled in `policy`
/// - `NoOpenPunch` when clocking out while clocked out
/// - `InvalidTimestamp` when `at` precedes the start of the punch to close
pub fn plan_transition(
    snapshot: &StatusSnapshot,
    transition: Transition,
    at: NaiveDateTime,
    policy: &BreakPolicyConfig,
) -> EngineResult<TransitionPlan> {
    let employee_id = snapshot.employee_id.as_str();
    let from = snapshot.status;
    let rejected = || EngineError::InvalidTransition {
        employee_id: employee_id.to_string(),
        from,
        action: transition.to_string(),
    };

    let (close, open) = match (transition, from) {
        (Transition::ClockIn, PunchStatus::ClockedOut) => (false, Some(PunchKind::Work)),
        (Transition::StartBreak { kind }, PunchStatus::Working) => {
            if !policy.allows(kind) {
                return Err(rejected());
            }
            (true, Some(PunchKind::from(kind)))
        }
        (Transition::EndBreak, status) if status.is_on_break() => (true, Some(PunchKind::Work)),
        (Transition::ClockOut, PunchStatus::ClockedOut) => {
            return Err(EngineError::NoOpenPunch {
                employee_id: employee_id.to_string(),
            });
        }
        (Transition::ClockOut, _) => (true, None),
        _ => return Err(rejected()),
    };

    let close = if close {
        let punch = snapshot.active_punch.clone().ok_or_else(|| EngineError::NoOpenPunch {
            employee_id: employee_id.to_string(),
        })?;
        if at < punch.start_time {
            return Err(EngineError::InvalidTimestamp {
                employee_id: employee_id.to_string(),
                now: at,
                open_since: punch.start_time,
            });
        }
        Some(punch)
    } else {
        None
    };

    Ok(TransitionPlan {
        employee_id: employee_id.to_string(),
        transition,
        at,
        previous: from,
        next: PunchStatus::from_open_kind(open),
        close,
        open,
    })
}
