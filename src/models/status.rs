//! Derived punch status and transition records.
//!
//! Status is never stored: it is derived from the employee's open punch. The
//! types here describe that derivation and the outcome of each transition.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{BreakKind, Punch, PunchKind};

/// The current activity of an employee.
///
/// # Example
///
/// ```
/// use timeclock_engine::models::{PunchKind, PunchStatus};
///
/// assert_eq!(PunchStatus::from_open_kind(Some(PunchKind::MealBreak)), PunchStatus::OnMealBreak);
/// assert_eq!(PunchStatus::from_open_kind(None), PunchStatus::ClockedOut);
/// assert_eq!(PunchStatus::OnRestBreak.to_string(), "Rest Break");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PunchStatus {
    /// No open punch.
    ClockedOut,
    /// An open work punch.
    Working,
    /// An open meal break punch.
    OnMealBreak,
    /// An open rest break punch.
    OnRestBreak,
}

impl PunchStatus {
    /// Maps the kind of the open punch (if any) to a status.
    pub fn from_open_kind(kind: Option<PunchKind>) -> Self {
        match kind {
            None => PunchStatus::ClockedOut,
            Some(PunchKind::Work) => PunchStatus::Working,
            Some(PunchKind::MealBreak) => PunchStatus::OnMealBreak,
            Some(PunchKind::RestBreak) => PunchStatus::OnRestBreak,
        }
    }

    /// Returns true while on either kind of break.
    pub fn is_on_break(self) -> bool {
        matches!(self, PunchStatus::OnMealBreak | PunchStatus::OnRestBreak)
    }
}

impl fmt::Display for PunchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PunchStatus::ClockedOut => write!(f, "Clocked Out"),
            PunchStatus::Working => write!(f, "Working"),
            PunchStatus::OnMealBreak => write!(f, "Meal Break"),
            PunchStatus::OnRestBreak => write!(f, "Rest Break"),
        }
    }
}

/// A non-fatal data consistency fault.
///
/// Warnings are returned alongside results; the engine stays usable with
/// imperfect historical data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConsistencyWarning {
    /// More than one open punch exists for the employee.
    MultipleOpenPunches {
        /// The affected employee.
        employee_id: String,
        /// Every open punch, latest start first.
        punch_ids: Vec<Uuid>,
        /// The punch used for status and closing.
        selected: Uuid,
    },
    /// A punch starts before the previous punch of the same employee ended.
    OutOfOrderPunch {
        /// The affected employee.
        employee_id: String,
        /// The overlapping punch.
        punch_id: Uuid,
        /// Its start time.
        start_time: NaiveDateTime,
        /// End time of the punch preceding it.
        previous_end: NaiveDateTime,
    },
}

impl fmt::Display for ConsistencyWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConsistencyWarning::MultipleOpenPunches {
                employee_id,
                punch_ids,
                selected,
            } => write!(
                f,
                "Employee '{}' has {} open punches; using {}",
                employee_id,
                punch_ids.len(),
                selected
            ),
            ConsistencyWarning::OutOfOrderPunch {
                employee_id,
                punch_id,
                start_time,
                previous_end,
            } => write!(
                f,
                "Punch {} for employee '{}' starts at {} before the previous punch ended at {}",
                punch_id, employee_id, start_time, previous_end
            ),
        }
    }
}

/// The derived status of one employee at a point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusSnapshot {
    /// The employee the snapshot describes.
    pub employee_id: String,
    /// The derived state.
    pub status: PunchStatus,
    /// The open punch the state was derived from.
    pub active_punch: Option<Punch>,
    /// Consistency faults found while deriving.
    #[serde(default)]
    pub warnings: Vec<ConsistencyWarning>,
}

/// A transition request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Transition {
    /// Open a work punch.
    ClockIn,
    /// Close work and open a break.
    StartBreak {
        /// The break to start.
        kind: BreakKind,
    },
    /// Close the break and resume work.
    EndBreak,
    /// Close whatever is open.
    ClockOut,
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transition::ClockIn => write!(f, "clock in"),
            Transition::StartBreak { kind } => write!(f, "start {} break", kind),
            Transition::EndBreak => write!(f, "end break"),
            Transition::ClockOut => write!(f, "clock out"),
        }
    }
}

/// How the writes of a transition ended up in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommitOutcome {
    /// Every write succeeded.
    Committed,
    /// A write failed and the earlier writes were undone.
    RolledBack,
    /// A write failed and undoing the earlier writes failed too.
    Inconsistent,
}

/// The result of a committed transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionReport {
    /// The employee the transition applied to.
    pub employee_id: String,
    /// The requested transition.
    pub transition: Transition,
    /// Status before the transition.
    pub previous: PunchStatus,
    /// Status after the transition.
    pub current: PunchStatus,
    /// The punch that was closed, with its end time set.
    pub closed: Option<Punch>,
    /// The punch that was opened.
    pub opened: Option<Punch>,
    /// Commit outcome; always [`CommitOutcome::Committed`] on success.
    pub outcome: CommitOutcome,
    /// Consistency faults noticed while planning the transition.
    #[serde(default)]
    pub warnings: Vec<ConsistencyWarning>,
}
